/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Playground pattern interpreter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 *
 * 1. OPEN SOURCE: You may use this file under the terms of the GNU Affero
 * General Public License v3.0. If you link to this code, your ENTIRE
 * application must be open-sourced under AGPLv3.
 *
 * 2. COMMERCIAL: For proprietary use, you must obtain a Commercial License
 * from Sovereign Systems.
 *
 * NO IMPLIED LICENSE to rights of Mohamad Al-Zawahreh or Sovereign Systems.
 */

//! Plotting, shapes and the calculator.

use crate::command::MathCommand;
use crate::effect::Effect;
use crate::error::{LineError, PreconditionError};
use crate::expr::{self, Expr};
use crate::state::{LabeledPoint, MathState, Plot, Range, Shape};

/// Spacing between plot samples.
const SAMPLE_STEP: f64 = 0.1;

/// Widest plot range, which keeps a plot at 10,001 samples.
pub const MAX_RANGE_SPAN: i64 = 1_000;

pub fn apply(state: &mut MathState, command: &MathCommand) -> Result<Effect, LineError> {
    match command {
        MathCommand::SetRange { min, max } => {
            let range = Range {
                min: *min,
                max: *max,
            };
            span(range)?;
            state.range = range;
            Ok(Effect::new(format!("range set to [{}, {}]", min, max)))
        }
        MathCommand::Plot { expression } => {
            let parsed = Expr::parse(expression)?;
            let points = sample(&parsed, state.range, span(state.range)?);
            if points.is_empty() {
                return Err(PreconditionError::Invalid(format!(
                    "y = {} has no finite values in [{}, {}]",
                    expression, state.range.min, state.range.max
                ))
                .into());
            }
            let description = format!(
                "plotted y = {} over [{}, {}] ({} points)",
                expression,
                state.range.min,
                state.range.max,
                points.len()
            );
            state.plots.push(Plot {
                expression: expression.clone(),
                points,
            });
            Ok(Effect::new(description))
        }
        MathCommand::Circle { x, y, radius } => {
            positive("radius", *radius)?;
            state.shapes.push(Shape::Circle {
                x: *x,
                y: *y,
                radius: *radius,
            });
            Ok(Effect::new(format!("circle at ({}, {}) radius {}", x, y, radius)))
        }
        MathCommand::Rectangle {
            x,
            y,
            width,
            height,
        } => {
            positive("width", *width)?;
            positive("height", *height)?;
            state.shapes.push(Shape::Rectangle {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            });
            Ok(Effect::new(format!(
                "rectangle at ({}, {}) size {}x{}",
                x, y, width, height
            )))
        }
        MathCommand::Point { x, y, label } => {
            let description = match label {
                Some(label) => format!("point {} at ({}, {})", label, x, y),
                None => format!("point at ({}, {})", x, y),
            };
            state.points.push(LabeledPoint {
                x: *x,
                y: *y,
                label: label.clone(),
            });
            Ok(Effect::new(description))
        }
        MathCommand::Calculate { expression } => {
            let value = expr::evaluate(expression)?;
            state.last_result = Some(value);
            Ok(Effect::new(format!("{} = {}", expression, value)))
        }
    }
}

fn positive(what: &str, value: f64) -> Result<(), PreconditionError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(PreconditionError::Invalid(format!(
            "{} must be positive: {}",
            what, value
        )))
    }
}

/// Width of a usable range. Ranges from a resumed host state go through
/// this too.
fn span(range: Range) -> Result<i64, PreconditionError> {
    if range.min >= range.max {
        return Err(PreconditionError::Invalid(format!(
            "range start must be below its end: {} to {}",
            range.min, range.max
        )));
    }
    range
        .max
        .checked_sub(range.min)
        .filter(|span| *span <= MAX_RANGE_SPAN)
        .ok_or_else(|| {
            PreconditionError::Invalid(format!(
                "range too wide: {} to {} (at most {} units)",
                range.min, range.max, MAX_RANGE_SPAN
            ))
        })
}

/// Samples `expr` across the range. Points where the expression is undefined
/// are skipped.
fn sample(expr: &Expr, range: Range, span: i64) -> Vec<(f64, f64)> {
    let samples = (span as f64 / SAMPLE_STEP).round() as u64;
    (0..=samples)
        .filter_map(|k| {
            let x = range.min as f64 + k as f64 * SAMPLE_STEP;
            expr.eval(Some(x)).ok().map(|y| (x, y))
        })
        .collect()
}
