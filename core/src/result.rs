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

//! Per-line results.

use crate::effect::{Effect, Step};
use crate::error::{FailureKind, LineError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    /// 1-based line number in the submitted text.
    pub line_number: usize,
    pub source_line: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success { effect: Effect },
    Failure { kind: FailureKind, reason: String },
}

impl LineResult {
    pub fn new(line_number: usize, source_line: &str, outcome: Result<Effect, LineError>) -> Self {
        let outcome = match outcome {
            Ok(effect) => Outcome::Success { effect },
            Err(err) => Outcome::Failure {
                kind: err.kind(),
                reason: err.to_string(),
            },
        };
        LineResult {
            line_number,
            source_line: source_line.to_string(),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn description(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { effect } => Some(&effect.description),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Failure { reason, .. } => Some(reason),
        }
    }

    pub fn steps(&self) -> &[Step] {
        match &self.outcome {
            Outcome::Success { effect } => &effect.steps,
            Outcome::Failure { .. } => &[],
        }
    }

    /// One console line: `✓ description` or `✗ line N: reason`.
    pub fn render(&self) -> String {
        match &self.outcome {
            Outcome::Success { effect } => format!("✓ {}", effect.description),
            Outcome::Failure { reason, .. } => {
                format!("✗ line {}: {}", self.line_number, reason)
            }
        }
    }
}

pub fn render_all(results: &[LineResult]) -> String {
    results
        .iter()
        .map(LineResult::render)
        .collect::<Vec<_>>()
        .join("\n")
}
