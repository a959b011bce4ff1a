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

use crate::command::{Augment, ProgrammingCommand};
use crate::effect::Effect;
use crate::error::{LineError, PreconditionError};
use crate::state::{ProgrammingState, Value};

pub fn apply(state: &mut ProgrammingState, command: &ProgrammingCommand) -> Result<Effect, LineError> {
    match command {
        ProgrammingCommand::Print(text) => Ok(emit(state, text.clone())),
        ProgrammingCommand::PrintConcat { text, var } => {
            let value = lookup(state, var)?;
            let line = format!("{}{}", text, value);
            Ok(emit(state, line))
        }
        ProgrammingCommand::PrintVar(var) => {
            let line = lookup(state, var)?.to_string();
            Ok(emit(state, line))
        }
        ProgrammingCommand::AssignInt { name, value } => {
            state.variables.insert(name.clone(), Value::Int(*value));
            Ok(Effect::new(format!("{} = {}", name, value)))
        }
        ProgrammingCommand::AssignText { name, value } => {
            state
                .variables
                .insert(name.clone(), Value::Text(value.clone()));
            Ok(Effect::new(format!("{} = \"{}\"", name, value)))
        }
        ProgrammingCommand::Augment { name, op, amount } => {
            let current = integer(state, name)?;
            let (symbol, next) = match op {
                Augment::Add => ("+=", current.checked_add(*amount)),
                Augment::Sub => ("-=", current.checked_sub(*amount)),
            };
            let next = next.ok_or_else(|| {
                PreconditionError::Invalid(format!("integer overflow updating {}", name))
            })?;
            state.variables.insert(name.clone(), Value::Int(next));
            Ok(Effect::new(format!("{} {} {} → {}", name, symbol, amount, next)))
        }
        ProgrammingCommand::If { name, op, rhs } => {
            let lhs = integer(state, name)?;
            let holds = op.holds(lhs, *rhs);
            state.last_condition = Some(holds);
            Ok(Effect::new(format!("condition {} {} {} is {}", name, op, rhs, holds)))
        }
    }
}

fn emit(state: &mut ProgrammingState, line: String) -> Effect {
    let effect = Effect::new(format!("output: {}", line));
    state.output.push(line);
    effect
}

fn lookup<'a>(state: &'a ProgrammingState, name: &str) -> Result<&'a Value, PreconditionError> {
    state
        .variables
        .get(name)
        .ok_or_else(|| PreconditionError::Missing {
            kind: "variable",
            name: name.to_string(),
        })
}

fn integer(state: &ProgrammingState, name: &str) -> Result<i64, PreconditionError> {
    match lookup(state, name)? {
        Value::Int(n) => Ok(*n),
        Value::Text(_) => Err(PreconditionError::Invalid(format!(
            "variable {} is not an integer",
            name
        ))),
    }
}
