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

//! Step-by-step walkthrough of a character-sum hash.
//!
//! The statements build up `function hash(key)`, `sum = 0`,
//! `for char in key`, `sum += ascii(char)` and `return sum % m` one line at a
//! time; each line checks that the ones it depends on already ran.

use crate::command::HashCommand;
use crate::effect::{Effect, Step};
use crate::error::{LineError, PreconditionError};
use crate::state::HashState;

pub fn apply(state: &mut HashState, command: &HashCommand) -> Result<Effect, LineError> {
    match command {
        HashCommand::Define { param } => {
            state.param = Some(param.clone());
            state.sum = None;
            state.loop_var = None;
            state.result = None;
            Ok(Effect::new(format!(
                "defined hash({}) with input \"{}\"",
                param, state.input
            )))
        }
        HashCommand::SetInput { name, value } => {
            if let Some(param) = &state.param {
                if param != name {
                    return Err(missing("variable", name).into());
                }
            }
            state.input = value.clone();
            state.sum = None;
            state.result = None;
            Ok(Effect::new(format!("{} = \"{}\"", name, value)))
        }
        HashCommand::InitSum => {
            require_function(state)?;
            state.sum = Some(0);
            state.result = None;
            Ok(Effect::new("sum = 0"))
        }
        HashCommand::Loop { var, over } => {
            let param = require_function(state)?;
            if param != over.as_str() {
                return Err(missing("variable", over).into());
            }
            if state.sum.is_none() {
                return Err(PreconditionError::Invalid("sum is not initialized".into()).into());
            }
            let description = format!(
                "loop {} over \"{}\" ({} characters)",
                var,
                state.input,
                state.input.chars().count()
            );
            state.loop_var = Some(var.clone());
            Ok(Effect::new(description))
        }
        HashCommand::Accumulate { var } => {
            if state.loop_var.as_deref() != Some(var.as_str()) {
                return Err(missing("loop variable", var).into());
            }
            let start = state
                .sum
                .ok_or_else(|| PreconditionError::Invalid("sum is not initialized".into()))?;
            let (sum, steps) = accumulate(&state.input, start);
            state.sum = Some(sum);
            Ok(Effect::new(format!("sum = {}", sum)).with_steps(steps))
        }
        HashCommand::Return { modulus } => {
            let sum = state
                .sum
                .ok_or_else(|| PreconditionError::Invalid("sum is not initialized".into()))?;
            let modulus = u64::try_from(*modulus)
                .ok()
                .filter(|m| *m > 0)
                .ok_or_else(|| {
                    PreconditionError::Invalid(format!("modulus must be positive: {}", modulus))
                })?;
            let result = sum % modulus;
            state.result = Some(result);
            Ok(Effect::new(format!("return {} % {} = {}", sum, modulus, result)))
        }
        HashCommand::HashOf(text) => {
            let modulus = u64::from(state.modulus.max(1));
            let (sum, steps) = accumulate(text, 0);
            let result = sum % modulus;
            state.input = text.clone();
            state.sum = Some(sum);
            state.result = Some(result);
            Ok(Effect::new(format!(
                "hash(\"{}\") = {} % {} = {}",
                text, sum, modulus, result
            ))
            .with_steps(steps))
        }
    }
}

fn require_function(state: &HashState) -> Result<&str, PreconditionError> {
    state
        .param
        .as_deref()
        .ok_or_else(|| missing("function", "hash"))
}

fn missing(kind: &'static str, name: &str) -> PreconditionError {
    PreconditionError::Missing {
        kind,
        name: name.to_string(),
    }
}

/// Adds each character's code point to `start`, recording the running sum.
pub fn accumulate(text: &str, start: u64) -> (u64, Vec<Step>) {
    let mut sum = start;
    let steps = text
        .chars()
        .map(|character| {
            let code = u32::from(character);
            sum = sum.saturating_add(u64::from(code));
            Step::Accumulate {
                character,
                code,
                running_sum: sum,
            }
        })
        .collect();
    (sum, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &mut HashState, commands: &[HashCommand]) -> Vec<Effect> {
        commands
            .iter()
            .map(|c| apply(state, c).unwrap())
            .collect()
    }

    #[test]
    fn test_apple_walkthrough() {
        let mut state = HashState::new(8);
        let effects = run(
            &mut state,
            &[
                HashCommand::Define {
                    param: "key".into(),
                },
                HashCommand::InitSum,
                HashCommand::Loop {
                    var: "char".into(),
                    over: "key".into(),
                },
                HashCommand::Accumulate { var: "char".into() },
                HashCommand::Return { modulus: 8 },
            ],
        );
        let sums: Vec<u64> = effects[3]
            .steps
            .iter()
            .filter_map(|s| match s {
                Step::Accumulate { running_sum, .. } => Some(*running_sum),
                _ => None,
            })
            .collect();
        assert_eq!(sums, vec![97, 209, 321, 429, 530]);
        assert_eq!(effects[4].description, "return 530 % 8 = 2");
        assert_eq!(state.result, Some(2));
    }

    #[test]
    fn test_one_shot_hash_uses_configured_modulus() {
        let mut state = HashState::new(8);
        let effect = apply(&mut state, &HashCommand::HashOf("apple".into())).unwrap();
        assert_eq!(effect.description, "hash(\"apple\") = 530 % 8 = 2");
        assert_eq!(effect.steps.len(), 5);
    }

    #[test]
    fn test_loop_needs_function() {
        let mut state = HashState::new(8);
        let err = apply(
            &mut state,
            &HashCommand::Loop {
                var: "c".into(),
                over: "key".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "function not found: hash");
    }

    #[test]
    fn test_accumulate_needs_loop_variable() {
        let mut state = HashState::new(8);
        run(
            &mut state,
            &[
                HashCommand::Define {
                    param: "key".into(),
                },
                HashCommand::InitSum,
            ],
        );
        let err = apply(&mut state, &HashCommand::Accumulate { var: "c".into() }).unwrap_err();
        assert_eq!(err.to_string(), "loop variable not found: c");
        assert_eq!(state.sum, Some(0));
    }

    #[test]
    fn test_zero_modulus_rejected() {
        let mut state = HashState::new(8);
        state.param = Some("key".into());
        state.sum = Some(530);
        assert!(apply(&mut state, &HashCommand::Return { modulus: 0 }).is_err());
        assert_eq!(state.result, None);
    }
}
