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

//! Array declaration, sorting and linear search.
//!
//! Sorting runs on a working copy and records every comparison and swap as a
//! [`Step`]; the named array is replaced only once the sort has finished.

use crate::command::{AlgorithmCommand, SortMethod};
use crate::effect::{Effect, Step};
use crate::error::{LineError, PreconditionError};
use crate::state::AlgorithmState;

/// Longest array `array name = [...]` accepts. Sorting records O(n²) steps.
pub const MAX_ARRAY_LEN: usize = 100;

pub fn apply(state: &mut AlgorithmState, command: &AlgorithmCommand) -> Result<Effect, LineError> {
    match command {
        AlgorithmCommand::Declare { name, values } => {
            within_limit(values)?;
            state.arrays.insert(name.clone(), values.clone());
            Ok(Effect::new(format!("array {} = {:?}", name, values)))
        }
        AlgorithmCommand::Sort { name, method } => {
            let values = within_limit(array(state, name)?)?;
            let (sorted, steps) = match method {
                SortMethod::Bubble => bubble_sort(values),
                SortMethod::Selection => selection_sort(values),
            };
            let comparisons = count(&steps, |s| matches!(s, Step::Compare { .. }));
            let swaps = count(&steps, |s| matches!(s, Step::Swap { .. }));
            let description = format!(
                "sorted {}: {:?} ({} sort, {} comparisons, {} swaps)",
                name, sorted, method, comparisons, swaps
            );
            state.arrays.insert(name.clone(), sorted);
            Ok(Effect::new(description).with_steps(steps))
        }
        AlgorithmCommand::Search { name, target } => {
            let values = array(state, name)?;
            let (found, steps) = linear_search(values, *target);
            let description = match found {
                Some(index) => format!("found {} in {} at index {}", target, name, index),
                None => format!("{} not found in {}", target, name),
            };
            Ok(Effect::new(description).with_steps(steps))
        }
        AlgorithmCommand::Print { text, name } => {
            let line = format!("{}{:?}", text, array(state, name)?);
            let effect = Effect::new(format!("output: {}", line));
            state.output.push(line);
            Ok(effect)
        }
    }
}

fn array<'a>(state: &'a AlgorithmState, name: &str) -> Result<&'a [i64], PreconditionError> {
    state
        .arrays
        .get(name)
        .map(Vec::as_slice)
        .ok_or_else(|| PreconditionError::Missing {
            kind: "array",
            name: name.to_string(),
        })
}

fn within_limit(values: &[i64]) -> Result<&[i64], PreconditionError> {
    if values.len() > MAX_ARRAY_LEN {
        return Err(PreconditionError::Invalid(format!(
            "array too long: {} elements (at most {})",
            values.len(),
            MAX_ARRAY_LEN
        )));
    }
    Ok(values)
}

fn count(steps: &[Step], pred: impl Fn(&Step) -> bool) -> usize {
    steps.iter().filter(|s| pred(s)).count()
}

pub fn bubble_sort(values: &[i64]) -> (Vec<i64>, Vec<Step>) {
    let mut work = values.to_vec();
    let mut steps = Vec::new();
    let n = work.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            steps.push(Step::Compare { left: j, right: j + 1 });
            if work[j] > work[j + 1] {
                work.swap(j, j + 1);
                steps.push(Step::Swap { left: j, right: j + 1 });
            }
        }
        steps.push(Step::Settle { index: n - i - 1 });
    }
    if n > 0 {
        steps.push(Step::Settle { index: 0 });
    }
    (work, steps)
}

pub fn selection_sort(values: &[i64]) -> (Vec<i64>, Vec<Step>) {
    let mut work = values.to_vec();
    let mut steps = Vec::new();
    let n = work.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            steps.push(Step::Compare { left: min, right: j });
            if work[j] < work[min] {
                min = j;
            }
        }
        if min != i {
            work.swap(i, min);
            steps.push(Step::Swap { left: i, right: min });
        }
        steps.push(Step::Settle { index: i });
    }
    if n > 0 {
        steps.push(Step::Settle { index: n - 1 });
    }
    (work, steps)
}

pub fn linear_search(values: &[i64], target: i64) -> (Option<usize>, Vec<Step>) {
    let mut steps = Vec::new();
    for (index, value) in values.iter().enumerate() {
        steps.push(Step::Inspect { index });
        if *value == target {
            steps.push(Step::Found { index });
            return (Some(index), steps);
        }
    }
    (None, steps)
}
