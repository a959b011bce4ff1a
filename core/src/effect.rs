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

//! Effects produced by successful lines.

use serde::{Deserialize, Serialize};

/// What a successful line did: a human-readable description plus the ordered
/// steps a visualizer can animate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

impl Effect {
    pub fn new(description: impl Into<String>) -> Self {
        Effect {
            description: description.into(),
            steps: Vec::new(),
        }
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Two positions are compared.
    Compare { left: usize, right: usize },
    /// Two positions of the working copy are exchanged.
    Swap { left: usize, right: usize },
    /// A position holds its final value.
    Settle { index: usize },
    /// Linear search looks at a position.
    Inspect { index: usize },
    Found { index: usize },
    /// One character folded into a running hash sum.
    Accumulate {
        character: char,
        code: u32,
        running_sum: u64,
    },
    /// Max-heap sift-up exchange between a child and its parent.
    HeapSwap { child: usize, parent: usize },
    /// Tree insertion visited a node on its way down.
    Visit { value: i64 },
    Move { x: i64, y: i64 },
    Collect { x: i64, y: i64, score: u64 },
}
