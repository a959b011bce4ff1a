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

//! Error taxonomy for interpreted lines.
//!
//! A line fails in one of three ways: it does not classify, the scenario state
//! rejects it, or a math expression cannot be evaluated. All three fold into
//! [`LineError`], which the session turns into a failed line result.

use crate::expr::EvalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Coercion ───────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    #[error("integer out of range: {0}")]
    IntOutOfRange(String),

    #[error("not an integer: {0}")]
    NotInteger(String),

    #[error("not a number: {0}")]
    NotDecimal(String),

    #[error("malformed string literal: {0}")]
    BadString(String),

    #[error("empty list")]
    EmptyList,

    #[error("missing argument: {0}")]
    Missing(&'static str),
}

// ─── Classification ─────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("unrecognized statement: {0}")]
    NoMatch(String),

    #[error("invalid argument in `{line}`: {source}")]
    Coerce {
        line: String,
        #[source]
        source: CoerceError,
    },
}

// ─── Preconditions ──────────────────────────────────────────────────────────

/// A command that classified correctly but cannot run against the current
/// state. State is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreconditionError {
    #[error("{0} empty")]
    Empty(&'static str),

    #[error("{kind} not found: {name}")]
    Missing { kind: &'static str, name: String },

    #[error("{kind} already exists: {name}")]
    Duplicate { kind: &'static str, name: String },

    #[error("unknown {kind}: {name}")]
    Unknown { kind: &'static str, name: String },

    #[error("insufficient resource: need {need} {resource}")]
    Insufficient {
        resource: String,
        need: u64,
        have: u64,
    },

    #[error("invalid position: ({x},{y})")]
    InvalidPosition { x: f64, y: f64 },

    #[error("cell occupied: ({x},{y})")]
    Occupied { x: i64, y: i64 },

    #[error("{0}")]
    Invalid(String),
}

// ─── Line errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error(transparent)]
    Classification(#[from] ClassifyError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Evaluation(#[from] EvalError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Classification,
    Precondition,
    Evaluation,
}

impl LineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LineError::Classification(_) => FailureKind::Classification,
            LineError::Precondition(_) => FailureKind::Precondition,
            LineError::Evaluation(_) => FailureKind::Evaluation,
        }
    }
}
