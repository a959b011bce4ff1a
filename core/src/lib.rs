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

//! Pattern-driven command interpreter for the learning playground.
//!
//! Source text is split into lines, each line is classified against the
//! grammar table of the active scenario, and the resulting command is applied
//! to that scenario's state. Every line yields one [`result::LineResult`].

pub mod classify;
pub mod coerce;
pub mod command;
pub mod config;
pub mod effect;
pub mod error;
pub mod expr;
pub mod grammar;
pub mod handlers;
pub mod lesson;
pub mod progress;
pub mod replay;
pub mod result;
pub mod scenario;
pub mod session;
pub mod state;
pub mod wasm;

pub use config::Config;
pub use result::LineResult;
pub use scenario::ScenarioId;
pub use session::{interpret, Session};
pub use state::ScenarioState;
pub use wasm::*;
