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

//! C ABI for the browser front end.
//!
//! The host keeps the scenario state. Each call sends the state it holds
//! along with new code, and receives the results and the updated state.
//!
//! Request: `{"scenario": "...", "code": "...", "state": {...}?, "order": [..]?, "config": {...}?}`.
//! When `order` is present the code is ignored and the scenario's lesson is
//! run through the block-ordering gate instead.
//!
//! Response: `{"scenario": "...", "results": [...], "state": {...}}` or
//! `{"error": "..."}`.

use crate::config::Config;
use crate::lesson::run_lesson;
use crate::result::LineResult;
use crate::scenario::ScenarioId;
use crate::session::Session;
use crate::state::ScenarioState;
use serde::{Deserialize, Serialize};
use std::mem;
use std::slice;
use std::str;

#[derive(Deserialize)]
struct InterpretRequest {
    scenario: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    state: Option<ScenarioState>,
    #[serde(default)]
    order: Option<Vec<usize>>,
    #[serde(default)]
    config: Option<Config>,
}

#[derive(Serialize)]
struct InterpretResponse {
    scenario: ScenarioId,
    results: Vec<LineResult>,
    state: ScenarioState,
}

fn error_json(message: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

/// Handles one JSON request and returns the JSON response.
pub fn handle_request(input: &str) -> String {
    let request: InterpretRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => return error_json(format!("invalid request: {}", e)),
    };
    let scenario = ScenarioId::resolve(&request.scenario);
    let mut session = Session::resume(
        scenario,
        request.state,
        request.config.unwrap_or_default(),
    );
    let results = match &request.order {
        Some(order) => match run_lesson(&mut session, order) {
            Ok(results) => results,
            Err(e) => return error_json(e),
        },
        None => session.run(&request.code),
    };
    let response = InterpretResponse {
        scenario,
        results,
        state: session.into_state(),
    };
    serde_json::to_string(&response).unwrap_or_else(error_json)
}

/// Allocates memory for a string of `size` bytes.
/// Returns a pointer to the allocated memory.
#[no_mangle]
pub extern "C" fn playground_alloc(size: usize) -> *mut u8 {
    let mut buf = Vec::with_capacity(size);
    let ptr = buf.as_mut_ptr();
    mem::forget(buf);
    ptr
}

/// Deallocates memory.
///
/// # Safety
/// `ptr` must come from [`playground_alloc`] or [`playground_interpret`] with
/// the same `size`.
#[no_mangle]
pub unsafe extern "C" fn playground_dealloc(ptr: *mut u8, size: usize) {
    let _ = Vec::from_raw_parts(ptr, 0, size);
}

/// Interprets a JSON request.
///
/// Input:
/// - input_ptr: Pointer to the JSON string.
/// - input_len: Length of the JSON string.
///
/// Output:
/// - Returns a pointer to a buffer containing [len (u32) + content (utf8)].
/// - The caller is responsible for freeing this buffer via playground_dealloc (size = len + 4).
///
/// # Safety
/// `input_ptr` must point to `input_len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn playground_interpret(input_ptr: *mut u8, input_len: usize) -> *mut u8 {
    let input_slice = slice::from_raw_parts(input_ptr, input_len);
    let response = match str::from_utf8(input_slice) {
        Ok(s) => handle_request(s),
        Err(_) => error_json("invalid UTF-8 input"),
    };
    make_response(&response)
}

fn make_response(s: &str) -> *mut u8 {
    let bytes = s.as_bytes();
    let len = bytes.len() as u32;

    // Layout: [len (4 bytes, little endian)] [content...]
    let mut buf = Vec::with_capacity(4 + bytes.len());
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(bytes);
    buf.shrink_to_fit();

    let ptr = buf.as_mut_ptr();
    mem::forget(buf);
    ptr
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_state_round_trips_through_host() {
        let first: Value = serde_json::from_str(&handle_request(
            r#"{"scenario": "datastructure", "code": "stack.push(1)\nstack.push(2)"}"#,
        ))
        .unwrap();
        assert_eq!(first["results"].as_array().unwrap().len(), 2);

        let request = serde_json::json!({
            "scenario": "datastructure",
            "code": "stack.pop()\nstack.pop()\nstack.pop()",
            "state": first["state"],
        });
        let second: Value = serde_json::from_str(&handle_request(&request.to_string())).unwrap();
        let results = second["results"].as_array().unwrap();
        assert_eq!(results[0]["effect"]["description"], "stack pop: 2");
        assert_eq!(results[1]["effect"]["description"], "stack pop: 1");
        assert_eq!(results[2]["status"], "failure");
        assert_eq!(results[2]["reason"], "stack empty");
    }

    #[test]
    fn test_unknown_scenario_falls_back() {
        let response: Value =
            serde_json::from_str(&handle_request(r#"{"scenario": "cooking", "code": "x = 1"}"#))
                .unwrap();
        assert_eq!(response["scenario"], "programming");
        assert_eq!(response["state"]["variables"]["x"], 1);
    }

    #[test]
    fn test_lesson_order_gate() {
        let response: Value = serde_json::from_str(&handle_request(
            r#"{"scenario": "game", "order": [1, 0, 2, 3]}"#,
        ))
        .unwrap();
        assert!(response["error"]
            .as_str()
            .unwrap()
            .starts_with("blocks are out of order"));
    }

    #[test]
    fn test_malformed_request() {
        let response: Value = serde_json::from_str(&handle_request("{")).unwrap();
        assert!(response["error"].as_str().unwrap().starts_with("invalid request"));
    }

    #[test]
    fn test_response_buffer_layout() {
        let mut input = br#"{"scenario": "hash", "code": "hash(\"apple\")"}"#.to_vec();
        unsafe {
            let ptr = playground_interpret(input.as_mut_ptr(), input.len());
            let len = u32::from_le_bytes([*ptr, *ptr.add(1), *ptr.add(2), *ptr.add(3)]) as usize;
            let body = str::from_utf8(slice::from_raw_parts(ptr.add(4), len)).unwrap();
            assert!(body.contains("530 % 8 = 2"));
            playground_dealloc(ptr, len + 4);
        }
    }
}
