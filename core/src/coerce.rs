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

//! Argument coercion for captured grammar fragments.
//!
//! Grammar rules capture raw text; these helpers turn it into typed values.
//! Every rule goes through here so that range and format failures read the
//! same no matter which scenario produced them.

use crate::error::CoerceError;
use regex::Captures;
use std::num::IntErrorKind;

/// Returns the named capture or fails with [`CoerceError::Missing`].
pub fn capture<'t>(caps: &Captures<'t>, name: &'static str) -> Result<&'t str, CoerceError> {
    caps.name(name)
        .map(|m| m.as_str())
        .ok_or(CoerceError::Missing(name))
}

/// Returns the named capture if the optional group participated.
pub fn optional<'t>(caps: &Captures<'t>, name: &'static str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str())
}

pub fn int(raw: &str) -> Result<i64, CoerceError> {
    let raw = raw.trim();
    raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            CoerceError::IntOutOfRange(raw.to_string())
        }
        _ => CoerceError::NotInteger(raw.to_string()),
    })
}

/// Non-negative integer, used for counts and amounts.
pub fn count(raw: &str) -> Result<u64, CoerceError> {
    let value = int(raw)?;
    u64::try_from(value).map_err(|_| CoerceError::IntOutOfRange(raw.trim().to_string()))
}

pub fn decimal(raw: &str) -> Result<f64, CoerceError> {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoerceError::NotDecimal(raw.to_string())),
    }
}

/// Strips the surrounding quotes from a string literal and resolves escapes.
///
/// Both `"..."` and `'...'` are accepted. Recognized escapes are `\n`, `\t`,
/// `\\` and the two quote characters; any other escaped character is kept
/// with its backslash.
pub fn quoted(raw: &str) -> Result<String, CoerceError> {
    let raw = raw.trim();
    let mut chars = raw.chars();
    let open = chars.next();
    let close = chars.next_back();
    let body = match (open, close) {
        (Some(o), Some(c)) if o == c && (o == '"' || o == '\'') => chars.as_str(),
        _ => return Err(CoerceError::BadString(raw.to_string())),
    };

    let mut out = String::with_capacity(body.len());
    let mut iter = body.chars();
    while let Some(ch) = iter.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match iter.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return Err(CoerceError::BadString(raw.to_string())),
        }
    }
    Ok(out)
}

/// A string-or-bare-token value. Quoted text is unquoted, anything else is
/// taken verbatim.
pub fn value(raw: &str) -> Result<String, CoerceError> {
    let raw = raw.trim();
    if raw.starts_with('"') || raw.starts_with('\'') {
        quoted(raw)
    } else if raw.is_empty() {
        Err(CoerceError::Missing("value"))
    } else {
        Ok(raw.to_string())
    }
}

/// Comma-separated integers, e.g. the body of `[3, 1, 4, 2]`.
pub fn int_list(raw: &str) -> Result<Vec<i64>, CoerceError> {
    if raw.trim().is_empty() {
        return Err(CoerceError::EmptyList);
    }
    raw.split(',').map(int).collect()
}
