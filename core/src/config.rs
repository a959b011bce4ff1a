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

//! Runtime configuration.
//!
//! Defaults cover every field. A JSON document or `PLAYGROUND_*` environment
//! variables may override them; environment values win.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_HASH_MODULUS: &str = "PLAYGROUND_HASH_MODULUS";
pub const ENV_AI_SEED: &str = "PLAYGROUND_AI_SEED";
pub const ENV_REPLAY_SPEED: &str = "PLAYGROUND_REPLAY_SPEED";
pub const ENV_PROGRESS: &str = "PLAYGROUND_PROGRESS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bucket count used by the one-shot `hash("...")` command.
    pub hash_modulus: u32,
    /// Seed for the simulated chat replies.
    pub ai_seed: u64,
    /// Multiplier applied to replay delays; 2.0 plays twice as fast.
    pub replay_speed: f64,
    pub progress_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hash_modulus: 8,
            ai_seed: 7,
            replay_speed: 1.0,
            progress_path: None,
        }
    }
}

impl Config {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(source)?;
        config.validate()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Config::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value if set.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_HASH_MODULUS) {
            self.hash_modulus = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_HASH_MODULUS,
                value: raw.clone(),
                reason: "expected a positive integer",
            })?;
        }
        if let Some(raw) = lookup(ENV_AI_SEED) {
            self.ai_seed = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_AI_SEED,
                value: raw.clone(),
                reason: "expected an unsigned integer",
            })?;
        }
        if let Some(raw) = lookup(ENV_REPLAY_SPEED) {
            self.replay_speed = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_REPLAY_SPEED,
                value: raw.clone(),
                reason: "expected a number",
            })?;
        }
        if let Some(raw) = lookup(ENV_PROGRESS) {
            if !raw.trim().is_empty() {
                self.progress_path = Some(PathBuf::from(raw.trim()));
            }
        }
        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.hash_modulus == 0 {
            return Err(ConfigError::InvalidValue {
                key: "hash_modulus",
                value: "0".into(),
                reason: "must be positive",
            });
        }
        if !(self.replay_speed.is_finite() && self.replay_speed > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "replay_speed",
                value: self.replay_speed.to_string(),
                reason: "must be a positive number",
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default().with_overrides(|_| None).unwrap();
        assert_eq!(config.hash_modulus, 8);
        assert_eq!(config.ai_seed, 7);
        assert_eq!(config.replay_speed, 1.0);
        assert_eq!(config.progress_path, None);
    }

    #[test]
    fn test_env_overrides() {
        let env = vars(&[
            (ENV_HASH_MODULUS, "16"),
            (ENV_REPLAY_SPEED, "2.5"),
            (ENV_PROGRESS, "/tmp/progress.json"),
        ]);
        let config = Config::default()
            .with_overrides(|k| env.get(k).cloned())
            .unwrap();
        assert_eq!(config.hash_modulus, 16);
        assert_eq!(config.replay_speed, 2.5);
        assert_eq!(config.progress_path, Some(PathBuf::from("/tmp/progress.json")));
    }

    #[test]
    fn test_rejects_zero_modulus() {
        let env = vars(&[(ENV_HASH_MODULUS, "0")]);
        let result = Config::default().with_overrides(|k| env.get(k).cloned());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_rejects_garbage_speed() {
        let env = vars(&[(ENV_REPLAY_SPEED, "fast")]);
        let result = Config::default().with_overrides(|k| env.get(k).cloned());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = Config::from_json(r#"{"ai_seed": 42}"#).unwrap();
        assert_eq!(config.ai_seed, 42);
        assert_eq!(config.hash_modulus, 8);
    }
}
