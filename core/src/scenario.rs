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

//! Scenario identifiers.
//!
//! Every session is bound to exactly one scenario. The identifier selects the
//! grammar table, the state shape and the lesson blocks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioId {
    Programming,
    Algorithm,
    DataStructure,
    Math,
    Physics,
    Game,
    Hash,
    Strategy,
    AiChat,
    Colony,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scenario: {0}")]
pub struct UnknownScenario(pub String);

impl ScenarioId {
    pub const ALL: [ScenarioId; 10] = [
        ScenarioId::Programming,
        ScenarioId::Algorithm,
        ScenarioId::DataStructure,
        ScenarioId::Math,
        ScenarioId::Physics,
        ScenarioId::Game,
        ScenarioId::Hash,
        ScenarioId::Strategy,
        ScenarioId::AiChat,
        ScenarioId::Colony,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::Programming => "programming",
            ScenarioId::Algorithm => "algorithm",
            ScenarioId::DataStructure => "datastructure",
            ScenarioId::Math => "math",
            ScenarioId::Physics => "physics",
            ScenarioId::Game => "game",
            ScenarioId::Hash => "hash",
            ScenarioId::Strategy => "strategy",
            ScenarioId::AiChat => "aichat",
            ScenarioId::Colony => "colony",
        }
    }

    /// Resolves a host-supplied identifier. Unknown identifiers fall back to
    /// the programming scenario.
    pub fn resolve(id: &str) -> ScenarioId {
        match id.parse() {
            Ok(scenario) => scenario,
            Err(UnknownScenario(name)) => {
                warn!(scenario = %name, "unknown scenario, falling back to programming");
                ScenarioId::Programming
            }
        }
    }
}

impl FromStr for ScenarioId {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "programming" => Ok(ScenarioId::Programming),
            "algorithm" => Ok(ScenarioId::Algorithm),
            "datastructure" => Ok(ScenarioId::DataStructure),
            "math" => Ok(ScenarioId::Math),
            "physics" => Ok(ScenarioId::Physics),
            "game" => Ok(ScenarioId::Game),
            // "cs" is the legacy name of the hash walkthrough
            "hash" | "cs" => Ok(ScenarioId::Hash),
            "strategy" => Ok(ScenarioId::Strategy),
            "aichat" => Ok(ScenarioId::AiChat),
            "colony" => Ok(ScenarioId::Colony),
            _ => Err(UnknownScenario(s.to_string())),
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_scenario() {
        for scenario in ScenarioId::ALL {
            assert_eq!(scenario.as_str().parse::<ScenarioId>(), Ok(scenario));
        }
    }

    #[test]
    fn test_legacy_alias() {
        assert_eq!("cs".parse::<ScenarioId>(), Ok(ScenarioId::Hash));
    }

    #[test]
    fn test_unknown_falls_back_to_programming() {
        assert_eq!(ScenarioId::resolve("chemistry"), ScenarioId::Programming);
        assert_eq!(ScenarioId::resolve("Physics"), ScenarioId::Physics);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ScenarioId::AiChat).unwrap();
        assert_eq!(json, "\"aichat\"");
        let parsed: ScenarioId = serde_json::from_str("\"datastructure\"").unwrap();
        assert_eq!(parsed, ScenarioId::DataStructure);
    }
}
