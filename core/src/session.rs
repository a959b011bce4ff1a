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

//! Interpretation sessions.
//!
//! A session binds one scenario to one state value and interprets submitted
//! text line by line. A failing line is reported and skipped; it never stops
//! the lines after it, and it never leaves partial state behind.

use crate::classify::classify;
use crate::config::Config;
use crate::effect::Effect;
use crate::error::LineError;
use crate::grammar::{rules_for, GrammarRule};
use crate::handlers;
use crate::result::LineResult;
use crate::scenario::ScenarioId;
use crate::state::ScenarioState;
use tracing::{debug, info};

/// Yields `(line_number, statement)` for every line worth interpreting.
/// Blank lines and lines starting with `#` or `//` are skipped; line numbers
/// stay 1-based positions in the original text.
pub fn statements(code: &str) -> impl Iterator<Item = (usize, &str)> {
    code.lines().enumerate().filter_map(|(index, line)| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            None
        } else {
            Some((index + 1, trimmed))
        }
    })
}

/// Classifies and applies one statement.
pub fn run_line(
    line: &str,
    rules: &[GrammarRule],
    state: &mut ScenarioState,
) -> Result<Effect, LineError> {
    let command = classify(line, rules)?;
    debug!(handler = command.handler_id(), family = command.family, "classified");
    handlers::apply(state, &command)
}

/// Interprets `code` against `state`, producing one result per statement in
/// source order.
pub fn interpret(code: &str, scenario: ScenarioId, state: &mut ScenarioState) -> Vec<LineResult> {
    let rules = rules_for(scenario);
    let results: Vec<LineResult> = statements(code)
        .map(|(number, line)| LineResult::new(number, line, run_line(line, rules, state)))
        .collect();
    let failures = results.iter().filter(|r| !r.is_success()).count();
    info!(
        scenario = %scenario,
        lines = results.len(),
        failures,
        "interpretation finished"
    );
    results
}

#[derive(Debug, Clone)]
pub struct Session {
    scenario: ScenarioId,
    state: ScenarioState,
    config: Config,
}

impl Session {
    pub fn open(scenario: ScenarioId, config: Config) -> Self {
        let state = ScenarioState::new(scenario, &config);
        Session {
            scenario,
            state,
            config,
        }
    }

    /// Resumes a session from state held by the host. State belonging to a
    /// different scenario is discarded in favour of a fresh one.
    pub fn resume(scenario: ScenarioId, state: Option<ScenarioState>, config: Config) -> Self {
        match state {
            Some(state) if state.scenario() == scenario => Session {
                scenario,
                state,
                config,
            },
            _ => Session::open(scenario, config),
        }
    }

    pub fn scenario(&self) -> ScenarioId {
        self.scenario
    }

    pub fn state(&self) -> &ScenarioState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_state(self) -> ScenarioState {
        self.state
    }

    pub fn run(&mut self, code: &str) -> Vec<LineResult> {
        interpret(code, self.scenario, &mut self.state)
    }

    /// Discards all state and starts over from the scenario defaults.
    pub fn reset(&mut self) {
        self.state = ScenarioState::new(self.scenario, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::result::{render_all, Outcome};
    use crate::state::{Position, StrategyState};

    fn open(scenario: ScenarioId) -> Session {
        Session::open(scenario, Config::default())
    }

    #[test]
    fn test_partial_failure_continues() {
        let mut session = open(ScenarioId::Programming);
        let results = session.run("a=1\nbadline\nb=2");
        assert_eq!(results.len(), 3);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
        assert!(results[2].is_success());
        assert_eq!(
            results[1].outcome,
            Outcome::Failure {
                kind: FailureKind::Classification,
                reason: "unrecognized statement: badline".into()
            }
        );
        let ScenarioState::Programming(state) = session.state() else {
            panic!("wrong state");
        };
        assert_eq!(state.variables.len(), 2);
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let mut session = open(ScenarioId::Programming);
        let results = session.run("\n# setup\nx = 1\n\n// check\nif x == 1:\n");
        let numbers: Vec<usize> = results.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, vec![3, 6]);
    }

    #[test]
    fn test_empty_input() {
        let mut session = open(ScenarioId::Math);
        assert!(session.run("").is_empty());
        assert!(session.run("   \n\t\n").is_empty());
    }

    #[test]
    fn test_later_lines_see_earlier_mutations() {
        let mut session = Session::resume(
            ScenarioId::Strategy,
            Some(ScenarioState::Strategy(StrategyState {
                resources: [("gold", 10), ("wood", 50), ("food", 30)]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
                ..StrategyState::default()
            })),
            Config::default(),
        );
        let results = session.run("build farm at (2,3)\ncollect gold 20\nbuild farm at (2,3)");
        assert_eq!(
            render_all(&results),
            "✗ line 1: insufficient resource: need 30 gold\n\
             ✓ collected 20 gold (gold 30)\n\
             ✓ built farm at (2,3)"
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = open(ScenarioId::Game);
        session.run("create player at (0, 0)\nmove player right");
        session.reset();
        let ScenarioState::Game(state) = session.state() else {
            panic!("wrong state");
        };
        assert_eq!(state.player, None);
        assert_eq!(state.coins, vec![Position { x: 2, y: 1 }]);
    }

    #[test]
    fn test_resume_discards_foreign_state() {
        let foreign = ScenarioState::new(ScenarioId::Game, &Config::default());
        let session = Session::resume(ScenarioId::Hash, Some(foreign), Config::default());
        assert_eq!(session.state().scenario(), ScenarioId::Hash);
    }

    #[test]
    fn test_pop_on_empty_stack_keeps_state() {
        let mut session = open(ScenarioId::DataStructure);
        let before = session.state().clone();
        let results = session.run("stack.pop()");
        assert_eq!(results[0].reason(), Some("stack empty"));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_extreme_math_input_fails_per_line() {
        let mut session = open(ScenarioId::Math);
        let deep = format!("calculate {}1{}", "(".repeat(100_000), ")".repeat(100_000));
        let code = format!(
            "set range -9223372036854775808 to 9223372036854775807\nplot x\n{}\ncalculate 1 + 1",
            deep
        );
        let results = session.run(&code);
        assert_eq!(results.len(), 4);
        assert!(results[0].reason().is_some_and(|r| r.starts_with("range too wide")));
        assert!(results[1].is_success());
        assert_eq!(results[2].reason(), Some("expression longer than 1024 tokens"));
        assert_eq!(
            results[2].outcome,
            Outcome::Failure {
                kind: FailureKind::Evaluation,
                reason: "expression longer than 1024 tokens".into()
            }
        );
        assert!(results[3].is_success());
    }

    #[test]
    fn test_oversized_array_fails_per_line() {
        let mut session = open(ScenarioId::Algorithm);
        let values: Vec<String> = (0..400).rev().map(|n| n.to_string()).collect();
        let code = format!("array nums = [{}]\nsort nums", values.join(", "));
        let results = session.run(&code);
        assert_eq!(
            results[0].reason(),
            Some("array too long: 400 elements (at most 100)")
        );
        assert_eq!(results[1].reason(), Some("array not found: nums"));
    }

    #[test]
    fn test_colony_resources_floor_at_zero() {
        let mut session = open(ScenarioId::Colony);
        let results = session.run(
            "stone -= 100\nbuild wall at (1, 1)\nwood = 5\nbuild house at (2, 2)\n\
             wood += 25\nstone = 10\nbuild house at (2,2)\ndisaster flood",
        );
        insta::assert_snapshot!(render_all(&results), @r###"
        ✓ stone -= 100 → 0
        ✗ line 2: insufficient resource: need 5 stone
        ✓ wood = 5
        ✗ line 4: insufficient resource: need 30 wood
        ✓ wood += 25 → 30
        ✓ stone = 10
        ✓ built house at (2,2)
        ✓ flood struck: food 40
        "###);
        match session.state() {
            ScenarioState::Colony(colony) => {
                assert_eq!(colony.resource("wood"), 0);
                assert_eq!(colony.resource("stone"), 0);
            }
            other => panic!("unexpected state {:?}", other.scenario()),
        }
    }

    #[test]
    fn test_hash_walkthrough_listing() {
        let mut session = open(ScenarioId::Hash);
        let results = session.run(
            "function hash(key)\nsum = 0\nfor char in key\nsum += ascii(char)\nreturn sum % 8",
        );
        insta::assert_snapshot!(render_all(&results), @r###"
        ✓ defined hash(key) with input "apple"
        ✓ sum = 0
        ✓ loop char over "apple" (5 characters)
        ✓ sum = 530
        ✓ return 530 % 8 = 2
        "###);
    }
}
