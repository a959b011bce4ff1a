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

//! Drag-and-drop lessons.
//!
//! Each scenario ships one lesson: a short program split into blocks that the
//! learner arranges. The arrangement must match the intended order exactly
//! before the program is handed to the interpreter.

use crate::result::LineResult;
use crate::scenario::ScenarioId;
use crate::session::Session;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBlock {
    pub code: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lesson {
    pub scenario: ScenarioId,
    pub title: &'static str,
    /// Blocks in their intended order.
    pub blocks: &'static [CodeBlock],
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("blocks are out of order, expected: {expected}")]
pub struct OrderMismatch {
    pub expected: String,
}

const fn block(code: &'static str, label: &'static str) -> CodeBlock {
    CodeBlock { code, label }
}

const PROGRAMMING: &[CodeBlock] = &[
    block(r#"print("program start")"#, "print a greeting"),
    block("x = 10", "set x to 10"),
    block("if x > 5:", "check x"),
    block(r#"print("x is greater than 5")"#, "report the result"),
];

const ALGORITHM: &[CodeBlock] = &[
    block("array nums = [3, 1, 4, 2]", "declare an array"),
    block(r#"print("before: " + nums)"#, "show it unsorted"),
    block("sort nums", "sort it"),
    block(r#"print("after: " + nums)"#, "show it sorted"),
];

const DATA_STRUCTURE: &[CodeBlock] = &[
    block("stack.push(1)", "push 1"),
    block("stack.push(2)", "push 2"),
    block("stack.pop()", "pop"),
    block(r#"print("top: " + stack.top())"#, "peek at the top"),
];

const MATH: &[CodeBlock] = &[
    block("set range -5 to 5", "set the axis range"),
    block("plot y = x^2", "plot a parabola"),
    block("draw circle at (0, 0) radius 2", "draw a circle"),
    block("calculate 2^2 + 1", "calculate"),
];

const PHYSICS: &[CodeBlock] = &[
    block("set gravity 9.8", "set gravity"),
    block("create ball at (50, 10)", "create a ball"),
    block("apply force 5 to ball", "push the ball"),
    block("start simulation", "start the simulation"),
];

const GAME: &[CodeBlock] = &[
    block("create player at (0, 0)", "create the player"),
    block("move player right", "step right"),
    block("move player right", "step right again"),
    block("move player down", "step down onto the coin"),
];

const HASH: &[CodeBlock] = &[
    block("function hash(key)", "define the hash function"),
    block("sum = 0", "start the sum"),
    block("for char in key", "loop over the characters"),
    block("sum += ascii(char)", "add each character code"),
    block("return sum % 8", "take the bucket"),
];

const STRATEGY: &[CodeBlock] = &[
    block(r#"define strategy "expansion""#, "name the strategy"),
    block(r#"set goal "control territory""#, "set the goal"),
    block("build farm at (2, 3)", "build a farm"),
    block("train soldier at (1, 1)", "train a soldier"),
    block("execute strategy", "run a turn"),
];

const AI_CHAT: &[CodeBlock] = &[
    block(r#"set thinking mode "brainstorm""#, "pick a thinking mode"),
    block(r#"ask "how do I learn programming""#, "ask a vague question"),
    block("refine prompt with context", "refine the prompt"),
    block(
        r#"ask "As a beginner I want to learn Python step by step. Which 3 practice projects should I create first?""#,
        "ask a precise question",
    ),
    block("analyze response quality", "compare the answers"),
];

const COLONY: &[CodeBlock] = &[
    block("wood += 50", "gather wood"),
    block("build house at (4, 4)", "build a house"),
    block("move colonist to (5, 4)", "walk over to it"),
    block("revive colonist", "revive the fallen colonist"),
    block("stone -= 100", "spend every stone"),
];

pub fn lesson_for(scenario: ScenarioId) -> Lesson {
    let (title, blocks) = match scenario {
        ScenarioId::Programming => ("First program", PROGRAMMING),
        ScenarioId::Algorithm => ("Sorting an array", ALGORITHM),
        ScenarioId::DataStructure => ("Stack basics", DATA_STRUCTURE),
        ScenarioId::Math => ("Plotting functions", MATH),
        ScenarioId::Physics => ("Gravity and forces", PHYSICS),
        ScenarioId::Game => ("Collect the coin", GAME),
        ScenarioId::Hash => ("Character-sum hashing", HASH),
        ScenarioId::Strategy => ("Expansion strategy", STRATEGY),
        ScenarioId::AiChat => ("Better prompts", AI_CHAT),
        ScenarioId::Colony => ("Founding a colony", COLONY),
    };
    Lesson {
        scenario,
        title,
        blocks,
    }
}

/// Lesson for a host-supplied scenario id; unknown ids get the programming
/// lesson.
pub fn lesson_named(id: &str) -> Lesson {
    lesson_for(ScenarioId::resolve(id))
}

impl Lesson {
    /// Checks a learner's arrangement, given as block indices into
    /// [`Lesson::blocks`]. On an exact match returns the program text, one
    /// block per line.
    pub fn check_order(&self, order: &[usize]) -> Result<String, OrderMismatch> {
        let correct = order.len() == self.blocks.len()
            && order.iter().enumerate().all(|(position, index)| position == *index);
        if !correct {
            return Err(OrderMismatch {
                expected: self
                    .blocks
                    .iter()
                    .map(|b| b.label)
                    .collect::<Vec<_>>()
                    .join(" → "),
            });
        }
        Ok(self
            .blocks
            .iter()
            .map(|b| b.code)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Runs the session's lesson if `order` is correct. Nothing is interpreted
/// when the order is wrong.
pub fn run_lesson(session: &mut Session, order: &[usize]) -> Result<Vec<LineResult>, OrderMismatch> {
    let lesson = lesson_for(session.scenario());
    let code = lesson.check_order(order)?;
    info!(scenario = %lesson.scenario, title = lesson.title, "lesson order accepted");
    Ok(session.run(&code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::result::render_all;

    fn identity(lesson: &Lesson) -> Vec<usize> {
        (0..lesson.blocks.len()).collect()
    }

    #[test]
    fn test_every_lesson_runs_cleanly_in_order() {
        for scenario in ScenarioId::ALL {
            let mut session = Session::open(scenario, Config::default());
            let lesson = lesson_for(scenario);
            let results = run_lesson(&mut session, &identity(&lesson)).unwrap();
            assert_eq!(results.len(), lesson.blocks.len());
            for result in &results {
                assert!(
                    result.is_success(),
                    "{}: {} -> {:?}",
                    scenario,
                    result.source_line,
                    result.reason()
                );
            }
        }
    }

    #[test]
    fn test_wrong_order_names_expected_sequence() {
        let lesson = lesson_for(ScenarioId::DataStructure);
        let err = lesson.check_order(&[1, 0, 2, 3]).unwrap_err();
        assert_eq!(err.expected, "push 1 → push 2 → pop → peek at the top");
        assert!(lesson.check_order(&[0, 1, 2]).is_err());
    }

    #[test]
    fn test_wrong_order_interprets_nothing() {
        let mut session = Session::open(ScenarioId::Strategy, Config::default());
        let before = session.state().clone();
        assert!(run_lesson(&mut session, &[4, 3, 2, 1, 0]).is_err());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_unknown_scenario_gets_programming_lesson() {
        assert_eq!(lesson_named("chemistry").scenario, ScenarioId::Programming);
    }

    #[test]
    fn test_strategy_lesson_listing() {
        let mut session = Session::open(ScenarioId::Strategy, Config::default());
        let results = run_lesson(&mut session, &[0, 1, 2, 3, 4]).unwrap();
        insta::assert_snapshot!(render_all(&results), @r###"
        ✓ strategy defined: expansion
        ✓ goal set: control territory
        ✓ built farm at (2,3)
        ✓ trained soldier at (1,1)
        ✓ executed strategy expansion: turn 2, gold 65, wood 40, food 25
        "###);
    }

    #[test]
    fn test_datastructure_lesson_listing() {
        let mut session = Session::open(ScenarioId::DataStructure, Config::default());
        let results = run_lesson(&mut session, &[0, 1, 2, 3]).unwrap();
        insta::assert_snapshot!(render_all(&results), @r###"
        ✓ stack push: 1
        ✓ stack push: 2
        ✓ stack pop: 2
        ✓ output: top: 1
        "###);
    }
}
