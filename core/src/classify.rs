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

//! Line classification.

use crate::command::Command;
use crate::error::ClassifyError;
use crate::grammar::GrammarRule;
use tracing::trace;

/// Classifies one line against an ordered rule table.
///
/// The line is trimmed first. The first rule whose pattern matches decides
/// the outcome: if its arguments fail to coerce the line fails, later rules
/// are not consulted.
pub fn classify(line: &str, rules: &[GrammarRule]) -> Result<Command, ClassifyError> {
    let line = line.trim();
    for rule in rules {
        let Some(caps) = rule.captures(line) else {
            continue;
        };
        trace!(rule = rule.name, line, "matched");
        let kind = rule.build(&caps).map_err(|source| ClassifyError::Coerce {
            line: line.to_string(),
            source,
        })?;
        return Ok(Command {
            kind,
            rule: rule.name,
            family: rule.family,
            source_line: line.to_string(),
        });
    }
    Err(ClassifyError::NoMatch(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{
        Augment, ColonyCommand, CommandKind, MathCommand, ProgrammingCommand, StrategyCommand,
    };
    use crate::error::CoerceError;
    use crate::grammar::rules_for;
    use crate::scenario::ScenarioId;

    #[test]
    fn test_every_example_classifies_to_its_own_rule() {
        for scenario in ScenarioId::ALL {
            let rules = rules_for(scenario);
            for rule in rules {
                let command = classify(rule.example, rules)
                    .unwrap_or_else(|e| panic!("{}/{}: {}", scenario, rule.name, e));
                assert_eq!(command.rule, rule.name, "{} example shadowed", scenario);
                assert_eq!(command.kind.scenario(), scenario);
            }
        }
    }

    #[test]
    fn test_classification_is_idempotent() {
        let rules = rules_for(ScenarioId::Math);
        let first = classify("  plot y = x^2 ", rules).unwrap();
        let second = classify("  plot y = x^2 ", rules).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.source_line, "plot y = x^2");
    }

    #[test]
    fn test_assignment_without_spaces() {
        let command = classify("a=1", rules_for(ScenarioId::Programming)).unwrap();
        assert_eq!(
            command.kind,
            CommandKind::Programming(ProgrammingCommand::AssignInt {
                name: "a".into(),
                value: 1
            })
        );
    }

    #[test]
    fn test_plot_equation_wins_over_general_plot() {
        let command = classify("plot y = x^2", rules_for(ScenarioId::Math)).unwrap();
        assert_eq!(command.rule, "plot.equation");
        assert_eq!(
            command.kind,
            CommandKind::Math(MathCommand::Plot {
                expression: "x^2".into()
            })
        );
    }

    #[test]
    fn test_handler_id_names_the_handler_kind() {
        let rules = rules_for(ScenarioId::DataStructure);
        let push = classify("stack.push(1)", rules).unwrap();
        assert_eq!(push.handler_id(), "stack.push");
        assert_eq!(push.family, "datastructure.stack");
        let pop = classify("stack.pop()", rules).unwrap();
        assert_eq!(pop.handler_id(), "stack.pop");
        assert_eq!(pop.family, push.family);
    }

    #[test]
    fn test_unknown_line() {
        let err = classify("badline", rules_for(ScenarioId::Programming)).unwrap_err();
        assert_eq!(err, ClassifyError::NoMatch("badline".into()));
    }

    #[test]
    fn test_lines_are_scenario_scoped() {
        assert!(classify("stack.pop()", rules_for(ScenarioId::Strategy)).is_err());
        assert!(classify("stack.pop()", rules_for(ScenarioId::DataStructure)).is_ok());
    }

    #[test]
    fn test_coercion_failure_stops_at_first_match() {
        let err = classify("x = 99999999999999999999", rules_for(ScenarioId::Programming))
            .unwrap_err();
        assert_eq!(
            err,
            ClassifyError::Coerce {
                line: "x = 99999999999999999999".into(),
                source: CoerceError::IntOutOfRange("99999999999999999999".into()),
            }
        );
    }

    #[test]
    fn test_build_coordinates() {
        let command = classify("build farm at (2,3)", rules_for(ScenarioId::Strategy)).unwrap();
        assert_eq!(
            command.kind,
            CommandKind::Strategy(StrategyCommand::Build {
                kind: "farm".into(),
                x: 2,
                y: 3
            })
        );
    }

    #[test]
    fn test_colony_call_and_sentence_forms_agree() {
        let rules = rules_for(ScenarioId::Colony);
        let sentence = classify("build wall at (3, 3)", rules).unwrap();
        let call = classify(r#"build("wall", 3, 3)"#, rules).unwrap();
        assert_eq!(sentence.kind, call.kind);
        assert_eq!(sentence.family, call.family);

        let moved = classify("move(5,4)", rules).unwrap();
        assert_eq!(
            moved.kind,
            CommandKind::Colony(ColonyCommand::MoveColonist { x: 5, y: 4 })
        );
        let spent = classify("stone -= 100", rules).unwrap();
        assert_eq!(
            spent.kind,
            CommandKind::Colony(ColonyCommand::AdjustResource {
                resource: "stone".into(),
                op: Augment::Sub,
                amount: 100
            })
        );
        assert!(classify("gold = 5", rules).is_err());
    }

    #[test]
    fn test_step_count_bounds() {
        let rules = rules_for(ScenarioId::Physics);
        assert!(classify("step simulation 0", rules).is_err());
        assert!(classify("step simulation 20000", rules).is_err());
        assert!(classify("step simulation", rules).is_ok());
    }
}
