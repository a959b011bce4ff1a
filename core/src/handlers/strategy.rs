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

//! Turn-based resource strategy on a 10x8 board.

use crate::command::StrategyCommand;
use crate::effect::Effect;
use crate::error::{LineError, PreconditionError};
use crate::state::{Building, Plan, StrategyState, Unit, BOARD_HEIGHT, BOARD_WIDTH};

type Cost = &'static [(&'static str, u64)];

pub const RESOURCES: [&str; 3] = ["gold", "wood", "food"];

/// Income granted by each `execute strategy`.
const INCOME: Cost = &[("gold", 20), ("wood", 10), ("food", 5)];

pub fn building_cost(kind: &str) -> Option<Cost> {
    match kind {
        "farm" => Some(&[("gold", 30), ("wood", 20)]),
        "barracks" => Some(&[("gold", 50), ("wood", 40)]),
        "tower" => Some(&[("gold", 40), ("wood", 30)]),
        _ => None,
    }
}

pub fn unit_cost(kind: &str) -> Option<Cost> {
    match kind {
        "soldier" => Some(&[("gold", 25), ("food", 10)]),
        "archer" => Some(&[("gold", 30), ("food", 8)]),
        "knight" => Some(&[("gold", 60), ("food", 15)]),
        _ => None,
    }
}

fn unit_attack(kind: &str) -> u32 {
    match kind {
        "soldier" => 20,
        "archer" => 25,
        "knight" => 35,
        _ => 10,
    }
}

pub fn apply(state: &mut StrategyState, command: &StrategyCommand) -> Result<Effect, LineError> {
    match command {
        StrategyCommand::Define(name) => {
            state.plan = Some(Plan {
                name: name.clone(),
                goal: None,
            });
            Ok(Effect::new(format!("strategy defined: {}", name)))
        }
        StrategyCommand::SetGoal(goal) => {
            let plan = state.plan.as_mut().ok_or_else(no_plan)?;
            plan.goal = Some(goal.clone());
            Ok(Effect::new(format!("goal set: {}", goal)))
        }
        StrategyCommand::Build { kind, x, y } => {
            let cost = building_cost(kind).ok_or_else(|| PreconditionError::Unknown {
                kind: "building type",
                name: kind.clone(),
            })?;
            on_board(*x, *y)?;
            if state.buildings.iter().any(|b| b.x == *x && b.y == *y) {
                return Err(PreconditionError::Occupied { x: *x, y: *y }.into());
            }
            spend(state, cost)?;
            state.buildings.push(Building {
                kind: kind.clone(),
                x: *x,
                y: *y,
            });
            Ok(Effect::new(format!("built {} at ({},{})", kind, x, y)))
        }
        StrategyCommand::Train { kind, x, y } => {
            let cost = unit_cost(kind).ok_or_else(|| PreconditionError::Unknown {
                kind: "unit type",
                name: kind.clone(),
            })?;
            on_board(*x, *y)?;
            if state.units.iter().any(|u| u.x == *x && u.y == *y) {
                return Err(PreconditionError::Occupied { x: *x, y: *y }.into());
            }
            spend(state, cost)?;
            state.units.push(Unit {
                kind: kind.clone(),
                x: *x,
                y: *y,
                health: 100,
                attack: unit_attack(kind),
            });
            Ok(Effect::new(format!("trained {} at ({},{})", kind, x, y)))
        }
        StrategyCommand::Collect { resource, amount } => {
            if !RESOURCES.contains(&resource.as_str()) {
                return Err(PreconditionError::Unknown {
                    kind: "resource",
                    name: resource.clone(),
                }
                .into());
            }
            let balance = state.resources.entry(resource.clone()).or_insert(0);
            *balance = balance.saturating_add(*amount);
            Ok(Effect::new(format!(
                "collected {} {} ({} {})",
                amount, resource, resource, balance
            )))
        }
        StrategyCommand::Execute => {
            let name = state.plan.as_ref().ok_or_else(no_plan)?.name.clone();
            for (resource, amount) in INCOME {
                let balance = state.resources.entry(resource.to_string()).or_insert(0);
                *balance = balance.saturating_add(*amount);
            }
            state.turn = state.turn.saturating_add(1);
            Ok(Effect::new(format!(
                "executed strategy {}: turn {}, {}",
                name,
                state.turn,
                balances(state)
            )))
        }
    }
}

fn no_plan() -> PreconditionError {
    PreconditionError::Invalid("no strategy defined".into())
}

fn on_board(x: i64, y: i64) -> Result<(), PreconditionError> {
    if (0..BOARD_WIDTH).contains(&x) && (0..BOARD_HEIGHT).contains(&y) {
        Ok(())
    } else {
        Err(PreconditionError::InvalidPosition {
            x: x as f64,
            y: y as f64,
        })
    }
}

/// Checks every cost first and only then deducts, so a shortfall in any
/// resource leaves all balances untouched.
fn spend(state: &mut StrategyState, cost: Cost) -> Result<(), PreconditionError> {
    for (resource, need) in cost {
        let have = state.resource(resource);
        if have < *need {
            return Err(PreconditionError::Insufficient {
                resource: resource.to_string(),
                need: *need,
                have,
            });
        }
    }
    for (resource, need) in cost {
        if let Some(balance) = state.resources.get_mut(*resource) {
            *balance = balance.saturating_sub(*need);
        }
    }
    Ok(())
}

fn balances(state: &StrategyState) -> String {
    RESOURCES
        .iter()
        .map(|r| format!("{} {}", r, state.resource(r)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn resources(gold: u64, wood: u64, food: u64) -> BTreeMap<String, u64> {
        [("gold", gold), ("wood", wood), ("food", food)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn build(kind: &str, x: i64, y: i64) -> StrategyCommand {
        StrategyCommand::Build {
            kind: kind.into(),
            x,
            y,
        }
    }

    #[test]
    fn test_build_farm_deducts_cost() {
        let mut state = StrategyState::default();
        let effect = apply(&mut state, &build("farm", 2, 3)).unwrap();
        assert_eq!(effect.description, "built farm at (2,3)");
        assert_eq!(state.resources, resources(70, 30, 30));
        assert_eq!(
            state.buildings,
            vec![Building {
                kind: "farm".into(),
                x: 2,
                y: 3
            }]
        );
    }

    #[test]
    fn test_insufficient_gold_leaves_balance() {
        let mut state = StrategyState {
            resources: resources(10, 50, 30),
            ..StrategyState::default()
        };
        let err = apply(&mut state, &build("farm", 2, 3)).unwrap_err();
        assert_eq!(err.to_string(), "insufficient resource: need 30 gold");
        assert_eq!(state.resources, resources(10, 50, 30));
        assert!(state.buildings.is_empty());
    }

    #[test]
    fn test_shortfall_in_second_resource_deducts_nothing() {
        let mut state = StrategyState {
            resources: resources(100, 5, 30),
            ..StrategyState::default()
        };
        let err = apply(&mut state, &build("farm", 0, 0)).unwrap_err();
        assert_eq!(err.to_string(), "insufficient resource: need 20 wood");
        assert_eq!(state.resource("gold"), 100);
    }

    #[test]
    fn test_unknown_building_and_bad_position() {
        let mut state = StrategyState::default();
        let err = apply(&mut state, &build("castle", 0, 0)).unwrap_err();
        assert_eq!(err.to_string(), "unknown building type: castle");
        let err = apply(&mut state, &build("farm", 12, 9)).unwrap_err();
        assert_eq!(err.to_string(), "invalid position: (12,9)");
        assert_eq!(state, StrategyState::default());
    }

    #[test]
    fn test_cell_cannot_be_built_twice() {
        let mut state = StrategyState::default();
        apply(&mut state, &build("farm", 2, 3)).unwrap();
        let err = apply(&mut state, &build("tower", 2, 3)).unwrap_err();
        assert_eq!(err.to_string(), "cell occupied: (2,3)");
    }

    #[test]
    fn test_collect_then_build_sees_new_balance() {
        let mut state = StrategyState {
            resources: resources(10, 50, 30),
            ..StrategyState::default()
        };
        let effect = apply(
            &mut state,
            &StrategyCommand::Collect {
                resource: "gold".into(),
                amount: 20,
            },
        )
        .unwrap();
        assert_eq!(effect.description, "collected 20 gold (gold 30)");
        apply(&mut state, &build("farm", 2, 3)).unwrap();
        assert_eq!(state.resource("gold"), 0);
    }

    #[test]
    fn test_execute_requires_plan() {
        let mut state = StrategyState::default();
        assert!(apply(&mut state, &StrategyCommand::Execute).is_err());
        apply(&mut state, &StrategyCommand::Define("expansion".into())).unwrap();
        let effect = apply(&mut state, &StrategyCommand::Execute).unwrap();
        assert_eq!(
            effect.description,
            "executed strategy expansion: turn 2, gold 120, wood 60, food 35"
        );
    }

    #[test]
    fn test_train_unit() {
        let mut state = StrategyState::default();
        let effect = apply(
            &mut state,
            &StrategyCommand::Train {
                kind: "soldier".into(),
                x: 1,
                y: 1,
            },
        )
        .unwrap();
        assert_eq!(effect.description, "trained soldier at (1,1)");
        assert_eq!(state.units[0].attack, 20);
        assert_eq!(state.resources, resources(75, 50, 20));
    }

    #[test]
    fn test_turn_counter_saturates() {
        let mut state = StrategyState {
            turn: u32::MAX,
            ..StrategyState::default()
        };
        apply(&mut state, &StrategyCommand::Define("expansion".into())).unwrap();
        apply(&mut state, &StrategyCommand::Execute).unwrap();
        assert_eq!(state.turn, u32::MAX);
        assert_eq!(state.resource("gold"), 120);
    }
}
