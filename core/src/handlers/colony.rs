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

//! Colony simulation on a 20x20 map.
//!
//! Resource arithmetic never goes below zero: `wood -= 500` leaves `wood` at
//! 0. Building is different, a structure whose cost cannot be paid in full is
//! refused and nothing is deducted.

use crate::command::{Augment, ColonyCommand};
use crate::effect::Effect;
use crate::error::{LineError, PreconditionError};
use crate::state::{Colonist, ColonyState, Structure, Weather, MAP_SIZE};

type Cost = &'static [(&'static str, u64)];

pub const RESOURCES: [&str; 4] = ["wood", "stone", "food", "metal"];

const WALL: Cost = &[("stone", 5)];
const HOUSE: Cost = &[("wood", 30), ("stone", 10)];
const BED: Cost = &[("wood", 10)];

const EARTHQUAKE_DAMAGE: u32 = 50;
const EARTHQUAKE_INJURY: u32 = 3;

/// Cost and hit points of a structure type.
pub fn structure_kind(kind: &str) -> Option<(Cost, u32)> {
    match kind {
        "wall" => Some((WALL, 100)),
        "house" => Some((HOUSE, 200)),
        "bed" => Some((BED, 50)),
        _ => None,
    }
}

pub fn apply(state: &mut ColonyState, command: &ColonyCommand) -> Result<Effect, LineError> {
    match command {
        ColonyCommand::SetResource { resource, amount } => {
            known_resource(resource)?;
            state.resources.insert(resource.clone(), *amount);
            Ok(Effect::new(format!("{} = {}", resource, amount)))
        }
        ColonyCommand::AdjustResource {
            resource,
            op,
            amount,
        } => {
            known_resource(resource)?;
            let balance = state.resources.entry(resource.clone()).or_insert(0);
            let sign = match op {
                Augment::Add => {
                    *balance = balance.saturating_add(*amount);
                    '+'
                }
                Augment::Sub => {
                    *balance = balance.saturating_sub(*amount);
                    '-'
                }
            };
            Ok(Effect::new(format!(
                "{} {}= {} → {}",
                resource, sign, amount, balance
            )))
        }
        ColonyCommand::MoveColonist { x, y } => {
            on_map(*x, *y)?;
            let colonist = selected(state)?;
            standing(colonist)?;
            colonist.x = *x;
            colonist.y = *y;
            Ok(Effect::new(format!("{} moved to ({},{})", colonist.name, x, y)))
        }
        ColonyCommand::Heal => {
            let colonist = selected(state)?;
            standing(colonist)?;
            colonist.hp = colonist.hp.saturating_add(1).min(colonist.max_hp);
            Ok(Effect::new(format!(
                "{} healed to {}/{} hp",
                colonist.name, colonist.hp, colonist.max_hp
            )))
        }
        ColonyCommand::Revive => {
            let colonist = state
                .colonists
                .iter_mut()
                .find(|c| c.downed)
                .ok_or_else(|| PreconditionError::Invalid("no downed colonist".into()))?;
            colonist.downed = false;
            colonist.hp = 1;
            Ok(Effect::new(format!("{} revived with 1 hp", colonist.name)))
        }
        ColonyCommand::Build { kind, x, y } => {
            let (cost, hp) = structure_kind(kind).ok_or_else(|| PreconditionError::Unknown {
                kind: "structure type",
                name: kind.clone(),
            })?;
            on_map(*x, *y)?;
            if state.structures.iter().any(|s| s.x == *x && s.y == *y) {
                return Err(PreconditionError::Occupied { x: *x, y: *y }.into());
            }
            spend(state, cost)?;
            state.structures.push(Structure {
                kind: kind.clone(),
                x: *x,
                y: *y,
                hp,
                max_hp: hp,
            });
            Ok(Effect::new(format!("built {} at ({},{})", kind, x, y)))
        }
        ColonyCommand::Demolish { x, y } => {
            let index = state
                .structures
                .iter()
                .position(|s| s.x == *x && s.y == *y)
                .ok_or_else(|| PreconditionError::Missing {
                    kind: "structure",
                    name: format!("({},{})", x, y),
                })?;
            let structure = state.structures.remove(index);
            let mut refunds = Vec::new();
            if let Some((cost, _)) = structure_kind(&structure.kind) {
                // half of every cost above one, rounded up
                for (resource, paid) in cost.iter().filter(|(_, paid)| *paid > 1) {
                    let back = (paid + 1) / 2;
                    let balance = state.resources.entry(resource.to_string()).or_insert(0);
                    *balance = balance.saturating_add(back);
                    refunds.push(format!("{} {}", resource, back));
                }
            }
            let mut description = format!("demolished {} at ({},{})", structure.kind, x, y);
            if !refunds.is_empty() {
                description.push_str(", refunded ");
                description.push_str(&refunds.join(", "));
            }
            Ok(Effect::new(description))
        }
        ColonyCommand::Auto(on) => {
            state.auto_mode = *on;
            Ok(Effect::new(format!(
                "auto mode {}",
                if *on { "on" } else { "off" }
            )))
        }
        ColonyCommand::Pause => {
            state.paused = true;
            Ok(Effect::new("colony paused"))
        }
        ColonyCommand::Resume => {
            state.paused = false;
            Ok(Effect::new("colony resumed"))
        }
        ColonyCommand::SetWeather(name) => {
            let weather = Weather::parse(name).ok_or_else(|| PreconditionError::Unknown {
                kind: "weather",
                name: name.clone(),
            })?;
            state.weather = weather;
            Ok(Effect::new(format!("weather changed to {}", weather)))
        }
        ColonyCommand::SetTemperature(degrees) => {
            state.temperature = *degrees;
            Ok(Effect::new(format!("temperature set to {}°C", degrees)))
        }
        ColonyCommand::Disaster(name) => match name.as_str() {
            "flood" | "洪水" => {
                let food = state.resources.entry("food".to_string()).or_insert(0);
                *food /= 2;
                Ok(Effect::new(format!("flood struck: food {}", food)))
            }
            "earthquake" | "地震" => Ok(Effect::new(earthquake(state))),
            _ => Err(PreconditionError::Unknown {
                kind: "disaster",
                name: name.clone(),
            }
            .into()),
        },
    }
}

fn earthquake(state: &mut ColonyState) -> String {
    let before = state.structures.len();
    for structure in &mut state.structures {
        structure.hp = structure.hp.saturating_sub(EARTHQUAKE_DAMAGE);
    }
    state.structures.retain(|s| s.hp > 0);
    let destroyed = before - state.structures.len();

    let mut downed = 0;
    for colonist in state.colonists.iter_mut().filter(|c| !c.downed) {
        colonist.hp = colonist.hp.saturating_sub(EARTHQUAKE_INJURY);
        if colonist.hp == 0 {
            colonist.downed = true;
            downed += 1;
        }
    }
    format!(
        "earthquake struck: {} of {} structures destroyed, {} colonists downed",
        destroyed, before, downed
    )
}

fn known_resource(name: &str) -> Result<(), PreconditionError> {
    if RESOURCES.contains(&name) {
        Ok(())
    } else {
        Err(PreconditionError::Unknown {
            kind: "resource",
            name: name.to_string(),
        })
    }
}

fn on_map(x: i64, y: i64) -> Result<(), PreconditionError> {
    if (0..MAP_SIZE).contains(&x) && (0..MAP_SIZE).contains(&y) {
        Ok(())
    } else {
        Err(PreconditionError::InvalidPosition {
            x: x as f64,
            y: y as f64,
        })
    }
}

fn selected(state: &mut ColonyState) -> Result<&mut Colonist, PreconditionError> {
    state
        .selected
        .and_then(|index| state.colonists.get_mut(index))
        .ok_or_else(|| PreconditionError::Invalid("no colonist selected".into()))
}

fn standing(colonist: &Colonist) -> Result<(), PreconditionError> {
    if colonist.downed {
        Err(PreconditionError::Invalid(format!(
            "{} is downed",
            colonist.name
        )))
    } else {
        Ok(())
    }
}

/// Checks every cost first and only then deducts.
fn spend(state: &mut ColonyState, cost: Cost) -> Result<(), PreconditionError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn adjust(resource: &str, op: Augment, amount: u64) -> ColonyCommand {
        ColonyCommand::AdjustResource {
            resource: resource.into(),
            op,
            amount,
        }
    }

    fn build(kind: &str, x: i64, y: i64) -> ColonyCommand {
        ColonyCommand::Build {
            kind: kind.into(),
            x,
            y,
        }
    }

    #[test]
    fn test_subtraction_floors_at_zero() {
        let mut state = ColonyState::default();
        let effect = apply(&mut state, &adjust("wood", Augment::Sub, 150)).unwrap();
        assert_eq!(effect.description, "wood -= 150 → 0");
        assert_eq!(state.resource("wood"), 0);

        let effect = apply(&mut state, &adjust("wood", Augment::Add, 50)).unwrap();
        assert_eq!(effect.description, "wood += 50 → 50");
    }

    #[test]
    fn test_set_resource() {
        let mut state = ColonyState::default();
        let effect = apply(
            &mut state,
            &ColonyCommand::SetResource {
                resource: "metal".into(),
                amount: 7,
            },
        )
        .unwrap();
        assert_eq!(effect.description, "metal = 7");
        assert_eq!(state.resource("metal"), 7);
        let err = apply(
            &mut state,
            &ColonyCommand::SetResource {
                resource: "gold".into(),
                amount: 7,
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "unknown resource: gold");
    }

    #[test]
    fn test_build_checks_every_cost_before_deducting() {
        let mut state = ColonyState::default();
        state.resources.insert("stone".into(), 4);
        let err = apply(&mut state, &build("house", 4, 4)).unwrap_err();
        assert_eq!(err.to_string(), "insufficient resource: need 10 stone");
        assert_eq!(state.resource("wood"), 100);
        assert!(state.structures.is_empty());
    }

    #[test]
    fn test_build_and_demolish_refunds_half() {
        let mut state = ColonyState::default();
        let effect = apply(&mut state, &build("house", 4, 4)).unwrap();
        assert_eq!(effect.description, "built house at (4,4)");
        assert_eq!(state.resource("wood"), 70);
        assert_eq!(state.resource("stone"), 40);

        let effect = apply(&mut state, &ColonyCommand::Demolish { x: 4, y: 4 }).unwrap();
        assert_eq!(
            effect.description,
            "demolished house at (4,4), refunded wood 15, stone 5"
        );
        assert_eq!(state.resource("wood"), 85);
        assert_eq!(state.resource("stone"), 45);
        assert!(state.structures.is_empty());

        let err = apply(&mut state, &ColonyCommand::Demolish { x: 4, y: 4 }).unwrap_err();
        assert_eq!(err.to_string(), "structure not found: (4,4)");
    }

    #[test]
    fn test_wall_refund_rounds_up() {
        let mut state = ColonyState::default();
        apply(&mut state, &build("wall", 0, 0)).unwrap();
        let effect = apply(&mut state, &ColonyCommand::Demolish { x: 0, y: 0 }).unwrap();
        assert_eq!(effect.description, "demolished wall at (0,0), refunded stone 3");
        assert_eq!(state.resource("stone"), 48);
    }

    #[test]
    fn test_build_rejects_bad_type_and_position() {
        let mut state = ColonyState::default();
        let err = apply(&mut state, &build("tower", 1, 1)).unwrap_err();
        assert_eq!(err.to_string(), "unknown structure type: tower");
        let err = apply(&mut state, &build("bed", 20, 1)).unwrap_err();
        assert_eq!(err.to_string(), "invalid position: (20,1)");
        apply(&mut state, &build("bed", 1, 1)).unwrap();
        let err = apply(&mut state, &build("wall", 1, 1)).unwrap_err();
        assert_eq!(err.to_string(), "cell occupied: (1,1)");
    }

    #[test]
    fn test_move_and_heal_selected_colonist() {
        let mut state = ColonyState::default();
        let effect = apply(&mut state, &ColonyCommand::MoveColonist { x: 5, y: 3 }).unwrap();
        assert_eq!(effect.description, "Ada moved to (5,3)");
        let err = apply(&mut state, &ColonyCommand::MoveColonist { x: -1, y: 3 }).unwrap_err();
        assert_eq!(err.to_string(), "invalid position: (-1,3)");
        assert_eq!((state.colonists[0].x, state.colonists[0].y), (5, 3));

        state.colonists[0].hp = 4;
        let effect = apply(&mut state, &ColonyCommand::Heal).unwrap();
        assert_eq!(effect.description, "Ada healed to 5/10 hp");
    }

    #[test]
    fn test_no_selection() {
        let mut state = ColonyState {
            selected: None,
            ..ColonyState::default()
        };
        let err = apply(&mut state, &ColonyCommand::Heal).unwrap_err();
        assert_eq!(err.to_string(), "no colonist selected");
        state.selected = Some(9);
        assert!(apply(&mut state, &ColonyCommand::MoveColonist { x: 1, y: 1 }).is_err());
    }

    #[test]
    fn test_revive_downed_colonist() {
        let mut state = ColonyState::default();
        let effect = apply(&mut state, &ColonyCommand::Revive).unwrap();
        assert_eq!(effect.description, "Bo revived with 1 hp");
        assert!(!state.colonists[1].downed);
        let err = apply(&mut state, &ColonyCommand::Revive).unwrap_err();
        assert_eq!(err.to_string(), "no downed colonist");
    }

    #[test]
    fn test_downed_colonist_cannot_move() {
        let mut state = ColonyState {
            selected: Some(1),
            ..ColonyState::default()
        };
        let err = apply(&mut state, &ColonyCommand::MoveColonist { x: 1, y: 1 }).unwrap_err();
        assert_eq!(err.to_string(), "Bo is downed");
    }

    #[test]
    fn test_controls_and_environment() {
        let mut state = ColonyState::default();
        apply(&mut state, &ColonyCommand::Auto(true)).unwrap();
        apply(&mut state, &ColonyCommand::Pause).unwrap();
        assert!(state.auto_mode && state.paused);
        apply(&mut state, &ColonyCommand::Resume).unwrap();
        assert!(!state.paused);

        let effect = apply(&mut state, &ColonyCommand::SetWeather("雨天".into())).unwrap();
        assert_eq!(effect.description, "weather changed to rainy");
        let err = apply(&mut state, &ColonyCommand::SetWeather("foggy".into())).unwrap_err();
        assert_eq!(err.to_string(), "unknown weather: foggy");
        assert_eq!(state.weather, Weather::Rainy);

        let effect = apply(&mut state, &ColonyCommand::SetTemperature(25)).unwrap();
        assert_eq!(effect.description, "temperature set to 25°C");
    }

    #[test]
    fn test_disasters() {
        let mut state = ColonyState::default();
        let effect = apply(&mut state, &ColonyCommand::Disaster("flood".into())).unwrap();
        assert_eq!(effect.description, "flood struck: food 40");

        apply(&mut state, &build("bed", 1, 1)).unwrap();
        apply(&mut state, &build("house", 2, 2)).unwrap();
        state.colonists[0].hp = 2;
        let effect = apply(&mut state, &ColonyCommand::Disaster("地震".into())).unwrap();
        assert_eq!(
            effect.description,
            "earthquake struck: 1 of 2 structures destroyed, 1 colonists downed"
        );
        assert_eq!(state.structures[0].hp, 150);
        assert!(state.colonists[0].downed);

        let err = apply(&mut state, &ColonyCommand::Disaster("meteor".into())).unwrap_err();
        assert_eq!(err.to_string(), "unknown disaster: meteor");
    }
}
