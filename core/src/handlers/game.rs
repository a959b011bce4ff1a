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

use crate::command::{Direction, GameCommand};
use crate::effect::{Effect, Step};
use crate::error::{LineError, PreconditionError};
use crate::state::{GameState, Position, COIN_VALUE, GRID_SIZE};

pub fn apply(state: &mut GameState, command: &GameCommand) -> Result<Effect, LineError> {
    match command {
        GameCommand::CreatePlayer { x, y } => {
            let at = on_grid(*x, *y)?;
            if state.player.is_some() {
                return Err(PreconditionError::Duplicate {
                    kind: "entity",
                    name: "player".into(),
                }
                .into());
            }
            state.player = Some(at);
            let mut effect = Effect::new(format!("player created at ({}, {})", x, y));
            collect(state, at, &mut effect);
            Ok(effect)
        }
        GameCommand::Move(direction) => {
            let from = state.player.ok_or_else(|| PreconditionError::Missing {
                kind: "entity",
                name: "player".into(),
            })?;
            let to = step(from, *direction);
            state.player = Some(to);
            let mut effect = if to == from {
                Effect::new(format!(
                    "player blocked moving {} at ({}, {})",
                    direction, to.x, to.y
                ))
            } else {
                Effect::new(format!("player moved {} to ({}, {})", direction, to.x, to.y))
            };
            effect.steps.push(Step::Move { x: to.x, y: to.y });
            collect(state, to, &mut effect);
            Ok(effect)
        }
        GameCommand::SpawnCoin { x, y } => {
            let at = on_grid(*x, *y)?;
            if state.coins.contains(&at) {
                return Err(PreconditionError::Occupied { x: *x, y: *y }.into());
            }
            state.coins.push(at);
            Ok(Effect::new(format!("coin spawned at ({}, {})", x, y)))
        }
    }
}

fn on_grid(x: i64, y: i64) -> Result<Position, PreconditionError> {
    if (0..GRID_SIZE).contains(&x) && (0..GRID_SIZE).contains(&y) {
        Ok(Position { x, y })
    } else {
        Err(PreconditionError::InvalidPosition {
            x: x as f64,
            y: y as f64,
        })
    }
}

/// Moves one cell, clamped to the grid.
fn step(from: Position, direction: Direction) -> Position {
    let (dx, dy) = direction.delta();
    Position {
        x: from.x.saturating_add(dx).clamp(0, GRID_SIZE - 1),
        y: from.y.saturating_add(dy).clamp(0, GRID_SIZE - 1),
    }
}

fn collect(state: &mut GameState, at: Position, effect: &mut Effect) {
    let Some(index) = state.coins.iter().position(|c| *c == at) else {
        return;
    };
    state.coins.remove(index);
    state.score = state.score.saturating_add(COIN_VALUE);
    effect.steps.push(Step::Collect {
        x: at.x,
        y: at.y,
        score: state.score,
    });
    effect
        .description
        .push_str(&format!(", collected coin (score {})", state.score));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_onto_coin() {
        let mut state = GameState::default();
        apply(&mut state, &GameCommand::CreatePlayer { x: 0, y: 0 }).unwrap();
        apply(&mut state, &GameCommand::Move(Direction::Right)).unwrap();
        apply(&mut state, &GameCommand::Move(Direction::Right)).unwrap();
        let effect = apply(&mut state, &GameCommand::Move(Direction::Down)).unwrap();
        assert_eq!(
            effect.description,
            "player moved down to (2, 1), collected coin (score 10)"
        );
        assert_eq!(state.score, 10);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_move_is_clamped() {
        let mut state = GameState::default();
        apply(&mut state, &GameCommand::CreatePlayer { x: 0, y: 0 }).unwrap();
        let effect = apply(&mut state, &GameCommand::Move(Direction::Left)).unwrap();
        assert_eq!(effect.description, "player blocked moving left at (0, 0)");
        assert_eq!(state.player, Some(Position { x: 0, y: 0 }));
    }

    #[test]
    fn test_move_without_player() {
        let mut state = GameState::default();
        let err = apply(&mut state, &GameCommand::Move(Direction::Up)).unwrap_err();
        assert_eq!(err.to_string(), "entity not found: player");
    }

    #[test]
    fn test_create_off_grid() {
        let mut state = GameState::default();
        let err = apply(&mut state, &GameCommand::CreatePlayer { x: 12, y: 9 }).unwrap_err();
        assert_eq!(err.to_string(), "invalid position: (12,9)");
        assert_eq!(state.player, None);
    }

    #[test]
    fn test_move_from_far_off_host_position() {
        let mut state = GameState {
            player: Some(Position { x: i64::MAX, y: 0 }),
            ..GameState::default()
        };
        apply(&mut state, &GameCommand::Move(Direction::Right)).unwrap();
        assert_eq!(state.player, Some(Position { x: 7, y: 0 }));
    }
}
