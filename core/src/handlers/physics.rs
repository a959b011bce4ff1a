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

//! Point-mass simulation in a 400x300 box.
//!
//! Bodies fall under gravity and bounce off the walls, ceiling and floor.
//! `y` grows downward.

use crate::command::PhysicsCommand;
use crate::effect::Effect;
use crate::error::{LineError, PreconditionError};
use crate::state::{Body, PhysicsState, WORLD_HEIGHT, WORLD_WIDTH};

const GRAVITY_SCALE: f64 = 0.02;
const FORCE_IMPULSE: f64 = 0.5;
const WALL_RESTITUTION: f64 = -0.8;
const FLOOR_RESTITUTION: f64 = -0.7;
const FLOOR_FRICTION: f64 = 0.9;
const MIN_RADIUS: f64 = 8.0;
const MAX_RADIUS: f64 = 20.0;

pub fn apply(state: &mut PhysicsState, command: &PhysicsCommand) -> Result<Effect, LineError> {
    match command {
        PhysicsCommand::SetGravity(g) => {
            if *g < 0.0 {
                return Err(
                    PreconditionError::Invalid(format!("gravity must not be negative: {}", g))
                        .into(),
                );
            }
            state.gravity = *g;
            Ok(Effect::new(format!("gravity set to {} m/s²", g)))
        }
        PhysicsCommand::Create { name, x, y, mass } => {
            if !(0.0..=WORLD_WIDTH).contains(x) || !(0.0..=WORLD_HEIGHT).contains(y) {
                return Err(PreconditionError::InvalidPosition { x: *x, y: *y }.into());
            }
            if *mass <= 0.0 {
                return Err(
                    PreconditionError::Invalid(format!("mass must be positive: {}", mass)).into(),
                );
            }
            if state.bodies.iter().any(|b| &b.name == name) {
                return Err(PreconditionError::Duplicate {
                    kind: "entity",
                    name: name.clone(),
                }
                .into());
            }
            state.bodies.push(Body {
                name: name.clone(),
                x: *x,
                y: *y,
                vx: 0.0,
                vy: 0.0,
                mass: *mass,
                radius: (mass * 8.0).clamp(MIN_RADIUS, MAX_RADIUS),
            });
            Ok(Effect::new(format!(
                "created {} at ({}, {}) mass {}",
                name, x, y, mass
            )))
        }
        PhysicsCommand::ApplyForce { magnitude, target } => {
            let body = state
                .bodies
                .iter_mut()
                .find(|b| &b.name == target)
                .ok_or_else(|| PreconditionError::Missing {
                    kind: "entity",
                    name: target.clone(),
                })?;
            let acceleration = magnitude / body.mass;
            body.vx += acceleration * FORCE_IMPULSE;
            Ok(Effect::new(format!(
                "applied force {} N to {} (vx = {})",
                magnitude, target, body.vx
            )))
        }
        PhysicsCommand::Start => {
            if state.running {
                return Err(PreconditionError::Invalid("simulation already running".into()).into());
            }
            state.running = true;
            Ok(Effect::new(format!(
                "simulation started with {} bodies",
                state.bodies.len()
            )))
        }
        PhysicsCommand::Stop => {
            if !state.running {
                return Err(PreconditionError::Invalid("simulation not running".into()).into());
            }
            state.running = false;
            Ok(Effect::new(format!("simulation stopped at frame {}", state.frame)))
        }
        PhysicsCommand::Step(frames) => {
            if !state.running {
                return Err(PreconditionError::Invalid("simulation not running".into()).into());
            }
            for body in &state.bodies {
                check_body(body)?;
            }
            for _ in 0..*frames {
                advance(state);
            }
            let positions: Vec<String> = state
                .bodies
                .iter()
                .map(|b| format!("{} at ({:.1}, {:.1})", b.name, b.x, b.y))
                .collect();
            let mut description = format!("advanced {} frames", frames);
            if !positions.is_empty() {
                description.push_str(": ");
                description.push_str(&positions.join(", "));
            }
            Ok(Effect::new(description))
        }
    }
}

/// Bodies restored from host state may carry values no command produces.
fn check_body(body: &Body) -> Result<(), PreconditionError> {
    let finite = [body.x, body.y, body.vx, body.vy, body.mass]
        .iter()
        .all(|v| v.is_finite());
    if !finite || !(body.radius > 0.0 && body.radius <= WORLD_HEIGHT / 2.0) {
        return Err(PreconditionError::Invalid(format!(
            "body {} is outside the simulation limits",
            body.name
        )));
    }
    Ok(())
}

/// One integration frame.
pub fn advance(state: &mut PhysicsState) {
    let g = state.gravity;
    for body in &mut state.bodies {
        body.vy += g * GRAVITY_SCALE;
        body.x += body.vx;
        body.y += body.vy;

        // f64::min/max drop a NaN operand, so the clamp bounds stay ordered
        let r = body.radius.min(WORLD_HEIGHT / 2.0).max(0.0);
        if body.x - r < 0.0 || body.x + r > WORLD_WIDTH {
            body.vx *= WALL_RESTITUTION;
            body.x = body.x.clamp(r, WORLD_WIDTH - r);
        }
        if body.y - r < 0.0 {
            body.vy *= WALL_RESTITUTION;
            body.y = r;
        }
        if body.y + r > WORLD_HEIGHT {
            body.vy *= FLOOR_RESTITUTION;
            body.y = WORLD_HEIGHT - r;
            body.vx *= FLOOR_FRICTION;
        }
    }
    state.frame = state.frame.saturating_add(1);
}
