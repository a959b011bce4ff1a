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

//! Effect handlers.
//!
//! A handler validates its command against the scenario state and either
//! returns an [`Effect`] having applied its mutation, or returns an error
//! having changed nothing.

pub mod aichat;
pub mod algorithm;
pub mod colony;
pub mod datastructure;
pub mod game;
pub mod hash;
pub mod math;
pub mod physics;
pub mod programming;
pub mod strategy;

use crate::command::{Command, CommandKind};
use crate::effect::Effect;
use crate::error::{LineError, PreconditionError};
use crate::state::ScenarioState;

/// Routes a classified command to its scenario's handler.
pub fn apply(state: &mut ScenarioState, command: &Command) -> Result<Effect, LineError> {
    match (state, &command.kind) {
        (ScenarioState::Programming(s), CommandKind::Programming(c)) => programming::apply(s, c),
        (ScenarioState::Algorithm(s), CommandKind::Algorithm(c)) => algorithm::apply(s, c),
        (ScenarioState::DataStructure(s), CommandKind::DataStructure(c)) => {
            datastructure::apply(s, c)
        }
        (ScenarioState::Math(s), CommandKind::Math(c)) => math::apply(s, c),
        (ScenarioState::Physics(s), CommandKind::Physics(c)) => physics::apply(s, c),
        (ScenarioState::Game(s), CommandKind::Game(c)) => game::apply(s, c),
        (ScenarioState::Hash(s), CommandKind::Hash(c)) => hash::apply(s, c),
        (ScenarioState::Strategy(s), CommandKind::Strategy(c)) => strategy::apply(s, c),
        (ScenarioState::AiChat(s), CommandKind::AiChat(c)) => aichat::apply(s, c),
        (ScenarioState::Colony(s), CommandKind::Colony(c)) => colony::apply(s, c),
        (state, kind) => Err(PreconditionError::Invalid(format!(
            "{} command cannot run against {} state",
            kind.scenario(),
            state.scenario()
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::DataStructureCommand;
    use crate::config::Config;
    use crate::scenario::ScenarioId;

    #[test]
    fn test_mismatched_state_is_rejected() {
        let mut state = ScenarioState::new(ScenarioId::Game, &Config::default());
        let before = state.clone();
        let command = Command {
            kind: CommandKind::DataStructure(DataStructureCommand::Pop),
            rule: "stack.pop",
            family: "datastructure.stack",
            source_line: "stack.pop()".into(),
        };
        let err = apply(&mut state, &command).unwrap_err();
        assert_eq!(
            err.to_string(),
            "datastructure command cannot run against game state"
        );
        assert_eq!(state, before);
    }
}
