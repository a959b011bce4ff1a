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

use crate::command::DataStructureCommand;
use crate::effect::{Effect, Step};
use crate::error::{LineError, PreconditionError};
use crate::state::{tree_insert, DataStructureState};

pub fn apply(
    state: &mut DataStructureState,
    command: &DataStructureCommand,
) -> Result<Effect, LineError> {
    match command {
        DataStructureCommand::Push(value) => {
            state.stack.push(value.clone());
            Ok(Effect::new(format!("stack push: {}", value)))
        }
        DataStructureCommand::Pop => {
            let value = state.stack.pop().ok_or(PreconditionError::Empty("stack"))?;
            Ok(Effect::new(format!("stack pop: {}", value)))
        }
        DataStructureCommand::Top => {
            let value = state.stack.last().ok_or(PreconditionError::Empty("stack"))?;
            Ok(Effect::new(format!("stack top: {}", value)))
        }
        DataStructureCommand::PrintTop { text } => {
            let value = state.stack.last().ok_or(PreconditionError::Empty("stack"))?;
            let line = format!("{}{}", text, value);
            let effect = Effect::new(format!("output: {}", line));
            state.output.push(line);
            Ok(effect)
        }
        DataStructureCommand::Enqueue(value) => {
            state.queue.push_back(value.clone());
            Ok(Effect::new(format!("queue enqueue: {}", value)))
        }
        DataStructureCommand::Dequeue => {
            let value = state
                .queue
                .pop_front()
                .ok_or(PreconditionError::Empty("queue"))?;
            Ok(Effect::new(format!("queue dequeue: {}", value)))
        }
        DataStructureCommand::TreeInsert(value) => {
            let path = tree_insert(&mut state.tree, *value);
            let depth = path.len();
            let steps = path.into_iter().map(|value| Step::Visit { value }).collect();
            Ok(Effect::new(format!("tree insert: {} at depth {}", value, depth)).with_steps(steps))
        }
        DataStructureCommand::HeapInsert(value) => {
            let steps = heap_push(&mut state.heap, *value);
            Ok(Effect::new(format!("heap insert: {} (heap: {:?})", value, state.heap)).with_steps(steps))
        }
        DataStructureCommand::AddNode(name) => {
            if state.graph.nodes.contains(name) {
                return Err(PreconditionError::Duplicate {
                    kind: "node",
                    name: name.clone(),
                }
                .into());
            }
            state.graph.nodes.push(name.clone());
            Ok(Effect::new(format!("graph node: {}", name)))
        }
        DataStructureCommand::AddEdge { from, to } => {
            for endpoint in [from, to] {
                if !state.graph.nodes.contains(endpoint) {
                    return Err(PreconditionError::Missing {
                        kind: "node",
                        name: endpoint.clone(),
                    }
                    .into());
                }
            }
            state.graph.edges.push((from.clone(), to.clone()));
            Ok(Effect::new(format!("graph edge: {} -> {}", from, to)))
        }
    }
}

/// Appends to a max-heap and sifts the new value up.
fn heap_push(heap: &mut Vec<i64>, value: i64) -> Vec<Step> {
    let mut steps = Vec::new();
    heap.push(value);
    let mut child = heap.len() - 1;
    while child > 0 {
        let parent = (child - 1) / 2;
        if heap[parent] >= heap[child] {
            break;
        }
        heap.swap(parent, child);
        steps.push(Step::HeapSwap { child, parent });
        child = parent;
    }
    steps
}
