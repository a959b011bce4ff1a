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

//! Classified commands.
//!
//! A [`Command`] is the typed form of one source line. Each scenario has its
//! own command enum so that handler dispatch is an exhaustive match.

use crate::scenario::ScenarioId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    /// Name of the grammar rule that matched; one per handler kind.
    pub rule: &'static str,
    /// Handler family the rule belongs to, e.g. `datastructure.stack`.
    pub family: &'static str,
    /// The trimmed source line.
    pub source_line: String,
}

impl Command {
    /// Stable identifier of the handler kind, e.g. `stack.push`.
    pub fn handler_id(&self) -> &'static str {
        self.rule
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    Programming(ProgrammingCommand),
    Algorithm(AlgorithmCommand),
    DataStructure(DataStructureCommand),
    Math(MathCommand),
    Physics(PhysicsCommand),
    Game(GameCommand),
    Hash(HashCommand),
    Strategy(StrategyCommand),
    AiChat(AiChatCommand),
    Colony(ColonyCommand),
}

impl CommandKind {
    pub fn scenario(&self) -> ScenarioId {
        match self {
            CommandKind::Programming(_) => ScenarioId::Programming,
            CommandKind::Algorithm(_) => ScenarioId::Algorithm,
            CommandKind::DataStructure(_) => ScenarioId::DataStructure,
            CommandKind::Math(_) => ScenarioId::Math,
            CommandKind::Physics(_) => ScenarioId::Physics,
            CommandKind::Game(_) => ScenarioId::Game,
            CommandKind::Hash(_) => ScenarioId::Hash,
            CommandKind::Strategy(_) => ScenarioId::Strategy,
            CommandKind::AiChat(_) => ScenarioId::AiChat,
            CommandKind::Colony(_) => ScenarioId::Colony,
        }
    }
}

// ─── Programming ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
}

impl Comparison {
    pub fn parse(op: &str) -> Option<Comparison> {
        match op {
            ">" => Some(Comparison::Gt),
            "<" => Some(Comparison::Lt),
            ">=" => Some(Comparison::Ge),
            "<=" => Some(Comparison::Le),
            "==" => Some(Comparison::Eq),
            "!=" => Some(Comparison::Ne),
            _ => None,
        }
    }

    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::Gt => lhs > rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Ge => lhs >= rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Gt => ">",
            Comparison::Lt => "<",
            Comparison::Ge => ">=",
            Comparison::Le => "<=",
            Comparison::Eq => "==",
            Comparison::Ne => "!=",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Augment {
    Add,
    Sub,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgrammingCommand {
    Print(String),
    PrintConcat { text: String, var: String },
    PrintVar(String),
    AssignInt { name: String, value: i64 },
    AssignText { name: String, value: String },
    Augment { name: String, op: Augment, amount: i64 },
    If { name: String, op: Comparison, rhs: i64 },
}

// ─── Algorithm ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    Bubble,
    Selection,
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortMethod::Bubble => "bubble",
            SortMethod::Selection => "selection",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmCommand {
    Declare { name: String, values: Vec<i64> },
    Sort { name: String, method: SortMethod },
    Search { name: String, target: i64 },
    Print { text: String, name: String },
}

// ─── Data structures ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DataStructureCommand {
    Push(String),
    Pop,
    Top,
    PrintTop { text: String },
    Enqueue(String),
    Dequeue,
    TreeInsert(i64),
    HeapInsert(i64),
    AddNode(String),
    AddEdge { from: String, to: String },
}

// ─── Math ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum MathCommand {
    SetRange { min: i64, max: i64 },
    Plot { expression: String },
    Circle { x: f64, y: f64, radius: f64 },
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    Point { x: f64, y: f64, label: Option<String> },
    Calculate { expression: String },
}

// ─── Physics ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsCommand {
    SetGravity(f64),
    Create { name: String, x: f64, y: f64, mass: f64 },
    ApplyForce { magnitude: f64, target: String },
    Start,
    Stop,
    Step(u32),
}

// ─── Game ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn parse(word: &str) -> Option<Direction> {
        match word {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Grid delta; `y` grows downward.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    CreatePlayer { x: i64, y: i64 },
    Move(Direction),
    SpawnCoin { x: i64, y: i64 },
}

// ─── Hash ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HashCommand {
    Define { param: String },
    SetInput { name: String, value: String },
    InitSum,
    Loop { var: String, over: String },
    Accumulate { var: String },
    Return { modulus: i64 },
    HashOf(String),
}

// ─── Strategy ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum StrategyCommand {
    Define(String),
    SetGoal(String),
    Build { kind: String, x: i64, y: i64 },
    Train { kind: String, x: i64, y: i64 },
    Collect { resource: String, amount: u64 },
    Execute,
}

// ─── AI chat ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum AiChatCommand {
    SetMode(String),
    Ask(String),
    Refine,
    Analyze,
}

// ─── Colony ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ColonyCommand {
    SetResource { resource: String, amount: u64 },
    /// Subtraction floors the balance at zero.
    AdjustResource { resource: String, op: Augment, amount: u64 },
    MoveColonist { x: i64, y: i64 },
    Heal,
    Revive,
    Build { kind: String, x: i64, y: i64 },
    Demolish { x: i64, y: i64 },
    Auto(bool),
    Pause,
    Resume,
    SetWeather(String),
    SetTemperature(i64),
    Disaster(String),
}
