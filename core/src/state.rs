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

//! Per-scenario session state.
//!
//! One state value exists per session, created from defaults when the
//! session opens and mutated only by that scenario's handlers. Every state
//! type is plain data so the host can hold it between calls.

use crate::config::Config;
use crate::scenario::ScenarioId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "lowercase")]
pub enum ScenarioState {
    Programming(ProgrammingState),
    Algorithm(AlgorithmState),
    DataStructure(DataStructureState),
    Math(MathState),
    Physics(PhysicsState),
    Game(GameState),
    Hash(HashState),
    Strategy(StrategyState),
    AiChat(AiChatState),
    Colony(ColonyState),
}

impl ScenarioState {
    pub fn new(scenario: ScenarioId, config: &Config) -> Self {
        match scenario {
            ScenarioId::Programming => ScenarioState::Programming(ProgrammingState::default()),
            ScenarioId::Algorithm => ScenarioState::Algorithm(AlgorithmState::default()),
            ScenarioId::DataStructure => {
                ScenarioState::DataStructure(DataStructureState::default())
            }
            ScenarioId::Math => ScenarioState::Math(MathState::default()),
            ScenarioId::Physics => ScenarioState::Physics(PhysicsState::default()),
            ScenarioId::Game => ScenarioState::Game(GameState::default()),
            ScenarioId::Hash => ScenarioState::Hash(HashState::new(config.hash_modulus)),
            ScenarioId::Strategy => ScenarioState::Strategy(StrategyState::default()),
            ScenarioId::AiChat => ScenarioState::AiChat(AiChatState::new(config.ai_seed)),
            ScenarioId::Colony => ScenarioState::Colony(ColonyState::default()),
        }
    }

    pub fn scenario(&self) -> ScenarioId {
        match self {
            ScenarioState::Programming(_) => ScenarioId::Programming,
            ScenarioState::Algorithm(_) => ScenarioId::Algorithm,
            ScenarioState::DataStructure(_) => ScenarioId::DataStructure,
            ScenarioState::Math(_) => ScenarioId::Math,
            ScenarioState::Physics(_) => ScenarioId::Physics,
            ScenarioState::Game(_) => ScenarioId::Game,
            ScenarioState::Hash(_) => ScenarioId::Hash,
            ScenarioState::Strategy(_) => ScenarioId::Strategy,
            ScenarioState::AiChat(_) => ScenarioId::AiChat,
            ScenarioState::Colony(_) => ScenarioId::Colony,
        }
    }
}

// ─── Programming ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgrammingState {
    pub variables: BTreeMap<String, Value>,
    pub output: Vec<String>,
    pub last_condition: Option<bool>,
}

// ─── Algorithm ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmState {
    pub arrays: BTreeMap<String, Vec<i64>>,
    pub output: Vec<String>,
}

// ─── Data structures ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(value: i64) -> Self {
        TreeNode {
            value,
            left: None,
            right: None,
        }
    }

    pub fn in_order(&self) -> Vec<i64> {
        let mut out = Vec::new();
        self.walk(&mut out);
        out
    }

    fn walk(&self, out: &mut Vec<i64>) {
        if let Some(left) = &self.left {
            left.walk(out);
        }
        out.push(self.value);
        if let Some(right) = &self.right {
            right.walk(out);
        }
    }
}

/// Inserts `value` below `root`; smaller values go left, everything else
/// right. Returns the values visited on the way down.
pub fn tree_insert(root: &mut Option<Box<TreeNode>>, value: i64) -> Vec<i64> {
    let mut path = Vec::new();
    insert_below(root, value, &mut path);
    path
}

fn insert_below(slot: &mut Option<Box<TreeNode>>, value: i64, path: &mut Vec<i64>) {
    match slot {
        Some(node) => {
            path.push(node.value);
            if value < node.value {
                insert_below(&mut node.left, value, path);
            } else {
                insert_below(&mut node.right, value, path);
            }
        }
        None => *slot = Some(Box::new(TreeNode::leaf(value))),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataStructureState {
    pub stack: Vec<String>,
    pub queue: VecDeque<String>,
    pub tree: Option<Box<TreeNode>>,
    /// Max-heap in array layout.
    pub heap: Vec<i64>,
    pub graph: Graph,
    pub output: Vec<String>,
}

// ─── Math ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub expression: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    Circle { x: f64, y: f64, radius: f64 },
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathState {
    pub range: Range,
    pub plots: Vec<Plot>,
    pub shapes: Vec<Shape>,
    pub points: Vec<LabeledPoint>,
    pub last_result: Option<f64>,
}

impl Default for MathState {
    fn default() -> Self {
        MathState {
            range: Range { min: -10, max: 10 },
            plots: Vec::new(),
            shapes: Vec::new(),
            points: Vec::new(),
            last_result: None,
        }
    }
}

// ─── Physics ─────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f64 = 400.0;
pub const WORLD_HEIGHT: f64 = 300.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub mass: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsState {
    pub gravity: f64,
    pub bodies: Vec<Body>,
    pub running: bool,
    pub frame: u64,
}

impl Default for PhysicsState {
    fn default() -> Self {
        PhysicsState {
            gravity: 9.8,
            bodies: Vec::new(),
            running: false,
            frame: 0,
        }
    }
}

// ─── Game ────────────────────────────────────────────────────────────────────

pub const GRID_SIZE: i64 = 8;
pub const COIN_VALUE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Option<Position>,
    pub coins: Vec<Position>,
    pub score: u64,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            player: None,
            coins: vec![Position { x: 2, y: 1 }],
            score: 0,
        }
    }
}

// ─── Hash ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashState {
    /// Parameter name of the defined hash function.
    pub param: Option<String>,
    /// Text bound to the parameter.
    pub input: String,
    pub loop_var: Option<String>,
    pub sum: Option<u64>,
    pub modulus: u32,
    pub result: Option<u64>,
}

impl HashState {
    pub fn new(modulus: u32) -> Self {
        HashState {
            param: None,
            input: "apple".to_string(),
            loop_var: None,
            sum: None,
            modulus,
            result: None,
        }
    }
}

// ─── Strategy ────────────────────────────────────────────────────────────────

pub const BOARD_WIDTH: i64 = 10;
pub const BOARD_HEIGHT: i64 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub kind: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub kind: String,
    pub x: i64,
    pub y: i64,
    pub health: u32,
    pub attack: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub goal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyState {
    pub resources: BTreeMap<String, u64>,
    pub buildings: Vec<Building>,
    pub units: Vec<Unit>,
    pub plan: Option<Plan>,
    pub turn: u32,
}

impl Default for StrategyState {
    fn default() -> Self {
        let resources = [("gold", 100), ("wood", 50), ("food", 30)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        StrategyState {
            resources,
            buildings: Vec::new(),
            units: Vec::new(),
            plan: None,
            turn: 1,
        }
    }
}

impl StrategyState {
    pub fn resource(&self, name: &str) -> u64 {
        self.resources.get(name).copied().unwrap_or(0)
    }
}

// ─── Colony ──────────────────────────────────────────────────────────────────

pub const MAP_SIZE: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colonist {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub hp: u32,
    pub max_hp: u32,
    pub downed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub kind: String,
    pub x: i64,
    pub y: i64,
    pub hp: u32,
    pub max_hp: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Rainy,
    Stormy,
}

impl Weather {
    /// Accepts the English names and the Chinese labels of the colony UI.
    pub fn parse(name: &str) -> Option<Weather> {
        match name.trim() {
            "sunny" | "晴天" => Some(Weather::Sunny),
            "rainy" | "雨天" => Some(Weather::Rainy),
            "stormy" | "暴风雨" => Some(Weather::Stormy),
            _ => None,
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Weather::Sunny => "sunny",
            Weather::Rainy => "rainy",
            Weather::Stormy => "stormy",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColonyState {
    pub resources: BTreeMap<String, u64>,
    pub colonists: Vec<Colonist>,
    /// Index into `colonists` of the colonist that `move` and `heal` act on.
    pub selected: Option<usize>,
    pub structures: Vec<Structure>,
    pub auto_mode: bool,
    pub paused: bool,
    pub weather: Weather,
    /// Degrees Celsius.
    pub temperature: i64,
}

impl Default for ColonyState {
    fn default() -> Self {
        let resources = [("wood", 100), ("stone", 50), ("food", 80), ("metal", 20)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let colonist = |name: &str, x, hp, downed| Colonist {
            name: name.to_string(),
            x,
            y: 10,
            hp,
            max_hp: 10,
            downed,
        };
        ColonyState {
            resources,
            colonists: vec![colonist("Ada", 10, 10, false), colonist("Bo", 12, 0, true)],
            selected: Some(0),
            structures: Vec::new(),
            auto_mode: false,
            paused: false,
            weather: Weather::Sunny,
            temperature: 20,
        }
    }
}

impl ColonyState {
    pub fn resource(&self, name: &str) -> u64 {
        self.resources.get(name).copied().unwrap_or(0)
    }
}

// ─── AI chat ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingMode {
    Brainstorm,
    Analyze,
    Refine,
}

impl ThinkingMode {
    /// Accepts the English names and the Chinese labels used by the lesson UI.
    pub fn parse(name: &str) -> Option<ThinkingMode> {
        match name.trim() {
            "brainstorm" | "头脑风暴" => Some(ThinkingMode::Brainstorm),
            "analyze" | "深度分析" => Some(ThinkingMode::Analyze),
            "refine" | "精细优化" => Some(ThinkingMode::Refine),
            _ => None,
        }
    }
}

impl fmt::Display for ThinkingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThinkingMode::Brainstorm => "brainstorm",
            ThinkingMode::Analyze => "analyze",
            ThinkingMode::Refine => "refine",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptQuality {
    pub clarity: u32,
    pub specificity: u32,
    pub context: u32,
}

impl PromptQuality {
    pub fn average(&self) -> u32 {
        (self.clarity + self.specificity + self.context) / 3
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiChatState {
    pub mode: ThinkingMode,
    pub history: Vec<ChatMessage>,
    pub quality: Option<PromptQuality>,
    pub suggestions: Vec<String>,
    pub refined: bool,
    pub seed: u64,
}

impl AiChatState {
    pub fn new(seed: u64) -> Self {
        AiChatState {
            mode: ThinkingMode::Brainstorm,
            history: Vec::new(),
            quality: None,
            suggestions: Vec::new(),
            refined: false,
            seed,
        }
    }
}
