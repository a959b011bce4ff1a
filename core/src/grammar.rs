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

//! Per-scenario grammar tables.
//!
//! Each table is an ordered list of anchored patterns. A line is matched
//! against the rules of its scenario in declaration order and the first rule
//! whose pattern matches builds the command. More specific shapes must be
//! declared before the general ones they overlap with (`plot y = ...` before
//! `plot ...`, `print("..." + name)` before `print("...")`).
//!
//! Every rule carries an example line; the classifier tests assert that each
//! example lands on its own rule, which pins the ordering down.

use crate::coerce::{capture, count, decimal, int, int_list, optional, quoted, value};
use crate::command::{
    AiChatCommand, AlgorithmCommand, Augment, ColonyCommand, CommandKind, Comparison,
    DataStructureCommand, Direction, GameCommand, HashCommand, MathCommand, PhysicsCommand, ProgrammingCommand,
    SortMethod, StrategyCommand,
};
use crate::error::CoerceError;
use crate::scenario::ScenarioId;
use regex::{Captures, Regex};

pub type BuildFn = fn(&Captures<'_>) -> Result<CommandKind, CoerceError>;

/// Largest frame count accepted by `step simulation N`.
pub const MAX_SIMULATION_STEPS: u32 = 10_000;

pub struct GrammarRule {
    /// Unique within its table.
    pub name: &'static str,
    /// Handler family, shared by the rules of one feature.
    pub family: &'static str,
    pub pattern: Regex,
    pub example: &'static str,
    build: BuildFn,
}

impl GrammarRule {
    fn new(
        name: &'static str,
        family: &'static str,
        pattern: &str,
        example: &'static str,
        build: BuildFn,
    ) -> Self {
        let source = format!("^(?:{})$", expand(pattern));
        GrammarRule {
            name,
            family,
            pattern: Regex::new(&source).expect("grammar pattern must compile"),
            example,
            build,
        }
    }

    pub fn captures<'t>(&self, line: &'t str) -> Option<Captures<'t>> {
        self.pattern.captures(line)
    }

    pub fn build(&self, caps: &Captures<'_>) -> Result<CommandKind, CoerceError> {
        (self.build)(caps)
    }
}

impl std::fmt::Debug for GrammarRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrammarRule")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

// ─── Fragments ───────────────────────────────────────────────────────────────

const INT: &str = r"-?\d+";
const NUM: &str = r"-?\d+(?:\.\d+)?";
const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";
const STR: &str = r#"(?:"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')"#;
const VAL: &str = r#"(?:{str}|[^\s()"',]+)"#;
const RESOURCE: &str = r"(?P<resource>wood|stone|food|metal)";
const CELL: &str = r"\(\s*(?P<x>{int})\s*,\s*(?P<y>{int})\s*\)";

fn expand(pattern: &str) -> String {
    pattern
        .replace("{resource}", RESOURCE)
        .replace("{cell}", CELL)
        .replace("{val}", VAL)
        .replace("{str}", STR)
        .replace("{int}", INT)
        .replace("{num}", NUM)
        .replace("{ident}", IDENT)
}

fn augment(raw: &str) -> Augment {
    if raw == "-" {
        Augment::Sub
    } else {
        Augment::Add
    }
}

fn text(caps: &Captures<'_>, name: &'static str) -> Result<String, CoerceError> {
    capture(caps, name).map(str::to_string)
}

// ─── Tables ──────────────────────────────────────────────────────────────────

lazy_static::lazy_static! {
    static ref PROGRAMMING: Vec<GrammarRule> = {
        use ProgrammingCommand as P;
        vec![
            GrammarRule::new(
                "print.concat", "programming.print",
                r"print\(\s*(?P<text>{str})\s*\+\s*(?P<var>{ident})\s*\)",
                r#"print("x is " + x)"#,
                |c| Ok(CommandKind::Programming(P::PrintConcat {
                    text: quoted(capture(c, "text")?)?,
                    var: text(c, "var")?,
                })),
            ),
            GrammarRule::new(
                "print.literal", "programming.print",
                r"print\(\s*(?P<text>{str})\s*\)",
                r#"print("hello")"#,
                |c| Ok(CommandKind::Programming(P::Print(quoted(capture(c, "text")?)?))),
            ),
            GrammarRule::new(
                "print.variable", "programming.print",
                r"print\(\s*(?P<var>{ident})\s*\)",
                "print(x)",
                |c| Ok(CommandKind::Programming(P::PrintVar(text(c, "var")?))),
            ),
            GrammarRule::new(
                "augment", "programming.augment",
                r"(?P<name>{ident})\s*(?P<op>[+-])=\s*(?P<value>{int})",
                "x += 5",
                |c| {
                    let op = if capture(c, "op")? == "-" { Augment::Sub } else { Augment::Add };
                    Ok(CommandKind::Programming(P::Augment {
                        name: text(c, "name")?,
                        op,
                        amount: int(capture(c, "value")?)?,
                    }))
                },
            ),
            GrammarRule::new(
                "assign.int", "programming.assign",
                r"(?P<name>{ident})\s*=\s*(?P<value>{int})",
                "x = 10",
                |c| Ok(CommandKind::Programming(P::AssignInt {
                    name: text(c, "name")?,
                    value: int(capture(c, "value")?)?,
                })),
            ),
            GrammarRule::new(
                "assign.text", "programming.assign",
                r"(?P<name>{ident})\s*=\s*(?P<value>{str})",
                r#"name = "Ada""#,
                |c| Ok(CommandKind::Programming(P::AssignText {
                    name: text(c, "name")?,
                    value: quoted(capture(c, "value")?)?,
                })),
            ),
            GrammarRule::new(
                "if", "programming.if",
                r"if\s+(?P<name>{ident})\s*(?P<op>>=|<=|==|!=|>|<)\s*(?P<value>{int})\s*:",
                "if x > 5:",
                |c| {
                    let op = Comparison::parse(capture(c, "op")?).ok_or(CoerceError::Missing("op"))?;
                    Ok(CommandKind::Programming(P::If {
                        name: text(c, "name")?,
                        op,
                        rhs: int(capture(c, "value")?)?,
                    }))
                },
            ),
        ]
    };

    static ref ALGORITHM: Vec<GrammarRule> = {
        use AlgorithmCommand as A;
        vec![
            GrammarRule::new(
                "array.declare", "algorithm.array",
                r"array\s+(?P<name>{ident})\s*=\s*\[(?P<values>[^\]]*)\]",
                "array nums = [3, 1, 4, 2]",
                |c| Ok(CommandKind::Algorithm(A::Declare {
                    name: text(c, "name")?,
                    values: int_list(capture(c, "values")?)?,
                })),
            ),
            GrammarRule::new(
                "array.sort", "algorithm.sort",
                r"sort\s+(?P<name>{ident})(?:\s+using\s+(?P<method>bubble|selection))?",
                "sort nums using selection",
                |c| {
                    let method = match optional(c, "method") {
                        Some("selection") => SortMethod::Selection,
                        _ => SortMethod::Bubble,
                    };
                    Ok(CommandKind::Algorithm(A::Sort { name: text(c, "name")?, method }))
                },
            ),
            GrammarRule::new(
                "array.search", "algorithm.search",
                r"search\s+(?P<name>{ident})\s+for\s+(?P<target>{int})",
                "search nums for 4",
                |c| Ok(CommandKind::Algorithm(A::Search {
                    name: text(c, "name")?,
                    target: int(capture(c, "target")?)?,
                })),
            ),
            GrammarRule::new(
                "array.print", "algorithm.print",
                r"print\(\s*(?P<text>{str})\s*\+\s*(?P<name>{ident})\s*\)",
                r#"print("sorted: " + nums)"#,
                |c| Ok(CommandKind::Algorithm(A::Print {
                    text: quoted(capture(c, "text")?)?,
                    name: text(c, "name")?,
                })),
            ),
        ]
    };

    static ref DATA_STRUCTURE: Vec<GrammarRule> = {
        use DataStructureCommand as D;
        vec![
            GrammarRule::new(
                "stack.push", "datastructure.stack",
                r"stack\.push\(\s*(?P<value>{val})\s*\)",
                "stack.push(1)",
                |c| Ok(CommandKind::DataStructure(D::Push(value(capture(c, "value")?)?))),
            ),
            GrammarRule::new(
                "stack.pop", "datastructure.stack",
                r"stack\.pop\(\s*\)",
                "stack.pop()",
                |_| Ok(CommandKind::DataStructure(D::Pop)),
            ),
            GrammarRule::new(
                "stack.top", "datastructure.stack",
                r"stack\.top\(\s*\)",
                "stack.top()",
                |_| Ok(CommandKind::DataStructure(D::Top)),
            ),
            GrammarRule::new(
                "stack.print_top", "datastructure.stack",
                r"print\(\s*(?P<text>{str})\s*\+\s*stack\.top\(\s*\)\s*\)",
                r#"print("top: " + stack.top())"#,
                |c| Ok(CommandKind::DataStructure(D::PrintTop { text: quoted(capture(c, "text")?)? })),
            ),
            GrammarRule::new(
                "queue.enqueue", "datastructure.queue",
                r"queue\.enqueue\(\s*(?P<value>{val})\s*\)",
                r#"queue.enqueue("a")"#,
                |c| Ok(CommandKind::DataStructure(D::Enqueue(value(capture(c, "value")?)?))),
            ),
            GrammarRule::new(
                "queue.dequeue", "datastructure.queue",
                r"queue\.dequeue\(\s*\)",
                "queue.dequeue()",
                |_| Ok(CommandKind::DataStructure(D::Dequeue)),
            ),
            GrammarRule::new(
                "tree.insert", "datastructure.tree",
                r"tree\.insert\(\s*(?P<value>{int})\s*\)",
                "tree.insert(5)",
                |c| Ok(CommandKind::DataStructure(D::TreeInsert(int(capture(c, "value")?)?))),
            ),
            GrammarRule::new(
                "heap.insert", "datastructure.heap",
                r"heap\.insert\(\s*(?P<value>{int})\s*\)",
                "heap.insert(7)",
                |c| Ok(CommandKind::DataStructure(D::HeapInsert(int(capture(c, "value")?)?))),
            ),
            GrammarRule::new(
                "graph.add_node", "datastructure.graph",
                r"graph\.addNode\(\s*(?P<value>{val})\s*\)",
                r#"graph.addNode("A")"#,
                |c| Ok(CommandKind::DataStructure(D::AddNode(value(capture(c, "value")?)?))),
            ),
            GrammarRule::new(
                "graph.add_edge", "datastructure.graph",
                r"graph\.addEdge\(\s*(?P<from>{val})\s*,\s*(?P<to>{val})\s*\)",
                r#"graph.addEdge("A", "B")"#,
                |c| Ok(CommandKind::DataStructure(D::AddEdge {
                    from: value(capture(c, "from")?)?,
                    to: value(capture(c, "to")?)?,
                })),
            ),
        ]
    };

    static ref MATH: Vec<GrammarRule> = {
        use MathCommand as M;
        vec![
            GrammarRule::new(
                "range", "math.range",
                r"set\s+range\s+(?P<min>{int})\s+to\s+(?P<max>{int})",
                "set range -5 to 5",
                |c| Ok(CommandKind::Math(M::SetRange {
                    min: int(capture(c, "min")?)?,
                    max: int(capture(c, "max")?)?,
                })),
            ),
            GrammarRule::new(
                "plot.equation", "math.plot",
                r"plot\s+y\s*=\s*(?P<expr>.+)",
                "plot y = x^2",
                |c| Ok(CommandKind::Math(M::Plot { expression: capture(c, "expr")?.trim().to_string() })),
            ),
            GrammarRule::new(
                "plot.expression", "math.plot",
                r"plot\s+(?P<expr>.+)",
                "plot sin(x)",
                |c| Ok(CommandKind::Math(M::Plot { expression: capture(c, "expr")?.trim().to_string() })),
            ),
            GrammarRule::new(
                "draw.circle", "math.shape",
                r"draw\s+circle\s+at\s*\(\s*(?P<x>{num})\s*,\s*(?P<y>{num})\s*\)\s+radius\s+(?P<r>{num})",
                "draw circle at (0, 0) radius 2",
                |c| Ok(CommandKind::Math(M::Circle {
                    x: decimal(capture(c, "x")?)?,
                    y: decimal(capture(c, "y")?)?,
                    radius: decimal(capture(c, "r")?)?,
                })),
            ),
            GrammarRule::new(
                "draw.rectangle", "math.shape",
                r"draw\s+rectangle\s+at\s*\(\s*(?P<x>{num})\s*,\s*(?P<y>{num})\s*\)\s+width\s+(?P<w>{num})\s+height\s+(?P<h>{num})",
                "draw rectangle at (1, 1) width 3 height 2",
                |c| Ok(CommandKind::Math(M::Rectangle {
                    x: decimal(capture(c, "x")?)?,
                    y: decimal(capture(c, "y")?)?,
                    width: decimal(capture(c, "w")?)?,
                    height: decimal(capture(c, "h")?)?,
                })),
            ),
            GrammarRule::new(
                "point", "math.point",
                r"add\s+point\s+at\s*\(\s*(?P<x>{num})\s*,\s*(?P<y>{num})\s*\)(?:\s+label\s+(?P<label>{val}))?",
                r#"add point at (1, 2) label "A""#,
                |c| Ok(CommandKind::Math(M::Point {
                    x: decimal(capture(c, "x")?)?,
                    y: decimal(capture(c, "y")?)?,
                    label: optional(c, "label").map(value).transpose()?,
                })),
            ),
            GrammarRule::new(
                "calculate", "math.calculate",
                r"calculate\s+(?P<expr>.+)",
                "calculate 2^2 + 1",
                |c| Ok(CommandKind::Math(M::Calculate { expression: capture(c, "expr")?.trim().to_string() })),
            ),
        ]
    };

    static ref PHYSICS: Vec<GrammarRule> = {
        use PhysicsCommand as Ph;
        vec![
            GrammarRule::new(
                "gravity", "physics.gravity",
                r"set\s+gravity\s+(?P<g>{num})",
                "set gravity 9.8",
                |c| Ok(CommandKind::Physics(Ph::SetGravity(decimal(capture(c, "g")?)?))),
            ),
            GrammarRule::new(
                "create", "physics.create",
                r"create\s+(?P<name>{ident})\s+at\s*\(\s*(?P<x>{num})\s*,\s*(?P<y>{num})\s*\)(?:\s+mass\s+(?P<mass>{num}))?",
                "create ball at (50, 10)",
                |c| Ok(CommandKind::Physics(Ph::Create {
                    name: text(c, "name")?,
                    x: decimal(capture(c, "x")?)?,
                    y: decimal(capture(c, "y")?)?,
                    mass: optional(c, "mass").map(decimal).transpose()?.unwrap_or(1.0),
                })),
            ),
            GrammarRule::new(
                "force", "physics.force",
                r"apply\s+force\s+(?P<f>{num})\s+to\s+(?P<target>{ident})",
                "apply force 5 to ball",
                |c| Ok(CommandKind::Physics(Ph::ApplyForce {
                    magnitude: decimal(capture(c, "f")?)?,
                    target: text(c, "target")?,
                })),
            ),
            GrammarRule::new(
                "start", "physics.simulation",
                r"start\s+simulation",
                "start simulation",
                |_| Ok(CommandKind::Physics(Ph::Start)),
            ),
            GrammarRule::new(
                "stop", "physics.simulation",
                r"stop\s+simulation",
                "stop simulation",
                |_| Ok(CommandKind::Physics(Ph::Stop)),
            ),
            GrammarRule::new(
                "step", "physics.simulation",
                r"step\s+simulation(?:\s+(?P<n>\d+))?",
                "step simulation 10",
                |c| {
                    let frames = match optional(c, "n") {
                        Some(raw) => {
                            let n = count(raw)?;
                            u32::try_from(n)
                                .ok()
                                .filter(|n| (1..=MAX_SIMULATION_STEPS).contains(n))
                                .ok_or_else(|| CoerceError::IntOutOfRange(raw.to_string()))?
                        }
                        None => 1,
                    };
                    Ok(CommandKind::Physics(Ph::Step(frames)))
                },
            ),
        ]
    };

    static ref GAME: Vec<GrammarRule> = {
        use GameCommand as G;
        vec![
            GrammarRule::new(
                "player.create", "game.player",
                r"create\s+player\s+at\s*\(\s*(?P<x>{int})\s*,\s*(?P<y>{int})\s*\)",
                "create player at (0, 0)",
                |c| Ok(CommandKind::Game(G::CreatePlayer {
                    x: int(capture(c, "x")?)?,
                    y: int(capture(c, "y")?)?,
                })),
            ),
            GrammarRule::new(
                "player.move", "game.player",
                r"move\s+player\s+(?P<dir>up|down|left|right)",
                "move player right",
                |c| {
                    let dir = Direction::parse(capture(c, "dir")?).ok_or(CoerceError::Missing("dir"))?;
                    Ok(CommandKind::Game(G::Move(dir)))
                },
            ),
            GrammarRule::new(
                "coin.spawn", "game.coin",
                r"spawn\s+coin\s+at\s*\(\s*(?P<x>{int})\s*,\s*(?P<y>{int})\s*\)",
                "spawn coin at (4, 4)",
                |c| Ok(CommandKind::Game(G::SpawnCoin {
                    x: int(capture(c, "x")?)?,
                    y: int(capture(c, "y")?)?,
                })),
            ),
        ]
    };

    static ref HASH: Vec<GrammarRule> = {
        use HashCommand as H;
        vec![
            GrammarRule::new(
                "define", "hash.function",
                r"function\s+hash\s*\(\s*(?P<param>{ident})\s*\)",
                "function hash(key)",
                |c| Ok(CommandKind::Hash(H::Define { param: text(c, "param")? })),
            ),
            GrammarRule::new(
                "sum.init", "hash.sum",
                r"sum\s*=\s*0",
                "sum = 0",
                |_| Ok(CommandKind::Hash(H::InitSum)),
            ),
            GrammarRule::new(
                "input", "hash.input",
                r"(?P<name>{ident})\s*=\s*(?P<value>{str})",
                r#"key = "apple""#,
                |c| Ok(CommandKind::Hash(H::SetInput {
                    name: text(c, "name")?,
                    value: quoted(capture(c, "value")?)?,
                })),
            ),
            GrammarRule::new(
                "loop", "hash.loop",
                r"for\s+(?P<var>{ident})\s+in\s+(?P<over>{ident})",
                "for char in key",
                |c| Ok(CommandKind::Hash(H::Loop {
                    var: text(c, "var")?,
                    over: text(c, "over")?,
                })),
            ),
            GrammarRule::new(
                "accumulate", "hash.sum",
                r"sum\s*\+=\s*ascii\(\s*(?P<var>{ident})\s*\)",
                "sum += ascii(char)",
                |c| Ok(CommandKind::Hash(H::Accumulate { var: text(c, "var")? })),
            ),
            GrammarRule::new(
                "return", "hash.return",
                r"return\s+sum\s*%\s*(?P<modulus>{int})",
                "return sum % 8",
                |c| Ok(CommandKind::Hash(H::Return { modulus: int(capture(c, "modulus")?)? })),
            ),
            GrammarRule::new(
                "hash.call", "hash.function",
                r"hash\(\s*(?P<value>{str})\s*\)",
                r#"hash("apple")"#,
                |c| Ok(CommandKind::Hash(H::HashOf(quoted(capture(c, "value")?)?))),
            ),
        ]
    };

    static ref STRATEGY: Vec<GrammarRule> = {
        use StrategyCommand as S;
        vec![
            GrammarRule::new(
                "define", "strategy.plan",
                r"define\s+strategy\s+(?P<name>{str})",
                r#"define strategy "expansion""#,
                |c| Ok(CommandKind::Strategy(S::Define(quoted(capture(c, "name")?)?))),
            ),
            GrammarRule::new(
                "goal", "strategy.plan",
                r"set\s+goal\s+(?P<goal>{str})",
                r#"set goal "control territory""#,
                |c| Ok(CommandKind::Strategy(S::SetGoal(quoted(capture(c, "goal")?)?))),
            ),
            GrammarRule::new(
                "build", "strategy.build",
                r"build\s+(?P<kind>{ident})\s+at\s*\(\s*(?P<x>{int})\s*,\s*(?P<y>{int})\s*\)",
                "build farm at (2, 3)",
                |c| Ok(CommandKind::Strategy(S::Build {
                    kind: text(c, "kind")?,
                    x: int(capture(c, "x")?)?,
                    y: int(capture(c, "y")?)?,
                })),
            ),
            GrammarRule::new(
                "train", "strategy.train",
                r"train\s+(?P<kind>{ident})\s+at\s*\(\s*(?P<x>{int})\s*,\s*(?P<y>{int})\s*\)",
                "train soldier at (1, 1)",
                |c| Ok(CommandKind::Strategy(S::Train {
                    kind: text(c, "kind")?,
                    x: int(capture(c, "x")?)?,
                    y: int(capture(c, "y")?)?,
                })),
            ),
            GrammarRule::new(
                "collect", "strategy.collect",
                r"collect\s+(?P<resource>{ident})\s+(?P<amount>\d+)",
                "collect gold 20",
                |c| Ok(CommandKind::Strategy(S::Collect {
                    resource: text(c, "resource")?,
                    amount: count(capture(c, "amount")?)?,
                })),
            ),
            GrammarRule::new(
                "execute", "strategy.plan",
                r"execute\s+strategy",
                "execute strategy",
                |_| Ok(CommandKind::Strategy(S::Execute)),
            ),
        ]
    };

    static ref AI_CHAT: Vec<GrammarRule> = {
        use AiChatCommand as C;
        vec![
            GrammarRule::new(
                "mode", "aichat.mode",
                r"set\s+thinking\s+mode\s+(?P<mode>{str})",
                r#"set thinking mode "brainstorm""#,
                |c| Ok(CommandKind::AiChat(C::SetMode(quoted(capture(c, "mode")?)?))),
            ),
            GrammarRule::new(
                "ask", "aichat.ask",
                r"ask\s+(?P<prompt>{str})",
                r#"ask "how do I learn programming""#,
                |c| Ok(CommandKind::AiChat(C::Ask(quoted(capture(c, "prompt")?)?))),
            ),
            GrammarRule::new(
                "refine", "aichat.refine",
                r"refine\s+prompt\s+with\s+context",
                "refine prompt with context",
                |_| Ok(CommandKind::AiChat(C::Refine)),
            ),
            GrammarRule::new(
                "analyze", "aichat.analyze",
                r"analyze\s+response\s+quality",
                "analyze response quality",
                |_| Ok(CommandKind::AiChat(C::Analyze)),
            ),
        ]
    };

    static ref COLONY: Vec<GrammarRule> = {
        use ColonyCommand as C;
        vec![
            GrammarRule::new(
                "resource.set", "colony.resource",
                r"{resource}\s*=\s*(?P<amount>\d+)",
                "wood = 100",
                |c| Ok(CommandKind::Colony(C::SetResource {
                    resource: text(c, "resource")?,
                    amount: count(capture(c, "amount")?)?,
                })),
            ),
            GrammarRule::new(
                "resource.adjust", "colony.resource",
                r"{resource}\s*(?P<op>[+-])=\s*(?P<amount>\d+)",
                "wood += 50",
                |c| Ok(CommandKind::Colony(C::AdjustResource {
                    resource: text(c, "resource")?,
                    op: augment(capture(c, "op")?),
                    amount: count(capture(c, "amount")?)?,
                })),
            ),
            GrammarRule::new(
                "resource.expression", "colony.resource",
                r"{resource}\s*(?P<op>[+-])\s*(?P<amount>\d+)",
                "food - 10",
                |c| Ok(CommandKind::Colony(C::AdjustResource {
                    resource: text(c, "resource")?,
                    op: augment(capture(c, "op")?),
                    amount: count(capture(c, "amount")?)?,
                })),
            ),
            GrammarRule::new(
                "colonist.move", "colony.colonist",
                r"move(?:\s+colonist\s+(?:to\s*)?|\s*){cell}",
                "move colonist to (5, 4)",
                |c| Ok(CommandKind::Colony(C::MoveColonist {
                    x: int(capture(c, "x")?)?,
                    y: int(capture(c, "y")?)?,
                })),
            ),
            GrammarRule::new(
                "colonist.heal", "colony.colonist",
                r"heal(?:\s+colonist|\(\s*\))?",
                "heal colonist",
                |_| Ok(CommandKind::Colony(C::Heal)),
            ),
            GrammarRule::new(
                "colonist.revive", "colony.colonist",
                r"revive(?:\s+colonist|\(\s*\))?",
                "revive colonist",
                |_| Ok(CommandKind::Colony(C::Revive)),
            ),
            GrammarRule::new(
                "structure.build", "colony.structure",
                r"build\s+(?P<kind>{ident})\s+at\s*{cell}",
                "build house at (4, 4)",
                |c| Ok(CommandKind::Colony(C::Build {
                    kind: text(c, "kind")?,
                    x: int(capture(c, "x")?)?,
                    y: int(capture(c, "y")?)?,
                })),
            ),
            GrammarRule::new(
                "structure.build.call", "colony.structure",
                r"build\(\s*(?P<kind>{str})\s*,\s*(?P<x>{int})\s*,\s*(?P<y>{int})\s*\)",
                r#"build("wall", 3, 3)"#,
                |c| Ok(CommandKind::Colony(C::Build {
                    kind: quoted(capture(c, "kind")?)?,
                    x: int(capture(c, "x")?)?,
                    y: int(capture(c, "y")?)?,
                })),
            ),
            GrammarRule::new(
                "structure.demolish", "colony.structure",
                r"demolish\s*(?:at\s*)?{cell}",
                "demolish at (4, 4)",
                |c| Ok(CommandKind::Colony(C::Demolish {
                    x: int(capture(c, "x")?)?,
                    y: int(capture(c, "y")?)?,
                })),
            ),
            GrammarRule::new(
                "auto", "colony.control",
                r"auto\s+(?P<state>on|off)",
                "auto on",
                |c| Ok(CommandKind::Colony(C::Auto(capture(c, "state")? == "on"))),
            ),
            GrammarRule::new(
                "pause", "colony.control",
                r"pause(?:\(\s*\))?",
                "pause",
                |_| Ok(CommandKind::Colony(C::Pause)),
            ),
            GrammarRule::new(
                "resume", "colony.control",
                r"resume(?:\(\s*\))?",
                "resume",
                |_| Ok(CommandKind::Colony(C::Resume)),
            ),
            GrammarRule::new(
                "weather", "colony.environment",
                r"weather\s*=\s*(?P<weather>{val})",
                "weather = rainy",
                |c| Ok(CommandKind::Colony(C::SetWeather(value(capture(c, "weather")?)?))),
            ),
            GrammarRule::new(
                "temperature", "colony.environment",
                r"temperature\s*=\s*(?P<degrees>{int})",
                "temperature = 25",
                |c| Ok(CommandKind::Colony(C::SetTemperature(int(capture(c, "degrees")?)?))),
            ),
            GrammarRule::new(
                "disaster", "colony.environment",
                r"disaster\s+(?P<kind>\S+)",
                "disaster flood",
                |c| Ok(CommandKind::Colony(C::Disaster(text(c, "kind")?))),
            ),
        ]
    };
}

/// Returns the ordered grammar table for `scenario`.
pub fn rules_for(scenario: ScenarioId) -> &'static [GrammarRule] {
    match scenario {
        ScenarioId::Programming => &PROGRAMMING,
        ScenarioId::Algorithm => &ALGORITHM,
        ScenarioId::DataStructure => &DATA_STRUCTURE,
        ScenarioId::Math => &MATH,
        ScenarioId::Physics => &PHYSICS,
        ScenarioId::Game => &GAME,
        ScenarioId::Hash => &HASH,
        ScenarioId::Strategy => &STRATEGY,
        ScenarioId::AiChat => &AI_CHAT,
        ScenarioId::Colony => &COLONY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_table_compiles_and_has_unique_names() {
        for scenario in ScenarioId::ALL {
            let rules = rules_for(scenario);
            assert!(!rules.is_empty(), "{} has no rules", scenario);
            let names: HashSet<_> = rules.iter().map(|r| r.name).collect();
            assert_eq!(names.len(), rules.len(), "duplicate rule name in {}", scenario);
        }
    }

    #[test]
    fn test_patterns_are_anchored() {
        let rules = rules_for(ScenarioId::Strategy);
        let build = rules.iter().find(|r| r.name == "build").unwrap();
        assert!(build.captures("build farm at (2, 3)").is_some());
        assert!(build.captures("please build farm at (2, 3)").is_none());
        assert!(build.captures("build farm at (2, 3) now").is_none());
    }

    #[test]
    fn test_string_fragment_accepts_escapes_and_single_quotes() {
        let rules = rules_for(ScenarioId::Programming);
        let print = rules.iter().find(|r| r.name == "print.literal").unwrap();
        assert!(print.captures(r#"print("say \"hi\"")"#).is_some());
        assert!(print.captures("print('single')").is_some());
        assert!(print.captures(r#"print("unterminated)"#).is_none());
    }
}
