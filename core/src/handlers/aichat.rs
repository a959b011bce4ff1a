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

//! Prompt-writing coach with simulated replies.
//!
//! A prompt is scored on clarity, specificity and context with keyword
//! heuristics. The mean score picks a reply tier and the reply inside the
//! tier comes from an RNG seeded by the session seed and the history length,
//! so a replayed session gets the same replies.

use crate::command::AiChatCommand;
use crate::effect::Effect;
use crate::error::{LineError, PreconditionError};
use crate::state::{AiChatState, ChatMessage, PromptQuality, Role, ThinkingMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

const VAGUE_WORDS: &[&str] = &["什么", "怎么", "好的", "最好", "what", "how", "good", "best"];
const DOMAIN_WORDS: &[&str] = &[
    "算法",
    "数据结构",
    "机器学习",
    "前端",
    "后端",
    "设计",
    "algorithm",
    "data structure",
    "machine learning",
    "frontend",
    "backend",
    "design",
];
const ACTION_WORDS: &[&str] = &[
    "创建", "分析", "优化", "实现", "设计", "create", "analyze", "optimize", "implement", "design",
];
const CONSTRAINT_WORDS: &[&str] = &[
    "要求", "限制", "条件", "规则", "requirement", "limit", "condition", "rule",
];
const GOAL_WORDS: &[&str] = &[
    "目标", "希望", "需要", "想要", "goal", "hope", "need", "want",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn of(quality: &PromptQuality) -> Tier {
        // mean > 70 and mean > 40, kept in integers
        let total = quality.clarity + quality.specificity + quality.context;
        if total > 210 {
            Tier::High
        } else if total > 120 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    fn replies(self) -> &'static [&'static str] {
        match self {
            Tier::Low => &[
                "I need more information to help. Could you give more background?",
                "The question is quite broad. Could you narrow it down?",
                "Please add more detail so I can give a more precise answer.",
            ],
            Tier::Medium => &[
                "Based on your question, I suggest looking at it from a few angles...",
                "Good question. Let's solve it step by step...",
                "I understand what you need. Here are a few workable options...",
            ],
            Tier::High => &[
                "Clear question! Based on the specifics you gave...",
                "Great prompt! Here is a detailed plan...",
                "Your description is precise, so here is targeted advice...",
            ],
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        })
    }
}

pub fn apply(state: &mut AiChatState, command: &AiChatCommand) -> Result<Effect, LineError> {
    match command {
        AiChatCommand::SetMode(name) => {
            let mode = ThinkingMode::parse(name).ok_or_else(|| PreconditionError::Unknown {
                kind: "thinking mode",
                name: name.clone(),
            })?;
            state.mode = mode;
            Ok(Effect::new(format!("thinking mode set to {}", mode)))
        }
        AiChatCommand::Ask(prompt) => {
            if prompt.trim().is_empty() {
                return Err(PreconditionError::Invalid("prompt is empty".into()).into());
            }
            let quality = assess(prompt);
            let tier = Tier::of(&quality);
            let reply = pick_reply(state.seed, state.history.len(), tier);
            state.history.push(ChatMessage {
                role: Role::User,
                content: prompt.clone(),
            });
            state.history.push(ChatMessage {
                role: Role::Assistant,
                content: reply.to_string(),
            });
            state.quality = Some(quality);
            state.suggestions = suggestions(&quality);
            state.refined = false;
            Ok(Effect::new(format!(
                "clarity {}, specificity {}, context {}: {} reply: {}",
                quality.clarity, quality.specificity, quality.context, tier, reply
            )))
        }
        AiChatCommand::Refine => {
            if !state.history.iter().any(|m| m.role == Role::User) {
                return Err(PreconditionError::Invalid("no prompt to refine".into()).into());
            }
            state.refined = true;
            Ok(Effect::new(format!(
                "refine suggestions: {}",
                state.suggestions.join("; ")
            )))
        }
        AiChatCommand::Analyze => {
            let quality = match (&state.quality, state.history.last()) {
                (Some(q), Some(m)) if m.role == Role::Assistant => *q,
                _ => {
                    return Err(PreconditionError::Invalid("no response to analyze".into()).into())
                }
            };
            Ok(Effect::new(format!(
                "response quality: average {} ({})",
                quality.average(),
                Tier::of(&quality)
            )))
        }
    }
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Scores a prompt on the three axes; each score is capped at 100.
pub fn assess(prompt: &str) -> PromptQuality {
    let lowered = prompt.to_lowercase();
    let length = prompt.chars().count();

    let mut clarity = 50;
    if prompt.contains('?') || prompt.contains('？') {
        clarity += 20;
    }
    if length > 10 && length < 100 {
        clarity += 15;
    }
    if !contains_any(&lowered, VAGUE_WORDS) {
        clarity += 15;
    }

    let mut specificity = 30;
    if prompt.chars().any(|c| c.is_ascii_digit()) {
        specificity += 20;
    }
    if contains_any(&lowered, DOMAIN_WORDS) {
        specificity += 25;
    }
    if contains_any(&lowered, ACTION_WORDS) {
        specificity += 25;
    }

    let mut context = 40;
    if length > 50 {
        context += 20;
    }
    if contains_any(&lowered, CONSTRAINT_WORDS) {
        context += 20;
    }
    if contains_any(&lowered, GOAL_WORDS) {
        context += 20;
    }

    PromptQuality {
        clarity: clarity.min(100),
        specificity: specificity.min(100),
        context: context.min(100),
    }
}

fn pick_reply(seed: u64, turn: usize, tier: Tier) -> &'static str {
    let replies = tier.replies();
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(turn as u64));
    replies[rng.gen_range(0..replies.len())]
}

pub fn suggestions(quality: &PromptQuality) -> Vec<String> {
    let mut out = Vec::new();
    if quality.clarity < 70 {
        out.push("clarity: ask a direct question and avoid vague wording".to_string());
    }
    if quality.specificity < 70 {
        out.push("specificity: name numbers, a domain or a tech stack".to_string());
    }
    if quality.context < 70 {
        out.push("context: describe the situation, constraints and goal".to_string());
    }
    out.push("angle: try rephrasing the question from another perspective".to_string());
    out
}
