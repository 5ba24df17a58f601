//! Strategy resolution
//!
//! Architecture: Trait + Data hybrid
//! - `StrategyAdvisor` is the swappable advisory capability
//! - `RuleTable` is the deterministic advisor, built from the tuning table
//! - `StrategyResolver` tries the oracle under a timeout and falls back to
//!   the rule table on any failure

pub mod resolver;
pub mod rule_table;

pub use resolver::{OfflineResolver, StrategyResolver};
pub use rule_table::RuleTable;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Difficulty;
use crate::tactics::TacticalTags;

/// Movement directive carried by a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementIntent {
    Forward,
    Back,
    Stay,
    Tactical,
    /// Raw directional hint passed through from the oracle
    Left,
    Right,
}

impl MovementIntent {
    /// Map an oracle `move_direction` value; anything unknown means stay
    pub fn from_hint(hint: &str) -> Self {
        match hint.trim().to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Stay,
        }
    }
}

/// Where a strategy came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategySource {
    Oracle,
    Fallback,
}

impl StrategySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oracle => "oracle",
            Self::Fallback => "fallback",
        }
    }
}

/// Resolved directive guiding the final decision
///
/// `aggression` is not clamped here; the synthesizer clamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub aggression: f32,
    pub movement: MovementIntent,
    pub jump_likelihood: Option<f32>,
    pub reasoning: Option<String>,
    pub source: StrategySource,
}

/// A source of strategies for a classified situation
///
/// Implementations may fail; the resolver turns every failure into a
/// rule-table strategy.
pub trait StrategyAdvisor: Send + Sync {
    fn advise(
        &self,
        tags: &TacticalTags,
        tier: Difficulty,
        context: &str,
    ) -> impl Future<Output = Result<Strategy>> + Send;
}
