//! Deterministic strategy table
//!
//! Keyed by the first matching tag in precedence order:
//! close range, far range, behind cover, then the neutral default.

use crate::core::config::{RuleTableConfig, TacticsConfig, TierTable};
use crate::core::error::Result;
use crate::core::types::Difficulty;
use crate::strategy::{MovementIntent, Strategy, StrategyAdvisor, StrategySource};
use crate::tactics::{TacticalTag, TacticalTags};

pub const CLOSE_RANGE_REASONING: &str = "close range — evasive maneuver";
pub const FAR_RANGE_REASONING: &str = "long range — advancing";
pub const COVER_REASONING: &str = "opponent covered — patient approach";
pub const NEUTRAL_REASONING: &str = "neutral — hold tactical position";

/// Rule-based advisor; never fails
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: RuleTableConfig,
    tiers: TierTable,
}

impl RuleTable {
    pub fn new(rules: RuleTableConfig, tiers: TierTable) -> Self {
        Self { rules, tiers }
    }

    pub fn from_config(config: &TacticsConfig) -> Self {
        Self::new(config.rules.clone(), config.tiers.clone())
    }

    /// Look up the strategy for a situation
    pub fn strategy_for(&self, tags: &TacticalTags, tier: Difficulty) -> Strategy {
        let baseline = self.tiers.get(tier);

        let (aggression, movement, jump, reasoning) = if tags.contains(TacticalTag::CloseRange) {
            (
                baseline.aggression * self.rules.close_aggression_factor,
                MovementIntent::Back,
                self.rules.close_jump,
                CLOSE_RANGE_REASONING,
            )
        } else if tags.contains(TacticalTag::FarRange) {
            (
                baseline.aggression,
                MovementIntent::Forward,
                self.rules.far_jump,
                FAR_RANGE_REASONING,
            )
        } else if tags.contains(TacticalTag::BehindCover) {
            (
                baseline.aggression * self.rules.cover_aggression_factor,
                MovementIntent::Stay,
                self.rules.cover_jump,
                COVER_REASONING,
            )
        } else {
            (
                baseline.aggression,
                MovementIntent::Tactical,
                baseline.jump_likelihood,
                NEUTRAL_REASONING,
            )
        };

        Strategy {
            aggression,
            movement,
            jump_likelihood: Some(jump),
            reasoning: Some(reasoning.to_string()),
            source: StrategySource::Fallback,
        }
    }
}

impl StrategyAdvisor for RuleTable {
    async fn advise(&self, tags: &TacticalTags, tier: Difficulty, _context: &str) -> Result<Strategy> {
        Ok(self.strategy_for(tags, tier))
    }
}
