//! Per-tier baseline parameters for the synthesizer

use serde::{Deserialize, Serialize};

use crate::core::config::{TierConfig, TierTable};
use crate::core::types::Difficulty;

/// Reaction, accuracy and speed baselines for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub reaction_time_ms: u32,
    pub accuracy: f32,
    pub movement_speed: f32,
}

impl DifficultyProfile {
    pub fn lookup(tiers: &TierTable, tier: Difficulty) -> Self {
        Self::from(tiers.get(tier))
    }

    /// Lookup by tier name; unknown names use the medium profile
    pub fn lookup_name(tiers: &TierTable, name: &str) -> Self {
        Self::lookup(tiers, Difficulty::from_name(name))
    }
}

impl From<&TierConfig> for DifficultyProfile {
    fn from(tier: &TierConfig) -> Self {
        Self {
            reaction_time_ms: tier.reaction_time_ms,
            accuracy: tier.accuracy,
            movement_speed: tier.movement_speed,
        }
    }
}
