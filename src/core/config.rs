//! Tactical tuning table with documented constants
//!
//! Every heuristic number used by the classifier, the rule table and the
//! synthesizer lives here. Tables load from TOML; any missing section or
//! field keeps its default.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{DuelError, Result};
use crate::core::types::Difficulty;

/// Distance and motion thresholds used by the situation classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Below this distance the opponent is at close range
    pub close_range: f32,
    /// Above this distance the opponent is at far range
    ///
    /// Anything between `close_range` and `far_range` (inclusive) is medium range.
    pub far_range: f32,
    /// Vertical difference that must be exceeded before either height tag applies
    pub height_deadband: f32,
    /// Horizontal speed above which the opponent counts as moving
    pub moving_speed: f32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            close_range: 100.0,
            far_range: 200.0,
            height_deadband: 20.0,
            moving_speed: 1.0,
        }
    }
}

/// Multipliers applied to the tier's base accuracy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyConfig {
    /// Beyond this distance shots are long shots
    pub long_shot_distance: f32,
    /// Accuracy factor for long shots
    pub long_shot_multiplier: f32,
    /// At or inside this distance shots are point blank
    pub point_blank_distance: f32,
    /// Accuracy factor for point-blank shots
    pub point_blank_multiplier: f32,
    /// Applied while the high ground tag is present
    pub high_ground_multiplier: f32,
    /// Applied while the low ground tag is present
    pub low_ground_multiplier: f32,
    /// Applied when the AI moves horizontally on the same tick
    pub moving_multiplier: f32,
    /// Applied when the opponent is behind cover
    pub cover_multiplier: f32,
    /// Lower bound of the final accuracy modifier
    pub min: f32,
    /// Upper bound of the final accuracy modifier
    pub max: f32,
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            long_shot_distance: 150.0,
            long_shot_multiplier: 0.7,
            point_blank_distance: 50.0,
            point_blank_multiplier: 1.3,
            high_ground_multiplier: 1.2,
            low_ground_multiplier: 0.8,
            moving_multiplier: 0.9,
            cover_multiplier: 0.6,
            min: 0.1,
            max: 1.5,
        }
    }
}

/// Shoot probability adjustments and reaction jitter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingConfig {
    /// Added to the shoot probability at close range
    pub close_range_bonus: f32,
    /// Added to the shoot probability while the high ground tag is present
    pub high_ground_bonus: f32,
    /// Subtracted from the shoot probability when the opponent is behind cover
    pub cover_penalty: f32,
    /// Reaction time is the tier baseline times a uniform draw from this range
    pub reaction_jitter_min: f32,
    /// Upper end of the reaction jitter range
    pub reaction_jitter_max: f32,
}

impl Default for ShootingConfig {
    fn default() -> Self {
        Self {
            close_range_bonus: 0.3,
            high_ground_bonus: 0.2,
            cover_penalty: 0.2,
            reaction_jitter_min: 0.8,
            reaction_jitter_max: 1.3,
        }
    }
}

/// Movement and jump parameters used by the synthesizer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// A tactical actor advances when farther than this
    pub tactical_advance_distance: f32,
    /// A tactical actor retreats when closer than this
    pub tactical_retreat_distance: f32,
    /// Fraction of tier speed used for tactical repositioning
    pub tactical_speed_factor: f32,
    /// Jump likelihood used when a strategy does not carry one
    pub default_jump_likelihood: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            tactical_advance_distance: 150.0,
            tactical_retreat_distance: 80.0,
            tactical_speed_factor: 0.5,
            default_jump_likelihood: 0.1,
        }
    }
}

/// Blend of aggression and accuracy into a confidence score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Weight of the clamped aggression
    pub aggression_weight: f32,
    /// Weight of the final accuracy modifier
    pub accuracy_weight: f32,
    /// Lower bound of the reported confidence
    pub min: f32,
    /// Upper bound of the reported confidence
    pub max: f32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            aggression_weight: 0.6,
            accuracy_weight: 0.4,
            min: 0.1,
            max: 0.9,
        }
    }
}

/// Constants for the deterministic strategy table and oracle reply mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTableConfig {
    /// Close range: tier aggression is scaled by this (retreat rule)
    pub close_aggression_factor: f32,
    /// Close range: jump likelihood of the retreat rule
    pub close_jump: f32,
    /// Far range: jump likelihood of the advance rule
    pub far_jump: f32,
    /// Opponent behind cover: tier aggression is scaled by this
    pub cover_aggression_factor: f32,
    /// Opponent behind cover: jump likelihood of the hold rule
    pub cover_jump: f32,
    /// Aggression assumed when an oracle reply omits it
    pub oracle_default_aggression: f32,
    /// Jump likelihood when the oracle asks for a jump
    pub oracle_jump_likelihood: f32,
    /// Jump likelihood when the oracle does not ask for a jump
    pub oracle_no_jump_likelihood: f32,
}

impl Default for RuleTableConfig {
    fn default() -> Self {
        Self {
            close_aggression_factor: 1.2,
            close_jump: 0.6,
            far_jump: 0.2,
            cover_aggression_factor: 0.8,
            cover_jump: 0.1,
            oracle_default_aggression: 0.6,
            oracle_jump_likelihood: 1.0,
            oracle_no_jump_likelihood: 0.2,
        }
    }
}

/// Baseline parameters for one difficulty tier
///
/// All fields are required when a tier is overridden in TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Rule-table aggression before any rule factor
    pub aggression: f32,
    /// Jump likelihood of the neutral rule
    pub jump_likelihood: f32,
    /// Baseline reaction time before jitter
    pub reaction_time_ms: u32,
    /// Base accuracy the multipliers scale
    pub accuracy: f32,
    /// Horizontal speed at full pace, in arena units per tick
    pub movement_speed: f32,
}

impl TierConfig {
    pub fn easy() -> Self {
        Self {
            aggression: 0.3,
            jump_likelihood: 0.2,
            reaction_time_ms: 800,
            accuracy: 0.5,
            movement_speed: 2.0,
        }
    }

    pub fn medium() -> Self {
        Self {
            aggression: 0.6,
            jump_likelihood: 0.4,
            reaction_time_ms: 500,
            accuracy: 0.7,
            movement_speed: 3.0,
        }
    }

    pub fn hard() -> Self {
        Self {
            aggression: 0.9,
            jump_likelihood: 0.7,
            reaction_time_ms: 300,
            accuracy: 0.9,
            movement_speed: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub easy: TierConfig,
    pub medium: TierConfig,
    pub hard: TierConfig,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            easy: TierConfig::easy(),
            medium: TierConfig::medium(),
            hard: TierConfig::hard(),
        }
    }
}

impl TierTable {
    pub fn get(&self, tier: Difficulty) -> &TierConfig {
        match tier {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

/// Complete tactical tuning table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticsConfig {
    pub ranges: RangeConfig,
    pub accuracy: AccuracyConfig,
    pub shooting: ShootingConfig,
    pub movement: MovementConfig,
    pub confidence: ConfidenceConfig,
    pub rules: RuleTableConfig,
    pub tiers: TierTable,
}

impl TacticsConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DuelError::Config(format!("Failed to parse tactics TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.ranges.close_range >= self.ranges.far_range {
            return Err(DuelError::Config(format!(
                "close_range ({}) should be < far_range ({})",
                self.ranges.close_range, self.ranges.far_range
            )));
        }

        if self.movement.tactical_retreat_distance > self.movement.tactical_advance_distance {
            return Err(DuelError::Config(format!(
                "tactical_retreat_distance ({}) should be <= tactical_advance_distance ({})",
                self.movement.tactical_retreat_distance, self.movement.tactical_advance_distance
            )));
        }

        let jitter = &self.shooting;
        if jitter.reaction_jitter_min <= 0.0 || jitter.reaction_jitter_min > jitter.reaction_jitter_max {
            return Err(DuelError::Config(format!(
                "reaction jitter range [{}, {}] must be positive and ordered",
                jitter.reaction_jitter_min, jitter.reaction_jitter_max
            )));
        }

        if self.accuracy.min <= 0.0 || self.accuracy.min > self.accuracy.max {
            return Err(DuelError::Config("accuracy bounds must be positive and ordered".into()));
        }

        if self.confidence.min > self.confidence.max {
            return Err(DuelError::Config("confidence bounds must be ordered".into()));
        }

        for tier in Difficulty::ALL {
            if self.tiers.get(tier).reaction_time_ms == 0 {
                return Err(DuelError::Config(format!(
                    "reaction_time_ms for tier {} must be positive",
                    tier
                )));
            }
        }

        Ok(())
    }
}

/// Advisory oracle connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub enabled: bool,
    pub api_url: String,
    pub model: String,
    /// Upper bound on a single advisory call, in milliseconds
    pub timeout_ms: u64,
    pub max_tokens: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-3-haiku-20240307".to_string(),
            timeout_ms: 3000,
            max_tokens: 512,
        }
    }
}

impl OracleConfig {
    /// Apply `LLM_API_URL` / `LLM_MODEL` overrides when set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("LLM_API_URL") {
            self.api_url = url;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.model = model;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Top-level configuration file (`duel_tactics.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tactics: TacticsConfig,
    pub oracle: OracleConfig,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DuelError::Config(format!("Failed to parse engine TOML: {}", e)))?;
        config.tactics.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded engine config from {:?}", path);
        Ok(config)
    }
}
