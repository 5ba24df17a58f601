//! Final decision synthesis and the end-to-end decision engine

pub mod engine;
pub mod profile;
pub mod synthesizer;

pub use engine::DecisionEngine;
pub use profile::DifficultyProfile;
pub use synthesizer::Synthesizer;

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

/// Horizontal movement for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Left,
    Right,
    None,
}

impl MoveDirection {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }

    /// Unit sign along the x axis
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
            Self::None => 0.0,
        }
    }
}

/// The AI's action for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIDecision {
    pub should_shoot: bool,
    pub should_jump: bool,
    pub move_direction: MoveDirection,
    pub reaction_time_ms: u32,
    pub movement: Vec2,
    /// Always within [0.1, 1.5] under the default tuning
    pub accuracy_modifier: f32,
    /// Always within [0.1, 0.9] under the default tuning
    pub confidence: f32,
    pub reasoning: String,
}
