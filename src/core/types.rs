//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

use crate::core::error::{DuelError, Result};

/// 2D position or velocity in arena units (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Axis-aligned wall obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Wall {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Open-interval containment: points on the edge are not inside.
    ///
    /// Walls with a non-positive width or height contain nothing.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x
            && point.x < self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }
}

/// Difficulty tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Strict parse, case-insensitive and whitespace-tolerant
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(DuelError::InvalidDifficulty(name.to_string())),
        }
    }

    /// Lenient parse: unrecognized tiers become `Medium`
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|e| {
            tracing::debug!("{}; coercing to medium", e);
            Self::Medium
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Difficulty {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Difficulty> for String {
    fn from(tier: Difficulty) -> Self {
        tier.as_str().to_string()
    }
}

/// Snapshot of the duel as seen by the AI for a single tick
///
/// `position` is the AI-controlled actor; `opponent_position` is the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub position: Vec2,
    pub opponent_position: Vec2,
    /// Elapsed game time in seconds
    #[serde(default)]
    pub game_time: f32,
    #[serde(default)]
    pub countdown_active: bool,
    #[serde(default)]
    pub can_shoot: bool,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub opponent_velocity: Vec2,
    #[serde(default = "default_grounded")]
    pub opponent_grounded: bool,
}

fn default_grounded() -> bool {
    true
}

impl GameState {
    /// Open-field state: firing allowed, no walls, opponent standing still
    pub fn new(position: Vec2, opponent_position: Vec2, difficulty: Difficulty) -> Self {
        Self {
            position,
            opponent_position,
            game_time: 0.0,
            countdown_active: false,
            can_shoot: true,
            difficulty,
            walls: Vec::new(),
            opponent_velocity: Vec2::default(),
            opponent_grounded: true,
        }
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(&self.opponent_position)
    }

    /// Firing needs both the permission flag and a finished countdown
    pub fn firing_allowed(&self) -> bool {
        self.can_shoot && !self.countdown_active
    }
}
