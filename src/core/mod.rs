pub mod config;
pub mod error;
pub mod types;

pub use config::{EngineConfig, OracleConfig, TacticsConfig, TierConfig};
pub use error::{DuelError, Result};
pub use types::{Difficulty, GameState, Vec2, Wall};
