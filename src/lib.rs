//! Duel Tactics - per-tick opponent decisions for a 2D duel
//!
//! Pipeline: `GameState -> TacticalTags -> Strategy -> AIDecision`

pub mod core;
pub mod decision;
pub mod llm;
pub mod scenario;
pub mod strategy;
pub mod tactics;

pub use crate::core::{Difficulty, DuelError, EngineConfig, GameState, Result, TacticsConfig, Vec2, Wall};
pub use crate::decision::{AIDecision, DecisionEngine, DifficultyProfile, MoveDirection, Synthesizer};
pub use crate::strategy::{MovementIntent, RuleTable, Strategy, StrategyAdvisor, StrategyResolver, StrategySource};
pub use crate::tactics::{classify, TacticalTag, TacticalTags};
