//! Situation classification: raw duel geometry to tactical tags

pub mod classifier;
pub mod tags;

pub use classifier::classify;
pub use tags::{TacticalTag, TacticalTags};
