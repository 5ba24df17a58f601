//! Build advisory prompts from a classified situation
//!
//! The oracle sees a prose summary of the tactical tags, the difficulty
//! tier and whatever free-form context the caller supplied.

use crate::core::types::Difficulty;
use crate::tactics::TacticalTags;

/// Situation summary for advisory prompts
pub struct AdvisoryContext<'a> {
    pub tags: &'a TacticalTags,
    pub tier: Difficulty,
    /// Free-form notes from the caller (match phase, player habits, ...)
    pub notes: &'a str,
}

impl<'a> AdvisoryContext<'a> {
    pub fn new(tags: &'a TacticalTags, tier: Difficulty, notes: &'a str) -> Self {
        Self { tags, tier, notes }
    }

    /// Generate a text summary of the context for LLM prompts
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(&format!("Situation: {}\n", self.tags.describe()));
        s.push_str(&format!("Tags: {}\n", self.tags));
        s.push_str(&format!("Difficulty: {}\n", self.tier));

        let notes = self.notes.trim();
        if !notes.is_empty() {
            s.push_str(&format!("\nAdditional context:\n{}\n", notes));
        }

        s
    }

    /// Full user message sent to the oracle
    pub fn user_prompt(&self) -> String {
        format!(
            "CONTEXT:\n{}\nDecide this tick's action as JSON:",
            self.summary()
        )
    }
}

/// System prompt for advisory calls
pub const ADVISORY_SYSTEM_PROMPT: &str = r#"You are the tactical brain of an AI gunslinger in a 2D side-view duel.
Each tick you receive a summary of the situation and decide one action.

Difficulty shapes your temperament:
- easy: hesitant, misses chances, rarely presses
- medium: balanced
- hard: relentless, exploits every opening

OUTPUT FORMAT (JSON only, no explanation):
{
  "should_shoot": true|false,
  "move_direction": "left|right|stay",
  "should_jump": true|false,
  "aggression": 0.0-1.0,
  "reasoning": "one short sentence"
}

Examples:
close range, opponent moving -> {"should_shoot": true, "move_direction": "stay", "should_jump": true, "aggression": 0.8, "reasoning": "point blank, dodge and fire"}
long range, opponent behind cover -> {"should_shoot": false, "move_direction": "left", "should_jump": false, "aggression": 0.4, "reasoning": "close the gap while he hides"}
"#;
