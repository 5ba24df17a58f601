//! Parse advisory replies into structured strategy hints
//!
//! The oracle is asked for a single JSON object, but replies often come
//! wrapped in prose. The object is cut out of the surrounding text and each
//! field is read on its own, so one bad field only loses that field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::config::RuleTableConfig;
use crate::core::error::{DuelError, Result};
use crate::strategy::{MovementIntent, Strategy, StrategySource};

pub const ORACLE_REASONING_PREFIX: &str = "[oracle]";
pub const MISSING_REASONING: &str = "no reasoning provided";

/// Structured advisory reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleReply {
    pub should_shoot: bool,
    pub move_direction: MovementIntent,
    pub should_jump: bool,
    pub aggression: Option<f32>,
    pub reasoning: Option<String>,
}

impl OracleReply {
    /// Parse a raw oracle reply, tolerating surrounding text
    pub fn parse(response: &str) -> Result<Self> {
        let json_str = extract_json(response)?;
        let value: Value = serde_json::from_str(json_str).map_err(|e| {
            DuelError::AdvisoryMalformed(format!(
                "Failed to parse reply: {} - Response: {}",
                e, response
            ))
        })?;
        let object = value.as_object().ok_or_else(|| {
            DuelError::AdvisoryMalformed("Reply is not a JSON object".into())
        })?;

        Ok(Self {
            should_shoot: object
                .get("should_shoot")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            move_direction: object
                .get("move_direction")
                .and_then(Value::as_str)
                .map(MovementIntent::from_hint)
                .unwrap_or(MovementIntent::Stay),
            should_jump: object
                .get("should_jump")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            aggression: object
                .get("aggression")
                .and_then(Value::as_f64)
                .map(|a| a as f32),
            reasoning: object
                .get("reasoning")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Map the reply onto a strategy
    ///
    /// The directional hint is passed through untouched; the synthesizer
    /// decides what it means relative to the opponent.
    pub fn into_strategy(self, rules: &RuleTableConfig) -> Strategy {
        let jump_likelihood = if self.should_jump {
            rules.oracle_jump_likelihood
        } else {
            rules.oracle_no_jump_likelihood
        };
        let reasoning = self.reasoning.unwrap_or_else(|| MISSING_REASONING.to_string());

        Strategy {
            aggression: self.aggression.unwrap_or(rules.oracle_default_aggression),
            movement: self.move_direction,
            jump_likelihood: Some(jump_likelihood),
            reasoning: Some(format!("{} {}", ORACLE_REASONING_PREFIX, reasoning)),
            source: StrategySource::Oracle,
        }
    }
}

/// Extract JSON object from LLM response (handles surrounding text)
///
/// Scans each opening brace in turn and returns the first slice that
/// decodes as a complete JSON object. Braces in the prose before or after
/// the object are skipped.
pub fn extract_json(response: &str) -> Result<&str> {
    for (start, _) in response.match_indices('{') {
        let candidate = &response[start..];
        let mut values = serde_json::Deserializer::from_str(candidate).into_iter::<Value>();
        if let Some(Ok(Value::Object(_))) = values.next() {
            return Ok(&candidate[..values.byte_offset()]);
        }
    }
    Err(DuelError::AdvisoryMalformed(format!(
        "No JSON object found in response: {}",
        response
    )))
}
