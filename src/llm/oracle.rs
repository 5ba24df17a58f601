//! LLM-backed strategic oracle

use crate::core::config::{OracleConfig, RuleTableConfig};
use crate::core::error::Result;
use crate::core::types::Difficulty;
use crate::llm::client::LlmClient;
use crate::llm::context::{AdvisoryContext, ADVISORY_SYSTEM_PROMPT};
use crate::llm::parser::OracleReply;
use crate::strategy::{Strategy, StrategyAdvisor};
use crate::tactics::TacticalTags;

pub struct LlmOracle {
    client: LlmClient,
    rules: RuleTableConfig,
}

impl LlmOracle {
    pub fn new(client: LlmClient, rules: RuleTableConfig) -> Self {
        Self { client, rules }
    }

    /// Build an oracle from config; fails when no API key is available
    pub fn from_config(config: &OracleConfig, rules: RuleTableConfig) -> Result<Self> {
        Ok(Self::new(LlmClient::from_config(config)?, rules))
    }
}

impl StrategyAdvisor for LlmOracle {
    async fn advise(&self, tags: &TacticalTags, tier: Difficulty, context: &str) -> Result<Strategy> {
        let prompt = AdvisoryContext::new(tags, tier, context).user_prompt();
        let response = self.client.complete(ADVISORY_SYSTEM_PROMPT, &prompt).await?;
        let reply = OracleReply::parse(&response)?;

        tracing::debug!(
            should_shoot = reply.should_shoot,
            move_direction = ?reply.move_direction,
            should_jump = reply.should_jump,
            "oracle reply"
        );

        Ok(reply.into_strategy(&self.rules))
    }
}
