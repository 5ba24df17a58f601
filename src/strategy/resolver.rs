//! Strategy resolver: oracle first, rule table on any failure

use std::time::Duration;

use crate::core::types::Difficulty;
use crate::strategy::{RuleTable, Strategy, StrategyAdvisor};
use crate::tactics::TacticalTags;

/// Resolves a strategy; never fails outward
pub struct StrategyResolver<A> {
    oracle: Option<A>,
    fallback: RuleTable,
    timeout: Duration,
}

/// Resolver with no oracle configured
pub type OfflineResolver = StrategyResolver<RuleTable>;

impl<A: StrategyAdvisor> StrategyResolver<A> {
    pub fn new(oracle: A, fallback: RuleTable, timeout: Duration) -> Self {
        Self {
            oracle: Some(oracle),
            fallback,
            timeout,
        }
    }

    pub fn without_oracle(fallback: RuleTable) -> Self {
        Self {
            oracle: None,
            fallback,
            timeout: Duration::ZERO,
        }
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    /// Ask the oracle under a timeout, substituting the rule table on failure
    pub async fn resolve(&self, tags: &TacticalTags, tier: Difficulty, context: &str) -> Strategy {
        let Some(oracle) = &self.oracle else {
            tracing::info!(source = "fallback", %tier, "no advisory oracle configured");
            return self.fallback.strategy_for(tags, tier);
        };

        match tokio::time::timeout(self.timeout, oracle.advise(tags, tier, context)).await {
            Ok(Ok(strategy)) => {
                tracing::info!(source = strategy.source.as_str(), %tier, "strategy resolved");
                strategy
            }
            Ok(Err(e)) => {
                tracing::warn!(source = "fallback", %tier, error = %e, "advisory call failed");
                self.fallback.strategy_for(tags, tier)
            }
            Err(_) => {
                tracing::warn!(
                    source = "fallback",
                    %tier,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "advisory call timed out"
                );
                self.fallback.strategy_for(tags, tier)
            }
        }
    }

    /// Rule-table strategy without touching the oracle
    pub fn resolve_fallback(&self, tags: &TacticalTags, tier: Difficulty) -> Strategy {
        self.fallback.strategy_for(tags, tier)
    }
}
