//! Decision engine: classify, resolve, synthesize
//!
//! Stateless between calls; one engine can serve any number of concurrent
//! callers as long as each brings its own random generator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::{EngineConfig, TacticsConfig};
use crate::core::types::GameState;
use crate::decision::{AIDecision, DifficultyProfile, Synthesizer};
use crate::llm::LlmOracle;
use crate::strategy::{RuleTable, Strategy, StrategyAdvisor, StrategyResolver};
use crate::tactics::{classify, TacticalTags};

pub struct DecisionEngine<A> {
    config: TacticsConfig,
    resolver: StrategyResolver<A>,
}

impl DecisionEngine<RuleTable> {
    /// Engine that only ever uses the rule table
    ///
    /// The table is used as given. An inconsistent table is reported with a
    /// warning; the synthesizer still orders inverted bounds instead of
    /// panicking on them.
    pub fn offline(config: TacticsConfig) -> Self {
        warn_if_invalid(&config);
        let fallback = RuleTable::from_config(&config);
        Self {
            config,
            resolver: StrategyResolver::without_oracle(fallback),
        }
    }
}

impl DecisionEngine<LlmOracle> {
    /// Engine backed by the LLM oracle when enabled and an API key is present
    pub fn from_config(config: &EngineConfig) -> Self {
        let tactics = config.tactics.clone();
        let fallback = RuleTable::from_config(&tactics);

        if !config.oracle.enabled {
            tracing::info!("advisory oracle disabled by configuration");
            return Self {
                config: tactics,
                resolver: StrategyResolver::without_oracle(fallback),
            };
        }

        match LlmOracle::from_config(&config.oracle, tactics.rules.clone()) {
            Ok(oracle) => Self {
                resolver: StrategyResolver::new(oracle, fallback, config.oracle.timeout()),
                config: tactics,
            },
            Err(e) => {
                tracing::warn!("{} - running on the rule table only", e);
                Self {
                    config: tactics,
                    resolver: StrategyResolver::without_oracle(fallback),
                }
            }
        }
    }
}

impl<A: StrategyAdvisor> DecisionEngine<A> {
    /// Engine that consults `oracle` for at most `timeout` per decision
    ///
    /// Same table handling as [`DecisionEngine::offline`].
    pub fn with_oracle(config: TacticsConfig, oracle: A, timeout: std::time::Duration) -> Self {
        warn_if_invalid(&config);
        let fallback = RuleTable::from_config(&config);
        Self {
            config,
            resolver: StrategyResolver::new(oracle, fallback, timeout),
        }
    }

    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }

    pub fn has_oracle(&self) -> bool {
        self.resolver.has_oracle()
    }

    pub fn classify(&self, state: &GameState) -> TacticalTags {
        classify(state, &self.config.ranges)
    }

    /// Full pipeline, consulting the oracle when one is configured
    pub async fn decide<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        context: &str,
        rng: &mut R,
    ) -> AIDecision {
        let tags = self.classify(state);
        let strategy = self.resolver.resolve(&tags, state.difficulty, context).await;
        self.finish(&strategy, state, &tags, rng)
    }

    /// Full pipeline with a ChaCha stream seeded from `seed`
    pub async fn decide_seeded(&self, state: &GameState, context: &str, seed: u64) -> AIDecision {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.decide(state, context, &mut rng).await
    }

    /// Synchronous pipeline that skips the oracle entirely
    pub fn decide_offline<R: Rng + ?Sized>(&self, state: &GameState, rng: &mut R) -> AIDecision {
        let tags = self.classify(state);
        let strategy = self.resolver.resolve_fallback(&tags, state.difficulty);
        self.finish(&strategy, state, &tags, rng)
    }

    fn finish<R: Rng + ?Sized>(
        &self,
        strategy: &Strategy,
        state: &GameState,
        tags: &TacticalTags,
        rng: &mut R,
    ) -> AIDecision {
        let profile = DifficultyProfile::lookup(&self.config.tiers, state.difficulty);
        let decision = Synthesizer::new(&self.config).synthesize(strategy, state, &profile, tags, rng);

        tracing::debug!(
            %tags,
            source = strategy.source.as_str(),
            shoot = decision.should_shoot,
            jump = decision.should_jump,
            direction = ?decision.move_direction,
            accuracy = decision.accuracy_modifier,
            confidence = decision.confidence,
            "decision synthesized"
        );

        decision
    }
}

fn warn_if_invalid(config: &TacticsConfig) {
    if let Err(e) = config.validate() {
        tracing::warn!("{} - using the tuning table as given", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OracleConfig;
    use crate::core::types::{Difficulty, Vec2};

    #[tokio::test]
    async fn test_offline_engine_matches_sync_path() {
        let engine = DecisionEngine::offline(TacticsConfig::default());
        let state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(250.0, 0.0), Difficulty::Hard);

        let async_decision = engine.decide_seeded(&state, "", 42).await;
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let sync_decision = engine.decide_offline(&state, &mut rng);
        assert_eq!(async_decision, sync_decision);
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let mut config = TacticsConfig::default();
        config.shooting.reaction_jitter_min = 1.3;
        config.shooting.reaction_jitter_max = 0.8;
        config.accuracy.min = 1.5;
        config.accuracy.max = 0.1;
        config.confidence.min = 0.9;
        config.confidence.max = 0.1;
        assert!(config.validate().is_err());

        let engine = DecisionEngine::offline(config);
        let state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(60.0, 0.0), Difficulty::Medium);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let decision = engine.decide_offline(&state, &mut rng);
            assert!(decision.accuracy_modifier >= 0.1 && decision.accuracy_modifier <= 1.5);
            assert!(decision.confidence >= 0.1 && decision.confidence <= 0.9);
            assert!(decision.reaction_time_ms >= 399 && decision.reaction_time_ms <= 650);
        }
    }

    #[test]
    fn test_disabled_oracle_runs_offline() {
        let config = EngineConfig {
            oracle: OracleConfig {
                enabled: false,
                ..OracleConfig::default()
            },
            ..EngineConfig::default()
        };
        let engine = DecisionEngine::from_config(&config);
        assert!(!engine.has_oracle());
    }
}
