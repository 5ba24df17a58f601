//! Decision synthesizer
//!
//! Combines a resolved strategy, the tier profile and tag-driven adjustments
//! into the final per-tick decision. All randomness comes from the caller's
//! generator, so a fixed seed replays exactly.
//!
//! Draw order: reaction jitter, shoot draw (both only when firing is
//! allowed), then the jump draw.

use rand::Rng;

use crate::core::config::TacticsConfig;
use crate::core::types::{GameState, Vec2};
use crate::decision::{AIDecision, DifficultyProfile, MoveDirection};
use crate::strategy::{MovementIntent, Strategy};
use crate::tactics::{TacticalTag, TacticalTags};

pub const DEFAULT_REASONING: &str = "no strategic guidance; acting on instinct";

pub struct Synthesizer<'a> {
    config: &'a TacticsConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(config: &'a TacticsConfig) -> Self {
        Self { config }
    }

    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        strategy: &Strategy,
        state: &GameState,
        profile: &DifficultyProfile,
        tags: &TacticalTags,
        rng: &mut R,
    ) -> AIDecision {
        let aggression = strategy.aggression.clamp(0.0, 1.0);
        let distance = state.distance();

        let (should_shoot, reaction_time_ms) = if state.firing_allowed() {
            let shooting = &self.config.shooting;
            let (low, high) = ordered(shooting.reaction_jitter_min, shooting.reaction_jitter_max);
            let jitter = rng.gen_range(low..=high);
            let reaction = (profile.reaction_time_ms as f32 * jitter) as u32;
            let probability = self.shoot_probability(aggression, tags);
            (rng.gen::<f32>() < probability, reaction.max(1))
        } else {
            (false, profile.reaction_time_ms.max(1))
        };

        let (move_direction, speed) = self.plan_movement(strategy.movement, state, distance, profile);
        let movement = Vec2::new(move_direction.sign(), 0.0) * speed;

        let jump_likelihood = strategy
            .jump_likelihood
            .unwrap_or(self.config.movement.default_jump_likelihood);
        let mut should_jump = rng.gen::<f32>() < jump_likelihood;
        // Motion and height tags only confirm a jump the draw already triggered
        if should_jump
            && (tags.contains(TacticalTag::TargetMoving)
                || tags.contains(TacticalTag::LowGroundDisadvantage))
        {
            should_jump = true;
        }

        let accuracy_modifier = self.accuracy_modifier(distance, tags, movement.x != 0.0, profile);
        let confidence = self.confidence(aggression, accuracy_modifier);

        AIDecision {
            should_shoot,
            should_jump,
            move_direction,
            reaction_time_ms,
            movement,
            accuracy_modifier,
            confidence,
            reasoning: strategy
                .reasoning
                .clone()
                .unwrap_or_else(|| DEFAULT_REASONING.to_string()),
        }
    }

    /// Shoot probability after tag adjustments, clamped to [0, 1]
    pub fn shoot_probability(&self, aggression: f32, tags: &TacticalTags) -> f32 {
        let shooting = &self.config.shooting;
        let mut probability = aggression.clamp(0.0, 1.0);
        if tags.contains(TacticalTag::CloseRange) {
            probability += shooting.close_range_bonus;
        }
        if tags.contains(TacticalTag::HighGroundAdvantage) {
            probability += shooting.high_ground_bonus;
        }
        if tags.contains(TacticalTag::BehindCover) {
            probability -= shooting.cover_penalty;
        }
        probability.clamp(0.0, 1.0)
    }

    /// Direction and horizontal speed for the strategy's movement intent
    ///
    /// `forward` points right when the opponent is left of us and left
    /// otherwise, matching the game client's axis convention.
    pub fn plan_movement(
        &self,
        intent: MovementIntent,
        state: &GameState,
        distance: f32,
        profile: &DifficultyProfile,
    ) -> (MoveDirection, f32) {
        let forward = if state.opponent_position.x < state.position.x {
            MoveDirection::Right
        } else {
            MoveDirection::Left
        };
        let movement = &self.config.movement;
        let tactical_speed = profile.movement_speed * movement.tactical_speed_factor;

        match intent {
            MovementIntent::Forward => (forward, profile.movement_speed),
            MovementIntent::Back => (forward.opposite(), profile.movement_speed),
            MovementIntent::Tactical if distance > movement.tactical_advance_distance => {
                (forward, tactical_speed)
            }
            MovementIntent::Tactical if distance < movement.tactical_retreat_distance => {
                (forward.opposite(), tactical_speed)
            }
            MovementIntent::Left => (MoveDirection::Left, profile.movement_speed),
            MovementIntent::Right => (MoveDirection::Right, profile.movement_speed),
            MovementIntent::Tactical | MovementIntent::Stay => (MoveDirection::None, 0.0),
        }
    }

    /// Multiplicative accuracy adjustment, clamped to the configured bounds
    pub fn accuracy_modifier(
        &self,
        distance: f32,
        tags: &TacticalTags,
        moving: bool,
        profile: &DifficultyProfile,
    ) -> f32 {
        let accuracy = &self.config.accuracy;
        let mut modifier = profile.accuracy;

        if distance > accuracy.long_shot_distance {
            modifier *= accuracy.long_shot_multiplier;
        } else if distance <= accuracy.point_blank_distance {
            modifier *= accuracy.point_blank_multiplier;
        }

        if tags.contains(TacticalTag::HighGroundAdvantage) {
            modifier *= accuracy.high_ground_multiplier;
        }
        if tags.contains(TacticalTag::LowGroundDisadvantage) {
            modifier *= accuracy.low_ground_multiplier;
        }
        if moving {
            modifier *= accuracy.moving_multiplier;
        }
        if tags.contains(TacticalTag::BehindCover) {
            modifier *= accuracy.cover_multiplier;
        }

        bounded(modifier, accuracy.min, accuracy.max)
    }

    pub fn confidence(&self, aggression: f32, accuracy_modifier: f32) -> f32 {
        let confidence = &self.config.confidence;
        let blended = confidence.aggression_weight * aggression.clamp(0.0, 1.0)
            + confidence.accuracy_weight * accuracy_modifier;
        bounded(blended, confidence.min, confidence.max)
    }
}

/// Clamp that tolerates inverted bounds from an unvalidated table
fn bounded(value: f32, min: f32, max: f32) -> f32 {
    let (low, high) = ordered(min, max);
    value.max(low).min(high)
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Difficulty, Wall};
    use crate::strategy::StrategySource;
    use crate::tactics::classify;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn strategy(aggression: f32, movement: MovementIntent, jump: Option<f32>) -> Strategy {
        Strategy {
            aggression,
            movement,
            jump_likelihood: jump,
            reasoning: None,
            source: StrategySource::Fallback,
        }
    }

    fn medium() -> DifficultyProfile {
        DifficultyProfile::lookup(&TacticsConfig::default().tiers, Difficulty::Medium)
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(120.0, 0.0), Difficulty::Medium);
        let tags = classify(&state, &config.ranges);
        let plan = strategy(0.5, MovementIntent::Tactical, Some(0.5));

        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                synth.synthesize(&plan, &state, &medium(), &tags, &mut a),
                synth.synthesize(&plan, &state, &medium(), &tags, &mut b)
            );
        }
    }

    #[test]
    fn test_no_fire_permission_means_baseline_reaction() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let mut state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), Difficulty::Medium);
        state.can_shoot = false;
        let tags = classify(&state, &config.ranges);
        let plan = strategy(1.0, MovementIntent::Stay, None);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..50 {
            let decision = synth.synthesize(&plan, &state, &medium(), &tags, &mut rng);
            assert!(!decision.should_shoot);
            assert_eq!(decision.reaction_time_ms, 500);
        }
    }

    #[test]
    fn test_countdown_blocks_shooting() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let mut state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), Difficulty::Hard);
        state.countdown_active = true;
        let tags = classify(&state, &config.ranges);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let decision = synth.synthesize(
            &strategy(1.0, MovementIntent::Stay, None),
            &state,
            &medium(),
            &tags,
            &mut rng,
        );
        assert!(!decision.should_shoot);
    }

    #[test]
    fn test_reaction_jitter_range() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(150.0, 0.0), Difficulty::Medium);
        let tags = classify(&state, &config.ranges);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let decision = synth.synthesize(
                &strategy(0.5, MovementIntent::Stay, None),
                &state,
                &medium(),
                &tags,
                &mut rng,
            );
            assert!(decision.reaction_time_ms >= 399);
            assert!(decision.reaction_time_ms <= 650);
        }
    }

    #[test]
    fn test_shoot_probability_is_clamped() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let hot: TacticalTags = [TacticalTag::CloseRange, TacticalTag::HighGroundAdvantage]
            .into_iter()
            .collect();
        assert_eq!(synth.shoot_probability(1.4, &hot), 1.0);

        let covered: TacticalTags = [TacticalTag::BehindCover].into_iter().collect();
        assert_eq!(synth.shoot_probability(0.1, &covered), 0.0);
        assert!((synth.shoot_probability(0.5, &covered) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_certain_shot_and_jump() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(30.0, 0.0), Difficulty::Medium);
        let tags = classify(&state, &config.ranges);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            let decision = synth.synthesize(
                &strategy(0.9, MovementIntent::Stay, Some(1.0)),
                &state,
                &medium(),
                &tags,
                &mut rng,
            );
            assert!(decision.should_shoot);
            assert!(decision.should_jump);
        }
    }

    #[test]
    fn test_tags_do_not_force_jump() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let mut state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(120.0, 40.0), Difficulty::Medium);
        state.opponent_velocity = Vec2::new(5.0, 0.0);
        let tags = classify(&state, &config.ranges);
        assert!(tags.contains(TacticalTag::TargetMoving));
        assert!(tags.contains(TacticalTag::LowGroundDisadvantage));

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let decision = synth.synthesize(
                &strategy(0.5, MovementIntent::Stay, Some(0.0)),
                &state,
                &medium(),
                &tags,
                &mut rng,
            );
            assert!(!decision.should_jump);
        }
    }

    #[test]
    fn test_forward_and_back_directions() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let profile = medium();

        let opponent_left = GameState::new(Vec2::new(200.0, 0.0), Vec2::new(0.0, 0.0), Difficulty::Medium);
        let (dir, speed) = synth.plan_movement(MovementIntent::Forward, &opponent_left, 200.0, &profile);
        assert_eq!(dir, MoveDirection::Right);
        assert_eq!(speed, 3.0);
        let (dir, _) = synth.plan_movement(MovementIntent::Back, &opponent_left, 200.0, &profile);
        assert_eq!(dir, MoveDirection::Left);

        let opponent_right = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0), Difficulty::Medium);
        let (dir, _) = synth.plan_movement(MovementIntent::Forward, &opponent_right, 200.0, &profile);
        assert_eq!(dir, MoveDirection::Left);
    }

    #[test]
    fn test_tactical_movement_bands() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let profile = medium();
        let state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0), Difficulty::Medium);

        let (dir, speed) = synth.plan_movement(MovementIntent::Tactical, &state, 160.0, &profile);
        assert_eq!(dir, MoveDirection::Left);
        assert_eq!(speed, 1.5);

        let (dir, speed) = synth.plan_movement(MovementIntent::Tactical, &state, 60.0, &profile);
        assert_eq!(dir, MoveDirection::Right);
        assert_eq!(speed, 1.5);

        let (dir, speed) = synth.plan_movement(MovementIntent::Tactical, &state, 100.0, &profile);
        assert_eq!(dir, MoveDirection::None);
        assert_eq!(speed, 0.0);

        let (dir, speed) = synth.plan_movement(MovementIntent::Stay, &state, 300.0, &profile);
        assert_eq!(dir, MoveDirection::None);
        assert_eq!(speed, 0.0);
    }

    #[test]
    fn test_oracle_hints_move_directly() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0), Difficulty::Medium);
        let (dir, speed) = synth.plan_movement(MovementIntent::Right, &state, 200.0, &medium());
        assert_eq!(dir, MoveDirection::Right);
        assert_eq!(speed, 3.0);
    }

    #[test]
    fn test_accuracy_multipliers() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let profile = medium();
        let none = TacticalTags::new();

        assert!((synth.accuracy_modifier(100.0, &none, false, &profile) - 0.7).abs() < 1e-6);
        assert!((synth.accuracy_modifier(200.0, &none, false, &profile) - 0.49).abs() < 1e-6);
        assert!((synth.accuracy_modifier(50.0, &none, false, &profile) - 0.91).abs() < 1e-6);
        assert!((synth.accuracy_modifier(100.0, &none, true, &profile) - 0.63).abs() < 1e-6);

        let covered: TacticalTags = [TacticalTag::BehindCover].into_iter().collect();
        assert!((synth.accuracy_modifier(100.0, &covered, false, &profile) - 0.42).abs() < 1e-6);

        let high: TacticalTags = [TacticalTag::HighGroundAdvantage].into_iter().collect();
        assert!((synth.accuracy_modifier(100.0, &high, false, &profile) - 0.84).abs() < 1e-6);
    }

    #[test]
    fn test_accuracy_clamped_high() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let sharp = DifficultyProfile { reaction_time_ms: 100, accuracy: 1.4, movement_speed: 1.0 };
        let high: TacticalTags = [TacticalTag::HighGroundAdvantage].into_iter().collect();
        assert_eq!(synth.accuracy_modifier(10.0, &high, false, &sharp), 1.5);
    }

    #[test]
    fn test_confidence_blend_and_bounds() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        assert!((synth.confidence(0.5, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(synth.confidence(1.5, 1.5), 0.9);
        assert_eq!(synth.confidence(-1.0, 0.1), 0.1);
    }

    #[test]
    fn test_reasoning_default() {
        let config = TacticsConfig::default();
        let synth = Synthesizer::new(&config);
        let mut state = GameState::new(Vec2::new(0.0, 0.0), Vec2::new(120.0, 0.0), Difficulty::Medium);
        state.walls.push(Wall::new(500.0, 500.0, 10.0, 10.0));
        let tags = classify(&state, &config.ranges);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let decision = synth.synthesize(
            &strategy(0.5, MovementIntent::Stay, None),
            &state,
            &medium(),
            &tags,
            &mut rng,
        );
        assert_eq!(decision.reasoning, DEFAULT_REASONING);
    }
}
