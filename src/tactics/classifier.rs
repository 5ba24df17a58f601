//! Situation classifier
//!
//! Converts raw positions, walls and opponent motion into tactical tags.
//! Pure function of its inputs.

use crate::core::config::RangeConfig;
use crate::core::types::GameState;
use crate::tactics::tags::{TacticalTag, TacticalTags};

/// Classify the current duel geometry
///
/// Height uses screen coordinates: a smaller y is higher up. Each test is
/// independent, so several tags usually co-occur.
pub fn classify(state: &GameState, ranges: &RangeConfig) -> TacticalTags {
    let mut tags = TacticalTags::new();

    let distance = state.distance();
    if distance < ranges.close_range {
        tags.insert(TacticalTag::CloseRange);
    } else if distance > ranges.far_range {
        tags.insert(TacticalTag::FarRange);
    } else {
        tags.insert(TacticalTag::MediumRange);
    }

    // Positive when the opponent sits higher on screen than we do
    let rise = state.position.y - state.opponent_position.y;
    if rise > ranges.height_deadband {
        tags.insert(TacticalTag::HighGroundAdvantage);
    } else if rise < -ranges.height_deadband {
        tags.insert(TacticalTag::LowGroundDisadvantage);
    }

    if state.walls.iter().any(|w| w.contains(state.opponent_position)) {
        tags.insert(TacticalTag::BehindCover);
    }

    if state.opponent_velocity.x.abs() > ranges.moving_speed {
        tags.insert(TacticalTag::TargetMoving);
    }

    if !state.opponent_grounded {
        tags.insert(TacticalTag::TargetAirborne);
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Difficulty, Vec2, Wall};

    fn state_at(opponent: Vec2) -> GameState {
        GameState::new(Vec2::new(0.0, 0.0), opponent, Difficulty::Medium)
    }

    #[test]
    fn test_range_bands() {
        let ranges = RangeConfig::default();
        assert!(classify(&state_at(Vec2::new(50.0, 0.0)), &ranges).contains(TacticalTag::CloseRange));
        assert!(classify(&state_at(Vec2::new(100.0, 0.0)), &ranges).contains(TacticalTag::MediumRange));
        assert!(classify(&state_at(Vec2::new(200.0, 0.0)), &ranges).contains(TacticalTag::MediumRange));
        assert!(classify(&state_at(Vec2::new(201.0, 0.0)), &ranges).contains(TacticalTag::FarRange));
    }

    #[test]
    fn test_exactly_one_range_tag() {
        let ranges = RangeConfig::default();
        for x in [0.0, 99.9, 150.0, 250.0] {
            let tags = classify(&state_at(Vec2::new(x, 0.0)), &ranges);
            let count = [TacticalTag::CloseRange, TacticalTag::MediumRange, TacticalTag::FarRange]
                .into_iter()
                .filter(|t| tags.contains(*t))
                .count();
            assert_eq!(count, 1, "distance {} produced {}", x, tags);
        }
    }

    #[test]
    fn test_height_deadband() {
        let ranges = RangeConfig::default();
        let above = classify(&state_at(Vec2::new(0.0, -30.0)), &ranges);
        assert!(above.contains(TacticalTag::HighGroundAdvantage));
        assert!(!above.contains(TacticalTag::LowGroundDisadvantage));

        let below = classify(&state_at(Vec2::new(0.0, 30.0)), &ranges);
        assert!(below.contains(TacticalTag::LowGroundDisadvantage));

        let level = classify(&state_at(Vec2::new(0.0, -20.0)), &ranges);
        assert!(!level.contains(TacticalTag::HighGroundAdvantage));
        assert!(!level.contains(TacticalTag::LowGroundDisadvantage));
    }

    #[test]
    fn test_cover_and_close_range_co_occur() {
        let ranges = RangeConfig::default();
        let mut state = state_at(Vec2::new(40.0, 0.0));
        state.walls.push(Wall::new(30.0, -10.0, 20.0, 20.0));
        let tags = classify(&state, &ranges);
        assert!(tags.contains(TacticalTag::BehindCover));
        assert!(tags.contains(TacticalTag::CloseRange));
    }

    #[test]
    fn test_degenerate_walls_never_cover() {
        let ranges = RangeConfig::default();
        let mut state = state_at(Vec2::new(40.0, 0.0));
        state.walls.push(Wall::new(50.0, 10.0, -20.0, -20.0));
        state.walls.push(Wall::new(30.0, -10.0, 0.0, 20.0));
        assert!(!classify(&state, &ranges).contains(TacticalTag::BehindCover));
    }

    #[test]
    fn test_motion_tags() {
        let ranges = RangeConfig::default();
        let mut state = state_at(Vec2::new(150.0, 0.0));
        state.opponent_velocity = Vec2::new(-1.5, 0.0);
        state.opponent_grounded = false;
        let tags = classify(&state, &ranges);
        assert!(tags.contains(TacticalTag::TargetMoving));
        assert!(tags.contains(TacticalTag::TargetAirborne));

        state.opponent_velocity = Vec2::new(1.0, 8.0);
        state.opponent_grounded = true;
        let tags = classify(&state, &ranges);
        assert!(!tags.contains(TacticalTag::TargetMoving));
        assert!(!tags.contains(TacticalTag::TargetAirborne));
    }

    #[test]
    fn test_classify_is_repeatable() {
        let ranges = RangeConfig::default();
        let mut state = state_at(Vec2::new(120.0, -25.0));
        state.walls.push(Wall::new(100.0, -40.0, 50.0, 30.0));
        state.opponent_velocity = Vec2::new(3.0, 0.0);
        assert_eq!(classify(&state, &ranges), classify(&state, &ranges));
    }
}
