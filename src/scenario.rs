//! Random duel scenarios for simulation runs and property tests

use rand::Rng;

use crate::core::types::{Difficulty, GameState, Vec2, Wall};

pub const ARENA_WIDTH: f32 = 400.0;
pub const ARENA_HEIGHT: f32 = 300.0;
const MAX_WALLS: usize = 3;

/// Generate a valid random game state for the given tier
pub fn random_state<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> GameState {
    let position = random_point(rng);
    let opponent_position = random_point(rng);

    let wall_count = rng.gen_range(0..=MAX_WALLS);
    let walls = (0..wall_count)
        .map(|_| {
            let width = rng.gen_range(10.0..80.0);
            let height = rng.gen_range(10.0..80.0);
            Wall::new(
                rng.gen_range(0.0..ARENA_WIDTH - width),
                rng.gen_range(0.0..ARENA_HEIGHT - height),
                width,
                height,
            )
        })
        .collect();

    let countdown_active = rng.gen_bool(0.1);

    GameState {
        position,
        opponent_position,
        game_time: rng.gen_range(0.0..120.0),
        countdown_active,
        can_shoot: !countdown_active && rng.gen_bool(0.8),
        difficulty,
        walls,
        opponent_velocity: Vec2::new(rng.gen_range(-4.0..4.0), rng.gen_range(-6.0..6.0)),
        opponent_grounded: rng.gen_bool(0.7),
    }
}

fn random_point<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.gen_range(0.0..ARENA_WIDTH), rng.gen_range(0.0..ARENA_HEIGHT))
}
