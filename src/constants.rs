use crate::types::Difficulty;

pub const TICK_RATE: u32 = 40;
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;
pub const REFERENCE_TICK_MS: f64 = 25.0;

pub const CELL_SIZE: f64 = 20.0;
pub const GHOST_COUNT: usize = 4;
pub const HIT_BOX: f64 = CELL_SIZE * 0.8;
pub const CENTER_EPSILON: f64 = 1e-6;

pub const LOW_SPEED: f64 = 3.75;
pub const MEDIUM_SPEED: f64 = 4.5;
pub const HIGH_SPEED: f64 = 5.25;
pub const MAX_SPEED: f64 = CELL_SIZE / 2.0;
pub const LEVEL_SPEED_INCREASE: f64 = 0.05;

pub const PILL_POINTS: u64 = 10;
pub const ENERGIZER_POINTS: u64 = 50;
pub const GHOST_BASE_POINTS: u64 = 200;
pub const BONUS_POINTS_PER_LEVEL: u64 = 100;
pub const LIFE_THRESHOLD: u64 = 10_000;

pub const STARTING_LIVES: u32 = 3;
pub const BONUS_DURATION_MS: u64 = 7_000;
pub const PREY_DURATION_MS: u64 = 10_000;
pub const DEATH_DELAY_MS: u64 = 2_500;

pub fn get_tier_speed(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => LOW_SPEED,
        Difficulty::Medium => MEDIUM_SPEED,
        Difficulty::Hard => HIGH_SPEED,
    }
}

pub fn get_bonus_points(level: u32) -> u64 {
    level as u64 * BONUS_POINTS_PER_LEVEL
}
