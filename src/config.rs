use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    get_tier_speed, BONUS_DURATION_MS, DEATH_DELAY_MS, LIFE_THRESHOLD, MEDIUM_SPEED,
    PREY_DURATION_MS, REFERENCE_TICK_MS, STARTING_LIVES, TICK_MS,
};
use crate::error::ConfigError;
use crate::types::Difficulty;

/// Session-wide settings handed to every component at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    #[serde(rename = "tickMs")]
    pub tick_ms: u64,
    #[serde(rename = "startingLives")]
    pub starting_lives: u32,
    #[serde(rename = "bonusDurationMs")]
    pub bonus_duration_ms: u64,
    #[serde(rename = "preyDurationMs")]
    pub prey_duration_ms: u64,
    #[serde(rename = "deathDelayMs")]
    pub death_delay_ms: u64,
    #[serde(rename = "lifeThreshold")]
    pub life_threshold: u64,
    #[serde(rename = "soundsEnabled")]
    pub sounds_enabled: bool,
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            tick_ms: TICK_MS,
            starting_lives: STARTING_LIVES,
            bonus_duration_ms: BONUS_DURATION_MS,
            prey_duration_ms: PREY_DURATION_MS,
            death_delay_ms: DEATH_DELAY_MS,
            life_threshold: LIFE_THRESHOLD,
            sounds_enabled: true,
            seed: 0,
        }
    }
}

impl SessionConfig {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn tier_speed(&self) -> f64 {
        get_tier_speed(self.difficulty)
    }

    /// Timer scale for the starting tier, relative to medium speed.
    pub fn duration_ratio(&self) -> f64 {
        MEDIUM_SPEED / self.tier_speed()
    }

    /// Motion step per tick, in units of the 25 ms reference tick.
    pub fn dt(&self) -> f64 {
        self.tick_ms.max(1) as f64 / REFERENCE_TICK_MS
    }

    /// Splits one tick of motion into equal sub-steps no longer than a
    /// reference tick, so a character at `MAX_SPEED` moves at most half a cell
    /// between wall and center checks.
    pub fn motion_substeps(&self) -> (u32, f64) {
        let dt = self.dt();
        let count = dt.ceil().max(1.0);
        (count as u32, dt / count)
    }

    pub fn ticks_for(&self, ms: u64) -> u64 {
        let tick_ms = self.tick_ms.max(1);
        ms.div_ceil(tick_ms).max(1)
    }
}
