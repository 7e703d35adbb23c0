//! # Maze Chase Engine
//!
//! Tick-driven simulation core for a single-player maze chase: one player
//! eats pills in a grid maze while four ghosts hunt it.
//!
//! ## Layout
//!
//! ```text
//! constants.rs   - tick rate, geometry, speed tiers, point values
//! types.rs       - directions, states, commands, events, snapshot views
//! config.rs      - SessionConfig (difficulty, timers, seed)
//! error.rs       - MazeError, ConfigError
//! maze.rs        - cell grid, element bookkeeping, corridor queries
//! layout.rs      - tile-text parser and the built-in layout
//! character.rs   - shared motion model
//! player.rs      - buffered turns, wall stops
//! ghost.rs       - hunter / prey / eaten behaviour
//! bonus.rs       - timed bonus item
//! events.rs      - listener trait and event buffer
//! autopilot.rs   - scripted player for simulations
//! engine/        - session orchestrator
//! ├── mod.rs       - GameEngine, step, commands, pause state
//! ├── collision.rs - element, bonus and ghost contact
//! ├── scoring.rs   - points, extra lives, energizers, bonus trigger
//! ├── lifecycle.rs - death, level transitions, timer callbacks
//! └── scheduler.rs - tick-based one-shot timers
//! ```
//!
//! Given the same layout, [`SessionConfig`] (including its seed) and command
//! sequence, a session replays identically.

#![deny(unsafe_code)]

pub mod autopilot;
pub mod bonus;
pub mod character;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod ghost;
pub mod layout;
pub mod maze;
pub mod player;
pub mod types;

pub use autopilot::Autopilot;
pub use config::SessionConfig;
pub use engine::GameEngine;
pub use error::{ConfigError, MazeError};
pub use events::GameListener;
pub use layout::{default_layout, parse_layout, MazeLayout};
pub use maze::Maze;
pub use types::{
    Command, Difficulty, Direction, ElementKind, GameEvent, GameSummary, GhostState, RunState,
    Snapshot, SoundEffect,
};
