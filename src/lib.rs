//! Dino Runner - a side-scrolling endless runner core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `config`: Tunables and presets for the simulation
//! - `highscores`: In-memory session leaderboard

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::{ConfigError, Preset, RunnerConfig};
pub use highscores::HighScores;

/// Game configuration constants
///
/// These are the defaults behind `RunnerConfig::default()`. All velocities and
/// accelerations are per tick, so they only hold at `TICK_MS`.
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: f64 = 16.0;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    /// Ground baseline (feet rest here, y grows downward)
    pub const GROUND_Y: f32 = 200.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 60.0;
    pub const PLAYER_WIDTH: f32 = 44.0;
    pub const PLAYER_HEIGHT: f32 = 44.0;

    /// Gravity added to vertical velocity each tick
    pub const GRAVITY: f32 = 0.7;
    /// Launch velocity (negative = upward)
    pub const JUMP_VELOCITY: f32 = -13.5;
    /// Gravity multiplier while crouched (fast fall)
    pub const CROUCH_GRAVITY_MULTIPLIER: f32 = 2.0;
    /// Fraction of standing height kept while crouched
    pub const CROUCH_HEIGHT_FACTOR: f32 = 0.55;

    /// Spawn interval window (ms)
    pub const SPAWN_INTERVAL_MIN_MS: f64 = 1100.0;
    pub const SPAWN_INTERVAL_MAX_MS: f64 = 1900.0;
    /// Interval used before the first spawn of a run
    pub const FIRST_SPAWN_INTERVAL_MS: f64 = 1400.0;
    /// Minimum pixels between an obstacle's trailing edge and the spawn point
    pub const MIN_GAP: f32 = 180.0;

    /// Scroll speed (px/tick)
    pub const BASE_SPEED: f32 = 4.0;
    pub const SPEED_INCREMENT: f32 = 0.4;
    pub const MAX_SPEED: f32 = 12.0;
    /// Points between speed bumps
    pub const SCORE_STEP: u64 = 5;

    /// Required interpenetration before a hit registers
    pub const COLLISION_PADDING: f32 = 4.0;
}
