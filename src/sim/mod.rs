//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod field;
pub mod geom;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{collide, first_hit};
pub use difficulty::{Scorer, speed_for_level};
pub use field::ObstacleField;
pub use geom::Aabb;
pub use spawner::{SpawnResult, Spawner, spawn_gap};
pub use state::{
    FrameView, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, ObstacleView, Player,
};
pub use tick::{TickInput, tick};
