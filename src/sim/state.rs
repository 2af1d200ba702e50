//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`; `tick` is the only writer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Scorer;
use super::field::ObstacleField;
use super::geom::Aabb;
use super::physics;
use super::spawner::Spawner;
use crate::config::RunnerConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Updates suspended, state intact
    Paused,
    /// Run ended; frozen until reset
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned { id: u32, kind: ObstacleKind },
    /// Spawn interval elapsed but the fairness gap is not clear yet
    SpawnDeferred { gap: f32 },
    Passed { id: u32 },
    SpeedUp { level: u32, speed: f32 },
    GameOver { score: u64, obstacle_id: u32 },
    Paused,
    Resumed,
    Reset,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground line; jump over it
    #[default]
    Ground,
    /// Raised off the ground; crouch under it
    Flying,
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Trailing edge has cleared the player
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, bounds: Aabb) -> Self {
        Self {
            id,
            kind,
            pos: bounds.pos,
            size: bounds.size,
            passed: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Right (trailing) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the standing box
    pub pos: Vec2,
    /// Standing size
    pub size: Vec2,
    /// Height while crouched
    pub crouch_height: f32,
    /// Vertical velocity (negative = upward)
    pub vel_y: f32,
    pub airborne: bool,
    pub crouching: bool,
}

impl Player {
    /// Create a player standing on the ground
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            pos: Vec2::new(config.player_x, config.rest_y()),
            size: Vec2::new(config.player_width, config.player_height),
            crouch_height: config.player_height * config.crouch_height_factor,
            vel_y: 0.0,
            airborne: false,
            crouching: false,
        }
    }

    /// Effective box; a crouched box keeps its bottom edge
    pub fn bounds(&self) -> Aabb {
        if self.crouching {
            let drop = self.size.y - self.crouch_height;
            Aabb::new(self.pos.x, self.pos.y + drop, self.size.x, self.crouch_height)
        } else {
            Aabb {
                pos: self.pos,
                size: self.size,
            }
        }
    }
}

/// Render-facing copy of one obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub bounds: Aabb,
    pub passed: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub player: Aabb,
    pub airborne: bool,
    pub crouching: bool,
    /// Spawn order (front to back)
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub best_score: u64,
    pub speed: f32,
    pub speed_multiplier: f32,
    pub paused: bool,
    pub game_over: bool,
    pub time_ticks: u64,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: RunnerConfig,
    /// Base seed; run `n` is seeded with `seed + n`
    pub seed: u64,
    /// Runs started since creation (0 for the first)
    pub run: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    pub field: ObstacleField,
    pub spawner: Spawner,
    pub scorer: Scorer,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated time (`time_ticks * tick_ms`)
    pub elapsed_ms: f64,
    /// Best score seen across runs of this session
    pub best_score: u64,
}

impl GameState {
    /// New run with the default config
    pub fn new(seed: u64) -> Self {
        Self::with_config(RunnerConfig::default(), seed)
    }

    /// New run with `config`; an invalid config is replaced by the default
    pub fn with_config(config: RunnerConfig, seed: u64) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Invalid runner config ({e}), using defaults");
                RunnerConfig::default()
            }
        };
        log::info!("Starting run (seed {seed})");
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            player: Player::new(&config),
            field: ObstacleField::new(),
            spawner: Spawner::new(&config),
            scorer: Scorer::new(&config),
            time_ticks: 0,
            elapsed_ms: 0.0,
            best_score: 0,
            seed,
            run: 0,
            config,
        }
    }

    /// Reinitialize every entity for a fresh run (valid from any phase)
    pub fn reset(&mut self) {
        self.best_score = self.best_score.max(self.scorer.score);
        self.run += 1;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.run));
        self.phase = GamePhase::Running;
        self.player = Player::new(&self.config);
        self.field = ObstacleField::new();
        self.spawner = Spawner::new(&self.config);
        self.scorer = Scorer::new(&self.config);
        self.time_ticks = 0;
        self.elapsed_ms = 0.0;
        log::info!("Run {} reset (best {})", self.run, self.best_score);
    }

    /// Jump command; dropped unless running, grounded and standing
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        physics::try_jump(&mut self.player, self.config.jump_velocity)
    }

    /// Crouch level; ignored unless running with crouch enabled
    pub fn set_crouch(&mut self, crouching: bool) {
        if self.phase != GamePhase::Running || !self.config.crouch_enabled {
            return;
        }
        self.player.crouching = crouching;
    }

    /// Toggle pause; no-op once the run is over
    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                Some(GameEvent::Paused)
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                Some(GameEvent::Resumed)
            }
            GamePhase::GameOver => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn score(&self) -> u64 {
        self.scorer.score
    }

    /// Current scroll speed (px/tick)
    pub fn speed(&self) -> f32 {
        self.scorer.speed
    }

    /// Snapshot for rendering
    pub fn view(&self) -> FrameView {
        FrameView {
            player: self.player.bounds(),
            airborne: self.player.airborne,
            crouching: self.player.crouching,
            obstacles: self
                .field
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    bounds: o.bounds(),
                    passed: o.passed,
                })
                .collect(),
            score: self.scorer.score,
            best_score: self.best_score.max(self.scorer.score),
            speed: self.scorer.speed,
            speed_multiplier: self.scorer.multiplier(&self.config),
            paused: self.is_paused(),
            game_over: self.is_game_over(),
            time_ticks: self.time_ticks,
        }
    }
}
