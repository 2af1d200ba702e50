//! Simulation tunables and presets
//!
//! One parameterized core replaces the per-variant forks: every constant that
//! differed between them lives in `RunnerConfig`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ObstacleKind;

/// Errors raised while loading or validating a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0} must be positive (got {1})")]
    NonPositive(&'static str, f64),
    #[error("{0} must not be negative (got {1})")]
    Negative(&'static str, f64),
    #[error("{name} range is inverted ({min} > {max})")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("obstacle catalog is empty or has no positive weight")]
    EmptyCatalog,
    #[error("catalog entry {index}: {reason}")]
    InvalidObstacle { index: usize, reason: &'static str },
    #[error("jump velocity must be negative (upward), got {0}")]
    JumpNotUpward(f32),
    #[error("player x ({player_x}) must exceed max speed ({max_speed}) so obstacles are scored before retiring")]
    PlayerTooFarLeft { player_x: f32, max_speed: f32 },
}

/// Named tuning variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Ground cacti only, one point per obstacle passed
    #[default]
    Classic,
    /// Adds flying obstacles and crouching
    Flyers,
    /// Flyers with clustered cacti and time-based scoring
    Marathon,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Flyers => "Flyers",
            Preset::Marathon => "Marathon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "flyers" | "flying" => Some(Preset::Flyers),
            "marathon" => Some(Preset::Marathon),
            _ => None,
        }
    }
}

/// How score accrues during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScorePolicy {
    /// One point per obstacle whose trailing edge clears the player's x
    PerObstacle,
    /// `points` every `every_ticks` ticks
    Timed { every_ticks: u32, points: u64 },
}

/// One entry in the obstacle catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
    /// Height of the obstacle's bottom above the ground line
    #[serde(default)]
    pub elevation: f32,
    /// Relative spawn weight
    pub weight: f32,
    /// Largest cluster (width multiplier) for ground obstacles
    #[serde(default = "default_cluster")]
    pub max_cluster: u32,
}

fn default_cluster() -> u32 {
    1
}

impl ObstacleSpec {
    pub fn ground(width: f32, height: f32, weight: f32) -> Self {
        Self {
            kind: ObstacleKind::Ground,
            width,
            height,
            elevation: 0.0,
            weight,
            max_cluster: 1,
        }
    }

    pub fn flying(width: f32, height: f32, elevation: f32, weight: f32) -> Self {
        Self {
            kind: ObstacleKind::Flying,
            width,
            height,
            elevation,
            weight,
            max_cluster: 1,
        }
    }

    pub fn with_cluster(mut self, max_cluster: u32) -> Self {
        self.max_cluster = max_cluster;
        self
    }

    /// Entries with zero weight are never picked, so only their weight is checked
    fn validate(&self) -> Result<(), &'static str> {
        if self.weight < 0.0 {
            return Err("weight must not be negative");
        }
        if self.weight == 0.0 {
            return Ok(());
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err("width and height must be positive");
        }
        if self.elevation < 0.0 {
            return Err("elevation must not be negative");
        }
        if self.max_cluster < 1 {
            return Err("max_cluster must be at least 1");
        }
        Ok(())
    }
}

/// Every tunable the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    // === Field ===
    pub field_width: f32,
    /// Ground baseline (y grows downward)
    pub ground_y: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub crouch_enabled: bool,
    pub crouch_height_factor: f32,

    // === Physics (per tick) ===
    pub gravity: f32,
    pub crouch_gravity_multiplier: f32,
    pub jump_velocity: f32,
    /// Fixed tick; the per-tick constants above assume this cadence
    pub tick_ms: f64,

    // === Spawning ===
    pub spawn_interval_min_ms: f64,
    pub spawn_interval_max_ms: f64,
    pub first_spawn_interval_ms: f64,
    pub min_gap: f32,
    pub catalog: Vec<ObstacleSpec>,

    // === Difficulty / scoring ===
    pub base_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
    pub score_step: u64,
    pub score_policy: ScorePolicy,

    // === Collision ===
    pub collision_padding: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            ground_y: GROUND_Y,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            crouch_enabled: false,
            crouch_height_factor: CROUCH_HEIGHT_FACTOR,

            gravity: GRAVITY,
            crouch_gravity_multiplier: CROUCH_GRAVITY_MULTIPLIER,
            jump_velocity: JUMP_VELOCITY,
            tick_ms: TICK_MS,

            spawn_interval_min_ms: SPAWN_INTERVAL_MIN_MS,
            spawn_interval_max_ms: SPAWN_INTERVAL_MAX_MS,
            first_spawn_interval_ms: FIRST_SPAWN_INTERVAL_MS,
            min_gap: MIN_GAP,
            // Small / medium / large cactus
            catalog: vec![
                ObstacleSpec::ground(26.0, 46.0, 1.0),
                ObstacleSpec::ground(34.0, 54.0, 1.0),
                ObstacleSpec::ground(48.0, 64.0, 1.0),
            ],

            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            max_speed: MAX_SPEED,
            score_step: SCORE_STEP,
            score_policy: ScorePolicy::PerObstacle,

            collision_padding: COLLISION_PADDING,
        }
    }
}

impl RunnerConfig {
    /// Build the config for a preset
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a preset on top of the current values
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Classic => {}
            Preset::Flyers => {
                self.crouch_enabled = true;
                // 70% ground / 30% flying
                self.catalog = vec![
                    ObstacleSpec::ground(26.0, 46.0, 0.35),
                    ObstacleSpec::ground(34.0, 54.0, 0.35),
                    ObstacleSpec::flying(46.0, 26.0, 30.0, 0.3),
                ];
            }
            Preset::Marathon => {
                self.crouch_enabled = true;
                self.catalog = vec![
                    ObstacleSpec::ground(24.0, 48.0, 0.7).with_cluster(3),
                    ObstacleSpec::flying(46.0, 26.0, 30.0, 0.3),
                ];
                self.min_gap = 220.0;
                self.spawn_interval_min_ms = 900.0;
                self.spawn_interval_max_ms = 1700.0;
                // Roughly 10 points per second at 16 ms ticks
                self.score_policy = ScorePolicy::Timed {
                    every_ticks: 6,
                    points: 1,
                };
                self.score_step = 100;
            }
        }
    }

    /// Resting y (top of the standing box) on the ground line
    pub fn rest_y(&self) -> f32 {
        self.ground_y - self.player_height
    }

    /// Parse a config from JSON; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded runner config from {}", path.display());
        Ok(config)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("field_width", self.field_width as f64),
            ("player_width", self.player_width as f64),
            ("player_height", self.player_height as f64),
            ("gravity", self.gravity as f64),
            ("tick_ms", self.tick_ms),
            ("base_speed", self.base_speed as f64),
            ("crouch_height_factor", self.crouch_height_factor as f64),
            ("crouch_gravity_multiplier", self.crouch_gravity_multiplier as f64),
            ("score_step", self.score_step as f64),
        ];
        for (name, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(name, value));
            }
        }
        let non_negatives = [
            ("min_gap", self.min_gap as f64),
            ("collision_padding", self.collision_padding as f64),
            ("speed_increment", self.speed_increment as f64),
        ];
        for (name, value) in non_negatives {
            if value < 0.0 {
                return Err(ConfigError::Negative(name, value));
            }
        }
        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::JumpNotUpward(self.jump_velocity));
        }
        if self.spawn_interval_min_ms > self.spawn_interval_max_ms {
            return Err(ConfigError::InvalidRange {
                name: "spawn_interval_ms",
                min: self.spawn_interval_min_ms,
                max: self.spawn_interval_max_ms,
            });
        }
        if self.base_speed > self.max_speed {
            return Err(ConfigError::InvalidRange {
                name: "speed",
                min: self.base_speed as f64,
                max: self.max_speed as f64,
            });
        }
        if self.player_x <= self.max_speed {
            return Err(ConfigError::PlayerTooFarLeft {
                player_x: self.player_x,
                max_speed: self.max_speed,
            });
        }
        if let ScorePolicy::Timed { every_ticks: 0, .. } = self.score_policy {
            return Err(ConfigError::NonPositive("score_policy.every_ticks", 0.0));
        }
        for (index, spec) in self.catalog.iter().enumerate() {
            spec.validate().map_err(|reason| ConfigError::InvalidObstacle { index, reason })?;
        }
        if !self.catalog.iter().any(|spec| spec.weight > 0.0) {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_presets_validate() {
        for preset in [Preset::Classic, Preset::Flyers, Preset::Marathon] {
            let config = RunnerConfig::from_preset(preset);
            assert!(config.validate().is_ok(), "{} failed", preset.as_str());
        }
    }

    #[test]
    fn default_rest_y_sits_on_ground_line() {
        assert_eq!(RunnerConfig::default().rest_y(), 156.0);
    }

    #[test]
    fn preset_names_round_trip() {
        assert_eq!(Preset::from_str("FLYERS"), Some(Preset::Flyers));
        assert_eq!(Preset::from_str(Preset::Marathon.as_str()), Some(Preset::Marathon));
        assert_eq!(Preset::from_str("turbo"), None);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = RunnerConfig::from_json_str(r#"{ "min_gap": 250.0, "crouch_enabled": true }"#)
            .unwrap();
        assert_eq!(config.min_gap, 250.0);
        assert!(config.crouch_enabled);
        assert_eq!(config.gravity, GRAVITY);
        assert_eq!(config.catalog.len(), 3);
    }

    #[test]
    fn rejects_bad_values() {
        let err = RunnerConfig::from_json_str(r#"{ "jump_velocity": 5.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::JumpNotUpward(_)));

        let err = RunnerConfig::from_json_str(
            r#"{ "spawn_interval_min_ms": 2000.0, "spawn_interval_max_ms": 1000.0 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { .. }));

        let err = RunnerConfig::from_json_str(r#"{ "catalog": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCatalog));

        let err = RunnerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = RunnerConfig::from_json_str(r#"{ "speed_increment": -0.4 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative("speed_increment", _)));

        let err = RunnerConfig::from_json_str(r#"{ "min_gap": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative("min_gap", _)));
        assert_eq!(err.to_string(), "min_gap must not be negative (got -1)");
    }

    #[test]
    fn zero_gap_padding_and_increment_are_allowed() {
        let config = RunnerConfig {
            min_gap: 0.0,
            collision_padding: 0.0,
            speed_increment: 0.0,
            ..RunnerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn every_weighted_catalog_entry_is_checked() {
        let mixed = RunnerConfig {
            catalog: vec![
                ObstacleSpec::ground(-50.0, 46.0, 1.0),
                ObstacleSpec::ground(26.0, 46.0, 1.0),
            ],
            ..RunnerConfig::default()
        };
        assert!(matches!(
            mixed.validate(),
            Err(ConfigError::InvalidObstacle { index: 0, .. })
        ));

        let sunk = RunnerConfig {
            catalog: vec![
                ObstacleSpec::ground(26.0, 46.0, 1.0),
                ObstacleSpec::flying(46.0, 26.0, -10.0, 0.5),
            ],
            ..RunnerConfig::default()
        };
        assert!(matches!(
            sunk.validate(),
            Err(ConfigError::InvalidObstacle { index: 1, .. })
        ));

        let negative_weight = RunnerConfig {
            catalog: vec![
                ObstacleSpec::ground(26.0, 46.0, 1.0),
                ObstacleSpec::ground(34.0, 54.0, -0.5),
            ],
            ..RunnerConfig::default()
        };
        assert!(matches!(
            negative_weight.validate(),
            Err(ConfigError::InvalidObstacle { index: 1, .. })
        ));

        let no_cluster = RunnerConfig {
            catalog: vec![ObstacleSpec::ground(26.0, 46.0, 1.0).with_cluster(0)],
            ..RunnerConfig::default()
        };
        assert!(matches!(
            no_cluster.validate(),
            Err(ConfigError::InvalidObstacle { index: 0, .. })
        ));

        // Unpickable entries are not held to the size rules
        let dormant = RunnerConfig {
            catalog: vec![
                ObstacleSpec::ground(0.0, 0.0, 0.0),
                ObstacleSpec::ground(26.0, 46.0, 1.0),
            ],
            ..RunnerConfig::default()
        };
        assert!(dormant.validate().is_ok());

        let all_dormant = RunnerConfig {
            catalog: vec![ObstacleSpec::ground(26.0, 46.0, 0.0)],
            ..RunnerConfig::default()
        };
        assert!(matches!(all_dormant.validate(), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RunnerConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
