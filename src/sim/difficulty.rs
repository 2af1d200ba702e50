//! Score and difficulty
//!
//! Speed is derived from the level rather than accumulated, so it lands
//! exactly on the cap and can never drift past it.

use serde::{Deserialize, Serialize};

use crate::config::RunnerConfig;

/// Score-driven difficulty controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorer {
    pub score: u64,
    /// Number of `score_step` multiples crossed this run
    pub level: u32,
    /// Scroll speed (px/tick)
    pub speed: f32,
}

/// Scroll speed for a difficulty level
pub fn speed_for_level(level: u32, config: &RunnerConfig) -> f32 {
    (config.base_speed + config.speed_increment * level as f32).min(config.max_speed)
}

impl Scorer {
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            score: 0,
            level: 0,
            speed: speed_for_level(0, config),
        }
    }

    /// Add points; returns the new level if a step boundary was crossed
    pub fn award(&mut self, points: u64, config: &RunnerConfig) -> Option<u32> {
        if points == 0 {
            return None;
        }
        self.score = self.score.saturating_add(points);
        let level = u32::try_from(self.score / config.score_step).unwrap_or(u32::MAX);
        if level == self.level {
            return None;
        }

        let speed = speed_for_level(level, config);
        debug_assert!(speed >= self.speed, "speed decreased");
        debug_assert!(speed <= config.max_speed, "speed above cap");
        self.level = level;
        self.speed = speed;
        Some(level)
    }

    /// Speed relative to the base speed
    pub fn multiplier(&self, config: &RunnerConfig) -> f32 {
        self.speed / config.base_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bumps_every_step() {
        let config = RunnerConfig::default();
        let mut scorer = Scorer::new(&config);
        for _ in 0..4 {
            assert_eq!(scorer.award(1, &config), None);
        }
        assert_eq!(scorer.award(1, &config), Some(1));
        assert_eq!(scorer.speed, 4.4);
        assert_eq!(scorer.multiplier(&config), 1.1);
    }

    #[test]
    fn speed_caps_exactly() {
        let config = RunnerConfig::default();
        let mut scorer = Scorer::new(&config);
        for _ in 0..100 {
            scorer.award(1, &config);
        }
        assert_eq!(scorer.score, 100);
        assert_eq!(scorer.speed, 12.0);

        for _ in 0..100 {
            scorer.award(1, &config);
        }
        assert_eq!(scorer.score, 200);
        assert_eq!(scorer.speed, 12.0);
        assert_eq!(scorer.multiplier(&config), 3.0);
    }

    #[test]
    fn large_award_crosses_several_steps() {
        let config = RunnerConfig::default();
        let mut scorer = Scorer::new(&config);
        scorer.award(3, &config);
        assert_eq!(scorer.award(9, &config), Some(2));
        assert_eq!(scorer.level, 2);
        assert_eq!(scorer.speed, speed_for_level(2, &config));
    }

    #[test]
    fn speed_is_monotonic() {
        let config = RunnerConfig::default();
        let mut scorer = Scorer::new(&config);
        let mut last = scorer.speed;
        for points in [1, 2, 7, 0, 13, 1, 40, 100] {
            scorer.award(points, &config);
            assert!(scorer.speed >= last);
            assert!(scorer.speed <= config.max_speed);
            last = scorer.speed;
        }
    }
}
