//! Obstacle spawning with a fairness gap
//!
//! A spawn is due once the randomized interval has elapsed. It only happens
//! when the newest obstacle's trailing edge is at least `min_gap` away from
//! the spawn point; otherwise the spawn stays pending and is retried every
//! tick until the field has scrolled far enough.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::ObstacleField;
use super::geom::Aabb;
use super::state::ObstacleKind;
use crate::config::{ObstacleSpec, RunnerConfig};

/// Outcome of one spawner poll
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnResult {
    /// Interval has not elapsed
    Idle,
    /// Interval elapsed, gap still too small (retry next tick)
    Blocked { gap: f32 },
    Spawned { id: u32, kind: ObstacleKind },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Simulated time of the last spawn (ms)
    pub last_spawn_ms: f64,
    /// Current randomized interval (ms)
    pub interval_ms: f64,
    /// A due spawn is waiting for the gap to clear
    pub pending: bool,
}

/// Horizontal distance from the newest trailing edge to the spawn point
///
/// `None` when the field is empty.
pub fn spawn_gap(field: &ObstacleField, config: &RunnerConfig) -> Option<f32> {
    field
        .rightmost_edge()
        .map(|edge| config.field_width - edge)
}

impl Spawner {
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            last_spawn_ms: 0.0,
            interval_ms: config.first_spawn_interval_ms,
            pending: false,
        }
    }

    pub fn interval_elapsed(&self, now_ms: f64) -> bool {
        now_ms - self.last_spawn_ms >= self.interval_ms
    }

    /// Poll once per tick
    pub fn update(
        &mut self,
        now_ms: f64,
        field: &mut ObstacleField,
        config: &RunnerConfig,
        rng: &mut impl Rng,
    ) -> SpawnResult {
        if !self.interval_elapsed(now_ms) {
            return SpawnResult::Idle;
        }

        let gap = spawn_gap(field, config);
        if let Some(gap) = gap.filter(|&gap| gap < config.min_gap) {
            if !self.pending {
                log::debug!("Spawn deferred, gap {gap:.1} < {}", config.min_gap);
            }
            self.pending = true;
            return SpawnResult::Blocked { gap };
        }
        debug_assert!(gap.is_none_or(|gap| gap >= config.min_gap));

        let spec = pick_spec(&config.catalog, rng);
        let cluster = if spec.kind == ObstacleKind::Ground && spec.max_cluster > 1 {
            rng.random_range(1..=spec.max_cluster)
        } else {
            1
        };
        let width = spec.width * cluster as f32;
        let y = config.ground_y - spec.height - spec.elevation;
        let id = field.push(
            spec.kind,
            Aabb::new(config.field_width, y, width, spec.height),
        );

        self.last_spawn_ms = now_ms;
        self.pending = false;
        self.interval_ms = next_interval(config, rng);
        log::debug!(
            "Spawned {:?} #{id} (w {width}), next in {:.0} ms",
            spec.kind,
            self.interval_ms
        );
        SpawnResult::Spawned { id, kind: spec.kind }
    }
}

/// Uniform draw from the configured interval window
fn next_interval(config: &RunnerConfig, rng: &mut impl Rng) -> f64 {
    rng.random_range(config.spawn_interval_min_ms..=config.spawn_interval_max_ms)
}

/// Weighted pick from the catalog (entries with non-positive weight never win)
fn pick_spec<'a>(catalog: &'a [ObstacleSpec], rng: &mut impl Rng) -> &'a ObstacleSpec {
    let usable = move || catalog.iter().filter(|s| s.weight > 0.0);
    let total: f32 = usable().map(|s| s.weight).sum();
    let mut roll = rng.random::<f32>() * total;
    let mut last = None;
    for spec in usable() {
        if roll < spec.weight {
            return spec;
        }
        roll -= spec.weight;
        last = Some(spec);
    }
    // Float rounding can leave the roll just past the final weight
    last.unwrap_or(&catalog[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn config() -> RunnerConfig {
        RunnerConfig {
            min_gap: 180.0,
            ..RunnerConfig::default()
        }
    }

    #[test]
    fn waits_for_interval() {
        let config = config();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();
        let mut spawner = Spawner::new(&config);

        let early = spawner.update(config.first_spawn_interval_ms - 1.0, &mut field, &config, &mut rng);
        assert_eq!(early, SpawnResult::Idle);
        let due = spawner.update(config.first_spawn_interval_ms, &mut field, &config, &mut rng);
        assert!(matches!(due, SpawnResult::Spawned { .. }));

        let spawned = &field.obstacles()[0];
        assert_eq!(spawned.pos.x, config.field_width);
        assert_eq!(spawned.pos.y + spawned.size.y, config.ground_y);
        assert!(spawner.interval_ms >= config.spawn_interval_min_ms);
        assert!(spawner.interval_ms <= config.spawn_interval_max_ms);
    }

    #[test]
    fn blocked_spawn_retries_until_gap_clears() {
        let config = config();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut field = ObstacleField::new();
        // Trailing edge 100 px from the spawn point
        field.push(
            ObstacleKind::Ground,
            Aabb::new(config.field_width - 100.0 - 26.0, 154.0, 26.0, 46.0),
        );
        let mut spawner = Spawner::new(&config);
        let now = config.first_spawn_interval_ms;

        assert_eq!(
            spawner.update(now, &mut field, &config, &mut rng),
            SpawnResult::Blocked { gap: 100.0 }
        );
        assert!(spawner.pending);
        assert_eq!(field.len(), 1);

        // 80 px to go at 4 px/tick
        let mut ticks = 0;
        loop {
            field.advance(4.0);
            ticks += 1;
            let t = now + ticks as f64 * config.tick_ms;
            match spawner.update(t, &mut field, &config, &mut rng) {
                SpawnResult::Blocked { gap } => assert!(gap < 180.0),
                SpawnResult::Spawned { .. } => break,
                SpawnResult::Idle => panic!("pending spawn was dropped"),
            }
        }
        assert_eq!(ticks, 20);
        assert!(!spawner.pending);
        assert_eq!(field.len(), 2);
        assert!(spawn_gap(&field, &config).unwrap() <= 0.0);
    }

    #[test]
    fn weighted_pick_respects_zero_weight() {
        let catalog = vec![
            ObstacleSpec::ground(10.0, 10.0, 0.0),
            ObstacleSpec::flying(20.0, 20.0, 30.0, 1.0),
        ];
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            assert_eq!(pick_spec(&catalog, &mut rng).kind, ObstacleKind::Flying);
        }
    }

    #[test]
    fn weighted_pick_roughly_matches_weights() {
        let config = RunnerConfig::from_preset(crate::config::Preset::Flyers);
        let mut rng = Pcg32::seed_from_u64(4);
        let flying = (0..10_000)
            .filter(|_| pick_spec(&config.catalog, &mut rng).kind == ObstacleKind::Flying)
            .count();
        assert!((2_500..3_500).contains(&flying), "flying share {flying}");
    }

    #[test]
    fn flying_obstacles_are_raised() {
        let config = RunnerConfig {
            catalog: vec![ObstacleSpec::flying(46.0, 26.0, 30.0, 1.0)],
            ..RunnerConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let mut field = ObstacleField::new();
        let mut spawner = Spawner::new(&config);
        spawner.update(config.first_spawn_interval_ms, &mut field, &config, &mut rng);
        let bird = field.obstacles()[0].bounds();
        assert_eq!(bird.bottom(), config.ground_y - 30.0);
    }

    #[test]
    fn clusters_multiply_width() {
        let config = RunnerConfig {
            catalog: vec![ObstacleSpec::ground(24.0, 48.0, 1.0).with_cluster(3)],
            spawn_interval_min_ms: 0.0,
            spawn_interval_max_ms: 0.0,
            min_gap: 0.0,
            first_spawn_interval_ms: 0.0,
            ..RunnerConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(6);
        let mut field = ObstacleField::new();
        let mut spawner = Spawner::new(&config);
        for i in 0..50 {
            field.advance(200.0);
            spawner.update(i as f64, &mut field, &config, &mut rng);
        }
        for o in field.obstacles() {
            let cluster = o.size.x / 24.0;
            assert!([1.0, 2.0, 3.0].contains(&cluster));
        }
    }
}
