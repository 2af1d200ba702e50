//! Live obstacles, ordered by spawn time
//!
//! Spawn order is also descending x while on screen, since every obstacle
//! enters at the right boundary and all of them scroll at the same speed.

use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use super::state::{Obstacle, ObstacleKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Live obstacles, front (oldest) to back (newest)
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Append a new obstacle behind the others and return its id
    pub fn push(&mut self, kind: ObstacleKind, bounds: Aabb) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, kind, bounds));
        id
    }

    /// Largest trailing edge among live obstacles
    pub fn rightmost_edge(&self) -> Option<f32> {
        self.obstacles.iter().map(Obstacle::right).reduce(f32::max)
    }

    /// Scroll everything left by `speed`, then drop obstacles whose trailing
    /// edge reached the left boundary. Returns how many were retired.
    pub fn advance(&mut self, speed: f32) -> usize {
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= speed;
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.right() > 0.0);

        debug_assert!(
            self.obstacles.windows(2).all(|w| w[0].id < w[1].id && w[0].pos.x <= w[1].pos.x),
            "obstacle field out of order"
        );
        before - self.obstacles.len()
    }

    /// Mark obstacles whose trailing edge is left of `player_x`
    ///
    /// Returns the ids newly marked this call.
    pub fn mark_passed(&mut self, player_x: f32) -> Vec<u32> {
        self.obstacles
            .iter_mut()
            .filter(|o| !o.passed && o.right() < player_x)
            .map(|o| {
                o.passed = true;
                o.id
            })
            .collect()
    }
}
