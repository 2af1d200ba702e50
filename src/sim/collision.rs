//! Collision detection with forgiveness padding
//!
//! Both boxes shrink inward by half the padding on every edge before the
//! strict overlap test, so a pair has to interpenetrate by more than the full
//! padding on each axis to count as a hit. Shrinking both sides keeps the test
//! symmetric in its arguments.

use super::geom::Aabb;
use super::state::Obstacle;

/// Padded overlap test between two boxes
pub fn collide(a: &Aabb, b: &Aabb, padding: f32) -> bool {
    let half = padding / 2.0;
    a.shrink(half).overlaps(&b.shrink(half))
}

/// Index of the first obstacle (front to back, spawn order) hit by `player`
///
/// Stops at the first hit.
pub fn first_hit(player: &Aabb, obstacles: &[Obstacle], padding: f32) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| collide(player, &obstacle.bounds(), padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    const PAD: f32 = 4.0;

    fn player() -> Aabb {
        Aabb::new(60.0, 156.0, 44.0, 44.0)
    }

    #[test]
    fn overlap_under_padding_is_forgiven() {
        // Obstacle overlaps the player's right edge by pad - 1 px
        let obstacle = Aabb::new(104.0 - (PAD - 1.0), 150.0, 30.0, 50.0);
        assert!(!collide(&player(), &obstacle, PAD));
    }

    #[test]
    fn overlap_past_padding_hits() {
        let obstacle = Aabb::new(104.0 - (PAD + 1.0), 150.0, 30.0, 50.0);
        assert!(collide(&player(), &obstacle, PAD));
    }

    #[test]
    fn vertical_forgiveness_when_clearing_a_cactus() {
        // Player bottom 3 px inside the cactus top
        let cactus = Aabb::new(70.0, 200.0 - 46.0, 26.0, 46.0);
        let airborne = Aabb::new(60.0, cactus.top() - 44.0 + 3.0, 44.0, 44.0);
        assert!(!collide(&airborne, &cactus, PAD));
        let lower = Aabb::new(60.0, cactus.top() - 44.0 + 5.0, 44.0, 44.0);
        assert!(collide(&lower, &cactus, PAD));
    }

    #[test]
    fn zero_padding_is_plain_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(9.0, 9.0, 10.0, 10.0);
        assert!(collide(&a, &b, 0.0));
        assert!(collide(&b, &a, 0.0));
    }

    #[test]
    fn first_hit_is_front_to_back() {
        let obstacles = vec![
            Obstacle::new(1, ObstacleKind::Ground, Aabb::new(300.0, 154.0, 26.0, 46.0)),
            Obstacle::new(2, ObstacleKind::Ground, Aabb::new(70.0, 154.0, 26.0, 46.0)),
            Obstacle::new(3, ObstacleKind::Ground, Aabb::new(80.0, 154.0, 26.0, 46.0)),
        ];
        assert_eq!(first_hit(&player(), &obstacles, PAD), Some(1));
        assert_eq!(first_hit(&player(), &obstacles[..1], PAD), None);
    }
}
