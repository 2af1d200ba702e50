//! Axis-aligned boxes for players and obstacles
//!
//! Screen coordinates: origin top-left, x grows right, y grows downward.
//! A box is stored as its top-left corner plus size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Shrink inward by `amount` on all four edges
    ///
    /// Boxes thinner than `2 * amount` collapse to zero size at their center.
    pub fn shrink(&self, amount: f32) -> Self {
        let size = (self.size - Vec2::splat(2.0 * amount)).max(Vec2::ZERO);
        let center = self.pos + self.size / 2.0;
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    /// Strict overlap on both axes (touching edges do not overlap)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
