//! Axis-aligned bounding boxes
//!
//! Every gameplay shape is tested as its bounding rectangle, including the
//! spike, whose triangle is only a drawing detail.

use glam::Vec2;

/// Rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        check_collision(self, other)
    }
}

/// Strict inequality on all four half-plane comparisons
pub fn check_collision(a: &Aabb, b: &Aabb) -> bool {
    a.min.x < b.min.x + b.size.x
        && a.min.x + a.size.x > b.min.x
        && a.min.y < b.min.y + b.size.y
        && a.min.y + a.size.y > b.min.y
}
