//! Collision detection
//!
//! Everything is axis-aligned: sprite rotation is visual only. Overlap uses
//! open intervals, so boxes that merely share an edge do not collide.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Entity-level overlap test
#[inline]
pub fn intersects(a: &Entity, b: &Entity) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Anchor positions closer than `distance`
#[inline]
pub fn within_distance(a: &Entity, b: &Entity, distance: f32) -> bool {
    a.position.distance_squared(b.position) < distance * distance
}

/// A bullet/bomb pair that overlapped this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub bullet: usize,
    pub bomb: usize,
}

/// Test every bullet against every bomb
///
/// There is no early exit: one bullet can hit several bombs and several
/// bullets can hit the same bomb. Each pair is reported and each scores.
pub fn sweep(bullets: &[Entity], bombs: &[Entity]) -> Vec<Hit> {
    let mut hits = Vec::new();
    for (bullet_idx, bullet) in bullets.iter().enumerate() {
        let bullet_box = bullet.bounds();
        for (bomb_idx, bomb) in bombs.iter().enumerate() {
            if bullet_box.overlaps(&bomb.bounds()) {
                hits.push(Hit {
                    bullet: bullet_idx,
                    bomb: bomb_idx,
                });
            }
        }
    }
    hits
}
