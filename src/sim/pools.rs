//! Live bullets, bombs and explosions
//!
//! Each pool is an insertion-ordered `Vec`. Culling uses `retain`, which
//! keeps survivors in their original order. Collision removal goes through
//! `remove_indices`, which removes highest index first so the remaining
//! indices stay valid.

use glam::Vec2;

use super::entity::Entity;
use super::explosion::Explosion;
use crate::consts::{BOMB_CULL_Y, BULLET_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::Sprite;

#[derive(Debug, Clone, Default)]
pub struct EntityPools {
    pub bullets: Vec<Entity>,
    pub bombs: Vec<Entity>,
    pub explosions: Vec<Explosion>,
}

impl EntityPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_bullet(&mut self, sprite: Sprite, position: Vec2, velocity: Vec2) {
        self.bullets
            .push(Entity::at(sprite, position).with_velocity(velocity));
    }

    pub fn spawn_bomb(&mut self, sprite: Sprite, position: Vec2, velocity: Vec2) {
        self.bombs
            .push(Entity::at(sprite, position).with_velocity(velocity));
    }

    pub fn spawn_explosion(&mut self, sprite: Sprite, position: Vec2) {
        self.explosions.push(Explosion::new(sprite, position));
    }

    /// Integrate velocity for bullets and bombs
    pub fn advance_projectiles(&mut self) {
        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.advance_bombs();
    }

    pub fn advance_bombs(&mut self) {
        for bomb in &mut self.bombs {
            bomb.advance();
        }
    }

    pub fn age_explosions(&mut self) {
        for explosion in &mut self.explosions {
            explosion.update();
        }
    }

    /// Drop off-screen bullets, fallen bombs and finished explosions
    pub fn cull(&mut self) {
        self.bullets.retain(bullet_on_screen);
        self.bombs.retain(bomb_in_play);
        self.explosions.retain(|e| !e.is_finished());
    }

    pub fn remove_bullets(&mut self, indices: Vec<usize>) {
        remove_indices(&mut self.bullets, indices);
    }

    pub fn remove_bombs(&mut self, indices: Vec<usize>) {
        remove_indices(&mut self.bombs, indices);
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
        self.bombs.clear();
        self.explosions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty() && self.bombs.is_empty() && self.explosions.is_empty()
    }
}

/// Bullets live inside the screen plus a 20px margin on every side
pub fn bullet_on_screen(bullet: &Entity) -> bool {
    let p = bullet.position;
    (-BULLET_MARGIN..=SCREEN_WIDTH + BULLET_MARGIN).contains(&p.x)
        && (-BULLET_MARGIN..=SCREEN_HEIGHT + BULLET_MARGIN).contains(&p.y)
}

/// Bombs live until they fall past the bottom margin
pub fn bomb_in_play(bomb: &Entity) -> bool {
    bomb.position.y <= BOMB_CULL_Y
}

/// Remove the given indices from `items`, preserving the order of the rest
///
/// Duplicates are collapsed (several hits may name the same bomb). An index
/// past the end means the caller's bookkeeping is broken, so it panics.
pub fn remove_indices<T>(items: &mut Vec<T>, mut indices: Vec<usize>) {
    indices.sort_unstable();
    indices.dedup();
    for &idx in indices.iter().rev() {
        assert!(
            idx < items.len(),
            "pool removal index {} out of range (len {})",
            idx,
            items.len()
        );
        items.remove(idx);
    }
}
