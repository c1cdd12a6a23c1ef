//! Sprite-backed entities: turret, bullets, bombs and decorations

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::error::GameError;
use crate::platform::{Renderer, Sprite};

/// A positioned, rotatable, velocity-carrying bitmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Vec2,
    /// Draw/rotation origin as a fraction of the bitmap size (0.5 = center)
    pub anchor: Vec2,
    /// Visual rotation in degrees; collision ignores it
    pub rotation: f32,
    /// Pixels per frame
    pub velocity: Vec2,
    sprite: Sprite,
}

impl Entity {
    pub fn new(sprite: Sprite) -> Self {
        Self {
            position: Vec2::ZERO,
            anchor: Vec2::splat(0.5),
            rotation: 0.0,
            velocity: Vec2::ZERO,
            sprite,
        }
    }

    pub fn at(sprite: Sprite, position: Vec2) -> Self {
        Self {
            position,
            ..Self::new(sprite)
        }
    }

    /// Resolve a bitmap through the renderer and wrap it
    pub fn load(renderer: &mut dyn Renderer, path: &str) -> Result<Self, GameError> {
        let sprite = renderer.load_bitmap(path)?;
        Ok(Self::new(sprite))
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    #[inline]
    pub fn sprite(&self) -> Sprite {
        self.sprite
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.sprite.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.sprite.height
    }

    /// Integrate one frame of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Draw at the current position without moving
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.draw_rotated(
            self.sprite.handle,
            self.position.x as i32,
            self.position.y as i32,
            self.rotation,
            self.anchor.x,
            self.anchor.y,
            1.0,
            1.0,
        );
    }

    pub fn update_and_draw(&mut self, renderer: &mut dyn Renderer) {
        self.advance();
        self.draw(renderer);
    }

    /// Axis-aligned box around the anchor-adjusted bitmap
    pub fn bounds(&self) -> Aabb {
        let left = self.position.x - self.width() * self.anchor.x;
        let top = self.position.y - self.height() * self.anchor.y;
        Aabb::new(left, top, left + self.width(), top + self.height())
    }
}
