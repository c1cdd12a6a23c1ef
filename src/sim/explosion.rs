//! Short-lived explosion effect
//!
//! Lives for a fixed number of frames and fades out by drawing less often:
//! every frame for the first half, every 2nd frame in the third quarter,
//! every 3rd frame in the last quarter.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::consts::EXPLOSION_FRAMES;
use crate::platform::{Renderer, Sprite};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    sprite: Entity,
    frame_timer: u32,
    lifetime: u32,
}

impl Explosion {
    pub fn new(sprite: Sprite, position: Vec2) -> Self {
        Self::with_lifetime(sprite, position, EXPLOSION_FRAMES)
    }

    pub fn with_lifetime(sprite: Sprite, position: Vec2, lifetime: u32) -> Self {
        Self {
            sprite: Entity::at(sprite, position),
            frame_timer: 0,
            lifetime,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.sprite.position
    }

    pub fn frame_timer(&self) -> u32 {
        self.frame_timer
    }

    pub fn lifetime(&self) -> u32 {
        self.lifetime
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.frame_timer >= self.lifetime
    }

    pub fn update(&mut self) {
        self.frame_timer += 1;
    }

    /// Whether the current frame is a visible one in the fade schedule
    pub fn is_visible(&self) -> bool {
        if self.is_finished() {
            return false;
        }
        let progress = self.frame_timer as f32 / self.lifetime as f32;
        if progress < 0.5 {
            true
        } else if progress < 0.75 {
            self.frame_timer % 2 == 0
        } else {
            self.frame_timer % 3 == 0
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if self.is_visible() {
            self.sprite.draw(renderer);
        }
    }
}
