//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, velocities in pixels per frame
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each pool)
//! - No drawing or sound; the session turns `GameEvent`s into cues

pub mod collision;
pub mod entity;
pub mod explosion;
pub mod pools;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{Aabb, Hit, intersects, sweep, within_distance};
pub use entity::Entity;
pub use explosion::Explosion;
pub use pools::{EntityPools, bomb_in_play, bullet_on_screen, remove_indices};
pub use spawn::SpawnScheduler;
pub use state::{GameEvent, GamePhase, GameState, SpriteSet};
pub use tick::{TickInput, tick};
pub use vector::VectorExt;
