//! Erythrina - a crank-driven turret shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game phases)
//! - `session`: Per-frame orchestration against the host devices
//! - `platform`: Renderer/audio/input/crank device traits and headless devices
//! - `audio`: Sound cues and the loaded sound bank
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod error;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use session::GameSession;
pub use settings::{AssetManifest, GameConfig, LifeLossPolicy};

/// Game configuration constants
pub mod consts {
    /// Display size in pixels
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 240.0;

    /// Bullets are culled once they leave the screen plus this margin
    pub const BULLET_MARGIN: f32 = 20.0;
    /// Bombs past this line are gone for good
    pub const BOMB_CULL_Y: f32 = SCREEN_HEIGHT + 20.0;
    /// Bombs at or below this line count as missed (life loss)
    pub const BOMB_IMPACT_Y: f32 = SCREEN_HEIGHT;
    /// Bombs enter just above the visible top edge
    pub const BOMB_SPAWN_Y: f32 = -10.0;
    /// Horizontal spawn band: x = rand % WIDTH + MARGIN
    pub const BOMB_SPAWN_WIDTH: u32 = 380;
    pub const BOMB_SPAWN_MARGIN: f32 = 10.0;

    /// Turret strafing limits
    pub const TURRET_MIN_X: f32 = 20.0;
    pub const TURRET_MAX_X: f32 = 380.0;
    /// Bomb-to-turret distance that ends a run under the contact policy
    pub const TURRET_CONTACT_DISTANCE: f32 = 8.0;

    /// Explosion lifetime in frames
    pub const EXPLOSION_FRAMES: u32 = 30;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }
}
