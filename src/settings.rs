//! Game configuration
//!
//! Tuning values and asset paths. The host owns persistence; it hands us a
//! JSON string (or nothing) at session start.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// How the player loses a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LifeLossPolicy {
    /// A bomb reaching the bottom of the screen costs one life; the run ends
    /// through a short game-over delay once lives hit zero
    #[default]
    MissedBomb,
    /// A bomb touching the turret ends the run immediately
    TurretContact,
}

impl LifeLossPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifeLossPolicy::MissedBomb => "missed-bomb",
            LifeLossPolicy::TurretContact => "turret-contact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "missed-bomb" | "missed" | "a" => Some(LifeLossPolicy::MissedBomb),
            "turret-contact" | "contact" | "b" => Some(LifeLossPolicy::TurretContact),
            _ => None,
        }
    }
}

/// Paths the host resolves into bitmaps and sounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    // === Bitmaps ===
    pub background: String,
    pub logo: String,
    pub game_over: String,
    pub turret: String,
    pub bullet: String,
    pub bomb: String,
    pub explosion: String,
    pub player_explosion: String,

    // === Sounds ===
    pub start_sound: String,
    pub shot_sound: String,
    pub explosion_sound: String,
    pub player_destroyed_sound: String,
    pub game_over_sound: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            background: "images/background.png".into(),
            logo: "images/logo.png".into(),
            game_over: "images/gameover.png".into(),
            turret: "images/canon.png".into(),
            bullet: "images/bullet.png".into(),
            bomb: "images/bomb.png".into(),
            explosion: "images/explosion.png".into(),
            player_explosion: "images/player_explosion.png".into(),

            start_sound: "sounds/start".into(),
            shot_sound: "sounds/shot".into(),
            explosion_sound: "sounds/explosion".into(),
            player_destroyed_sound: "sounds/player_explosion".into(),
            game_over_sound: "sounds/gameover".into(),
        }
    }
}

impl AssetManifest {
    pub fn bitmap_paths(&self) -> [&str; 8] {
        [
            self.background.as_str(),
            self.logo.as_str(),
            self.game_over.as_str(),
            self.turret.as_str(),
            self.bullet.as_str(),
            self.bomb.as_str(),
            self.explosion.as_str(),
            self.player_explosion.as_str(),
        ]
    }

    pub fn sound_paths(&self) -> [&str; 5] {
        [
            self.start_sound.as_str(),
            self.shot_sound.as_str(),
            self.explosion_sound.as_str(),
            self.player_destroyed_sound.as_str(),
            self.game_over_sound.as_str(),
        ]
    }
}

/// Simulation tuning and asset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Spawning ===
    /// Frames between bomb spawns
    pub spawn_interval: u32,
    /// Bomb fall speed (pixels per frame)
    pub bomb_speed: f32,
    /// Seed for the spawn position RNG
    pub seed: u64,

    // === Turret ===
    /// Bullet speed (pixels per frame)
    pub bullet_speed: f32,
    /// Where the turret sits at the start of every run
    pub turret_spawn: Vec2,
    /// Left/right strafing speed (pixels per frame)
    pub strafe_speed: f32,
    /// Up/down rotation speed while the crank is docked (degrees per frame)
    pub dock_rotate_speed: f32,

    // === Rules ===
    pub score_per_hit: u32,
    pub max_life: u32,
    pub life_loss_policy: LifeLossPolicy,
    /// Frames between losing the last life and the game-over screen
    pub game_over_delay_frames: u32,

    // === Audio ===
    pub sound_enabled: bool,

    pub assets: AssetManifest,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 30,
            bomb_speed: 1.5,
            seed: 0x00E5_7415,

            bullet_speed: 5.0,
            turret_spawn: Vec2::new(200.0, 220.0),
            strafe_speed: 3.0,
            dock_rotate_speed: 5.0,

            score_per_hit: 100,
            max_life: 3,
            life_loss_policy: LifeLossPolicy::MissedBomb,
            // 2 seconds at 60 fps
            game_over_delay_frames: 120,

            sound_enabled: true,

            assets: AssetManifest::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a host-provided config, falling back to defaults on any problem
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default config");
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded config ({} policy)", config.life_loss_policy.as_str());
                config
            }
            Err(e) => {
                log::warn!("{} - using default config", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.spawn_interval == 0 {
            return Err(GameError::InvalidConfig("spawn_interval must be > 0".into()));
        }
        if self.max_life == 0 {
            return Err(GameError::InvalidConfig("max_life must be > 0".into()));
        }
        if self.bullet_speed.is_nan() || self.bullet_speed <= 0.0 {
            return Err(GameError::InvalidConfig("bullet_speed must be > 0".into()));
        }
        // Bombs that never fall are never culled
        if self.bomb_speed.is_nan() || self.bomb_speed <= 0.0 {
            return Err(GameError::InvalidConfig("bomb_speed must be > 0".into()));
        }
        Ok(())
    }
}
