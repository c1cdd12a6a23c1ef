//! Game state and core simulation types
//!
//! Everything the phase handlers read or write lives on `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::pools::EntityPools;
use super::spawn::SpawnScheduler;
use crate::platform::Sprite;
use crate::settings::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Title screen, waiting for the fire button
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Last life lost; bombs and explosions play out before the banner
    GameOverDelay,
    /// Game-over banner, waiting for the fire button
    Over,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Ready => "Ready",
            GamePhase::Playing => "Playing",
            GamePhase::GameOverDelay => "GameOverDelay",
            GamePhase::Over => "Over",
        }
    }
}

/// Something that happened during a tick; the session turns these into sounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ready -> Playing
    GameStarted,
    BulletFired,
    BombDestroyed { position: Vec2 },
    /// A bomb reached the bottom of the screen
    BombImpact { position: Vec2 },
    PlayerDestroyed { position: Vec2 },
    /// Entered the Over phase
    GameOver,
    /// Over -> Ready
    Reset,
}

/// Bitmaps the simulation spawns entities from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub turret: Sprite,
    pub bullet: Sprite,
    pub bomb: Sprite,
    pub explosion: Sprite,
    pub player_explosion: Sprite,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub sprites: SpriteSet,
    pub phase: GamePhase,
    pub score: u32,
    /// Best score reached this session (not persisted)
    pub best_score: u32,
    pub life: u32,
    /// Frames since entering Playing
    pub frame_count: u64,
    pub game_over_delay_timer: u32,
    pub turret: Entity,
    pub pools: EntityPools,
    pub spawner: SpawnScheduler,
}

impl GameState {
    pub fn new(config: GameConfig, sprites: SpriteSet) -> Self {
        let turret = Entity::at(sprites.turret, config.turret_spawn);
        let spawner = SpawnScheduler::new(config.spawn_interval, config.seed);
        Self {
            phase: GamePhase::Ready,
            score: 0,
            best_score: 0,
            life: config.max_life,
            frame_count: 0,
            game_over_delay_timer: 0,
            turret,
            pools: EntityPools::new(),
            spawner,
            config,
            sprites,
        }
    }

    /// Back to a fresh run: counters, pools, turret and spawn sequence
    pub fn reset(&mut self) {
        self.score = 0;
        self.life = self.config.max_life;
        self.frame_count = 0;
        self.game_over_delay_timer = 0;
        self.pools.clear();
        self.turret = Entity::at(self.sprites.turret, self.config.turret_spawn);
        self.spawner.reseed(self.config.seed);
    }

    pub fn record_best(&mut self) {
        self.best_score = self.best_score.max(self.score);
    }

    /// Switch phase, logging the transition
    pub fn enter(&mut self, phase: GamePhase) {
        log::info!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
        self.phase = phase;
    }
}
