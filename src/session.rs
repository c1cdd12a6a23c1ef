//! One game session: input -> tick -> sound -> draw, once per host frame
//!
//! The host owns the session value and calls `update` from its frame
//! callback. All assets are loaded up front; a missing bitmap or sound
//! aborts construction.

use glam::Vec2;

use crate::audio::{AudioManager, SoundBank};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::GameError;
use crate::platform::{AudioDevice, Devices, Renderer};
use crate::settings::GameConfig;
use crate::sim::{Entity, GameEvent, GamePhase, GameState, SpriteSet, TickInput, tick};

/// Static screens drawn behind or instead of gameplay
#[derive(Debug, Clone)]
struct Backdrop {
    background: Entity,
    logo: Entity,
    game_over: Entity,
}

pub struct GameSession {
    state: GameState,
    backdrop: Backdrop,
    audio: AudioManager,
    /// Total frames since the session started (never reset)
    ticks: u64,
}

impl GameSession {
    pub fn new(
        config: GameConfig,
        renderer: &mut dyn Renderer,
        audio: &mut dyn AudioDevice,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let assets = &config.assets;

        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        let backdrop = Backdrop {
            background: Entity::load(renderer, &assets.background)?.with_anchor(Vec2::ZERO),
            logo: Entity::at(renderer.load_bitmap(&assets.logo)?, center - Vec2::new(0.0, 20.0)),
            game_over: Entity::at(renderer.load_bitmap(&assets.game_over)?, center),
        };

        let sprites = SpriteSet {
            turret: renderer.load_bitmap(&assets.turret)?,
            bullet: renderer.load_bitmap(&assets.bullet)?,
            bomb: renderer.load_bitmap(&assets.bomb)?,
            explosion: renderer.load_bitmap(&assets.explosion)?,
            player_explosion: renderer.load_bitmap(&assets.player_explosion)?,
        };
        log::info!("Loaded {} bitmaps", assets.bitmap_paths().len());

        let mut manager = AudioManager::new(SoundBank::load(audio, assets)?);
        manager.set_muted(!config.sound_enabled);

        log::info!(
            "Session ready: spawn every {} frames, {} lives, {} policy",
            config.spawn_interval,
            config.max_life,
            config.life_loss_policy.as_str()
        );

        Ok(Self {
            state: GameState::new(config, sprites),
            backdrop,
            audio: manager,
            ticks: 0,
        })
    }

    /// Run one frame against the host devices
    pub fn update(&mut self, devices: &mut Devices<'_>) -> Vec<GameEvent> {
        self.ticks += 1;

        let buttons = devices.input.button_state();
        let crank_change = devices.crank.change();
        if crank_change != 0.0 {
            log::trace!("Crank moved {:.1} degrees", crank_change);
        }
        let input = TickInput::sample(buttons, devices.crank);

        let events = tick(&mut self.state, &input);
        self.audio.play_events(devices.audio, &events);
        self.draw(devices.renderer);
        events
    }

    /// Draw the current phase
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let backdrop = &self.backdrop;
        let pools = &self.state.pools;

        backdrop.background.draw(renderer);
        match self.state.phase {
            GamePhase::Ready => backdrop.logo.draw(renderer),
            GamePhase::Playing => {
                self.state.turret.draw(renderer);
                for bullet in &pools.bullets {
                    bullet.draw(renderer);
                }
                for bomb in &pools.bombs {
                    bomb.draw(renderer);
                }
                for explosion in &pools.explosions {
                    explosion.draw(renderer);
                }
            }
            GamePhase::GameOverDelay => {
                for bomb in &pools.bombs {
                    bomb.draw(renderer);
                }
                for explosion in &pools.explosions {
                    explosion.draw(renderer);
                }
            }
            GamePhase::Over => backdrop.game_over.draw(renderer),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    pub fn life(&self) -> u32 {
        self.state.life
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Buttons;
    use crate::platform::headless::{HeadlessAudio, HeadlessRenderer, ScriptedCrank, ScriptedInput};

    struct Rig {
        renderer: HeadlessRenderer,
        audio: HeadlessAudio,
        input: ScriptedInput,
        crank: ScriptedCrank,
    }

    impl Rig {
        fn new(config: &GameConfig) -> Self {
            Self {
                renderer: HeadlessRenderer::from_manifest(&config.assets),
                audio: HeadlessAudio::from_manifest(&config.assets),
                input: ScriptedInput::default(),
                crank: ScriptedCrank::new(0.0),
            }
        }

        fn step(&mut self, session: &mut GameSession) -> Vec<GameEvent> {
            self.renderer.take_draws();
            let mut devices = Devices {
                renderer: &mut self.renderer,
                audio: &mut self.audio,
                input: &mut self.input,
                crank: &self.crank,
            };
            session.update(&mut devices)
        }
    }

    fn session() -> (GameSession, Rig) {
        let config = GameConfig::default();
        let mut rig = Rig::new(&config);
        let session = GameSession::new(config, &mut rig.renderer, &mut rig.audio).unwrap();
        (session, rig)
    }

    #[test]
    fn test_missing_bitmap_aborts_setup() {
        let config = GameConfig::default();
        let mut renderer = HeadlessRenderer::new();
        renderer.register(&config.assets.background, 400.0, 240.0);
        let mut audio = HeadlessAudio::from_manifest(&config.assets);
        let result = GameSession::new(config.clone(), &mut renderer, &mut audio);
        assert_eq!(
            result.err(),
            Some(GameError::bitmap_not_found(config.assets.logo.clone()))
        );
    }

    #[test]
    fn test_missing_sound_aborts_setup() {
        let config = GameConfig::default();
        let mut renderer = HeadlessRenderer::from_manifest(&config.assets);
        let mut audio = HeadlessAudio::new();
        let result = GameSession::new(config.clone(), &mut renderer, &mut audio);
        assert!(matches!(result, Err(GameError::AssetNotFound { .. })));
    }

    #[test]
    fn test_ready_draws_background_and_logo() {
        let (mut session, mut rig) = session();
        rig.step(&mut session);
        let assets = GameConfig::default().assets;
        assert_eq!(rig.renderer.draws().len(), 2);
        assert_eq!(rig.renderer.draw_count(&assets.background), 1);
        assert_eq!(rig.renderer.draw_count(&assets.logo), 1);
    }

    #[test]
    fn test_start_plays_cue_and_draws_turret() {
        let (mut session, mut rig) = session();
        rig.input.tap(Buttons::A);
        let events = rig.step(&mut session);
        assert_eq!(events, vec![GameEvent::GameStarted]);
        assert_eq!(session.phase(), GamePhase::Playing);

        let assets = GameConfig::default().assets;
        assert_eq!(rig.audio.played_paths(), vec![assets.start_sound.as_str()]);
        assert_eq!(rig.renderer.draw_count(&assets.turret), 1);
        assert_eq!(rig.renderer.draw_count(&assets.logo), 0);
    }

    #[test]
    fn test_crank_drives_turret() {
        let (mut session, mut rig) = session();
        rig.input.tap(Buttons::A);
        rig.step(&mut session);
        rig.crank.set_angle(135.0);
        rig.step(&mut session);
        assert_eq!(session.state().turret.rotation, 135.0);

        let turret = rig.renderer.load_bitmap(&GameConfig::default().assets.turret).unwrap();
        let draw = rig
            .renderer
            .draws()
            .iter()
            .find(|d| d.bitmap == turret.handle)
            .copied()
            .unwrap();
        assert_eq!(draw.degrees, 135.0);
    }

    #[test]
    fn test_muted_session_is_silent() {
        let config = GameConfig {
            sound_enabled: false,
            ..GameConfig::default()
        };
        let mut rig = Rig::new(&config);
        let mut session = GameSession::new(config, &mut rig.renderer, &mut rig.audio).unwrap();
        rig.input.tap(Buttons::A);
        rig.step(&mut session);
        assert!(rig.audio.played_paths().is_empty());

        session.set_muted(false);
        rig.input.tap(Buttons::A);
        rig.step(&mut session);
        rig.step(&mut session);
        assert_eq!(rig.audio.played_paths(), vec!["sounds/shot"]);
        assert_eq!(session.ticks(), 3);
    }
}
