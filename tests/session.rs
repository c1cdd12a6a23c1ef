//! End-to-end runs of a session against the headless devices

use erythrina::platform::headless::{HeadlessAudio, HeadlessRenderer, ScriptedCrank, ScriptedInput};
use erythrina::platform::{Buttons, Devices};
use erythrina::sim::{GameEvent, GamePhase};
use erythrina::{GameConfig, GameError, GameSession, LifeLossPolicy};

struct Host {
    renderer: HeadlessRenderer,
    audio: HeadlessAudio,
    input: ScriptedInput,
    crank: ScriptedCrank,
    session: GameSession,
    /// Held mask fed on the previous frame
    last: Buttons,
}

impl Host {
    fn new(config: GameConfig) -> Self {
        let mut renderer = HeadlessRenderer::from_manifest(&config.assets);
        let mut audio = HeadlessAudio::from_manifest(&config.assets);
        let session = GameSession::new(config, &mut renderer, &mut audio).unwrap();
        Self {
            renderer,
            audio,
            input: ScriptedInput::default(),
            crank: ScriptedCrank::new(0.0),
            session,
            last: Buttons::NONE,
        }
    }

    /// Run one frame with `held` as the button mask
    fn frame(&mut self, held: Buttons) -> Vec<GameEvent> {
        self.input.extend([held]);
        self.last = held;
        self.renderer.take_draws();
        let mut devices = Devices {
            renderer: &mut self.renderer,
            audio: &mut self.audio,
            input: &mut self.input,
            crank: &self.crank,
        };
        self.session.update(&mut devices)
    }

    /// Press fire, releasing first if it was already held
    fn press_fire(&mut self) -> Vec<GameEvent> {
        if self.last.contains(Buttons::A) {
            self.frame(Buttons::NONE);
        }
        self.frame(Buttons::A)
    }

    /// Strafe under the lowest bomb at least `clearance` px above the turret;
    /// fire when lined up
    fn track(&mut self, clearance: f32, fire: bool) -> Vec<GameEvent> {
        let state = self.session.state();
        let turret = state.turret.position;
        let target = state
            .pools
            .bombs
            .iter()
            .filter(|b| b.position.y < turret.y - clearance)
            .max_by(|a, b| a.position.y.total_cmp(&b.position.y))
            .map(|b| b.position.x);

        let mut held = Buttons::NONE;
        if let Some(x) = target {
            let dx = x - turret.x;
            if dx < -1.5 {
                held = held | Buttons::LEFT;
            } else if dx > 1.5 {
                held = held | Buttons::RIGHT;
            }
            if fire && dx.abs() < 4.0 && !self.last.contains(Buttons::A) {
                held = held | Buttons::A;
            }
        }
        self.frame(held)
    }
}

#[test]
fn test_full_cycle_without_shooting() {
    let config = GameConfig::default();
    let assets = config.assets.clone();
    let mut host = Host::new(config);

    assert!(host.frame(Buttons::NONE).is_empty());
    assert_eq!(host.session.phase(), GamePhase::Ready);

    assert_eq!(host.press_fire(), vec![GameEvent::GameStarted]);
    assert_eq!(host.session.phase(), GamePhase::Playing);

    // Every bomb falls through; three impacts end the run
    let mut impacts = 0;
    let mut frames = 0;
    while host.session.phase() == GamePhase::Playing {
        let events = host.frame(Buttons::NONE);
        impacts += events
            .iter()
            .filter(|e| matches!(e, GameEvent::BombImpact { .. }))
            .count();
        frames += 1;
        assert!(frames < 1_000, "run never ended");
    }
    assert_eq!(impacts, 3);
    assert_eq!(host.session.phase(), GamePhase::GameOverDelay);
    assert_eq!(host.session.life(), 0);
    assert_eq!(host.session.score(), 0);
    assert!(host.session.state().pools.bullets.is_empty());
    assert!(
        host.audio
            .played_paths()
            .contains(&assets.player_destroyed_sound.as_str())
    );

    // Delay phase: no turret, no input handling
    for _ in 0..119 {
        let events = host.frame(Buttons::A);
        assert!(events.is_empty());
        assert_eq!(host.renderer.draw_count(&assets.turret), 0);
        assert_eq!(host.renderer.draw_count(&assets.background), 1);
    }
    assert_eq!(host.frame(Buttons::NONE), vec![GameEvent::GameOver]);
    assert_eq!(host.session.phase(), GamePhase::Over);
    assert_eq!(host.renderer.draw_count(&assets.game_over), 1);
    assert_eq!(host.renderer.draws().len(), 2);
    assert_eq!(
        host.audio.played_paths().last().copied(),
        Some(assets.game_over_sound.as_str())
    );

    assert_eq!(host.press_fire(), vec![GameEvent::Reset]);
    assert_eq!(host.session.phase(), GamePhase::Ready);
    assert_eq!(host.session.life(), 3);
    assert!(host.session.state().pools.is_empty());
    assert_eq!(host.renderer.draw_count(&assets.logo), 1);

    assert_eq!(host.press_fire(), vec![GameEvent::GameStarted]);
    assert_eq!(host.session.phase(), GamePhase::Playing);
}

#[test]
fn test_tracking_player_scores() {
    let mut host = Host::new(GameConfig::default());
    host.press_fire();

    let mut destroyed = 0;
    for _ in 0..600 {
        let events = host.track(20.0, true);
        destroyed += events
            .iter()
            .filter(|e| matches!(e, GameEvent::BombDestroyed { .. }))
            .count();
        if host.session.phase() != GamePhase::Playing {
            break;
        }
    }

    assert!(destroyed > 0);
    assert_eq!(host.session.score(), destroyed as u32 * 100);
}

#[test]
fn test_turret_contact_ends_run_immediately() {
    let config = GameConfig::from_json(r#"{ "life_loss_policy": "TurretContact" }"#).unwrap();
    assert_eq!(config.life_loss_policy, LifeLossPolicy::TurretContact);
    let mut host = Host::new(config);
    host.press_fire();

    let mut ended = None;
    for _ in 0..1_000 {
        let events = host.track(-10.0, false);
        if events.contains(&GameEvent::GameOver) {
            ended = Some(events);
            break;
        }
    }

    let events = ended.expect("a bomb should reach the turret");
    assert!(matches!(events[0], GameEvent::PlayerDestroyed { .. }));
    assert_eq!(host.session.phase(), GamePhase::Over);
    // No life is spent under this policy
    assert_eq!(host.session.life(), 3);
}

#[test]
fn test_docked_crank_uses_buttons() {
    let mut host = Host::new(GameConfig::default());
    host.crank.set_docked(true);
    host.press_fire();

    for _ in 0..3 {
        host.frame(Buttons::DOWN);
    }
    assert_eq!(host.session.state().turret.rotation, 15.0);

    host.frame(Buttons::UP);
    assert_eq!(host.session.state().turret.rotation, 10.0);
}

#[test]
fn test_missing_asset_fails_setup() {
    let config = GameConfig::default();
    let mut renderer = HeadlessRenderer::from_manifest(&config.assets);
    let mut audio = HeadlessAudio::new();
    audio.register(&config.assets.start_sound);

    match GameSession::new(config.clone(), &mut renderer, &mut audio) {
        Err(e) => assert_eq!(e, GameError::sound_not_found(config.assets.shot_sound.clone())),
        Ok(_) => panic!("setup should fail without sounds"),
    }
}

#[test]
fn test_invalid_config_rejected() {
    let config = GameConfig {
        spawn_interval: 0,
        ..GameConfig::default()
    };
    let mut renderer = HeadlessRenderer::from_manifest(&config.assets);
    let mut audio = HeadlessAudio::from_manifest(&config.assets);
    assert!(matches!(
        GameSession::new(config, &mut renderer, &mut audio),
        Err(GameError::InvalidConfig(_))
    ));
}
