//! Erythrina headless runner
//!
//! Drives a session against in-memory devices: the turret sweeps the crank
//! back and forth and fires on a fixed cadence until the run ends.
//!
//! Usage: erythrina [CONFIG_JSON] [FRAMES] [POLICY]

use erythrina::platform::headless::{HeadlessAudio, HeadlessRenderer, ScriptedCrank, ScriptedInput};
use erythrina::platform::{Buttons, CrankSensor, Devices};
use erythrina::sim::{GameEvent, GamePhase};
use erythrina::{GameConfig, GameError, GameSession, LifeLossPolicy};

const DEFAULT_FRAMES: u64 = 3_000;
/// Frames between shots
const FIRE_CADENCE: u64 = 6;
/// Crank sweep per frame, degrees
const CRANK_STEP: f32 = 3.0;

fn load_config(path: Option<&str>, policy: Option<&str>) -> GameConfig {
    let json = path.and_then(|p| match std::fs::read_to_string(p) {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("Could not read {}: {}", p, e);
            None
        }
    });
    let mut config = GameConfig::from_json_or_default(json.as_deref());
    if let Some(name) = policy {
        match LifeLossPolicy::from_str(name) {
            Some(p) => config.life_loss_policy = p,
            None => log::warn!("Unknown life-loss policy '{}', keeping {}", name, config.life_loss_policy.as_str()),
        }
    }
    config
}

fn run(config: GameConfig, frames: u64) -> Result<(), GameError> {
    let mut renderer = HeadlessRenderer::from_manifest(&config.assets);
    let mut audio = HeadlessAudio::from_manifest(&config.assets);
    let mut session = GameSession::new(config, &mut renderer, &mut audio)?;

    let mut input = ScriptedInput::default();
    let mut crank = ScriptedCrank::new(270.0);
    let mut sweep = CRANK_STEP;
    let mut runs = 0u32;

    // Host frame callback
    let mut on_frame = |frame: u64, session: &mut GameSession| {
        let held = match session.phase() {
            // Tap (not hold) so each press is a fresh edge
            GamePhase::Ready | GamePhase::Over if frame % 2 == 0 => Buttons::A,
            GamePhase::Playing if frame % FIRE_CADENCE == 0 => Buttons::A,
            _ => Buttons::NONE,
        };
        input.extend([held]);

        let angle = crank.angle() + sweep;
        if !(225.0..=315.0).contains(&angle) {
            sweep = -sweep;
        }
        crank.set_angle(angle);

        renderer.take_draws();
        let mut devices = Devices {
            renderer: &mut renderer,
            audio: &mut audio,
            input: &mut input,
            crank: &crank,
        };
        session.update(&mut devices)
    };

    for frame in 0..frames {
        for event in on_frame(frame, &mut session) {
            match event {
                GameEvent::GameStarted => {
                    runs += 1;
                    log::info!("Run {} started", runs);
                }
                GameEvent::GameOver => {
                    log::info!("Run {} over: score {} (best {})", runs, session.score(), session.best_score());
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Finished {} frames: {} runs, phase {}, score {}, best {}, life {}",
        session.ticks(),
        runs,
        session.phase().as_str(),
        session.score(),
        session.best_score(),
        session.life()
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Erythrina (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str), args.get(2).map(String::as_str));
    let frames = match args.get(1).map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad frame count: {}, using {}", e, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }
        None => DEFAULT_FRAMES,
    };

    if let Err(e) = run(config, frames) {
        log::error!("Session setup failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
