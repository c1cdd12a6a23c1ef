//! Per-frame simulation tick
//!
//! One handler per `GamePhase`. Each handler is safe to call every frame and
//! switches phase synchronously; there are no queued transitions.

use super::collision::{sweep, within_distance};
use super::state::{GameEvent, GamePhase, GameState};
use super::vector::VectorExt;
use crate::consts::{BOMB_IMPACT_Y, TURRET_CONTACT_DISTANCE, TURRET_MAX_X, TURRET_MIN_X};
use crate::normalize_degrees;
use crate::platform::{ButtonState, Buttons, CrankSensor};
use crate::settings::LifeLossPolicy;
use glam::Vec2;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Absolute crank angle in degrees; `None` while the crank is docked
    pub crank_angle: Option<f32>,
    /// Fire button pressed this tick (edge, not held)
    pub fire: bool,
    /// Strafe held
    pub left: bool,
    pub right: bool,
    /// Docked-crank rotation held
    pub rotate_ccw: bool,
    pub rotate_cw: bool,
}

impl TickInput {
    /// Build the tick input from a button snapshot and the crank
    pub fn sample(buttons: ButtonState, crank: &dyn CrankSensor) -> Self {
        let crank_angle = if crank.is_docked() {
            None
        } else {
            Some(crank.angle())
        };
        Self {
            crank_angle,
            fire: buttons.pushed.contains(Buttons::A),
            left: buttons.current.contains(Buttons::LEFT),
            right: buttons.current.contains(Buttons::RIGHT),
            rotate_ccw: buttons.current.contains(Buttons::UP),
            rotate_cw: buttons.current.contains(Buttons::DOWN),
        }
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Default::default()
        }
    }
}

/// Advance the game by one frame, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    match state.phase {
        GamePhase::Ready => tick_ready(state, input, &mut events),
        GamePhase::Playing => tick_playing(state, input, &mut events),
        GamePhase::GameOverDelay => tick_game_over_delay(state, &mut events),
        GamePhase::Over => tick_over(state, input, &mut events),
    }
    events
}

fn tick_ready(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.fire {
        state.frame_count = 0;
        state.enter(GamePhase::Playing);
        events.push(GameEvent::GameStarted);
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    state.frame_count += 1;

    // Turret aim and strafe
    match input.crank_angle {
        Some(angle) => state.turret.rotation = angle,
        None => {
            let step = state.config.dock_rotate_speed;
            if input.rotate_ccw {
                state.turret.rotation = normalize_degrees(state.turret.rotation - step);
            }
            if input.rotate_cw {
                state.turret.rotation = normalize_degrees(state.turret.rotation + step);
            }
        }
    }
    if input.left {
        state.turret.position.x -= state.config.strafe_speed;
    }
    if input.right {
        state.turret.position.x += state.config.strafe_speed;
    }
    state.turret.position.x = state.turret.position.x.clamp(TURRET_MIN_X, TURRET_MAX_X);

    if input.fire {
        // Rotation 0 points up the screen
        let velocity =
            Vec2::from_angle_degrees(state.turret.rotation - 90.0) * state.config.bullet_speed;
        state
            .pools
            .spawn_bullet(state.sprites.bullet, state.turret.position, velocity);
        events.push(GameEvent::BulletFired);
    }

    if let Some(position) = state.spawner.poll(state.frame_count) {
        log::debug!("Bomb spawned at x={} (frame {})", position.x, state.frame_count);
        let velocity = Vec2::new(0.0, state.config.bomb_speed);
        state.pools.spawn_bomb(state.sprites.bomb, position, velocity);
    }

    state.pools.advance_projectiles();
    state.pools.age_explosions();

    resolve_collisions(state, events);

    match state.config.life_loss_policy {
        LifeLossPolicy::MissedBomb => resolve_missed_bombs(state, events),
        LifeLossPolicy::TurretContact => {
            let turret = &state.turret;
            let touched = state
                .pools
                .bombs
                .iter()
                .any(|bomb| within_distance(turret, bomb, TURRET_CONTACT_DISTANCE));
            if touched {
                events.push(GameEvent::PlayerDestroyed {
                    position: state.turret.position,
                });
                end_run(state, events);
                return;
            }
        }
    }

    state.pools.cull();

    if state.config.life_loss_policy == LifeLossPolicy::MissedBomb && state.life == 0 {
        let position = state.turret.position;
        log::info!("Player destroyed (score {})", state.score);
        state
            .pools
            .spawn_explosion(state.sprites.player_explosion, position);
        state.pools.bullets.clear();
        state.game_over_delay_timer = 0;
        state.enter(GamePhase::GameOverDelay);
        events.push(GameEvent::PlayerDestroyed { position });
    }
}

/// Bullet x bomb sweep: every overlapping pair scores and explodes
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let hits = sweep(&state.pools.bullets, &state.pools.bombs);
    if hits.is_empty() {
        return;
    }

    let mut bullet_indices = Vec::with_capacity(hits.len());
    let mut bomb_indices = Vec::with_capacity(hits.len());
    for hit in &hits {
        let position = state.pools.bombs[hit.bomb].position;
        state.score += state.config.score_per_hit;
        state
            .pools
            .spawn_explosion(state.sprites.explosion, position);
        events.push(GameEvent::BombDestroyed { position });
        bullet_indices.push(hit.bullet);
        bomb_indices.push(hit.bomb);
    }
    log::debug!("{} hit(s), score {}", hits.len(), state.score);

    state.pools.remove_bullets(bullet_indices);
    state.pools.remove_bombs(bomb_indices);
}

/// Bombs reaching the bottom line cost a life each
fn resolve_missed_bombs(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let missed: Vec<usize> = state
        .pools
        .bombs
        .iter()
        .enumerate()
        .filter(|(_, bomb)| bomb.position.y >= BOMB_IMPACT_Y)
        .map(|(idx, _)| idx)
        .collect();

    for &idx in &missed {
        let position = state.pools.bombs[idx].position;
        state.life = state.life.saturating_sub(1);
        state
            .pools
            .spawn_explosion(state.sprites.explosion, position);
        events.push(GameEvent::BombImpact { position });
        log::debug!("Bomb impact at x={}, lives left: {}", position.x, state.life);
    }

    state.pools.remove_bombs(missed);
}

fn tick_game_over_delay(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.pools.advance_bombs();
    state.pools.age_explosions();
    state.pools.cull();

    state.game_over_delay_timer += 1;
    if state.game_over_delay_timer >= state.config.game_over_delay_frames {
        end_run(state, events);
    }
}

fn tick_over(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.fire {
        state.reset();
        state.enter(GamePhase::Ready);
        events.push(GameEvent::Reset);
    }
}

fn end_run(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.record_best();
    log::info!("Game over: score {} (best {})", state.score, state.best_score);
    state.enter(GamePhase::Over);
    events.push(GameEvent::GameOver);
}
