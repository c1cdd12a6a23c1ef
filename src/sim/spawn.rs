//! Bomb spawning on a fixed frame cadence

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{BOMB_SPAWN_MARGIN, BOMB_SPAWN_WIDTH, BOMB_SPAWN_Y};

/// Spawns one bomb every `interval` frames at a pseudo-random x
///
/// The RNG is a type parameter so tests and replays can swap in any
/// `RngCore`; the default is a seeded PCG.
#[derive(Debug, Clone)]
pub struct SpawnScheduler<R: RngCore = Pcg32> {
    interval: u32,
    rng: R,
}

impl SpawnScheduler<Pcg32> {
    pub fn new(interval: u32, seed: u64) -> Self {
        Self::with_rng(interval, Pcg32::seed_from_u64(seed))
    }

    /// Restart the position sequence from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }
}

impl<R: RngCore> SpawnScheduler<R> {
    pub fn with_rng(interval: u32, rng: R) -> Self {
        Self {
            interval: interval.max(1),
            rng,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// True on frames interval, 2*interval, ... (never on frame 0)
    #[inline]
    pub fn should_spawn(&self, frame: u64) -> bool {
        frame > 0 && frame % self.interval as u64 == 0
    }

    /// x in [10, 390), uniform over the visible width minus the margins
    pub fn spawn_x(&mut self) -> f32 {
        (self.rng.next_u32() % BOMB_SPAWN_WIDTH) as f32 + BOMB_SPAWN_MARGIN
    }

    /// Spawn position for this frame, if any
    pub fn poll(&mut self, frame: u64) -> Option<Vec2> {
        if !self.should_spawn(frame) {
            return None;
        }
        Some(Vec2::new(self.spawn_x(), BOMB_SPAWN_Y))
    }
}
