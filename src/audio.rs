//! Sound cues
//!
//! Sounds are decoded and owned by the host's `AudioDevice`; we keep the
//! handles and decide which one each game event triggers.

use crate::error::GameError;
use crate::platform::{AudioDevice, SoundHandle};
use crate::settings::AssetManifest;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Fire pressed on the title screen
    Start,
    /// Turret fired
    Shot,
    /// Bomb shot down or hit the ground
    Explosion,
    /// Turret destroyed
    PlayerDestroyed,
    /// Game-over banner shown
    GameOver,
}

impl SoundEffect {
    /// The cue a game event plays, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::GameStarted => Some(SoundEffect::Start),
            GameEvent::BulletFired => Some(SoundEffect::Shot),
            GameEvent::BombDestroyed { .. } | GameEvent::BombImpact { .. } => {
                Some(SoundEffect::Explosion)
            }
            GameEvent::PlayerDestroyed { .. } => Some(SoundEffect::PlayerDestroyed),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::Reset => None,
        }
    }
}

/// Handles for every cue, loaded once at session start
#[derive(Debug, Clone, Copy)]
pub struct SoundBank {
    start: SoundHandle,
    shot: SoundHandle,
    explosion: SoundHandle,
    player_destroyed: SoundHandle,
    game_over: SoundHandle,
}

impl SoundBank {
    /// Load every sound in the manifest; any missing file aborts
    pub fn load(audio: &mut dyn AudioDevice, manifest: &AssetManifest) -> Result<Self, GameError> {
        let bank = Self {
            start: audio.load_sound(&manifest.start_sound)?,
            shot: audio.load_sound(&manifest.shot_sound)?,
            explosion: audio.load_sound(&manifest.explosion_sound)?,
            player_destroyed: audio.load_sound(&manifest.player_destroyed_sound)?,
            game_over: audio.load_sound(&manifest.game_over_sound)?,
        };
        log::info!("Loaded {} sounds", manifest.sound_paths().len());
        Ok(bank)
    }

    pub fn handle(&self, effect: SoundEffect) -> SoundHandle {
        match effect {
            SoundEffect::Start => self.start,
            SoundEffect::Shot => self.shot,
            SoundEffect::Explosion => self.explosion,
            SoundEffect::PlayerDestroyed => self.player_destroyed,
            SoundEffect::GameOver => self.game_over,
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    bank: SoundBank,
    muted: bool,
}

impl AudioManager {
    pub fn new(bank: SoundBank) -> Self {
        Self { bank, muted: false }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect once
    pub fn play(&self, audio: &mut dyn AudioDevice, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let status = audio.play(self.bank.handle(effect), 1);
        if status <= 0 {
            log::warn!("Sound {:?} failed to play (status {})", effect, status);
        } else {
            log::trace!("Sound {:?} playing", effect);
        }
    }

    /// Play the cue for each event, in order
    pub fn play_events(&self, audio: &mut dyn AudioDevice, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(audio, effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessAudio;
    use glam::Vec2;

    fn setup() -> (HeadlessAudio, AudioManager, AssetManifest) {
        let manifest = AssetManifest::default();
        let mut audio = HeadlessAudio::from_manifest(&manifest);
        let bank = SoundBank::load(&mut audio, &manifest).unwrap();
        (audio, AudioManager::new(bank), manifest)
    }

    #[test]
    fn test_event_cues() {
        let (mut audio, manager, manifest) = setup();
        let events = [
            GameEvent::GameStarted,
            GameEvent::BulletFired,
            GameEvent::BombDestroyed { position: Vec2::ZERO },
            GameEvent::Reset,
            GameEvent::GameOver,
        ];
        manager.play_events(&mut audio, &events);
        assert_eq!(
            audio.played_paths(),
            vec![
                manifest.start_sound.as_str(),
                manifest.shot_sound.as_str(),
                manifest.explosion_sound.as_str(),
                manifest.game_over_sound.as_str(),
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut audio, mut manager, _) = setup();
        manager.set_muted(true);
        assert!(manager.is_muted());
        manager.play(&mut audio, SoundEffect::Shot);
        assert!(audio.played_paths().is_empty());
    }

    #[test]
    fn test_missing_sound_fails_load() {
        let manifest = AssetManifest::default();
        let mut audio = HeadlessAudio::new();
        audio.register(&manifest.start_sound);
        let err = SoundBank::load(&mut audio, &manifest).unwrap_err();
        assert_eq!(err, GameError::sound_not_found(manifest.shot_sound.clone()));
    }
}
