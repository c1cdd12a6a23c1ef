//! In-memory devices for the native binary and tests
//!
//! Nothing is decoded or displayed: bitmaps and sounds are registered by path
//! with a fixed size, draw calls and playback are recorded for inspection.

use std::collections::HashMap;

use super::{
    AudioDevice, BitmapHandle, ButtonState, Buttons, CrankSensor, InputDevice, Renderer,
    SoundHandle, Sprite,
};
use crate::error::GameError;
use crate::settings::AssetManifest;

/// One recorded `draw_rotated` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub bitmap: BitmapHandle,
    pub x: i32,
    pub y: i32,
    pub degrees: f32,
    pub center_x: f32,
    pub center_y: f32,
}

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    bitmaps: HashMap<String, Sprite>,
    paths: HashMap<BitmapHandle, String>,
    next_handle: u32,
    draws: Vec<DrawCall>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every bitmap of a manifest with a plausible size
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut renderer = Self::new();
        renderer.register(&manifest.background, 400.0, 240.0);
        renderer.register(&manifest.logo, 200.0, 60.0);
        renderer.register(&manifest.game_over, 200.0, 60.0);
        renderer.register(&manifest.turret, 16.0, 24.0);
        renderer.register(&manifest.bullet, 4.0, 4.0);
        renderer.register(&manifest.bomb, 12.0, 12.0);
        renderer.register(&manifest.explosion, 24.0, 24.0);
        renderer.register(&manifest.player_explosion, 48.0, 48.0);
        renderer
    }

    /// Make `path` loadable with the given intrinsic size
    pub fn register(&mut self, path: &str, width: f32, height: f32) -> Sprite {
        if let Some(sprite) = self.bitmaps.get(path) {
            return *sprite;
        }
        self.next_handle += 1;
        let handle = BitmapHandle(self.next_handle);
        let sprite = Sprite::new(handle, width, height);
        self.bitmaps.insert(path.to_string(), sprite);
        self.paths.insert(handle, path.to_string());
        sprite
    }

    pub fn path_of(&self, handle: BitmapHandle) -> Option<&str> {
        self.paths.get(&handle).map(String::as_str)
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Drain the recorded draw calls (typically once per frame)
    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draws)
    }

    /// Number of recorded draws of the bitmap registered under `path`
    pub fn draw_count(&self, path: &str) -> usize {
        match self.bitmaps.get(path) {
            Some(sprite) => self
                .draws
                .iter()
                .filter(|d| d.bitmap == sprite.handle)
                .count(),
            None => 0,
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn load_bitmap(&mut self, path: &str) -> Result<Sprite, GameError> {
        self.bitmaps
            .get(path)
            .copied()
            .ok_or_else(|| GameError::bitmap_not_found(path))
    }

    fn draw_rotated(
        &mut self,
        bitmap: BitmapHandle,
        x: i32,
        y: i32,
        degrees: f32,
        center_x: f32,
        center_y: f32,
        _scale_x: f32,
        _scale_y: f32,
    ) {
        self.draws.push(DrawCall {
            bitmap,
            x,
            y,
            degrees,
            center_x,
            center_y,
        });
    }
}

#[derive(Debug, Default)]
pub struct HeadlessAudio {
    sounds: HashMap<String, SoundHandle>,
    paths: HashMap<SoundHandle, String>,
    next_handle: u32,
    played: Vec<SoundHandle>,
}

impl HeadlessAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut audio = Self::new();
        for path in manifest.sound_paths() {
            audio.register(path);
        }
        audio
    }

    pub fn register(&mut self, path: &str) -> SoundHandle {
        if let Some(handle) = self.sounds.get(path) {
            return *handle;
        }
        self.next_handle += 1;
        let handle = SoundHandle(self.next_handle);
        self.sounds.insert(path.to_string(), handle);
        self.paths.insert(handle, path.to_string());
        handle
    }

    /// Paths of every sound played so far, in order
    pub fn played_paths(&self) -> Vec<&str> {
        self.played
            .iter()
            .filter_map(|h| self.paths.get(h).map(String::as_str))
            .collect()
    }

    pub fn clear_played(&mut self) {
        self.played.clear();
    }
}

impl AudioDevice for HeadlessAudio {
    fn load_sound(&mut self, path: &str) -> Result<SoundHandle, GameError> {
        self.sounds
            .get(path)
            .copied()
            .ok_or_else(|| GameError::sound_not_found(path))
    }

    fn play(&mut self, sound: SoundHandle, _repeat: i32) -> i32 {
        if !self.paths.contains_key(&sound) {
            return 0;
        }
        self.played.push(sound);
        1
    }
}

/// Replays a list of held-button masks, one per tick, deriving edge masks
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: Vec<Buttons>,
    cursor: usize,
    previous: Buttons,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Buttons>) -> Self {
        Self {
            frames,
            cursor: 0,
            previous: Buttons::NONE,
        }
    }

    /// Append held masks to the end of the script
    pub fn extend(&mut self, frames: impl IntoIterator<Item = Buttons>) {
        self.frames.extend(frames);
    }

    /// Append a single-tick press followed by a release
    pub fn tap(&mut self, button: Buttons) {
        self.frames.push(button);
        self.frames.push(Buttons::NONE);
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

impl InputDevice for ScriptedInput {
    fn button_state(&mut self) -> ButtonState {
        let current = self.frames.get(self.cursor).copied().unwrap_or(Buttons::NONE);
        self.cursor += 1;
        let state = ButtonState::from_transition(self.previous, current);
        self.previous = current;
        state
    }
}

/// Crank whose angle is set directly by the driver
#[derive(Debug, Clone, Default)]
pub struct ScriptedCrank {
    angle: f32,
    change: f32,
    docked: bool,
}

impl ScriptedCrank {
    pub fn new(angle: f32) -> Self {
        Self {
            angle: crate::normalize_degrees(angle),
            change: 0.0,
            docked: false,
        }
    }

    pub fn docked() -> Self {
        Self {
            docked: true,
            ..Self::default()
        }
    }

    /// Move to an absolute angle, recording the signed shortest change
    pub fn set_angle(&mut self, angle: f32) {
        let angle = crate::normalize_degrees(angle);
        let mut delta = angle - self.angle;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta < -180.0 {
            delta += 360.0;
        }
        self.change = delta;
        self.angle = angle;
    }

    pub fn set_docked(&mut self, docked: bool) {
        self.docked = docked;
    }
}

impl CrankSensor for ScriptedCrank {
    fn angle(&self) -> f32 {
        self.angle
    }

    fn change(&self) -> f32 {
        self.change
    }

    fn is_docked(&self) -> bool {
        self.docked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_assets_fail() {
        let mut renderer = HeadlessRenderer::new();
        assert_eq!(
            renderer.load_bitmap("images/missing.png"),
            Err(GameError::bitmap_not_found("images/missing.png"))
        );

        let mut audio = HeadlessAudio::new();
        assert!(audio.load_sound("sounds/missing").is_err());
    }

    #[test]
    fn test_played_sounds_recorded_and_cleared() {
        let mut audio = HeadlessAudio::new();
        let shot = audio.register("sounds/shot");
        assert_eq!(audio.play(shot, 1), 1);
        assert_eq!(audio.play(SoundHandle(99), 1), 0);
        assert_eq!(audio.played_paths(), vec!["sounds/shot"]);

        audio.clear_played();
        assert!(audio.played_paths().is_empty());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut renderer = HeadlessRenderer::new();
        let a = renderer.register("images/bomb.png", 12.0, 12.0);
        let b = renderer.register("images/bomb.png", 99.0, 99.0);
        assert_eq!(a, b);
        assert_eq!(renderer.path_of(a.handle), Some("images/bomb.png"));
    }

    #[test]
    fn test_scripted_input_edges() {
        let mut input = ScriptedInput::new(vec![Buttons::A, Buttons::A, Buttons::NONE]);
        let first = input.button_state();
        assert!(first.pushed.contains(Buttons::A));
        let held = input.button_state();
        assert!(held.current.contains(Buttons::A));
        assert!(!held.pushed.contains(Buttons::A));
        let released = input.button_state();
        assert!(released.released.contains(Buttons::A));
        assert!(input.is_finished());
        // Past the end of the script nothing is held
        assert_eq!(input.button_state(), ButtonState::default());
    }

    #[test]
    fn test_crank_change_wraps() {
        let mut crank = ScriptedCrank::new(350.0);
        crank.set_angle(10.0);
        assert_eq!(crank.angle(), 10.0);
        assert_eq!(crank.change(), 20.0);
        crank.set_angle(-20.0);
        assert_eq!(crank.angle(), 340.0);
        assert_eq!(crank.change(), -30.0);
    }
}
