//! Platform abstraction layer
//!
//! The host console owns bitmap/audio decoding, the frame buffer, buttons
//! and the crank. The simulation only sees these traits:
//! - `Renderer`: bitmap loading and rotated blits
//! - `AudioDevice`: sound loading and playback
//! - `InputDevice`: per-tick button snapshot with edge masks
//! - `CrankSensor`: absolute crank angle and dock state

pub mod headless;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Opaque bitmap handle owned by the renderer's resource table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitmapHandle(pub u32);

/// Opaque sound handle owned by the audio device's resource table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundHandle(pub u32);

/// A loaded bitmap: handle plus intrinsic size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub handle: BitmapHandle,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(handle: BitmapHandle, width: f32, height: f32) -> Self {
        Self {
            handle,
            width,
            height,
        }
    }
}

/// Button bitmask (same bit layout as the console's button register)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Buttons(pub u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const LEFT: Buttons = Buttons(1 << 0);
    pub const RIGHT: Buttons = Buttons(1 << 1);
    pub const UP: Buttons = Buttons(1 << 2);
    pub const DOWN: Buttons = Buttons(1 << 3);
    pub const B: Buttons = Buttons(1 << 4);
    pub const A: Buttons = Buttons(1 << 5);

    #[inline]
    pub fn contains(self, other: Buttons) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

/// Button snapshot for one tick
///
/// `pushed` and `released` are edge masks: a bit is set only on the tick the
/// button changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub current: Buttons,
    pub pushed: Buttons,
    pub released: Buttons,
}

impl ButtonState {
    /// Derive edge masks from the previous and current held masks
    pub fn from_transition(previous: Buttons, current: Buttons) -> Self {
        Self {
            current,
            pushed: Buttons(current.0 & !previous.0),
            released: Buttons(previous.0 & !current.0),
        }
    }
}

pub trait Renderer {
    /// Resolve `path` to a bitmap, failing with `AssetNotFound`
    fn load_bitmap(&mut self, path: &str) -> Result<Sprite, GameError>;

    /// Blit `bitmap` rotated by `degrees` around the normalized center
    /// (`center_x`, `center_y`) placed at (`x`, `y`)
    #[allow(clippy::too_many_arguments)]
    fn draw_rotated(
        &mut self,
        bitmap: BitmapHandle,
        x: i32,
        y: i32,
        degrees: f32,
        center_x: f32,
        center_y: f32,
        scale_x: f32,
        scale_y: f32,
    );
}

pub trait AudioDevice {
    fn load_sound(&mut self, path: &str) -> Result<SoundHandle, GameError>;

    /// Start playback; returns the device status code (positive on success)
    fn play(&mut self, sound: SoundHandle, repeat: i32) -> i32;
}

pub trait InputDevice {
    fn button_state(&mut self) -> ButtonState;
}

pub trait CrankSensor {
    /// Absolute angle in degrees, [0, 360)
    fn angle(&self) -> f32;
    /// Degrees turned since the previous tick
    fn change(&self) -> f32;
    fn is_docked(&self) -> bool;
}

/// Mutable borrows of every host device for the duration of one tick
pub struct Devices<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub audio: &'a mut dyn AudioDevice,
    pub input: &'a mut dyn InputDevice,
    pub crank: &'a dyn CrankSensor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_from_transition() {
        let state = ButtonState::from_transition(Buttons::A | Buttons::LEFT, Buttons::A | Buttons::RIGHT);
        assert!(state.current.contains(Buttons::A));
        assert!(state.pushed.contains(Buttons::RIGHT));
        assert!(!state.pushed.contains(Buttons::A));
        assert!(state.released.contains(Buttons::LEFT));
        assert!(!state.released.contains(Buttons::RIGHT));
        assert!(ButtonState::default().pushed.is_empty());
        assert!(!state.current.contains(Buttons::NONE));
    }
}
