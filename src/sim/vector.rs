//! 2D vector helpers on top of `glam::Vec2`
//!
//! glam covers the arithmetic operators, `length`, `dot`, `distance` and
//! `lerp`. This trait fills in the turret-game specific bits: degree-based
//! construction, zero-safe normalisation, rotation and clamping.

use glam::Vec2;

pub trait VectorExt: Sized {
    /// Unit vector pointing at `degrees` (0 = +x, 90 = +y, screen space)
    fn from_angle_degrees(degrees: f32) -> Self;

    /// Unit-length copy, or zero when the length is zero
    fn normalized(self) -> Self;

    /// Rotate by `radians` using the standard 2D rotation matrix
    fn rotated(self, radians: f32) -> Self;

    fn rotated_degrees(self, degrees: f32) -> Self;

    /// Z component of the 3D cross product
    fn cross(self, other: Self) -> f32;

    /// Same direction, new length (zero stays zero)
    fn resized(self, length: f32) -> Self;

    /// Clamp each component to [min, max]
    fn clamped(self, min: f32, max: f32) -> Self;

    /// Clamp the length to [min, max], keeping the direction
    fn clamped_length(self, min: f32, max: f32) -> Self;

    /// Unsigned angle between two vectors in radians (0 if either is zero)
    fn angle_between(self, other: Self) -> f32;
}

impl VectorExt for Vec2 {
    #[inline]
    fn from_angle_degrees(degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }

    #[inline]
    fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 { self / len } else { Vec2::ZERO }
    }

    #[inline]
    fn rotated(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    fn rotated_degrees(self, degrees: f32) -> Self {
        self.rotated(degrees.to_radians())
    }

    #[inline]
    fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    fn resized(self, length: f32) -> Self {
        self.normalized() * length
    }

    #[inline]
    fn clamped(self, min: f32, max: f32) -> Self {
        Vec2::new(self.x.max(min).min(max), self.y.max(min).min(max))
    }

    fn clamped_length(self, min: f32, max: f32) -> Self {
        let len = self.length();
        if len < min {
            self.resized(min)
        } else if len > max {
            self.resized(max)
        } else {
            self
        }
    }

    fn angle_between(self, other: Self) -> f32 {
        let lengths = self.length() * other.length();
        if lengths <= 0.0 {
            return 0.0;
        }
        (self.dot(other) / lengths).clamp(-1.0, 1.0).acos()
    }
}
