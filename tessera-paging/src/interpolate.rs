//! Linear blending of colours and geometry by a transition progress.
//!
//! Progress is not clamped. Values outside `[0, 1]` extrapolate linearly;
//! keeping progress in range is the caller's job.

use crate::color::Color;

/// Values that can be blended linearly between two endpoints.
pub trait Interpolate: Copy {
    /// Returns `from + (to - from) * progress`, per component.
    fn interpolate(from: Self, to: Self, progress: f32) -> Self;
}

/// Scalar blend.
#[inline]
pub fn lerp(from: f32, to: f32, progress: f32) -> f32 {
    from + (to - from) * progress
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(from: Self, to: Self, progress: f32) -> Self {
        lerp(from, to, progress)
    }
}

impl Interpolate for Color {
    fn interpolate(from: Self, to: Self, progress: f32) -> Self {
        Color {
            r: lerp(from.r, to.r, progress),
            g: lerp(from.g, to.g, progress),
            b: lerp(from.b, to.b, progress),
            a: lerp(from.a, to.a, progress),
        }
    }
}

/// Shorthand for [`Interpolate::interpolate`].
#[inline]
pub fn blend<T: Interpolate>(from: T, to: T, progress: f32) -> T {
    T::interpolate(from, to, progress)
}
