use crate::Vec2;

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Vec2 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Vec2 {
            x: self.x.interpolate(&other.x, t),
            y: self.y.interpolate(&other.y, t),
        }
    }
}

/// Interpolate with `t` clamped to `[0, 1]`. NaN is treated as 0.
pub fn lerp<T: Interpolate>(from: &T, to: &T, t: f32) -> T {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    from.interpolate(to, t)
}

/// Progress of `elapsed` through `duration` in `[0, 1]`.
///
/// Zero or negative durations are already finished, so the ramp jumps
/// straight to its end value instead of dividing by zero.
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}
