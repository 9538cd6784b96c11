//! Math helpers layered on top of `glam`.

use glam::DVec2;

/// Normal used when two centers coincide and no direction can be derived.
pub const FALLBACK_NORMAL: DVec2 = DVec2::X;

const DIRECTION_EPSILON: f64 = 1e-12;

/// Unit vector pointing from `from` toward `to`, falling back to
/// [`FALLBACK_NORMAL`] when the points are too close to define a direction.
pub fn contact_normal(from: DVec2, to: DVec2) -> DVec2 {
    let delta = to - from;
    let length_squared = delta.length_squared();
    if length_squared < DIRECTION_EPSILON {
        return FALLBACK_NORMAL;
    }
    delta / length_squared.sqrt()
}

/// Maps `value` into `[min, max]` by Euclidean remainder over the axis range.
pub fn wrap_component(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    min + (value - min).rem_euclid(range)
}
