use nalgebra as na;

// NOTE: Keep this file focused on per-tick velocity math; ground and contact
// logic lives under `collision`.
use crate::collision::types::{Vec2, Vec3};
use crate::constants::{DIR_EPS, MOVE_TOWARDS_REL_EPS};

/// Step `current` toward `target` by at most `max_delta`.
///
/// - If the remaining gap is within `max_delta`, returns `target` exactly (snap).
/// - Otherwise moves along the straight line by exactly `max_delta`.
/// - `max_delta` is clamped to be non-negative, so a zero budget never changes `current`.
///
/// The snap test carries a small relative slack (`MOVE_TOWARDS_REL_EPS`) so a run of
/// equal-sized f32 steps lands on the target on the tick the exact arithmetic would.
#[inline]
pub fn move_towards<const D: usize>(
    current: na::SVector<f32, D>,
    target: na::SVector<f32, D>,
    max_delta: f32,
) -> na::SVector<f32, D> {
    let budget = max_delta.max(0.0);
    let delta = target - current;
    let dist = delta.norm();

    if dist <= budget * (1.0 + MOVE_TOWARDS_REL_EPS) {
        return target;
    }

    // Safe: dist > budget >= 0.
    current + delta * (budget / dist)
}

/// Horizontal (XZ) part of a world vector, as a 2D vector `(x, z)`.
#[inline]
pub fn to_planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Lift a planar `(x, z)` vector back into world space with the given `y`.
#[inline]
pub fn from_planar(xz: Vec2, y: f32) -> Vec3 {
    Vec3::new(xz.x, y, xz.y)
}

/// Normalize, mapping near-zero vectors to exactly zero.
#[inline]
pub fn normalize_or_zero<const D: usize>(v: na::SVector<f32, D>) -> na::SVector<f32, D> {
    v.try_normalize(DIR_EPS).unwrap_or_else(na::SVector::zeros)
}

/// Remove the component of `v` along `normal` (which need not be unit length).
#[inline]
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let n_len_sq = normal.norm_squared();
    if n_len_sq <= DIR_EPS * DIR_EPS {
        return v;
    }
    v - normal * (v.dot(&normal) / n_len_sq)
}
