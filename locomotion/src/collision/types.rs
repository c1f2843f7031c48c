/*!
Core data types exchanged between the physics backend and the locomotion core.

This module intentionally contains no algorithms. It defines:
- math aliases shared by every module
- collider bounds as seen by ground detection
- contact points delivered by the contact-event feed
- probe rays and the surface hits they return
*/

use nalgebra as na;

use crate::layers::Layer;

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Backend-agnostic collider identity, used to exclude a body's own collider from probes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

/// World-space bounds of a Y-aligned character collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderBounds {
    /// Center of the world-space bounding box.
    pub center: Point3,
    /// Half-size of the world-space bounding box.
    pub extents: Vec3,
    /// Radius of the capsule's spherical caps.
    pub radius: f32,
}

impl ColliderBounds {
    /// Bounds of a Y-aligned capsule centered at `center`.
    ///
    /// `half_height` is the half-length of the cylinder section, so the total
    /// height is `2*half_height + 2*radius`.
    #[inline]
    pub fn capsule(center: Point3, half_height: f32, radius: f32) -> Self {
        Self {
            center,
            extents: Vec3::new(radius, half_height + radius, radius),
            radius,
        }
    }

    /// Lowest point of the bounds, directly under the center.
    #[inline]
    pub fn lower_bound(&self) -> Point3 {
        Point3::new(self.center.x, self.center.y - self.extents.y, self.center.z)
    }

    /// Height of the lower radius line: the center of the bottom cap.
    ///
    /// Contacts at or below this height are under the character rather than beside it.
    #[inline]
    pub fn lower_radius_line(&self) -> f32 {
        self.center.y - self.extents.y + self.radius
    }
}

/// A single contact point reported by the physics step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactPoint {
    /// World-space contact position.
    pub point: Point3,
    /// Layer of the surface touched by the character.
    pub layer: Layer,
}

/// A ray cast by the ground probe.
#[derive(Clone, Copy, Debug)]
pub struct ProbeRay {
    pub origin: Point3,
    pub direction: na::Unit<Vec3>,
    pub max_distance: f32,
    /// Collider never reported as a hit (the character's own).
    pub exclude: ColliderId,
}

/// One surface crossed by a probe ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub collider: ColliderId,
    /// World-space hit point.
    pub point: Point3,
    /// Surface normal at the hit point, facing the ray origin.
    pub normal: Vec3,
    /// Distance along the ray.
    pub distance: f32,
    pub layer: Layer,
}

impl SurfaceHit {
    /// Angle between the surface normal and +Y, in degrees.
    ///
    /// Returns `None` for degenerate (zero-length) normals.
    #[inline]
    pub fn slope_degrees(&self) -> Option<f32> {
        let n = self.normal.try_normalize(crate::constants::DIR_EPS)?;
        Some(n.y.clamp(-1.0, 1.0).acos().to_degrees())
    }
}
