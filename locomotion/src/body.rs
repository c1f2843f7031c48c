//! Seams between the locomotion core and a physics engine.
//!
//! The core never talks to an engine directly. It reads and writes a [`CharacterBody`]
//! and asks a [`SurfaceProbe`] for the surfaces under the character. The Rapier backend
//! in [`crate::rapier_world`] implements both.

use crate::collision::types::{
    ColliderBounds, ColliderId, Point3, ProbeRay, Quat, SurfaceHit, Vec3,
};

/// Rigid body + collider pair driven by a controller.
pub trait CharacterBody {
    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
    /// World-space bounds of the character collider.
    fn bounds(&self) -> ColliderBounds;
    fn collider(&self) -> ColliderId;

    /// Acceleration-mode force: mass-independent change of velocity over `dt`.
    fn add_acceleration(&mut self, acceleration: Vec3, dt: f32) {
        let velocity = self.linear_velocity();
        self.set_linear_velocity(velocity + acceleration * dt);
    }
}

/// Cast-all ray query against world surfaces.
pub trait SurfaceProbe {
    /// Every surface crossed by `ray` within `ray.max_distance`, in probe order,
    /// never including `ray.exclude`.
    fn cast_all(&self, ray: &ProbeRay) -> Vec<SurfaceHit>;
}

/// A world with nothing to probe. Every grounded tick resolves as airborne.
impl SurfaceProbe for () {
    fn cast_all(&self, _ray: &ProbeRay) -> Vec<SurfaceHit> {
        Vec::new()
    }
}

impl SurfaceProbe for [SurfaceHit] {
    fn cast_all(&self, ray: &ProbeRay) -> Vec<SurfaceHit> {
        self.iter()
            .filter(|hit| hit.collider != ray.exclude && hit.distance <= ray.max_distance)
            .copied()
            .collect()
    }
}

/// Plain-data body state for a Y-aligned capsule.
///
/// Backends that cannot lend out their bodies during a tick copy state into this
/// struct, run the controller, and write the result back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    /// Capsule center (world space).
    pub position: Point3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub half_height: f32,
    pub radius: f32,
    pub collider: ColliderId,
}

impl BodyState {
    pub fn capsule(position: Point3, half_height: f32, radius: f32, collider: ColliderId) -> Self {
        Self {
            position,
            rotation: Quat::identity(),
            velocity: Vec3::zeros(),
            half_height,
            radius,
            collider,
        }
    }
}

impl CharacterBody for BodyState {
    #[inline]
    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    #[inline]
    fn rotation(&self) -> Quat {
        self.rotation
    }

    #[inline]
    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    #[inline]
    fn bounds(&self) -> ColliderBounds {
        ColliderBounds::capsule(self.position, self.half_height, self.radius)
    }

    #[inline]
    fn collider(&self) -> ColliderId {
        self.collider
    }
}
