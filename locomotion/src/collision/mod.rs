/*!
Collision root module.

- types:  data exchanged between the controller, the ground sampler and a physics
          backend (bounds, contacts, probe rays and hits)
- ground: grounded detection and slope-aware velocity resolution
*/

pub mod ground;
pub mod types;

// Re-export commonly used types.
pub use ground::{GroundResolution, GroundSampler};
pub use types::{
    ColliderBounds, ColliderId, ContactPoint, Point3, ProbeRay, Quat, SurfaceHit, Vec2, Vec3,
};
