use rapier3d::{na::UnitQuaternion, prelude::*};

use crate::layers::Layer;

/// Definition of an immutable world collider.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
/// - For planes, the normal is pose-derived: `normal = rotation * +Y`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
    /// Layer reported with contacts and probe hits against this collider.
    pub layer: Layer,
}

impl WorldStaticDef {
    pub fn new(id: u32, translation: Vector<f32>, rotation: UnitQuaternion<f32>, shape: ColliderShapeDef) -> Self {
        Self {
            id,
            translation,
            rotation,
            shape,
            layer: Layer::DEFAULT,
        }
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Infinite ground plane through `translation`, facing `rotation * +Y`.
    pub fn plane(id: u32, translation: Vector<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self::new(
            id,
            translation,
            rotation,
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        )
    }

    pub fn cuboid(id: u32, translation: Vector<f32>, rotation: UnitQuaternion<f32>, half_extents: Vector<f32>) -> Self {
        Self::new(id, translation, rotation, ColliderShapeDef::Cuboid { half_extents })
    }
}

/// Static collider shapes: ground planes and tilted slabs.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space), shifted along its normal by `offset_along_normal`.
    Plane {
        offset_along_normal: f32,
    },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The pose lives on the parent rigid body, so shapes are built in local space. The
/// layer index is stored in `user_data` for contact and probe reporting.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // Local +Y; the parent rotation turns it into the world normal.
            let halfspace = HalfSpace::new(Vector::y_axis());
            ColliderBuilder::new(SharedShape::new(halfspace))
                .translation(Vector::y() * *offset_along_normal)
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
    };

    builder.user_data(def.layer.index() as u128).build()
}

/// Layer stored on a collider by [`collider_from_def`] or the character spawner.
#[inline]
pub fn collider_layer(collider: &Collider) -> Layer {
    u8::try_from(collider.user_data)
        .ok()
        .and_then(Layer::new)
        .unwrap_or(Layer::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_round_trips_through_user_data() {
        let def = WorldStaticDef::cuboid(
            1,
            Vector::zeros(),
            UnitQuaternion::identity(),
            Vector::new(1.0, 1.0, 1.0),
        )
        .with_layer(Layer::new(6).unwrap());
        let collider = collider_from_def(&def);
        assert_eq!(collider_layer(&collider), Layer::new(6).unwrap());
    }

    #[test]
    fn plane_offset_shifts_along_local_normal() {
        let def = WorldStaticDef::new(
            1,
            Vector::zeros(),
            UnitQuaternion::identity(),
            ColliderShapeDef::Plane {
                offset_along_normal: 0.5,
            },
        );
        let collider = collider_from_def(&def);
        assert!((collider.translation().y - 0.5).abs() < 1.0e-6);
        assert_eq!(collider_layer(&collider), Layer::DEFAULT);
    }

    #[test]
    fn cuboid_is_built_in_local_space() {
        let def = WorldStaticDef::cuboid(
            2,
            Vector::new(3.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector::z_axis(), 0.3),
            Vector::new(4.0, 0.2, 40.0),
        );
        let collider = collider_from_def(&def);
        let cuboid = collider.shape().as_cuboid().unwrap();
        assert_eq!(cuboid.half_extents, Vector::new(4.0, 0.2, 40.0));
        // Pose belongs to the parent body.
        assert_eq!(*collider.translation(), Vector::zeros());
    }
}
