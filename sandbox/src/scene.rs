use locomotion::{ColliderShapeDef, WorldStaticDef};
use nalgebra::{UnitQuaternion, Vector3};

pub const GROUND_ID: u32 = 1;
pub const RAMP_ID: u32 = 2;
pub const WALL_ID: u32 = 3;

/// Slab tilted about Z so it rises toward `+X` for positive angles.
fn slab(id: u32, center_x: f32, angle_deg: f32) -> WorldStaticDef {
    WorldStaticDef::new(
        id,
        Vector3::new(center_x, 0.0, 0.0),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle_deg.to_radians()),
        ColliderShapeDef::Cuboid {
            half_extents: Vector3::new(4.0, 0.2, 40.0),
        },
    )
}

/// Flat ground, a walkable 20 degree ramp at `+X` and a 70 degree wall at `-X`.
pub fn statics() -> Vec<WorldStaticDef> {
    vec![
        WorldStaticDef::plane(GROUND_ID, Vector3::zeros(), UnitQuaternion::identity()),
        slab(RAMP_ID, 8.0, 20.0),
        slab(WALL_ID, -8.0, -70.0),
    ]
}
