use nalgebra as na;

use crate::collision::types::{Point3, Quat, Vec2, Vec3};

/// Anything with a world yaw that movement input can be made relative to.
///
/// Yaw is in radians about +Y; zero looks along +Z and positive yaw turns toward +X.
pub trait ViewCamera {
    fn yaw(&self) -> f32;
}

impl ViewCamera for Quat {
    fn yaw(&self) -> f32 {
        yaw_of(self)
    }
}

/// Yaw of the direction `rotation` maps +Z onto.
#[inline]
pub fn yaw_of(rotation: &Quat) -> f32 {
    let forward = rotation * Vec3::z();
    forward.x.atan2(forward.z)
}

/// Rotate a stick/keyboard input by the negative camera yaw, so "up" on the input
/// moves along the camera's horizontal forward.
///
/// Input axes map to world `(x, z)`.
#[inline]
pub fn camera_relative(input: Vec2, yaw: f32) -> Vec2 {
    na::Rotation2::new(-yaw) * input
}

/// Camera that trails a target at a fixed world-space offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowCamera {
    /// Offset from the followed target (world space).
    pub offset: Vec3,
    pub position: Point3,
    /// Radians about +Y.
    pub yaw: f32,
}

impl FollowCamera {
    pub fn new(offset: Vec3, yaw: f32) -> Self {
        Self {
            offset,
            position: Point3::origin() + offset,
            yaw,
        }
    }

    /// Snap to `target + offset`.
    #[inline]
    pub fn follow(&mut self, target: Point3) {
        self.position = target + self.offset;
    }

    /// Horizontal forward direction `(x, z)` for the current yaw.
    #[inline]
    pub fn forward_planar(&self) -> Vec2 {
        Vec2::new(self.yaw.sin(), self.yaw.cos())
    }
}

impl ViewCamera for FollowCamera {
    fn yaw(&self) -> f32 {
        self.yaw
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn zero_yaw_leaves_input_unchanged() {
        let out = camera_relative(Vec2::new(0.3, 0.7), 0.0);
        assert!((out - Vec2::new(0.3, 0.7)).norm() < 1.0e-6);
    }

    #[test]
    fn forward_input_follows_camera_forward() {
        // Camera yawed 90 degrees looks along +X; "forward" on the stick must move +X.
        let out = camera_relative(Vec2::new(0.0, 1.0), FRAC_PI_2);
        assert!((out - Vec2::new(1.0, 0.0)).norm() < 1.0e-6);

        let cam = FollowCamera::new(Vec3::zeros(), FRAC_PI_2);
        assert!((out - cam.forward_planar()).norm() < 1.0e-6);
    }

    #[test]
    fn right_input_is_perpendicular_to_forward() {
        let yaw = 0.7;
        let right = camera_relative(Vec2::new(1.0, 0.0), yaw);
        let forward = camera_relative(Vec2::new(0.0, 1.0), yaw);
        assert!(right.dot(&forward).abs() < 1.0e-6);
        // Right-handed about +Y: right = forward rotated clockwise seen from above.
        assert!((right - Vec2::new(forward.y, -forward.x)).norm() < 1.0e-6);
    }

    #[test]
    fn quaternion_yaw_round_trips() {
        let q = Quat::from_axis_angle(&Vec3::y_axis(), 1.2);
        assert!((q.yaw() - 1.2).abs() < 1.0e-5);
    }

    #[test]
    fn follow_applies_offset() {
        let mut cam = FollowCamera::new(Vec3::new(0.0, 5.0, -8.0), 0.0);
        cam.follow(Point3::new(1.0, 0.0, 2.0));
        assert_eq!(cam.position, Point3::new(1.0, 5.0, -6.0));
    }
}
