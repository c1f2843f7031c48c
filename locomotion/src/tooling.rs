//! Author-time helpers: read-only snapshots, debug readouts and visualization geometry.
//!
//! Nothing here is called by the per-tick simulation. Renderers and editors consume
//! the plain data returned by these functions and draw it however they like.

use std::fmt;

use crate::{
    body::CharacterBody,
    collision::types::{Point3, Quat, Vec2, Vec3},
    config::LocomotionConfig,
    constants::MAX_ARC_SAMPLES,
    controller::LocomotionController,
    motion::{from_planar, normalize_or_zero, to_planar},
};

/// Copy of everything an inspector shows about one controller.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerSnapshot {
    /// Capsule center.
    pub position: Point3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub desired_move_direction: Vec2,
    pub move_input_magnitude: f32,
    pub grounded: bool,
    pub braking: bool,
    pub config: LocomotionConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugInfo {
    pub grounded: bool,
    pub braking: bool,
}

impl ControllerSnapshot {
    #[inline]
    pub fn debug_info(&self) -> DebugInfo {
        DebugInfo {
            grounded: self.grounded,
            braking: self.braking,
        }
    }

    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        to_planar(self.velocity).norm()
    }
}

impl<B: CharacterBody> LocomotionController<B> {
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            position: self.body().bounds().center,
            rotation: self.body().rotation(),
            velocity: self.body().linear_velocity(),
            desired_move_direction: self.desired_move_direction(),
            move_input_magnitude: self.move_input_magnitude(),
            grounded: self.is_grounded(),
            braking: self.is_braking(),
            config: self.config().clone(),
        }
    }
}

/// Sampled ballistic path of a full-speed jump.
#[derive(Clone, Debug, PartialEq)]
pub struct JumpArc {
    /// Samples from take-off to landing at the take-off height.
    pub points: Vec<Point3>,
    pub apex: Point3,
    /// Seconds from take-off to landing.
    pub air_time: f32,
}

/// Predict a jump from `origin`, travelling along `look_dir` at full speed.
///
/// Ascent decelerates under the effective jump gravity, descent falls under `gravity`,
/// so the arc is asymmetric when `jump_gravity` is set. Samples are `segment` seconds
/// apart, plus the landing point. Degenerate input (non-positive gravity or segment)
/// yields a single point at `origin`.
pub fn jump_arc(config: &LocomotionConfig, origin: Point3, look_dir: Vec2, segment: f32) -> JumpArc {
    let rise_gravity = config.effective_jump_gravity();
    let fall_gravity = config.gravity;
    let height = config.jump_height.max(0.0);

    if rise_gravity <= 0.0 || fall_gravity <= 0.0 || !(segment > 0.0) {
        return JumpArc {
            points: vec![origin],
            apex: origin,
            air_time: 0.0,
        };
    }

    let launch = config.jump_speed();
    let rise_time = launch / rise_gravity;
    let fall_time = (2.0 * height / fall_gravity).sqrt();
    let air_time = rise_time + fall_time;
    let horizontal = normalize_or_zero(look_dir) * config.speed.max(0.0);

    let at = |t: f32| -> Point3 {
        let y = if t <= rise_time {
            launch * t - 0.5 * rise_gravity * t * t
        } else {
            let fall = t - rise_time;
            height - 0.5 * fall_gravity * fall * fall
        };
        origin + from_planar(horizontal * t, y)
    };

    let steps = ((air_time / segment).ceil() as usize).min(MAX_ARC_SAMPLES - 1);
    let mut points: Vec<Point3> = (0..steps)
        .map(|i| at(i as f32 * segment))
        .collect();
    points.push(at(air_time));

    JumpArc {
        points,
        apex: at(rise_time),
        air_time,
    }
}

/// Unit directions sweeping from level ground up to the slope limit, in the vertical
/// plane containing `facing`. `segments + 1` entries, level first.
pub fn slope_limit_fan(slope_limit_deg: f32, facing: Vec2, segments: usize) -> Vec<Vec3> {
    let facing = normalize_or_zero(facing);
    if facing == Vec2::zeros() {
        return Vec::new();
    }
    let limit = slope_limit_deg.clamp(0.0, 90.0).to_radians();
    let segments = segments.max(1);

    (0..=segments)
        .map(|i| {
            let a = limit * i as f32 / segments as f32;
            from_planar(facing * a.cos(), a.sin())
        })
        .collect()
}

/// One adjustment made by [`sanitize_config`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigWarning {
    pub field: &'static str,
    pub value: f32,
    pub clamped_to: f32,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} clamped to {}", self.field, self.value, self.clamped_to)
    }
}

/// Clamp author-entered values into ranges that behave sensibly.
///
/// Returns the adjusted config and one warning per changed field; each warning is
/// also logged.
pub fn sanitize_config(config: &LocomotionConfig) -> (LocomotionConfig, Vec<ConfigWarning>) {
    let defaults = LocomotionConfig::default();
    let mut out = config.clone();
    let mut warnings = Vec::new();

    let mut clamp = |field: &'static str, value: &mut f32, fallback: f32, min: f32, max: f32| {
        let clamped = if value.is_finite() {
            value.clamp(min, max)
        } else {
            fallback
        };
        if clamped != *value {
            warnings.push(ConfigWarning {
                field,
                value: *value,
                clamped_to: clamped,
            });
            *value = clamped;
        }
    };

    let inf = f32::INFINITY;
    clamp("speed", &mut out.speed, defaults.speed, 0.0, inf);
    clamp("turn_rate", &mut out.turn_rate, defaults.turn_rate, 0.0, inf);
    clamp("acceleration", &mut out.acceleration, defaults.acceleration, 0.0, inf);
    clamp(
        "braking_acceleration",
        &mut out.braking_acceleration,
        defaults.braking_acceleration,
        0.0,
        inf,
    );
    clamp(
        "idle_deceleration",
        &mut out.idle_deceleration,
        defaults.idle_deceleration,
        0.0,
        inf,
    );
    clamp("slope_limit_deg", &mut out.slope_limit_deg, defaults.slope_limit_deg, 0.0, 90.0);
    clamp("jump_height", &mut out.jump_height, defaults.jump_height, 0.0, inf);
    clamp("gravity", &mut out.gravity, defaults.gravity, 0.0, inf);
    clamp("jump_gravity", &mut out.jump_gravity, defaults.jump_gravity, 0.0, inf);
    clamp("ground_force", &mut out.ground_force, defaults.ground_force, 0.0, inf);
    clamp(
        "probe_radius_fraction",
        &mut out.probe_radius_fraction,
        defaults.probe_radius_fraction,
        0.0,
        1.0,
    );

    for warning in &warnings {
        log::warn!("locomotion config: {warning}");
    }
    (out, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        body::BodyState,
        collision::types::{ColliderId, ContactPoint},
        constants::ARC_SEGMENT_SECONDS,
        layers::Layer,
    };

    fn jump_config() -> LocomotionConfig {
        LocomotionConfig {
            speed: 4.0,
            jump_height: 2.0,
            gravity: 10.0,
            jump_gravity: 0.0,
            ..LocomotionConfig::default()
        }
    }

    #[test]
    fn snapshot_reflects_controller_state() {
        let body = BodyState::capsule(Point3::new(0.0, 1.0, 0.0), 0.5, 0.5, ColliderId(7));
        let mut c = LocomotionController::new(body, LocomotionConfig::default());
        c.body_mut().velocity = Vec3::new(3.0, 0.0, 0.0);
        c.move_input(-Vec2::x());
        c.on_contacts(&[ContactPoint {
            point: Point3::origin(),
            layer: Layer::DEFAULT,
        }]);

        let snap = c.snapshot();
        assert_eq!(snap.position, Point3::new(0.0, 1.0, 0.0));
        assert_eq!(snap.desired_move_direction, -Vec2::x());
        assert_eq!(snap.horizontal_speed(), 3.0);
        assert_eq!(
            snap.debug_info(),
            DebugInfo {
                grounded: true,
                braking: true
            }
        );
    }

    #[test]
    fn symmetric_arc_lands_at_take_off_height() {
        let config = jump_config();
        let arc = jump_arc(&config, Point3::origin(), Vec2::x(), ARC_SEGMENT_SECONDS);

        // sqrt(2 g h) / g up, sqrt(2 h / g) down.
        let half = (2.0f32 * 2.0 / 10.0).sqrt();
        assert!((arc.air_time - 2.0 * half).abs() < 1.0e-4);
        assert!((arc.apex.y - 2.0).abs() < 1.0e-4);
        assert!((arc.apex.x - 4.0 * half).abs() < 1.0e-4);

        let first = arc.points[0];
        let last = arc.points[arc.points.len() - 1];
        assert_eq!(first, Point3::origin());
        assert!(last.y.abs() < 1.0e-4);
        assert!((last.x - 4.0 * arc.air_time).abs() < 1.0e-3);
        assert!(arc.points.iter().all(|p| p.y <= arc.apex.y + 1.0e-4 && p.z == 0.0));
    }

    #[test]
    fn heavier_jump_gravity_shortens_the_ascent() {
        let mut config = jump_config();
        let symmetric = jump_arc(&config, Point3::origin(), Vec2::x(), ARC_SEGMENT_SECONDS);
        config.jump_gravity = 40.0;
        let snappy = jump_arc(&config, Point3::origin(), Vec2::x(), ARC_SEGMENT_SECONDS);

        assert!((snappy.apex.y - 2.0).abs() < 1.0e-4);
        assert!(snappy.apex.x < symmetric.apex.x);
        assert!(snappy.air_time < symmetric.air_time);
    }

    #[test]
    fn degenerate_arc_is_a_single_point() {
        let mut config = jump_config();
        config.gravity = 0.0;
        let arc = jump_arc(&config, Point3::new(1.0, 2.0, 3.0), Vec2::x(), 0.05);
        assert_eq!(arc.points, vec![Point3::new(1.0, 2.0, 3.0)]);
        assert_eq!(arc.air_time, 0.0);

        let arc = jump_arc(&jump_config(), Point3::origin(), Vec2::x(), 0.0);
        assert_eq!(arc.points.len(), 1);
    }

    #[test]
    fn arc_sample_count_is_capped() {
        let arc = jump_arc(&jump_config(), Point3::origin(), Vec2::x(), 1.0e-7);
        assert_eq!(arc.points.len(), MAX_ARC_SAMPLES);
    }

    #[test]
    fn fan_spans_level_to_limit() {
        let fan = slope_limit_fan(45.0, Vec2::y(), 3);
        assert_eq!(fan.len(), 4);
        assert!((fan[0] - Vec3::z()).norm() < 1.0e-6);
        let edge = fan[3];
        assert!((edge.norm() - 1.0).abs() < 1.0e-6);
        assert!((edge.y.atan2(edge.z).to_degrees() - 45.0).abs() < 1.0e-4);

        assert!(slope_limit_fan(45.0, Vec2::zeros(), 3).is_empty());
    }

    #[test]
    fn sanitize_clamps_and_reports() {
        let config = LocomotionConfig {
            speed: -2.0,
            slope_limit_deg: 120.0,
            gravity: f32::NAN,
            ..LocomotionConfig::default()
        };
        let (clean, warnings) = sanitize_config(&config);

        assert_eq!(clean.speed, 0.0);
        assert_eq!(clean.slope_limit_deg, 90.0);
        assert_eq!(clean.gravity, LocomotionConfig::default().gravity);
        let fields: Vec<_> = warnings.iter().map(|w| w.field).collect();
        assert_eq!(fields, ["speed", "slope_limit_deg", "gravity"]);
    }

    #[test]
    fn sanitize_leaves_defaults_alone() {
        let (clean, warnings) = sanitize_config(&LocomotionConfig::default());
        assert!(warnings.is_empty());
        assert_eq!(clean, LocomotionConfig::default());
    }
}
