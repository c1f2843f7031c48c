/// Default walking speed (meters per second).
pub const DEFAULT_SPEED: f32 = 10.0;

/// Default turn rate (fraction of the remaining arc per second).
pub const DEFAULT_TURN_RATE: f32 = 10.0;

/// Default acceleration while moving with the current velocity (m/s^2).
pub const DEFAULT_ACCELERATION: f32 = 10.0;

/// Default acceleration while moving against the current velocity (m/s^2).
pub const DEFAULT_BRAKING_ACCELERATION: f32 = 10.0;

/// Default deceleration while returning to idle (m/s^2).
pub const DEFAULT_IDLE_DECELERATION: f32 = 10.0;

/// Default steepest walkable surface, in degrees between surface normal and +Y.
pub const DEFAULT_SLOPE_LIMIT_DEG: f32 = 45.0;

/// Default jump apex height (meters).
pub const DEFAULT_JUMP_HEIGHT: f32 = 2.0;

/// Default gravity magnitude applied while airborne (m/s^2, positive value).
pub const DEFAULT_GRAVITY: f32 = 9.18;

/// Default probe length as a fraction of the collider radius.
///
/// A capsule resting on a slope of angle `a` hovers `r * (1 / cos(a) - 1)` above the surface
/// directly under its lowest point, so 0.5 keeps slopes up to ~48 degrees in reach.
pub const DEFAULT_PROBE_RADIUS_FRACTION: f32 = 0.5;

/// Probes start this far above the collider's lower bound so they never begin inside the ground.
pub const PROBE_SKIN: f32 = 0.05;

/// Upper bound on surfaces gathered by a single probe.
pub const MAX_PROBE_HITS: usize = 8;

/// Practical small length for direction/normal guards.
pub const DIR_EPS: f32 = 1.0e-6;

/// Relative slack on the move-towards snap so accumulated f32 error cannot defer the final snap.
pub const MOVE_TOWARDS_REL_EPS: f32 = 1.0e-4;

/// Time between jump-arc samples (seconds).
pub const ARC_SEGMENT_SECONDS: f32 = 0.05;

/// Upper bound on jump-arc samples.
pub const MAX_ARC_SAMPLES: usize = 1024;
