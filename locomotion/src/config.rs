/*!
Author-tunable locomotion settings.

Values are read once per tick and never validated by the simulation core: any
non-negative number is accepted and degrades predictably at the boundary (e.g. a
zero acceleration leaves velocity untouched). Author-time clamping lives in
[`crate::tooling::sanitize_config`].

Notes
- Distances are in meters, time in seconds, angles in degrees.
- Every field has a default, so a TOML file only needs the values it overrides.
*/

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_ACCELERATION, DEFAULT_BRAKING_ACCELERATION, DEFAULT_GRAVITY,
        DEFAULT_IDLE_DECELERATION, DEFAULT_JUMP_HEIGHT, DEFAULT_PROBE_RADIUS_FRACTION,
        DEFAULT_SLOPE_LIMIT_DEG, DEFAULT_SPEED, DEFAULT_TURN_RATE,
    },
    error::LocomotionError,
    layers::LayerMask,
};

/// How to choose among several walkable surfaces returned by one probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeTieBreak {
    /// First walkable hit in probe order (nearest first for the Rapier backend).
    #[default]
    ProbeOrder,
    /// Walkable hit with the smallest slope angle.
    Shallowest,
    /// Walkable hit with the largest slope angle.
    Steepest,
    /// Walkable hit whose slope-following direction best matches the desired direction.
    ClosestToDesired,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Target speed at full input (m/s).
    pub speed: f32,
    /// How fast the character rotates toward its direction of travel.
    pub turn_rate: f32,
    /// Acceleration while moving with the current velocity (m/s^2).
    pub acceleration: f32,
    /// Acceleration while moving against the current velocity (m/s^2).
    pub braking_acceleration: f32,
    /// Deceleration when returning to idle (m/s^2).
    pub idle_deceleration: f32,
    /// Steepest walkable surface (degrees).
    pub slope_limit_deg: f32,
    /// Jump apex height (meters).
    pub jump_height: f32,
    /// Downward acceleration while airborne (m/s^2).
    pub gravity: f32,
    /// Downward acceleration while rising; `0` means use `gravity`.
    pub jump_gravity: f32,
    /// Extra downward acceleration while grounded, keeps the character on uneven ground.
    pub ground_force: f32,
    /// Surfaces that count as ground.
    pub ground_layer_mask: LayerMask,
    /// Probe length as a fraction of the collider radius.
    pub probe_radius_fraction: f32,
    pub slope_tie_break: SlopeTieBreak,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            turn_rate: DEFAULT_TURN_RATE,
            acceleration: DEFAULT_ACCELERATION,
            braking_acceleration: DEFAULT_BRAKING_ACCELERATION,
            idle_deceleration: DEFAULT_IDLE_DECELERATION,
            slope_limit_deg: DEFAULT_SLOPE_LIMIT_DEG,
            jump_height: DEFAULT_JUMP_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            jump_gravity: 0.0,
            ground_force: 0.0,
            ground_layer_mask: LayerMask::ALL,
            probe_radius_fraction: DEFAULT_PROBE_RADIUS_FRACTION,
            slope_tie_break: SlopeTieBreak::ProbeOrder,
        }
    }
}

impl LocomotionConfig {
    /// Gravity used for the jump impulse: `jump_gravity` when set, else `gravity`.
    #[inline]
    pub fn effective_jump_gravity(&self) -> f32 {
        if self.jump_gravity > 0.0 {
            self.jump_gravity
        } else {
            self.gravity
        }
    }

    /// Launch speed that reaches `jump_height` under [`Self::effective_jump_gravity`].
    #[inline]
    pub fn jump_speed(&self) -> f32 {
        (2.0 * self.effective_jump_gravity() * self.jump_height)
            .max(0.0)
            .sqrt()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, LocomotionError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LocomotionError> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|source| LocomotionError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config = LocomotionConfig::from_toml_str(
            r#"
            speed = 6.5
            slope_limit_deg = 30.0
            ground_layer_mask = 5
            slope_tie_break = "shallowest"
            "#,
        )
        .unwrap();

        assert_eq!(config.speed, 6.5);
        assert_eq!(config.slope_limit_deg, 30.0);
        assert_eq!(config.ground_layer_mask.bits(), 5);
        assert_eq!(config.slope_tie_break, SlopeTieBreak::Shallowest);
        assert_eq!(config.gravity, DEFAULT_GRAVITY);
        assert_eq!(config.jump_gravity, 0.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = LocomotionConfig::from_toml_str("speed = \"fast\"").unwrap_err();
        assert!(matches!(err, LocomotionError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = LocomotionConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, LocomotionError::ConfigRead { .. }));
    }

    #[test]
    fn jump_gravity_overrides_gravity_only_when_positive() {
        let mut config = LocomotionConfig::default();
        assert_eq!(config.effective_jump_gravity(), config.gravity);

        config.jump_gravity = 20.0;
        assert_eq!(config.effective_jump_gravity(), 20.0);

        config.jump_gravity = -1.0;
        assert_eq!(config.effective_jump_gravity(), config.gravity);
    }

    #[test]
    fn jump_speed_matches_reference_values() {
        let config = LocomotionConfig {
            gravity: 9.18,
            jump_gravity: 0.0,
            jump_height: 2.0,
            ..LocomotionConfig::default()
        };
        assert!((config.jump_speed() - 6.0597).abs() < 1.0e-3);
    }
}
