use nalgebra as na;

use super::types::{ColliderBounds, ColliderId, ContactPoint, ProbeRay, SurfaceHit, Vec2, Vec3};
use crate::{
    body::SurfaceProbe,
    config::{LocomotionConfig, SlopeTieBreak},
    constants::PROBE_SKIN,
    layers::LayerMask,
    motion::{from_planar, normalize_or_zero, project_on_plane},
};

/// How this tick's target velocity should be resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GroundResolution {
    /// Standing on a walkable surface.
    Grounded {
        /// Unit slope-following direction (zero when there is no desired direction).
        direction: Vec3,
        /// Unit normal of the chosen surface.
        normal: Vec3,
    },
    /// Free horizontal resolution: airborne, or no walkable surface below.
    Airborne,
}

/// A walkable probe hit together with what the tie-break needs.
#[derive(Clone, Copy, Debug)]
struct WalkableHit {
    slope_deg: f32,
    direction: Vec3,
    normal: Vec3,
}

/// Stateless ground detection over collider geometry, contacts and probe hits.
#[derive(Clone, Copy, Debug, Default)]
pub struct GroundSampler;

impl GroundSampler {
    /// Does any contact support the character?
    ///
    /// A contact qualifies when it lies at or below the collider's lower radius line
    /// and its layer is in `mask`. Stops at the first qualifying contact.
    pub fn contacts_ground(bounds: &ColliderBounds, mask: LayerMask, contacts: &[ContactPoint]) -> bool {
        let line = bounds.lower_radius_line();
        contacts
            .iter()
            .any(|c| c.point.y <= line && mask.contains(c.layer))
    }

    /// Probe ray cast straight down from just above the collider's lower bound.
    pub fn probe_ray(bounds: &ColliderBounds, collider: ColliderId, config: &LocomotionConfig) -> ProbeRay {
        let length = (bounds.radius * config.probe_radius_fraction).max(0.0);
        let mut origin = bounds.lower_bound();
        origin.y += PROBE_SKIN;
        ProbeRay {
            origin,
            direction: na::Unit::new_unchecked(-Vec3::y()),
            max_distance: length + PROBE_SKIN,
            exclude: collider,
        }
    }

    /// Choose between ground-projected and free horizontal resolution.
    ///
    /// When `grounded`, probes below the collider and keeps hits that are on a ground
    /// layer, not the character's own collider, and no steeper than the slope limit.
    /// The survivor picked by `config.slope_tie_break` yields the slope-following
    /// direction. Anything else resolves as [`GroundResolution::Airborne`].
    pub fn resolve<P: SurfaceProbe + ?Sized>(
        grounded: bool,
        probe: &P,
        bounds: &ColliderBounds,
        collider: ColliderId,
        desired: Vec2,
        config: &LocomotionConfig,
    ) -> GroundResolution {
        if !grounded {
            return GroundResolution::Airborne;
        }

        let ray = Self::probe_ray(bounds, collider, config);
        let hits = probe.cast_all(&ray);
        let desired3 = from_planar(desired, 0.0);

        let walkable = hits
            .iter()
            .filter(|hit| hit.collider != collider && config.ground_layer_mask.contains(hit.layer))
            .filter_map(|hit| Self::walkable(hit, desired3, config.slope_limit_deg));

        match pick(walkable, config.slope_tie_break, desired3) {
            Some(hit) => GroundResolution::Grounded {
                direction: hit.direction,
                normal: hit.normal,
            },
            None => {
                log::trace!("no walkable surface among {} probe hits", hits.len());
                GroundResolution::Airborne
            }
        }
    }

    fn walkable(hit: &SurfaceHit, desired: Vec3, slope_limit_deg: f32) -> Option<WalkableHit> {
        let slope_deg = hit.slope_degrees()?;
        if slope_deg > slope_limit_deg {
            return None;
        }
        Some(WalkableHit {
            slope_deg,
            direction: normalize_or_zero(project_on_plane(desired, hit.normal)),
            normal: normalize_or_zero(hit.normal),
        })
    }
}

/// Apply the tie-break policy. Equal scores keep the earlier hit.
fn pick(
    mut candidates: impl Iterator<Item = WalkableHit>,
    policy: SlopeTieBreak,
    desired: Vec3,
) -> Option<WalkableHit> {
    let score = |hit: &WalkableHit| -> f32 {
        match policy {
            SlopeTieBreak::ProbeOrder => 0.0,
            SlopeTieBreak::Shallowest => -hit.slope_deg,
            SlopeTieBreak::Steepest => hit.slope_deg,
            SlopeTieBreak::ClosestToDesired => hit.direction.dot(&desired),
        }
    };

    let first = candidates.next()?;
    if policy == SlopeTieBreak::ProbeOrder {
        return Some(first);
    }

    Some(candidates.fold(first, |best, hit| {
        if score(&hit) > score(&best) { hit } else { best }
    }))
}
