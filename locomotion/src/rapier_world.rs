//! Rapier backend for the locomotion core.
//!
//! Builds an in-memory Rapier scene from static collider definitions, hosts dynamic
//! character capsules, and implements the contact feed and [`SurfaceProbe`] the
//! controller consumes.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Characters are plain dynamic bodies: rotation-locked, frictionless, with engine
//!   gravity disabled. The controller owns their velocity and applies gravity itself.
//! - Controllers never borrow the Rapier sets. State is copied in with [`RapierWorld::pull`]
//!   and written back with [`RapierWorld::push`] around each controller tick.
//!
//! Per-tick order
//! 1. Apply input (`move_input`, `jump`) to the controller.
//! 2. `fixed_update` with [`RapierWorld::probe`].
//! 3. `push` the new velocity and rotation.
//! 4. [`RapierWorld::step`].
//! 5. [`RapierWorld::observe`]: `pull` the post-step state, then feed this step's
//!    contacts to `on_contacts`.
//!
//! The controller's copy is only current between step 5 and the next step 3, so input
//! must land after `observe` and contacts must be judged against post-step bounds.

// Re-export Rapier so downstream crates can use Rapier types without depending on
// `rapier3d` directly.
pub use rapier3d;

use rapier3d::na::Translation3;
use rapier3d::prelude::*;

use crate::{
    body::{BodyState, SurfaceProbe},
    collision::types::{ColliderId, ContactPoint, Point3, ProbeRay, SurfaceHit},
    constants::{DEFAULT_GRAVITY, MAX_PROBE_HITS},
    controller::LocomotionController,
    layers::Layer,
    rapier::{WorldStaticDef, collider_from_def, collider_layer},
};

#[inline]
pub fn collider_id(handle: ColliderHandle) -> ColliderId {
    let (index, generation) = handle.into_raw_parts();
    ColliderId((u64::from(generation) << 32) | u64::from(index))
}

#[inline]
pub fn collider_handle(id: ColliderId) -> ColliderHandle {
    ColliderHandle::from_raw_parts(id.0 as u32, (id.0 >> 32) as u32)
}

/// Body + collider pair of a spawned character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterHandle {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

/// Rapier simulation hosting static world geometry and character bodies.
pub struct RapierWorld {
    pub gravity: Vector<f32>,
    pub integration_parameters: IntegrationParameters,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    islands: IslandManager,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    pipeline: PhysicsPipeline,
}

impl RapierWorld {
    /// Build a world from static collider definitions, stepping with fixed `dt`.
    ///
    /// The input is sorted by `id` before insertion.
    pub fn build(mut defs: Vec<WorldStaticDef>, dt: f32) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.iter() {
            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
            let rb = RigidBodyBuilder::fixed().pose(iso).build();
            let rb_handle = bodies.insert(rb);
            colliders.insert_with_parent(collider_from_def(def), rb_handle, &mut bodies);
        }

        let mut world = Self {
            // Only non-character dynamic bodies would feel this.
            gravity: Vector::new(0.0, -DEFAULT_GRAVITY, 0.0),
            integration_parameters: IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            bodies,
            colliders,
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            islands: IslandManager::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            pipeline: PhysicsPipeline::new(),
        };

        // Populate the broad-phase BVH so queries work before the first real step.
        world.step();
        log::debug!("rapier world built with {} static colliders", defs.len());
        world
    }

    /// Spawn a Y-aligned capsule character with its center at `position`.
    pub fn spawn_character(
        &mut self,
        position: Point3,
        half_height: f32,
        radius: f32,
        layer: Layer,
    ) -> CharacterHandle {
        let rb = RigidBodyBuilder::dynamic()
            .translation(position.coords)
            .lock_rotations()
            .gravity_scale(0.0)
            .can_sleep(false)
            .build();
        let body = self.bodies.insert(rb);

        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .user_data(layer.index() as u128)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        CharacterHandle { body, collider }
    }

    /// Current state of a spawned character, for seeding a controller.
    pub fn body_state(&self, handle: &CharacterHandle) -> Option<BodyState> {
        let collider = self.colliders.get(handle.collider)?;
        let capsule = collider.shape().as_capsule()?;
        let mut state = BodyState::capsule(
            Point3::origin(),
            capsule.half_height(),
            capsule.radius,
            collider_id(handle.collider),
        );
        self.pull(handle, &mut state);
        Some(state)
    }

    /// Copy position, rotation and velocity from the Rapier body into `state`.
    pub fn pull(&self, handle: &CharacterHandle, state: &mut BodyState) {
        let Some(rb) = self.bodies.get(handle.body) else {
            log::warn!("pull from missing body {:?}", handle.body);
            return;
        };
        state.position = Point3::from(*rb.translation());
        state.rotation = *rb.rotation();
        state.velocity = *rb.linvel();
    }

    /// Write velocity and rotation from `state` back to the Rapier body.
    pub fn push(&mut self, handle: &CharacterHandle, state: &BodyState) {
        let Some(rb) = self.bodies.get_mut(handle.body) else {
            log::warn!("push to missing body {:?}", handle.body);
            return;
        };
        rb.set_linvel(state.velocity, true);
        rb.set_rotation(state.rotation, true);
    }

    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Bring a controller up to date after [`Self::step`]: copy the body state in, then
    /// evaluate this step's contacts against the fresh bounds.
    pub fn observe(&self, handle: &CharacterHandle, controller: &mut LocomotionController) {
        self.pull(handle, controller.body_mut());
        let contacts = self.contacts(handle);
        controller.on_contacts(&contacts);
    }

    /// World-space contact points touching the character after the last step.
    pub fn contacts(&self, handle: &CharacterHandle) -> Vec<ContactPoint> {
        let mut out = Vec::new();
        for pair in self.narrow_phase.contact_pairs_with(handle.collider) {
            if !pair.has_any_active_contact {
                continue;
            }
            let other = if pair.collider1 == handle.collider {
                pair.collider2
            } else {
                pair.collider1
            };
            let layer = self
                .colliders
                .get(other)
                .map(collider_layer)
                .unwrap_or(Layer::DEFAULT);

            for manifold in &pair.manifolds {
                out.extend(manifold.data.solver_contacts.iter().map(|c| ContactPoint {
                    point: c.point,
                    layer,
                }));
            }
        }
        out
    }

    /// Create a borrowed `QueryPipeline` view suitable for scene queries.
    ///
    /// The returned pipeline borrows `self`, so it should be used within the scope
    /// of the borrow.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    #[inline]
    pub fn probe(&self) -> RapierProbe<'_> {
        RapierProbe { world: self }
    }
}

/// [`SurfaceProbe`] over a [`RapierWorld`].
#[derive(Clone, Copy)]
pub struct RapierProbe<'a> {
    world: &'a RapierWorld,
}

impl SurfaceProbe for RapierProbe<'_> {
    /// Repeated nearest-hit casts, each skipping the colliders already found.
    fn cast_all(&self, ray: &ProbeRay) -> Vec<SurfaceHit> {
        let rapier_ray = Ray::new(ray.origin, ray.direction.into_inner());
        let exclude = collider_handle(ray.exclude);
        let mut seen: Vec<ColliderHandle> = Vec::new();
        let mut hits = Vec::new();

        while hits.len() < MAX_PROBE_HITS {
            let next = {
                let unseen = |h: ColliderHandle, _: &Collider| !seen.contains(&h);
                let filter = QueryFilter::default()
                    .exclude_collider(exclude)
                    .predicate(&unseen);
                self.world.query_pipeline(filter).cast_ray_and_get_normal(
                    &rapier_ray,
                    ray.max_distance,
                    true,
                )
            };
            let Some((handle, hit)) = next else {
                break;
            };
            seen.push(handle);

            let layer = self
                .world
                .colliders
                .get(handle)
                .map(collider_layer)
                .unwrap_or(Layer::DEFAULT);
            hits.push(SurfaceHit {
                collider: collider_id(handle),
                point: rapier_ray.point_at(hit.time_of_impact),
                normal: hit.normal,
                distance: hit.time_of_impact,
                layer,
            });
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
