use crate::{
    body::{BodyState, CharacterBody, SurfaceProbe},
    camera::{ViewCamera, camera_relative},
    collision::{
        ground::{GroundResolution, GroundSampler},
        types::{ContactPoint, Quat, Vec2, Vec3},
    },
    config::LocomotionConfig,
    constants::DIR_EPS,
    error::LocomotionError,
    motion::{from_planar, move_towards, normalize_or_zero, to_planar},
};

/// Output of a single [`LocomotionController::fixed_update`] tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// Grounded state the tick ran with (before the end-of-tick reset).
    pub was_grounded: bool,
    pub braking: bool,
    /// Per-tick acceleration budget (m/s).
    pub acceleration_budget: f32,
    pub resolution: GroundResolution,
    /// Velocity committed to the body.
    pub velocity: Vec3,
}

/// Physics-driven locomotion for one rigid body.
///
/// The controller owns its body exclusively. Per fixed tick it:
/// 1. picks gravity (airborne) or the ground-stick force (grounded),
/// 2. picks acceleration, braking or idle deceleration,
/// 3. moves velocity toward the ground-aware target by at most that budget, then
///    integrates the step 1 acceleration on top,
/// 4. turns toward the direction of horizontal travel,
/// 5. clears the grounded flag so the next physics step can re-arm it.
pub struct LocomotionController<B: CharacterBody = BodyState> {
    config: LocomotionConfig,
    body: B,
    desired_move_direction: Vec2,
    /// Analog input strength in [0, 1], scales the target speed.
    move_input_magnitude: f32,
    is_grounded: bool,
    // Last tick's state, for transition logging.
    prev_grounded: bool,
    prev_braking: bool,
}

impl<B: CharacterBody> LocomotionController<B> {
    pub fn new(body: B, config: LocomotionConfig) -> Self {
        Self {
            config,
            body,
            desired_move_direction: Vec2::zeros(),
            move_input_magnitude: 0.0,
            is_grounded: false,
            prev_grounded: false,
            prev_braking: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next tick.
    pub fn set_config(&mut self, config: LocomotionConfig) {
        self.config = config;
    }

    #[inline]
    pub fn body(&self) -> &B {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn into_body(self) -> B {
        self.body
    }

    #[inline]
    pub fn desired_move_direction(&self) -> Vec2 {
        self.desired_move_direction
    }

    #[inline]
    pub fn move_input_magnitude(&self) -> f32 {
        self.move_input_magnitude
    }

    /// Whether a ground contact was seen since the last tick.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    /// Moving against the current horizontal velocity (more than 90 degrees off).
    pub fn is_braking(&self) -> bool {
        let horizontal = to_planar(self.body.linear_velocity());
        self.desired_move_direction != Vec2::zeros()
            && self.desired_move_direction.dot(&horizontal) < 0.0
    }

    /// Set the desired direction from a world-axis input `(x, z)`.
    ///
    /// The direction is normalized; a zero input means "return to idle".
    pub fn move_input(&mut self, input: Vec2) {
        self.desired_move_direction = normalize_or_zero(input);
        self.move_input_magnitude = if self.desired_move_direction == Vec2::zeros() {
            0.0
        } else {
            input.norm().min(1.0)
        };
    }

    /// Like [`Self::move_input`], with the input rotated into the camera's view.
    ///
    /// Leaves the desired direction untouched when no camera is given.
    pub fn move_camera_relative<C: ViewCamera + ?Sized>(
        &mut self,
        input: Vec2,
        camera: Option<&C>,
    ) -> Result<(), LocomotionError> {
        let camera = camera.ok_or(LocomotionError::NoCameraAvailable)?;
        self.move_input(camera_relative(input, camera.yaw()));
        Ok(())
    }

    /// Launch upward to reach `jump_height`.
    ///
    /// Overwrites vertical velocity, so repeated calls never stack. The caller is
    /// responsible for only jumping while grounded.
    pub fn jump(&mut self) {
        let mut velocity = self.body.linear_velocity();
        velocity.y = self.config.jump_speed();
        self.body.set_linear_velocity(velocity);
        log::debug!("jump: vy = {:.3}", velocity.y);
    }

    /// Accumulate contact evidence from the physics step.
    ///
    /// May be called any number of times between ticks; the grounded flag is the
    /// logical OR of every batch until the next [`Self::fixed_update`] clears it.
    pub fn on_contacts(&mut self, contacts: &[ContactPoint]) {
        if self.is_grounded {
            return;
        }
        let bounds = self.body.bounds();
        self.is_grounded =
            GroundSampler::contacts_ground(&bounds, self.config.ground_layer_mask, contacts);
    }

    /// Run one fixed-timestep update of duration `dt` seconds.
    pub fn fixed_update<P: SurfaceProbe + ?Sized>(&mut self, probe: &P, dt: f32) -> TickReport {
        let grounded = self.is_grounded;

        // 1) Gravity / ground stick, chosen from the velocity the tick starts with.
        let vertical_acceleration = self.vertical_acceleration(grounded);

        // 2) Acceleration budget for this tick.
        let braking = self.is_braking();
        let acceleration = if self.desired_move_direction == Vec2::zeros() {
            self.config.idle_deceleration
        } else if braking {
            self.config.braking_acceleration
        } else {
            self.config.acceleration
        };
        let budget = acceleration * dt;

        // 3) Ground-aware velocity resolution.
        let bounds = self.body.bounds();
        let resolution = GroundSampler::resolve(
            grounded,
            probe,
            &bounds,
            self.body.collider(),
            self.desired_move_direction,
            &self.config,
        );
        let speed = self.config.speed * self.move_input_magnitude;
        let velocity = self.body.linear_velocity();
        let velocity = match resolution {
            GroundResolution::Grounded { direction, normal } => {
                // Motion into the surface belongs to contact resolution, not the budget.
                let pressing = normal * velocity.dot(&normal).min(0.0);
                move_towards(velocity - pressing, direction * speed, budget) + pressing
            }
            GroundResolution::Airborne => {
                let target = self.desired_move_direction * speed;
                let horizontal = move_towards(to_planar(velocity), target, budget);
                from_planar(horizontal, velocity.y)
            }
        };
        self.body.set_linear_velocity(velocity);

        // Forces integrate on top of the resolved velocity, outside the budget.
        if vertical_acceleration != 0.0 {
            self.body
                .add_acceleration(-Vec3::y() * vertical_acceleration, dt);
        }
        let velocity = self.body.linear_velocity();

        // 4) Face the direction of travel.
        self.turn_toward_travel(velocity, dt);

        if grounded != self.prev_grounded {
            log::debug!("grounded: {} -> {grounded}", self.prev_grounded);
        }
        if braking != self.prev_braking {
            log::debug!("braking: {} -> {braking}", self.prev_braking);
        }
        self.prev_grounded = grounded;
        self.prev_braking = braking;

        log::trace!(
            "tick: grounded={grounded} braking={braking} budget={budget:.3} v=({:.3}, {:.3}, {:.3})",
            velocity.x,
            velocity.y,
            velocity.z
        );

        // 5) Contacts for the next step re-arm this.
        self.is_grounded = false;

        TickReport {
            was_grounded: grounded,
            braking,
            acceleration_budget: budget,
            resolution,
            velocity,
        }
    }

    /// Downward acceleration for this tick: gravity (or jump gravity while rising) when
    /// airborne, the ground-stick force when grounded.
    fn vertical_acceleration(&self, grounded: bool) -> f32 {
        if grounded {
            return self.config.ground_force;
        }
        let rising = self.body.linear_velocity().y > 0.0;
        if rising && self.config.jump_gravity > 0.0 {
            self.config.jump_gravity
        } else {
            self.config.gravity
        }
    }

    fn turn_toward_travel(&mut self, velocity: Vec3, dt: f32) {
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
        if self.config.turn_rate == 0.0
            || horizontal.norm_squared() <= DIR_EPS * DIR_EPS
            || self.desired_move_direction == Vec2::zeros()
        {
            return;
        }

        let target = Quat::face_towards(&horizontal, &Vec3::y());
        let t = (self.config.turn_rate * dt).clamp(0.0, 1.0);
        let current = self.body.rotation();
        // Nearly identical rotations have no well-defined slerp axis; land on the target.
        let next = current.try_slerp(&target, t, DIR_EPS).unwrap_or(target);
        self.body.set_rotation(next);
    }
}
