//! Motor domain: velocity integration and the per-tick orchestration.

use bevy::prelude::*;

use super::jump::{ActorPhase, JumpController};
use super::parameters::{JumpPhysics, MotionParameters};
use crate::collision::{CollisionState, Facing, KinematicCollider, RayCaster};

/// Smoothing time used when a dash hands control back to normal motion.
pub const DASH_EXIT_SMOOTH_TIME: f32 = 0.2;

/// Critically damped spring toward `target`.
///
/// `smooth_time` is floored at 0.0001, so a zero or negative value snaps
/// almost exactly onto the target.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // No overshoot past the target.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// Constant-velocity override active during a dash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashOverride {
    pub origin: Vec2,
    /// Unit direction, possibly snapped to an axis.
    pub direction: Vec2,
    pub target_distance: f32,
}

/// Per-tick inputs that come from the world rather than the motor.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Actor centre at the start of the tick.
    pub position: Vec2,
    pub half_extents: Vec2,
    pub dt: f32,
    pub standing_on_moving_platform: bool,
}

/// Velocity state machine for one actor.
#[derive(Component, Debug, Clone, Default)]
pub struct ActorMotor {
    pub(super) physics: JumpPhysics,
    pub velocity: Vec2,
    pub(super) smoothing: Vec2,
    pub(super) input: Vec2,
    pub(super) facing: Facing,
    pub(super) dash: Option<DashOverride>,
    pub(super) jump: JumpController,
    pub(super) phase: ActorPhase,
}

impl ActorMotor {
    pub fn new(params: &MotionParameters) -> Self {
        let physics = JumpPhysics::from_parameters(params);
        info!(
            "Motor physics: gravity={:.3}, max_jump_velocity={:.3}, min_jump_velocity={:.3}",
            physics.gravity, physics.max_jump_velocity, physics.min_jump_velocity
        );
        Self {
            physics,
            ..default()
        }
    }

    pub fn physics(&self) -> JumpPhysics {
        self.physics
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn input(&self) -> Vec2 {
        self.input
    }

    pub fn phase(&self) -> ActorPhase {
        self.phase
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_some()
    }

    pub fn dash(&self) -> Option<DashOverride> {
        self.dash
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn set_directional_input(&mut self, axis: Vec2) {
        self.input = axis;
    }

    /// Enter constant-velocity mode until the dash exit condition holds.
    pub fn begin_dash(&mut self, dash: DashOverride, speed: f32) {
        self.velocity = dash.direction * speed;
        self.dash = Some(dash);
    }

    /// Push away from the facing direction after taking a hit.
    pub fn apply_knockback(&mut self) {
        let strength = self.physics.min_jump_velocity;
        self.velocity = Vec2::new(-self.facing.sign() * strength, strength);
    }

    /// Drop all motion state; keeps derived physics and facing.
    pub fn reset_motion(&mut self) {
        *self = Self {
            physics: self.physics,
            facing: self.facing,
            input: self.input,
            ..default()
        };
    }

    /// One simulation step. Returns the displacement to apply to the actor.
    pub fn tick<C: RayCaster + ?Sized>(
        &mut self,
        params: &MotionParameters,
        collider: &mut KinematicCollider,
        caster: &mut C,
        ctx: TickContext,
    ) -> Vec2 {
        self.compute_velocity(params, &collider.state, ctx.position, ctx.dt);
        self.handle_wall_sliding(params, &collider.state, ctx.dt);
        self.update_facing();

        let bounds = Rect::from_center_half_size(ctx.position, ctx.half_extents);
        let delta = collider.resolve(
            caster,
            bounds,
            self.velocity * ctx.dt,
            self.input,
            ctx.standing_on_moving_platform,
        );

        self.react_to_collisions(&collider.state, ctx.dt);
        self.retry_buffered_jump(params, &collider.state);
        self.jump.decay(ctx.dt);
        delta
    }

    pub(super) fn compute_velocity(
        &mut self,
        params: &MotionParameters,
        state: &CollisionState,
        position: Vec2,
        dt: f32,
    ) {
        let Some(dash) = self.dash else {
            self.smooth_horizontal(params, state, dt);
            let target_y = (self.velocity.y + self.physics.gravity * dt).max(params.min_gravity);
            // Negative smoothing time; snaps onto the target.
            self.velocity.y = smooth_damp(
                self.velocity.y,
                target_y,
                &mut self.smoothing.y,
                self.physics.gravity * dt,
                dt,
            );
            return;
        };

        let contacts = state.contacts;
        let finished = position.distance(dash.origin) >= dash.target_distance
            || (dash.direction.x > 0.0 && contacts.right)
            || (dash.direction.x < 0.0 && contacts.left)
            || (dash.direction.y > 0.0 && contacts.above)
            || (dash.direction.y < 0.0 && contacts.below);
        if !finished {
            return;
        }

        self.dash = None;
        self.velocity = Vec2::ZERO;
        self.smooth_horizontal(params, state, dt);
        self.velocity.y = smooth_damp(
            self.velocity.y,
            params.min_gravity,
            &mut self.smoothing.y,
            DASH_EXIT_SMOOTH_TIME,
            dt,
        );
        debug!("Dash finished after {:.2}", position.distance(dash.origin));
    }

    fn smooth_horizontal(&mut self, params: &MotionParameters, state: &CollisionState, dt: f32) {
        let grounded = state.contacts.below;
        let speed = if grounded {
            params.move_speed_on_ground
        } else {
            params.move_speed_on_air
        };
        let smooth_time = if grounded {
            params.acceleration_time_grounded
        } else {
            params.acceleration_time_airborne
        };
        self.velocity.x = smooth_damp(
            self.velocity.x,
            self.input.x * speed,
            &mut self.smoothing.x,
            smooth_time,
            dt,
        );
    }

    pub(super) fn update_facing(&mut self) {
        if let Some(facing) = Facing::from_x(self.input.x) {
            self.facing = facing;
        }
    }

    pub(super) fn react_to_collisions(&mut self, state: &CollisionState, dt: f32) {
        let contacts = state.contacts;
        if contacts.above || contacts.below {
            if state.slope.is_sliding() {
                self.velocity.y += state.slope_normal().y * -self.physics.gravity * dt;
            } else {
                self.smoothing.y = 0.0;
                self.velocity.y = 0.0;
            }
        }

        if contacts.below || self.jump.wall.sliding {
            self.jump.air_jumps = 0;
        }

        let phase = ActorPhase::from_state(state, &self.jump.wall);
        if phase != self.phase {
            match (self.phase, phase) {
                (_, ActorPhase::Grounded) => debug!("Landed: velocity={:?}", self.velocity),
                (ActorPhase::Grounded, ActorPhase::Airborne) => debug!("Left ground"),
                (_, ActorPhase::WallSliding { wall_dir }) => {
                    debug!("Wall slide started: wall_dir={}", wall_dir)
                }
                _ => {}
            }
            self.phase = phase;
        }
    }
}
