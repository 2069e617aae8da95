//! Motor domain: jump sources, buffering, variable height and wall sliding.

use bevy::prelude::*;

use super::actor::ActorMotor;
use super::parameters::{JumpSources, MotionParameters};
use crate::collision::CollisionState;

/// Coarse movement phase, derived after every resolve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActorPhase {
    Grounded,
    #[default]
    Airborne,
    WallSliding {
        /// -1 for a wall on the left, 1 on the right.
        wall_dir: f32,
    },
}

impl ActorPhase {
    pub fn from_state(state: &CollisionState, wall: &WallSlide) -> Self {
        if state.contacts.below {
            ActorPhase::Grounded
        } else if wall.sliding {
            ActorPhase::WallSliding {
                wall_dir: wall.wall_dir,
            }
        } else {
            ActorPhase::Airborne
        }
    }
}

/// Which jump was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Air,
    WallClimb,
    WallOff,
    WallLeap,
    SlopeSlide,
    /// Allowed, but pushing into an over-steep slope; nothing happens.
    SlopeBlocked,
}

#[derive(Debug, Clone, Default)]
pub struct WallSlide {
    pub sliding: bool,
    pub time_on_wall: f32,
    /// Seconds of "away" input left before the actor lets go of the wall.
    pub time_to_unstick: f32,
    pub wall_dir: f32,
    /// While set the actor holds still on the wall instead of sliding.
    pub climb_hold: bool,
}

#[derive(Debug, Clone, Default)]
pub struct JumpController {
    /// Counts down after a jump; air jumps wait for it.
    pub cooldown: f32,
    pub input_buffer: f32,
    pub air_jumps: u32,
    pub button_held: bool,
    pub wall: WallSlide,
}

impl JumpController {
    pub fn decay(&mut self, dt: f32) {
        self.cooldown -= dt;
        self.input_buffer -= dt;
    }
}

impl ActorMotor {
    pub fn jump_controller(&self) -> &JumpController {
        &self.jump
    }

    pub fn air_jumps(&self) -> u32 {
        self.jump.air_jumps
    }

    pub fn is_wall_sliding(&self) -> bool {
        self.jump.wall.sliding
    }

    pub fn set_wall_climb(&mut self, hold: bool) {
        self.jump.wall.climb_hold = hold;
    }

    /// Ground, then air, then wall; the first allowed source wins.
    pub fn can_jump(&self, params: &MotionParameters, state: &CollisionState) -> bool {
        let sources = params.jump_sources;
        let below = state.contacts.below;

        if sources.contains(JumpSources::GROUND) && below {
            return true;
        }
        if sources.contains(JumpSources::AIR)
            && self.jump.cooldown <= 0.0
            && !below
            && (params.max_air_jumps == 0 || self.jump.air_jumps < params.max_air_jumps)
        {
            return true;
        }
        sources.contains(JumpSources::WALL) && self.jump.wall.sliding
    }

    /// Jump button edge. `fresh` is false for buffered retries.
    pub fn on_jump_pressed(
        &mut self,
        params: &MotionParameters,
        state: &CollisionState,
        fresh: bool,
    ) -> Option<JumpKind> {
        if fresh {
            self.jump.button_held = true;
        }

        if !self.can_jump(params, state) {
            if fresh {
                self.jump.input_buffer = params.jump_input_buffer;
                debug!("Jump buffered for {:.2}s", params.jump_input_buffer);
            }
            return None;
        }

        let kind = if self.jump.wall.sliding {
            let wall_dir = self.jump.wall.wall_dir;
            let (kind, impulse) = if self.input.x == 0.0 {
                (JumpKind::WallOff, params.wall_jump_off)
            } else if self.input.x.signum() == wall_dir {
                (JumpKind::WallClimb, params.wall_jump_climb)
            } else {
                (JumpKind::WallLeap, params.wall_leap)
            };
            self.velocity = Vec2::new(-wall_dir * impulse.x, impulse.y);
            kind
        } else if state.slope.is_sliding() {
            let normal = state.slope_normal();
            let into_slope = if normal.x < 0.0 { 1.0 } else { -1.0 };
            if self.input.x != 0.0 && self.input.x.signum() == into_slope {
                JumpKind::SlopeBlocked
            } else {
                self.velocity = normal * self.physics.max_jump_velocity;
                self.jump.cooldown = params.jump_cooldown;
                JumpKind::SlopeSlide
            }
        } else if !state.contacts.below {
            self.velocity.y = self.physics.max_jump_velocity;
            self.jump.cooldown = params.jump_cooldown;
            self.jump.air_jumps += 1;
            JumpKind::Air
        } else {
            self.velocity.y = self.physics.max_jump_velocity;
            self.jump.cooldown = params.jump_cooldown;
            JumpKind::Ground
        };

        self.jump.input_buffer = 0.0;
        debug!("Jump: {:?}, air_jumps={}", kind, self.jump.air_jumps);
        Some(kind)
    }

    /// Jump button released: cut the rise short, keeping at least the
    /// minimum jump height worth of speed.
    pub fn on_jump_released(&mut self) {
        self.jump.button_held = false;
        if self.velocity.y <= 0.0 {
            return;
        }
        let spent = self.physics.max_jump_velocity - self.velocity.y;
        if spent > self.physics.min_jump_velocity {
            self.velocity.y = 0.0;
        } else {
            self.velocity.y = self.physics.min_jump_velocity - spent;
        }
    }

    pub(super) fn retry_buffered_jump(&mut self, params: &MotionParameters, state: &CollisionState) {
        if self.jump.input_buffer <= 0.0 {
            return;
        }
        self.on_jump_pressed(params, state, false);
        if !self.jump.button_held && self.jump.input_buffer <= 0.0 {
            self.on_jump_released();
        }
    }

    pub(super) fn handle_wall_sliding(
        &mut self,
        params: &MotionParameters,
        state: &CollisionState,
        dt: f32,
    ) {
        let contacts = state.contacts;
        let wall = &mut self.jump.wall;
        wall.wall_dir = if contacts.left { -1.0 } else { 1.0 };
        wall.sliding = false;

        if !contacts.side() || contacts.below {
            wall.time_on_wall = 0.0;
            return;
        }

        wall.sliding = true;
        if self.velocity.y >= 0.0 {
            wall.time_on_wall = 0.0;
            return;
        }

        if wall.climb_hold {
            self.smoothing.y = 0.0;
            self.velocity.y = 0.0;
        } else {
            wall.time_on_wall += dt;
            self.velocity.y =
                -params.wall_slide_speed.evaluate(wall.time_on_wall) * self.physics.gravity.abs();
        }

        if wall.time_to_unstick > 0.0 {
            self.smoothing.x = 0.0;
            self.velocity.x = 0.0;
            let pulling_away = self.input.x != 0.0 && self.input.x.signum() != wall.wall_dir;
            if pulling_away {
                wall.time_to_unstick -= dt;
            } else {
                wall.time_to_unstick = params.wall_stick_time;
            }
        } else {
            wall.time_to_unstick = params.wall_stick_time;
        }
    }
}
