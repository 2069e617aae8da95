//! Motor domain: velocity, jumping and wall sliding on top of the
//! kinematic collider.

mod actor;
mod jump;
mod parameters;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use actor::{ActorMotor, DASH_EXIT_SMOOTH_TIME, DashOverride, TickContext, smooth_damp};
pub use jump::{ActorPhase, JumpController, JumpKind, WallSlide};
pub use parameters::{CurveKey, JumpPhysics, JumpSources, MotionParameters, WallSlideCurve};
pub use spawn::ActorBundle;
pub use systems::{ActorBounds, MovementInput, StandingOnMovingPlatform};

use bevy::prelude::*;

use crate::motor::systems::{apply_movement_input, step_actors};

/// Ordering for everything that touches actor motion in `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorSystems {
    /// Input sources write `MovementInput` here.
    ReadInput,
    /// Jump and climb commands reach the motor.
    ApplyInput,
    /// Abilities that override velocity (dash).
    Abilities,
    /// Velocity, resolve, and transform update.
    Step,
}

pub struct MotorPlugin;

impl Plugin for MotorPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                MotorSystems::ReadInput,
                MotorSystems::ApplyInput,
                MotorSystems::Abilities,
                MotorSystems::Step,
            )
                .chain(),
        )
        .add_systems(Update, apply_movement_input.in_set(MotorSystems::ApplyInput))
        .add_systems(Update, step_actors.in_set(MotorSystems::Step));
    }
}
