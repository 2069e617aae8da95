//! Homing domain: the dash ability that pairs the motor with its companion.

use bevy::prelude::*;

use super::companion::DashCompanion;
use crate::motor::{ActorMotor, DashOverride, MotionParameters};

/// Direction components smaller than this are dropped, so near-axis dashes
/// stay on the axis.
pub const DIRECTION_DEADBAND: f32 = 0.1;

/// Result of pressing the dash button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashAction {
    /// The companion was sent out along the facing direction.
    Dispatched { target: Vec2 },
    /// The actor dashed toward the travelling companion.
    Engaged(DashOverride),
}

/// Dash button pressed: send the companion out, or dash toward it if it is
/// already out.
pub fn on_dash_ability(
    motor: &mut ActorMotor,
    companion: &mut DashCompanion,
    position: Vec2,
    params: &MotionParameters,
) -> DashAction {
    if companion.is_traveling() {
        return DashAction::Engaged(engage(motor, companion, position, params));
    }

    let target = position + motor.facing().direction() * params.companion_max_distance;
    companion.dispatch(
        target,
        position,
        params.companion_base_speed,
        params.companion_returning_factor,
    );
    debug!("Companion dispatched toward {:?}", target);
    DashAction::Dispatched { target }
}

fn engage(
    motor: &mut ActorMotor,
    companion: &mut DashCompanion,
    position: Vec2,
    params: &MotionParameters,
) -> DashOverride {
    let target_distance =
        (position.distance(companion.position) * params.dash_offset).max(params.dash_min_distance);
    let direction = snap_direction((companion.position - position).normalize_or_zero());

    let dash = DashOverride {
        origin: position,
        direction,
        target_distance,
    };
    motor.begin_dash(dash, params.dash_speed);
    companion.return_to(position, params.companion_base_speed);
    debug!(
        "Dash engaged: direction={:?}, distance={:.2}",
        direction, target_distance
    );
    dash
}

/// Zero out components inside the deadband.
pub fn snap_direction(direction: Vec2) -> Vec2 {
    let snap = |c: f32| if c.abs() < DIRECTION_DEADBAND { 0.0 } else { c };
    Vec2::new(snap(direction.x), snap(direction.y))
}
