//! Homing domain: the dash ability and its round-trip companion.

mod companion;
mod dash;
mod systems;


pub use companion::{ARRIVAL_DISTANCE, CompanionProgress, DashCompanion, move_towards};
pub use dash::{DIRECTION_DEADBAND, DashAction, on_dash_ability, snap_direction};
pub use systems::{CompanionAnchor, CompanionLink};

use bevy::prelude::*;

use crate::homing::systems::{advance_companions, handle_dash_input};
use crate::motor::MotorSystems;

pub struct HomingPlugin;

impl Plugin for HomingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_dash_input.in_set(MotorSystems::Abilities))
            .add_systems(Update, advance_companions.after(MotorSystems::Step));
    }
}
