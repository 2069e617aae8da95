//! Vitality domain: life points, damage knockback and checkpoints.

mod components;
mod events;
mod systems;


pub use components::{Checkpoint, DamageOutcome, HIT_RECOVERY_TIME, Vitality};
pub use events::DamageActor;

use bevy::prelude::*;

use crate::motor::MotorSystems;
use crate::vitality::systems::{apply_damage, record_checkpoints, tick_recovery};

pub struct VitalityPlugin;

impl Plugin for VitalityPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageActor>().add_systems(
            Update,
            (tick_recovery, apply_damage, record_checkpoints)
                .chain()
                .after(MotorSystems::Step),
        );
    }
}
