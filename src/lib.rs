//! Raycast-driven kinematic motor for 2D platformer actors.
//!
//! `collision` resolves a desired displacement against solid geometry,
//! slopes and one-way platforms. `motor` turns input into velocity with
//! variable-height jumps, air jumps, wall slides and wall jumps. `homing`
//! adds the companion dash, `vitality` life points and checkpoints, and
//! `config` loads the tuning from RON.

pub mod collision;
pub mod config;
pub mod homing;
pub mod motor;
pub mod sandbox;
pub mod vitality;

use bevy::prelude::*;

/// Everything except the sandbox scene and input.
pub struct PlatformMotorPlugin;

impl Plugin for PlatformMotorPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            config::ConfigPlugin,
            collision::CollisionPlugin,
            motor::MotorPlugin,
            homing::HomingPlugin,
            vitality::VitalityPlugin,
        ));
    }
}
