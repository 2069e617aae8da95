//! Sandbox: keyboard input, a test room, and sprite feedback for the motor.

mod input;
mod room;

pub use room::SandboxPlayer;

use bevy::prelude::*;

use crate::collision::Facing;
use crate::config::ConfigLoaded;
use crate::motor::{ActorMotor, MotorSystems};
use crate::sandbox::input::read_keyboard;
use crate::sandbox::room::{spawn_camera, spawn_player, spawn_room};
use crate::vitality::Vitality;

const HURT_TINT: Color = Color::srgb(1.0, 0.35, 0.35);
const PLAYER_TINT: Color = Color::srgb(0.9, 0.9, 0.95);

pub struct SandboxPlugin;

impl Plugin for SandboxPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.1)))
            .add_systems(
                Startup,
                (spawn_camera, spawn_room, spawn_player.after(ConfigLoaded)),
            )
            .add_systems(Update, read_keyboard.in_set(MotorSystems::ReadInput))
            .add_systems(
                Update,
                update_player_sprite.after(MotorSystems::Step),
            );
    }
}

/// Flip by facing and tint while recovering from a hit.
fn update_player_sprite(
    mut players: Query<(&ActorMotor, Option<&Vitality>, &mut Sprite), With<SandboxPlayer>>,
) {
    for (motor, vitality, mut sprite) in &mut players {
        sprite.flip_x = motor.facing() == Facing::Left;
        let hurt = vitality.is_some_and(Vitality::is_invulnerable);
        sprite.color = if hurt { HURT_TINT } else { PLAYER_TINT };
    }
}
