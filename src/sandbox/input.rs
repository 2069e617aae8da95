//! Sandbox: keyboard bindings for the player actor.

use bevy::prelude::*;

use super::room::SandboxPlayer;
use crate::motor::MovementInput;

const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const DASH_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::KeyJ];
const CLIMB_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];

pub(crate) fn read_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<&mut MovementInput, With<SandboxPlayer>>,
) {
    let mut x = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        x += 1.0;
    }

    // Down drops through one-way platforms.
    let mut y = 0.0;
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        y -= 1.0;
    }
    if keyboard.any_pressed(CLIMB_KEYS) {
        y += 1.0;
    }

    for mut input in &mut players {
        input.axis = Vec2::new(x, y);
        input.jump_just_pressed = keyboard.any_just_pressed(JUMP_KEYS);
        input.jump_just_released = keyboard.any_just_released(JUMP_KEYS);
        input.dash_just_pressed = keyboard.any_just_pressed(DASH_KEYS);
        input.climb_held = keyboard.any_pressed(CLIMB_KEYS);
    }
}
