use avian2d::prelude::*;
use bevy::prelude::*;

use platform_motor::PlatformMotorPlugin;
use platform_motor::sandbox::SandboxPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Platform Motor Sandbox".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((PlatformMotorPlugin, SandboxPlugin))
        .run();
}
