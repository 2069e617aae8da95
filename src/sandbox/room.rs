//! Sandbox: a single test room exercising every surface type.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::collision::{GameLayer, OneWayPlatform};
use crate::config::MotionConfig;
use crate::homing::{CompanionAnchor, CompanionLink, DashCompanion};
use crate::motor::ActorBundle;
use crate::vitality::{Checkpoint, Vitality};

const PLAYER_SPAWN: Vec2 = Vec2::new(-14.0, -2.0);
const COMPANION_OFFSET: Vec2 = Vec2::new(-0.6, 1.2);

/// The actor driven by the keyboard.
#[derive(Component, Debug, Default)]
pub struct SandboxPlayer;

pub(crate) fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: 1.0 / 28.0,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 2.0, 0.0),
    ));
}

pub(crate) fn spawn_room(mut commands: Commands) {
    let solid_color = Color::srgb(0.3, 0.32, 0.4);
    let slope_color = Color::srgb(0.35, 0.4, 0.35);
    let steep_color = Color::srgb(0.5, 0.3, 0.3);
    let platform_color = Color::srgb(0.55, 0.5, 0.35);

    // Floor and walls
    spawn_block(&mut commands, Vec2::new(0.0, -4.5), Vec2::new(42.0, 1.0), 0.0, solid_color);
    spawn_block(&mut commands, Vec2::new(-20.5, 3.5), Vec2::new(1.0, 16.0), 0.0, solid_color);
    spawn_block(&mut commands, Vec2::new(20.5, 3.5), Vec2::new(1.0, 16.0), 0.0, solid_color);

    // Walkable 30 degree ramp up to a ledge
    spawn_block(&mut commands, Vec2::new(-6.0, -3.0), Vec2::new(8.0, 1.0), 30.0, slope_color);
    spawn_block(&mut commands, Vec2::new(-0.5, -2.25), Vec2::new(4.0, 3.5), 0.0, solid_color);

    // Too steep to climb; the actor slides off it
    spawn_block(&mut commands, Vec2::new(14.0, -2.0), Vec2::new(7.0, 1.0), 70.0, steep_color);

    // One-way platforms
    for (position, width) in [
        (Vec2::new(5.0, -1.0), 4.0),
        (Vec2::new(8.0, 2.0), 4.0),
        (Vec2::new(4.0, 5.0), 5.0),
    ] {
        commands.spawn((
                OneWayPlatform,
            Sprite {
                color: platform_color,
                custom_size: Some(Vec2::new(width, 0.25)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(width, 0.25),
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        ));
    }

    // Checkpoint on the upper platform
    commands.spawn((
        Checkpoint,
        Sprite {
            color: Color::srgba(0.4, 0.8, 1.0, 0.35),
            custom_size: Some(Vec2::new(1.0, 2.0)),
            ..default()
        },
        Transform::from_xyz(4.0, 6.1, -0.1),
        RigidBody::Static,
        Collider::rectangle(1.0, 2.0),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Checkpoint, [GameLayer::Player]),
    ));
}

fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2, degrees: f32, color: Color) {
    commands.spawn((
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0)
            .with_rotation(Quat::from_rotation_z(degrees.to_radians())),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
    ));
}

pub(crate) fn spawn_player(mut commands: Commands, config: Res<MotionConfig>) {
    let parameters = config.parameters.clone();
    let size = config.actor_size;
    let lives = parameters.life_points;

    let player = commands
        .spawn((
            SandboxPlayer,
            ActorBundle::new(parameters, config.collider, PLAYER_SPAWN, size),
            Vitality::new(lives, PLAYER_SPAWN),
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.95),
                custom_size: Some(size),
                ..default()
            },
        ))
        .id();

    let companion_position = PLAYER_SPAWN + COMPANION_OFFSET;
    let companion = commands
        .spawn((
            DashCompanion::new(companion_position),
            CompanionAnchor {
                owner: player,
                offset: COMPANION_OFFSET,
            },
            Sprite {
                color: Color::srgb(1.0, 0.8, 0.3),
                custom_size: Some(Vec2::splat(0.4)),
                ..default()
            },
            Transform::from_xyz(companion_position.x, companion_position.y, 2.0),
        ))
        .id();

    commands.entity(player).insert(CompanionLink(companion));
    info!("Spawned sandbox player with {} lives", lives);
}
