//! Motor domain: bundle for spawning a motor-driven actor.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::actor::ActorMotor;
use super::parameters::MotionParameters;
use super::systems::{ActorBounds, MovementInput};
use crate::collision::{ColliderSettings, GameLayer, KinematicCollider};

/// Everything the motor systems need on one entity.
///
/// The physics collider is a sensor: it only reports overlaps (checkpoints),
/// movement is resolved by raycasts against the `Ground` layer.
#[derive(Bundle)]
pub struct ActorBundle {
    pub parameters: MotionParameters,
    pub motor: ActorMotor,
    pub kinematic: KinematicCollider,
    pub bounds: ActorBounds,
    pub input: MovementInput,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub sensor: Sensor,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
}

impl ActorBundle {
    pub fn new(
        parameters: MotionParameters,
        settings: ColliderSettings,
        position: Vec2,
        size: Vec2,
    ) -> Self {
        Self {
            motor: ActorMotor::new(&parameters),
            parameters,
            kinematic: KinematicCollider::new(settings, GameLayer::Ground.into()),
            bounds: ActorBounds {
                half_extents: size / 2.0,
            },
            input: MovementInput::default(),
            transform: Transform::from_xyz(position.x, position.y, 1.0),
            rigid_body: RigidBody::Kinematic,
            collider: Collider::rectangle(size.x, size.y),
            sensor: Sensor,
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(GameLayer::Player, [GameLayer::Checkpoint]),
        }
    }
}
