//! Motor domain: ECS wiring for input commands and the per-frame step.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::actor::{ActorMotor, TickContext};
use super::parameters::MotionParameters;
use crate::collision::{AvianRayCaster, DebugRays, KinematicCollider, OneWayPlatform};

/// Commands for one actor, written by an input source every frame.
#[derive(Component, Debug, Clone, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub dash_just_pressed: bool,
    /// Hold position on a wall instead of sliding.
    pub climb_held: bool,
}

/// Half extents of the actor box, centred on its transform.
#[derive(Component, Debug, Clone, Copy)]
pub struct ActorBounds {
    pub half_extents: Vec2,
}

/// Marks an actor carried by a moving platform this frame.
#[derive(Component, Debug, Default)]
pub struct StandingOnMovingPlatform;

pub(crate) fn apply_movement_input(
    mut actors: Query<(
        &MovementInput,
        &MotionParameters,
        &KinematicCollider,
        &mut ActorMotor,
    )>,
) {
    for (input, params, collider, mut motor) in &mut actors {
        motor.set_directional_input(input.axis);
        motor.set_wall_climb(input.climb_held);

        if input.jump_just_pressed {
            motor.on_jump_pressed(params, &collider.state, true);
        }
        if input.jump_just_released {
            motor.on_jump_released();
        }
    }
}

pub(crate) fn step_actors(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    one_way: Query<(), With<OneWayPlatform>>,
    mut debug_rays: Option<ResMut<DebugRays>>,
    mut actors: Query<(
        Entity,
        &MotionParameters,
        &ActorBounds,
        &mut ActorMotor,
        &mut KinematicCollider,
        &mut Transform,
        Has<StandingOnMovingPlatform>,
    )>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    if let Some(rays) = debug_rays.as_deref_mut() {
        rays.0.clear();
    }

    for (entity, params, bounds, mut motor, mut collider, mut transform, on_platform) in
        &mut actors
    {
        let mask = collider.collision_mask;
        let caster = AvianRayCaster::new(&spatial_query, mask, entity, |hit| {
            one_way.contains(hit)
        });
        let mut caster = match debug_rays.as_deref_mut() {
            Some(rays) => caster.with_trace(&mut rays.0),
            None => caster,
        };

        let ctx = TickContext {
            position: transform.translation.truncate(),
            half_extents: bounds.half_extents,
            dt,
            standing_on_moving_platform: on_platform,
        };
        let delta = motor.tick(params, &mut collider, &mut caster, ctx);
        transform.translation += delta.extend(0.0);
    }
}
