//! Vitality domain: damage, recovery and checkpoint systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Checkpoint, DamageOutcome, Vitality};
use super::events::DamageActor;
use crate::motor::ActorMotor;

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageActor>,
    mut actors: Query<(&mut Vitality, &mut ActorMotor, &mut Transform)>,
) {
    for event in damage_events.read() {
        let Ok((mut vitality, mut motor, mut transform)) = actors.get_mut(event.target) else {
            continue;
        };

        match vitality.take_hit() {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt { lives_left } => {
                motor.apply_knockback();
                debug!("Actor {:?} hurt, {} lives left", event.target, lives_left);
            }
            DamageOutcome::Respawned => {
                let point = vitality.respawn_point;
                transform.translation.x = point.x;
                transform.translation.y = point.y;
                motor.reset_motion();
                info!("Actor {:?} respawned at {:?}", event.target, point);
            }
        }
    }
}

pub(crate) fn tick_recovery(time: Res<Time>, mut actors: Query<(Entity, &mut Vitality)>) {
    let dt = time.delta_secs();
    for (entity, mut vitality) in &mut actors {
        if vitality.tick(dt) {
            debug!("Actor {:?} can take damage again", entity);
        }
    }
}

pub(crate) fn record_checkpoints(
    mut collision_events: MessageReader<CollisionStart>,
    checkpoints: Query<&Transform, With<Checkpoint>>,
    mut actors: Query<&mut Vitality>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (actor_entity, checkpoint_entity) in pairs {
            let Ok(mut vitality) = actors.get_mut(actor_entity) else {
                continue;
            };
            let Ok(checkpoint) = checkpoints.get(checkpoint_entity) else {
                continue;
            };

            let point = checkpoint.translation.truncate();
            if vitality.respawn_point != point {
                vitality.respawn_point = point;
                debug!("Checkpoint reached at {:?}", point);
            }
        }
    }
}
