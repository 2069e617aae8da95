//! Homing domain: dash input and companion travel systems.

use bevy::prelude::*;

use super::companion::{CompanionProgress, DashCompanion};
use super::dash::on_dash_ability;
use crate::motor::{ActorMotor, MotionParameters, MovementInput};

/// Points an actor at its companion entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct CompanionLink(pub Entity);

/// Idle resting spot of a companion, relative to its owner.
#[derive(Component, Debug, Clone, Copy)]
pub struct CompanionAnchor {
    pub owner: Entity,
    pub offset: Vec2,
}

pub(crate) fn handle_dash_input(
    mut actors: Query<(
        &MovementInput,
        &MotionParameters,
        &Transform,
        &CompanionLink,
        &mut ActorMotor,
    )>,
    mut companions: Query<&mut DashCompanion>,
) {
    for (input, params, transform, link, mut motor) in &mut actors {
        if !input.dash_just_pressed {
            continue;
        }
        let Ok(mut companion) = companions.get_mut(link.0) else {
            warn!("Dash pressed but companion {:?} is missing", link.0);
            continue;
        };
        on_dash_ability(
            &mut motor,
            &mut companion,
            transform.translation.truncate(),
            params,
        );
    }
}

pub(crate) fn advance_companions(
    time: Res<Time>,
    owners: Query<&Transform, Without<DashCompanion>>,
    mut companions: Query<(&mut DashCompanion, &CompanionAnchor, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (mut companion, anchor, mut transform) in &mut companions {
        let Ok(owner) = owners.get(anchor.owner) else {
            continue;
        };
        let anchor_position = owner.translation.truncate() + anchor.offset;

        match companion.advance(dt, anchor_position) {
            CompanionProgress::TurnedBack => debug!("Companion turned back"),
            CompanionProgress::Arrived => debug!("Companion back at anchor"),
            _ => {}
        }

        transform.translation.x = companion.position.x;
        transform.translation.y = companion.position.y;
    }
}
