//! Vitality domain: damage messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Written by whatever decides an actor got hurt (hazards, enemies).
#[derive(Debug)]
pub struct DamageActor {
    pub target: Entity,
}

impl Message for DamageActor {}
