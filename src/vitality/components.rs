//! Vitality domain: life points, hit recovery and respawn point.

use bevy::prelude::*;

/// Seconds an actor ignores damage after being hit.
pub const HIT_RECOVERY_TIME: f32 = 0.2;

/// What a hit did to the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Still recovering from the previous hit.
    Ignored,
    /// Lost a life; knock back and start recovering.
    Hurt { lives_left: u32 },
    /// Out of lives; back to the respawn point with full lives.
    Respawned,
}

#[derive(Component, Debug, Clone)]
pub struct Vitality {
    pub lives: u32,
    pub max_lives: u32,
    pub respawn_point: Vec2,
    recovering: f32,
}

impl Vitality {
    pub fn new(max_lives: u32, respawn_point: Vec2) -> Self {
        Self {
            lives: max_lives,
            max_lives,
            respawn_point,
            recovering: 0.0,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.recovering > 0.0
    }

    pub fn take_hit(&mut self) -> DamageOutcome {
        if self.is_invulnerable() {
            return DamageOutcome::Ignored;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.lives = self.max_lives;
            return DamageOutcome::Respawned;
        }

        self.recovering = HIT_RECOVERY_TIME;
        DamageOutcome::Hurt {
            lives_left: self.lives,
        }
    }

    /// Returns true on the tick recovery ends.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.recovering <= 0.0 {
            return false;
        }
        self.recovering -= dt;
        if self.recovering <= 0.0 {
            self.recovering = 0.0;
            return true;
        }
        false
    }
}

/// Trigger volume that moves the respawn point to its own position.
#[derive(Component, Debug, Default)]
pub struct Checkpoint;
