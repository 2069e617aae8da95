//! Homing domain: the detached companion that flies out and back.

use bevy::prelude::*;

/// Distance at which the companion counts as having reached its target.
pub const ARRIVAL_DISTANCE: f32 = 0.1;

/// What happened to the companion during one advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionProgress {
    Idle,
    Outbound,
    /// Reached the dispatch target and turned back.
    TurnedBack,
    Returning,
    /// Back at its anchor; idle from now on.
    Arrived,
}

#[derive(Component, Debug, Clone)]
pub struct DashCompanion {
    pub position: Vec2,
    target: Vec2,
    /// Where the current trip started; the turnaround heads back here.
    origin: Vec2,
    traveling: bool,
    returning: bool,
    base_speed: f32,
    returning_factor: f32,
}

impl DashCompanion {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            target: position,
            origin: position,
            traveling: false,
            returning: false,
            base_speed: 15.0,
            returning_factor: 0.5,
        }
    }

    pub fn is_traveling(&self) -> bool {
        self.traveling
    }

    pub fn is_returning(&self) -> bool {
        self.returning
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Start a round trip from `from` to `to`. Ignored mid-trip.
    pub fn dispatch(&mut self, to: Vec2, from: Vec2, base_speed: f32, returning_factor: f32) {
        if self.traveling {
            return;
        }
        self.base_speed = base_speed;
        self.returning_factor = returning_factor;
        self.position = from;
        self.origin = from;
        self.target = to;
        self.traveling = true;
    }

    /// Cut the trip short and fly to `to` at `speed`. Ignored when idle.
    pub fn return_to(&mut self, to: Vec2, speed: f32) {
        if !self.traveling {
            return;
        }
        self.base_speed = speed;
        self.returning_factor = 1.0;
        self.target = to;
        self.returning = true;
    }

    /// Move toward the current target. `anchor` is the idle resting spot.
    pub fn advance(&mut self, dt: f32, anchor: Vec2) -> CompanionProgress {
        if !self.traveling {
            self.target = anchor;
        }
        if self.target == self.position {
            return self.progress();
        }

        let speed = if self.returning {
            self.base_speed * self.returning_factor
        } else {
            self.base_speed
        };
        self.position = move_towards(self.position, self.target, speed * dt);

        if !self.traveling || self.position.distance(self.target) >= ARRIVAL_DISTANCE {
            return self.progress();
        }

        if !self.returning {
            self.target = self.origin;
            self.returning = true;
            CompanionProgress::TurnedBack
        } else {
            self.target = anchor;
            self.position = anchor;
            self.returning = false;
            self.traveling = false;
            CompanionProgress::Arrived
        }
    }

    fn progress(&self) -> CompanionProgress {
        match (self.traveling, self.returning) {
            (false, _) => CompanionProgress::Idle,
            (true, false) => CompanionProgress::Outbound,
            (true, true) => CompanionProgress::Returning,
        }
    }
}

/// Step from `current` toward `target` by at most `max_step`.
pub fn move_towards(current: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_step || distance == 0.0 {
        return target;
    }
    current + to_target / distance * max_step
}
