//! Collision domain: per-tick contact record written by the resolver.

use bevy::prelude::*;

/// Seconds a drop through a one-way platform ignores that platform.
pub const PASS_THROUGH_DURATION: f32 = 0.5;

/// Horizontal orientation of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing for a horizontal amount; `None` when it is zero.
    pub fn from_x(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Facing::Right)
        } else if x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn direction(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }
}

/// Surface touched while on a slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeHit {
    /// Degrees between the surface normal and world up.
    pub angle: f32,
    pub normal: Vec2,
}

/// What the actor is doing relative to a slope this tick. At most one of
/// climbing, descending, sliding can hold at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SlopeContact {
    #[default]
    None,
    Climbing(SlopeHit),
    Descending(SlopeHit),
    /// Standing on a surface steeper than the walkable maximum.
    SlidingDownMaxSlope(SlopeHit),
}

impl SlopeContact {
    pub fn hit(&self) -> Option<SlopeHit> {
        match *self {
            SlopeContact::None => None,
            SlopeContact::Climbing(hit)
            | SlopeContact::Descending(hit)
            | SlopeContact::SlidingDownMaxSlope(hit) => Some(hit),
        }
    }

    /// Slope angle in degrees, 0 without slope contact.
    pub fn angle(&self) -> f32 {
        self.hit().map_or(0.0, |hit| hit.angle)
    }

    /// Slope normal, zero without slope contact.
    pub fn normal(&self) -> Vec2 {
        self.hit().map_or(Vec2::ZERO, |hit| hit.normal)
    }

    pub fn is_climbing(&self) -> bool {
        matches!(self, SlopeContact::Climbing(_))
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, SlopeContact::Descending(_))
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self, SlopeContact::SlidingDownMaxSlope(_))
    }
}

/// Which sides of the box touched geometry this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.above || self.below || self.left || self.right
    }

    pub fn side(&self) -> bool {
        self.left || self.right
    }
}

/// Result of the last resolve call.
///
/// Fields fall in two groups. `contacts`, `slope`, `slope_angle_old` and
/// `move_amount_old` are rewritten every call by [`CollisionState::reset`].
/// `face_dir` and the pass-through countdown carry across calls; `reset`
/// leaves them alone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollisionState {
    pub contacts: Contacts,
    pub slope: SlopeContact,
    /// Slope angle of the previous call, in degrees.
    pub slope_angle_old: f32,
    /// Desired displacement before any resolution this call.
    pub move_amount_old: Vec2,
    pub face_dir: Facing,
    pass_through_remaining: f32,
}

impl CollisionState {
    /// Clear the per-call group, remembering the slope angle.
    pub fn reset(&mut self) {
        self.slope_angle_old = self.slope.angle();
        self.contacts = Contacts::default();
        self.slope = SlopeContact::None;
    }

    pub fn slope_angle(&self) -> f32 {
        self.slope.angle()
    }

    pub fn slope_normal(&self) -> Vec2 {
        self.slope.normal()
    }

    pub fn is_falling_through_platform(&self) -> bool {
        self.pass_through_remaining > 0.0
    }

    /// Start (or restart) ignoring one-way platforms for `duration` seconds.
    pub fn begin_pass_through(&mut self, duration: f32) {
        self.pass_through_remaining = duration.max(0.0);
    }

    /// Advance the pass-through countdown. Returns true on the call that
    /// clears it.
    pub fn tick_pass_through(&mut self, seconds: f32) -> bool {
        if self.pass_through_remaining <= 0.0 {
            return false;
        }
        self.pass_through_remaining -= seconds;
        if self.pass_through_remaining <= 0.0 {
            self.pass_through_remaining = 0.0;
            return true;
        }
        false
    }
}
