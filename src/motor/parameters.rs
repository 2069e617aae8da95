//! Motor domain: per-actor motion tuning and the values derived from it.

use std::ops::BitOr;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which contexts a jump may start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JumpSources(pub u8);

impl JumpSources {
    pub const NONE: Self = Self(0);
    pub const GROUND: Self = Self(1);
    pub const AIR: Self = Self(1 << 1);
    pub const WALL: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 & (Self::GROUND.0 | Self::AIR.0 | Self::WALL.0) == 0
    }
}

impl Default for JumpSources {
    fn default() -> Self {
        Self::GROUND | Self::WALL
    }
}

impl BitOr for JumpSources {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise-linear curve mapping seconds on a wall to a fraction of
/// gravity used as slide speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct WallSlideCurve {
    keys: Vec<CurveKey>,
}

impl From<Vec<CurveKey>> for WallSlideCurve {
    fn from(keys: Vec<CurveKey>) -> Self {
        Self::new(keys)
    }
}

impl From<WallSlideCurve> for Vec<CurveKey> {
    fn from(curve: WallSlideCurve) -> Self {
        curve.keys
    }
}

impl Default for WallSlideCurve {
    fn default() -> Self {
        Self::new(vec![
            CurveKey {
                time: 0.0,
                value: 0.03,
            },
            CurveKey {
                time: 1.0,
                value: 0.1,
            },
        ])
    }
}

impl WallSlideCurve {
    /// Keys are sorted by time on construction.
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Value at `time`, held flat outside the key range. Zero with no keys.
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if time <= b.time {
                let span = b.time - a.time;
                if span <= f32::EPSILON {
                    return b.value;
                }
                return a.value + (b.value - a.value) * (time - a.time) / span;
            }
        }
        last.value
    }
}

/// Immutable motion tuning for one actor.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParameters {
    // Running
    pub move_speed_on_ground: f32,
    pub move_speed_on_air: f32,
    pub acceleration_time_airborne: f32,
    pub acceleration_time_grounded: f32,

    // Jumping
    pub jump_sources: JumpSources,
    /// Seconds before another air jump may start.
    pub jump_cooldown: f32,
    /// Zero means unlimited.
    pub max_air_jumps: u32,
    pub max_jump_height: f32,
    pub min_jump_height: f32,
    pub time_to_jump_apex: f32,
    pub jump_input_buffer: f32,

    /// Terminal fall speed (negative).
    pub min_gravity: f32,

    // Dash and companion
    pub dash_speed: f32,
    pub dash_offset: f32,
    pub dash_min_distance: f32,
    pub companion_max_distance: f32,
    pub companion_base_speed: f32,
    pub companion_returning_factor: f32,

    // Walls
    pub wall_jump_climb: Vec2,
    pub wall_jump_off: Vec2,
    pub wall_leap: Vec2,
    pub wall_slide_speed: WallSlideCurve,
    pub wall_stick_time: f32,

    pub life_points: u32,
}

impl Default for MotionParameters {
    fn default() -> Self {
        Self {
            move_speed_on_ground: 8.0,
            move_speed_on_air: 8.0,
            acceleration_time_airborne: 0.2,
            acceleration_time_grounded: 0.1,
            jump_sources: JumpSources::default(),
            jump_cooldown: 0.25,
            max_air_jumps: 0,
            max_jump_height: 2.0,
            min_jump_height: 2.0,
            time_to_jump_apex: 0.25,
            jump_input_buffer: 0.1,
            min_gravity: -10.0,
            dash_speed: 25.0,
            dash_offset: 1.25,
            dash_min_distance: 5.0,
            companion_max_distance: 8.0,
            companion_base_speed: 15.0,
            companion_returning_factor: 0.75,
            wall_jump_climb: Vec2::new(7.5, 16.0),
            wall_jump_off: Vec2::new(8.5, 7.0),
            wall_leap: Vec2::new(18.0, 17.0),
            wall_slide_speed: WallSlideCurve::default(),
            wall_stick_time: 0.25,
            life_points: 5,
        }
    }
}

/// Gravity and jump velocities derived once from the jump height pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpPhysics {
    /// Negative.
    pub gravity: f32,
    pub max_jump_velocity: f32,
    pub min_jump_velocity: f32,
}

impl Default for JumpPhysics {
    fn default() -> Self {
        Self::from_parameters(&MotionParameters::default())
    }
}

impl JumpPhysics {
    const MIN_TIME_TO_APEX: f32 = 1.0e-3;

    pub fn from_parameters(params: &MotionParameters) -> Self {
        let apex = params.time_to_jump_apex.max(Self::MIN_TIME_TO_APEX);
        let gravity = -(2.0 * params.max_jump_height) / apex.powi(2);
        Self {
            gravity,
            max_jump_velocity: gravity.abs() * apex,
            min_jump_velocity: (2.0 * gravity.abs() * params.min_jump_height.max(0.0)).sqrt(),
        }
    }
}
