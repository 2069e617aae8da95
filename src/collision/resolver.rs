//! Collision domain: raycast-based kinematic resolution of a desired displacement.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::caster::{RayCaster, SurfaceKind};
use super::rays::{RayLayout, RaycastOrigins};
use super::state::{CollisionState, Facing, PASS_THROUGH_DURATION, SlopeContact, SlopeHit};

/// Two slope angles closer than this (degrees) count as the same surface.
const SLOPE_ANGLE_EPSILON: f32 = 1.0e-3;

/// Length used for the "follow the slope below" ray.
const UNBOUNDED_RAY: f32 = f32::MAX;

/// Tuning for the ray grid and slope handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderSettings {
    /// Inward offset rays start from.
    pub skin_width: f32,
    /// Maximum distance between neighbouring parallel rays.
    pub dst_between_rays: f32,
    /// Steepest walkable surface, in degrees.
    pub max_slope_angle: f32,
}

impl Default for ColliderSettings {
    fn default() -> Self {
        Self {
            skin_width: 0.015,
            dst_between_rays: 0.25,
            max_slope_angle: 60.0,
        }
    }
}

/// Turns a desired displacement into one that respects solid geometry,
/// slopes and one-way platforms.
#[derive(Component, Debug, Clone)]
pub struct KinematicCollider {
    pub settings: ColliderSettings,
    /// Layers the rays are allowed to hit.
    pub collision_mask: LayerMask,
    pub state: CollisionState,
    layout: RayLayout,
    origins: RaycastOrigins,
}

impl Default for KinematicCollider {
    fn default() -> Self {
        Self::new(ColliderSettings::default(), LayerMask::ALL)
    }
}

impl KinematicCollider {
    pub fn new(settings: ColliderSettings, collision_mask: LayerMask) -> Self {
        Self {
            settings,
            collision_mask,
            state: CollisionState::default(),
            layout: RayLayout::compute(Vec2::ZERO, settings.dst_between_rays),
            origins: RaycastOrigins::default(),
        }
    }

    /// Resolve a move with no directional input.
    pub fn resolve_without_input<C: RayCaster + ?Sized>(
        &mut self,
        caster: &mut C,
        bounds: Rect,
        desired: Vec2,
        standing_on_moving_platform: bool,
    ) -> Vec2 {
        self.resolve(caster, bounds, desired, Vec2::ZERO, standing_on_moving_platform)
    }

    /// Resolve `desired` for the actor box `bounds` and return the
    /// displacement the actor may actually make. The contact record for
    /// this call is left in [`KinematicCollider::state`].
    pub fn resolve<C: RayCaster + ?Sized>(
        &mut self,
        caster: &mut C,
        bounds: Rect,
        desired: Vec2,
        input: Vec2,
        standing_on_moving_platform: bool,
    ) -> Vec2 {
        let skin = self.settings.skin_width;
        let inner_size = bounds.inflate(-skin).size();
        if inner_size != self.layout.box_size {
            self.layout = RayLayout::compute(inner_size, self.settings.dst_between_rays);
        }
        self.origins = RaycastOrigins::from_bounds(bounds, skin);

        self.state.reset();
        self.state.move_amount_old = desired;

        let mut delta = desired;

        if delta.y < 0.0 {
            self.descend_slope(caster, &mut delta);
        }

        if let Some(face) = Facing::from_x(delta.x) {
            self.state.face_dir = face;
        }

        self.horizontal_collisions(caster, &mut delta, input);

        if delta.y != 0.0 {
            self.vertical_collisions(caster, &mut delta, input);
        }

        if standing_on_moving_platform {
            self.state.contacts.below = true;
        }

        delta
    }

    fn horizontal_collisions<C: RayCaster + ?Sized>(
        &mut self,
        caster: &mut C,
        delta: &mut Vec2,
        input: Vec2,
    ) {
        let skin = self.settings.skin_width;
        let max_slope = self.settings.max_slope_angle;
        let dir_x = self.state.face_dir.sign();
        let direction = if dir_x < 0.0 { Dir2::NEG_X } else { Dir2::X };
        let corner = if dir_x < 0.0 {
            self.origins.bottom_left
        } else {
            self.origins.bottom_right
        };

        let mut ray_length = if delta.x.abs() < skin {
            2.0 * skin
        } else {
            delta.x.abs() + skin
        };

        for i in 0..self.layout.horizontal_count {
            let origin = corner + Vec2::Y * (self.layout.horizontal_spacing * i as f32);
            let Some(hit) = caster.cast(origin, direction, ray_length) else {
                continue;
            };
            if hit.distance == 0.0 {
                continue;
            }

            let slope_angle = surface_angle(hit.normal);

            if i == 0 && slope_angle <= max_slope {
                if self.state.slope.is_descending() {
                    self.state.slope = SlopeContact::None;
                    *delta = self.state.move_amount_old;
                }

                let mut distance_to_slope_start = 0.0;
                if !same_angle(slope_angle, self.state.slope_angle_old) {
                    distance_to_slope_start = hit.distance - skin;
                    delta.x -= distance_to_slope_start * dir_x;
                }
                self.climb_slope(
                    delta,
                    SlopeHit {
                        angle: slope_angle,
                        normal: hit.normal,
                    },
                    input,
                );
                delta.x += distance_to_slope_start * dir_x;
            }

            let climbing = self.state.slope.is_climbing();
            if !climbing || slope_angle > max_slope {
                delta.x = (hit.distance - skin) * dir_x;
                ray_length = hit.distance;

                if climbing {
                    delta.y = self.state.slope_angle().to_radians().tan() * delta.x.abs();
                }

                self.state.contacts.left = dir_x < 0.0;
                self.state.contacts.right = dir_x > 0.0;
            }
        }
    }

    fn vertical_collisions<C: RayCaster + ?Sized>(
        &mut self,
        caster: &mut C,
        delta: &mut Vec2,
        input: Vec2,
    ) {
        let skin = self.settings.skin_width;
        let dir_y = if delta.y < 0.0 { -1.0 } else { 1.0 };
        let direction = if dir_y < 0.0 { Dir2::NEG_Y } else { Dir2::Y };
        let edge = if dir_y < 0.0 {
            self.origins.bottom_left
        } else {
            self.origins.top_left
        };
        let mut ray_length = delta.y.abs() + skin;

        for i in 0..self.layout.vertical_count {
            let origin = edge + Vec2::X * (self.layout.vertical_spacing * i as f32 + delta.x);
            let Some(hit) = caster.cast(origin, direction, ray_length) else {
                continue;
            };

            if hit.surface == SurfaceKind::OneWay {
                if dir_y > 0.0 || hit.distance == 0.0 {
                    continue;
                }
                if self.state.is_falling_through_platform() {
                    continue;
                }
                if input.y <= -1.0 {
                    self.state.begin_pass_through(PASS_THROUGH_DURATION);
                    debug!("Drop-through started");
                    continue;
                }
            }

            delta.y = (hit.distance - skin) * dir_y;
            ray_length = hit.distance;

            if self.state.slope.is_climbing() {
                let tan = self.state.slope_angle().to_radians().tan();
                if tan.abs() > f32::EPSILON {
                    delta.x = delta.y / tan * step_sign(delta.x);
                }
            }

            self.state.contacts.below = dir_y < 0.0;
            self.state.contacts.above = dir_y > 0.0;
        }

        if self.state.slope.is_climbing() {
            let dir_x = step_sign(delta.x);
            let direction = if dir_x < 0.0 { Dir2::NEG_X } else { Dir2::X };
            let corner = if dir_x < 0.0 {
                self.origins.bottom_left
            } else {
                self.origins.bottom_right
            };
            let origin = corner + Vec2::Y * delta.y;

            if let Some(hit) = caster.cast(origin, direction, delta.x.abs() + skin) {
                let slope_angle = surface_angle(hit.normal);
                if !same_angle(slope_angle, self.state.slope_angle()) {
                    delta.x = (hit.distance - skin) * dir_x;
                    self.state.slope = SlopeContact::Climbing(SlopeHit {
                        angle: slope_angle,
                        normal: hit.normal,
                    });
                }
            }
        }
    }

    fn climb_slope(&mut self, delta: &mut Vec2, slope: SlopeHit, input: Vec2) {
        let move_distance = delta.x.abs();
        let radians = slope.angle.to_radians();
        let climb_y = radians.sin() * move_distance;

        if delta.y > climb_y {
            // Already rising faster than the slope, e.g. jumping.
            return;
        }

        if self.state.move_amount_old.x == 0.0 || input.x == 0.0 {
            delta.y = 0.0;
        } else {
            delta.y = climb_y;
            delta.x = radians.cos() * move_distance * step_sign(delta.x);
        }

        self.state.contacts.below = true;
        self.state.slope = SlopeContact::Climbing(slope);
    }

    fn descend_slope<C: RayCaster + ?Sized>(&mut self, caster: &mut C, delta: &mut Vec2) {
        let skin = self.settings.skin_width;
        let max_slope = self.settings.max_slope_angle;
        let ground_ray_length = delta.y.abs() + skin;

        let left = caster.cast(self.origins.bottom_left, Dir2::NEG_Y, ground_ray_length);
        let right = caster.cast(self.origins.bottom_right, Dir2::NEG_Y, ground_ray_length);

        if left.is_some() != right.is_some() {
            for hit in [left, right].into_iter().flatten() {
                let slope_angle = surface_angle(hit.normal);
                if slope_angle > max_slope {
                    let tan = slope_angle.to_radians().tan();
                    if tan.abs() > f32::EPSILON {
                        delta.x = step_sign(hit.normal.x) * (delta.y.abs() - hit.distance) / tan;
                    }
                    self.state.slope = SlopeContact::SlidingDownMaxSlope(SlopeHit {
                        angle: slope_angle,
                        normal: hit.normal,
                    });
                }
            }
        }

        if self.state.slope.is_sliding() {
            return;
        }

        let dir_x = step_sign(delta.x);
        let trailing = if dir_x < 0.0 {
            self.origins.bottom_right
        } else {
            self.origins.bottom_left
        };
        let Some(hit) = caster.cast(trailing, Dir2::NEG_Y, UNBOUNDED_RAY) else {
            return;
        };

        let slope_angle = surface_angle(hit.normal);
        if slope_angle <= SLOPE_ANGLE_EPSILON || slope_angle > max_slope {
            return;
        }
        if step_sign(hit.normal.x) != dir_x {
            return;
        }

        let radians = slope_angle.to_radians();
        let move_distance = delta.x.abs();
        if hit.distance - skin <= radians.tan() * move_distance {
            delta.x = radians.cos() * move_distance * dir_x;
            delta.y -= radians.sin() * move_distance;

            self.state.contacts.below = true;
            self.state.slope = SlopeContact::Descending(SlopeHit {
                angle: slope_angle,
                normal: hit.normal,
            });
        }
    }
}

/// Angle in degrees between a surface normal and world up, in `[0, 180]`.
pub fn surface_angle(normal: Vec2) -> f32 {
    let Some(normal) = normal.try_normalize() else {
        return 0.0;
    };
    normal.dot(Vec2::Y).clamp(-1.0, 1.0).acos().to_degrees()
}

fn same_angle(a: f32, b: f32) -> bool {
    (a - b).abs() < SLOPE_ANGLE_EPSILON
}

/// Sign that treats zero as positive.
fn step_sign(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}
