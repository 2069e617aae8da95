//! Collision domain: a line-segment world standing in for the physics backend.

use bevy::prelude::*;

use super::caster::{RayCaster, RayHit, SurfaceKind};

#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub surface: SurfaceKind,
}

#[derive(Debug, Default, Clone)]
pub struct SegmentWorld {
    pub segments: Vec<Segment>,
    /// Number of casts answered so far.
    pub casts: usize,
}

impl SegmentWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solid(mut self, a: Vec2, b: Vec2) -> Self {
        self.segments.push(Segment {
            a,
            b,
            surface: SurfaceKind::Solid,
        });
        self
    }

    pub fn one_way(mut self, a: Vec2, b: Vec2) -> Self {
        self.segments.push(Segment {
            a,
            b,
            surface: SurfaceKind::OneWay,
        });
        self
    }

    /// Infinite-ish floor along `y`.
    pub fn floor(self, y: f32) -> Self {
        self.solid(Vec2::new(-1000.0, y), Vec2::new(1000.0, y))
    }

    /// Tall vertical wall at `x`.
    pub fn wall(self, x: f32) -> Self {
        self.solid(Vec2::new(x, -1000.0), Vec2::new(x, 1000.0))
    }
}

fn cross(u: Vec2, v: Vec2) -> f32 {
    u.x * v.y - u.y * v.x
}

impl RayCaster for SegmentWorld {
    fn cast(&mut self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit> {
        self.casts += 1;
        let r = *direction;
        let mut best: Option<RayHit> = None;

        for segment in &self.segments {
            let e = segment.b - segment.a;
            let denom = cross(r, e);
            if denom.abs() < 1.0e-9 {
                continue;
            }
            let w = segment.a - origin;
            let t = cross(w, e) / denom;
            let s = cross(w, r) / denom;
            if t < 0.0 || t > max_distance || !(-1.0e-6..=1.0 + 1.0e-6).contains(&s) {
                continue;
            }
            if best.is_some_and(|b| b.distance <= t) {
                continue;
            }

            let mut normal = Vec2::new(-e.y, e.x).normalize();
            if normal.dot(r) > 0.0 {
                normal = -normal;
            }
            best = Some(RayHit {
                distance: t,
                normal,
                surface: segment.surface,
            });
        }

        best
    }
}

/// Box of `half` extents centred on `center`.
pub fn bounds(center: Vec2, half: Vec2) -> Rect {
    Rect::from_center_half_size(center, half)
}
