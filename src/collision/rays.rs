//! Collision domain: ray anchor points and per-axis ray spacing.

use bevy::prelude::*;

/// Four corners of the skin-shrunk actor box that rays are cast from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaycastOrigins {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl RaycastOrigins {
    /// Shrink `bounds` by `skin_width` on every side and read off the corners.
    pub fn from_bounds(bounds: Rect, skin_width: f32) -> Self {
        let inner = bounds.inflate(-skin_width);
        Self {
            top_left: Vec2::new(inner.min.x, inner.max.y),
            top_right: inner.max,
            bottom_left: inner.min,
            bottom_right: Vec2::new(inner.max.x, inner.min.y),
        }
    }
}

/// How many rays are cast along each edge and how far apart they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayLayout {
    /// Rays cast sideways, stacked along the box height.
    pub horizontal_count: usize,
    /// Rays cast up or down, spread along the box width.
    pub vertical_count: usize,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    /// Box size the layout was computed for.
    pub box_size: Vec2,
}

impl Default for RayLayout {
    fn default() -> Self {
        Self::compute(Vec2::ZERO, 0.25)
    }
}

impl RayLayout {
    /// Fewest rays an edge can have; keeps the spacing division defined.
    pub const MIN_RAYS: usize = 2;

    /// Lay out rays for a (skin-shrunk) box of `box_size`.
    pub fn compute(box_size: Vec2, max_ray_separation: f32) -> Self {
        let horizontal_count = ray_count(box_size.y, max_ray_separation);
        let vertical_count = ray_count(box_size.x, max_ray_separation);

        Self {
            horizontal_count,
            vertical_count,
            horizontal_spacing: box_size.y / (horizontal_count - 1) as f32,
            vertical_spacing: box_size.x / (vertical_count - 1) as f32,
            box_size,
        }
    }
}

fn ray_count(extent: f32, max_ray_separation: f32) -> usize {
    if max_ray_separation <= 0.0 || !extent.is_finite() {
        return RayLayout::MIN_RAYS;
    }
    let count = (extent.max(0.0) / max_ray_separation).round() as usize;
    count.max(RayLayout::MIN_RAYS)
}
