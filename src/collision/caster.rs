//! Collision domain: the raycast seam between the resolver and the geometry backend.

use avian2d::prelude::*;
use bevy::prelude::*;

/// How a surface reacts to an actor crossing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    #[default]
    Solid,
    /// Blocks only from above, and can be dropped through.
    OneWay,
}

/// Nearest hit along a cast ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub normal: Vec2,
    pub surface: SurfaceKind,
}

/// Anything that can answer "what is the first thing along this ray".
///
/// The collision mask is bound when the caster is built, so the resolver
/// never deals with layers.
pub trait RayCaster {
    fn cast(&mut self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit>;
}

/// One ray as it was cast, kept for gizmo drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracedRay {
    pub origin: Vec2,
    pub direction: Dir2,
    pub length: f32,
    pub hit: bool,
}

/// Production caster backed by avian's spatial query pipeline.
pub struct AvianRayCaster<'a, 'w, 's, F>
where
    F: Fn(Entity) -> bool,
{
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
    is_one_way: F,
    trace: Option<&'a mut Vec<TracedRay>>,
}

impl<'a, 'w, 's, F> AvianRayCaster<'a, 'w, 's, F>
where
    F: Fn(Entity) -> bool,
{
    /// Cast against `mask`, ignoring the actor's own collider.
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        mask: LayerMask,
        actor: Entity,
        is_one_way: F,
    ) -> Self {
        Self {
            spatial_query,
            filter: SpatialQueryFilter::from_mask(mask).with_excluded_entities([actor]),
            is_one_way,
            trace: None,
        }
    }

    /// Record every cast into `trace`.
    pub fn with_trace(mut self, trace: &'a mut Vec<TracedRay>) -> Self {
        self.trace = Some(trace);
        self
    }
}

impl<F> RayCaster for AvianRayCaster<'_, '_, '_, F>
where
    F: Fn(Entity) -> bool,
{
    fn cast(&mut self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit> {
        let hit = self
            .spatial_query
            .cast_ray(origin, direction, max_distance, true, &self.filter)
            .map(|data| RayHit {
                distance: data.distance,
                normal: data.normal,
                surface: if (self.is_one_way)(data.entity) {
                    SurfaceKind::OneWay
                } else {
                    SurfaceKind::Solid
                },
            });

        if let Some(trace) = self.trace.as_deref_mut() {
            trace.push(TracedRay {
                origin,
                direction,
                length: hit.map_or(max_distance, |h| h.distance),
                hit: hit.is_some(),
            });
        }

        hit
    }
}
