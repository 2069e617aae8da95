//! Collision domain: raycast kinematic resolution, physics layers and
//! one-way platform bookkeeping.

use avian2d::prelude::*;
use bevy::prelude::*;

mod caster;
mod rays;
mod resolver;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use caster::{AvianRayCaster, RayCaster, RayHit, SurfaceKind, TracedRay};
pub use rays::{RayLayout, RaycastOrigins};
pub use resolver::{ColliderSettings, KinematicCollider, surface_angle};
pub use state::{
    CollisionState, Contacts, Facing, PASS_THROUGH_DURATION, SlopeContact, SlopeHit,
};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors, walls, slopes and one-way platforms
    Ground,
    /// Actors driven by the motor
    Player,
    /// Respawn triggers; never blocks movement
    Checkpoint,
}

/// Geometry that only blocks from above and can be dropped through.
#[derive(Component, Debug, Default)]
pub struct OneWayPlatform;

/// Rays cast during the last frame, drawn with gizmos when present.
#[derive(Resource, Debug, Default)]
pub struct DebugRays(pub Vec<TracedRay>);

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, tick_pass_through);

        #[cfg(feature = "dev-tools")]
        app.init_resource::<DebugRays>()
            .add_systems(PostUpdate, draw_debug_rays);
    }
}

/// Count down drop-through windows on wall-clock time, so they expire even
/// while virtual time is paused.
fn tick_pass_through(time: Res<Time<Real>>, mut colliders: Query<&mut KinematicCollider>) {
    let dt = time.delta_secs();
    for mut collider in &mut colliders {
        if collider.state.tick_pass_through(dt) {
            debug!("Drop-through ended");
        }
    }
}

#[cfg(feature = "dev-tools")]
fn draw_debug_rays(rays: Res<DebugRays>, mut gizmos: Gizmos) {
    for ray in &rays.0 {
        let color = if ray.hit {
            Color::srgb(1.0, 0.25, 0.25)
        } else {
            Color::srgb(0.3, 0.8, 0.3)
        };
        let length = ray.length.min(1000.0);
        gizmos.line_2d(ray.origin, ray.origin + *ray.direction * length, color);
    }
}
