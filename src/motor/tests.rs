//! Motor domain: tests for velocity smoothing, jumps and wall sliding.

use bevy::prelude::*;

use super::{
    ActorMotor, CurveKey, DashOverride, JumpKind, JumpPhysics, JumpSources, MotionParameters,
    TickContext, WallSlideCurve, smooth_damp,
};
use crate::collision::test_support::SegmentWorld;
use crate::collision::{CollisionState, Facing, KinematicCollider, SlopeContact, SlopeHit};

const DT: f32 = 1.0 / 120.0;

/// An actor on a segment world, stepped exactly like `step_actors` does.
struct Rig {
    params: MotionParameters,
    motor: ActorMotor,
    collider: KinematicCollider,
    world: SegmentWorld,
    position: Vec2,
    half_extents: Vec2,
}

impl Rig {
    fn new(params: MotionParameters, world: SegmentWorld, position: Vec2) -> Self {
        Self {
            motor: ActorMotor::new(&params),
            params,
            collider: KinematicCollider::default(),
            world,
            position,
            half_extents: Vec2::splat(0.5),
        }
    }

    /// Resting on a floor at y = 0.
    fn on_floor(params: MotionParameters) -> Self {
        let mut rig = Self::new(params, SegmentWorld::new().floor(0.0), Vec2::new(0.0, 0.5));
        rig.step();
        assert!(rig.grounded());
        rig
    }

    fn step(&mut self) {
        let ctx = TickContext {
            position: self.position,
            half_extents: self.half_extents,
            dt: DT,
            standing_on_moving_platform: false,
        };
        let delta = self
            .motor
            .tick(&self.params, &mut self.collider, &mut self.world, ctx);
        self.position += delta;
    }

    fn steps(&mut self, count: usize) {
        for _ in 0..count {
            self.step();
        }
    }

    fn press(&mut self) -> Option<JumpKind> {
        self.motor
            .on_jump_pressed(&self.params, &self.collider.state, true)
    }

    fn grounded(&self) -> bool {
        self.collider.state.contacts.below
    }
}

fn variable_jump_params() -> MotionParameters {
    MotionParameters {
        max_jump_height: 2.0,
        min_jump_height: 0.5,
        time_to_jump_apex: 0.25,
        ..default()
    }
}

// -----------------------------------------------------------------------------
// Parameter tests
// -----------------------------------------------------------------------------

#[test]
fn test_jump_physics_from_defaults() {
    let physics = JumpPhysics::from_parameters(&MotionParameters::default());
    assert!((physics.gravity - -64.0).abs() < 1e-4);
    assert!((physics.max_jump_velocity - 16.0).abs() < 1e-4);
    assert!((physics.min_jump_velocity - 16.0).abs() < 1e-4);
}

#[test]
fn test_jump_physics_min_height() {
    let physics = JumpPhysics::from_parameters(&variable_jump_params());
    assert!((physics.min_jump_velocity - 8.0).abs() < 1e-4);
}

#[test]
fn test_jump_sources_mask() {
    let sources = JumpSources::GROUND | JumpSources::WALL;
    assert!(sources.contains(JumpSources::GROUND));
    assert!(sources.contains(JumpSources::WALL));
    assert!(!sources.contains(JumpSources::AIR));
    assert!(!sources.contains(JumpSources::NONE));
    assert!(JumpSources::NONE.is_empty());
    assert!(JumpSources(8).is_empty());
}

#[test]
fn test_wall_slide_curve() {
    assert_eq!(WallSlideCurve::new(Vec::new()).evaluate(1.0), 0.0);

    // Keys given out of order are sorted.
    let curve = WallSlideCurve::new(vec![
        CurveKey {
            time: 1.0,
            value: 0.5,
        },
        CurveKey {
            time: 0.0,
            value: 0.1,
        },
    ]);
    assert_eq!(curve.evaluate(-1.0), 0.1);
    assert_eq!(curve.evaluate(3.0), 0.5);
    assert!((curve.evaluate(0.5) - 0.3).abs() < 1e-5);
}

// -----------------------------------------------------------------------------
// smooth_damp tests
// -----------------------------------------------------------------------------

#[test]
fn test_smooth_damp_approaches_without_overshoot() {
    let mut velocity = 0.0;
    let mut value = 0.0;
    for _ in 0..240 {
        let next = smooth_damp(value, 8.0, &mut velocity, 0.1, DT);
        assert!(next >= value);
        assert!(next <= 8.0);
        value = next;
    }
    assert!((value - 8.0).abs() < 0.01);
}

#[test]
fn test_smooth_damp_non_positive_time_snaps() {
    let mut velocity = 0.0;
    let value = smooth_damp(3.0, -2.0, &mut velocity, -0.5, DT);
    assert!((value - -2.0).abs() < 1e-3);
}

#[test]
fn test_smooth_damp_zero_dt_is_noop() {
    let mut velocity = 1.0;
    assert_eq!(smooth_damp(3.0, 10.0, &mut velocity, 0.1, 0.0), 3.0);
    assert_eq!(velocity, 1.0);
}

// -----------------------------------------------------------------------------
// Ground motion tests
// -----------------------------------------------------------------------------

#[test]
fn test_vertical_velocity_zero_on_first_ground_contact() {
    let mut rig = Rig::new(
        MotionParameters::default(),
        SegmentWorld::new().floor(0.0),
        Vec2::new(0.0, 1.5),
    );

    let mut landed = false;
    for _ in 0..240 {
        rig.step();
        if rig.grounded() {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert_eq!(rig.motor.velocity.y, 0.0);

    let rest = rig.position.y;
    for _ in 0..30 {
        rig.step();
        assert!(rig.grounded());
        assert_eq!(rig.motor.velocity.y, 0.0);
    }
    assert!((rig.position.y - rest).abs() < 1e-4);
    assert!((rig.position.y - 0.5).abs() < 0.02);
}

#[test]
fn test_running_reaches_ground_speed_and_faces_input() {
    let mut rig = Rig::on_floor(MotionParameters::default());
    rig.motor.set_directional_input(Vec2::new(-1.0, 0.0));
    rig.steps(120);

    assert!((rig.motor.velocity.x - -8.0).abs() < 0.05);
    assert_eq!(rig.motor.facing(), Facing::Left);
    assert_eq!(rig.collider.state.face_dir, Facing::Left);
    assert!(rig.grounded());
}

// -----------------------------------------------------------------------------
// Jump tests
// -----------------------------------------------------------------------------

/// Height gained by a ground jump, releasing after `release_after` ticks.
fn jump_apex(release_after: Option<usize>) -> f32 {
    let mut rig = Rig::on_floor(variable_jump_params());
    let start = rig.position.y;
    assert_eq!(rig.press(), Some(JumpKind::Ground));

    let mut apex = start;
    for tick in 0..240 {
        if release_after == Some(tick) {
            rig.motor.on_jump_released();
        }
        rig.step();
        apex = apex.max(rig.position.y);
    }
    apex - start
}

#[test]
fn test_release_before_apex_lowers_jump_but_not_below_minimum() {
    let params = variable_jump_params();
    let held = jump_apex(None);
    let late = jump_apex(Some(3));
    let early = jump_apex(Some(0));

    assert!(held > late, "held {held} late {late}");
    assert!(late > early, "late {late} early {early}");
    assert!(held <= params.max_jump_height + 0.05);
    // Discrete integration loses a little height.
    assert!(early >= params.min_jump_height - 0.1, "early {early}");
}

#[test]
fn test_release_cutoff_rules() {
    let mut motor = ActorMotor::new(&variable_jump_params());

    motor.velocity.y = 16.0;
    motor.on_jump_released();
    assert!((motor.velocity.y - 8.0).abs() < 1e-4);

    // More than the minimum already spent: stop rising.
    motor.velocity.y = 5.0;
    motor.on_jump_released();
    assert_eq!(motor.velocity.y, 0.0);

    motor.velocity.y = -1.0;
    motor.on_jump_released();
    assert_eq!(motor.velocity.y, -1.0);
}

#[test]
fn test_air_jump_quota() {
    let params = MotionParameters {
        jump_sources: JumpSources::GROUND | JumpSources::AIR,
        max_air_jumps: 2,
        ..default()
    };
    let mut rig = Rig::on_floor(params);
    let ticks_between = (0.3 / DT) as usize;

    assert_eq!(rig.press(), Some(JumpKind::Ground));
    rig.steps(ticks_between);
    assert!(!rig.grounded());
    assert_eq!(rig.press(), Some(JumpKind::Air));
    rig.steps(ticks_between);
    assert_eq!(rig.press(), Some(JumpKind::Air));
    assert_eq!(rig.motor.air_jumps(), 2);
    rig.steps(ticks_between);
    assert!(!rig.grounded());
    assert_eq!(rig.press(), None);

    // Landing resets the counter.
    for _ in 0..1200 {
        rig.step();
        if rig.grounded() {
            break;
        }
    }
    assert!(rig.grounded());
    assert_eq!(rig.motor.air_jumps(), 0);

    assert_eq!(rig.press(), Some(JumpKind::Ground));
    rig.steps(ticks_between);
    assert_eq!(rig.press(), Some(JumpKind::Air));
}

#[test]
fn test_air_jump_waits_for_cooldown() {
    let params = MotionParameters {
        jump_sources: JumpSources::GROUND | JumpSources::AIR,
        max_air_jumps: 0,
        ..default()
    };
    let mut rig = Rig::on_floor(params);

    assert_eq!(rig.press(), Some(JumpKind::Ground));
    rig.steps(6);
    assert_eq!(rig.press(), None);
}

#[test]
fn test_empty_jump_sources_never_jump() {
    let params = MotionParameters {
        jump_sources: JumpSources::NONE,
        ..default()
    };
    let mut rig = Rig::on_floor(params);
    assert!(!rig.motor.can_jump(&rig.params, &rig.collider.state));
    assert_eq!(rig.press(), None);
}

/// Press jump 0.1 above the floor, optionally release, and fall onto it.
fn buffered_landing(release_before_landing: bool) -> Rig {
    let params = MotionParameters {
        jump_input_buffer: 0.15,
        ..variable_jump_params()
    };
    let mut rig = Rig::new(params, SegmentWorld::new().floor(0.0), Vec2::new(0.0, 0.6));

    assert_eq!(rig.press(), None);
    assert!(rig.motor.jump_controller().input_buffer > 0.0);
    if release_before_landing {
        rig.motor.on_jump_released();
    }

    for _ in 0..30 {
        rig.step();
        if rig.grounded() {
            return rig;
        }
    }
    panic!("never landed");
}

#[test]
fn test_buffered_jump_fires_on_landing_with_full_height_when_held() {
    let rig = buffered_landing(false);
    assert!((rig.motor.velocity.y - rig.motor.physics().max_jump_velocity).abs() < 1e-4);
    assert!(rig.motor.jump_controller().input_buffer <= 0.0);
}

#[test]
fn test_buffered_jump_after_release_is_cut_to_minimum() {
    let rig = buffered_landing(true);
    assert!((rig.motor.velocity.y - rig.motor.physics().min_jump_velocity).abs() < 1e-4);
}

#[test]
fn test_buffered_jump_fires_exactly_once() {
    let mut rig = buffered_landing(false);
    let threshold = rig.motor.physics().min_jump_velocity - 0.1;

    let mut jumps = 1;
    let mut previous = rig.motor.velocity.y;
    for _ in 0..240 {
        rig.step();
        if previous <= 0.0 && rig.motor.velocity.y >= threshold {
            jumps += 1;
        }
        previous = rig.motor.velocity.y;
    }
    assert_eq!(jumps, 1);
    assert!(rig.grounded());
}

// -----------------------------------------------------------------------------
// Wall tests
// -----------------------------------------------------------------------------

fn wall_state(right: bool) -> CollisionState {
    let mut state = CollisionState::default();
    state.contacts.right = right;
    state.contacts.left = !right;
    state
}

/// Motor sliding on a wall with the given horizontal input.
fn sliding_motor(params: &MotionParameters, state: &CollisionState, input_x: f32) -> ActorMotor {
    let mut motor = ActorMotor::new(params);
    motor.velocity = Vec2::new(0.0, -1.0);
    motor.set_directional_input(Vec2::new(input_x, 0.0));
    motor.handle_wall_sliding(params, state, DT);
    assert!(motor.is_wall_sliding());
    motor
}

#[test]
fn test_wall_jump_variants_follow_input() {
    let params = MotionParameters::default();
    let state = wall_state(true);

    let mut motor = sliding_motor(&params, &state, 1.0);
    assert_eq!(
        motor.on_jump_pressed(&params, &state, true),
        Some(JumpKind::WallClimb)
    );
    assert_eq!(
        motor.velocity,
        Vec2::new(-params.wall_jump_climb.x, params.wall_jump_climb.y)
    );

    let mut motor = sliding_motor(&params, &state, 0.0);
    assert_eq!(
        motor.on_jump_pressed(&params, &state, true),
        Some(JumpKind::WallOff)
    );
    assert_eq!(
        motor.velocity,
        Vec2::new(-params.wall_jump_off.x, params.wall_jump_off.y)
    );

    let mut motor = sliding_motor(&params, &state, -1.0);
    assert_eq!(
        motor.on_jump_pressed(&params, &state, true),
        Some(JumpKind::WallLeap)
    );
    assert_eq!(
        motor.velocity,
        Vec2::new(-params.wall_leap.x, params.wall_leap.y)
    );
}

#[test]
fn test_wall_jump_from_left_wall_pushes_right() {
    let params = MotionParameters::default();
    let state = wall_state(false);

    let mut motor = sliding_motor(&params, &state, -1.0);
    assert_eq!(
        motor.on_jump_pressed(&params, &state, true),
        Some(JumpKind::WallClimb)
    );
    assert!(motor.velocity.x > 0.0);
}

#[test]
fn test_wall_slide_speed_follows_curve() {
    let params = MotionParameters::default();
    let state = wall_state(true);
    let mut motor = ActorMotor::new(&params);
    motor.velocity.y = -1.0;

    motor.handle_wall_sliding(&params, &state, 0.1);
    let expected = -params.wall_slide_speed.evaluate(0.1) * 64.0;
    assert!((motor.velocity.y - expected).abs() < 1e-4);

    // Rising resets time on the wall.
    motor.velocity.y = 2.0;
    motor.handle_wall_sliding(&params, &state, 0.1);
    assert_eq!(motor.jump_controller().wall.time_on_wall, 0.0);
    assert_eq!(motor.velocity.y, 2.0);
}

#[test]
fn test_wall_climb_hold_stops_sliding() {
    let params = MotionParameters::default();
    let state = wall_state(true);
    let mut motor = ActorMotor::new(&params);
    motor.set_wall_climb(true);
    motor.velocity.y = -3.0;

    motor.handle_wall_sliding(&params, &state, DT);
    assert_eq!(motor.velocity.y, 0.0);
}

#[test]
fn test_wall_stick_holds_until_timer_runs_out() {
    let params = MotionParameters::default();
    let state = wall_state(true);
    let mut motor = ActorMotor::new(&params);
    motor.set_directional_input(Vec2::new(-1.0, 0.0));

    // First contact arms the stick timer.
    motor.velocity = Vec2::new(-2.0, -1.0);
    motor.handle_wall_sliding(&params, &state, DT);
    assert_eq!(
        motor.jump_controller().wall.time_to_unstick,
        params.wall_stick_time
    );

    // Pulling away is ignored while the timer runs.
    motor.velocity.x = -2.0;
    motor.velocity.y = -1.0;
    motor.handle_wall_sliding(&params, &state, 0.1);
    assert_eq!(motor.velocity.x, 0.0);
    assert!(motor.jump_controller().wall.time_to_unstick < params.wall_stick_time);

    // Pushing back toward the wall re-arms it.
    motor.set_directional_input(Vec2::new(1.0, 0.0));
    motor.velocity.y = -1.0;
    motor.handle_wall_sliding(&params, &state, 0.1);
    assert_eq!(
        motor.jump_controller().wall.time_to_unstick,
        params.wall_stick_time
    );
}

#[test]
fn test_grounded_contact_is_not_wall_slide() {
    let params = MotionParameters::default();
    let mut state = wall_state(true);
    state.contacts.below = true;
    let mut motor = ActorMotor::new(&params);
    motor.velocity.y = -1.0;

    motor.handle_wall_sliding(&params, &state, DT);
    assert!(!motor.is_wall_sliding());
}

// -----------------------------------------------------------------------------
// Slope tests
// -----------------------------------------------------------------------------

fn steep_slide_state() -> CollisionState {
    let angle = 70.0_f32.to_radians();
    let mut state = CollisionState::default();
    state.contacts.below = true;
    state.slope = SlopeContact::SlidingDownMaxSlope(SlopeHit {
        angle: 70.0,
        normal: Vec2::new(-angle.sin(), angle.cos()),
    });
    state
}

#[test]
fn test_slope_slide_jump_only_along_slide() {
    let params = MotionParameters::default();
    let state = steep_slide_state();

    // Normal points left, so +x pushes into the slope.
    let mut motor = ActorMotor::new(&params);
    motor.set_directional_input(Vec2::new(1.0, 0.0));
    assert_eq!(
        motor.on_jump_pressed(&params, &state, true),
        Some(JumpKind::SlopeBlocked)
    );
    assert_eq!(motor.velocity, Vec2::ZERO);
    assert!(motor.jump_controller().input_buffer <= 0.0);

    let mut motor = ActorMotor::new(&params);
    motor.set_directional_input(Vec2::new(-1.0, 0.0));
    assert_eq!(
        motor.on_jump_pressed(&params, &state, true),
        Some(JumpKind::SlopeSlide)
    );
    let expected = state.slope_normal() * motor.physics().max_jump_velocity;
    assert!((motor.velocity - expected).length() < 1e-4);
}

#[test]
fn test_sliding_keeps_accelerating_instead_of_zeroing() {
    let params = MotionParameters::default();
    let state = steep_slide_state();
    let mut motor = ActorMotor::new(&params);
    motor.velocity.y = -2.0;

    motor.react_to_collisions(&state, 0.1);
    let expected = -2.0 + state.slope_normal().y * 64.0 * 0.1;
    assert!((motor.velocity.y - expected).abs() < 1e-4);
}

// -----------------------------------------------------------------------------
// Dash override tests
// -----------------------------------------------------------------------------

fn dashing_motor() -> ActorMotor {
    let mut motor = ActorMotor::new(&MotionParameters::default());
    motor.begin_dash(
        DashOverride {
            origin: Vec2::ZERO,
            direction: Vec2::X,
            target_distance: 5.0,
        },
        25.0,
    );
    motor
}

#[test]
fn test_dash_holds_velocity_until_distance() {
    let params = MotionParameters::default();
    let state = CollisionState::default();
    let mut motor = dashing_motor();

    motor.compute_velocity(&params, &state, Vec2::new(2.0, 0.0), DT);
    assert!(motor.is_dashing());
    assert_eq!(motor.velocity, Vec2::new(25.0, 0.0));

    motor.compute_velocity(&params, &state, Vec2::new(5.0, 0.0), DT);
    assert!(!motor.is_dashing());
    assert_eq!(motor.velocity.x, 0.0);
    assert!(motor.velocity.y < 0.0);
    assert!(motor.velocity.y > params.min_gravity);
}

#[test]
fn test_dash_ends_on_contact_in_dash_direction() {
    let params = MotionParameters::default();
    let mut state = CollisionState::default();
    let mut motor = dashing_motor();

    // Contact behind the dash does not stop it.
    state.contacts.left = true;
    motor.compute_velocity(&params, &state, Vec2::new(1.0, 0.0), DT);
    assert!(motor.is_dashing());

    state.contacts.right = true;
    motor.compute_velocity(&params, &state, Vec2::new(1.0, 0.0), DT);
    assert!(!motor.is_dashing());
}

#[test]
fn test_knockback_pushes_away_from_facing() {
    let mut motor = ActorMotor::new(&variable_jump_params());
    motor.apply_knockback();
    assert_eq!(motor.velocity, Vec2::new(-8.0, 8.0));

    motor.set_directional_input(Vec2::new(-1.0, 0.0));
    motor.update_facing();
    motor.apply_knockback();
    assert_eq!(motor.velocity, Vec2::new(8.0, 8.0));
}
