//! Hero domain: unit tests for the controller state machines and timing.

use bevy::prelude::Vec2;

use super::components::{AnimState, ControlState, Facing, MoveState, NEVER};
use super::machine::{
    self, MoveAction, PhysicsSample, TickSnapshot, death_launch, horizontal_intent, jump_cut,
    kill_hero, next_anim, next_move,
};
use super::resources::{HeroTuning, parse_tuning};
use super::systems::physics::drag_toward_rest;

fn tuning() -> HeroTuning {
    HeroTuning::default()
}

fn snap(move_state: MoveState) -> TickSnapshot {
    TickSnapshot {
        now: 10.0,
        sample: PhysicsSample {
            on_floor: false,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
        },
        control: ControlState::default(),
        move_state,
    }
}

/// A control state holding a live buffered press at `now`.
fn buffered_control(now: f64, last_grounded_at: f64) -> ControlState {
    ControlState {
        last_grounded_at,
        jump_buffered_until: now + 0.1,
        jump_pressed: true,
    }
}

// -----------------------------------------------------------------------------
// ControlState timing
// -----------------------------------------------------------------------------

#[test]
fn test_fresh_control_state_satisfies_no_guard() {
    let t = tuning();
    for state in [
        MoveState::Standing,
        MoveState::Jumping,
        MoveState::Flipping,
        MoveState::Falling,
    ] {
        let s = snap(state);
        assert!(
            next_move(&t, &s).is_none(),
            "fresh controls fired a transition from {:?}",
            state
        );
    }
}

#[test]
fn test_refresh_notes_floor_contact() {
    let mut control = ControlState::default();
    control.refresh(1.0, true, false, 0.2);
    assert_eq!(control.last_grounded_at, 1.0);

    // Airborne ticks leave the grounded timestamp alone.
    control.refresh(2.0, false, false, 0.2);
    assert_eq!(control.last_grounded_at, 1.0);

    control.refresh(3.0, true, false, 0.2);
    assert_eq!(control.last_grounded_at, 3.0);
}

#[test]
fn test_jump_buffer_arms_and_expires() {
    let mut control = ControlState::default();
    control.refresh(1.0, false, true, 0.2);
    assert!(control.jump_pressed);

    control.refresh(1.15, false, false, 0.2);
    assert!(control.jump_pressed, "press should stay buffered for 200ms");

    control.refresh(1.25, false, false, 0.2);
    assert!(!control.jump_pressed, "buffer should expire after 200ms");
}

#[test]
fn test_consume_buffer_resets_to_never() {
    let mut control = ControlState::default();
    control.refresh(1.0, false, true, 0.2);
    control.consume_buffer();
    assert_eq!(control.jump_buffered_until, NEVER);
    assert!(!control.jump_pressed);
}

// -----------------------------------------------------------------------------
// Movement machine
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_fires_on_floor() {
    let t = tuning();
    let mut s = snap(MoveState::Standing);
    s.sample.on_floor = true;
    s.control = buffered_control(s.now, s.now);

    let rule = next_move(&t, &s).expect("jump should fire");
    assert_eq!(rule.action, MoveAction::Jump);
    assert_eq!(rule.to, MoveState::Jumping);
}

#[test]
fn test_coyote_time_boundary() {
    let t = tuning();

    // Walked off a ledge at t=0, still Standing, not yet falling.
    let mut s = snap(MoveState::Standing);
    s.now = 0.120;
    s.control = buffered_control(s.now, 0.0);
    let rule = next_move(&t, &s).expect("jump within coyote time");
    assert_eq!(rule.action, MoveAction::Jump);

    s.now = 0.121;
    s.control = buffered_control(s.now, 0.0);
    assert!(next_move(&t, &s).is_none(), "coyote window is 120ms, not more");
}

#[test]
fn test_flip_grace_boundary() {
    let t = tuning();

    // Descending, so only the grace window can admit the flip.
    let mut s = snap(MoveState::Falling);
    s.sample.velocity.y = -100.0;
    s.now = 0.650;
    s.control = buffered_control(s.now, 0.0);
    let rule = next_move(&t, &s).expect("flip within the grace window");
    assert_eq!(rule.action, MoveAction::Flip);
    assert_eq!(rule.to, MoveState::Flipping);

    s.now = 0.651;
    s.control = buffered_control(s.now, 0.0);
    assert!(next_move(&t, &s).is_none(), "grace window is 650ms, not more");
}

#[test]
fn test_flip_fires_while_rising_past_grace() {
    let t = tuning();
    let mut s = snap(MoveState::Jumping);
    s.sample.velocity.y = 50.0;
    s.control = buffered_control(s.now, NEVER);

    let rule = next_move(&t, &s).expect("rising flip needs no grace window");
    assert_eq!(rule.action, MoveAction::Flip);
}

#[test]
fn test_jump_consumes_buffer() {
    let t = tuning();
    let mut s = snap(MoveState::Standing);
    s.sample.on_floor = true;
    s.control = buffered_control(s.now, s.now);

    let rule = next_move(&t, &s).expect("jump should fire");
    let mut move_state = s.move_state;
    let mut control = s.control;
    let mut velocity = s.sample.velocity;
    machine::apply_move_rule(&t, rule, &mut move_state, &mut control, &mut velocity);

    assert_eq!(move_state, MoveState::Jumping);
    assert_eq!(velocity.y, 400.0);
    assert_eq!(control.jump_buffered_until, NEVER);

    // Next tick, still inside the original 200ms window: nothing refires.
    let mut second = snap(move_state);
    second.now = s.now + 0.05;
    second.sample.velocity = velocity;
    control.refresh(second.now, false, false, t.jump_buffer);
    second.control = control;
    assert!(next_move(&t, &second).is_none(), "a press only fires once");
}

#[test]
fn test_priority_jump_over_touchdown() {
    let t = tuning();

    // Landing with a live buffer: jump and touchdown are both admissible
    // from Falling, and jump wins by table order.
    let mut s = snap(MoveState::Falling);
    s.sample.on_floor = true;
    s.control = buffered_control(s.now, s.now);

    let rule = next_move(&t, &s).expect("a transition should fire");
    assert_eq!(rule.action, MoveAction::Jump);
}

#[test]
fn test_fall_and_touchdown() {
    let t = tuning();

    let mut s = snap(MoveState::Standing);
    s.sample.velocity.y = -10.0;
    let rule = next_move(&t, &s).expect("descending off a ledge falls");
    assert_eq!(rule.action, MoveAction::Fall);

    let mut s = snap(MoveState::Falling);
    s.sample.on_floor = true;
    let rule = next_move(&t, &s).expect("landing touches down");
    assert_eq!(rule.action, MoveAction::Touchdown);
    assert_eq!(rule.to, MoveState::Standing);
}

#[test]
fn test_rising_does_not_fall() {
    let t = tuning();
    let mut s = snap(MoveState::Jumping);
    s.sample.velocity.y = 200.0;
    assert!(next_move(&t, &s).is_none());
}

// -----------------------------------------------------------------------------
// Jump-cut
// -----------------------------------------------------------------------------

#[test]
fn test_jump_cut_clamps_to_exact_speed() {
    let t = tuning();
    assert_eq!(jump_cut(&t, MoveState::Jumping, false, 300.0), Some(150.0));
    assert_eq!(jump_cut(&t, MoveState::Flipping, false, 200.0), Some(150.0));
}

#[test]
fn test_jump_cut_leaves_slow_or_held_ascent() {
    let t = tuning();
    assert_eq!(jump_cut(&t, MoveState::Jumping, true, 300.0), None);
    assert_eq!(jump_cut(&t, MoveState::Jumping, false, 100.0), None);
    assert_eq!(jump_cut(&t, MoveState::Falling, false, 300.0), None);
    assert_eq!(jump_cut(&t, MoveState::Dead, false, 300.0), None);
}

// -----------------------------------------------------------------------------
// Death
// -----------------------------------------------------------------------------

#[test]
fn test_kill_is_idempotent() {
    let mut move_state = MoveState::Jumping;
    let mut anim_state = AnimState::Jumping;

    assert!(kill_hero(&mut move_state, &mut anim_state));
    assert_eq!(move_state, MoveState::Dead);
    assert_eq!(anim_state, AnimState::Dead);

    assert!(!kill_hero(&mut move_state, &mut anim_state));
    assert_eq!(move_state, MoveState::Dead);
    assert_eq!(anim_state, AnimState::Dead);
}

#[test]
fn test_death_launch_overrides_prior_motion() {
    let t = tuning();
    let mut velocity = Vec2::new(123.0, -77.0);
    let mut accel = -1000.0;
    death_launch(&t, &mut velocity, &mut accel);
    assert_eq!(velocity, Vec2::new(0.0, 500.0));
    assert_eq!(accel, 0.0);
}

#[test]
fn test_dead_is_absorbing() {
    let t = tuning();
    let mut s = snap(MoveState::Dead);
    s.sample.on_floor = true;
    s.control = buffered_control(s.now, s.now);
    assert!(next_move(&t, &s).is_none());
    assert!(next_anim(&s, AnimState::Dead).is_none());
}

// -----------------------------------------------------------------------------
// Animation machine
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_scenario() {
    let t = tuning();

    // Standing on the floor with a jump press this tick.
    let mut control = ControlState::default();
    control.refresh(0.0, true, true, t.jump_buffer);
    assert_eq!(control.last_grounded_at, 0.0);
    assert_eq!(control.jump_buffered_until, 0.2);
    assert!(control.jump_pressed);

    let mut s = snap(MoveState::Standing);
    s.now = 0.0;
    s.sample.on_floor = true;
    s.control = control;

    let rule = next_move(&t, &s).expect("jump should fire");
    let mut move_state = s.move_state;
    let mut velocity = s.sample.velocity;
    machine::apply_move_rule(&t, rule, &mut move_state, &mut control, &mut velocity);
    assert_eq!(velocity.y, 400.0);

    // The animation scan sees the movement state updated this same tick.
    s.move_state = move_state;
    s.sample.velocity = velocity;
    s.control = control;
    assert_eq!(next_anim(&s, AnimState::Idle), Some(AnimState::Jumping));
}

#[test]
fn test_idle_run_pivot_guards() {
    let mut s = snap(MoveState::Standing);
    s.sample.on_floor = true;

    s.sample.velocity.x = 0.0;
    assert_eq!(next_anim(&s, AnimState::Running), Some(AnimState::Idle));

    s.sample.velocity.x = 100.0;
    s.sample.facing = Facing::Right;
    assert_eq!(next_anim(&s, AnimState::Idle), Some(AnimState::Running));

    // Still sliding right while now facing left: braking into a turn.
    s.sample.facing = Facing::Left;
    assert_eq!(next_anim(&s, AnimState::Running), Some(AnimState::Pivoting));
}

#[test]
fn test_anim_flip_requires_move_flipping() {
    let mut s = snap(MoveState::Jumping);
    s.sample.velocity.y = 100.0;
    assert_eq!(
        next_anim(&s, AnimState::Falling),
        None,
        "rising without a flip is not the flip animation"
    );

    s.move_state = MoveState::Flipping;
    assert_eq!(next_anim(&s, AnimState::Falling), Some(AnimState::Flipping));
}

#[test]
fn test_anim_fall_from_airborne_states() {
    let mut s = snap(MoveState::Falling);
    s.sample.velocity.y = -50.0;
    for from in [AnimState::Jumping, AnimState::Flipping] {
        assert_eq!(next_anim(&s, from), Some(AnimState::Falling));
    }
}

#[test]
fn test_anim_holds_without_a_match() {
    // Grounded Jumping animation with zero vertical speed: no rule admits
    // it, so the state holds this tick.
    let mut s = snap(MoveState::Standing);
    s.sample.on_floor = true;
    assert_eq!(next_anim(&s, AnimState::Jumping), None);
}

// -----------------------------------------------------------------------------
// Horizontal intent & integration
// -----------------------------------------------------------------------------

#[test]
fn test_horizontal_intent() {
    let t = tuning();

    let left = horizontal_intent(&t, true, false);
    assert_eq!(left.accel, -1000.0);
    assert_eq!(left.facing, Some(Facing::Left));
    assert_eq!(left.hitbox_offset, Some(8.0));

    let right = horizontal_intent(&t, false, true);
    assert_eq!(right.accel, 1000.0);
    assert_eq!(right.facing, Some(Facing::Right));
    assert_eq!(right.hitbox_offset, Some(12.0));

    let idle = horizontal_intent(&t, false, false);
    assert_eq!(idle.accel, 0.0);
    assert_eq!(idle.facing, None);
    assert_eq!(idle.hitbox_offset, None);

    // Left wins when both are held.
    assert_eq!(horizontal_intent(&t, true, true), left);
}

#[test]
fn test_drag_reaches_exact_zero() {
    assert_eq!(drag_toward_rest(10.0, 12.5), 0.0);
    assert_eq!(drag_toward_rest(-5.0, 12.5), 0.0);
    assert_eq!(drag_toward_rest(100.0, 12.5), 87.5);
    assert_eq!(drag_toward_rest(-100.0, 12.5), -87.5);
}

// -----------------------------------------------------------------------------
// Tuning config
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_tuning_parses() {
    let tuning =
        parse_tuning(include_str!("../../assets/data/hero.ron"), "hero.ron").expect("valid RON");
    assert_eq!(tuning.jump_speed, 400.0);
    assert_eq!(tuning.coyote_time, 0.120);
    assert_eq!(tuning.flip_grace, 0.650);
}

#[test]
fn test_malformed_tuning_reports_file() {
    let err = parse_tuning("not ron at all", "hero.ron").unwrap_err();
    assert!(err.to_string().contains("hero.ron"));
}
