//! Hero domain: the movement and animation state machines.
//!
//! Both machines are static rule tables scanned top-to-bottom once per tick:
//! the first rule whose from-states contain the current state and whose guard
//! holds fires, so at most one transition happens per machine per tick.
//! Guards are pure functions over an explicit [`TickSnapshot`]; the
//! animation guards read the movement state the movement scan has already
//! updated this tick.
//!
//! `die` appears in neither table. It only fires through [`kill_hero`], so a
//! kill arriving mid-frame can never be double-processed by the scan.

use bevy::prelude::*;

use crate::hero::components::{AnimState, ControlState, Facing, MoveState};
use crate::hero::resources::HeroTuning;

/// Read-only physics sample for one tick.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsSample {
    pub on_floor: bool,
    pub velocity: Vec2,
    pub facing: Facing,
}

/// Everything a guard is allowed to see.
#[derive(Debug, Clone, Copy)]
pub struct TickSnapshot {
    pub now: f64,
    pub sample: PhysicsSample,
    pub control: ControlState,
    pub move_state: MoveState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAction {
    Jump,
    Flip,
    Fall,
    Touchdown,
}

pub struct MoveRule {
    pub action: MoveAction,
    pub from: &'static [MoveState],
    pub to: MoveState,
    pub guard: fn(&HeroTuning, &TickSnapshot) -> bool,
}

/// Movement transition table, in priority order.
pub const MOVE_RULES: &[MoveRule] = &[
    MoveRule {
        action: MoveAction::Jump,
        from: &[MoveState::Standing, MoveState::Falling],
        to: MoveState::Jumping,
        guard: jump_guard,
    },
    MoveRule {
        action: MoveAction::Flip,
        from: &[MoveState::Jumping, MoveState::Falling],
        to: MoveState::Flipping,
        guard: flip_guard,
    },
    MoveRule {
        action: MoveAction::Fall,
        from: &[MoveState::Standing, MoveState::Jumping, MoveState::Flipping],
        to: MoveState::Falling,
        guard: fall_guard,
    },
    MoveRule {
        action: MoveAction::Touchdown,
        from: &[MoveState::Jumping, MoveState::Flipping, MoveState::Falling],
        to: MoveState::Standing,
        guard: touchdown_guard,
    },
];

/// Buffered press, on the floor or within the coyote window.
fn jump_guard(tuning: &HeroTuning, snap: &TickSnapshot) -> bool {
    if !snap.control.jump_pressed {
        return false;
    }
    let within_coyote = snap.now - snap.control.last_grounded_at <= tuning.coyote_time;
    snap.sample.on_floor || within_coyote
}

/// Mid-air flip while still rising, or shortly after takeoff (grace window).
fn flip_guard(tuning: &HeroTuning, snap: &TickSnapshot) -> bool {
    let within_grace = snap.now - snap.control.last_grounded_at <= tuning.flip_grace;
    snap.control.jump_pressed
        && !snap.sample.on_floor
        && (snap.sample.velocity.y > 0.0 || within_grace)
}

/// Airborne and descending.
fn fall_guard(_tuning: &HeroTuning, snap: &TickSnapshot) -> bool {
    !snap.sample.on_floor && snap.sample.velocity.y < 0.0
}

fn touchdown_guard(_tuning: &HeroTuning, snap: &TickSnapshot) -> bool {
    snap.sample.on_floor
}

/// Scan the movement table. `None` means the hero holds its current state
/// this tick, which is not an error.
pub fn next_move(tuning: &HeroTuning, snap: &TickSnapshot) -> Option<&'static MoveRule> {
    MOVE_RULES
        .iter()
        .find(|rule| rule.from.contains(&snap.move_state) && (rule.guard)(tuning, snap))
}

/// Apply a fired movement rule: enter the new state, launch on jump/flip,
/// and spend the buffered press so it cannot retrigger.
pub fn apply_move_rule(
    tuning: &HeroTuning,
    rule: &MoveRule,
    move_state: &mut MoveState,
    control: &mut ControlState,
    velocity: &mut Vec2,
) {
    *move_state = rule.to;
    match rule.action {
        MoveAction::Jump => {
            velocity.y = tuning.jump_speed;
            control.consume_buffer();
        }
        MoveAction::Flip => {
            velocity.y = tuning.flip_speed;
            control.consume_buffer();
        }
        MoveAction::Fall | MoveAction::Touchdown => {}
    }
}

pub struct AnimRule {
    pub from: &'static [AnimState],
    pub to: AnimState,
    pub guard: fn(&TickSnapshot) -> bool,
}

/// Animation transition table, in priority order.
pub const ANIM_RULES: &[AnimRule] = &[
    AnimRule {
        from: &[AnimState::Falling, AnimState::Running, AnimState::Pivoting],
        to: AnimState::Idle,
        guard: idle_guard,
    },
    AnimRule {
        from: &[AnimState::Falling, AnimState::Idle, AnimState::Pivoting],
        to: AnimState::Running,
        guard: run_guard,
    },
    AnimRule {
        from: &[AnimState::Falling, AnimState::Running],
        to: AnimState::Pivoting,
        guard: pivot_guard,
    },
    AnimRule {
        from: &[AnimState::Idle, AnimState::Running, AnimState::Pivoting],
        to: AnimState::Jumping,
        guard: jump_anim_guard,
    },
    AnimRule {
        from: &[AnimState::Jumping, AnimState::Falling],
        to: AnimState::Flipping,
        guard: flip_anim_guard,
    },
    AnimRule {
        from: &[
            AnimState::Idle,
            AnimState::Running,
            AnimState::Pivoting,
            AnimState::Jumping,
            AnimState::Flipping,
        ],
        to: AnimState::Falling,
        guard: fall_anim_guard,
    },
];

fn idle_guard(snap: &TickSnapshot) -> bool {
    snap.sample.on_floor && snap.sample.velocity.x == 0.0
}

/// Moving the same way the hero faces.
fn run_guard(snap: &TickSnapshot) -> bool {
    let vx = snap.sample.velocity.x;
    snap.sample.on_floor && vx != 0.0 && (vx > 0.0) == (snap.sample.facing == Facing::Right)
}

/// Decelerating into a turn: moving against the facing direction.
fn pivot_guard(snap: &TickSnapshot) -> bool {
    let vx = snap.sample.velocity.x;
    snap.sample.on_floor && vx != 0.0 && (vx > 0.0) == (snap.sample.facing == Facing::Left)
}

fn jump_anim_guard(snap: &TickSnapshot) -> bool {
    snap.sample.velocity.y > 0.0
}

/// Rising because of the flip specifically, not any ascent.
fn flip_anim_guard(snap: &TickSnapshot) -> bool {
    snap.sample.velocity.y > 0.0 && snap.move_state == MoveState::Flipping
}

fn fall_anim_guard(snap: &TickSnapshot) -> bool {
    snap.sample.velocity.y < 0.0
}

/// Scan the animation table against the already-updated movement state.
pub fn next_anim(snap: &TickSnapshot, anim_state: AnimState) -> Option<AnimState> {
    ANIM_RULES
        .iter()
        .find(|rule| rule.from.contains(&anim_state) && (rule.guard)(snap))
        .map(|rule| rule.to)
}

/// Variable jump height: while jumping or flipping with the jump key
/// released, any ascent faster than the cut speed is clamped to exactly it.
/// Returns the clamped speed, or `None` when no clamp applies.
pub fn jump_cut(
    tuning: &HeroTuning,
    move_state: MoveState,
    jump_held: bool,
    velocity_y: f32,
) -> Option<f32> {
    let airborne_from_press = matches!(move_state, MoveState::Jumping | MoveState::Flipping);
    if airborne_from_press && !jump_held && velocity_y > tuning.jump_cut_speed {
        Some(tuning.jump_cut_speed)
    } else {
        None
    }
}

/// Horizontal command derived from the held direction keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalIntent {
    pub accel: f32,
    pub facing: Option<Facing>,
    /// Hitbox x offset from the sprite's left edge; `None` leaves it alone.
    pub hitbox_offset: Option<f32>,
}

/// Left wins when both directions are held. Releasing both keys zeroes the
/// acceleration and leaves deceleration to drag.
pub fn horizontal_intent(tuning: &HeroTuning, left: bool, right: bool) -> HorizontalIntent {
    if left {
        HorizontalIntent {
            accel: -tuning.run_accel,
            facing: Some(Facing::Left),
            hitbox_offset: Some(tuning.hitbox_offset_left),
        }
    } else if right {
        HorizontalIntent {
            accel: tuning.run_accel,
            facing: Some(Facing::Right),
            hitbox_offset: Some(tuning.hitbox_offset_right),
        }
    } else {
        HorizontalIntent {
            accel: 0.0,
            facing: None,
            hitbox_offset: None,
        }
    }
}

/// Fire `die` on both machines. Idempotent: returns whether the transition
/// actually fired, `false` once already dead.
pub fn kill_hero(move_state: &mut MoveState, anim_state: &mut AnimState) -> bool {
    if move_state.is_dead() {
        return false;
    }
    *move_state = MoveState::Dead;
    *anim_state = AnimState::Dead;
    true
}

/// Death side effect: the corpse pops straight up and stops steering,
/// whatever it was doing before.
pub fn death_launch(tuning: &HeroTuning, velocity: &mut Vec2, accel: &mut f32) {
    *velocity = Vec2::new(0.0, tuning.death_launch_speed);
    *accel = 0.0;
}
