//! Hero domain: the controller tick driver.
//!
//! These systems run chained, in this order: kill handling, timing/buffer
//! update, horizontal intent, jump-cut, movement scan, animation scan. The
//! animation machine must see the movement state the movement scan produced
//! this same tick.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::hero::components::{
    AnimState, ControlState, Facing, Grounded, Hero, HeroHitbox, hitbox_center_x, MoveState,
    RunAcceleration,
};
use crate::hero::events::{HeroDied, KillHero};
use crate::hero::machine::{self, PhysicsSample, TickSnapshot};
use crate::hero::resources::{HeroInput, HeroTuning};

/// Apply any pending kill request. Safe to receive at any point and any
/// number of times per frame: once dead, further requests are no-ops and the
/// death notification never repeats.
pub(crate) fn handle_kill(
    mut kill_requests: MessageReader<KillHero>,
    mut died: MessageWriter<HeroDied>,
    tuning: Res<HeroTuning>,
    mut query: Query<
        (
            Entity,
            &mut MoveState,
            &mut AnimState,
            &mut LinearVelocity,
            &mut RunAcceleration,
        ),
        With<Hero>,
    >,
) {
    if kill_requests.is_empty() {
        return;
    }
    kill_requests.clear();

    for (entity, mut move_state, mut anim_state, mut velocity, mut accel) in &mut query {
        if machine::kill_hero(&mut move_state, &mut anim_state) {
            machine::death_launch(&tuning, &mut velocity.0, &mut accel.0);
            died.write(HeroDied { entity });
            info!("Hero died");
        }
    }
}

/// Timing/input-buffer bookkeeping, first thing each tick while alive.
pub(crate) fn update_control_state(
    time: Res<Time>,
    tuning: Res<HeroTuning>,
    input: Res<HeroInput>,
    mut query: Query<(&MoveState, &Grounded, &mut ControlState), With<Hero>>,
) {
    let now = time.elapsed_secs_f64();

    for (move_state, grounded, mut control) in &mut query {
        if move_state.is_dead() {
            continue;
        }
        control.refresh(now, grounded.0, input.jump_just_pressed, tuning.jump_buffer);
    }
}

/// Steering: acceleration, facing, and the facing-dependent hitbox offset.
/// Skipped entirely while dead; deceleration to rest is drag's job.
pub(crate) fn apply_horizontal_intent(
    tuning: Res<HeroTuning>,
    input: Res<HeroInput>,
    mut query: Query<(&MoveState, &mut RunAcceleration, &mut Facing), With<Hero>>,
    mut hitbox_query: Query<&mut Transform, With<HeroHitbox>>,
) {
    for (move_state, mut accel, mut facing) in &mut query {
        if move_state.is_dead() {
            continue;
        }

        let intent = machine::horizontal_intent(&tuning, input.left, input.right);
        accel.0 = intent.accel;
        if let Some(new_facing) = intent.facing {
            *facing = new_facing;
        }
        if let Some(offset) = intent.hitbox_offset {
            for mut hitbox_transform in &mut hitbox_query {
                hitbox_transform.translation.x = hitbox_center_x(offset);
            }
        }
    }
}

/// Continuous clamp for variable jump height, ahead of the transition scan.
pub(crate) fn apply_jump_cut(
    tuning: Res<HeroTuning>,
    input: Res<HeroInput>,
    mut query: Query<(&MoveState, &mut LinearVelocity), With<Hero>>,
) {
    for (move_state, mut velocity) in &mut query {
        if let Some(clamped) = machine::jump_cut(&tuning, *move_state, input.jump_held, velocity.y)
        {
            velocity.y = clamped;
        }
    }
}

/// Movement scan: at most one rule fires, with its launch side effect and
/// buffer consumption.
pub(crate) fn run_move_machine(
    time: Res<Time>,
    tuning: Res<HeroTuning>,
    mut query: Query<
        (
            &Grounded,
            &Facing,
            &mut MoveState,
            &mut ControlState,
            &mut LinearVelocity,
        ),
        With<Hero>,
    >,
) {
    let now = time.elapsed_secs_f64();

    for (grounded, facing, mut move_state, mut control, mut velocity) in &mut query {
        let snap = TickSnapshot {
            now,
            sample: PhysicsSample {
                on_floor: grounded.0,
                velocity: velocity.0,
                facing: *facing,
            },
            control: *control,
            move_state: *move_state,
        };

        if let Some(rule) = machine::next_move(&tuning, &snap) {
            debug!("move {:?} -> {:?} ({:?})", *move_state, rule.to, rule.action);
            machine::apply_move_rule(&tuning, rule, &mut move_state, &mut control, &mut velocity.0);
        }
    }
}

/// Animation scan, strictly after the movement scan: its guards read the
/// movement state updated this same tick.
pub(crate) fn run_anim_machine(
    time: Res<Time>,
    mut query: Query<
        (
            &Grounded,
            &Facing,
            &MoveState,
            &ControlState,
            &LinearVelocity,
            &mut AnimState,
        ),
        With<Hero>,
    >,
) {
    let now = time.elapsed_secs_f64();

    for (grounded, facing, move_state, control, velocity, mut anim_state) in &mut query {
        let snap = TickSnapshot {
            now,
            sample: PhysicsSample {
                on_floor: grounded.0,
                velocity: velocity.0,
                facing: *facing,
            },
            control: *control,
            move_state: *move_state,
        };

        if let Some(next) = machine::next_anim(&snap, *anim_state) {
            debug!("anim {:?} -> {:?}", *anim_state, next);
            *anim_state = next;
        }
    }
}
