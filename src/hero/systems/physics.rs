//! Hero domain: arcade-style horizontal integration.
//!
//! This is the engine side of the bargain, not the controller: it integrates
//! the acceleration command into velocity the way an arcade physics body
//! would, with drag toward rest and speed caps. Gravity stays with avian.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::hero::components::{Hero, RunAcceleration};
use crate::hero::resources::HeroTuning;

pub(crate) fn integrate_horizontal(
    time: Res<Time>,
    tuning: Res<HeroTuning>,
    mut query: Query<(&RunAcceleration, &mut LinearVelocity), With<Hero>>,
) {
    let dt = time.delta_secs();

    for (accel, mut velocity) in &mut query {
        if accel.0 != 0.0 {
            velocity.x += accel.0 * dt;
        } else {
            velocity.x = drag_toward_rest(velocity.x, tuning.ground_drag * dt);
        }

        velocity.x = velocity.x.clamp(-tuning.max_run_speed, tuning.max_run_speed);
        velocity.y = velocity.y.max(-tuning.max_fall_speed);
    }
}

/// One drag step toward rest, clamped through zero so the idle guard sees an
/// exact 0.0 instead of oscillating around it.
pub(crate) fn drag_toward_rest(velocity_x: f32, drag_step: f32) -> f32 {
    if velocity_x > 0.0 {
        (velocity_x - drag_step).max(0.0)
    } else {
        (velocity_x + drag_step).min(0.0)
    }
}
