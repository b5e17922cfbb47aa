//! Hero domain: the player-character controller.
//!
//! Raw input and a per-tick physics sample (grounded flag, velocity, facing)
//! drive two coupled state machines, one for movement physics and one for
//! animation, with input forgiveness: jump buffering, coyote time, and a
//! mid-air flip grace window. Death is absorbing and externally triggered.

mod components;
mod events;
pub mod machine;
mod resources;
mod spawn;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    AnimState, ControlState, Facing, GameLayer, Grounded, Hero, HeroHitbox, MoveState, NEVER,
    RunAcceleration,
};
pub use events::{HeroDied, KillHero};
pub use resources::{HeroInput, HeroTuning};
pub use spawn::spawn_hero;

use bevy::prelude::*;

pub struct HeroPlugin;

impl Plugin for HeroPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeroTuning>()
            .init_resource::<HeroInput>()
            .add_message::<KillHero>()
            .add_message::<HeroDied>()
            .add_systems(
                Startup,
                (resources::load_tuning, resources::apply_gravity).chain(),
            )
            .add_systems(
                Update,
                (
                    systems::detect_ground,
                    systems::read_input,
                    systems::handle_kill,
                    systems::update_control_state,
                    systems::apply_horizontal_intent,
                    systems::apply_jump_cut,
                    systems::run_move_machine,
                    systems::run_anim_machine,
                    systems::integrate_horizontal,
                )
                    .chain(),
            );
    }
}
