//! Hero domain: system modules for the per-tick controller update.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod physics;
pub(crate) mod tick;

pub(crate) use collisions::detect_ground;
pub(crate) use input::read_input;
pub(crate) use physics::integrate_horizontal;
pub(crate) use tick::{
    apply_horizontal_intent, apply_jump_cut, handle_kill, run_anim_machine, run_move_machine,
    update_control_state,
};
