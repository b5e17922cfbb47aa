//! Hero domain: keyboard sampling.

use bevy::prelude::*;

use crate::hero::resources::HeroInput;

/// Arrow keys steer; ArrowUp is the primary jump, Space the alternate.
pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<HeroInput>) {
    input.left = keyboard.pressed(KeyCode::ArrowLeft);
    input.right = keyboard.pressed(KeyCode::ArrowRight);
    input.jump_just_pressed =
        keyboard.just_pressed(KeyCode::ArrowUp) || keyboard.just_pressed(KeyCode::Space);
    input.jump_held = keyboard.pressed(KeyCode::ArrowUp) || keyboard.pressed(KeyCode::Space);
}
