//! Debug overlay for the controller (dev-tools feature).
//!
//! F1 toggles a corner readout of the live controller state: both machine
//! states, the physics sample, and the remaining forgiveness windows.

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;

use crate::hero::{AnimState, ControlState, Grounded, Hero, HeroTuning, MoveState};

/// Marker for the overlay text
#[derive(Component, Debug)]
pub struct DebugOverlay;

#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub overlay_visible: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (toggle_overlay, update_overlay).chain());
    }
}

fn toggle_overlay(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing_overlay: Query<Entity, With<DebugOverlay>>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }

    debug_state.overlay_visible = !debug_state.overlay_visible;

    if debug_state.overlay_visible {
        commands.spawn((
            DebugOverlay,
            Text::new("..."),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(Color::srgb(0.8, 0.9, 0.8)),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                bottom: Val::Px(20.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            ZIndex(500),
        ));
    } else {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
    }
}

fn update_overlay(
    time: Res<Time>,
    tuning: Res<HeroTuning>,
    hero_query: Query<
        (&MoveState, &AnimState, &Grounded, &ControlState, &LinearVelocity),
        With<Hero>,
    >,
    mut overlay_query: Query<&mut Text, With<DebugOverlay>>,
) {
    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };
    let Ok((move_state, anim_state, grounded, control, velocity)) = hero_query.single() else {
        return;
    };

    let now = time.elapsed_secs_f64();
    let buffer_left = (control.jump_buffered_until - now).max(0.0);
    let coyote_left = (tuning.coyote_time - (now - control.last_grounded_at)).max(0.0);

    **text = format!(
        "move: {:?}\nanim: {:?}\ngrounded: {}\nvel: ({:.0}, {:.0})\nbuffer: {:.0}ms\ncoyote: {:.0}ms",
        move_state,
        anim_state,
        grounded.0,
        velocity.x,
        velocity.y,
        buffer_left * 1000.0,
        coyote_left * 1000.0,
    );
}
