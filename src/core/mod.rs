//! Core domain: camera setup and follow.

use bevy::prelude::*;

use crate::hero::Hero;
use crate::level::LevelBounds;

/// Half the window size; the camera center stays this far inside the level
/// bounds.
const VIEW_HALF: Vec2 = Vec2::new(640.0, 360.0);

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, follow_hero);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn follow_hero(
    bounds: Res<LevelBounds>,
    hero_query: Query<&Transform, (With<Hero>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(hero_transform) = hero_query.single() else {
        return;
    };

    for mut camera_transform in &mut camera_query {
        camera_transform.translation.x = clamp_axis(
            hero_transform.translation.x,
            bounds.min.x + VIEW_HALF.x,
            bounds.max.x - VIEW_HALF.x,
        );
        camera_transform.translation.y = clamp_axis(
            hero_transform.translation.y,
            bounds.min.y + VIEW_HALF.y,
            bounds.max.y - VIEW_HALF.y,
        );
    }
}

/// Clamp that tolerates a level smaller than the view on one axis.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        (min + max) * 0.5
    } else {
        value.clamp(min, max)
    }
}
