//! Hero domain: player spawn helper.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::ClipPlayer;
use crate::hero::components::{
    AnimState, ControlState, Facing, GameLayer, Grounded, Hero, HeroHitbox, HITBOX_CENTER_Y,
    HITBOX_SIZE, hitbox_center_x, MoveState, RunAcceleration, SPRITE_SIZE,
};
use crate::hero::resources::HeroTuning;

/// Spawn a fresh hero at `position`. Used at startup and again on respawn.
pub fn spawn_hero(commands: &mut Commands, position: Vec2, tuning: &HeroTuning) -> Entity {
    commands
        .spawn((
            // Identity & controller state
            (
                Hero,
                MoveState::default(),
                AnimState::default(),
                Facing::default(),
                ControlState::default(),
                Grounded::default(),
                RunAcceleration::default(),
            ),
            // Rendering
            ClipPlayer::default(),
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(SPRITE_SIZE),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            // Physics
            (
                RigidBody::Dynamic,
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                Friction::new(0.0),
            ),
        ))
        .with_children(|children| {
            children.spawn((
                HeroHitbox,
                Collider::rectangle(HITBOX_SIZE.x, HITBOX_SIZE.y),
                CollisionEventsEnabled,
                CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Hazard]),
                Transform::from_xyz(
                    hitbox_center_x(tuning.hitbox_offset_right),
                    HITBOX_CENTER_Y,
                    0.0,
                ),
            ));
        })
        .id()
}
