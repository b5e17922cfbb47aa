//! Level domain: hardcoded test room and hero placement.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::hero::{GameLayer, HeroTuning, spawn_hero};
use crate::level::{Ground, Spike, Wall};

/// World-space extent of the playfield; the camera clamps to this.
#[derive(Resource, Debug, Clone, Copy)]
pub struct LevelBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self {
            min: Vec2::new(-800.0, -260.0),
            max: Vec2::new(800.0, 460.0),
        }
    }
}

/// Where the hero enters the level (and re-enters after dying).
#[derive(Resource, Debug, Clone, Copy)]
pub struct HeroSpawn(pub Vec2);

impl Default for HeroSpawn {
    fn default() -> Self {
        Self(Vec2::new(-600.0, -100.0))
    }
}

const SPIKE_SIZE: Vec2 = Vec2::new(22.0, 22.0);

pub(crate) fn spawn_test_level(mut commands: Commands) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let spike_color = Color::srgb(0.7, 0.25, 0.25);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let hazard_layers = CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]);

    // Ground slabs, with a gap to fall through mid-level
    for (x, width) in [(-500.0, 600.0), (350.0, 900.0)] {
        commands.spawn((
            Ground,
            Sprite {
                color: ground_color,
                custom_size: Some(Vec2::new(width, 40.0)),
                ..default()
            },
            Transform::from_xyz(x, -220.0, 0.0),
            RigidBody::Static,
            Collider::rectangle(width, 40.0),
            ground_layers,
        ));
    }

    // Side walls
    for x in [-780.0, 780.0] {
        commands.spawn((
            Wall,
            Sprite {
                color: wall_color,
                custom_size: Some(Vec2::new(40.0, 720.0)),
                ..default()
            },
            Transform::from_xyz(x, 100.0, 0.0),
            RigidBody::Static,
            Collider::rectangle(40.0, 720.0),
            ground_layers,
        ));
    }

    // Platforms stepping up toward the right
    for (x, y, width) in [(-250.0, -100.0, 150.0), (0.0, -20.0, 150.0), (250.0, 60.0, 120.0)] {
        commands.spawn((
            Ground,
            Sprite {
                color: platform_color,
                custom_size: Some(Vec2::new(width, 20.0)),
                ..default()
            },
            Transform::from_xyz(x, y, 0.0),
            RigidBody::Static,
            Collider::rectangle(width, 20.0),
            ground_layers,
        ));
    }

    // A row of spikes on the right slab. Sensors: they kill on overlap
    // instead of blocking.
    for i in 0..4 {
        let x = 420.0 + i as f32 * (SPIKE_SIZE.x + 4.0);
        commands.spawn((
            Spike,
            Sprite {
                color: spike_color,
                custom_size: Some(SPIKE_SIZE),
                ..default()
            },
            Transform::from_xyz(x, -189.0, 0.0),
            RigidBody::Static,
            Collider::rectangle(SPIKE_SIZE.x, SPIKE_SIZE.y),
            Sensor,
            CollisionEventsEnabled,
            hazard_layers,
        ));
    }

    info!("Test level spawned");
}

pub(crate) fn spawn_hero_at_start(
    mut commands: Commands,
    spawn: Res<HeroSpawn>,
    tuning: Res<HeroTuning>,
) {
    spawn_hero(&mut commands, spawn.0, &tuning);
}
