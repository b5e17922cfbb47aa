//! Level domain: the playfield and its lifecycle.
//!
//! A hardcoded test room (ground, platforms, walls, spikes), hero spawn and
//! respawn, and the death handling that lets the corpse leave the playfield.

mod spawn;
mod systems;

use bevy::prelude::*;

pub use spawn::{HeroSpawn, LevelBounds};

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for kill-on-touch spikes
#[derive(Component, Debug)]
pub struct Spike;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeroSpawn>()
            .init_resource::<LevelBounds>()
            .add_systems(Startup, spawn::spawn_test_level)
            // PostStartup so the tuning override is already loaded.
            .add_systems(PostStartup, spawn::spawn_hero_at_start)
            .add_systems(
                Update,
                (
                    systems::detect_spike_overlap,
                    systems::release_dead_hero,
                    systems::respawn_fallen_hero,
                ),
            );
    }
}
