//! Level domain: hazards and hero lifecycle.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::hero::{Hero, HeroDied, HeroHitbox, HeroTuning, KillHero, MoveState, spawn_hero};
use crate::level::{HeroSpawn, LevelBounds, Spike};

/// Touching a spike kills. The controller decides what dying means; this
/// system only files the request.
pub(crate) fn detect_spike_overlap(
    mut collision_events: MessageReader<CollisionStart>,
    mut kill_requests: MessageWriter<KillHero>,
    hitbox_query: Query<(), With<HeroHitbox>>,
    spike_query: Query<(), With<Spike>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hero_collider, spike) in pairs {
            if hitbox_query.get(hero_collider).is_ok() && spike_query.get(spike).is_ok() {
                kill_requests.write(KillHero);
            }
        }
    }
}

/// Once dead, the corpse stops colliding with anything so the death launch
/// can carry it up and then out of the playfield.
pub(crate) fn release_dead_hero(
    mut died_events: MessageReader<HeroDied>,
    mut hitbox_query: Query<&mut CollisionLayers, With<HeroHitbox>>,
) {
    for _event in died_events.read() {
        for mut layers in &mut hitbox_query {
            *layers = CollisionLayers::NONE;
        }
    }
}

/// A dead hero that has fallen well below the playfield gets replaced by a
/// fresh one at the spawn point. The camera clamps to the level bounds, so
/// below-bounds means off screen.
pub(crate) fn respawn_fallen_hero(
    mut commands: Commands,
    bounds: Res<LevelBounds>,
    spawn: Res<HeroSpawn>,
    tuning: Res<HeroTuning>,
    hero_query: Query<(Entity, &Transform, &MoveState), With<Hero>>,
) {
    for (entity, transform, move_state) in &hero_query {
        if move_state.is_dead() && transform.translation.y < bounds.min.y - 100.0 {
            commands.entity(entity).despawn();
            spawn_hero(&mut commands, spawn.0, &tuning);
            info!("Hero respawned");
        }
    }
}
