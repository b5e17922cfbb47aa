//! Hero domain: lifecycle messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Request to kill the hero. Hazards (and anything else with a grudge) write
/// this; the controller applies it at the top of its tick.
#[derive(Debug)]
pub struct KillHero;

impl Message for KillHero {}

/// Fired exactly once when the hero dies. The level reacts by letting the
/// corpse leave the playfield.
#[derive(Debug)]
pub struct HeroDied {
    pub entity: Entity,
}

impl Message for HeroDied {}
