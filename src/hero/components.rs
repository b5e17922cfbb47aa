//! Hero domain: components and physics layers for the player character.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, walls)
    Ground,
    /// Player character
    Player,
    /// Kill-on-touch hazards (spikes)
    Hazard,
}

#[derive(Component, Debug)]
pub struct Hero;

/// Marker for the hero's collider child (the 12x40 box inside the 32x64 sprite).
#[derive(Component, Debug)]
pub struct HeroHitbox;

/// Visible sprite size, in pixels.
pub const SPRITE_SIZE: Vec2 = Vec2::new(32.0, 64.0);

/// Collision box size, in pixels. Smaller than the sprite so the art can
/// overhang ledges without snagging.
pub const HITBOX_SIZE: Vec2 = Vec2::new(12.0, 40.0);

/// Vertical drop of the hitbox center below the sprite center (the hitbox
/// hugs the feet, leaving headroom above).
pub const HITBOX_CENTER_Y: f32 = -11.0;

/// Convert a hitbox offset measured from the sprite's left edge into the
/// collider child's centered x translation.
pub fn hitbox_center_x(offset_px: f32) -> f32 {
    offset_px + HITBOX_SIZE.x / 2.0 - SPRITE_SIZE.x / 2.0
}

/// Physics intent of the hero, driven by the guarded transition table in
/// `machine`. `Dead` is absorbing: no rule leads out of it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    #[default]
    Standing,
    Jumping,
    Flipping,
    Falling,
    Dead,
}

impl MoveState {
    pub fn is_dead(self) -> bool {
        self == MoveState::Dead
    }
}

/// Visual intent of the hero. Mirrors `MoveState` but is its own machine:
/// several of its guards read the already-updated movement state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Running,
    Pivoting,
    Jumping,
    Flipping,
    Falling,
    Dead,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

/// Timestamp sentinel for "never happened". Keeps every timing guard a
/// total function on the very first tick.
pub const NEVER: f64 = f64::NEG_INFINITY;

/// Timing and input-buffer bookkeeping, updated once per tick before either
/// state machine runs.
#[derive(Component, Debug, Clone, Copy)]
pub struct ControlState {
    /// Last instant the hero stood on the floor. Only advances, and only
    /// while alive and grounded.
    pub last_grounded_at: f64,
    /// Deadline until which a buffered jump press stays live.
    pub jump_buffered_until: f64,
    /// Whether a buffered jump press is live this tick.
    pub jump_pressed: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            last_grounded_at: NEVER,
            jump_buffered_until: NEVER,
            jump_pressed: false,
        }
    }
}

impl ControlState {
    /// Start-of-tick bookkeeping: note floor contact, arm the jump buffer on
    /// an edge press, and recompute whether the buffer is live.
    pub fn refresh(&mut self, now: f64, on_floor: bool, jump_just_pressed: bool, jump_buffer: f64) {
        if on_floor {
            self.last_grounded_at = now;
        }
        if jump_just_pressed {
            self.jump_buffered_until = now + jump_buffer;
        }
        self.jump_pressed = self.jump_buffered_until > now;
    }

    /// Spend the buffered press. A single press must not trigger a second
    /// jump or flip.
    pub fn consume_buffer(&mut self) {
        self.jump_buffered_until = NEVER;
        self.jump_pressed = false;
    }
}

/// On-floor half of the per-tick physics sample, written by the ground
/// detection ray cast.
#[derive(Component, Debug, Default)]
pub struct Grounded(pub bool);

/// Horizontal acceleration command, consumed by the arcade-body integrator.
#[derive(Component, Debug, Default)]
pub struct RunAcceleration(pub f32);
