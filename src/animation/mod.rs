//! Animation playback for the hero.
//!
//! The controller picks an [`AnimState`](crate::hero::AnimState); this module
//! turns it into a named clip and steps frames. Every clip loops except
//! Flipping (plays once) and Dead (plays once and holds its final frame).


use bevy::prelude::*;

use crate::hero::{AnimState, Facing};

/// Playback metadata for one animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    pub name: &'static str,
    pub frames: u32,
    pub fps: f32,
    pub looping: bool,
}

/// Clip metadata per animation state (could be data-driven later).
pub fn clip_for(state: AnimState) -> Clip {
    match state {
        AnimState::Idle => Clip {
            name: "hero/idle",
            frames: 4,
            fps: 10.0,
            looping: true,
        },
        AnimState::Running => Clip {
            name: "hero/running",
            frames: 6,
            fps: 10.0,
            looping: true,
        },
        AnimState::Pivoting => Clip {
            name: "hero/pivoting",
            frames: 2,
            fps: 10.0,
            looping: true,
        },
        AnimState::Jumping => Clip {
            name: "hero/jumping",
            frames: 2,
            fps: 10.0,
            looping: true,
        },
        AnimState::Flipping => Clip {
            name: "hero/flipping",
            frames: 4,
            fps: 30.0,
            looping: false,
        },
        AnimState::Falling => Clip {
            name: "hero/falling",
            frames: 2,
            fps: 10.0,
            looping: true,
        },
        AnimState::Dead => Clip {
            name: "hero/dead",
            frames: 4,
            fps: 10.0,
            looping: false,
        },
    }
}

/// Component that plays the clip for the entity's current animation state.
#[derive(Component, Debug)]
pub struct ClipPlayer {
    /// Animation state the current clip belongs to.
    pub state: AnimState,
    pub clip: Clip,
    /// Current frame index (0-based).
    pub frame: u32,
    /// Time accumulator for frame timing.
    pub timer: f32,
    /// Whether a non-looping clip has reached its final frame.
    pub finished: bool,
}

impl Default for ClipPlayer {
    fn default() -> Self {
        Self {
            state: AnimState::Idle,
            clip: clip_for(AnimState::Idle),
            frame: 0,
            timer: 0.0,
            finished: false,
        }
    }
}

impl ClipPlayer {
    /// Switch to the clip for `state`, restarting playback. No-op when the
    /// state is unchanged.
    pub fn set_state(&mut self, state: AnimState) {
        if self.state != state {
            self.state = state;
            self.clip = clip_for(state);
            self.frame = 0;
            self.timer = 0.0;
            self.finished = false;
        }
    }

    /// Advance playback by `dt` seconds. Non-looping clips hold their final
    /// frame once finished.
    pub fn step(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        self.timer += dt;
        let frame_duration = 1.0 / self.clip.fps;

        while self.timer >= frame_duration {
            self.timer -= frame_duration;
            self.frame += 1;

            if self.frame >= self.clip.frames {
                if self.clip.looping {
                    self.frame = 0;
                } else {
                    self.frame = self.clip.frames - 1;
                    self.finished = true;
                    break;
                }
            }
        }
    }
}

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (select_clips, advance_frames, sync_facing).chain());
    }
}

/// Swap clips whenever the animation machine picked a new state this tick.
fn select_clips(mut query: Query<(&AnimState, &mut ClipPlayer)>) {
    for (state, mut player) in &mut query {
        if *state != player.state {
            debug!("clip -> {}", clip_for(*state).name);
            player.set_state(*state);
        }
    }
}

/// Step frame timers and push the frame index to the sprite atlas when one
/// is attached.
fn advance_frames(time: Res<Time>, mut query: Query<(&mut ClipPlayer, &mut Sprite)>) {
    for (mut player, mut sprite) in &mut query {
        player.step(time.delta_secs());

        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = player.frame as usize;
        }
    }
}

fn sync_facing(mut query: Query<(&Facing, &mut Sprite)>) {
    for (facing, mut sprite) in &mut query {
        sprite.flip_x = *facing == Facing::Left;
    }
}
