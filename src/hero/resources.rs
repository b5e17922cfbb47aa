//! Hero domain: tuning and input resources.

use avian2d::prelude::Gravity;
use bevy::prelude::*;
use ron::Options;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Controller tuning. Defaults are the shipped game feel; a partial
/// `assets/data/hero.ron` can override any field.
///
/// Vertical speeds are positive-up: launches are positive, the fall-speed
/// cap is applied downward.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeroTuning {
    /// Upward launch speed of a ground (or coyote) jump.
    pub jump_speed: f32,
    /// Upward launch speed of the mid-air flip.
    pub flip_speed: f32,
    /// Releasing jump early clamps any faster ascent down to this speed.
    pub jump_cut_speed: f32,
    /// Upward launch applied to the corpse on death.
    pub death_launch_speed: f32,
    pub run_accel: f32,
    /// Horizontal drag toward rest while no direction is held.
    pub ground_drag: f32,
    pub max_run_speed: f32,
    pub max_fall_speed: f32,
    pub gravity: f32,
    /// Seconds a jump press stays buffered before it expires.
    pub jump_buffer: f64,
    /// Seconds after leaving the floor during which a jump is still honored.
    pub coyote_time: f64,
    /// Seconds after leaving the floor during which a second press still
    /// triggers the flip even once no longer ascending.
    pub flip_grace: f64,
    /// Hitbox x offset from the sprite's left edge while facing left.
    pub hitbox_offset_left: f32,
    /// Same, while facing right. The run sprite leans, so the box shifts.
    pub hitbox_offset_right: f32,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            jump_speed: 400.0,
            flip_speed: 300.0,
            jump_cut_speed: 150.0,
            death_launch_speed: 500.0,
            run_accel: 1000.0,
            ground_drag: 750.0,
            max_run_speed: 250.0,
            max_fall_speed: 400.0,
            gravity: 750.0,
            jump_buffer: 0.200,
            coyote_time: 0.120,
            flip_grace: 0.650,
            hitbox_offset_left: 8.0,
            hitbox_offset_right: 12.0,
        }
    }
}

/// Error type for tuning load failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub(crate) fn parse_tuning(contents: &str, file_name: &str) -> Result<HeroTuning, TuningLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| TuningLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

fn load_tuning_file(path: &Path) -> Result<HeroTuning, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;
    parse_tuning(&contents, &file_name)
}

/// Load `assets/data/hero.ron` over the defaults at startup. A missing or
/// malformed file keeps the defaults.
pub(crate) fn load_tuning(mut tuning: ResMut<HeroTuning>) {
    let path = Path::new("assets/data/hero.ron");
    match load_tuning_file(path) {
        Ok(loaded) => {
            info!("Loaded hero tuning from {}", path.display());
            *tuning = loaded;
        }
        Err(e) => warn!("{}, using default hero tuning", e),
    }
}

/// Hand the tuned gravity to the physics engine.
pub(crate) fn apply_gravity(tuning: Res<HeroTuning>, mut gravity: ResMut<Gravity>) {
    gravity.0 = Vec2::NEG_Y * tuning.gravity;
}

/// Raw input signals sampled from the keyboard each frame.
#[derive(Resource, Debug, Default)]
pub struct HeroInput {
    pub left: bool,
    pub right: bool,
    /// Edge: either jump key went down this frame.
    pub jump_just_pressed: bool,
    /// Level: either jump key is currently down.
    pub jump_held: bool,
}
