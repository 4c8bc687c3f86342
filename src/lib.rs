//! Ninja Dash - A vertical-scrolling wall-jumping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, collisions, camera)
//! - `renderer`: Draw-list snapshot handed to whatever paints the frame
//! - `audio`: Sound cue dispatch to a platform audio sink
//! - `screens`: Menu / gameplay / game over screen flow
//! - `highscores`: Five-place leaderboard and its persistence
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod screens;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{PersistError, TuningError};
pub use highscores::{HighScoreRepository, HighScoreTable};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of places on the leaderboard
    pub const HIGH_SCORE_PLACES: usize = 5;
    /// Longest name stored on the leaderboard
    pub const MAX_NAME_LEN: usize = 6;
    /// Placeholder name for empty leaderboard slots
    pub const PLACEHOLDER_NAME: &str = "----";

    /// Items needed on one power-up track to trigger it
    pub const ITEMS_PER_POWER_UP: u8 = 3;
    /// Gems spent per shield
    pub const GEMS_PER_SHIELD: u32 = 50;

    /// Milliseconds of gameplay per point of score
    pub const MS_PER_POINT: f64 = 30.0;
}

/// Position along a projectile trajectory after `t` seconds.
///
/// `x(t) = x0 + dir*vx*t`, `y(t) = y0 - vy*t + g*t²/2` (screen y grows downward).
#[inline]
pub fn projectile(origin: Vec2, dir: f32, velocity: Vec2, gravity: f32, t: f32) -> Vec2 {
    Vec2::new(
        origin.x + dir * velocity.x * t,
        origin.y - velocity.y * t + 0.5 * gravity * t * t,
    )
}
