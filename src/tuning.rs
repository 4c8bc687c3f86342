//! Data-driven game balance
//!
//! Every speed, size and timing the simulation uses lives here. Defaults match
//! the shipped game on a 480x800 portrait screen; a JSON file may override any
//! subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Game balance and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Fraction of the width inset from each edge for the run lanes
    pub margin_fraction: f32,
    /// Camera-relative height the player settles at while running
    pub margin_vertical: f32,
    /// Extra distance above the settle height where content spawns
    pub vertical_offset: f32,

    // === Player motion ===
    pub run_speed: f32,
    pub jump_velocity: Vec2,
    pub jump_gravity: f32,
    pub fall_velocity: Vec2,
    pub fall_gravity: f32,
    /// Seconds of the idle-fall visual before the looping fall visual
    pub idle_fall_secs: f32,
    /// Pixels trimmed from each side of the player box
    pub player_box_shrink: i32,

    // === Power-ups ===
    pub ninja_star_speed: f32,
    /// Seconds the walls are driven at rocket speed
    pub ninja_star_wall_secs: f32,
    pub ninja_star_drift_speed: f32,
    pub ninja_star_sink_speed: f32,
    pub ninja_star_camera_delay: f32,
    pub lift_off_delay: f32,
    pub horizontal_power_up_speed: Vec2,
    pub horizontal_power_up_bounces: u32,

    // === Camera ===
    pub camera_catch_up_speed: f32,
    pub fall_camera_speed: f32,
    pub game_over_delay: f32,

    // === Walls ===
    pub wall_width: f32,
    pub wall_slide_speed: f32,

    // === Entities ===
    pub obstacle_size: Vec2,
    /// Obstacles despawn once the player is this far past the viewport height
    pub obstacle_despawn_extra: f32,
    pub flying_enemy_offset: f32,
    pub flying_enemy_speed: f32,
    pub throw_delay_secs: f32,
    pub thrown_velocity: Vec2,
    pub second_thrown_velocity: Vec2,
    pub horizontal_enemy_speed: f32,
    pub horizontal_enemy_inset: f32,
    pub gem_line_spacing: f32,
    pub gem_matrix_spacing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: 480.0,
            viewport_height: 800.0,
            margin_fraction: 0.20,
            margin_vertical: 600.0,
            vertical_offset: 100.0,

            run_speed: 700.0,
            jump_velocity: Vec2::new(730.0, 860.0),
            jump_gravity: 800.0,
            fall_velocity: Vec2::new(50.0, 0.0),
            fall_gravity: 620.0,
            idle_fall_secs: 0.48,
            player_box_shrink: 20,

            ninja_star_speed: 1050.0,
            ninja_star_wall_secs: 2.0,
            ninja_star_drift_speed: 210.0,
            ninja_star_sink_speed: 300.0,
            ninja_star_camera_delay: 0.25,
            lift_off_delay: 1.3,
            horizontal_power_up_speed: Vec2::new(750.0, 450.0),
            horizontal_power_up_bounces: 10,

            camera_catch_up_speed: 660.0,
            fall_camera_speed: 600.0,
            game_over_delay: 3.0,

            wall_width: 64.0,
            wall_slide_speed: 100.0,

            obstacle_size: Vec2::new(160.0, 48.0),
            obstacle_despawn_extra: 1000.0,
            flying_enemy_offset: 700.0,
            flying_enemy_speed: 350.0,
            throw_delay_secs: 0.45,
            thrown_velocity: Vec2::new(150.0, 0.0),
            second_thrown_velocity: Vec2::new(150.0, -115.0),
            horizontal_enemy_speed: 150.0,
            horizontal_enemy_inset: 30.0,
            gem_line_spacing: 20.0,
            gem_matrix_spacing: 80.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load an override file from disk
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    fn validate(&self) -> Result<(), TuningError> {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(TuningError::Invalid("viewport must be positive".into()));
        }
        if !(0.0..0.5).contains(&self.margin_fraction) {
            return Err(TuningError::Invalid("margin_fraction must be in [0, 0.5)".into()));
        }
        if self.run_speed <= 0.0 {
            return Err(TuningError::Invalid("run_speed must be positive".into()));
        }
        if self.wall_width * 2.0 >= self.viewport_width {
            return Err(TuningError::Invalid("walls leave no room to play".into()));
        }
        if !self.horizontal_enemy_inset.is_finite() || self.horizontal_enemy_inset < 0.0 {
            return Err(TuningError::Invalid("horizontal_enemy_inset must be non-negative".into()));
        }
        // Spawn x is drawn from whole pixels, so the lane needs at least one
        let lane = self.margin_right() - self.margin_left() - 2.0 * self.horizontal_enemy_inset;
        if lane < 1.0 {
            return Err(TuningError::EmptyLane(format!(
                "margins {:.1}..{:.1} minus inset {:.1} on each side",
                self.margin_left(),
                self.margin_right(),
                self.horizontal_enemy_inset
            )));
        }
        Ok(())
    }

    /// Left run lane x
    pub fn margin_left(&self) -> f32 {
        self.viewport_width * self.margin_fraction
    }

    /// Right run lane x
    pub fn margin_right(&self) -> f32 {
        self.viewport_width - self.viewport_width * self.margin_fraction
    }

    /// How far above the player new content appears
    pub fn spawn_distance(&self) -> f32 {
        self.margin_vertical + self.vertical_offset
    }

    /// Distance the player climbs before a generic entity despawns
    pub fn despawn_distance(&self) -> f32 {
        self.viewport_height * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_margins() {
        let t = Tuning::default();
        assert!((t.margin_left() - 96.0).abs() < 1e-4);
        assert!((t.margin_right() - 384.0).abs() < 1e-4);
        assert_eq!(t.spawn_distance(), 700.0);
        assert_eq!(t.despawn_distance(), 1600.0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "run_speed": 900.0, "jump_velocity": [700.0, 800.0] }"#)
            .unwrap();
        assert_eq!(t.run_speed, 900.0);
        assert_eq!(t.jump_velocity, Vec2::new(700.0, 800.0));
        assert_eq!(t.jump_gravity, 800.0);
        assert_eq!(t.viewport_width, 480.0);
    }

    #[test]
    fn test_invalid_override_rejected() {
        assert!(matches!(
            Tuning::from_json(r#"{ "run_speed": 0.0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_horizontal_enemy_lane_must_fit() {
        assert!(matches!(
            Tuning::from_json(r#"{ "margin_fraction": 0.45 }"#),
            Err(TuningError::EmptyLane(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "horizontal_enemy_inset": 144.0 }"#),
            Err(TuningError::EmptyLane(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "horizontal_enemy_inset": -1.0 }"#),
            Err(TuningError::Invalid(_))
        ));
        let t = Tuning::from_json(r#"{ "horizontal_enemy_inset": 143.0 }"#).unwrap();
        assert_eq!(t.horizontal_enemy_inset, 143.0);
    }
}
