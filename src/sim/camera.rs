//! Camera scroll and wall synchronisation
//!
//! The camera is a single vertical offset. Its speed is chosen from the player's
//! state each tick; it never tracks the player's position directly, so the
//! player drifts on screen during power-ups and the Idle state exists to let the
//! camera catch up.

use serde::{Deserialize, Serialize};

use super::player::{Motion, Player};
use super::state::GameEvent;
use super::wall::Wall;
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Camera motion for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CameraMove {
    Up(f32),
    Down(f32),
    Hold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World y at the top of the screen
    pub y: f32,
}

impl Camera {
    pub fn apply(&mut self, movement: CameraMove, dt: f32) {
        match movement {
            CameraMove::Up(speed) => self.y -= speed * dt,
            CameraMove::Down(speed) => self.y += speed * dt,
            CameraMove::Hold => {}
        }
    }
}

/// Pick the camera motion for the player's current state
pub fn camera_move(player: &Player, tuning: &Tuning) -> CameraMove {
    match player.motion {
        Motion::Run(_) | Motion::Jump(_) => {
            if player.pos.y <= tuning.margin_vertical {
                CameraMove::Up(tuning.run_speed)
            } else {
                CameraMove::Hold
            }
        }
        Motion::Idle => CameraMove::Up(tuning.camera_catch_up_speed),
        Motion::NinjaStarPowerUp { elapsed, .. } if elapsed > tuning.ninja_star_camera_delay => {
            CameraMove::Up(tuning.camera_catch_up_speed)
        }
        Motion::NinjaStarPowerUp { .. } => CameraMove::Hold,
        Motion::HorizontalEnemyPowerUp { .. } => CameraMove::Up(tuning.horizontal_power_up_speed.y),
        Motion::Hit { .. } => CameraMove::Down(tuning.fall_camera_speed),
        Motion::FlyingObjectPowerUp => CameraMove::Hold,
    }
}

/// Scroll the camera for this tick and raise the follow-on flags
pub fn follow(
    camera: &mut Camera,
    player: &mut Player,
    tuning: &Tuning,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    let movement = camera_move(player, tuning);
    if matches!(player.motion, Motion::Run(_) | Motion::Jump(_))
        && movement != CameraMove::Hold
        && !player.finished_transition
    {
        player.finished_transition = true;
        log::debug!("Camera following, input unlocked");
    }
    if player
        .power_up_elapsed()
        .is_some_and(|elapsed| elapsed > tuning.lift_off_delay)
        && player.mark_lift_off()
    {
        events.push(GameEvent::Sound(SoundCue::LiftOff));
    }
    camera.apply(movement, dt);
}

/// Slide in and scroll both walls. Returns true once both are in place.
pub fn update_walls(walls: &mut [Wall; 2], tuning: &Tuning, dt: f32) -> bool {
    for wall in walls.iter_mut() {
        wall.update(dt, tuning);
    }
    walls_finished(walls)
}

pub fn walls_finished(walls: &[Wall; 2]) -> bool {
    walls.iter().all(|w| w.finished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::entity::Side;
    use glam::Vec2;

    #[test]
    fn test_camera_waits_for_player_to_climb() {
        let t = Tuning::default();
        let mut player = Player::new(&t);
        let mut camera = Camera::default();
        let mut events = Vec::new();

        follow(&mut camera, &mut player, &t, SIM_DT, &mut events);
        assert_eq!(camera.y, 0.0);
        assert!(!player.finished_transition);

        player.pos.y = 600.0;
        follow(&mut camera, &mut player, &t, SIM_DT, &mut events);
        assert!(camera.y < 0.0);
        assert!(player.finished_transition);
    }

    #[test]
    fn test_camera_speed_by_state() {
        let t = Tuning::default();
        let mut player = Player::new(&t);
        player.pos = Vec2::new(200.0, 0.0);

        assert_eq!(camera_move(&player, &t), CameraMove::Up(700.0));

        player.motion = Motion::Idle;
        assert_eq!(camera_move(&player, &t), CameraMove::Up(660.0));

        player.enter_horizontal_power_up();
        assert_eq!(camera_move(&player, &t), CameraMove::Up(450.0));

        player.motion = Motion::FlyingObjectPowerUp;
        assert_eq!(camera_move(&player, &t), CameraMove::Hold);

        player.motion = Motion::Run(Side::Left);
        player.hit();
        assert_eq!(camera_move(&player, &t), CameraMove::Down(600.0));
    }

    #[test]
    fn test_rocket_camera_delay_and_lift_off_once() {
        let t = Tuning::default();
        let mut player = Player::new(&t);
        player.enter_ninja_star_power_up();
        assert_eq!(camera_move(&player, &t), CameraMove::Hold);

        player.motion = Motion::NinjaStarPowerUp {
            elapsed: 0.3,
            lift_off_played: false,
        };
        assert_eq!(camera_move(&player, &t), CameraMove::Up(660.0));

        let mut camera = Camera::default();
        let mut events = Vec::new();
        follow(&mut camera, &mut player, &t, SIM_DT, &mut events);
        assert!(events.is_empty());

        player.motion = Motion::NinjaStarPowerUp {
            elapsed: 1.4,
            lift_off_played: false,
        };
        follow(&mut camera, &mut player, &t, SIM_DT, &mut events);
        follow(&mut camera, &mut player, &t, SIM_DT, &mut events);
        assert_eq!(events, vec![GameEvent::Sound(SoundCue::LiftOff)]);
    }

    #[test]
    fn test_walls_report_finished_together() {
        let t = Tuning::default();
        let mut walls = [Wall::new(Side::Left, &t), Wall::new(Side::Right, &t)];
        assert!(!update_walls(&mut walls, &t, SIM_DT));
        walls[0].finished = true;
        assert!(!walls_finished(&walls));
        let mut ticks = 0;
        while !update_walls(&mut walls, &t, SIM_DT) {
            ticks += 1;
            assert!(ticks < 100);
        }
        assert!(walls_finished(&walls));
    }
}
