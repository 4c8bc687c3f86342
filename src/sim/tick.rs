//! Fixed-timestep game tick
//!
//! This is the single entry point that advances the simulation.

use super::camera::{self, CameraMove};
use super::collision;
use super::entity::EntityContext;
use super::player::{PlayerEffect, StepContext, step};
use super::spawner::SpawnContext;
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::SoundCue;

/// Input commands for a single tick (deterministic, edge-triggered)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Screen tap: jump, or resume while paused
    pub tap: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let started = state.is_started();

    // Handle pause toggle
    if input.pause && started {
        match state.phase {
            GamePhase::Playing => {
                log::info!("Paused");
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                log::info!("Resumed");
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    // A tap is only seen once the camera has started following the player
    let mut jump = false;
    if input.tap && state.player.finished_transition {
        if state.phase == GamePhase::Paused {
            log::info!("Resumed");
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::Resumed);
        } else {
            jump = true;
        }
    }

    // Mist drifts in every phase
    let width = state.tuning.viewport_width;
    for layer in state.layers.iter_mut().filter(|l| l.kind.is_ambient()) {
        layer.update(dt, width);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    if jump && state.player.try_jump() {
        state.events.push(GameEvent::Sound(SoundCue::PlayerJump));
    }

    // Player physics only once the walls are in place
    if state.walls_finished() {
        let ctx = StepContext {
            tuning: &state.tuning,
            camera_y: state.camera.y,
        };
        let (player, effects) = step(&state.player, &ctx, dt);
        state.player = player;
        for effect in effects {
            match effect {
                PlayerEffect::Sound(cue) => state.events.push(GameEvent::Sound(cue)),
                PlayerEffect::WallSpeed(speed) => {
                    for wall in &mut state.walls {
                        wall.scroll_speed = speed;
                    }
                }
            }
        }
    }

    // Entity lifecycle, one category at a time
    let mut ctx = EntityContext {
        player_y: state.player.pos.y,
        tuning: &state.tuning,
        events: &mut state.events,
    };
    state.entities.update(dt, &mut ctx);

    collision::resolve(
        &mut state.player,
        &mut state.entities,
        &state.tuning,
        &mut state.events,
    );

    if state.player.hit_elapsed().is_none() {
        camera::follow(
            &mut state.camera,
            &mut state.player,
            &state.tuning,
            dt,
            &mut state.events,
        );
        let walls_done = camera::update_walls(&mut state.walls, &state.tuning, dt);

        if walls_done {
            state.add_gameplay_time(dt);
            for layer in state.layers.iter_mut().filter(|l| !l.kind.is_ambient()) {
                layer.update(dt, width);
            }

            if !state.player.state().is_invulnerable() {
                let mut ctx = SpawnContext {
                    tuning: &state.tuning,
                    score: state.score,
                    player: &mut state.player,
                    entities: &mut state.entities,
                    events: &mut state.events,
                    rng: &mut state.rng,
                };
                state.spawner.update(dt, &mut ctx);
            }
        }
    } else {
        state.camera.apply(CameraMove::Down(state.tuning.fall_camera_speed), dt);
        let falling_for = state.player.hit_elapsed().unwrap_or_default();
        if falling_for > state.tuning.game_over_delay {
            state.end();
        }
    }

    state.time_ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::player::PlayerState;
    use crate::sim::wall::LayerKind;
    use crate::tuning::Tuning;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.start();
        state
    }

    fn run(state: &mut GameState, ticks: usize) {
        for _ in 0..ticks {
            tick(state, &TickInput::default(), SIM_DT);
        }
    }

    fn run_until_walls(state: &mut GameState) {
        let mut ticks = 0;
        while !state.walls_finished() {
            tick(state, &TickInput::default(), SIM_DT);
            ticks += 1;
            assert!(ticks < 100);
        }
    }

    fn mist_x(state: &GameState) -> f32 {
        state
            .layers
            .iter()
            .find(|l| l.kind == LayerKind::Mist1)
            .map(|l| l.pos.x)
            .unwrap()
    }

    #[test]
    fn test_attract_phase_only_drifts_mist() {
        let mut state = GameState::new(1, Tuning::default());
        let player = state.player.pos;
        run(&mut state, 30);
        assert_eq!(state.player.pos, player);
        assert!(!state.walls_finished());
        assert!(mist_x(&state) > 0.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_player_frozen_while_walls_slide() {
        let mut state = started(1);
        let start = state.player.pos;
        run(&mut state, 10);
        assert!(!state.walls_finished());
        assert_eq!(state.player.pos, start);
        assert_eq!(state.score, 0);

        run_until_walls(&mut state);
        run(&mut state, 1);
        assert!(state.player.pos.y < start.y);
    }

    #[test]
    fn test_taps_ignored_until_camera_follows() {
        let mut state = started(1);
        run_until_walls(&mut state);
        let tap = TickInput {
            tap: true,
            pause: false,
        };
        tick(&mut state, &tap, SIM_DT);
        assert_eq!(state.player.state(), PlayerState::RunLeft);

        // 200 px to climb at 700 px/s
        run(&mut state, 20);
        assert!(state.player.finished_transition);
        tick(&mut state, &tap, SIM_DT);
        assert_eq!(state.player.state(), PlayerState::Jump);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Sound(SoundCue::PlayerJump))
        );
    }

    #[test]
    fn test_pause_freezes_gameplay_but_not_mist() {
        let mut state = started(1);
        run_until_walls(&mut state);
        run(&mut state, 30);

        tick(
            &mut state,
            &TickInput {
                tap: false,
                pause: true,
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::Paused);
        let pos = state.player.pos;
        let score = state.score;
        let mist = mist_x(&state);
        run(&mut state, 60);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.score, score);
        assert_ne!(mist_x(&state), mist);

        // Tap resumes without jumping
        let tap = TickInput {
            tap: true,
            pause: false,
        };
        tick(&mut state, &tap, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.state(), PlayerState::RunLeft);
        assert!(state.player.pos.y < pos.y);
    }

    #[test]
    fn test_score_tracks_gameplay_time() {
        let mut state = started(1);
        run_until_walls(&mut state);
        let before = state.elapsed_ms;
        run(&mut state, 60);
        assert!((state.elapsed_ms - before - 1000.0).abs() < 1.0);
        assert_eq!(state.score, (state.elapsed_ms / 30.0) as u32);
    }

    #[test]
    fn test_game_over_three_seconds_after_hit() {
        let mut state = started(1);
        run_until_walls(&mut state);
        run(&mut state, 30);
        state.player.hit();
        let camera = state.camera.y;

        run(&mut state, 150);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.camera.y > camera);

        run(&mut state, 40);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundCue::GameOver)));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver(s) if s.score == state.score))
        );

        // Nothing moves after the run ends
        let ticks = state.time_ticks;
        run(&mut state, 10);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_same_seed_same_run() {
        let play = |seed: u64| {
            let mut state = started(seed);
            for i in 0..1800 {
                let input = TickInput {
                    tap: i % 45 == 0,
                    pause: false,
                };
                tick(&mut state, &input, SIM_DT);
            }
            (
                state.score,
                state.player.pos,
                state.player.state(),
                state.entities.total(),
                state.phase,
            )
        };
        assert_eq!(play(99), play(99));
    }

    #[test]
    fn test_first_content_after_two_seconds() {
        let mut state = started(5);
        run_until_walls(&mut state);
        run(&mut state, 110);
        assert_eq!(state.entities.total(), 0);
        run(&mut state, 15);
        assert!(state.entities.total() > 0);
    }
}
