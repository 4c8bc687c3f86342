//! Game session state and core simulation types
//!
//! One [`GameState`] is one run: player, entities, walls, camera, background and
//! the seeded RNG that drives every spawn decision.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{Camera, walls_finished};
use super::entity::{Entities, Side};
use super::player::{Player, PowerUpTrack};
use super::spawner::Spawner;
use super::wall::{Layer, Wall};
use crate::audio::SoundCue;
use crate::consts::MS_PER_POINT;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Built but not started: only the mist drifts
    Attract,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// End-of-run statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub gems: u32,
    pub power_ups_used: u32,
    pub shields_used: u32,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    PlayerHit,
    ShieldRaised,
    ShieldConsumed,
    PowerUp(PowerUpTrack),
    Paused,
    Resumed,
    GameOver(SessionSummary),
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Milliseconds of scoring gameplay
    pub elapsed_ms: f64,
    pub score: u32,
    pub player: Player,
    pub entities: Entities,
    pub spawner: Spawner,
    pub camera: Camera,
    pub walls: [Wall; 2],
    /// Background layers in draw order
    pub layers: Vec<Layer>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub summary: Option<SessionSummary>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Attract,
            time_ticks: 0,
            elapsed_ms: 0.0,
            score: 0,
            player: Player::new(&tuning),
            entities: Entities::default(),
            spawner: Spawner::new(),
            camera: Camera::default(),
            walls: [Wall::new(Side::Left, &tuning), Wall::new(Side::Right, &tuning)],
            layers: Layer::background(),
            events: Vec::new(),
            summary: None,
            tuning,
        }
    }

    /// Leave the attract phase and begin play
    pub fn start(&mut self) {
        if self.phase == GamePhase::Attract {
            log::info!("Session started (seed {})", self.seed);
            self.phase = GamePhase::Playing;
        }
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Attract
    }

    pub fn walls_finished(&self) -> bool {
        walls_finished(&self.walls)
    }

    /// Add scoring time and recompute the score
    pub fn add_gameplay_time(&mut self, dt: f32) {
        self.elapsed_ms += f64::from(dt) * 1000.0;
        self.score = (self.elapsed_ms / MS_PER_POINT) as u32;
    }

    pub fn session_summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            gems: self.player.lifetime.gems,
            power_ups_used: self.player.lifetime.power_ups_used,
            shields_used: self.player.lifetime.shields_used,
        }
    }

    /// End the run, recording the summary
    pub fn end(&mut self) {
        let summary = self.session_summary();
        log::info!(
            "Game over: score {} gems {} power-ups {} shields {}",
            summary.score,
            summary.gems,
            summary.power_ups_used,
            summary.shields_used
        );
        self.phase = GamePhase::GameOver;
        self.summary = Some(summary);
        self.events.push(GameEvent::Sound(SoundCue::GameOver));
        self.events.push(GameEvent::GameOver(summary));
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::PlayerState;

    #[test]
    fn test_new_session() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Attract);
        assert!(!state.is_started());
        assert!(!state.walls_finished());
        assert_eq!(state.player.state(), PlayerState::RunLeft);
        assert_eq!(state.layers.len(), 6);
        assert_eq!(state.entities.total(), 0);
    }

    #[test]
    fn test_score_is_whole_thirty_ms_units() {
        let mut state = GameState::new(1, Tuning::default());
        state.elapsed_ms = 29.0;
        state.add_gameplay_time(0.0);
        assert_eq!(state.score, 0);
        state.add_gameplay_time(0.001);
        assert_eq!(state.score, 1);
        state.elapsed_ms = 60_000.0;
        state.add_gameplay_time(0.0);
        assert_eq!(state.score, 2000);
    }

    #[test]
    fn test_end_records_summary_and_events() {
        let mut state = GameState::new(1, Tuning::default());
        state.start();
        state.score = 1234;
        state.player.lifetime.gems = 7;
        state.end();
        assert_eq!(state.phase, GamePhase::GameOver);
        let summary = state.summary.unwrap();
        assert_eq!(summary.score, 1234);
        assert_eq!(summary.gems, 7);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::Sound(SoundCue::GameOver));
        assert_eq!(events[1], GameEvent::GameOver(summary));
        assert!(state.events.is_empty());
    }
}
