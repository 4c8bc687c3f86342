//! Screen flow
//!
//! Splash, main menu, gameplay, name entry, game over, high scores and the
//! tutorial. The flow owns the current session, the leaderboard and the
//! settings; the host feeds it fixed ticks and menu actions.

use crate::audio::{self, AudioSink, Music};
use crate::highscores::{self, HighScoreRepository, HighScoreTable};
use crate::platform::TextStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, SessionSummary, TickInput, tick};
use crate::tuning::Tuning;

/// Seconds the splash stays up
pub const SPLASH_SECS: f32 = 3.0;
/// Seconds between the start tap and the run beginning
pub const MENU_LEAD_IN_SECS: f32 = 0.9;

/// Menu actions (button presses)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    /// Tap on the main menu: start a run
    Tap,
    ShowHighScores,
    ShowTutorial,
    ToggleSound,
    Back,
    Replay,
    SubmitName(String),
}

/// Final run statistics shown after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverStats {
    pub summary: SessionSummary,
    pub best: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Splash { elapsed: f32 },
    /// `lead_in` counts up once the player taps to start
    MainMenu { lead_in: Option<f32> },
    Gameplay,
    NameEntry { summary: SessionSummary },
    GameOver(GameOverStats),
    HighScores,
    Tutorial,
}

pub struct ScreenFlow<R, S> {
    pub screen: Screen,
    pub session: GameState,
    seed: u64,
    tuning: Tuning,
    high_scores: HighScoreTable,
    repo: R,
    settings: Settings,
    store: S,
}

impl<R: HighScoreRepository, S: TextStore> ScreenFlow<R, S> {
    /// Load the leaderboard and settings, falling back to defaults
    pub fn new(seed: u64, tuning: Tuning, repo: R, store: S) -> Self {
        let high_scores = highscores::load_or_placeholder(&repo);
        let settings = Settings::load(&store);
        Self {
            screen: Screen::Splash { elapsed: 0.0 },
            session: GameState::new(seed, tuning.clone()),
            seed,
            tuning,
            high_scores,
            repo,
            settings,
            store,
        }
    }

    pub fn high_scores(&self) -> &HighScoreTable {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Advance one fixed step. Returns the session events raised this step.
    pub fn update(
        &mut self,
        dt: f32,
        input: &TickInput,
        sink: &mut dyn AudioSink,
    ) -> Vec<GameEvent> {
        match self.screen {
            Screen::Splash { elapsed } => {
                let elapsed = elapsed + dt;
                self.screen = if elapsed > SPLASH_SECS {
                    self.enter_main_menu(sink);
                    Screen::MainMenu { lead_in: None }
                } else {
                    Screen::Splash { elapsed }
                };
                Vec::new()
            }
            Screen::MainMenu { lead_in } => {
                // The attract session keeps the mist moving behind the menu
                tick(&mut self.session, &TickInput::default(), dt);
                if let Some(t) = lead_in {
                    let t = t + dt;
                    if t > MENU_LEAD_IN_SECS {
                        self.session.start();
                        self.screen = Screen::Gameplay;
                    } else {
                        self.screen = Screen::MainMenu { lead_in: Some(t) };
                    }
                }
                self.session.drain_events()
            }
            Screen::Gameplay => {
                tick(&mut self.session, input, dt);
                let events = self.session.drain_events();
                if self.settings.sound_on {
                    audio::dispatch(&events, sink);
                }
                if let Some(summary) = events.iter().find_map(|e| match e {
                    GameEvent::GameOver(s) => Some(*s),
                    _ => None,
                }) {
                    self.finish_run(summary);
                }
                events
            }
            Screen::NameEntry { .. } | Screen::GameOver(_) | Screen::HighScores | Screen::Tutorial => {
                Vec::new()
            }
        }
    }

    /// Apply a menu action. Actions that make no sense on the current screen
    /// are ignored.
    pub fn handle(&mut self, input: MenuInput, sink: &mut dyn AudioSink) {
        match (self.screen, input) {
            (Screen::MainMenu { lead_in: None }, MenuInput::Tap) => {
                log::info!("Starting run");
                self.screen = Screen::MainMenu { lead_in: Some(0.0) };
            }
            (Screen::MainMenu { lead_in: None }, MenuInput::ShowHighScores) => {
                self.screen = Screen::HighScores;
            }
            (Screen::MainMenu { lead_in: None }, MenuInput::ShowTutorial) => {
                self.screen = Screen::Tutorial;
            }
            (Screen::MainMenu { lead_in: None }, MenuInput::ToggleSound) => {
                let sound_on = self.settings.toggle_sound();
                sink.apply_settings(&self.settings);
                if sound_on {
                    sink.play_music(Music::Gameplay);
                } else {
                    sink.stop_music();
                }
                if let Err(e) = self.settings.save(&mut self.store) {
                    log::warn!("Could not save settings: {e}");
                }
            }
            (Screen::HighScores | Screen::Tutorial, MenuInput::Back) => {
                self.screen = Screen::MainMenu { lead_in: None };
            }
            (Screen::NameEntry { summary }, MenuInput::SubmitName(name)) => {
                if !name.trim().is_empty() && self.high_scores.add_score(&name, summary.score).is_some() {
                    if let Err(e) = self.repo.save(&self.high_scores) {
                        log::warn!("Could not save high scores: {e}");
                    }
                }
                self.screen = Screen::GameOver(self.stats(summary));
            }
            (Screen::GameOver(_), MenuInput::Replay) => {
                self.fresh_session();
                self.session.start();
                self.screen = Screen::Gameplay;
            }
            (Screen::GameOver(_), MenuInput::Back) => {
                self.fresh_session();
                self.enter_main_menu(sink);
                self.screen = Screen::MainMenu { lead_in: None };
            }
            (screen, input) => log::debug!("Ignoring {input:?} on {screen:?}"),
        }
    }

    fn enter_main_menu(&mut self, sink: &mut dyn AudioSink) {
        if self.settings.sound_on {
            sink.play_music(Music::Gameplay);
        }
    }

    fn finish_run(&mut self, summary: SessionSummary) {
        self.screen = if self.high_scores.qualifies(summary.score) {
            log::info!("Score {} makes the leaderboard", summary.score);
            Screen::NameEntry { summary }
        } else {
            Screen::GameOver(self.stats(summary))
        };
    }

    fn stats(&self, summary: SessionSummary) -> GameOverStats {
        GameOverStats {
            summary,
            best: self.high_scores.best().max(summary.score),
        }
    }

    fn fresh_session(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.session = GameState::new(self.seed, self.tuning.clone());
    }
}
