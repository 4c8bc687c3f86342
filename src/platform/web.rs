//! Browser platform: LocalStorage and the wasm game binding

use wasm_bindgen::prelude::*;
use web_sys::Storage;

use super::TextStore;
use crate::audio::{AudioSink, WebAudio};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::PersistError;
use crate::highscores::StoredHighScores;
use crate::renderer::DrawList;
use crate::screens::{MenuInput, Screen, ScreenFlow};
use crate::sim::TickInput;
use crate::tuning::Tuning;

const KEY_PREFIX: &str = "ninja_dash_";

/// LocalStorage, one item per key
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Storage("LocalStorage unavailable".into()))
    }
}

impl TextStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Self::storage()?
            .get_item(&format!("{KEY_PREFIX}{key}"))
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, text: &str) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(&format!("{KEY_PREFIX}{key}"), text)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Ninja Dash starting...");
}

/// Game instance driven by the page's animation frame loop
#[wasm_bindgen]
pub struct WebGame {
    flow: ScreenFlow<StoredHighScores<LocalStore>, LocalStore>,
    audio: WebAudio,
    accumulator: f32,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebGame {
        let flow = ScreenFlow::new(
            u64::from(seed),
            Tuning::default(),
            StoredHighScores::new(LocalStore),
            LocalStore,
        );
        let mut audio = WebAudio::new();
        audio.apply_settings(flow.settings());
        Self {
            flow,
            audio,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Advance by `dt` seconds of wall time in fixed steps
    pub fn tick(&mut self, dt: f32, tap: bool, pause: bool) {
        self.input.tap |= tap;
        self.input.pause |= pause;
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input;
            self.flow.update(SIM_DT, &input, &mut self.audio);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot inputs are consumed by the first step
            self.input = TickInput::default();
        }
    }

    /// Menu button press: `tap`, `high_scores`, `tutorial`, `sound`, `back`, `replay`
    pub fn menu(&mut self, action: &str) {
        let input = match action {
            "tap" => MenuInput::Tap,
            "high_scores" => MenuInput::ShowHighScores,
            "tutorial" => MenuInput::ShowTutorial,
            "sound" => MenuInput::ToggleSound,
            "back" => MenuInput::Back,
            "replay" => MenuInput::Replay,
            other => {
                log::warn!("Unknown menu action {other:?}");
                return;
            }
        };
        self.audio.resume();
        self.flow.handle(input, &mut self.audio);
    }

    pub fn submit_name(&mut self, name: String) {
        self.flow.handle(MenuInput::SubmitName(name), &mut self.audio);
    }

    pub fn screen(&self) -> String {
        match self.flow.screen {
            Screen::Splash { .. } => "splash",
            Screen::MainMenu { .. } => "main_menu",
            Screen::Gameplay => "gameplay",
            Screen::NameEntry { .. } => "name_entry",
            Screen::GameOver(_) => "game_over",
            Screen::HighScores => "high_scores",
            Screen::Tutorial => "tutorial",
        }
        .to_string()
    }

    /// Current frame as JSON
    pub fn draw_list(&self) -> Result<String, JsValue> {
        serde_json::to_string(&DrawList::capture(&self.flow.session))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Leaderboard as JSON
    pub fn high_scores(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.flow.high_scores()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
