//! Ninja Dash entry point
//!
//! Native builds run a headless session driven by a simple autopilot and
//! record the result on the leaderboard. The browser build starts from
//! `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;

    use ninja_dash::audio::{self, LogAudio};
    use ninja_dash::consts::{MAX_SUBSTEPS, SIM_DT};
    use ninja_dash::highscores::{HighScoreRepository, StoredHighScores, load_or_placeholder};
    use ninja_dash::platform::FileStore;
    use ninja_dash::sim::entity::Entity;
    use ninja_dash::sim::{GamePhase, GameState, PlayerState, Rect, TickInput, tick};
    use ninja_dash::tuning::Tuning;

    /// Wall-clock frame length the runner pretends to render at
    const FRAME_DT: f32 = 1.0 / 30.0;

    /// Headless Ninja Dash session driven by an autopilot.
    #[derive(Parser, Debug, Clone, PartialEq)]
    #[command(author, version, about, long_about = None)]
    pub struct CliArgs {
        /// Run seed; defaults to the system clock.
        #[arg(long, value_name = "SEED")]
        pub seed: Option<u64>,
        /// Longest run to simulate, in seconds.
        #[arg(
            long,
            value_name = "SECONDS",
            default_value_t = 120,
            value_parser = clap::value_parser!(u32).range(1..=3_600)
        )]
        pub seconds: u32,
        /// JSON file overriding any subset of the game balance.
        #[arg(long, value_name = "FILE")]
        pub tuning: Option<PathBuf>,
        /// How far above the player the autopilot looks for danger.
        #[arg(
            long,
            value_name = "PIXELS",
            default_value_t = 240,
            value_parser = clap::value_parser!(u16).range(0..=800)
        )]
        pub lookahead: u16,
        /// Leaderboard name for the autopilot.
        #[arg(long, value_name = "NAME", default_value = "NINJA")]
        pub name: String,
    }

    /// Jump whenever something lethal sits in the lane just ahead
    pub fn autopilot(state: &GameState, lookahead: i32) -> TickInput {
        let player = &state.player;
        if !player.state().is_running() || !player.finished_transition {
            return TickInput::default();
        }
        let hitbox = player.collision_box(&state.tuning);
        let ahead = Rect::new(
            hitbox.x,
            hitbox.y - lookahead,
            hitbox.width,
            hitbox.height + lookahead,
        );
        let e = &state.entities;
        let danger = e.obstacles.iter().any(|o| o.is_active() && o.bounds().intersects(&ahead))
            || e.enemies.iter().any(|o| o.is_active() && o.bounds().intersects(&ahead))
            || e.enemies_with_object.iter().any(|t| {
                t.is_active()
                    && (t.bounds().intersects(&ahead)
                        || t.thrown.iter().any(|s| s.is_active() && s.bounds().intersects(&ahead)))
            })
            || e.flying_enemies.iter().any(|k| k.is_active() && k.bounds().intersects(&ahead))
            || e.horizontal_enemies
                .iter()
                .any(|h| h.is_active() && !h.collided && h.bounds().intersects(&ahead));
        TickInput {
            tap: danger,
            pause: false,
        }
    }

    pub fn run() -> Result<()> {
        let args = CliArgs::parse();
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let seed = match args.seed {
            Some(seed) => seed,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock before 1970")?
                .as_nanos() as u64,
        };

        let mut repo = StoredHighScores::new(FileStore::open_default());
        let mut table = load_or_placeholder(&repo);

        let mut state = GameState::new(seed, tuning);
        state.start();
        let mut sink = LogAudio;
        let mut accumulator = 0.0;
        let mut frames = 0u32;
        let max_frames = (args.seconds as f32 / FRAME_DT).ceil() as u32;

        while state.phase != GamePhase::GameOver && frames < max_frames {
            accumulator += FRAME_DT;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = autopilot(&state, i32::from(args.lookahead));
                tick(&mut state, &input, SIM_DT);
                audio::dispatch(&state.drain_events(), &mut sink);
                accumulator -= SIM_DT;
                substeps += 1;
            }
            frames += 1;
        }

        let summary = state.summary.unwrap_or_else(|| state.session_summary());
        let outcome = if state.player.state() == PlayerState::Hit || state.phase == GamePhase::GameOver {
            "fell"
        } else {
            "survived"
        };
        println!(
            "seed {seed}: {outcome} with score {} ({} gems, {} power-ups, {} shields)",
            summary.score, summary.gems, summary.power_ups_used, summary.shields_used
        );

        if let Some(rank) = table.add_score(&args.name, summary.score) {
            repo.save(&table).context("saving high scores")?;
            println!("New high score! #{rank}");
        }
        for (i, entry) in table.entries().iter().enumerate() {
            println!("{}. {:<6} {}", i + 1, entry.name, entry.score);
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use glam::Vec2;
        use ninja_dash::sim::entity::{Obstacle, Side};

        fn args(list: &[&str]) -> Result<CliArgs, clap::Error> {
            CliArgs::try_parse_from(std::iter::once("ninja-dash").chain(list.iter().copied()))
        }

        #[test]
        fn test_parse_args() {
            let a = args(&["--seed", "42", "--seconds", "5", "--name", "Kai"]).unwrap();
            assert_eq!(a.seed, Some(42));
            assert_eq!(a.seconds, 5);
            assert_eq!(a.name, "Kai");
            assert_eq!(a.lookahead, 240);

            let defaults = args(&[]).unwrap();
            assert_eq!(defaults.seed, None);
            assert_eq!(defaults.seconds, 120);
            assert_eq!(defaults.tuning, None);
        }

        #[test]
        fn test_rejects_bad_args() {
            assert!(args(&["--seed"]).is_err());
            assert!(args(&["--seed", "x"]).is_err());
            assert!(args(&["--fast"]).is_err());
            assert!(args(&["--seconds", "0"]).is_err());
            assert!(args(&["--seconds", "3601"]).is_err());
            assert!(args(&["--lookahead", "801"]).is_err());
        }

        #[test]
        fn test_cli_definition_is_consistent() {
            use clap::CommandFactory;
            CliArgs::command().debug_assert();
        }

        #[test]
        fn test_autopilot_jumps_over_obstacle() {
            let mut state = GameState::new(1, Tuning::default());
            state.start();
            state.player.finished_transition = true;
            assert!(!autopilot(&state, 240).tap);

            let mut obstacle =
                Obstacle::spawn(state.player.pos, Side::Left, &state.tuning);
            obstacle.pos = Vec2::new(0.0, state.player.pos.y - 200.0);
            state.entities.obstacles.spawn(obstacle);
            assert!(autopilot(&state, 240).tap);
            // Too short-sighted to see it yet
            assert!(!autopilot(&state, 0).tap);

            state.player.finished_transition = false;
            assert!(!autopilot(&state, 240).tap);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Ninja Dash (native) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is platform::web::wasm_start
}
