//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each entity pool)
//! - No rendering or platform dependencies

pub mod animation;
pub mod camera;
pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod player;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod wall;

pub use animation::{Animation, Sheet, SheetSpec};
pub use camera::{Camera, CameraMove};
pub use difficulty::{BatchSize, DifficultyParams};
pub use entity::{Entities, Entity, EntityKind, Pool, Side, ThrowCount};
pub use player::{
    HitOutcome, ItemCounters, Motion, Player, PlayerEffect, PlayerState, PowerUpTrack, step,
};
pub use rect::Rect;
pub use spawner::{GemLine, SpawnEvent, Spawner};
pub use state::{GameEvent, GamePhase, GameState, SessionSummary};
pub use tick::{TickInput, tick};
pub use wall::{Layer, LayerKind, Wall};
