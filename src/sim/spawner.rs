//! Content spawning on a score-driven interval
//!
//! One spawn event fires each time the interval timer elapses. Batches that
//! stretch vertically (obstacle runs, gem lines, the gem matrix) push the timer
//! negative by the time the player needs to climb past them, so the next event
//! does not land on top of them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::animation::Sheet;
use super::difficulty::DifficultyParams;
use super::entity::{
    Enemy, EnemyWithObject, Entities, FlyingEnemy, Gem, HorizontalEnemy, Obstacle, Side,
    draw_side,
};
use super::player::{Player, PowerUpTrack};
use super::state::GameEvent;
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Gem line layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GemLine {
    VerticalLeft,
    VerticalRight,
    Horizontal,
}

/// What a spawn event placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEvent {
    /// Flying-object reward: 6x6 gems in place of the regular draw
    GemMatrix,
    EnemyWithObject,
    Obstacles { first: Side, count: u32 },
    Enemy,
    FlyingEnemy,
    GemLine(GemLine),
    HorizontalEnemy,
}

/// Everything a spawn event may touch
pub struct SpawnContext<'a, R: Rng + ?Sized> {
    pub tuning: &'a Tuning,
    pub score: u32,
    pub player: &'a mut Player,
    pub entities: &'a mut Entities,
    pub events: &'a mut Vec<GameEvent>,
    pub rng: &'a mut R,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Milliseconds since the last spawn event; goes negative after tall batches
    pub elapsed_ms: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate time and fire at most one spawn event
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        ctx: &mut SpawnContext<'_, R>,
    ) -> Option<SpawnEvent> {
        let params = DifficultyParams::for_score(ctx.score);
        self.elapsed_ms += dt * 1000.0;
        if self.elapsed_ms < params.interval_ms as f32 {
            return None;
        }
        let event = self.spawn(&params, ctx);
        log::debug!("Spawned {:?} at score {}", event, ctx.score);
        Some(event)
    }

    fn spawn<R: Rng + ?Sized>(
        &mut self,
        params: &DifficultyParams,
        ctx: &mut SpawnContext<'_, R>,
    ) -> SpawnEvent {
        let roll = ctx.rng.random_range(1..=17);
        self.elapsed_ms = 0.0;

        if ctx.player.items.is_charged(PowerUpTrack::FlyingObjects) {
            self.spawn_gem_matrix(ctx);
            ctx.player.items.reset(PowerUpTrack::FlyingObjects);
            ctx.player.lifetime.power_ups_used += 1;
            return SpawnEvent::GemMatrix;
        }

        let t = ctx.tuning;
        let player_pos = ctx.player.pos;
        match roll {
            1..=3 => {
                let enemy = EnemyWithObject::spawn(player_pos, params.thrown, t, ctx.rng);
                ctx.entities.enemies_with_object.spawn(enemy);
                SpawnEvent::EnemyWithObject
            }
            4..=6 => {
                let first = draw_side(ctx.rng);
                let count = params.batch.resolve(ctx.rng);
                self.spawn_obstacles(ctx, first, count, params.obstacle_gap);
                SpawnEvent::Obstacles { first, count }
            }
            7..=9 => {
                ctx.entities.enemies.spawn(Enemy::spawn(player_pos, t, ctx.rng));
                SpawnEvent::Enemy
            }
            10..=12 => {
                let kunai = FlyingEnemy::spawn(player_pos, t, ctx.rng);
                ctx.entities.flying_enemies.spawn(kunai);
                ctx.events.push(GameEvent::Sound(SoundCue::ShurikenThrow));
                SpawnEvent::FlyingEnemy
            }
            13..=15 => {
                let line = match ctx.rng.random_range(1..=14) {
                    1..=5 => GemLine::VerticalLeft,
                    6..=10 => GemLine::VerticalRight,
                    _ => GemLine::Horizontal,
                };
                self.spawn_gem_line(ctx, line);
                SpawnEvent::GemLine(line)
            }
            _ => {
                let enemy = HorizontalEnemy::spawn(player_pos, t, ctx.rng);
                ctx.entities.horizontal_enemies.spawn(enemy);
                SpawnEvent::HorizontalEnemy
            }
        }
    }

    /// Alternating-side obstacles stacked `gap` apart above the spawn line
    fn spawn_obstacles<R: Rng + ?Sized>(
        &mut self,
        ctx: &mut SpawnContext<'_, R>,
        first: Side,
        count: u32,
        gap: f32,
    ) {
        let t = ctx.tuning;
        let mut side = first;
        for i in 0..count {
            let mut obstacle = Obstacle::spawn(ctx.player.pos, side, t);
            if count > 1 {
                self.elapsed_ms -= gap / t.run_speed * 1000.0;
                obstacle.pos.y -= gap * (i + 1) as f32;
                side = side.opposite();
            }
            ctx.entities.obstacles.spawn(obstacle);
        }
    }

    fn spawn_gem_line<R: Rng + ?Sized>(&mut self, ctx: &mut SpawnContext<'_, R>, line: GemLine) {
        let t = ctx.tuning;
        let count: u32 = match line {
            GemLine::Horizontal => 6,
            _ => 5,
        };
        let spacing = horizontal_spacing(t, count);
        let gem_height = Sheet::Gem.spec().frame_height as f32;
        let top = ctx.player.pos.y - t.spawn_distance();
        let start = match line {
            GemLine::VerticalLeft => Vec2::new(t.margin_left(), top),
            GemLine::VerticalRight => Vec2::new(t.margin_right(), top),
            GemLine::Horizontal => Vec2::new(t.wall_width + spacing, top),
        };

        if line != GemLine::Horizontal {
            self.elapsed_ms -= (t.gem_line_spacing + gem_height) / t.run_speed * 1000.0 * count as f32;
        }

        for i in 0..count {
            let offset = match line {
                GemLine::Horizontal => Vec2::new(spacing * i as f32, 0.0),
                _ => Vec2::new(0.0, -(gem_height + t.gem_line_spacing) * i as f32),
            };
            ctx.entities.gems.spawn(Gem::new(start + offset, ctx.player.pos.y));
        }
    }

    fn spawn_gem_matrix<R: Rng + ?Sized>(&mut self, ctx: &mut SpawnContext<'_, R>) {
        const ROWS: u32 = 6;
        const COLUMNS: u32 = 6;

        let t = ctx.tuning;
        let spacing = horizontal_spacing(t, COLUMNS);
        let gem_height = Sheet::Gem.spec().frame_height as f32;
        self.elapsed_ms -= (t.gem_matrix_spacing + gem_height) / t.run_speed * 1000.0 * ROWS as f32;

        let start = Vec2::new(t.wall_width + spacing, ctx.player.pos.y - t.spawn_distance());
        for row in 0..ROWS {
            for column in 0..COLUMNS {
                let pos = start
                    + Vec2::new(spacing * column as f32, -t.gem_matrix_spacing * row as f32);
                ctx.entities.gems.spawn(Gem::new(pos, ctx.player.pos.y));
            }
        }
    }
}

/// Even spacing of `count` gems across the playfield, in whole pixels
fn horizontal_spacing(tuning: &Tuning, count: u32) -> f32 {
    ((tuning.viewport_width - tuning.wall_width * 2.0) / (count + 1) as f32).floor()
}
