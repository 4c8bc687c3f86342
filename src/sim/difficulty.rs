//! Score-driven difficulty curve
//!
//! Everything here is a pure function of the score. Tiers are tested in order
//! and the first match wins; the 3501..=4000 tier sits behind the wider
//! 3501..=4500 tier and is never reached.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::ThrowCount;

/// How many obstacles an obstacle spawn places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchSize {
    Fixed(u32),
    /// 2, 3 or 4 with weights 3:3:2, drawn per spawn
    Random,
}

impl BatchSize {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        match self {
            BatchSize::Fixed(n) => n,
            BatchSize::Random => match rng.random_range(1..=8) {
                1..=3 => 2,
                4..=6 => 3,
                _ => 4,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Milliseconds between spawn events
    pub interval_ms: u32,
    pub batch: BatchSize,
    /// Vertical distance between obstacles of one batch
    pub obstacle_gap: f32,
    pub thrown: ThrowCount,
}

#[allow(unreachable_patterns)]
fn interval_ms(score: u32) -> u32 {
    match score {
        0..=400 => 2000,
        401..=799 => 1500,
        800..=1500 => 1200,
        1501..=2500 => 1000,
        2501..=3500 => 800,
        3501..=4500 => 700,
        3501..=4000 => 600,
        4501..=5000 => 700,
        5001..=6000 => 600,
        6001..=7000 => 500,
        _ => 400,
    }
}

impl DifficultyParams {
    pub fn for_score(score: u32) -> Self {
        let batch = match score {
            0..=799 => BatchSize::Fixed(1),
            800..=2500 => BatchSize::Fixed(2),
            2501..=4000 => BatchSize::Fixed(3),
            _ => BatchSize::Random,
        };
        Self {
            interval_ms: interval_ms(score),
            batch,
            obstacle_gap: if score >= 800 { 250.0 } else { 0.0 },
            thrown: if score > 1500 {
                ThrowCount::Two
            } else {
                ThrowCount::One
            },
        }
    }
}
