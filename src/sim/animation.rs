//! Frame-timed sprite-sheet stepping
//!
//! The simulation never draws, but several rules hang off animation timing
//! (one-shot collision bursts expire when their last frame plays) and every
//! hit box is sized from a sheet's frame. Sheets are a fixed table so a lookup
//! can never miss.

use serde::{Deserialize, Serialize};

/// Every sprite sheet the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sheet {
    PlayerRun,
    PlayerJump,
    PlayerFall,
    PlayerIdleFall,
    Rocketship,
    Shield,
    EnemyRun,
    NinjaStar,
    Gem,
    HorizontalEnemy,
    Kunai,
    ObstacleCollision,
}

/// Static description of a sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSpec {
    pub frames: u32,
    pub repeat: bool,
    pub frame_ms: u32,
    pub frame_width: i32,
    pub frame_height: i32,
    pub scale: f32,
}

impl Sheet {
    pub const fn spec(self) -> SheetSpec {
        const fn s(frames: u32, repeat: bool, frame_ms: u32, w: i32, h: i32, scale: f32) -> SheetSpec {
            SheetSpec {
                frames,
                repeat,
                frame_ms,
                frame_width: w,
                frame_height: h,
                scale,
            }
        }
        match self {
            Sheet::PlayerRun => s(6, true, 70, 250, 250, 0.37),
            Sheet::PlayerJump => s(1, true, 170, 250, 250, 0.37),
            Sheet::PlayerFall => s(4, true, 80, 250, 250, 0.37),
            Sheet::PlayerIdleFall => s(6, false, 100, 250, 250, 0.37),
            Sheet::Rocketship => s(1, true, 30, 100, 150, 1.5),
            Sheet::Shield => s(1, true, 60, 80, 80, 1.3),
            Sheet::EnemyRun => s(1, true, 60, 250, 250, 0.30),
            Sheet::NinjaStar => s(5, true, 20, 30, 30, 1.5),
            Sheet::Gem => s(1, true, 30, 32, 32, 1.35),
            Sheet::HorizontalEnemy => s(10, true, 60, 64, 64, 1.5),
            Sheet::Kunai => s(1, true, 60, 70, 70, 1.0),
            Sheet::ObstacleCollision => s(12, false, 60, 134, 134, 1.0),
        }
    }
}

impl SheetSpec {
    pub fn scaled_width(&self) -> i32 {
        (self.frame_width as f32 * self.scale) as i32
    }

    pub fn scaled_height(&self) -> i32 {
        (self.frame_height as f32 * self.scale) as i32
    }
}

/// A running instance of a sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub sheet: Sheet,
    pub frame: u32,
    elapsed_ms: u32,
    pub active: bool,
}

impl Animation {
    pub fn new(sheet: Sheet) -> Self {
        Self {
            sheet,
            frame: 0,
            elapsed_ms: 0,
            active: true,
        }
    }

    pub fn spec(&self) -> SheetSpec {
        self.sheet.spec()
    }

    /// Advance by `dt` seconds. Whole milliseconds only, one frame per call at most.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let spec = self.spec();
        self.elapsed_ms += (dt * 1000.0) as u32;
        if self.elapsed_ms >= spec.frame_ms {
            self.frame += 1;
            self.elapsed_ms = 0;
            if self.frame == spec.frames {
                if spec.repeat {
                    self.frame = 0;
                } else {
                    self.active = false;
                }
            }
        }
    }

    /// Switch to another sheet, restarting only if it actually changed
    pub fn play(&mut self, sheet: Sheet) {
        if self.sheet != sheet {
            *self = Self::new(sheet);
        }
    }
}
