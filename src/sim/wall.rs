//! Side walls and background parallax layers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Side;
use crate::tuning::Tuning;

/// One side wall: slides in from off screen, then scrolls two stacked tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub side: Side,
    pub x: f32,
    target_x: f32,
    pub finished: bool,
    pub scroll_speed: f32,
    /// Screen-space y of the two vertically tiled textures
    pub tiles: [f32; 2],
}

impl Wall {
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        let (x, target_x) = match side {
            Side::Left => (-tuning.wall_width, 0.0),
            Side::Right => (
                tuning.viewport_width,
                tuning.viewport_width - tuning.wall_width,
            ),
        };
        Self {
            side,
            x,
            target_x,
            finished: false,
            scroll_speed: tuning.run_speed,
            tiles: [-tuning.viewport_height, 0.0],
        }
    }

    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        if !self.finished {
            let step = tuning.wall_slide_speed * dt;
            match self.side {
                Side::Left => {
                    self.x += step;
                    if self.x >= self.target_x {
                        self.x = self.target_x;
                        self.finished = true;
                    }
                }
                Side::Right => {
                    self.x -= step;
                    if self.x <= self.target_x {
                        self.x = self.target_x;
                        self.finished = true;
                    }
                }
            }
            return;
        }

        for tile in &mut self.tiles {
            *tile += self.scroll_speed * dt;
            if *tile > tuning.viewport_height {
                *tile = -tuning.viewport_height;
            }
        }
    }
}

/// Scroll axis of a background layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scroll {
    Horizontal,
    Vertical,
}

/// Background layers, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Static,
    Castle,
    Mountain1,
    Mountain2,
    Mist1,
    Mist2,
}

impl LayerKind {
    pub const ALL: [LayerKind; 6] = [
        LayerKind::Static,
        LayerKind::Castle,
        LayerKind::Mountain2,
        LayerKind::Mountain1,
        LayerKind::Mist1,
        LayerKind::Mist2,
    ];

    /// Mist drifts even while the game is paused or not yet started
    pub fn is_ambient(self) -> bool {
        matches!(self, LayerKind::Mist1 | LayerKind::Mist2)
    }

    fn motion(self) -> (f32, Scroll) {
        match self {
            LayerKind::Static => (0.0, Scroll::Vertical),
            LayerKind::Castle => (12.0, Scroll::Vertical),
            LayerKind::Mountain1 => (9.0, Scroll::Vertical),
            LayerKind::Mountain2 => (7.0, Scroll::Vertical),
            LayerKind::Mist1 => (50.0, Scroll::Horizontal),
            LayerKind::Mist2 => (-60.0, Scroll::Horizontal),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub pos: Vec2,
    pub speed: f32,
    pub scroll: Scroll,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        let (speed, scroll) = kind.motion();
        Self {
            kind,
            pos: Vec2::ZERO,
            speed,
            scroll,
        }
    }

    /// All layers in draw order
    pub fn background() -> Vec<Layer> {
        LayerKind::ALL.iter().map(|&k| Layer::new(k)).collect()
    }

    pub fn update(&mut self, dt: f32, viewport_width: f32) {
        match self.scroll {
            Scroll::Vertical => self.pos.y += self.speed * dt,
            Scroll::Horizontal => {
                self.pos.x += self.speed * dt;
                if self.pos.x >= viewport_width {
                    self.pos.x -= viewport_width;
                } else if self.pos.x <= -viewport_width {
                    self.pos.x += viewport_width;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_walls_slide_in_and_snap() {
        let t = Tuning::default();
        let mut left = Wall::new(Side::Left, &t);
        let mut right = Wall::new(Side::Right, &t);
        let mut ticks = 0;
        while !(left.finished && right.finished) {
            left.update(SIM_DT, &t);
            right.update(SIM_DT, &t);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(left.x, 0.0);
        assert_eq!(right.x, t.viewport_width - t.wall_width);
        // 64 px at 100 px/s
        assert!((38..=40).contains(&ticks));
    }

    #[test]
    fn test_tiles_only_scroll_once_finished() {
        let t = Tuning::default();
        let mut wall = Wall::new(Side::Left, &t);
        wall.update(SIM_DT, &t);
        assert_eq!(wall.tiles, [-t.viewport_height, 0.0]);

        wall.finished = true;
        wall.update(SIM_DT, &t);
        assert!(wall.tiles[1] > 0.0);
    }

    #[test]
    fn test_tile_wraps_past_bottom() {
        let t = Tuning::default();
        let mut wall = Wall::new(Side::Right, &t);
        wall.finished = true;
        wall.tiles = [0.0, t.viewport_height - 1.0];
        wall.update(SIM_DT, &t);
        assert_eq!(wall.tiles[1], -t.viewport_height);
        assert!(wall.tiles[0] > 0.0);
    }

    #[test]
    fn test_mist_wraps_both_ways() {
        let mut mist = Layer::new(LayerKind::Mist1);
        mist.pos.x = 479.5;
        mist.update(SIM_DT, 480.0);
        assert!(mist.pos.x >= 0.0 && mist.pos.x < 1.0);

        let mut mist = Layer::new(LayerKind::Mist2);
        mist.pos.x = -479.5;
        mist.update(SIM_DT, 480.0);
        assert!(mist.pos.x > -1.0 && mist.pos.x <= 0.0);
    }

    #[test]
    fn test_static_layer_never_moves() {
        let mut layer = Layer::new(LayerKind::Static);
        for _ in 0..100 {
            layer.update(SIM_DT, 480.0);
        }
        assert_eq!(layer.pos, Vec2::ZERO);
    }
}
