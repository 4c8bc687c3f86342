//! Integer bounding boxes for hit detection
//!
//! Boxes are axis-aligned with y growing downward. Positions are truncated to
//! whole pixels before building a box so that results do not depend on
//! sub-pixel drift.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size anchored at its top-left corner
    pub fn from_top_left(pos: Vec2, width: i32, height: i32) -> Self {
        Self::new(pos.x as i32, pos.y as i32, width, height)
    }

    /// Box of the given size centred on `pos`
    pub fn centered(pos: Vec2, width: i32, height: i32) -> Self {
        Self::new(
            pos.x as i32 - width / 2,
            pos.y as i32 - height / 2,
            width,
            height,
        )
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Grow (or shrink, with negative amounts) by the given amount on every side
    pub fn inflate(self, horizontal: i32, vertical: i32) -> Self {
        Self::new(
            self.x - horizontal,
            self.y - vertical,
            self.width + horizontal * 2,
            self.height + vertical * 2,
        )
    }

    /// Strict overlap test; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let (x, y) = (point.x as i32, point.y as i32);
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_box() {
        let r = Rect::centered(Vec2::new(100.0, 200.0), 32, 32);
        assert_eq!(r, Rect::new(84, 184, 32, 32));
    }

    #[test]
    fn test_inflate_shrinks() {
        let r = Rect::new(0, 0, 92, 92).inflate(-20, -20);
        assert_eq!(r, Rect::new(20, 20, 52, 52));
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        assert!(a.intersects(&Rect::new(-5, -5, 30, 30)));
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
    }
}
