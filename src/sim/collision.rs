//! Axis-aligned box collision shared by both games
//!
//! Screen coordinates: y grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Insets;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Box with its top-left corner at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.x + size.x, pos.y, pos.y + size.y)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Shrink each edge toward the centre
    pub fn inset(&self, insets: &Insets) -> Self {
        Self::new(
            self.left + insets.left,
            self.right - insets.right,
            self.top + insets.top,
            self.bottom - insets.bottom,
        )
    }

    /// Grow horizontally (tolerance margin against tunneling)
    pub fn inflate_x(&self, left: f32, right: f32) -> Self {
        Self::new(self.left - left, self.right + right, self.top, self.bottom)
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 10.0, 0.0, 10.0);
        let b = Rect::new(5.0, 15.0, 5.0, 15.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 10.0, 0.0, 10.0);
        let right = Rect::new(10.0, 20.0, 0.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Rect::new(0.0, 10.0, 0.0, 10.0);
        // Same columns, different rows
        let b = Rect::new(0.0, 10.0, 50.0, 60.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_inset() {
        let body = Rect::from_pos_size(Vec2::new(50.0, 100.0), Vec2::splat(40.0));
        let hit = body.inset(&Insets {
            left: 5.0,
            right: 5.0,
            top: 10.0,
            bottom: 35.0,
        });
        assert_eq!(hit, Rect::new(55.0, 85.0, 110.0, 105.0));
    }

    #[test]
    fn test_inflate_catches_near_miss() {
        let paddle = Rect::new(10.0, 20.0, 0.0, 100.0);
        let ball = Rect::new(20.5, 35.5, 40.0, 55.0);
        assert!(!ball.overlaps(&paddle));
        assert!(ball.overlaps(&paddle.inflate_x(0.0, 1.0)));
    }
}
