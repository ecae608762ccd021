//! Axis-aligned bounding box collision
//!
//! Sprites collide on their full laid-out boxes; transparent pixels inside a
//! sprite still count as solid.

use glam::Vec2;

/// An axis-aligned rectangle in play-area pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its top-left corner and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Overlap test; shared edges count as touching
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_collide(self, other)
    }
}

/// True unless the rectangles are separated along some axis
#[inline]
pub fn rects_collide(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.left()
        || a.left() > b.right()
        || a.bottom() < b.top()
        || a.top() > b.bottom())
}
