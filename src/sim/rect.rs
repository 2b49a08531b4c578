//! Axis-aligned rectangles
//!
//! Screen-style coordinates: x grows right, y grows down. A rectangle is its
//! top-left corner plus a non-negative size.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle, saturating negative sizes to zero
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Rectangle of the given size centered on a point
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, moved by `offset`
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Grow (or shrink, with negative amounts) by `dx`/`dy` on every side.
    /// Shrinking past zero collapses onto the center.
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        let c = self.center();
        let w = (self.width + dx * 2.0).max(0.0);
        let h = (self.height + dy * 2.0).max(0.0);
        Self::centered(c, Vec2::new(w, h))
    }

    /// Closed-interval overlap: touching edges count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Point containment (edges inclusive)
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.x <= p.x && p.x <= self.right() && self.y <= p.y && p.y <= self.bottom()
    }

    /// True if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    /// Move this rectangle the least amount needed to sit inside `bounds`.
    /// If it is larger than `bounds` on an axis it is pinned to the low edge.
    pub fn clamped_inside(&self, bounds: &Rect) -> Self {
        let max_x = (bounds.right() - self.width).max(bounds.x);
        let max_y = (bounds.bottom() - self.height).max(bounds.y);
        Self {
            x: self.x.clamp(bounds.x, max_x),
            y: self.y.clamp(bounds.y, max_y),
            ..*self
        }
    }

    /// Uniformly random point inside the rectangle
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            self.x + rng.random::<f32>() * self.width,
            self.y + rng.random::<f32>() * self.height,
        )
    }
}
