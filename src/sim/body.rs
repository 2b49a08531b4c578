//! Shared entity record
//!
//! Every moving thing (player and hazards) carries a `Body`: where it is,
//! which way it faces, and the local collider used for overlap tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::SPRITE_SIZE;

/// Position, facing and collider of an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    /// Facing multiplier, ±1 per axis (sprite flip)
    pub scale: Vec2,
    /// Collider relative to `pos`
    pub collider: Rect,
    /// Cleared when the entity should leave its world; the world sweeps it
    /// out at the end of the tick.
    pub alive: bool,
}

impl Body {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            scale: Vec2::ONE,
            collider: sprite_bounds(),
            alive: true,
        }
    }

    /// Collider in world coordinates
    pub fn world_collider(&self) -> Rect {
        self.collider.translate(self.pos)
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Face left or right; a zero direction keeps the current facing
    pub fn face(&mut self, dx: f32) {
        if dx != 0.0 {
            self.scale = Vec2::new(crate::sign(dx), 1.0);
        }
    }

    /// Mark for removal at the next sweep
    pub fn stop(&mut self) {
        self.alive = false;
    }
}

/// Collider of a single sprite cell anchored at its center
pub fn sprite_bounds() -> Rect {
    Rect::new(
        -SPRITE_SIZE / 2.0,
        -SPRITE_SIZE / 2.0,
        SPRITE_SIZE,
        SPRITE_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_collider_follows_position() {
        let mut body = Body::new(1, Vec2::new(100.0, 50.0));
        assert_eq!(body.world_collider(), Rect::new(92.0, 42.0, 16.0, 16.0));
        body.move_by(Vec2::new(-10.0, 5.0));
        assert_eq!(body.world_collider(), Rect::new(82.0, 47.0, 16.0, 16.0));
    }

    #[test]
    fn test_face_ignores_zero() {
        let mut body = Body::new(1, Vec2::ZERO);
        body.face(-3.0);
        assert_eq!(body.scale, Vec2::new(-1.0, 1.0));
        body.face(0.0);
        assert_eq!(body.scale, Vec2::new(-1.0, 1.0));
    }
}
