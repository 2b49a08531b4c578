//! Skyhop - A vertical band-hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, band staging)
//! - `tuning`: Data-driven game balance
//! - `hud`: Text shown over the playfield

pub mod hud;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Gravity added to the player's vertical velocity every tick
    pub const GRAVITY: f32 = 1.0;
    /// Horizontal distance the player covers per tick while steering
    pub const PLAYER_STEP: f32 = 4.0;
    /// Goal-seeking ignores offsets smaller than this (stops jitter from touch noise)
    pub const GOAL_DEAD_ZONE: f32 = 8.0;
    /// Terminal fall speed after being hit (slow "flutter")
    pub const FALLING_MAX_VY: f32 = 8.0;
    /// Terminal fall speed otherwise
    pub const NOMINAL_MAX_VY: f32 = 16.0;
    /// Bounce line sits this far above the ground band's bottom edge
    pub const BOUNCE_MARGIN: f32 = 8.0;
    /// Player starts this far above the ground band's bottom edge
    pub const PLAYER_START_OFFSET: f32 = 100.0;
    /// Speed applied to a unit direction input
    pub const PLAYER_MOVE_SPEED: f32 = 1.0;

    /// Hits closer together than this (time units) count once
    pub const HIT_COOLDOWN: f64 = 1.0;
    /// Hits a MultiHit hazard takes before it is destroyed
    pub const MULTI_HIT_THRESHOLD: u32 = 3;
    /// Per-tick chance a drifting hazard re-rolls its vertical velocity
    pub const DRIFT_REROLL_CHANCE: f64 = 0.1;

    /// Depth of the bounce line dent right after a bounce
    pub const IMPACT_DEPTH: f32 = 8.0;

    /// Default ground band height
    pub const GROUND_BAND_HEIGHT: f32 = 1000.0;
    /// Default sprite cell size
    pub const SPRITE_SIZE: f32 = 16.0;
}

/// Sign of a value as -1, 0 or +1
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Cap a value from above
#[inline]
pub fn upper_bound(v: f32, max: f32) -> f32 {
    v.min(max)
}

/// Cap a value from below
#[inline]
pub fn lower_bound(min: f32, v: f32) -> f32 {
    v.max(min)
}
