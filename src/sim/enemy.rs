//! Hazards
//!
//! A closed set of variants sharing one record. Motion is a `match` on the
//! variant; the hit counter and its cooldown are common to all of them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::rect::Rect;
use crate::tuning::EnemyTuning;

/// Hazard type as named in tuning files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Patrol,
    StopOnHit,
    MultiHit,
    Projectile,
    Drifting,
    Static,
}

/// Hazard variant with its per-variant motion state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks back and forth across the world
    Patrol { movement: Vec2 },
    /// Vanishes on first contact with the player
    StopOnHit,
    /// Destroyed after a number of hits
    MultiHit,
    /// Flies straight across and leaves
    Projectile { vx: f32 },
    /// Flies across while wandering up and down
    Drifting { vx: f32, vy: f32 },
    /// Never moves, never breaks
    Static,
}

impl EnemyKind {
    pub fn hazard_kind(&self) -> HazardKind {
        match self {
            EnemyKind::Patrol { .. } => HazardKind::Patrol,
            EnemyKind::StopOnHit => HazardKind::StopOnHit,
            EnemyKind::MultiHit => HazardKind::MultiHit,
            EnemyKind::Projectile { .. } => HazardKind::Projectile,
            EnemyKind::Drifting { .. } => HazardKind::Drifting,
            EnemyKind::Static => HazardKind::Static,
        }
    }
}

/// A hazard entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    /// Counted hits (never decreases)
    pub hit_count: u32,
    /// Time of the last counted hit
    pub last_hit_time: Option<f64>,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, kind: EnemyKind) -> Self {
        let mut body = Body::new(id, pos);
        match &kind {
            EnemyKind::Patrol { movement } => body.face(movement.x),
            EnemyKind::Projectile { vx } | EnemyKind::Drifting { vx, .. } => body.face(*vx),
            _ => {}
        }
        Self {
            body,
            kind,
            hit_count: 0,
            last_hit_time: None,
        }
    }

    /// Build a hazard of the given kind heading in `dir` (±1) at `speed`
    pub fn spawn(id: u32, kind: HazardKind, pos: Vec2, dir: f32, speed: f32) -> Self {
        let vx = dir * speed;
        let kind = match kind {
            HazardKind::Patrol => EnemyKind::Patrol {
                movement: Vec2::new(vx, 0.0),
            },
            HazardKind::StopOnHit => EnemyKind::StopOnHit,
            HazardKind::MultiHit => EnemyKind::MultiHit,
            HazardKind::Projectile => EnemyKind::Projectile { vx },
            HazardKind::Drifting => EnemyKind::Drifting { vx, vy: 0.0 },
            HazardKind::Static => EnemyKind::Static,
        };
        Self::new(id, pos, kind)
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.body.id
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    /// Hits after which this hazard is destroyed, if any
    pub fn hit_limit(&self, tuning: &EnemyTuning) -> Option<u32> {
        match self.kind {
            EnemyKind::Patrol { .. } | EnemyKind::StopOnHit => Some(1),
            EnemyKind::MultiHit => Some(tuning.multi_hit_threshold),
            _ => None,
        }
    }

    /// Advance one tick inside `area`
    pub fn update(&mut self, area: &Rect, tuning: &EnemyTuning, rng: &mut impl Rng) {
        match &mut self.kind {
            EnemyKind::Patrol { movement } => {
                self.body.move_by(*movement);
                let x = self.body.pos.x;
                // Turn only once past the edge we are heading toward
                if (x < area.x && movement.x < 0.0) || (area.right() < x && movement.x > 0.0) {
                    movement.x = -movement.x;
                }
                self.body.face(movement.x);
            }
            EnemyKind::Projectile { vx } => {
                self.body.move_by(Vec2::new(*vx, 0.0));
                if !self.body.world_collider().overlaps(area) {
                    self.body.stop();
                }
            }
            EnemyKind::Drifting { vx, vy } => {
                if rng.random_bool(tuning.drift_reroll_chance) {
                    *vy = rng.random_range(-1..=1) as f32;
                }
                self.body.move_by(Vec2::new(*vx, *vy));
                if !self.body.world_collider().overlaps(area) {
                    self.body.stop();
                }
            }
            EnemyKind::StopOnHit | EnemyKind::MultiHit | EnemyKind::Static => {}
        }
    }

    /// React to touching the player at time `now`.
    ///
    /// Returns true if the hit was counted. Hits inside the cooldown window
    /// of the previous counted hit are ignored, so one long overlap counts once.
    pub fn on_player_collided(&mut self, now: f64, tuning: &EnemyTuning) -> bool {
        if let Some(last) = self.last_hit_time {
            if now - last < tuning.hit_cooldown {
                return false;
            }
        }
        self.hit_count += 1;
        self.last_hit_time = Some(now);

        let limit = self.hit_limit(tuning);
        if limit.is_some_and(|limit| self.hit_count >= limit) {
            log::debug!(
                "Hazard {} ({:?}) destroyed after {} hits",
                self.body.id,
                self.kind.hazard_kind(),
                self.hit_count
            );
            self.body.stop();
        }
        true
    }
}
