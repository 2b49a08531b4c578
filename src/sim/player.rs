//! Player motion and bounce state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::rect::Rect;
use crate::tuning::PlayerTuning;
use crate::{sign, upper_bound};

/// How horizontal movement is steered. Only one mode is ever active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HorizontalControl {
    /// Keyboard / d-pad velocity
    Direct(f32),
    /// Pointer / touch target x (world coordinates)
    Goal(f32),
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Horizontal velocity chosen on the last tick
    pub vx: f32,
    pub vy: f32,
    pub control: HorizontalControl,
    /// Hit by a hazard and not yet recovered by a bounce
    pub falling: bool,
}

impl Player {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            body: Body::new(id, pos),
            vx: 0.0,
            vy: 0.0,
            control: HorizontalControl::Direct(0.0),
            falling: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Steer with a direct velocity (drops any pending goal)
    pub fn set_move(&mut self, vx: f32) {
        self.control = HorizontalControl::Direct(vx);
    }

    /// Steer toward a target x (drops any direct velocity)
    pub fn set_goal(&mut self, x: f32) {
        self.control = HorizontalControl::Goal(x);
    }

    /// Horizontal velocity wanted this tick
    pub fn desired_vx(&self, dead_zone: f32) -> f32 {
        match self.control {
            HorizontalControl::Direct(vx) => vx,
            HorizontalControl::Goal(gx) => {
                let vx = gx - self.body.pos.x;
                if vx.abs() < dead_zone { 0.0 } else { vx }
            }
        }
    }

    /// Terminal fall speed for the current state
    pub fn max_vy(&self, tuning: &PlayerTuning) -> f32 {
        if self.falling {
            tuning.falling_max_vy
        } else {
            tuning.nominal_max_vy
        }
    }

    /// Advance one tick.
    ///
    /// `bounce_line` is the current band's floor (0 = none). When the
    /// projected position reaches it the player is reflected about the line
    /// and `jump` supplies the new vertical velocity. Returns true on bounce.
    pub fn update(
        &mut self,
        area: &Rect,
        bounce_line: f32,
        tuning: &PlayerTuning,
        jump: impl FnOnce() -> f32,
    ) -> bool {
        let vx = self.desired_vx(tuning.dead_zone);
        self.vx = vx;
        if vx != 0.0 {
            self.body.face(vx);
            let x = self.body.pos.x + sign(vx) * tuning.step;
            self.body.pos.x = x.clamp(area.x, area.right());
        }

        self.vy = upper_bound(self.vy + tuning.gravity, self.max_vy(tuning));

        let yy = bounce_line;
        let projected = self.body.pos.y + self.vy;
        if yy > 0.0 && projected >= yy {
            self.body.pos.y = reflect_about(projected, yy);
            self.vy = jump();
            self.falling = false;
            true
        } else {
            self.body.pos.y = projected;
            false
        }
    }

    /// React to touching a hazard. Returns true if this starts a fall
    /// (already-falling players are not knocked again).
    pub fn on_enemy_collided(&mut self) -> bool {
        if self.falling {
            return false;
        }
        self.falling = true;
        self.vy = 0.0;
        true
    }
}

/// Mirror a projected coordinate about a line, keeping the overshoot
#[inline]
pub fn reflect_about(projected: f32, line: f32) -> f32 {
    line - (projected - line)
}
