//! A world band: bounded area, camera window and the hazards inside it

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::rect::Rect;
use crate::tuning::EnemyTuning;

/// One vertical band of the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Band extent in band-local coordinates (origin at the top-left)
    pub area: Rect,
    /// Camera viewport, always inside `area` after `set_center`
    pub window: Rect,
    /// Floor the player bounces on (0 = no floor)
    pub bounce_line: f32,
    /// Hazards, in spawn (id) order
    pub enemies: Vec<Enemy>,
}

impl World {
    /// Create a band whose window is the screen size times `view_scale`
    pub fn new(area: Rect, screen: Vec2, view_scale: f32, bounce_line: f32) -> Self {
        let window = Rect::new(area.x, area.y, screen.x * view_scale, screen.y * view_scale);
        Self {
            area,
            window: window.clamped_inside(&area),
            bounce_line,
            enemies: Vec::new(),
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.area.height
    }

    pub fn add(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    /// Tick every live hazard
    pub fn update(&mut self, tuning: &EnemyTuning, rng: &mut impl Rng) {
        let area = self.area;
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            enemy.update(&area, tuning, rng);
        }
    }

    /// Drop hazards stopped during this tick. Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.is_alive());
        before - self.enemies.len()
    }

    /// Center the window on `target`, then pull it back inside the area
    pub fn set_center(&mut self, target: Vec2) {
        self.window = Rect::centered(target, self.window.size()).clamped_inside(&self.area);
    }

    /// Clamp an x coordinate into the band's horizontal extent
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.area.x, self.area.right())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{EnemyKind, HazardKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> World {
        World::new(
            Rect::new(0.0, 0.0, 320.0, 1000.0),
            Vec2::new(320.0, 240.0),
            1.0,
            992.0,
        )
    }

    #[test]
    fn test_window_sized_from_screen() {
        let w = world();
        assert_eq!(w.window, Rect::new(0.0, 0.0, 320.0, 240.0));

        let zoomed = World::new(
            Rect::new(0.0, 0.0, 640.0, 2000.0),
            Vec2::new(320.0, 240.0),
            2.0,
            0.0,
        );
        assert_eq!(zoomed.window.size(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_set_center_clamps_at_edges() {
        let mut w = world();
        w.set_center(Vec2::new(160.0, 500.0));
        assert_eq!(w.window.y, 380.0);

        w.set_center(Vec2::new(0.0, 990.0));
        assert_eq!(w.window, Rect::new(0.0, 760.0, 320.0, 240.0));

        w.set_center(Vec2::new(400.0, -50.0));
        assert_eq!(w.window, Rect::new(0.0, 0.0, 320.0, 240.0));
        assert!(w.area.contains_rect(&w.window));
    }

    #[test]
    fn test_sweep_is_deferred() {
        let tuning = EnemyTuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut w = world();
        w.add(Enemy::spawn(1, HazardKind::Projectile, Vec2::new(330.0, 10.0), 1.0, 4.0));
        w.add(Enemy::new(2, Vec2::new(100.0, 10.0), EnemyKind::Static));

        w.update(&tuning, &mut rng);
        // Stopped but still present until the sweep
        assert_eq!(w.enemies.len(), 2);
        assert!(!w.enemies[0].is_alive());

        assert_eq!(w.sweep(), 1);
        assert_eq!(w.enemies.len(), 1);
        assert_eq!(w.enemies[0].id(), 2);
    }
}
