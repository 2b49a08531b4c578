//! Game state and stage control
//!
//! `Game` owns every band, the single player record and all per-session
//! counters. The player is repositioned between bands, never re-parented.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::rect::Rect;
use super::world::World;
use crate::hud::format_elapsed;
use crate::tuning::{SpawnerTuning, Tuning, TuningError};

/// The single player record always takes the first id
pub const PLAYER_ID: u32 = 1;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player climbed out of the topmost band (terminal)
    Cleared,
}

/// Named sound cues for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Explosion,
    Powerup,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Explosion => "explosion",
            SoundCue::Powerup => "powerup",
        }
    }
}

/// Things the host may want to react to (sound, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Current band switched
    BandChanged { from: usize, to: usize },
    /// Stage raised
    StageChanged { stage: u32 },
    /// Topmost band escaped
    Cleared,
}

/// Dent in the bounce line left by the last bounce (render-only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BounceImpact {
    pub x: f32,
    pub depth: f32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Game {
    pub tuning: Tuning,
    /// Bands bottom to top
    pub worlds: Vec<World>,
    pub phase: GamePhase,
    pub(crate) current: usize,
    pub(crate) stage: u32,
    pub(crate) player: Player,
    /// Velocity handed to the player on the next bounce
    pub(crate) launch_velocity: f32,
    pub(crate) next_spawn_time: f64,
    pub(crate) start_time: f64,
    pub(crate) impact: BounceImpact,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl Game {
    /// Build a session for the given screen size.
    ///
    /// Fails if the tuning is malformed; nothing is clamped or guessed.
    pub fn new(tuning: Tuning, screen: Vec2, seed: u64, now: f64) -> Result<Self, TuningError> {
        tuning.validate(screen)?;

        let worlds = tuning
            .bands
            .iter()
            .enumerate()
            .map(|(i, band)| {
                let area = Rect::new(0.0, 0.0, band.width_for(screen), band.height);
                // Only the ground band has a floor
                let bounce_line = if i == 0 {
                    area.height - tuning.player.bounce_margin
                } else {
                    0.0
                };
                World::new(area, screen, band.view_scale, bounce_line)
            })
            .collect::<Vec<_>>();

        let ground = worlds[0].area;
        let start = Vec2::new(ground.width / 2.0, ground.height - tuning.player.start_offset);
        let launch_velocity = tuning.impulse(1).bump;

        let mut game = Self {
            tuning,
            worlds,
            phase: GamePhase::Playing,
            current: 0,
            stage: 1,
            player: Player::new(PLAYER_ID, start),
            launch_velocity,
            next_spawn_time: now,
            start_time: now,
            impact: BounceImpact::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            time_ticks: 0,
            next_id: PLAYER_ID + 1,
        };
        game.populate();
        game.schedule_spawn(now);

        log::info!(
            "Session started: seed={}, bands={}, player at ({}, {})",
            seed,
            game.worlds.len(),
            start.x,
            start.y
        );
        Ok(game)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seed every band with its initial hazards
    fn populate(&mut self) {
        for index in 0..self.worlds.len() {
            let band = &self.tuning.bands[index];
            let lane = self.worlds[index].area.inflate(0.0, -band.spawn_margin);
            let initial = band.initial.clone();
            for group in initial {
                for _ in 0..group.count {
                    let pos = lane.random_point(&mut self.rng);
                    let dir = self.random_direction();
                    let id = self.next_entity_id();
                    self.worlds[index].add(Enemy::spawn(id, group.kind, pos, dir, group.speed));
                }
            }
            log::debug!(
                "Band {} '{}' seeded with {} hazards",
                index,
                self.tuning.bands[index].name,
                self.worlds[index].enemies.len()
            );
        }
    }

    pub(crate) fn random_direction(&mut self) -> f32 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }

    /// Spawner of the current band, if it has one
    pub fn current_spawner(&self) -> Option<SpawnerTuning> {
        self.tuning.bands[self.current].spawner
    }

    /// Pick the next spawn time from the current band's interval
    pub(crate) fn schedule_spawn(&mut self, now: f64) {
        self.next_spawn_time = match self.current_spawner() {
            Some(spawner) if spawner.max_interval > spawner.min_interval => {
                now + self
                    .rng
                    .random_range(spawner.min_interval..=spawner.max_interval)
            }
            Some(spawner) => now + spawner.min_interval,
            None => f64::INFINITY,
        };
    }

    /// Charge added to the launch velocity per bounce at the current stage
    #[inline]
    pub fn jump_step(&self) -> f32 {
        self.tuning.impulse(self.stage).jump
    }

    /// Charge and return the bounce velocity for the current stage.
    /// Each consecutive bounce launches higher than the last.
    pub fn jump(&mut self) -> f32 {
        let step = self.jump_step();
        charge_launch(&mut self.launch_velocity, step)
    }

    /// Reset the bounce charge after a hit
    pub fn bump(&mut self) {
        self.launch_velocity = self.tuning.impulse(self.stage).bump;
        self.events.push(GameEvent::Sound(SoundCue::Explosion));
    }

    /// Raise the stage to at least `stage`. Returns true if it changed.
    pub fn raise_stage(&mut self, stage: u32) -> bool {
        if stage <= self.stage {
            return false;
        }
        log::info!("Stage {} -> {}", self.stage, stage);
        self.stage = stage;
        self.events.push(GameEvent::StageChanged { stage });
        self.events.push(GameEvent::Sound(SoundCue::Powerup));
        true
    }

    #[inline]
    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Index of the current band
    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_world(&self) -> &World {
        &self.worlds[self.current]
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn launch_velocity(&self) -> f32 {
        self.launch_velocity
    }

    pub fn next_spawn_time(&self) -> f64 {
        self.next_spawn_time
    }

    pub fn impact(&self) -> BounceImpact {
        self.impact
    }

    /// Bounce line of the current band (0 = no floor)
    pub fn bounce_line(&self) -> f32 {
        self.current_world().bounce_line
    }

    /// Elapsed session time as `M:SS`
    pub fn elapsed_text(&self, now: f64) -> String {
        format_elapsed(now - self.start_time)
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Make `index` the current band, keeping the player inside it
    pub(crate) fn switch_band(&mut self, index: usize, now: f64) {
        let from = self.current;
        self.current = index;
        let x = self.worlds[index].clamp_x(self.player.body.pos.x);
        self.player.body.pos.x = x;
        self.schedule_spawn(now);
        self.events.push(GameEvent::BandChanged { from, to: index });
        log::info!(
            "Band {} -> {} ('{}')",
            from,
            index,
            self.tuning.bands[index].name
        );
    }
}

/// Add one bounce step to `launch_velocity` and return the new value
#[inline]
pub(crate) fn charge_launch(launch_velocity: &mut f32, step: f32) -> f32 {
    *launch_velocity += step;
    *launch_velocity
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(320.0, 240.0);

    #[test]
    fn test_new_session_layout() {
        let game = Game::new(Tuning::default(), SCREEN, 42, 0.0).unwrap();
        assert_eq!(game.worlds.len(), 3);
        assert_eq!(game.current(), 0);
        assert_eq!(game.stage(), 1);
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.player().pos(), Vec2::new(160.0, 900.0));
        assert_eq!(game.bounce_line(), 992.0);
        assert_eq!(game.worlds[1].bounce_line, 0.0);
        assert_eq!(game.worlds[0].enemies.len(), 20);
        assert_eq!(game.worlds[1].enemies.len(), 6);
        assert_eq!(game.launch_velocity(), -12.0);
        assert!(game.next_spawn_time() >= 1.0 && game.next_spawn_time() <= 5.0);
    }

    #[test]
    fn test_ids_unique() {
        let game = Game::new(Tuning::default(), SCREEN, 42, 0.0).unwrap();
        let mut ids: Vec<u32> = game
            .worlds
            .iter()
            .flat_map(|w| w.enemies.iter().map(|e| e.id()))
            .collect();
        assert_eq!(game.player().body.id, PLAYER_ID);
        assert!(ids.iter().all(|&id| id > PLAYER_ID));
        ids.push(game.player().body.id);
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_initial_hazards_inside_lane() {
        let game = Game::new(Tuning::default(), SCREEN, 7, 0.0).unwrap();
        for enemy in &game.worlds[0].enemies {
            let p = enemy.body.pos;
            assert!((0.0..=320.0).contains(&p.x));
            assert!((100.0..=900.0).contains(&p.y));
        }
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let mut tuning = Tuning::default();
        tuning.bands.clear();
        assert!(matches!(
            Game::new(tuning, SCREEN, 1, 0.0),
            Err(TuningError::NoBands)
        ));
    }

    #[test]
    fn test_floorless_ground_rejected() {
        let mut tuning = Tuning::default();
        tuning.player.bounce_margin = 2000.0;
        assert!(matches!(
            Game::new(tuning, SCREEN, 1, 0.0),
            Err(TuningError::BounceMarginOutOfRange { .. })
        ));

        let mut tuning = Tuning::default();
        if let Some(spawner) = tuning.bands[0].spawner.as_mut() {
            spawner.min_interval = f64::NAN;
        }
        assert!(Game::new(tuning, SCREEN, 1, 0.0).is_err());
    }

    #[test]
    fn test_jump_charges_and_bump_resets() {
        let mut game = Game::new(Tuning::default(), SCREEN, 1, 0.0).unwrap();
        assert_eq!(game.jump(), -16.0);
        assert_eq!(game.jump(), -20.0);
        game.bump();
        assert_eq!(game.launch_velocity(), -12.0);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Sound(SoundCue::Explosion)]
        );
        assert!(game.drain_events().is_empty());

        game.raise_stage(2);
        game.bump();
        assert_eq!(game.launch_velocity(), -16.0);
        assert_eq!(game.jump(), -22.0);
    }

    #[test]
    fn test_raise_stage_monotonic() {
        let mut game = Game::new(Tuning::default(), SCREEN, 1, 0.0).unwrap();
        assert!(game.raise_stage(3));
        assert!(!game.raise_stage(2));
        assert_eq!(game.stage(), 3);
    }

    #[test]
    fn test_elapsed_text() {
        let game = Game::new(Tuning::default(), SCREEN, 1, 100.0).unwrap();
        assert_eq!(game.elapsed_text(100.0), "0:00");
        assert_eq!(game.elapsed_text(175.0), "1:15");
    }
}
