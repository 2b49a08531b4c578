//! Data-driven game balance
//!
//! Everything a designer may want to tweak: player physics, hazard rules,
//! the band layout and the per-stage impulse table. Loaded from JSON and
//! validated up front; a bad file is rejected before any world is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::enemy::HazardKind;

/// Configuration problems detected at session start
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("at least one band is required")]
    NoBands,
    #[error("band {index} height {height} must be positive and finite")]
    NonPositiveBandHeight { index: usize, height: f32 },
    #[error("band {index} width {width} must be positive and finite")]
    NonPositiveBandWidth { index: usize, width: f32 },
    #[error("band {index} view scale {scale} must be positive and finite")]
    NonPositiveViewScale { index: usize, scale: f32 },
    #[error("band {index} spawn margin {margin} must be finite and not negative")]
    InvalidSpawnMargin { index: usize, margin: f32 },
    #[error("band {index} spawn interval {min}..{max} has a negative or non-finite bound")]
    InvalidSpawnInterval { index: usize, min: f64, max: f64 },
    #[error("band {index} spawn interval {min}..{max} is inverted")]
    InvertedSpawnInterval { index: usize, min: f64, max: f64 },
    #[error("band {index} hazard speed {speed} must be finite")]
    InvalidHazardSpeed { index: usize, speed: f32 },
    #[error("band {index} window {window_width}x{window_height} does not fit its area {area_width}x{area_height}")]
    WindowExceedsArea {
        index: usize,
        window_width: f32,
        window_height: f32,
        area_width: f32,
        area_height: f32,
    },
    #[error("player {field} must be positive and finite (got {value})")]
    InvalidPlayerValue { field: &'static str, value: f32 },
    #[error("bounce margin {margin} must lie strictly inside the ground band height {height}")]
    BounceMarginOutOfRange { margin: f32, height: f32 },
    #[error("start offset {offset} must place the player between the bounce line and the top of the ground band (height {height})")]
    StartOutsideGround { offset: f32, height: f32 },
    #[error("impulse table must have at least one stage")]
    EmptyImpulseTable,
    #[error("impulse for stage {stage} must be finite")]
    NonFiniteImpulse { stage: usize },
    #[error("multi-hit threshold must be at least 1")]
    ZeroHitThreshold,
    #[error("hit cooldown must be finite and not negative (got {0})")]
    InvalidCooldown(f64),
    #[error("drift re-roll chance {0} is outside 0..=1")]
    InvalidChance(f64),
    #[error("screen size {width}x{height} must be positive")]
    InvalidScreen { width: f32, height: f32 },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player physics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub gravity: f32,
    pub step: f32,
    pub dead_zone: f32,
    pub falling_max_vy: f32,
    pub nominal_max_vy: f32,
    pub bounce_margin: f32,
    pub start_offset: f32,
    pub move_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            step: PLAYER_STEP,
            dead_zone: GOAL_DEAD_ZONE,
            falling_max_vy: FALLING_MAX_VY,
            nominal_max_vy: NOMINAL_MAX_VY,
            bounce_margin: BOUNCE_MARGIN,
            start_offset: PLAYER_START_OFFSET,
            move_speed: PLAYER_MOVE_SPEED,
        }
    }
}

/// Rules shared by all hazards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub hit_cooldown: f64,
    pub multi_hit_threshold: u32,
    pub drift_reroll_chance: f64,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            hit_cooldown: HIT_COOLDOWN,
            multi_hit_threshold: MULTI_HIT_THRESHOLD,
            drift_reroll_chance: DRIFT_REROLL_CHANCE,
        }
    }
}

/// Periodic hazard spawner for one band
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnerTuning {
    pub kind: HazardKind,
    /// Shortest wait between spawns (time units)
    pub min_interval: f64,
    /// Longest wait between spawns (time units)
    pub max_interval: f64,
    /// Horizontal speed of spawned hazards
    pub speed: f32,
}

/// Hazards placed when the session starts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HazardCount {
    pub kind: HazardKind,
    pub count: u32,
    /// Horizontal speed for moving kinds
    #[serde(default = "default_initial_speed")]
    pub speed: f32,
}

fn default_initial_speed() -> f32 {
    1.0
}

/// One vertical band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandTuning {
    pub name: String,
    pub height: f32,
    /// Defaults to the screen width
    #[serde(default)]
    pub width: Option<f32>,
    /// Camera window = screen size * view_scale
    #[serde(default = "default_view_scale")]
    pub view_scale: f32,
    /// Keep spawns this far from the band's top and bottom edges
    #[serde(default)]
    pub spawn_margin: f32,
    #[serde(default)]
    pub spawner: Option<SpawnerTuning>,
    #[serde(default)]
    pub initial: Vec<HazardCount>,
}

fn default_view_scale() -> f32 {
    1.0
}

impl BandTuning {
    /// Band width for a given screen
    pub fn width_for(&self, screen: Vec2) -> f32 {
        self.width.unwrap_or(screen.x)
    }
}

/// Launch velocities for one stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageImpulse {
    /// Added to the charged launch velocity on every bounce
    pub jump: f32,
    /// Launch velocity the charge resets to after a hit
    pub bump: f32,
}

/// Complete game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    /// Bands bottom to top; the first is the ground band
    pub bands: Vec<BandTuning>,
    /// Indexed by stage - 1; later stages reuse the last row
    pub impulses: Vec<StageImpulse>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            bands: vec![
                BandTuning {
                    name: "sea".to_string(),
                    height: GROUND_BAND_HEIGHT,
                    width: None,
                    view_scale: 1.0,
                    spawn_margin: PLAYER_START_OFFSET,
                    spawner: Some(SpawnerTuning {
                        kind: HazardKind::Patrol,
                        min_interval: 1.0,
                        max_interval: 5.0,
                        speed: 1.0,
                    }),
                    initial: vec![
                        HazardCount {
                            kind: HazardKind::Patrol,
                            count: 10,
                            speed: 1.0,
                        },
                        HazardCount {
                            kind: HazardKind::StopOnHit,
                            count: 10,
                            speed: 0.0,
                        },
                    ],
                },
                BandTuning {
                    name: "sky".to_string(),
                    height: GROUND_BAND_HEIGHT * 2.0,
                    width: None,
                    view_scale: 1.0,
                    spawn_margin: SPRITE_SIZE,
                    spawner: Some(SpawnerTuning {
                        kind: HazardKind::Projectile,
                        min_interval: 2.0,
                        max_interval: 10.0,
                        speed: 2.0,
                    }),
                    initial: vec![HazardCount {
                        kind: HazardKind::MultiHit,
                        count: 6,
                        speed: 0.0,
                    }],
                },
                BandTuning {
                    name: "space".to_string(),
                    height: GROUND_BAND_HEIGHT * 3.0,
                    width: None,
                    view_scale: 1.0,
                    spawn_margin: SPRITE_SIZE,
                    spawner: Some(SpawnerTuning {
                        kind: HazardKind::Drifting,
                        min_interval: 2.0,
                        max_interval: 10.0,
                        speed: 2.0,
                    }),
                    initial: vec![HazardCount {
                        kind: HazardKind::Static,
                        count: 8,
                        speed: 0.0,
                    }],
                },
            ],
            impulses: vec![
                StageImpulse {
                    jump: -4.0,
                    bump: -12.0,
                },
                StageImpulse {
                    jump: -6.0,
                    bump: -16.0,
                },
                StageImpulse {
                    jump: -8.0,
                    bump: -20.0,
                },
            ],
        }
    }
}

impl Tuning {
    /// Parse a tuning file. Missing fields take their defaults; call
    /// `validate` once the screen size is known.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Impulse row for a 1-based stage
    pub fn impulse(&self, stage: u32) -> StageImpulse {
        let idx = (stage.max(1) as usize - 1).min(self.impulses.len().saturating_sub(1));
        self.impulses.get(idx).copied().unwrap_or(StageImpulse {
            jump: 0.0,
            bump: 0.0,
        })
    }

    /// Reject malformed configuration for a given screen size
    pub fn validate(&self, screen: Vec2) -> Result<(), TuningError> {
        if !(positive_finite(screen.x) && positive_finite(screen.y)) {
            return Err(TuningError::InvalidScreen {
                width: screen.x,
                height: screen.y,
            });
        }
        if self.bands.is_empty() {
            return Err(TuningError::NoBands);
        }
        if self.impulses.is_empty() {
            return Err(TuningError::EmptyImpulseTable);
        }
        if let Some(stage) = self
            .impulses
            .iter()
            .position(|i| !(i.jump.is_finite() && i.bump.is_finite()))
        {
            return Err(TuningError::NonFiniteImpulse { stage: stage + 1 });
        }
        if self.enemy.multi_hit_threshold == 0 {
            return Err(TuningError::ZeroHitThreshold);
        }
        let cooldown = self.enemy.hit_cooldown;
        if !(cooldown.is_finite() && cooldown >= 0.0) {
            return Err(TuningError::InvalidCooldown(cooldown));
        }
        if !(0.0..=1.0).contains(&self.enemy.drift_reroll_chance) {
            return Err(TuningError::InvalidChance(self.enemy.drift_reroll_chance));
        }

        for (index, band) in self.bands.iter().enumerate() {
            if !positive_finite(band.height) {
                return Err(TuningError::NonPositiveBandHeight {
                    index,
                    height: band.height,
                });
            }
            let width = band.width_for(screen);
            if !positive_finite(width) {
                return Err(TuningError::NonPositiveBandWidth { index, width });
            }
            if !positive_finite(band.view_scale) {
                return Err(TuningError::NonPositiveViewScale {
                    index,
                    scale: band.view_scale,
                });
            }
            if !(band.spawn_margin.is_finite() && band.spawn_margin >= 0.0) {
                return Err(TuningError::InvalidSpawnMargin {
                    index,
                    margin: band.spawn_margin,
                });
            }
            let window = screen * band.view_scale;
            if window.x > width || window.y > band.height {
                return Err(TuningError::WindowExceedsArea {
                    index,
                    window_width: window.x,
                    window_height: window.y,
                    area_width: width,
                    area_height: band.height,
                });
            }
            if let Some(spawner) = &band.spawner {
                let (min, max) = (spawner.min_interval, spawner.max_interval);
                if !(min.is_finite() && max.is_finite() && min >= 0.0 && max >= 0.0) {
                    return Err(TuningError::InvalidSpawnInterval { index, min, max });
                }
                if min > max {
                    return Err(TuningError::InvertedSpawnInterval { index, min, max });
                }
                if !spawner.speed.is_finite() {
                    return Err(TuningError::InvalidHazardSpeed {
                        index,
                        speed: spawner.speed,
                    });
                }
            }
            if let Some(group) = band.initial.iter().find(|g| !g.speed.is_finite()) {
                return Err(TuningError::InvalidHazardSpeed {
                    index,
                    speed: group.speed,
                });
            }
        }
        self.validate_player()
    }

    /// Player physics must give the ground band a reachable floor
    fn validate_player(&self) -> Result<(), TuningError> {
        let player = &self.player;
        for (field, value) in [
            ("gravity", player.gravity),
            ("step", player.step),
            ("falling_max_vy", player.falling_max_vy),
            ("nominal_max_vy", player.nominal_max_vy),
            ("move_speed", player.move_speed),
        ] {
            if !positive_finite(value) {
                return Err(TuningError::InvalidPlayerValue { field, value });
            }
        }
        if !(player.dead_zone.is_finite() && player.dead_zone >= 0.0) {
            return Err(TuningError::InvalidPlayerValue {
                field: "dead_zone",
                value: player.dead_zone,
            });
        }

        let height = self.bands[0].height;
        let margin = player.bounce_margin;
        if !(margin > 0.0 && margin < height) {
            return Err(TuningError::BounceMarginOutOfRange { margin, height });
        }
        // Start below the top edge and above the floor
        let offset = player.start_offset;
        if !(offset > margin && offset < height) {
            return Err(TuningError::StartOutsideGround { offset, height });
        }
        Ok(())
    }
}

#[inline]
fn positive_finite(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(320.0, 240.0);

    #[test]
    fn test_default_is_valid() {
        Tuning::default().validate(SCREEN).unwrap();
    }

    #[test]
    fn test_impulse_lookup_clamps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.impulse(1).jump, -4.0);
        assert_eq!(tuning.impulse(2).bump, -16.0);
        assert_eq!(tuning.impulse(3).jump, -8.0);
        assert_eq!(tuning.impulse(9), tuning.impulse(3));
        assert_eq!(tuning.impulse(0), tuning.impulse(1));
    }

    #[test]
    fn test_rejects_non_positive_height() {
        let mut tuning = Tuning::default();
        tuning.bands[1].height = 0.0;
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::NonPositiveBandHeight { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_spawn_interval() {
        let mut tuning = Tuning::default();
        if let Some(spawner) = tuning.bands[0].spawner.as_mut() {
            spawner.min_interval = -1.0;
        }
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::InvalidSpawnInterval { index: 0, .. })
        ));

        let mut tuning = Tuning::default();
        if let Some(spawner) = tuning.bands[2].spawner.as_mut() {
            spawner.min_interval = 8.0;
            spawner.max_interval = 3.0;
        }
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::InvertedSpawnInterval { index: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_spawn_interval() {
        let mut tuning = Tuning::default();
        if let Some(spawner) = tuning.bands[0].spawner.as_mut() {
            spawner.min_interval = f64::NAN;
        }
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::InvalidSpawnInterval { index: 0, .. })
        ));

        let mut tuning = Tuning::default();
        if let Some(spawner) = tuning.bands[1].spawner.as_mut() {
            spawner.max_interval = f64::INFINITY;
        }
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::InvalidSpawnInterval { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_nan_cooldown() {
        let mut tuning = Tuning::default();
        tuning.enemy.hit_cooldown = f64::NAN;
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::InvalidCooldown(_))
        ));
        tuning.enemy.hit_cooldown = -1.0;
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::InvalidCooldown(_))
        ));
    }

    #[test]
    fn test_rejects_bounce_margin_outside_ground() {
        for margin in [0.0, -8.0, 1000.0, 2000.0, f32::NAN] {
            let mut tuning = Tuning::default();
            tuning.player.bounce_margin = margin;
            assert!(
                matches!(
                    tuning.validate(SCREEN),
                    Err(TuningError::BounceMarginOutOfRange { .. })
                ),
                "margin {margin} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_start_outside_ground() {
        // At or below the floor, above the top edge, or unset
        for offset in [8.0, 0.0, -50.0, 1000.0, 1500.0, f32::NAN] {
            let mut tuning = Tuning::default();
            tuning.player.start_offset = offset;
            assert!(
                matches!(
                    tuning.validate(SCREEN),
                    Err(TuningError::StartOutsideGround { .. })
                ),
                "offset {offset} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_degenerate_player_physics() {
        let cases: [(&str, fn(&mut PlayerTuning)); 6] = [
            ("gravity", |p| p.gravity = 0.0),
            ("step", |p| p.step = f32::NAN),
            ("falling_max_vy", |p| p.falling_max_vy = -8.0),
            ("nominal_max_vy", |p| p.nominal_max_vy = f32::INFINITY),
            ("move_speed", |p| p.move_speed = 0.0),
            ("dead_zone", |p| p.dead_zone = -1.0),
        ];
        for (name, apply) in cases {
            let mut tuning = Tuning::default();
            apply(&mut tuning.player);
            match tuning.validate(SCREEN) {
                Err(TuningError::InvalidPlayerValue { field, .. }) => assert_eq!(field, name),
                other => panic!("{name}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_non_finite_hazard_speed() {
        let mut tuning = Tuning::default();
        if let Some(spawner) = tuning.bands[1].spawner.as_mut() {
            spawner.speed = f32::NAN;
        }
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::InvalidHazardSpeed { index: 1, .. })
        ));

        let mut tuning = Tuning::default();
        tuning.bands[2].initial[0].speed = f32::INFINITY;
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::InvalidHazardSpeed { index: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_impulse() {
        let mut tuning = Tuning::default();
        tuning.impulses[1].jump = f32::NAN;
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::NonFiniteImpulse { stage: 2 })
        ));
    }

    #[test]
    fn test_rejects_window_larger_than_band() {
        let mut tuning = Tuning::default();
        tuning.bands[0].view_scale = 2.0;
        assert!(matches!(
            tuning.validate(SCREEN),
            Err(TuningError::WindowExceedsArea { index: 0, .. })
        ));
    }

    #[test]
    fn test_json_partial_overrides() {
        let json = r#"{
            "player": { "step": 6.0 },
            "bands": [
                { "name": "only", "height": 600.0,
                  "spawner": { "kind": "Drifting", "min_interval": 1.0, "max_interval": 2.0, "speed": 3.0 } }
            ]
        }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.player.step, 6.0);
        assert_eq!(tuning.player.gravity, GRAVITY);
        assert_eq!(tuning.bands.len(), 1);
        assert_eq!(tuning.bands[0].view_scale, 1.0);
        assert!(tuning.bands[0].initial.is_empty());
        assert_eq!(tuning.impulses.len(), 3);
        tuning.validate(SCREEN).unwrap();
    }

    #[test]
    fn test_json_round_trip_keeps_bands() {
        let tuning = Tuning::default();
        let back = Tuning::from_json(&tuning.to_json().unwrap()).unwrap();
        assert_eq!(back.bands.len(), tuning.bands.len());
        assert_eq!(back.bands[1].name, "sky");
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
