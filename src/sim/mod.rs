//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick rate, no delta-time scaling
//! - Seeded RNG only
//! - Stable iteration order (hazards kept in id order)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod world;

pub use body::Body;
pub use collision::{Contact, player_contacts};
pub use enemy::{Enemy, EnemyKind, HazardKind};
pub use player::{HorizontalControl, Player, reflect_about};
pub use rect::Rect;
pub use state::{BounceImpact, Game, GameEvent, GamePhase, SoundCue};
pub use tick::{TickInput, tick};
pub use world::World;
