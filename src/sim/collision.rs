//! Collision detection between the player and hazards
//!
//! Colliders are compared pairwise as closed axis-aligned rectangles. Only
//! pairs involving the player produce reactions, so hazards are tested
//! against the player alone.

use super::body::Body;
use super::enemy::Enemy;

/// A player/hazard overlap found this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Index into the world's hazard list
    pub enemy_index: usize,
    pub enemy_id: u32,
}

/// Find every live hazard whose collider overlaps the player's, in list order
pub fn player_contacts(player: &Body, enemies: &[Enemy]) -> Vec<Contact> {
    if !player.alive {
        return Vec::new();
    }
    let collider = player.world_collider();
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive() && e.body.world_collider().overlaps(&collider))
        .map(|(enemy_index, e)| Contact {
            enemy_index,
            enemy_id: e.id(),
        })
        .collect()
}
