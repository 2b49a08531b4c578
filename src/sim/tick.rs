//! Fixed timestep simulation tick
//!
//! One call is one synchronous pass over the current band:
//! input -> spawner -> motion -> collisions -> sweep -> band crossing -> camera.

use glam::Vec2;
use rand::Rng;

use super::collision::player_contacts;
use super::enemy::Enemy;
use super::state::{BounceImpact, Game, GameEvent, GamePhase, SoundCue, charge_launch};
use crate::consts::IMPACT_DEPTH;
use crate::lower_bound;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Normalized direction from keyboard / d-pad ("direction changed")
    pub direction: Option<Vec2>,
    /// Pointer / touch position in screen coordinates ("move to")
    pub pointer: Option<Vec2>,
}

/// Advance the game by one tick. `now` is the host's monotonic clock,
/// sampled once for the whole pass.
pub fn tick(game: &mut Game, input: &TickInput, now: f64) {
    if game.phase == GamePhase::Cleared {
        return;
    }
    game.time_ticks += 1;

    apply_input(game, input);
    run_spawner(game, now);
    update_player(game);

    let current = game.current;
    game.worlds[current].update(&game.tuning.enemy, &mut game.rng);

    resolve_collisions(game, now);

    let removed = game.worlds[current].sweep();
    if removed > 0 {
        log::debug!("Band {}: swept {} hazards", current, removed);
    }

    resolve_band_crossing(game, now);

    let target = game.player.body.pos;
    let current = game.current;
    game.worlds[current].set_center(target);

    if current == 0 {
        game.impact.depth = lower_bound(0.0, game.impact.depth - 1.0);
    }
}

/// Route direction / pointer input to the player's control mode
fn apply_input(game: &mut Game, input: &TickInput) {
    if let Some(dir) = input.direction {
        let speed = game.tuning.player.move_speed;
        game.player.set_move(dir.x * speed);
    }
    if let Some(pointer) = input.pointer {
        let window = game.worlds[game.current].window;
        game.player.set_goal(pointer.x + window.x);
    }
}

/// Spawn one hazard into the current band when its timer has elapsed
fn run_spawner(game: &mut Game, now: f64) {
    if now < game.next_spawn_time {
        return;
    }
    let Some(spawner) = game.current_spawner() else {
        return;
    };

    let current = game.current;
    let area = game.worlds[current].area;
    let margin = game.tuning.bands[current].spawn_margin;
    let lane = area.inflate(0.0, -margin);

    let dir = game.random_direction();
    let y = lane.y + game.rng.random::<f32>() * lane.height;
    // Enter from the side the hazard moves away from
    let x = if dir > 0.0 { area.x } else { area.right() };

    let id = game.next_entity_id();
    let enemy = Enemy::spawn(id, spawner.kind, Vec2::new(x, y), dir, spawner.speed);
    log::debug!(
        "Band {}: spawned {:?} #{} at ({:.0}, {:.0})",
        current,
        spawner.kind,
        id,
        x,
        y
    );
    game.worlds[current].add(enemy);
    game.schedule_spawn(now);
}

/// Integrate the player and handle a bounce on the band's floor
fn update_player(game: &mut Game) {
    let world = &game.worlds[game.current];
    let area = world.area;
    let bounce_line = world.bounce_line;
    let step = game.jump_step();
    let launch = &mut game.launch_velocity;

    let bounced = game
        .player
        .update(&area, bounce_line, &game.tuning.player, || {
            charge_launch(launch, step)
        });

    if bounced {
        game.impact = BounceImpact {
            x: game.player.body.pos.x,
            depth: IMPACT_DEPTH,
        };
        game.events.push(GameEvent::Sound(SoundCue::Jump));
    }
}

/// Notify both sides of every player/hazard overlap
fn resolve_collisions(game: &mut Game, now: f64) {
    let current = game.current;
    let contacts = player_contacts(&game.player.body, &game.worlds[current].enemies);
    for contact in contacts {
        let enemy = &mut game.worlds[current].enemies[contact.enemy_index];
        enemy.on_player_collided(now, &game.tuning.enemy);
        if game.player.on_enemy_collided() {
            log::debug!("Player hit by hazard #{}", contact.enemy_id);
            game.bump();
        }
    }
}

/// Promote or demote the player when it leaves the current band vertically
fn resolve_band_crossing(game: &mut Game, now: f64) {
    let current = game.current;
    let y = game.player.body.pos.y;

    if y < 0.0 {
        let next = current + 1;
        if next >= game.worlds.len() {
            log::info!("Cleared the top band after {} ticks", game.time_ticks);
            game.phase = GamePhase::Cleared;
            game.events.push(GameEvent::Cleared);
            return;
        }
        game.player.body.pos.y += game.worlds[next].height();
        game.switch_band(next, now);
        game.raise_stage(next as u32 + 1);
    } else if current > 0 && y > game.worlds[current].height() {
        game.player.body.pos.y -= game.worlds[current].height();
        game.switch_band(current - 1, now);
    }
}
