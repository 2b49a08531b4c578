//! Skyhop headless runner
//!
//! Drives the simulation at a fixed rate with scripted input and logs what
//! happens. Rendering and audio hosts link the library directly.
//!
//! Usage: `skyhop [tuning.json] [seed] [seconds]`

use std::process::ExitCode;

use glam::Vec2;
use skyhop::Tuning;
use skyhop::sim::{Game, GameEvent, GamePhase, TickInput, tick};

/// Host tick rate
const TICKS_PER_SECOND: f64 = 60.0;
/// Visible screen size handed to the simulation
const SCREEN: Vec2 = Vec2::new(320.0, 480.0);

fn load_tuning(path: Option<&str>) -> Result<Tuning, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            log::info!("Loaded tuning from {}", path);
            Ok(Tuning::from_json(&json)?)
        }
        None => Ok(Tuning::default()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = load_tuning(args.first().map(String::as_str))?;
    let seed = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(12345);
    let seconds: f64 = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(120.0);

    let mut game = Game::new(tuning, SCREEN, seed, 0.0)?;
    let total_ticks = (seconds * TICKS_PER_SECOND) as u64;

    for i in 0..total_ticks {
        let now = i as f64 / TICKS_PER_SECOND;
        // Sweep the pointer back and forth across the screen
        let phase = (now * 0.5).sin() as f32;
        let input = TickInput {
            pointer: Some(Vec2::new(SCREEN.x * (0.5 + 0.4 * phase), SCREEN.y / 2.0)),
            ..Default::default()
        };
        tick(&mut game, &input, now);

        for event in game.drain_events() {
            match event {
                GameEvent::Sound(cue) => log::trace!("sound: {}", cue.as_str()),
                GameEvent::BandChanged { from, to } => {
                    log::info!("[{}] band {} -> {}", game.elapsed_text(now), from, to)
                }
                GameEvent::StageChanged { stage } => {
                    log::info!("[{}] reached stage {}", game.elapsed_text(now), stage)
                }
                GameEvent::Cleared => log::info!("[{}] cleared!", game.elapsed_text(now)),
            }
        }

        if game.phase == GamePhase::Cleared {
            break;
        }
    }

    let world = game.current_world();
    log::info!(
        "Finished after {} ticks: stage {}, band {}, {} hazards in band, player at ({:.1}, {:.1})",
        game.time_ticks,
        game.stage(),
        game.current(),
        world.enemies.len(),
        game.player().pos().x,
        game.player().pos().y
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Skyhop (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
