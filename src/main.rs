//! Dino Runner headless demo
//!
//! Plays a few seeded runs with the autopilot at the fixed tick, records them
//! on the session leaderboard and prints the best run's final frame as JSON.
//!
//! `DINO_RUNNER_CONFIG` points at a JSON config file; otherwise
//! `DINO_RUNNER_PRESET` (classic, flyers, marathon) picks a preset.

use dino_runner::sim::{GameEvent, GameState, autopilot_input, tick};
use dino_runner::{HighScores, Preset, RunnerConfig};

/// Runs played by the demo
const DEMO_SEEDS: [u64; 5] = [1, 7, 42, 1337, 9001];
/// Stop a run after this many ticks (~5 simulated minutes)
const MAX_TICKS: u64 = 20_000;

fn load_config() -> RunnerConfig {
    if let Ok(path) = std::env::var("DINO_RUNNER_CONFIG") {
        match RunnerConfig::from_json_file(&path) {
            Ok(config) => return config,
            Err(e) => log::warn!("Ignoring config {path}: {e}"),
        }
    }
    let preset = std::env::var("DINO_RUNNER_PRESET")
        .ok()
        .and_then(|name| Preset::from_str(&name))
        .unwrap_or_default();
    log::info!("Using {} preset", preset.as_str());
    RunnerConfig::from_preset(preset)
}

fn main() {
    env_logger::init();
    log::info!("Dino Runner (headless) starting...");

    let config = load_config();
    let mut board = HighScores::new();
    let mut best: Option<GameState> = None;

    for seed in DEMO_SEEDS {
        let mut state = GameState::with_config(config.clone(), seed);
        let mut spawned = 0u32;
        while !state.is_game_over() && state.time_ticks < MAX_TICKS {
            let input = autopilot_input(&state);
            for event in tick(&mut state, &input) {
                match event {
                    GameEvent::Spawned { .. } => spawned += 1,
                    GameEvent::SpeedUp { level, speed } => {
                        log::debug!("seed {seed}: level {level}, speed {speed:.1}");
                    }
                    _ => {}
                }
            }
        }

        println!(
            "seed {seed:>5}: score {:>4}, ticks {:>5}, obstacles {spawned:>4}, speed {:.1}{}",
            state.score(),
            state.time_ticks,
            state.speed(),
            if state.is_game_over() { "" } else { " (time limit)" }
        );
        board.add_score(state.score(), state.time_ticks, seed);

        if best.as_ref().is_none_or(|b| state.score() > b.score()) {
            best = Some(state);
        }
    }

    if let Some(top) = board.top_score() {
        println!("\nBest score: {top}");
    }
    if let Some(state) = best {
        match serde_json::to_string_pretty(&state.view()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize frame: {e}"),
        }
    }
}
