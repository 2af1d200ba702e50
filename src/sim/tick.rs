//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call runs a
//! whole update: physics, spawning, field advance, collision, then scoring.

use super::collision::first_hit;
use super::physics;
use super::spawner::SpawnResult;
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::ScorePolicy;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (edge-triggered)
    pub jump: bool,
    /// Crouch held (level-triggered)
    pub crouch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a fresh run
    pub reset: bool,
}

/// Advance the game state by one fixed timestep
///
/// Returns the events raised during the step.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.reset {
        state.reset();
        events.push(GameEvent::Reset);
        return events;
    }

    // Handle pause toggle
    if input.pause {
        match state.toggle_pause() {
            Some(GameEvent::Paused) => {
                events.push(GameEvent::Paused);
                return events;
            }
            Some(event) => events.push(event),
            None => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Running {
        return events;
    }

    state.set_crouch(input.crouch);
    if input.jump {
        state.jump();
    }

    state.time_ticks += 1;
    state.elapsed_ms += state.config.tick_ms;

    physics::integrate(&mut state.player, &state.config);

    match state.spawner.update(
        state.elapsed_ms,
        &mut state.field,
        &state.config,
        &mut state.rng,
    ) {
        SpawnResult::Spawned { id, kind } => events.push(GameEvent::Spawned { id, kind }),
        SpawnResult::Blocked { gap } => events.push(GameEvent::SpawnDeferred { gap }),
        SpawnResult::Idle => {}
    }

    state.field.advance(state.scorer.speed);

    let player_box = state.player.bounds();
    let obstacles = state.field.obstacles();
    if let Some(index) = first_hit(&player_box, obstacles, state.config.collision_padding) {
        let obstacle_id = obstacles[index].id;
        state.phase = GamePhase::GameOver;
        state.best_score = state.best_score.max(state.scorer.score);
        log::info!(
            "Game over at tick {} (score {}, speed {:.1}, hit #{obstacle_id})",
            state.time_ticks,
            state.scorer.score,
            state.scorer.speed
        );
        events.push(GameEvent::GameOver {
            score: state.scorer.score,
            obstacle_id,
        });
        return events;
    }

    let passed = state.field.mark_passed(state.player.pos.x);
    let points = match state.config.score_policy {
        ScorePolicy::PerObstacle => passed.len() as u64,
        ScorePolicy::Timed {
            every_ticks,
            points,
        } => {
            if state.time_ticks % u64::from(every_ticks.max(1)) == 0 {
                points
            } else {
                0
            }
        }
    };
    events.extend(passed.into_iter().map(|id| GameEvent::Passed { id }));

    if let Some(level) = state.scorer.award(points, &state.config) {
        log::debug!("Speed up: level {level}, speed {:.1}", state.scorer.speed);
        events.push(GameEvent::SpeedUp {
            level,
            speed: state.scorer.speed,
        });
    }

    events
}
