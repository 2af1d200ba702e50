//! Idle/demo mode - a simple bot that plays the game
//!
//! Looks at the nearest obstacle that has not cleared the player yet: jumps
//! over ground obstacles once they are within a speed-scaled lead distance,
//! and crouches under flying ones that would clip a standing player.

use super::collision::collide;
use super::state::{GameState, ObstacleKind};
use super::tick::TickInput;

/// Lead distance (px from the player's front edge) in ticks of travel
const JUMP_LEAD_TICKS: f32 = 5.0;
const CROUCH_LEAD_TICKS: f32 = 10.0;

/// Build the input for the next tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if state.is_game_over() || state.is_paused() {
        return input;
    }

    let player = state.player.bounds();
    let speed = state.speed();
    let Some(next) = state
        .field
        .obstacles()
        .iter()
        .find(|o| o.right() > player.left())
    else {
        return input;
    };
    let distance = next.pos.x - player.right();

    match next.kind {
        ObstacleKind::Flying if state.config.crouch_enabled => {
            // Only duck if the obstacle would clip a standing player
            let mut standing = state.player.clone();
            standing.crouching = false;
            let standing_box = standing.bounds();
            let mut probe = next.bounds();
            probe.pos.x = standing_box.pos.x;
            let clips = collide(&standing_box, &probe, state.config.collision_padding);
            input.crouch = clips && distance <= speed * CROUCH_LEAD_TICKS;
        }
        _ => {
            input.jump = !state.player.airborne
                && distance >= 0.0
                && distance <= speed * JUMP_LEAD_TICKS + 4.0;
        }
    }
    input
}
