//! Vertical motion for the player
//!
//! Explicit Euler, one step per fixed tick and no substepping. Velocities and
//! gravity are expressed per tick, so changing `tick_ms` without retuning them
//! changes how the jump feels.

use super::state::Player;
use crate::config::RunnerConfig;

/// Gravity applied this tick
///
/// Crouching scales gravity by `crouch_gravity_multiplier`. It is applied once
/// per tick, never stacked on top of the base gravity.
pub fn effective_gravity(player: &Player, config: &RunnerConfig) -> f32 {
    if player.crouching {
        config.gravity * config.crouch_gravity_multiplier
    } else {
        config.gravity
    }
}

/// Start a jump if grounded and standing
pub fn try_jump(player: &mut Player, jump_velocity: f32) -> bool {
    if player.airborne || player.crouching {
        return false;
    }
    player.vel_y = jump_velocity;
    player.airborne = true;
    true
}

/// Advance the player by one tick and clamp to the ground line
pub fn integrate(player: &mut Player, config: &RunnerConfig) {
    let gravity = effective_gravity(player, config);
    player.pos.y += player.vel_y;
    player.vel_y += gravity;

    let rest_y = config.rest_y();
    if player.pos.y >= rest_y {
        player.pos.y = rest_y;
        player.vel_y = 0.0;
        player.airborne = false;
    }
}
