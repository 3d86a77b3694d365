//! Player-versus-entity collision pass
//!
//! Axis-aligned overlap in world space, run once per frame after movement.
//! Each collection is walked in a single stable `retain` pass with the hit
//! counts applied afterwards, so removal can never skip or double-process
//! an entry, and every overlap in the frame takes effect.

use super::state::{Bounds, GameState};
use crate::config::Config;

/// Test the player against every obstacle, then every coin
///
/// Obstacle overlap: fixed speed penalty (floored at 0), obstacle removed.
/// Coin overlap: fixed speed boost plus score, coin removed. The player's
/// box is captured once at entry; speed changes mid-pass don't move it.
pub fn check_collisions(state: &mut GameState, config: &Config) {
    let scale = config.hitbox_scale;
    let player_box = state.player.hitbox(scale);

    let mut hits = 0usize;
    state.obstacles.retain(|obstacle| {
        if player_box.overlaps(&obstacle.hitbox(scale)) {
            hits += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..hits {
        state.player.hit_obstacle(config.speed_decay_on_hit);
    }

    let mut collected = 0usize;
    state.coins.retain(|coin| {
        if player_box.overlaps(&coin.hitbox(scale)) {
            collected += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..collected {
        state.player.collect_coin(config.coin_speed_boost);
        state.score += config.coin_score_value;
    }
}
