//! Per-frame update orchestration
//!
//! One `tick` advances the run by a single frame in a strict order:
//! distance, player movement, spawning, entity movement, off-screen
//! culling, collisions, then the game-over check. Collisions therefore see
//! each frame's final positions exactly once, and a stall is only declared
//! after every speed-modifying collision this frame has applied.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::check_collisions;
use super::spawn::Spawner;
use super::state::{Advance, GamePhase, GameState};
use crate::config::Config;

/// Input intents for a single frame
///
/// Edge-triggered, consumed once; the input layer converts key-down events
/// into these, never held-key polling state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Steer one lane left
    pub move_left: bool,
    /// Steer one lane right
    pub move_right: bool,
    /// Restart after a game over
    pub restart: bool,
}

/// Advance the run by one frame
pub fn tick(
    state: &mut GameState,
    spawner: &mut Spawner,
    rng: &mut Pcg32,
    input: &TickInput,
    config: &Config,
) {
    if state.phase == GamePhase::GameOver {
        // Everything is frozen; only an explicit restart is consumed
        if input.restart {
            log::info!(
                "restarting run (seed {}, final score {}, distance {:.0})",
                state.seed,
                state.score,
                state.distance
            );
            state.reset(config);
            spawner.reset();
            *rng = Pcg32::seed_from_u64(state.seed);
        }
        return;
    }

    if input.move_left {
        state.player.steer_left();
    }
    if input.move_right {
        state.player.steer_right(config.lane_count());
    }

    // (1) Distance and road animation accumulate from the carried-over speed
    let speed = state.player.speed;
    state.distance += speed * config.distance_multiplier;
    state.road_offset += speed;

    // (2) Smooth lane interpolation; speed carries over undecayed
    state.player.update(config);

    // (3) New entities enter at the horizon
    spawner.update(state, rng, config);

    // (4) Everything else streams toward the camera at the player's speed
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed);
    }
    for coin in &mut state.coins {
        coin.advance(speed);
    }

    // (5) Cull entities that passed behind the camera
    drop_off_screen(&mut state.obstacles, config.off_screen_depth);
    drop_off_screen(&mut state.coins, config.off_screen_depth);

    // (6) Collisions against this frame's final positions
    check_collisions(state, config);

    // (7) Stall check last, after any collision has adjusted speed
    if state.player.is_stalled(config.game_over_threshold) {
        log::info!(
            "game over at distance {:.0} with score {}",
            state.distance,
            state.score
        );
        state.phase = GamePhase::GameOver;
    }
}

/// Remove entities past the camera; rerunning on the filtered collection
/// is a no-op
pub fn drop_off_screen<E: Advance>(entities: &mut Vec<E>, threshold: f32) {
    entities.retain(|entity| !entity.off_screen(threshold));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgb;
    use crate::sim::state::{Coin, Obstacle};

    fn setup() -> (Config, GameState, Spawner, Pcg32) {
        let config = Config::default();
        let state = GameState::new(&config, 42);
        (config, state, Spawner::new(), Pcg32::seed_from_u64(42))
    }

    /// An obstacle sitting right on the player for the next tick
    fn obstacle_on_player(config: &Config) -> Obstacle {
        let mut obstacle = Obstacle::new(2, 1, config, Rgb::new(200, 50, 50));
        obstacle.y = 0.0;
        obstacle
    }

    #[test]
    fn test_distance_and_road_offset_accumulate() {
        let (config, mut state, mut spawner, mut rng) = setup();
        tick(&mut state, &mut spawner, &mut rng, &TickInput::default(), &config);
        assert!((state.distance - 0.8).abs() < 1e-6);
        assert!((state.road_offset - 8.0).abs() < 1e-6);
        // No decay: speed carries over untouched
        assert_eq!(state.player.speed, 8.0);
    }

    #[test]
    fn test_steering_intents_are_edge_triggered() {
        let (config, mut state, mut spawner, mut rng) = setup();
        let input = TickInput { move_right: true, ..Default::default() };
        tick(&mut state, &mut spawner, &mut rng, &input, &config);
        assert_eq!(state.player.target_lane, 3);

        // Absent intent: target stays where it was
        tick(&mut state, &mut spawner, &mut rng, &TickInput::default(), &config);
        assert_eq!(state.player.target_lane, 3);
    }

    #[test]
    fn test_entities_stream_toward_camera_and_cull() {
        let (config, mut state, mut spawner, mut rng) = setup();
        let mut far = obstacle_on_player(&config);
        far.y = 500.0;
        state.obstacles.push(far);
        let mut passing = Coin::new(0, &config);
        passing.y = -95.0;
        state.coins.push(passing);

        tick(&mut state, &mut spawner, &mut rng, &TickInput::default(), &config);
        assert_eq!(state.obstacles[0].y, 492.0);
        // -95 - 8 = -103 is behind the camera
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_off_screen_removal_is_idempotent() {
        let config = Config::default();
        let mut coins: Vec<Coin> = (0..4)
            .map(|lane| {
                let mut coin = Coin::new(lane, &config);
                coin.y = if lane % 2 == 0 { -200.0 } else { 300.0 };
                coin
            })
            .collect();

        drop_off_screen(&mut coins, config.off_screen_depth);
        assert_eq!(coins.len(), 2);
        let snapshot = coins.clone();
        drop_off_screen(&mut coins, config.off_screen_depth);
        assert_eq!(coins, snapshot);
    }

    #[test]
    fn test_three_hits_then_a_fourth_stalls_out() {
        let (config, mut state, mut spawner, mut rng) = setup();

        for expected in [6.0, 4.0, 2.0] {
            state.obstacles.push(obstacle_on_player(&config));
            tick(&mut state, &mut spawner, &mut rng, &TickInput::default(), &config);
            assert_eq!(state.player.speed, expected);
            assert_eq!(state.phase, GamePhase::Running);
        }

        state.obstacles.push(obstacle_on_player(&config));
        tick(&mut state, &mut spawner, &mut rng, &TickInput::default(), &config);
        assert_eq!(state.player.speed, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_coin_in_same_frame_can_rescue_a_stall() {
        let (config, mut state, mut spawner, mut rng) = setup();
        state.player.speed = 2.0;
        state.obstacles.push(obstacle_on_player(&config));
        let mut coin = Coin::new(2, &config);
        coin.y = 0.0;
        state.coins.push(coin);

        tick(&mut state, &mut spawner, &mut rng, &TickInput::default(), &config);
        // Penalty floors to 0, then the boost lands before the stall check
        assert!((state.player.speed - 0.5).abs() < 1e-6);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_game_over_freezes_the_world() {
        let (config, mut state, mut spawner, mut rng) = setup();
        state.phase = GamePhase::GameOver;
        let mut obstacle = obstacle_on_player(&config);
        obstacle.y = 500.0;
        state.obstacles.push(obstacle);
        state.distance = 321.0;

        tick(&mut state, &mut spawner, &mut rng, &TickInput::default(), &config);
        tick(
            &mut state,
            &mut spawner,
            &mut rng,
            &TickInput { move_left: true, ..Default::default() },
            &config,
        );
        assert_eq!(state.distance, 321.0);
        assert_eq!(state.obstacles[0].y, 500.0);
        assert_eq!(state.player.target_lane, 2);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_only_works_from_game_over() {
        let (config, mut state, mut spawner, mut rng) = setup();
        state.distance = 50.0;
        let restart = TickInput { restart: true, ..Default::default() };

        // Mid-run restart intent is ignored
        tick(&mut state, &mut spawner, &mut rng, &restart, &config);
        assert!(state.distance > 50.0);

        state.phase = GamePhase::GameOver;
        state.score = 90;
        tick(&mut state, &mut spawner, &mut rng, &restart, &config);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.player.speed, config.player_start_speed);
    }
}
