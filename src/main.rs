//! Headless demo driver
//!
//! Runs a scripted session without a renderer attached: a simple dodge
//! policy steers away from obstacles closing in on the player's lane.
//! Useful for eyeballing tuning changes from the log output alone.
//!
//! Usage: `lane-rush [seed]` with `RUST_LOG=info` for the session log.

use lane_rush::sim::{GamePhase, TickInput};
use lane_rush::{Config, Session};

/// Five minutes at 60 fps
const MAX_FRAMES: u64 = 5 * 60 * 60;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2024);

    let mut session = match Session::new(Config::default(), seed) {
        Ok(session) => session,
        Err(err) => {
            log::error!("bad config: {err}");
            std::process::exit(1);
        }
    };

    let mut frames = 0;
    for frame in 0..MAX_FRAMES {
        let input = dodge_policy(&session);
        session.tick(&input);
        frames = frame + 1;

        if session.state().phase == GamePhase::GameOver {
            break;
        }
        if frame % 600 == 0 {
            let state = session.state();
            log::debug!(
                "frame {frame}: score {}, distance {:.0}, speed {:.1}, {} obstacles",
                state.score,
                state.distance,
                state.player.speed,
                state.obstacles.len()
            );
        }
    }

    let state = session.state();
    log::info!(
        "run ended after {frames} frames: score {}, distance {:.0}, final speed {:.1}",
        state.score,
        state.distance,
        state.player.speed
    );
}

/// Steer toward the nearest lane no obstacle is closing in on
fn dodge_policy(session: &Session) -> TickInput {
    let state = session.state();
    let player = &state.player;

    let mut threatened = 0u32;
    for obstacle in &state.obstacles {
        if obstacle.y < 300.0 {
            for lane in obstacle.lane..obstacle.lane + obstacle.span {
                threatened |= 1 << lane;
            }
        }
    }

    if threatened & (1 << player.target_lane) == 0 {
        return TickInput::default();
    }

    let nearest_safe = (0..session.config().lane_count())
        .filter(|&lane| threatened & (1 << lane) == 0)
        .min_by_key(|&lane| (lane as i64 - player.target_lane as i64).abs());

    match nearest_safe {
        Some(lane) if lane < player.target_lane => TickInput {
            move_left: true,
            ..Default::default()
        },
        Some(lane) if lane > player.target_lane => TickInput {
            move_right: true,
            ..Default::default()
        },
        _ => TickInput::default(),
    }
}
