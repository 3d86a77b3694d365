//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One synchronous update per rendered frame, no internal suspension
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Collections are only compacted with `retain` after a full pass; nothing
//! removes entries mid-iteration.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::check_collisions;
pub use spawn::{Spawner, difficulty_multiplier, obstacle_spawn_interval};
pub use state::{Advance, Bounds, Coin, GamePhase, GameState, Obstacle, Player, WorldRect};
pub use tick::{TickInput, drop_off_screen, tick};
