//! Session ownership and the renderer-facing surface
//!
//! A session owns one run outright: configuration, camera, game state,
//! spawner, and the seeded RNG. The input layer hands in one [`TickInput`]
//! per frame; the renderer reads the state snapshot and projects it through
//! the camera's pure functions. No ambient globals anywhere, and the core
//! never calls out.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::camera::PerspectiveCamera;
use crate::config::{Config, ConfigError};
use crate::sim::{GameState, Spawner, TickInput, tick};

/// One run of the game, from construction to reset
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    camera: PerspectiveCamera,
    state: GameState,
    spawner: Spawner,
    rng: Pcg32,
}

impl Session {
    /// Validate the config once and set up a run
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "new session: seed {}, {} lanes, depth {}",
            seed,
            config.lane_count(),
            config.world_depth
        );
        Ok(Self {
            camera: PerspectiveCamera::new(&config),
            state: GameState::new(&config, seed),
            spawner: Spawner::new(),
            rng: Pcg32::seed_from_u64(seed),
            config,
        })
    }

    /// Consume one frame's input intents and advance the run one frame
    pub fn tick(&mut self, input: &TickInput) {
        tick(
            &mut self.state,
            &mut self.spawner,
            &mut self.rng,
            input,
            &self.config,
        );
    }

    /// Read-only state snapshot for the renderer and HUD
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Pure projection functions for the renderer
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
