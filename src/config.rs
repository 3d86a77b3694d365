//! Data-driven game tuning
//!
//! Everything the simulation depends on is supplied here at startup and is
//! immutable afterwards. Validation happens once in [`Config::validate`];
//! per-spawn code never re-checks lane bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGB color tag carried by entities for the external renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Configuration rejected at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("lane table must contain at least 2 lanes, got {0}")]
    TooFewLanes(usize),

    #[error("lane table larger than 31 lanes is unsupported, got {0}")]
    TooManyLanes(usize),

    #[error("lane table must be strictly increasing")]
    LanesNotIncreasing,

    #[error("max obstacle span {span} must be >= 1 and leave one lane open ({lanes} lanes)")]
    SpanBlocksRoad { span: usize, lanes: usize },

    #[error("perspective strength must be in (0, 1], got {0}")]
    BadPerspectiveStrength(f32),

    #[error("world depth must be positive and finite, got {0}")]
    BadWorldDepth(f32),

    #[error("segment depth must be positive and finite, got {0}")]
    BadSegmentDepth(f32),

    #[error("spawn intervals must satisfy 0 < min <= base, got min={min} base={base}")]
    BadSpawnIntervals { min: f32, base: f32 },

    #[error("coin spawn interval must be positive, got {0}")]
    BadCoinInterval(f32),

    #[error("max difficulty multiplier must be > 1, got {0}")]
    BadDifficultyCap(f32),

    #[error("hitbox scale must be in (0, 1], got {0}")]
    BadHitboxScale(f32),

    #[error("obstacle color set must not be empty")]
    NoObstacleColors,

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Full tuning surface for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // === Projection ===
    /// Render target size, for the external renderer's reference
    pub screen_size: Vec2,
    /// Screen point all lateral offsets converge toward with depth
    pub vanishing_point: Vec2,
    /// Scale at the horizon; 1.0 at the near plane
    pub perspective_strength: f32,
    /// Maximum world depth; entities spawn here
    pub world_depth: f32,
    /// Screen y of the near plane (road baseline)
    pub camera_y_offset: f32,

    // === Lanes ===
    /// Lateral world x of each lane center, strictly increasing
    pub lanes: Vec<f32>,
    pub lane_width: f32,

    // === Player ===
    pub player_start_speed: f32,
    /// Visual width/height of the player rect
    pub player_size: Vec2,
    /// Lateral world units per frame during a lane change
    pub player_lateral_speed: f32,
    pub player_color: Rgb,

    // === Obstacles ===
    pub obstacle_height: f32,
    /// Most lanes one obstacle may span; must leave one lane open
    pub max_obstacle_span: usize,
    pub obstacle_colors: Vec<Rgb>,

    // === Coins ===
    pub coin_size: f32,
    pub coin_color: Rgb,
    pub coin_score_value: u64,
    pub coin_speed_boost: f32,

    // === Speed & game over ===
    pub speed_decay_on_hit: f32,
    /// Speed at or below which the run ends
    pub game_over_threshold: f32,
    /// World-units-of-speed to distance-units conversion per frame
    pub distance_multiplier: f32,

    // === Difficulty & spawn cadence ===
    /// Distance at which the ramp begins
    pub difficulty_ramp_start: f32,
    /// Multiplier gained per distance unit past the ramp start
    pub difficulty_ramp_rate: f32,
    pub max_difficulty_multiplier: f32,
    /// Distance between obstacle spawns at difficulty 1.0
    pub base_obstacle_spawn_interval: f32,
    /// Distance between obstacle spawns at max difficulty
    pub min_obstacle_spawn_interval: f32,
    pub coin_spawn_interval: f32,
    /// Depth-slice length over which blocked lanes accumulate
    pub segment_depth: f32,

    // === Collision feel ===
    /// Hitboxes are this fraction of visual size (forgiving by intent)
    pub hitbox_scale: f32,
    /// Entities past this depth are behind the camera and culled
    pub off_screen_depth: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Projection - horizon near the top of the screen
            screen_size: Vec2::new(1280.0, 720.0),
            vanishing_point: Vec2::new(640.0, 680.0),
            perspective_strength: 0.15,
            world_depth: 1000.0,
            camera_y_offset: 0.0,

            // Five lanes centered on the road
            lanes: vec![-300.0, -150.0, 0.0, 150.0, 300.0],
            lane_width: 150.0,

            // Player
            player_start_speed: 8.0,
            player_size: Vec2::new(40.0, 60.0),
            player_lateral_speed: 10.0,
            player_color: Rgb::new(50, 150, 255),

            // Obstacles
            obstacle_height: 100.0,
            max_obstacle_span: 3,
            obstacle_colors: vec![
                Rgb::new(200, 50, 50),
                Rgb::new(150, 50, 150),
                Rgb::new(50, 150, 100),
            ],

            // Coins
            coin_size: 30.0,
            coin_color: Rgb::new(255, 215, 0),
            coin_score_value: 10,
            coin_speed_boost: 0.5,

            // Speed & game over
            speed_decay_on_hit: 2.0,
            game_over_threshold: 0.1,
            distance_multiplier: 0.1,

            // Difficulty & spawn cadence
            difficulty_ramp_start: 500.0,
            difficulty_ramp_rate: 0.0001,
            max_difficulty_multiplier: 2.5,
            base_obstacle_spawn_interval: 150.0,
            min_obstacle_spawn_interval: 80.0,
            coin_spawn_interval: 80.0,
            segment_depth: 250.0,

            // Collision feel
            hitbox_scale: 0.7,
            off_screen_depth: -100.0,
        }
    }
}

impl Config {
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Lateral world x of a lane center
    #[inline]
    pub fn lane_x(&self, lane: usize) -> f32 {
        self.lanes[lane]
    }

    /// Left edge of the road in world x
    pub fn road_min_x(&self) -> f32 {
        self.lanes.first().copied().unwrap_or(0.0) - self.lane_width / 2.0
    }

    /// Right edge of the road in world x
    pub fn road_max_x(&self) -> f32 {
        self.lanes.last().copied().unwrap_or(0.0) + self.lane_width / 2.0
    }

    /// Check every startup invariant once; per-frame code relies on these
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lanes = self.lane_count();
        if lanes < 2 {
            return Err(ConfigError::TooFewLanes(lanes));
        }
        // Blocked-lane bookkeeping packs lanes into a u32 mask
        if lanes > 31 {
            return Err(ConfigError::TooManyLanes(lanes));
        }
        if !self.lanes.windows(2).all(|w| w[0] < w[1]) {
            return Err(ConfigError::LanesNotIncreasing);
        }
        // A span equal to the lane count would force the safety valve on
        // every spawn in a crowded segment.
        if self.max_obstacle_span == 0 || self.max_obstacle_span >= lanes {
            return Err(ConfigError::SpanBlocksRoad {
                span: self.max_obstacle_span,
                lanes,
            });
        }
        if !(self.perspective_strength > 0.0 && self.perspective_strength <= 1.0) {
            return Err(ConfigError::BadPerspectiveStrength(self.perspective_strength));
        }
        if !(self.world_depth > 0.0 && self.world_depth.is_finite()) {
            return Err(ConfigError::BadWorldDepth(self.world_depth));
        }
        if !(self.segment_depth > 0.0 && self.segment_depth.is_finite()) {
            return Err(ConfigError::BadSegmentDepth(self.segment_depth));
        }
        let (base, min) = (
            self.base_obstacle_spawn_interval,
            self.min_obstacle_spawn_interval,
        );
        if !(min > 0.0 && min <= base) {
            return Err(ConfigError::BadSpawnIntervals { min, base });
        }
        if self.coin_spawn_interval <= 0.0 {
            return Err(ConfigError::BadCoinInterval(self.coin_spawn_interval));
        }
        if self.max_difficulty_multiplier <= 1.0 {
            return Err(ConfigError::BadDifficultyCap(self.max_difficulty_multiplier));
        }
        if !(self.hitbox_scale > 0.0 && self.hitbox_scale <= 1.0) {
            return Err(ConfigError::BadHitboxScale(self.hitbox_scale));
        }
        if self.obstacle_colors.is_empty() {
            return Err(ConfigError::NoObstacleColors);
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
