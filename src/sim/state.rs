//! Entities and game state for one run
//!
//! World space is 2D: `x` is lateral position, `y` is depth, with 0 at the
//! player and `world_depth` at the horizon. Collision boxes are bottom-anchored
//! (`y` is the near edge, centers at `y + h/2`) and shrunk by one shared
//! `hitbox_scale` for every entity. All mutation happens in the single
//! per-frame update pass; nothing here touches the renderer.

use glam::Vec2;

use crate::approach;
use crate::config::{Config, Rgb};

/// Axis-aligned box in world space, bottom-anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    /// Lateral center
    pub x: f32,
    /// Depth of the near edge
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl WorldRect {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.h / 2.0)
    }

    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.w, self.h) / 2.0
    }

    /// Separating-axis overlap on centers and half-extents
    pub fn overlaps(&self, other: &WorldRect) -> bool {
        let delta = (self.center() - other.center()).abs();
        let limit = self.half_extent() + other.half_extent();
        delta.x < limit.x && delta.y < limit.y
    }

    /// Scale the box about its center
    pub fn shrunk(&self, factor: f32) -> WorldRect {
        let center = self.center();
        let w = self.w * factor;
        let h = self.h * factor;
        WorldRect {
            x: center.x,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }
}

/// World-space collision bounds shared by every entity kind
pub trait Bounds {
    /// Visual rectangle, projected by the renderer through the camera
    fn rect(&self) -> WorldRect;

    /// Collision rectangle: the visual rect shrunk about its center
    fn hitbox(&self, hitbox_scale: f32) -> WorldRect {
        self.rect().shrunk(hitbox_scale)
    }
}

/// Per-frame depth advancement toward the camera
pub trait Advance {
    /// Move toward the player at the player's world-space speed; the
    /// projection supplies the apparent on-screen acceleration
    fn advance(&mut self, player_speed: f32);

    fn depth(&self) -> f32;

    /// True once the entity has passed behind the camera
    fn off_screen(&self, threshold: f32) -> bool {
        self.depth() < threshold
    }
}

/// Maximum cosmetic lean during a lane change (radians)
pub const MAX_LEAN: f32 = 0.25;

/// The player's avatar, always at depth 0
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Lateral world position
    pub x: f32,
    pub w: f32,
    pub h: f32,
    /// World units per frame; drives distance, entity movement, and game over
    pub speed: f32,
    /// Lane the player currently occupies
    pub lane: usize,
    /// Lane the player is steering toward
    pub target_lane: usize,
    pub color: Rgb,
}

impl Player {
    pub fn new(config: &Config) -> Self {
        let lane = config.lane_count() / 2;
        Self {
            x: config.lane_x(lane),
            w: config.player_size.x,
            h: config.player_size.y,
            speed: config.player_start_speed,
            lane,
            target_lane: lane,
            color: config.player_color,
        }
    }

    pub fn steer_left(&mut self) {
        self.target_lane = self.target_lane.saturating_sub(1);
    }

    pub fn steer_right(&mut self, lane_count: usize) {
        self.target_lane = (self.target_lane + 1).min(lane_count - 1);
    }

    /// Slide toward the target lane; `lane` snaps once the slide completes
    pub fn update(&mut self, config: &Config) {
        let target_x = config.lane_x(self.target_lane);
        self.x = approach(self.x, target_x, config.player_lateral_speed);
        if self.x == target_x {
            self.lane = self.target_lane;
        }
    }

    /// Cosmetic lean angle derived from lateral offset, for the renderer
    pub fn lean(&self, config: &Config) -> f32 {
        let offset = (config.lane_x(self.target_lane) - self.x) / config.lane_width;
        offset.clamp(-1.0, 1.0) * MAX_LEAN
    }

    pub fn hit_obstacle(&mut self, speed_decay: f32) {
        self.speed = (self.speed - speed_decay).max(0.0);
    }

    pub fn collect_coin(&mut self, speed_boost: f32) {
        self.speed += speed_boost;
    }

    pub fn is_stalled(&self, threshold: f32) -> bool {
        self.speed <= threshold
    }
}

impl Bounds for Player {
    fn rect(&self) -> WorldRect {
        WorldRect {
            x: self.x,
            y: 0.0,
            w: self.w,
            h: self.h,
        }
    }
}

/// A road-blocking obstacle spanning one or more contiguous lanes
///
/// Lateral geometry is frozen at spawn; the lane table never changes
/// mid-run, so `lane`/`span` stay only for spawn bookkeeping and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub lane: usize,
    pub span: usize,
    /// Lateral center across the spanned lanes
    pub x: f32,
    /// Depth; spawns at the horizon and decreases each frame
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Rgb,
}

impl Obstacle {
    pub fn new(lane: usize, span: usize, config: &Config, color: Rgb) -> Self {
        debug_assert!(span >= 1 && lane + span <= config.lane_count());
        let x = (config.lane_x(lane) + config.lane_x(lane + span - 1)) / 2.0;
        Self {
            lane,
            span,
            x,
            y: config.world_depth,
            w: span as f32 * config.lane_width,
            h: config.obstacle_height,
            color,
        }
    }
}

impl Bounds for Obstacle {
    fn rect(&self) -> WorldRect {
        WorldRect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

impl Advance for Obstacle {
    fn advance(&mut self, player_speed: f32) {
        self.y -= player_speed;
    }

    fn depth(&self) -> f32 {
        self.y
    }
}

/// A single-lane pickup
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Coin {
    pub fn new(lane: usize, config: &Config) -> Self {
        Self {
            lane,
            x: config.lane_x(lane),
            y: config.world_depth,
            size: config.coin_size,
            color: config.coin_color,
        }
    }
}

impl Bounds for Coin {
    fn rect(&self) -> WorldRect {
        WorldRect {
            x: self.x,
            y: self.y,
            w: self.size,
            h: self.size,
        }
    }
}

impl Advance for Coin {
    fn advance(&mut self, player_speed: f32) {
        self.y -= player_speed;
    }

    fn depth(&self) -> f32 {
        self.y
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// Latched when the player stalls; cleared only by an explicit restart
    GameOver,
}

/// Complete authoritative state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, kept for restart reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    /// Monotone except on reset
    pub score: u64,
    /// Accumulates by `speed * distance_multiplier`; drives spawn cadence
    /// and the difficulty ramp
    pub distance: f32,
    /// Road-marking animation accumulator, advances by raw speed
    pub road_offset: f32,
}

impl GameState {
    pub fn new(config: &Config, seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Running,
            player: Player::new(config),
            obstacles: Vec::new(),
            coins: Vec::new(),
            score: 0,
            distance: 0.0,
            road_offset: 0.0,
        }
    }

    /// Reinitialize every field atomically, keeping the seed
    pub fn reset(&mut self, config: &Config) {
        *self = Self::new(config, self.seed);
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
