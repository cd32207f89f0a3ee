//! Heli Dash - A side-scrolling helicopter arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, spawning, collisions, scoring)
//! - `flow`: Screen state machine gating when the simulation runs
//! - `highscores`: Bounded, sorted leaderboard
//! - `settings`: User preferences (volumes, toggles)
//! - `audio`: Fire-and-forget sound cue dispatch
//! - `persistence`: JSON file storage for leaderboard and settings
//! - `platform`: Render collaborator seam

pub mod audio;
pub mod flow;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use flow::{FlowEvent, GameFlow, Screen};
pub use highscores::{HighScoreEntry, HighScores};
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Height of the ground strip the helicopter can land on
    pub const LANDING_BAND: f32 = 70.0;
    /// Downward speed added every frame (pixels/s)
    pub const GRAVITY: f32 = 90.0;

    /// Largest frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Helicopter footprint and fixed horizontal position
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_X: f32 = FIELD_WIDTH / 4.0 - PLAYER_WIDTH / 2.0;

    /// Fuel gauge
    pub const MAX_FUEL: f32 = 100.0;
    pub const FUEL_REGEN_RATE: f32 = 2.5;
    pub const FUEL_REFILL_AMOUNT: f32 = 30.0;

    /// Spawn intervals (seconds)
    pub const COIN_LOW_INTERVAL: f32 = 2.0;
    pub const COIN_MID_INTERVAL: f32 = 6.0;
    pub const COIN_HIGH_INTERVAL: f32 = 15.0;
    pub const FUEL_REFILL_INTERVAL: f32 = 9.0;

    /// Coin point values
    pub const COIN_LOW_VALUE: u64 = 5;
    pub const COIN_MID_VALUE: u64 = 10;
    pub const COIN_HIGH_VALUE: u64 = 50;

    /// Pickups spawn inside [PICKUP_TOP_MARGIN, FIELD_HEIGHT - PICKUP_BOTTOM_MARGIN)
    pub const PICKUP_TOP_MARGIN: f32 = 50.0;
    pub const PICKUP_BOTTOM_MARGIN: f32 = 100.0;

    /// Birds vs trees
    pub const AERIAL_HAZARD_CHANCE: f64 = 0.9;
    pub const AERIAL_MIN_SPEED_MULTIPLIER: f32 = 1.6;
    pub const AERIAL_MAX_SPEED_MULTIPLIER: f32 = 2.2;
    pub const AERIAL_VERTICAL_SPEED_RANGE: f32 = 150.0;
    /// Aerial hazards never spawn in the bottom strip of this height
    pub const AERIAL_BOTTOM_MARGIN: f32 = 100.0;
    /// First vertical re-pick happens after [0.5, 1.5) seconds, later ones after [0.3, 1.0)
    pub const AERIAL_FIRST_REPICK: (f32, f32) = (0.5, 1.5);
    pub const AERIAL_REPICK: (f32, f32) = (0.3, 1.0);

    /// Chance that a hazard spawn produces a power-up instead
    pub const POWER_UP_CHANCE: f64 = 0.1;
    /// Thrust multiplier while SpeedBoost is active
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    /// Score multiplier while ScoreMultiplier is active
    pub const SCORE_MULTIPLIER_BONUS: u32 = 2;

    /// Maximum live entities in the arena
    pub const MAX_ENTITIES: usize = 64;

    /// Player name rules
    pub const NAME_MIN_LEN: usize = 3;
    pub const NAME_MAX_LEN: usize = 15;
}

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test; touching edges do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
