//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Delta-time drives every rate (motion, timers, fuel)
//! - Seeded RNG only
//! - Stable iteration order (arena slot order)
//! - No rendering, audio or platform dependencies

pub mod arena;
pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod player;
pub mod rng;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use arena::{EntityArena, EntityHandle};
pub use collision::{Contact, Resolution, classify, resolve_collisions};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use entity::{
    AerialMotion, Category, CoinTier, Entity, EntityKind, HazardKind, MotionContext, PowerUpKind,
};
pub use player::{ActiveEffects, Player, PlayerStep};
pub use rng::RandomSource;
pub use score::ScoreKeeper;
pub use spawner::{EntitySpawner, SpawnCategory, SpawnTimer};
pub use state::{RunEnd, SimEvent, SimState};
pub use tick::{TickInput, TickOutcome, autopilot_thrust, tick};
