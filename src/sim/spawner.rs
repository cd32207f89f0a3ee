//! Timed entity spawning
//!
//! Each spawn category owns its own accumulator. When an accumulator reaches
//! its interval an entity is built just past the right edge of the field and
//! the accumulator goes back to zero (a full reset, so frame jitter never
//! carries over into the next spawn).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::EntityArena;
use super::difficulty::DifficultyProfile;
use super::entity::{AerialMotion, CoinTier, Entity, PowerUpKind};
use super::rng::RandomSource;
use crate::consts::*;

/// Independent spawn timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnCategory {
    /// Birds, trees, and the occasional power-up
    Hazard,
    Coin(CoinTier),
    FuelRefill,
}

impl SpawnCategory {
    pub const ALL: [SpawnCategory; 5] = [
        SpawnCategory::Hazard,
        SpawnCategory::Coin(CoinTier::Low),
        SpawnCategory::Coin(CoinTier::Mid),
        SpawnCategory::Coin(CoinTier::High),
        SpawnCategory::FuelRefill,
    ];
}

/// Elapsed-time accumulator for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub elapsed: f32,
    pub interval: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval,
        }
    }

    /// Accumulate `dt`; returns true (and resets to zero) when due
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpawner {
    pub hazard: SpawnTimer,
    pub coin_low: SpawnTimer,
    pub coin_mid: SpawnTimer,
    pub coin_high: SpawnTimer,
    pub fuel: SpawnTimer,
}

impl EntitySpawner {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            hazard: SpawnTimer::new(profile.spawn_interval),
            coin_low: SpawnTimer::new(CoinTier::Low.interval()),
            coin_mid: SpawnTimer::new(CoinTier::Mid.interval()),
            coin_high: SpawnTimer::new(CoinTier::High.interval()),
            fuel: SpawnTimer::new(FUEL_REFILL_INTERVAL),
        }
    }

    /// Zero every accumulator and pick up the profile's hazard cadence
    pub fn reset(&mut self, profile: &DifficultyProfile) {
        *self = Self::new(profile);
    }

    /// Swap in a new hazard cadence without losing accumulated time
    pub fn apply_profile(&mut self, profile: &DifficultyProfile) {
        self.hazard.interval = profile.spawn_interval;
    }

    pub fn timer(&self, category: SpawnCategory) -> &SpawnTimer {
        match category {
            SpawnCategory::Hazard => &self.hazard,
            SpawnCategory::Coin(CoinTier::Low) => &self.coin_low,
            SpawnCategory::Coin(CoinTier::Mid) => &self.coin_mid,
            SpawnCategory::Coin(CoinTier::High) => &self.coin_high,
            SpawnCategory::FuelRefill => &self.fuel,
        }
    }

    pub fn timer_mut(&mut self, category: SpawnCategory) -> &mut SpawnTimer {
        match category {
            SpawnCategory::Hazard => &mut self.hazard,
            SpawnCategory::Coin(CoinTier::Low) => &mut self.coin_low,
            SpawnCategory::Coin(CoinTier::Mid) => &mut self.coin_mid,
            SpawnCategory::Coin(CoinTier::High) => &mut self.coin_high,
            SpawnCategory::FuelRefill => &mut self.fuel,
        }
    }

    /// Advance one category's timer and build an entity if it came due
    pub fn try_spawn(
        &mut self,
        category: SpawnCategory,
        elapsed: f32,
        rng: &mut RandomSource,
    ) -> Option<Entity> {
        if !self.timer_mut(category).tick(elapsed) {
            return None;
        }

        let entity = match category {
            SpawnCategory::Hazard => build_hazard(rng),
            SpawnCategory::Coin(tier) => Entity::coin(tier, Vec2::new(FIELD_WIDTH, pickup_y(rng))),
            SpawnCategory::FuelRefill => Entity::fuel_refill(Vec2::new(FIELD_WIDTH, pickup_y(rng))),
        };
        Some(entity)
    }

    /// Run every category for this frame, inserting into the arena.
    /// Spawns into a full arena are dropped. Returns the number inserted.
    pub fn spawn_due(&mut self, dt: f32, rng: &mut RandomSource, arena: &mut EntityArena) -> usize {
        let mut spawned = 0;
        for category in SpawnCategory::ALL {
            let Some(entity) = self.try_spawn(category, dt, rng) else {
                continue;
            };
            match arena.insert(entity) {
                Some(handle) => {
                    log::trace!("Spawned {:?} at slot {}", category, handle.index);
                    spawned += 1;
                }
                None => log::debug!("Entity pool full, dropped {:?} spawn", category),
            }
        }
        spawned
    }
}

/// Uniform height inside the safe pickup band
fn pickup_y(rng: &mut RandomSource) -> f32 {
    rng.range_f32(PICKUP_TOP_MARGIN, FIELD_HEIGHT - PICKUP_BOTTOM_MARGIN)
}

fn build_hazard(rng: &mut RandomSource) -> Entity {
    if rng.chance(POWER_UP_CHANCE) {
        let kind = rng
            .pick(&PowerUpKind::ALL)
            .unwrap_or(PowerUpKind::Shield);
        return Entity::power_up(kind, Vec2::new(FIELD_WIDTH, pickup_y(rng)));
    }

    if rng.chance(AERIAL_HAZARD_CHANCE) {
        let y = rng.range_f32(0.0, FIELD_HEIGHT - AERIAL_BOTTOM_MARGIN);
        Entity::aerial_hazard(Vec2::new(FIELD_WIDTH, y), AerialMotion::roll(rng))
    } else {
        Entity::ground_hazard(FIELD_WIDTH)
    }
}
