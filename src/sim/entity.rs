//! Spawned entities: hazards, coins, fuel refills and power-ups
//!
//! Entities are one tagged type. Motion is dispatched per kind through plain
//! functions so every entity has the same layout in the arena.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::Rect;
use crate::consts::*;

/// Footprints
pub const AERIAL_HAZARD_SIZE: Vec2 = Vec2::new(40.0, 30.0);
pub const GROUND_HAZARD_SIZE: Vec2 = Vec2::new(50.0, 80.0);
pub const FUEL_REFILL_SIZE: Vec2 = Vec2::new(24.0, 32.0);
pub const POWER_UP_SIZE: Vec2 = Vec2::new(28.0, 28.0);

/// Broad entity category, used for spawning and collision dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Hazard,
    Currency,
    ResourceRefill,
    PowerUp,
}

/// Coin value tiers, each spawned on its own timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinTier {
    Low,
    Mid,
    High,
}

impl CoinTier {
    pub const ALL: [CoinTier; 3] = [CoinTier::Low, CoinTier::Mid, CoinTier::High];

    pub fn value(&self) -> u64 {
        match self {
            CoinTier::Low => COIN_LOW_VALUE,
            CoinTier::Mid => COIN_MID_VALUE,
            CoinTier::High => COIN_HIGH_VALUE,
        }
    }

    /// Seconds between spawns of this tier
    pub fn interval(&self) -> f32 {
        match self {
            CoinTier::Low => COIN_LOW_INTERVAL,
            CoinTier::Mid => COIN_MID_INTERVAL,
            CoinTier::High => COIN_HIGH_INTERVAL,
        }
    }

    /// Bigger coins are worth more
    pub fn size(&self) -> Vec2 {
        match self {
            CoinTier::Low => Vec2::splat(20.0),
            CoinTier::Mid => Vec2::splat(26.0),
            CoinTier::High => Vec2::splat(32.0),
        }
    }
}

/// Power-up effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs one hazard hit
    Shield,
    /// Raises thrust above the difficulty's nominal value
    SpeedBoost,
    /// Doubles coin value
    ScoreMultiplier,
    /// Hazards pass through
    Invincibility,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::SpeedBoost,
        PowerUpKind::ScoreMultiplier,
        PowerUpKind::Invincibility,
    ];

    /// Seconds the effect lasts once collected
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::Shield => 8.0,
            PowerUpKind::SpeedBoost => 5.0,
            PowerUpKind::ScoreMultiplier => 6.0,
            PowerUpKind::Invincibility => 4.0,
        }
    }
}

/// Bird-style hazard movement: fast horizontal plus a periodically
/// re-rolled vertical drift
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AerialMotion {
    /// Applied on top of the live scroll speed
    pub speed_multiplier: f32,
    pub vertical_speed: f32,
    pub repick_elapsed: f32,
    pub repick_after: f32,
}

impl AerialMotion {
    pub fn roll(rng: &mut RandomSource) -> Self {
        Self {
            speed_multiplier: rng
                .range_f32(AERIAL_MIN_SPEED_MULTIPLIER, AERIAL_MAX_SPEED_MULTIPLIER),
            vertical_speed: roll_vertical_speed(rng),
            repick_elapsed: 0.0,
            repick_after: rng.range_f32(AERIAL_FIRST_REPICK.0, AERIAL_FIRST_REPICK.1),
        }
    }
}

fn roll_vertical_speed(rng: &mut RandomSource) -> f32 {
    rng.range_f32(-AERIAL_VERTICAL_SPEED_RANGE, AERIAL_VERTICAL_SPEED_RANGE)
}

/// Hazard variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardKind {
    Aerial(AerialMotion),
    /// Sits on the landing line, scrolls only while the player flies
    Ground,
}

/// Category plus category-specific payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Hazard(HazardKind),
    Currency { tier: CoinTier, value: u64 },
    ResourceRefill { amount: f32 },
    PowerUp { kind: PowerUpKind, duration: f32 },
}

/// Per-frame inputs to entity motion
#[derive(Debug, Clone, Copy)]
pub struct MotionContext {
    pub dt: f32,
    pub scroll_speed: f32,
    pub player_landed: bool,
    pub field_height: f32,
}

/// A spawned entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            pos,
            size,
            active: true,
        }
    }

    pub fn aerial_hazard(pos: Vec2, motion: AerialMotion) -> Self {
        Self::new(
            EntityKind::Hazard(HazardKind::Aerial(motion)),
            pos,
            AERIAL_HAZARD_SIZE,
        )
    }

    pub fn ground_hazard(x: f32) -> Self {
        let y = FIELD_HEIGHT - LANDING_BAND - GROUND_HAZARD_SIZE.y;
        Self::new(
            EntityKind::Hazard(HazardKind::Ground),
            Vec2::new(x, y),
            GROUND_HAZARD_SIZE,
        )
    }

    pub fn coin(tier: CoinTier, pos: Vec2) -> Self {
        Self::new(
            EntityKind::Currency {
                tier,
                value: tier.value(),
            },
            pos,
            tier.size(),
        )
    }

    pub fn fuel_refill(pos: Vec2) -> Self {
        Self::new(
            EntityKind::ResourceRefill {
                amount: FUEL_REFILL_AMOUNT,
            },
            pos,
            FUEL_REFILL_SIZE,
        )
    }

    pub fn power_up(kind: PowerUpKind, pos: Vec2) -> Self {
        Self::new(
            EntityKind::PowerUp {
                kind,
                duration: kind.duration(),
            },
            pos,
            POWER_UP_SIZE,
        )
    }

    pub fn category(&self) -> Category {
        match self.kind {
            EntityKind::Hazard(_) => Category::Hazard,
            EntityKind::Currency { .. } => Category::Currency,
            EntityKind::ResourceRefill { .. } => Category::ResourceRefill,
            EntityKind::PowerUp { .. } => Category::PowerUp,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Apply one frame of motion. Inactive entities are left untouched.
    pub fn advance(&mut self, ctx: &MotionContext, rng: &mut RandomSource) {
        if !self.active {
            return;
        }

        match &mut self.kind {
            EntityKind::Hazard(HazardKind::Aerial(motion)) => {
                advance_aerial(&mut self.pos, self.size, motion, ctx, rng);
            }
            EntityKind::Hazard(HazardKind::Ground) => {
                advance_ground(&mut self.pos, ctx);
            }
            EntityKind::Currency { .. }
            | EntityKind::ResourceRefill { .. }
            | EntityKind::PowerUp { .. } => {
                advance_scrolling(&mut self.pos, ctx);
            }
        }

        if self.pos.x + self.size.x < 0.0 {
            self.active = false;
        }
    }
}

fn advance_aerial(
    pos: &mut Vec2,
    size: Vec2,
    motion: &mut AerialMotion,
    ctx: &MotionContext,
    rng: &mut RandomSource,
) {
    motion.repick_elapsed += ctx.dt;
    if motion.repick_elapsed >= motion.repick_after {
        motion.repick_elapsed = 0.0;
        motion.vertical_speed = roll_vertical_speed(rng);
        motion.repick_after = rng.range_f32(AERIAL_REPICK.0, AERIAL_REPICK.1);
    }

    pos.x -= ctx.scroll_speed * motion.speed_multiplier * ctx.dt;
    pos.y += motion.vertical_speed * ctx.dt;
    pos.y = pos.y.clamp(0.0, (ctx.field_height - size.y).max(0.0));
}

fn advance_ground(pos: &mut Vec2, ctx: &MotionContext) {
    if !ctx.player_landed {
        pos.x -= ctx.scroll_speed * ctx.dt;
    }
}

fn advance_scrolling(pos: &mut Vec2, ctx: &MotionContext) {
    pos.x -= ctx.scroll_speed * ctx.dt;
}
