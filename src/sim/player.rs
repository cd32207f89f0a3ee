//! The helicopter: vertical physics, fuel gauge and power-up timers

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::entity::PowerUpKind;
use crate::Rect;
use crate::consts::*;

/// Remaining seconds per active power-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub remaining: BTreeMap<PowerUpKind, f32>,
}

impl ActiveEffects {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining.contains_key(&kind)
    }

    /// Start the effect, or restart its timer if already running
    pub fn activate(&mut self, kind: PowerUpKind, duration: f32) {
        self.remaining.insert(kind, duration);
    }

    pub fn clear(&mut self, kind: PowerUpKind) -> bool {
        self.remaining.remove(&kind).is_some()
    }

    /// Count every timer down; returns the kinds that ran out this frame
    pub fn tick(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        self.remaining.retain(|kind, left| {
            *left -= dt;
            if *left <= 0.0 {
                expired.push(*kind);
                false
            } else {
                true
            }
        });
        expired
    }
}

/// What happened to the player during one update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStep {
    /// Fuel hit zero while airborne
    pub exhausted: bool,
    /// Power-ups whose timers ran out
    pub expired: Vec<PowerUpKind>,
    /// Thrust went from released to held
    pub thrust_started: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels/s, positive is downward
    pub vertical_velocity: f32,
    /// Resource gauge in [0, max_fuel]
    pub fuel: f32,
    pub max_fuel: f32,
    pub effects: ActiveEffects,
    /// Multiplies the profile's thrust while set
    pub thrust_boost: Option<f32>,
    /// Thrust held on the previous update
    pub thrusting: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, FIELD_HEIGHT / 2.0 - PLAYER_HEIGHT / 2.0),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vertical_velocity: 0.0,
            fuel: MAX_FUEL,
            max_fuel: MAX_FUEL,
            effects: ActiveEffects::default(),
            thrust_boost: None,
            thrusting: false,
        }
    }

    /// Back to the start-of-run state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Top of the ground strip
    pub fn landing_line() -> f32 {
        FIELD_HEIGHT - LANDING_BAND
    }

    /// Resting on the ground strip
    pub fn is_landed(&self) -> bool {
        self.pos.y + self.size.y >= Self::landing_line()
    }

    /// Thrust in effect: the current profile's, scaled by any boost
    pub fn thrust(&self, profile: &DifficultyProfile) -> f32 {
        profile.thrust * self.thrust_boost.unwrap_or(1.0)
    }

    /// Advance physics, fuel and power-up timers by `dt`.
    ///
    /// Gravity applies every frame; held thrust subtracts on top of it.
    /// Fuel uses the landed state from the start of the frame, so a frame
    /// that begins on the ground never drains.
    pub fn update(&mut self, dt: f32, thrust_held: bool, profile: &DifficultyProfile) -> PlayerStep {
        let mut step = PlayerStep {
            thrust_started: thrust_held && !self.thrusting,
            ..Default::default()
        };
        self.thrusting = thrust_held;

        step.expired = self.effects.tick(dt);
        if step.expired.contains(&PowerUpKind::SpeedBoost) {
            self.thrust_boost = None;
        }

        let was_landed = self.is_landed();

        self.vertical_velocity = GRAVITY;
        if thrust_held {
            self.vertical_velocity -= self.thrust(profile);
        }
        self.pos.y += self.vertical_velocity * dt;
        self.pos.y = self.pos.y.max(0.0);
        if self.is_landed() {
            self.pos.y = Self::landing_line() - self.size.y;
        }

        if was_landed {
            self.fuel = (self.fuel + FUEL_REGEN_RATE * dt).min(self.max_fuel);
        } else {
            self.fuel -= profile.drain_rate * dt;
            if self.fuel <= 0.0 {
                self.fuel = 0.0;
                step.exhausted = true;
            }
        }
        self.fuel = self.fuel.clamp(0.0, self.max_fuel);

        step
    }

    /// Add fuel, capped at the maximum
    pub fn refuel(&mut self, amount: f32) {
        self.fuel = (self.fuel + amount).clamp(0.0, self.max_fuel);
    }

    /// Start (or restart) a power-up on the player
    pub fn apply_power_up(&mut self, kind: PowerUpKind, duration: f32) {
        self.effects.activate(kind, duration);
        if kind == PowerUpKind::SpeedBoost {
            self.thrust_boost = Some(SPEED_BOOST_FACTOR);
        }
    }

    /// Spend the shield if one is up
    pub fn consume_shield(&mut self) -> bool {
        self.effects.clear(PowerUpKind::Shield)
    }
}
