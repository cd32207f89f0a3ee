//! Player vs entity collision detection and response
//!
//! Runs once per frame, after every entity has moved, so each test sees
//! this frame's positions.

use super::arena::EntityArena;
use super::entity::{Entity, EntityKind, PowerUpKind};
use super::player::{ActiveEffects, Player};
use super::score::ScoreKeeper;
use super::state::SimEvent;
use crate::consts::SCORE_MULTIPLIER_BONUS;

/// Outcome of one player/entity overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Run ends
    Crash,
    /// Hazard passes through (invincible)
    Ignored,
    /// Hazard destroyed, shield spent
    ShieldAbsorbed,
    Coin { value: u64 },
    Refuel { amount: f32 },
    PowerUp { kind: PowerUpKind, duration: f32 },
}

/// Decide what an overlap with `entity` means given the player's effects
pub fn classify(entity: &Entity, effects: &ActiveEffects) -> Contact {
    match entity.kind {
        EntityKind::Hazard(_) => {
            if effects.is_active(PowerUpKind::Invincibility) {
                Contact::Ignored
            } else if effects.is_active(PowerUpKind::Shield) {
                Contact::ShieldAbsorbed
            } else {
                Contact::Crash
            }
        }
        EntityKind::Currency { value, .. } => Contact::Coin { value },
        EntityKind::ResourceRefill { amount } => Contact::Refuel { amount },
        EntityKind::PowerUp { kind, duration } => Contact::PowerUp { kind, duration },
    }
}

/// Result of resolving every overlap for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// A hazard hit ended the run
    pub crashed: bool,
    pub events: Vec<SimEvent>,
}

/// Test the player against every active entity and apply the results.
///
/// Stops at the first crash; anything after it in slot order is left alone.
pub fn resolve_collisions(
    player: &mut Player,
    arena: &mut EntityArena,
    score: &mut ScoreKeeper,
) -> Resolution {
    let mut resolution = Resolution::default();
    let player_box = player.bounds();

    for (_, entity) in arena.iter_mut() {
        if !entity.active || !entity.bounds().intersects(&player_box) {
            continue;
        }

        match classify(entity, &player.effects) {
            Contact::Crash => {
                resolution.crashed = true;
                resolution.events.push(SimEvent::Crashed);
                break;
            }
            Contact::Ignored => {}
            Contact::ShieldAbsorbed => {
                player.consume_shield();
                entity.active = false;
                resolution.events.push(SimEvent::ShieldAbsorbed);
            }
            Contact::Coin { value } => {
                entity.active = false;
                let awarded = score.award(value);
                resolution.events.push(SimEvent::CoinCollected { value, awarded });
            }
            Contact::Refuel { amount } => {
                entity.active = false;
                player.refuel(amount);
                resolution.events.push(SimEvent::Refueled { amount });
            }
            Contact::PowerUp { kind, duration } => {
                entity.active = false;
                player.apply_power_up(kind, duration);
                if kind == PowerUpKind::ScoreMultiplier {
                    score.set_multiplier(SCORE_MULTIPLIER_BONUS);
                }
                resolution.events.push(SimEvent::PowerUpCollected(kind));
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::consts::*;
    use crate::sim::difficulty::{Difficulty, DifficultyProfile};
    use crate::sim::entity::{AerialMotion, CoinTier};
    use glam::Vec2;
    use proptest::prelude::*;

    struct Fixture {
        player: Player,
        arena: EntityArena,
        score: ScoreKeeper,
        profile: DifficultyProfile,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                player: Player::new(),
                arena: EntityArena::with_capacity(MAX_ENTITIES),
                score: ScoreKeeper::new(),
                profile: Difficulty::Medium.profile(),
            }
        }

        /// Position that overlaps the player
        fn on_player(&self) -> Vec2 {
            self.player.pos + Vec2::new(5.0, 5.0)
        }

        fn resolve(&mut self) -> Resolution {
            resolve_collisions(&mut self.player, &mut self.arena, &mut self.score)
        }
    }

    fn bird(pos: Vec2) -> Entity {
        Entity::aerial_hazard(
            pos,
            AerialMotion {
                speed_multiplier: 2.0,
                vertical_speed: 0.0,
                repick_elapsed: 0.0,
                repick_after: 1.0,
            },
        )
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges do not overlap
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 20.0, 1.0, 1.0)));
        // Containment
        assert!(a.intersects(&Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_coin_with_multiplier() {
        let mut f = Fixture::new();
        let pos = f.on_player();
        let h = f.arena.insert(Entity::coin(CoinTier::Mid, pos)).unwrap();
        f.score.set_multiplier(2);

        let r = f.resolve();
        assert!(!r.crashed);
        assert_eq!(f.score.points, 20);
        assert!(!f.arena.get(h).unwrap().active);
        assert_eq!(
            r.events,
            vec![SimEvent::CoinCollected {
                value: 10,
                awarded: 20
            }]
        );
    }

    #[test]
    fn test_collected_once() {
        let mut f = Fixture::new();
        let pos = f.on_player();
        f.arena.insert(Entity::coin(CoinTier::High, pos));
        f.arena.insert(Entity::fuel_refill(pos));
        f.player.fuel = 10.0;

        f.resolve();
        let r = f.resolve();
        assert!(r.events.is_empty());
        assert_eq!(f.score.points, 50);
        assert_eq!(f.player.fuel, 10.0 + FUEL_REFILL_AMOUNT);
    }

    #[test]
    fn test_refuel_clamped() {
        let mut f = Fixture::new();
        let pos = f.on_player();
        f.arena.insert(Entity::fuel_refill(pos));
        f.player.fuel = 90.0;
        f.resolve();
        assert_eq!(f.player.fuel, MAX_FUEL);
    }

    #[test]
    fn test_hazard_crash_stops_processing() {
        let mut f = Fixture::new();
        let pos = f.on_player();
        f.arena.insert(bird(pos));
        let coin = f.arena.insert(Entity::coin(CoinTier::Low, pos)).unwrap();

        let r = f.resolve();
        assert!(r.crashed);
        assert_eq!(r.events, vec![SimEvent::Crashed]);
        assert!(f.arena.get(coin).unwrap().active);
        assert_eq!(f.score.points, 0);
    }

    #[test]
    fn test_shield_absorbs_one_hit() {
        let mut f = Fixture::new();
        let pos = f.on_player();
        f.player.apply_power_up(PowerUpKind::Shield, 5.0);
        let first = f.arena.insert(bird(pos)).unwrap();
        f.arena.insert(bird(pos));

        let r = f.resolve();
        assert!(r.crashed);
        assert_eq!(r.events, vec![SimEvent::ShieldAbsorbed, SimEvent::Crashed]);
        assert!(!f.arena.get(first).unwrap().active);
        assert!(!f.player.effects.is_active(PowerUpKind::Shield));
    }

    #[test]
    fn test_invincibility_ignores_hazards() {
        let mut f = Fixture::new();
        let pos = f.on_player();
        f.player.apply_power_up(PowerUpKind::Invincibility, 5.0);
        f.player.apply_power_up(PowerUpKind::Shield, 5.0);
        let h = f.arena.insert(Entity::ground_hazard(pos.x)).unwrap();
        f.arena.get_mut(h).unwrap().pos = pos;

        let r = f.resolve();
        assert!(!r.crashed);
        assert!(r.events.is_empty());
        assert!(f.arena.get(h).unwrap().active);
        // Shield untouched while invincible
        assert!(f.player.effects.is_active(PowerUpKind::Shield));
    }

    #[test]
    fn test_power_up_pickup() {
        let mut f = Fixture::new();
        let pos = f.on_player();
        f.arena.insert(Entity::power_up(PowerUpKind::ScoreMultiplier, pos));
        f.arena.insert(Entity::power_up(PowerUpKind::SpeedBoost, pos));

        let r = f.resolve();
        assert_eq!(r.events.len(), 2);
        assert_eq!(f.score.multiplier, SCORE_MULTIPLIER_BONUS);
        assert!(f.player.effects.is_active(PowerUpKind::SpeedBoost));
        assert_eq!(
            f.player.thrust(&f.profile),
            f.profile.thrust * SPEED_BOOST_FACTOR
        );
    }

    #[test]
    fn test_inactive_entities_skipped() {
        let mut f = Fixture::new();
        let pos = f.on_player();
        let h = f.arena.insert(bird(pos)).unwrap();
        f.arena.get_mut(h).unwrap().active = false;
        assert!(!f.resolve().crashed);
    }

    #[test]
    fn test_miss() {
        let mut f = Fixture::new();
        f.arena.insert(bird(Vec2::new(FIELD_WIDTH, 10.0)));
        let r = f.resolve();
        assert!(!r.crashed);
        assert!(r.events.is_empty());
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, aw in 0.1f32..50.0, ah in 0.1f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, bw in 0.1f32..50.0, bh in 0.1f32..50.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
