//! Per-frame simulation advance
//!
//! Order within a frame: player physics and fuel, spawns, entity motion,
//! collisions, then removal of everything deactivated this frame.

use super::collision::resolve_collisions;
use super::entity::{Category, MotionContext, PowerUpKind};
use super::player::Player;
use super::state::{RunEnd, SimEvent, SimState};
use crate::consts::*;

/// Polled input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lift held
    pub thrust: bool,
    /// Start key; the only input that opens the start gate
    pub start: bool,
    /// Demo mode - the autopilot flies
    pub autopilot: bool,
}

/// What a tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<SimEvent>,
    /// Set on the frame the run ends
    pub ended: Option<RunEnd>,
}

/// Advance the run by `dt` seconds
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.is_over() {
        return outcome;
    }

    let mut input = input.clone();
    if input.autopilot {
        input.start = true;
        input.thrust = autopilot_thrust(state);
    }
    let input = &input;

    // Waiting at the start gate
    if !state.started {
        if !input.start {
            return outcome;
        }
        state.started = true;
        outcome.events.push(SimEvent::RunStarted);
        log::info!("Run started ({})", state.difficulty.as_str());
    }

    let dt = dt.max(0.0);
    state.frames += 1;
    state.elapsed += dt;

    // Player physics, fuel and power-up timers
    let step = state.player.update(dt, input.thrust, &state.profile);
    if step.thrust_started {
        outcome.events.push(SimEvent::Thrust);
    }
    for kind in step.expired {
        if kind == PowerUpKind::ScoreMultiplier {
            state.score.reset_multiplier();
        }
        outcome.events.push(SimEvent::PowerUpExpired(kind));
    }
    if step.exhausted {
        outcome.events.push(SimEvent::FuelExhausted);
        finish(state, &mut outcome, RunEnd::OutOfFuel);
        return outcome;
    }

    state
        .spawner
        .spawn_due(dt, &mut state.rng, &mut state.entities);

    let ctx = MotionContext {
        dt,
        scroll_speed: state.profile.scroll_speed,
        player_landed: state.player.is_landed(),
        field_height: FIELD_HEIGHT,
    };
    for (_, entity) in state.entities.iter_mut() {
        entity.advance(&ctx, &mut state.rng);
    }

    let resolution = resolve_collisions(&mut state.player, &mut state.entities, &mut state.score);
    outcome.events.extend(resolution.events);

    // Nothing deactivated this frame survives into the next one
    state.entities.sweep_inactive();

    if resolution.crashed {
        finish(state, &mut outcome, RunEnd::Crashed);
    }

    outcome
}

fn finish(state: &mut SimState, outcome: &mut TickOutcome, end: RunEnd) {
    state.ended = Some(end);
    outcome.ended = Some(end);
    log::info!(
        "Run over: {:?} after {:.1}s with {} points",
        end,
        state.elapsed,
        state.score.points
    );
}

/// Fuel level below which the autopilot heads down to refuel
const AUTOPILOT_REFUEL_BELOW: f32 = 25.0;
/// Fuel level the autopilot waits for before taking off again
const AUTOPILOT_TAKEOFF_AT: f32 = 95.0;
/// How far ahead (pixels) the autopilot looks for hazards
const AUTOPILOT_LOOKAHEAD: f32 = 260.0;
/// Clearance kept above/below a hazard
const AUTOPILOT_CLEARANCE: f32 = 20.0;

/// Decide whether the autopilot holds thrust this frame
pub fn autopilot_thrust(state: &SimState) -> bool {
    let player = &state.player;
    let bounds = player.bounds();
    let center_y = bounds.top() + bounds.h / 2.0;

    // Refuel cycle: sit on the ground until nearly full, descend when low
    if player.is_landed() && player.fuel < AUTOPILOT_TAKEOFF_AT {
        return false;
    }
    if !player.is_landed() && player.fuel < AUTOPILOT_REFUEL_BELOW {
        return false;
    }

    let mut target_y = FIELD_HEIGHT * 0.4;

    // Nearest hazard that is ahead and close enough to matter
    let threat = state
        .entities
        .active()
        .filter(|e| e.category() == Category::Hazard)
        .filter(|e| {
            let b = e.bounds();
            b.right() > bounds.left() && b.left() - bounds.right() < AUTOPILOT_LOOKAHEAD
        })
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(hazard) = threat {
        let hb = hazard.bounds();
        let hazard_center = hb.top() + hb.h / 2.0;
        let above = hb.top() - AUTOPILOT_CLEARANCE - bounds.h / 2.0;
        let below = hb.bottom() + AUTOPILOT_CLEARANCE + bounds.h / 2.0;
        // Pass on whichever side has room, preferring the side we're already on
        target_y = if center_y < hazard_center && above > bounds.h {
            above
        } else if below < Player::landing_line() - bounds.h {
            below
        } else {
            above
        };
    }

    center_y > target_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::entity::{CoinTier, Entity};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn started(difficulty: Difficulty) -> SimState {
        let mut state = SimState::new(12345, difficulty);
        state.started = true;
        state
    }

    fn thrust() -> TickInput {
        TickInput {
            thrust: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_start_gate() {
        let mut state = SimState::new(12345, Difficulty::Medium);
        let before = state.player.clone();

        let outcome = tick(&mut state, &TickInput::default(), 1.0);
        assert!(outcome.events.is_empty());
        assert!(!state.started);

        // Lift alone doesn't start the run
        let outcome = tick(&mut state, &thrust(), 1.0);
        assert!(outcome.events.is_empty());
        assert!(!state.started);
        assert_eq!(state.frames, 0);
        assert_eq!(state.player, before);
        assert_eq!(state.spawner.coin_low.elapsed, 0.0);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &start, DT);
        assert!(state.started);
        assert_eq!(outcome.events.first(), Some(&SimEvent::RunStarted));
        assert_eq!(state.frames, 1);
    }

    #[test]
    fn test_thrust_event_on_press() {
        let mut state = started(Difficulty::Medium);
        let outcome = tick(&mut state, &thrust(), DT);
        assert!(outcome.events.contains(&SimEvent::Thrust));
        let outcome = tick(&mut state, &thrust(), DT);
        assert!(!outcome.events.contains(&SimEvent::Thrust));
    }

    #[test]
    fn test_fuel_exhaustion_ends_run() {
        let mut state = started(Difficulty::Easy);
        state.player.fuel = 1.0;
        let mut ended = None;
        for _ in 0..60 {
            let outcome = tick(&mut state, &thrust(), DT);
            if outcome.ended.is_some() {
                ended = outcome.ended;
                assert!(outcome.events.contains(&SimEvent::FuelExhausted));
                break;
            }
        }
        assert_eq!(ended, Some(RunEnd::OutOfFuel));
        assert_eq!(state.player.fuel, 0.0);

        // Inert once over
        let frames = state.frames;
        let outcome = tick(&mut state, &thrust(), DT);
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(state.frames, frames);
    }

    #[test]
    fn test_collected_coin_removed_same_frame() {
        let mut state = started(Difficulty::Medium);
        let pos = state.player.pos + Vec2::new(10.0, 0.0);
        state.entities.insert(Entity::coin(CoinTier::Mid, pos));

        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert!(outcome.events.iter().any(|e| matches!(
            e,
            SimEvent::CoinCollected { value: 10, awarded: 10 }
        )));
        assert_eq!(state.score.points, 10);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_crash_ends_run() {
        let mut state = started(Difficulty::Medium);
        let x = state.player.pos.x;
        let h = state.entities.insert(Entity::ground_hazard(x)).unwrap();
        // Move the tree onto the player
        state.entities.get_mut(h).unwrap().pos.y = state.player.pos.y;

        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome.ended, Some(RunEnd::Crashed));
        assert!(outcome.events.contains(&SimEvent::Crashed));
        assert!(state.is_over());
    }

    #[test]
    fn test_score_multiplier_expires() {
        let mut state = started(Difficulty::Medium);
        // No hazards for this one
        state.spawner.hazard.interval = f32::INFINITY;
        let pos = state.player.pos;
        state
            .entities
            .insert(Entity::power_up(PowerUpKind::ScoreMultiplier, pos));
        tick(&mut state, &thrust(), DT);
        assert_eq!(state.score.multiplier, SCORE_MULTIPLIER_BONUS);

        let frames = (PowerUpKind::ScoreMultiplier.duration() / DT) as usize + 5;
        let mut expired = false;
        for _ in 0..frames {
            let outcome = tick(&mut state, &thrust(), DT);
            expired |= outcome
                .events
                .contains(&SimEvent::PowerUpExpired(PowerUpKind::ScoreMultiplier));
        }
        assert!(!state.is_over());
        assert!(expired);
        assert_eq!(state.score.multiplier, 1);
    }

    #[test]
    fn test_entities_spawn_and_scroll() {
        let mut state = started(Difficulty::Medium);
        state.spawner.coin_low.elapsed = COIN_LOW_INTERVAL;
        tick(&mut state, &thrust(), DT);
        let coin = state.entities.active().next().unwrap();
        assert!(coin.pos.x < FIELD_WIDTH);
        assert_eq!(state.spawner.coin_low.elapsed, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = started(Difficulty::Hard);
        let mut b = started(Difficulty::Hard);
        let inputs = [thrust(), TickInput::default(), thrust(), thrust()];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, DT);
            tick(&mut b, input, DT);
        }
        assert_eq!(a.frames, b.frames);
        assert_eq!(a.player, b.player);
        assert_eq!(a.entities.len(), b.entities.len());
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_autopilot_refuel_cycle() {
        let mut state = started(Difficulty::Medium);
        // Low on fuel in the air: descend
        state.player.fuel = 10.0;
        assert!(!autopilot_thrust(&state));

        // Landed and not yet full: stay down
        state.player.pos.y = Player::landing_line() - state.player.size.y;
        state.player.fuel = 60.0;
        assert!(!autopilot_thrust(&state));

        // Full again: climb
        state.player.fuel = MAX_FUEL;
        assert!(autopilot_thrust(&state));
    }

    #[test]
    fn test_autopilot_dodges_hazard() {
        let mut state = started(Difficulty::Medium);
        state.player.pos.y = 200.0;
        let center = state.player.pos.y + state.player.size.y / 2.0;
        // Hazard just ahead and slightly below: go over it
        let h = state
            .entities
            .insert(Entity::ground_hazard(state.player.pos.x + 100.0))
            .unwrap();
        state.entities.get_mut(h).unwrap().pos.y = center + 5.0;
        assert!(autopilot_thrust(&state));
    }

    #[test]
    fn test_autopilot_flag_drives_input() {
        let mut state = SimState::new(1, Difficulty::Easy);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &input, DT);
        assert!(state.started);
        assert!(outcome.events.contains(&SimEvent::RunStarted));
    }
}
