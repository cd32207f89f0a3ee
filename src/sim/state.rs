//! Run state and simulation event types
//!
//! Everything the simulation mutates during a run lives in `SimState`.

use serde::{Deserialize, Serialize};

use super::arena::EntityArena;
use super::difficulty::{Difficulty, DifficultyProfile};
use super::entity::PowerUpKind;
use super::player::Player;
use super::rng::RandomSource;
use super::score::ScoreKeeper;
use super::spawner::EntitySpawner;
use crate::consts::MAX_ENTITIES;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEnd {
    /// Hit a hazard without protection
    Crashed,
    /// Fuel ran out in the air
    OutOfFuel,
}

/// Things that happened during a tick, for audio and HUD feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// First input of the run released the start gate
    RunStarted,
    /// Thrust went from released to held
    Thrust,
    CoinCollected { value: u64, awarded: u64 },
    Refueled { amount: f32 },
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    ShieldAbsorbed,
    Crashed,
    FuelExhausted,
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    #[serde(skip)]
    pub rng: RandomSource,
    pub difficulty: Difficulty,
    /// Active tuning bundle; only ever replaced whole
    pub profile: DifficultyProfile,
    pub player: Player,
    pub entities: EntityArena,
    pub spawner: EntitySpawner,
    pub score: ScoreKeeper,
    /// False until the first start/thrust input of the run
    pub started: bool,
    /// Set once the run is over; ticks are inert afterwards
    pub ended: Option<RunEnd>,
    /// Seconds of simulated play this run
    pub elapsed: f32,
    /// Ticks simulated this run
    pub frames: u64,
}

impl SimState {
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        let profile = difficulty.profile();
        Self {
            rng: RandomSource::new(seed),
            difficulty,
            profile,
            player: Player::new(),
            entities: EntityArena::with_capacity(MAX_ENTITIES),
            spawner: EntitySpawner::new(&profile),
            score: ScoreKeeper::new(),
            started: false,
            ended: None,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Start a fresh run at `difficulty`. The RNG stream carries on so
    /// consecutive runs differ.
    pub fn reset(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
        self.player.reset();
        self.entities.clear();
        self.spawner.reset(&self.profile);
        self.score.reset();
        self.started = false;
        self.ended = None;
        self.elapsed = 0.0;
        self.frames = 0;
        log::info!(
            "Run reset: difficulty={}, seed={}",
            difficulty.as_str(),
            self.rng.seed()
        );
    }

    /// Swap the tuning bundle mid-run. Entities already in flight pick up
    /// the new scroll speed on their next move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
        self.spawner.apply_profile(&self.profile);
    }

    pub fn is_over(&self) -> bool {
        self.ended.is_some()
    }
}
