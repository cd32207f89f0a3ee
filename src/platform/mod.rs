//! Platform seam
//!
//! Presentation sits behind [`Renderer`]: it gets a read-only [`FrameView`]
//! once per frame and never mutates game state. The headless build uses
//! [`HudLog`], which writes a HUD line to the log now and then.

use crate::consts::MAX_FUEL;
use crate::flow::{GameFlow, Screen};
use crate::highscores::HighScores;
use crate::sim::{Entity, Player, ScoreKeeper, SimState};

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub screen: Screen,
    pub player_name: &'a str,
    pub sim: &'a SimState,
    pub leaderboard: &'a HighScores,
}

impl<'a> FrameView<'a> {
    pub fn of(flow: &'a GameFlow) -> Self {
        Self {
            screen: flow.screen(),
            player_name: flow.player_name(),
            sim: flow.sim(),
            leaderboard: flow.leaderboard(),
        }
    }

    pub fn player(&self) -> &'a Player {
        &self.sim.player
    }

    pub fn score(&self) -> &'a ScoreKeeper {
        &self.sim.score
    }

    /// Live entities, back to front
    pub fn entities(&self) -> impl Iterator<Item = &'a Entity> + 'a {
        self.sim.entities.active()
    }

    /// Whether the "press to start" prompt should be up
    pub fn awaiting_start(&self) -> bool {
        self.screen == Screen::Playing && !self.sim.started
    }

    /// One-line HUD summary
    pub fn hud_line(&self) -> String {
        let player = self.player();
        format!(
            "{} | score {} (x{}) | fuel {:.0}% | alt {:.0} | entities {}",
            self.sim.difficulty.as_str(),
            self.score().points,
            self.score().multiplier,
            player.fuel / MAX_FUEL * 100.0,
            Player::landing_line() - player.bounds().bottom(),
            self.sim.entities.len(),
        )
    }
}

/// Presentation collaborator
pub trait Renderer {
    fn present(&mut self, view: &FrameView<'_>);
}

/// Logs the HUD every `interval` frames and every screen change
#[derive(Debug)]
pub struct HudLog {
    interval: u64,
    frames: u64,
    last_screen: Option<Screen>,
}

impl HudLog {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            last_screen: None,
        }
    }
}

impl Renderer for HudLog {
    fn present(&mut self, view: &FrameView<'_>) {
        if self.last_screen != Some(view.screen) {
            self.last_screen = Some(view.screen);
            log::info!("[{}]", view.screen.as_str());
            if view.awaiting_start() {
                log::info!("Press SPACE to start");
            }
        }

        if view.screen == Screen::Playing && view.sim.started {
            self.frames += 1;
            if self.frames % self.interval == 0 {
                log::info!("{}", view.hud_line());
            }
        }
    }
}
