//! Screen flow
//!
//! Menus, name entry, difficulty pick, play, pause and game over. Every
//! screen change goes through [`next_screen`]; the simulation only advances
//! while the screen is [`Screen::Playing`].

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, NAME_MAX_LEN, NAME_MIN_LEN};
use crate::highscores::{HighScoreEntry, HighScores, LeaderboardStore};
use crate::sim::{Difficulty, SimState, TickInput, TickOutcome, tick};

/// Which screen is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Menu,
    NameEntry,
    DifficultySelect,
    Playing,
    Paused,
    GameOver,
    Options,
    Help,
    Settings,
    Credits,
    HighScores,
    /// Process is shutting down
    Closed,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Menu => "Menu",
            Screen::NameEntry => "NameEntry",
            Screen::DifficultySelect => "DifficultySelect",
            Screen::Playing => "Playing",
            Screen::Paused => "Paused",
            Screen::GameOver => "GameOver",
            Screen::Options => "Options",
            Screen::Help => "Help",
            Screen::Settings => "Settings",
            Screen::Credits => "Credits",
            Screen::HighScores => "HighScores",
            Screen::Closed => "Closed",
        }
    }
}

/// Input the flow reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// Menu "Play"
    Start,
    OpenOptions,
    OpenHelp,
    OpenSettings,
    OpenCredits,
    OpenHighScores,
    /// Escape / back button
    Back,
    /// Typed character (name entry only)
    TextInput(char),
    Backspace,
    /// Confirm the typed name
    Submit,
    PickDifficulty(Difficulty),
    /// Play at the highlighted (preselected) difficulty
    ConfirmDifficulty,
    Pause,
    Resume,
    QuitToMenu,
    Restart,
    /// The active run just ended
    RunEnded,
    /// Menu "Exit"
    Exit,
    /// Window closed or external stop signal
    Close,
}

/// Facts some transitions depend on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guards {
    pub name_valid: bool,
    pub run_over: bool,
}

/// The transition table. `None` means the event does nothing on `from`.
pub fn next_screen(from: Screen, event: FlowEvent, guards: Guards) -> Option<Screen> {
    use FlowEvent as E;
    use Screen as S;

    let to = match (from, event) {
        (S::Closed, _) => return None,
        (_, E::Close) => S::Closed,

        (S::Menu, E::Start) => S::NameEntry,
        (S::Menu, E::OpenOptions) => S::Options,
        (S::Menu, E::OpenHighScores) => S::HighScores,
        (S::Menu, E::OpenCredits) => S::Credits,
        (S::Menu, E::Exit) => S::Closed,

        (S::NameEntry, E::Submit) if guards.name_valid => S::DifficultySelect,
        (S::NameEntry, E::Back) => S::Menu,

        (S::DifficultySelect, E::PickDifficulty(_) | E::ConfirmDifficulty) => S::Playing,
        (S::DifficultySelect, E::Back) => S::NameEntry,

        (S::Playing, E::Pause | E::Back) => S::Paused,
        (S::Playing, E::RunEnded) if guards.run_over => S::GameOver,

        (S::Paused, E::Resume | E::Back) => S::Playing,
        (S::Paused, E::QuitToMenu) => S::Menu,

        (S::GameOver, E::Restart) => S::Playing,
        (S::GameOver, E::QuitToMenu) => S::Menu,

        (S::Options, E::OpenHelp) => S::Help,
        (S::Options, E::OpenSettings) => S::Settings,
        (S::Options, E::Back) => S::Menu,
        (S::Help | S::Settings, E::Back) => S::Options,
        (S::Credits | S::HighScores, E::Back) => S::Menu,

        _ => return None,
    };
    Some(to)
}

/// Characters allowed in a player name
pub fn accepts_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' '
}

/// Whether `name` can be submitted
pub fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) && name.chars().all(accepts_name_char)
}

/// Screen flow plus the run and leaderboard it drives
pub struct GameFlow {
    screen: Screen,
    player_name: String,
    difficulty: Difficulty,
    sim: SimState,
    leaderboard: HighScores,
    store: Box<dyn LeaderboardStore>,
    /// Current run already written to the leaderboard
    committed: bool,
    last_rank: Option<usize>,
}

impl GameFlow {
    /// Start on the menu, with the leaderboard loaded from `store`
    pub fn new(seed: u64, store: Box<dyn LeaderboardStore>) -> Self {
        let leaderboard = HighScores::load(store.as_ref());
        let difficulty = Difficulty::default();
        Self {
            screen: Screen::Menu,
            player_name: String::new(),
            difficulty,
            sim: SimState::new(seed, difficulty),
            leaderboard,
            store,
            committed: false,
            last_rank: None,
        }
    }

    /// Preselect a difficulty (e.g. from settings)
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_closed(&self) -> bool {
        self.screen == Screen::Closed
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut SimState {
        &mut self.sim
    }

    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    /// Leaderboard rank of the last finished run, if it placed
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Apply one input event. Returns the new screen if it changed.
    pub fn handle(&mut self, event: FlowEvent) -> Option<Screen> {
        if self.screen == Screen::NameEntry {
            match event {
                FlowEvent::TextInput(c) => {
                    if accepts_name_char(c) && self.player_name.chars().count() < NAME_MAX_LEN {
                        self.player_name.push(c);
                    }
                    return None;
                }
                FlowEvent::Backspace => {
                    self.player_name.pop();
                    return None;
                }
                _ => {}
            }
        }

        let guards = Guards {
            name_valid: is_valid_name(&self.player_name),
            run_over: self.sim.is_over(),
        };
        let from = self.screen;
        let to = next_screen(from, event, guards)?;

        if let FlowEvent::PickDifficulty(difficulty) = event {
            self.difficulty = difficulty;
        }
        self.screen = to;
        log::debug!("Screen {} -> {}", from.as_str(), to.as_str());
        self.on_enter(from, to);
        Some(to)
    }

    /// Advance one frame. Only `Playing` touches the simulation.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> TickOutcome {
        if self.screen != Screen::Playing {
            return TickOutcome::default();
        }

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let outcome = tick(&mut self.sim, input, dt);
        if outcome.ended.is_some() {
            self.handle(FlowEvent::RunEnded);
        }
        outcome
    }

    fn on_enter(&mut self, from: Screen, to: Screen) {
        match (from, to) {
            (Screen::Menu, Screen::NameEntry) => self.player_name.clear(),
            (Screen::DifficultySelect | Screen::GameOver, Screen::Playing) => self.start_run(),
            (_, Screen::GameOver) => self.commit_score(),
            (_, Screen::Closed) => log::info!("Closing"),
            _ => {}
        }
    }

    fn start_run(&mut self) {
        self.sim.reset(self.difficulty);
        self.committed = false;
        self.last_rank = None;
    }

    /// Write the finished run to the leaderboard, once per run
    fn commit_score(&mut self) {
        if self.committed {
            return;
        }
        self.committed = true;

        let entry = HighScoreEntry {
            name: self.player_name.clone(),
            score: self.sim.score.points,
            difficulty: self.difficulty,
        };
        self.last_rank = self.leaderboard.insert(entry);
        match self.last_rank {
            Some(rank) => log::info!(
                "{} placed #{} with {} points",
                self.player_name,
                rank,
                self.sim.score.points
            ),
            None => log::info!("{} scored {} points", self.player_name, self.sim.score.points),
        }

        if let Err(e) = self.leaderboard.save(self.store.as_mut()) {
            log::warn!("Failed to save high scores: {:#}", e);
        }
    }
}
