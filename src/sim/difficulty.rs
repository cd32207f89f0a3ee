//! Difficulty levels and their tuning bundles

use serde::{Deserialize, Serialize};

/// Difficulty level picked on the difficulty screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Tuning bundle for this level
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                scroll_speed: 80.0,
                drain_rate: 2.0,
                spawn_interval: 3.0,
                thrust: 350.0,
            },
            Difficulty::Medium => DifficultyProfile {
                scroll_speed: 100.0,
                drain_rate: 2.5,
                spawn_interval: 2.5,
                thrust: 400.0,
            },
            Difficulty::Hard => DifficultyProfile {
                scroll_speed: 130.0,
                drain_rate: 3.0,
                spawn_interval: 1.5,
                thrust: 450.0,
            },
        }
    }
}

/// Live simulation constants. Replaced as a whole, never field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Leftward speed of the world (pixels/s)
    pub scroll_speed: f32,
    /// Fuel lost per second while airborne
    pub drain_rate: f32,
    /// Seconds between hazard spawns
    pub spawn_interval: f32,
    /// Upward speed while thrust is held (pixels/s)
    pub thrust: f32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}
