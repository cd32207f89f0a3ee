//! Game settings and preferences
//!
//! Persisted separately from the leaderboard, as JSON.

use serde::{Deserialize, Serialize};

use crate::persistence::JsonFile;
use crate::sim::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Gameplay ===
    /// Preselected on the difficulty screen
    pub difficulty: Difficulty,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.7,
            music_volume: 0.6,
            muted: false,
            difficulty: Difficulty::Medium,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Volume applied to sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Volume applied to music
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Clamp every volume into 0..=1
    pub fn sanitize(&mut self) {
        for v in [
            &mut self.master_volume,
            &mut self.sfx_volume,
            &mut self.music_volume,
        ] {
            *v = if v.is_finite() { (*v).clamp(0.0, 1.0) } else { 0.0 };
        }
    }

    /// Load settings, falling back to defaults
    pub fn load_from(file: &JsonFile) -> Self {
        match file.read::<Settings>() {
            Ok(Some(mut settings)) => {
                settings.sanitize();
                log::info!("Loaded settings from {}", file.path().display());
                settings
            }
            Ok(None) => {
                log::info!("No saved settings found, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save_to(&self, file: &JsonFile) -> anyhow::Result<()> {
        file.write(self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
