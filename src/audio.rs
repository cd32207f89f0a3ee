//! Audio cues
//!
//! Fire-and-forget: the game tells an [`AudioSink`] what to play and at what
//! volume. Mapping from simulation events and screens to cues lives here.

use crate::flow::Screen;
use crate::settings::Settings;
use crate::sim::SimEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Menu button
    Click,
    /// Engine spins up at the start of a run
    Engine,
    /// Lift pressed
    Thrust,
    Coin,
    Fuel,
    PowerUp,
    /// A timed effect ran out
    PowerDown,
    /// Shield soaked up a hit
    ShieldHit,
    Crash,
    /// Finished run made the leaderboard
    HighScore,
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Game,
}

impl SoundEffect {
    /// Cue for a simulation event
    pub fn for_event(event: &SimEvent) -> Self {
        match event {
            SimEvent::RunStarted => SoundEffect::Engine,
            SimEvent::Thrust => SoundEffect::Thrust,
            SimEvent::CoinCollected { .. } => SoundEffect::Coin,
            SimEvent::Refueled { .. } => SoundEffect::Fuel,
            SimEvent::PowerUpCollected(_) => SoundEffect::PowerUp,
            SimEvent::PowerUpExpired(_) => SoundEffect::PowerDown,
            SimEvent::ShieldAbsorbed => SoundEffect::ShieldHit,
            SimEvent::Crashed | SimEvent::FuelExhausted => SoundEffect::Crash,
        }
    }
}

impl MusicTrack {
    /// Track for a screen; `None` is silence
    pub fn for_screen(screen: Screen) -> Option<Self> {
        match screen {
            Screen::Playing => Some(MusicTrack::Game),
            Screen::Paused | Screen::GameOver | Screen::Closed => None,
            _ => Some(MusicTrack::Menu),
        }
    }
}

/// Whatever actually makes noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Switch background music; `None` stops it
    fn music(&mut self, track: Option<MusicTrack>, volume: f32);
}

/// Sink that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
    }

    fn music(&mut self, track: Option<MusicTrack>, volume: f32) {
        log::debug!("music {:?} @ {:.2}", track, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    /// Volumes and mute in effect
    settings: Settings,
    track: Option<MusicTrack>,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            settings: Settings::default(),
            track: None,
        }
    }

    /// Take volumes and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.settings = settings.clone();
        self.settings.sanitize();
        self.restart_music();
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.settings.master_volume = vol;
        self.settings.sanitize();
        self.restart_music();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.restart_music();
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        self.settings.effective_sfx_volume()
    }

    /// Re-send the current track at the new level
    fn restart_music(&mut self) {
        if let Some(track) = self.track {
            self.sink
                .music(Some(track), self.settings.effective_music_volume());
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// React to a simulation event
    pub fn notify(&mut self, event: &SimEvent) {
        self.play(SoundEffect::for_event(event));
    }

    /// Follow a screen change with the right music
    pub fn on_screen(&mut self, screen: Screen) {
        let track = MusicTrack::for_screen(screen);
        if track != self.track {
            self.track = track;
            self.sink.music(track, self.settings.effective_music_volume());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Cue {
        Sfx(SoundEffect, f32),
        Music(Option<MusicTrack>, f32),
    }

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<Cue>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push(Cue::Sfx(effect, volume));
        }

        fn music(&mut self, track: Option<MusicTrack>, volume: f32) {
            self.0.borrow_mut().push(Cue::Music(track, volume));
        }
    }

    fn manager(settings: &Settings) -> (AudioManager, Recorder) {
        let rec = Recorder::default();
        let mut audio = AudioManager::new(Box::new(rec.clone()));
        audio.apply_settings(settings);
        (audio, rec)
    }

    #[test]
    fn test_events_map_to_cues() {
        let (mut audio, rec) = manager(&Settings {
            master_volume: 1.0,
            sfx_volume: 0.5,
            ..Default::default()
        });
        audio.notify(&SimEvent::CoinCollected {
            value: 5,
            awarded: 5,
        });
        audio.notify(&SimEvent::PowerUpExpired(PowerUpKind::Shield));
        assert_eq!(
            *rec.0.borrow(),
            [
                Cue::Sfx(SoundEffect::Coin, 0.5),
                Cue::Sfx(SoundEffect::PowerDown, 0.5)
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut audio, rec) = manager(&Settings {
            muted: true,
            ..Default::default()
        });
        audio.notify(&SimEvent::Crashed);
        audio.play(SoundEffect::Click);
        assert!(rec.0.borrow().is_empty());
    }

    #[test]
    fn test_volume_changes_follow_settings() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            music_volume: 0.8,
            ..Default::default()
        };
        let (mut audio, rec) = manager(&settings);
        assert_eq!(audio.effective_volume(), settings.effective_sfx_volume());

        audio.on_screen(Screen::Playing);
        audio.set_master_volume(4.0);
        audio.set_muted(true);
        audio.play(SoundEffect::Coin);
        assert_eq!(
            *rec.0.borrow(),
            [
                Cue::Music(Some(MusicTrack::Game), 0.4),
                Cue::Music(Some(MusicTrack::Game), 0.8),
                Cue::Music(Some(MusicTrack::Game), 0.0),
            ]
        );
    }

    #[test]
    fn test_music_follows_screens() {
        let (mut audio, rec) = manager(&Settings {
            master_volume: 1.0,
            music_volume: 1.0,
            ..Default::default()
        });
        audio.on_screen(Screen::Menu);
        audio.on_screen(Screen::Options);
        audio.on_screen(Screen::Playing);
        audio.on_screen(Screen::Paused);
        assert_eq!(
            *rec.0.borrow(),
            [
                Cue::Music(Some(MusicTrack::Menu), 1.0),
                Cue::Music(Some(MusicTrack::Game), 1.0),
                Cue::Music(None, 1.0),
            ]
        );
    }
}
