//! Heli Dash entry point
//!
//! Headless driver: loads settings and the leaderboard, walks the menus,
//! and lets the autopilot fly one run at a fixed frame step.
//!
//! Usage: `heli-dash [NAME] [easy|medium|hard]`
//! Data files go in `$HELI_DASH_DATA` (default: current directory).

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};

use heli_dash::audio::{AudioManager, LogSink, SoundEffect};
use heli_dash::flow::{FlowEvent, GameFlow, Screen};
use heli_dash::persistence::JsonFile;
use heli_dash::platform::{FrameView, HudLog, Renderer};
use heli_dash::settings::Settings;
use heli_dash::sim::{Difficulty, TickInput};

/// Fixed frame step for the headless loop
const FRAME_DT: f32 = 1.0 / 60.0;
/// A run still going after this long is abandoned
const MAX_RUN_SECONDS: f32 = 300.0;
/// Frames between HUD log lines
const HUD_INTERVAL: u64 = 120;

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "Autopilot".to_string());
    let difficulty_arg = args.next();

    let data_dir = std::env::var_os("HELI_DASH_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let settings_file = JsonFile::new(data_dir.join("settings.json"));
    let settings = Settings::load_from(&settings_file);
    if !settings_file.exists() {
        if let Err(e) = settings.save_to(&settings_file) {
            log::warn!("Failed to save default settings: {:#}", e);
        }
    }

    let difficulty = match difficulty_arg {
        Some(arg) => match Difficulty::from_str(&arg) {
            Some(d) => d,
            None => bail!("unknown difficulty {:?} (expected easy, medium or hard)", arg),
        },
        None => settings.difficulty,
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Heli Dash starting (seed {})", seed);

    let store = JsonFile::new(data_dir.join("highscores.json"));
    let mut flow = GameFlow::new(seed, Box::new(store)).with_difficulty(difficulty);
    let mut audio = AudioManager::new(Box::new(LogSink));
    audio.apply_settings(&settings);
    let mut renderer = HudLog::new(HUD_INTERVAL);

    audio.on_screen(flow.screen());
    renderer.present(&FrameView::of(&flow));

    // Menu -> name entry -> difficulty -> play
    let mut script = vec![FlowEvent::Start];
    script.extend(name.chars().map(FlowEvent::TextInput));
    script.push(FlowEvent::Submit);
    script.push(FlowEvent::ConfirmDifficulty);
    for event in script {
        if flow.handle(event).is_some() {
            audio.play(SoundEffect::Click);
            audio.on_screen(flow.screen());
        }
        renderer.present(&FrameView::of(&flow));
    }
    if flow.screen() != Screen::Playing {
        bail!(
            "could not start a run as {:?}: names need 3-15 letters, digits or spaces",
            name
        );
    }

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let max_frames = (MAX_RUN_SECONDS / FRAME_DT) as u64;
    for _ in 0..max_frames {
        let outcome = flow.frame(&input, FRAME_DT);
        for event in &outcome.events {
            audio.notify(event);
        }
        audio.on_screen(flow.screen());
        renderer.present(&FrameView::of(&flow));
        if flow.screen() != Screen::Playing {
            break;
        }
    }

    let sim = flow.sim();
    match sim.ended {
        Some(end) => {
            log::info!(
                "{} finished on {}: {:?}, {} points in {:.1}s",
                flow.player_name(),
                sim.difficulty.as_str(),
                end,
                sim.score.points,
                sim.elapsed
            );
            if flow.last_rank().is_some() {
                audio.play(SoundEffect::HighScore);
            }
        }
        None => log::info!(
            "Time limit reached with {} points, abandoning run",
            sim.score.points
        ),
    }

    for (i, entry) in flow.leaderboard().entries.iter().enumerate() {
        log::info!(
            "{:>2}. {:<15} {:>6} {}",
            i + 1,
            entry.name,
            entry.score,
            entry.difficulty.as_str()
        );
    }

    // Back out the way a player would
    if flow.screen() == Screen::Playing {
        flow.handle(FlowEvent::Pause);
    }
    flow.handle(FlowEvent::QuitToMenu);
    audio.on_screen(flow.screen());
    flow.handle(FlowEvent::Close);
    audio.on_screen(flow.screen());

    Ok(())
}
