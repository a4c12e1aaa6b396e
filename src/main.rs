//! Asteroid Blaster entry point
//!
//! Native headless runner: loads settings and scores from the working
//! directory, then lets the autopilot play one game in real time. Frames are
//! paced to roughly 60 Hz and the measured time between them drives the
//! simulation clock.
//! Usage: `asteroid-blaster [frames]`

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use asteroid_blaster::audio::{AudioManager, LogSink};
use asteroid_blaster::consts::SIM_DT;
use asteroid_blaster::persistence::FileStorage;
use asteroid_blaster::platform::Key;
use asteroid_blaster::sim::TickInput;
use asteroid_blaster::{App, AppState, Settings};

const DEFAULT_FRAMES: u32 = 60 * 60 * 3;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Asteroid Blaster (native) starting...");

    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u32>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let storage = FileStorage::new(".");
    let settings = Settings::load(&storage);
    let seed = settings.seed.unwrap_or_else(time_seed);
    let audio = AudioManager::from_settings(Some(Box::new(LogSink)), &settings);

    let mut app = App::new(settings, Box::new(storage), audio, seed);
    app.idle_mode = true;

    let input = TickInput::default();
    let frame_budget = Duration::from_secs_f32(SIM_DT);
    let mut pressed = vec![Key::Enter];
    let mut last_time = Instant::now();
    for frame in 0..frames {
        let spent = last_time.elapsed();
        if spent < frame_budget {
            thread::sleep(frame_budget - spent);
        }
        let now = Instant::now();
        let dt = now.duration_since(last_time).as_secs_f32();
        last_time = now;

        app.advance_frame(dt, &pressed, &input);
        pressed.clear();

        match app.state() {
            AppState::EnterName => {
                pressed.extend("CPU".chars().map(Key::Char));
                pressed.push(Key::Enter);
            }
            AppState::GameOver | AppState::HighScores => {
                log::info!("Run ended after {} frames", frame + 1);
                break;
            }
            _ => {}
        }
        if !app.is_running() {
            break;
        }
    }

    log::info!(
        "Final: score {}, level {}, lives {}",
        app.game.score,
        app.game.level,
        app.game.lives
    );
    for line in app.draw().lines {
        println!("{line}");
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
