//! Application state machine
//!
//! Screens: menu, playing, paused, game over, name entry and the high-score
//! table. Every transition runs the old screen's exit hook and the new
//! screen's enter hook, including restarts from game over. Discrete key
//! presses drive transitions; held keys only steer the ship while playing.

use crate::audio::{AudioManager, SoundCue};
use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::{HighScores, MAX_NAME_LEN};
use crate::persistence::Storage;
use crate::platform::Key;
use crate::settings::Settings;
use crate::sim::{GameState, RenderSnapshot, TickInput, tick};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Playing,
    Paused,
    GameOver,
    EnterName,
    HighScores,
}

/// What to put on screen this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: AppState,
    /// Playfield, drawn underneath the text on in-game screens
    pub game: Option<RenderSnapshot>,
    /// Overlay text, top to bottom
    pub lines: Vec<String>,
}

/// Top-level application: owns the run, the leaderboard and the backends
pub struct App {
    state: AppState,
    pub game: GameState,
    pub highscores: HighScores,
    pub settings: Settings,
    storage: Box<dyn Storage>,
    pub audio: AudioManager,
    /// Name being typed on the entry screen
    input_name: String,
    /// Autopilot flies the ship (demo mode)
    pub idle_mode: bool,
    running: bool,
    accumulator: f32,
    // FPS tracking
    frame_times: [f32; 60],
    frame_index: usize,
}

impl App {
    pub fn new(settings: Settings, storage: Box<dyn Storage>, audio: AudioManager, seed: u64) -> Self {
        let highscores = HighScores::load(storage.as_ref());
        log::info!(
            "App ready (seed: {}, difficulty: {})",
            seed,
            settings.difficulty.as_str()
        );
        Self {
            state: AppState::Menu,
            game: GameState::new(seed, settings.difficulty),
            highscores,
            settings,
            storage,
            audio,
            input_name: String::new(),
            idle_mode: false,
            running: true,
            accumulator: 0.0,
            frame_times: [0.0; 60],
            frame_index: 0,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// False once the player quits from the menu
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Switch screens: exit hook of the old one, then enter hook of the new one
    pub fn change_state(&mut self, next: AppState) {
        let prev = self.state;
        self.exit(prev, next);
        self.state = next;
        self.enter(next, prev);
        log::info!("State: {:?} -> {:?}", prev, next);
    }

    fn enter(&mut self, state: AppState, from: AppState) {
        match state {
            // Resuming keeps the run; any other way in starts a fresh one
            AppState::Playing if from != AppState::Paused => {
                self.game.reset();
                self.accumulator = 0.0;
            }
            AppState::EnterName => self.input_name.clear(),
            _ => {}
        }
    }

    fn exit(&mut self, state: AppState, to: AppState) {
        match state {
            AppState::Playing if to != AppState::Paused => self.accumulator = 0.0,
            AppState::EnterName => self.input_name.clear(),
            _ => {}
        }
    }

    /// Handle one discrete key press
    pub fn handle_key(&mut self, key: Key) {
        match self.state {
            AppState::Menu => match key {
                Key::Enter | Key::Char('1') => self.change_state(AppState::Playing),
                Key::Char('h' | 'H' | '2') => self.change_state(AppState::HighScores),
                Key::Escape | Key::Char('q' | 'Q' | '3') => {
                    log::info!("Quit requested");
                    self.running = false;
                }
                _ => {}
            },
            AppState::Playing => match key {
                Key::Escape | Key::Char('p' | 'P') => self.change_state(AppState::Paused),
                Key::Char('i' | 'I') => {
                    self.idle_mode = !self.idle_mode;
                    log::info!("Idle mode: {}", self.idle_mode);
                }
                _ => {}
            },
            AppState::Paused => {
                if matches!(key, Key::Escape | Key::Char('p' | 'P')) {
                    self.change_state(AppState::Playing);
                }
            }
            AppState::GameOver => match key {
                Key::Char('r' | 'R') => self.change_state(AppState::Playing),
                Key::Char('m' | 'M') => self.change_state(AppState::Menu),
                _ => {}
            },
            AppState::EnterName => self.handle_name_key(key),
            AppState::HighScores => {
                if key == Key::Escape {
                    self.change_state(AppState::Menu);
                }
            }
        }
    }

    fn handle_name_key(&mut self, key: Key) {
        match key {
            Key::Enter => {
                if self.input_name.is_empty() {
                    return;
                }
                let name = std::mem::take(&mut self.input_name);
                let score = self.game.score;
                self.highscores
                    .add_highscore(self.storage.as_mut(), &name, score);
                log::info!("High score: {} {}", name, score);
                self.audio.play(SoundCue::HighScore);
                self.change_state(AppState::HighScores);
            }
            Key::Backspace => {
                self.input_name.pop();
            }
            Key::Space => self.push_name_char(' '),
            Key::Char(c) => self.push_name_char(c),
            _ => {}
        }
    }

    /// Append `c` uppercased; a character that uppercases to several stops at the cap
    fn push_name_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        for upper in c.to_uppercase() {
            if self.input_name.chars().count() >= MAX_NAME_LEN {
                break;
            }
            self.input_name.push(upper);
        }
    }

    /// Run fixed simulation steps for `dt` seconds of real time
    ///
    /// Only the playing screen has anything to update.
    pub fn update(&mut self, dt: f32, input: &TickInput) {
        if self.state != AppState::Playing {
            return;
        }

        self.accumulator += dt.min(MAX_FRAME_TIME);
        let input = TickInput {
            idle_mode: input.idle_mode || self.idle_mode,
            ..*input
        };

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.game, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.game.game_over {
                break;
            }
        }

        let events = self.game.take_events();
        self.audio.play_events(&events);
        if self.game.game_over {
            self.finish_run();
        }
    }

    /// The run just ended: name entry if the score places, otherwise game over
    fn finish_run(&mut self) {
        let score = self.game.score;
        self.audio.play(SoundCue::GameOver);
        if self.highscores.is_highscore(score) {
            self.change_state(AppState::EnterName);
        } else {
            self.change_state(AppState::GameOver);
        }
    }

    /// One frame: discrete presses first, then the simulation, then FPS bookkeeping
    pub fn advance_frame(&mut self, elapsed: f32, pressed: &[Key], input: &TickInput) {
        for &key in pressed {
            self.handle_key(key);
            if !self.running {
                return;
            }
        }
        self.update(elapsed, input);

        self.frame_times[self.frame_index] = elapsed;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
    }

    /// Average frames per second over the last 60 frames
    pub fn fps(&self) -> u32 {
        let recorded = self.frame_times.iter().filter(|t| **t > 0.0);
        let (count, total) = recorded.fold((0usize, 0.0f32), |(n, sum), t| (n + 1, sum + t));
        if total <= 0.0 {
            return 0;
        }
        (count as f32 / total).round() as u32
    }

    pub fn draw(&self) -> Frame {
        let (game, mut lines) = match self.state {
            AppState::Menu => {
                let mut lines = vec![
                    "ASTEROIDS".to_string(),
                    "Press ENTER to Start".to_string(),
                    "Press H for High Scores".to_string(),
                    "Press ESC to Quit".to_string(),
                ];
                if let Some(best) = self.highscores.top_score() {
                    lines.push(format!("Best: {}", best));
                }
                (None, lines)
            }
            AppState::Playing => (Some(self.game.snapshot()), self.hud_lines()),
            AppState::Paused => {
                let mut lines = self.hud_lines();
                lines.push("PAUSED - Press P to resume".to_string());
                (Some(self.game.snapshot()), lines)
            }
            AppState::GameOver => {
                let mut lines = self.hud_lines();
                lines.push("GAME OVER - Press R to restart, M for menu".to_string());
                (Some(self.game.snapshot()), lines)
            }
            AppState::EnterName => {
                let mut lines = vec![format!("New high score: {}", self.game.score)];
                if let Some(rank) = self.highscores.potential_rank(self.game.score) {
                    lines.push(format!("Rank #{}", rank));
                }
                lines.push("Enter your name:".to_string());
                lines.push(self.input_name.clone());
                (Some(self.game.snapshot()), lines)
            }
            AppState::HighScores => {
                let mut lines = vec!["HIGH SCORES".to_string()];
                lines.extend(
                    self.highscores
                        .entries
                        .iter()
                        .enumerate()
                        .map(|(i, e)| format!("{}. {}: {}", i + 1, e.name, e.score)),
                );
                lines.push("Press ESC to go back".to_string());
                (None, lines)
            }
        };

        if self.settings.show_fps {
            lines.push(format!("FPS: {}", self.fps()));
        }

        Frame {
            state: self.state,
            game,
            lines,
        }
    }

    fn hud_lines(&self) -> Vec<String> {
        vec![
            format!("Score: {}", self.game.score),
            format!("Lives: {}", self.game.lives),
            format!("Level: {}", self.game.level),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScoreEntry;
    use crate::persistence::MemoryStorage;

    fn app() -> App {
        App::new(
            Settings::default(),
            Box::new(MemoryStorage::new()),
            AudioManager::default(),
            1,
        )
    }

    /// Full top-10 so only high scores qualify
    fn full_table(min: u32) -> HighScores {
        HighScores::from_entries(
            (0..10)
                .map(|i| HighScoreEntry {
                    name: "AAA".to_string(),
                    score: min + i * 100,
                })
                .collect(),
        )
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = app();
        assert_eq!(app.state(), AppState::Menu);

        app.handle_key(Key::Char('h'));
        assert_eq!(app.state(), AppState::HighScores);
        app.handle_key(Key::Escape);
        assert_eq!(app.state(), AppState::Menu);

        app.handle_key(Key::Char('1'));
        assert_eq!(app.state(), AppState::Playing);
    }

    #[test]
    fn test_quit_from_menu() {
        let mut app = app();
        app.handle_key(Key::Char('q'));
        assert!(!app.is_running());
    }

    #[test]
    fn test_pause_keeps_run() {
        let mut app = app();
        app.handle_key(Key::Enter);
        app.game.score = 300;

        app.handle_key(Key::Char('p'));
        assert_eq!(app.state(), AppState::Paused);
        let ticks = app.game.time_ticks;
        app.update(0.5, &TickInput::default());
        assert_eq!(app.game.time_ticks, ticks);

        app.handle_key(Key::Escape);
        assert_eq!(app.state(), AppState::Playing);
        assert_eq!(app.game.score, 300);
    }

    #[test]
    fn test_update_runs_bounded_substeps() {
        let mut app = app();
        app.handle_key(Key::Enter);
        app.update(5.0, &TickInput::default());
        // Frame time is clamped to 0.1s: about six steps at 60 Hz
        let ticks = app.game.time_ticks;
        assert!((5..=6).contains(&ticks), "ran {ticks} steps");
    }

    #[test]
    fn test_game_over_without_highscore() {
        let mut app = app();
        app.highscores = full_table(1000);
        app.handle_key(Key::Enter);
        app.game.lives = 1;
        app.game.score = 10;
        let center = app.game.player.body.pos;
        app.game.ufo_bullets.push(crate::sim::Bullet::new(center, glam::Vec2::ZERO));

        app.update(SIM_DT, &TickInput::default());
        assert_eq!(app.state(), AppState::GameOver);

        // Restart is a real transition back into a fresh run
        app.handle_key(Key::Char('r'));
        assert_eq!(app.state(), AppState::Playing);
        assert_eq!(app.game.lives, 3);
        assert_eq!(app.game.score, 0);
        assert!(!app.game.game_over);
    }

    #[test]
    fn test_name_entry() {
        let mut app = app();
        app.handle_key(Key::Enter);
        app.game.score = 5000;
        app.game.lives = 1;
        let center = app.game.player.body.pos;
        app.game.ufo_bullets.push(crate::sim::Bullet::new(center, glam::Vec2::ZERO));
        app.update(SIM_DT, &TickInput::default());
        assert_eq!(app.state(), AppState::EnterName);
        assert!(app.draw().lines.contains(&"Rank #1".to_string()));

        // Enter with an empty name does nothing
        app.handle_key(Key::Enter);
        assert_eq!(app.state(), AppState::EnterName);

        for c in "abcdefg".chars() {
            app.handle_key(Key::Char(c));
        }
        assert_eq!(app.input_name(), "ABCDE");
        app.handle_key(Key::Backspace);
        assert_eq!(app.input_name(), "ABCD");

        app.handle_key(Key::Enter);
        assert_eq!(app.state(), AppState::HighScores);
        assert_eq!(app.highscores.entries[0].name, "ABCD");
        assert_eq!(app.highscores.entries[0].score, 5000);

        // Persisted through the storage backend
        let stored = HighScores::load(app.storage());
        assert_eq!(stored, app.highscores);
    }

    #[test]
    fn test_name_cap_counts_expanded_uppercase() {
        let mut app = app();
        app.change_state(AppState::EnterName);
        for c in "abcd".chars() {
            app.handle_key(Key::Char(c));
        }
        // 'ß' uppercases to "SS"; only one of them fits
        app.handle_key(Key::Char('ß'));
        assert_eq!(app.input_name(), "ABCDS");
        app.handle_key(Key::Char('x'));
        assert_eq!(app.input_name().chars().count(), MAX_NAME_LEN);

        app.change_state(AppState::Menu);
        app.change_state(AppState::EnterName);
        app.handle_key(Key::Char('\u{FB03}'));
        assert_eq!(app.input_name(), "FFI");
        app.handle_key(Key::Char('\n'));
        assert_eq!(app.input_name(), "FFI");
    }

    #[test]
    fn test_draw_screens() {
        let mut app = app();
        let frame = app.draw();
        assert_eq!(frame.state, AppState::Menu);
        assert!(frame.game.is_none());
        assert!(!frame.lines.iter().any(|l| l.starts_with("Best")));

        app.highscores = full_table(100);
        assert!(app.draw().lines.contains(&"Best: 1000".to_string()));

        app.handle_key(Key::Enter);
        let frame = app.draw();
        assert!(frame.game.is_some());
        assert_eq!(frame.lines[0], "Score: 0");
    }
}
