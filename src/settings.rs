//! Game settings and preferences
//!
//! Read once at startup from `settings.json`. A missing or corrupt file
//! falls back to defaults.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, load_json};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Lives at the start of a run
    pub fn initial_lives(&self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => 3,
            Difficulty::Hard => 2,
        }
    }

    /// Per-frame probability of a UFO appearing (once unlocked)
    pub fn ufo_spawn_chance(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.001,
            Difficulty::Normal => 0.002,
            Difficulty::Hard => 0.004,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    /// Fixed RNG seed for reproducible runs (time-based when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_fps: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "settings.json";

    /// Load settings, degrading to defaults on any failure
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<Settings>(storage, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!(
                    "Loaded settings (difficulty: {})",
                    settings.difficulty.as_str()
                );
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings: {}", e);
                Self::default()
            }
        }
    }
}
