//! Sound cues and the sink that plays them
//!
//! The simulation never makes noise itself. It reports `GameEvent`s; the
//! application maps those to cues here and hands them to whatever backend
//! is plugged in.

use crate::settings::Settings;
use crate::sim::{AsteroidSize, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player gun
    Shoot,
    /// Enemy gun
    UfoShoot,
    /// Asteroid or UFO destroyed
    Explode,
    /// Armor absorbed a hit
    Clank,
    PowerUp,
    /// Shield popped instead of a life
    ShieldBreak,
    PlayerHit,
    LevelClear,
    ExtraLife,
    GameOver,
    /// Name entered into the high-score table
    HighScore,
}

/// Procedural voice for a cue: a single enveloped oscillator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Start frequency (Hz)
    pub freq: f32,
    /// Frequency at the end of the envelope
    pub end_freq: f32,
    /// Seconds
    pub duration: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
}

impl SoundCue {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundCue> {
        match event {
            GameEvent::ShotFired { .. } => Some(SoundCue::Shoot),
            GameEvent::UfoFired { .. } => Some(SoundCue::UfoShoot),
            GameEvent::AsteroidDamaged { .. } => Some(SoundCue::Clank),
            GameEvent::AsteroidDestroyed { .. } | GameEvent::UfoDestroyed { .. } => {
                Some(SoundCue::Explode)
            }
            GameEvent::PowerUpCollected(_) => Some(SoundCue::PowerUp),
            GameEvent::ShieldAbsorbed => Some(SoundCue::ShieldBreak),
            GameEvent::PlayerHit { .. } => Some(SoundCue::PlayerHit),
            GameEvent::LevelComplete { .. } => Some(SoundCue::LevelClear),
            GameEvent::BonusLife { .. } => Some(SoundCue::ExtraLife),
            GameEvent::GameOver { .. } => None,
        }
    }

    pub fn tone(&self) -> Tone {
        let (freq, end_freq, duration, gain) = match self {
            SoundCue::Shoot => (880.0, 440.0, 0.08, 0.3),
            SoundCue::UfoShoot => (660.0, 330.0, 0.1, 0.25),
            SoundCue::Explode => (120.0, 40.0, 0.3, 0.6),
            SoundCue::Clank => (300.0, 280.0, 0.06, 0.35),
            SoundCue::PowerUp => (520.0, 1040.0, 0.2, 0.4),
            SoundCue::ShieldBreak => (900.0, 200.0, 0.25, 0.4),
            SoundCue::PlayerHit => (200.0, 50.0, 0.5, 0.7),
            SoundCue::LevelClear => (440.0, 880.0, 0.6, 0.5),
            SoundCue::ExtraLife => (660.0, 1320.0, 0.4, 0.5),
            SoundCue::GameOver => (330.0, 80.0, 1.2, 0.6),
            SoundCue::HighScore => (523.0, 1046.0, 0.8, 0.5),
        };
        Tone {
            freq,
            end_freq,
            duration,
            gain,
        }
    }
}

/// Playback backend
pub trait AudioSink {
    /// Play `cue` at `volume` in [0, 1]
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Backend that only logs what it would play (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        let tone = cue.tone();
        log::debug!(
            "sfx {:?}: {:.0}->{:.0} Hz, {:.2}s, gain {:.2}",
            cue,
            tone.freq,
            tone.end_freq,
            tone.duration,
            tone.gain * volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(sink: Option<Box<dyn AudioSink>>) -> Self {
        if sink.is_none() {
            log::warn!("No audio sink - audio disabled");
        }
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager configured from the persisted settings
    pub fn from_settings(sink: Option<Box<dyn AudioSink>>, settings: &Settings) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(sink) = self.sink.as_mut() else { return };
        sink.play(cue, vol);
    }

    /// Play the cues for a frame's worth of simulation events
    ///
    /// Explosions are louder for bigger rocks.
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            let Some(cue) = SoundCue::for_event(event) else {
                continue;
            };
            match event {
                GameEvent::AsteroidDestroyed { size, .. } => {
                    let scale = match size {
                        AsteroidSize::Large => 1.0,
                        AsteroidSize::Medium => 0.8,
                        AsteroidSize::Small => 0.6,
                    };
                    self.play_scaled(cue, scale);
                }
                _ => self.play(cue),
            }
        }
    }

    fn play_scaled(&mut self, cue: SoundCue, scale: f32) {
        let vol = self.effective_volume() * scale;
        if vol <= 0.0 {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.play(cue, vol);
        }
    }
}
