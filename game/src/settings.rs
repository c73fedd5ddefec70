use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine::audio::DEFAULT_SAMPLE_RATE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::sfx::{self, SoundCue};

pub const SETTINGS_PATH_ENV: &str = "ARROW_RECALL_SETTINGS_PATH";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingSettings {
    pub round_start_delay_ms: u64,
    pub cue_interval_ms: u64,
    pub inter_round_delay_ms: u64,
    pub beep_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            round_start_delay_ms: 2_000,
            cue_interval_ms: 1_000,
            inter_round_delay_ms: 2_000,
            beep_ms: sfx::DEFAULT_BEEP_LENGTH.as_millis() as u64,
        }
    }
}

impl TimingSettings {
    pub fn clamp(mut self) -> Self {
        self.round_start_delay_ms = self.round_start_delay_ms.max(1);
        self.cue_interval_ms = self.cue_interval_ms.max(1);
        self.inter_round_delay_ms = self.inter_round_delay_ms.max(1);
        self.beep_ms = self.beep_ms.max(1);
        self
    }

    pub fn round_start_delay(&self) -> Duration {
        Duration::from_millis(self.round_start_delay_ms)
    }

    pub fn cue_interval(&self) -> Duration {
        Duration::from_millis(self.cue_interval_ms)
    }

    pub fn inter_round_delay(&self) -> Duration {
        Duration::from_millis(self.inter_round_delay_ms)
    }

    pub fn beep_length(&self) -> Duration {
        Duration::from_millis(self.beep_ms)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioSettings {
    pub master_volume: f32,
    pub theme_volume: f32,
    pub beep_volume: f32,
    pub round_start_volume: f32,
    pub round_win_volume: f32,
    pub game_over_volume: f32,
    pub mute_all: bool,
    pub music_enabled: bool,
    /// Rate at which melodies are synthesized for the output device.
    pub sample_rate_hz: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            theme_volume: sfx::THEME_VOLUME,
            beep_volume: sfx::BEEP_VOLUME,
            round_start_volume: sfx::ROUND_START_VOLUME,
            round_win_volume: sfx::ROUND_WIN_VOLUME,
            game_over_volume: sfx::GAME_OVER_VOLUME,
            mute_all: false,
            music_enabled: true,
            sample_rate_hz: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl AudioSettings {
    pub fn clamp(mut self) -> Self {
        for v in [
            &mut self.master_volume,
            &mut self.theme_volume,
            &mut self.beep_volume,
            &mut self.round_start_volume,
            &mut self.round_win_volume,
            &mut self.game_over_volume,
        ] {
            let x = *v;
            *v = if x.is_finite() { x.clamp(0.0, 1.0) } else { 0.0 };
        }
        self.sample_rate_hz = self.sample_rate_hz.clamp(8_000, 192_000);
        self
    }

    /// Whether the theme should currently be audible.
    pub fn music_on(&self) -> bool {
        !self.mute_all && self.music_enabled
    }

    /// Flips `music_enabled` and returns the new `music_on()`. Has no effect while muted.
    pub fn toggle_music(&mut self) -> bool {
        if self.mute_all {
            return false;
        }
        self.music_enabled = !self.music_enabled;
        self.music_on()
    }

    pub fn effective_music_gain(&self) -> f32 {
        if self.mute_all || !self.music_enabled {
            0.0
        } else {
            self.master_volume * self.theme_volume
        }
    }

    pub fn effective_gain(&self, cue: SoundCue) -> f32 {
        if self.mute_all {
            return 0.0;
        }
        let category = match cue {
            SoundCue::RoundStart => self.round_start_volume,
            SoundCue::RoundWin => self.round_win_volume,
            SoundCue::GameOver => self.game_over_volume,
            SoundCue::Beep(_) => self.beep_volume,
        };
        self.master_volume * category
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VideoSettings {
    pub window_width: u32,
    pub window_height: u32,
    pub vsync: bool,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            window_width: 960,
            window_height: 720,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub video: VideoSettings,
    /// Fixed RNG seed for reproducible sequences; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            timing: TimingSettings::default(),
            audio: AudioSettings::default(),
            video: VideoSettings::default(),
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.timing = self.timing.clamp();
        self.audio = self.audio.clamp();
        self.video.window_width = self.video.window_width.max(320);
        self.video.window_height = self.video.window_height.max(240);
        self
    }
}

fn default_version() -> u32 {
    1
}

/// Where settings are read from. Settings are never written back.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$ARROW_RECALL_SETTINGS_PATH`, else `$XDG_CONFIG_HOME/arrow-recall/settings.json`,
    /// else `~/.config/arrow-recall/settings.json`.
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os(SETTINGS_PATH_ENV) {
            return Self::at(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::at(base.join("arrow-recall").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields defaults; unreadable or malformed files are errors.
    pub fn load(&self) -> Result<GameSettings, SettingsError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file; using defaults");
                return Ok(GameSettings::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice::<GameSettings>(&bytes)
            .map(GameSettings::sanitized)
            .map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    pub fn load_or_default(&self) -> GameSettings {
        self.load().unwrap_or_else(|err| {
            warn!(%err, "ignoring settings file");
            GameSettings::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings_match_game_pacing() {
        let t = TimingSettings::default();
        assert_eq!(t.round_start_delay(), Duration::from_millis(2_000));
        assert_eq!(t.cue_interval(), Duration::from_millis(1_000));
        assert_eq!(t.inter_round_delay(), Duration::from_millis(2_000));
        assert_eq!(t.beep_length(), Duration::from_millis(200));
    }

    #[test]
    fn audio_gains_respect_mute_flags() {
        let mut audio = AudioSettings::default();
        assert!((audio.effective_music_gain() - 0.25).abs() < 1e-6);
        assert!((audio.effective_gain(SoundCue::GameOver) - 1.0).abs() < 1e-6);

        audio.music_enabled = false;
        assert_eq!(audio.effective_music_gain(), 0.0);
        assert!(audio.effective_gain(SoundCue::RoundWin) > 0.0);

        audio.mute_all = true;
        assert_eq!(audio.effective_gain(SoundCue::RoundWin), 0.0);
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let settings = GameSettings {
            version: 42,
            timing: TimingSettings {
                cue_interval_ms: 0,
                ..TimingSettings::default()
            },
            audio: AudioSettings {
                master_volume: 3.0,
                beep_volume: -1.0,
                theme_volume: f32::NAN,
                ..AudioSettings::default()
            },
            video: VideoSettings {
                window_width: 10,
                ..VideoSettings::default()
            },
            seed: Some(5),
        }
        .sanitized();

        assert_eq!(settings.version, 1);
        assert_eq!(settings.timing.cue_interval_ms, 1);
        assert_eq!(settings.audio.master_volume, 1.0);
        assert_eq!(settings.audio.beep_volume, 0.0);
        assert_eq!(settings.audio.theme_volume, 0.0);
        assert_eq!(settings.video.window_width, 320);
        assert_eq!(settings.seed, Some(5));
    }

    #[test]
    fn sample_rate_is_clamped_to_a_playable_range() {
        let low = AudioSettings {
            sample_rate_hz: 0,
            ..AudioSettings::default()
        };
        assert_eq!(low.clamp().sample_rate_hz, 8_000);

        let high = AudioSettings {
            sample_rate_hz: 1_000_000,
            ..AudioSettings::default()
        };
        assert_eq!(high.clamp().sample_rate_hz, 192_000);
        assert_eq!(AudioSettings::default().clamp().sample_rate_hz, DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn music_toggle_starts_from_the_configured_state() {
        let mut audio = AudioSettings {
            music_enabled: false,
            ..AudioSettings::default()
        };
        assert!(!audio.music_on());
        assert!(audio.toggle_music());
        assert!(audio.music_on());
        assert!(!audio.toggle_music());
        assert!(!audio.music_on());
    }

    #[test]
    fn music_toggle_is_ignored_while_muted() {
        let mut audio = AudioSettings {
            mute_all: true,
            ..AudioSettings::default()
        };
        assert!(!audio.music_on());
        assert!(!audio.toggle_music());
        assert!(audio.music_enabled);
        assert_eq!(audio.effective_music_gain(), 0.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let parsed: GameSettings =
            serde_json::from_str(r#"{"timing":{"cue_interval_ms":500},"seed":9}"#)
                .expect("settings JSON should parse");
        assert_eq!(parsed.timing.cue_interval_ms, 500);
        assert_eq!(parsed.timing.round_start_delay_ms, 2_000);
        assert_eq!(parsed.audio, AudioSettings::default());
        assert_eq!(parsed.seed, Some(9));
    }
}
