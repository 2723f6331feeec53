//! Player-facing preferences
//!
//! Read once at startup: from the canvas' `data-settings` attribute in the
//! browser, from a JSON file natively. Nothing is written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading tuning or settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("missing page element: {0}")]
    MissingElement(&'static str),
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all cues
    pub muted: bool,
    /// Play a cue when the ship is destroyed
    pub death_cue: bool,

    // === Controls ===
    /// Left/right screen halves steer on touch devices
    pub touch_controls: bool,
    /// Up/down keys change speed (off in the regular game)
    pub speed_keys: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 0.6,
            muted: false,
            death_cue: true,
            touch_controls: true,
            speed_keys: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling gaps with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Effective cue volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
