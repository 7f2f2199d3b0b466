//! Player preferences for the presentation layer
//!
//! Nothing here feeds back into the simulation.

use serde::{Deserialize, Serialize};

/// Audio and presentation preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Gameplay ===
    /// Open the upgrade menu when the window loses focus
    pub pause_on_blur: bool,
    /// Start sessions in demo mode
    pub idle_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            mute_on_blur: true,
            pause_on_blur: true,
            idle_mode: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    pub(crate) fn clamp_volumes(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
    }

    /// Effective effect volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.muted);
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.56).abs() < 1e-6);
    }

    #[test]
    fn test_mute_zeroes_volumes() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_from_json_partial_and_clamped() {
        let settings = Settings::from_json(r#"{"master_volume": 3.0, "idle_mode": true}"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert!(settings.idle_mode);
        assert_eq!(settings.sfx_volume, 1.0);
    }
}
