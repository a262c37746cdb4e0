//! Player preferences
//!
//! Persisted in LocalStorage on the web; native runs use the defaults.

use serde::{Deserialize, Serialize};

use crate::platform;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Gate every audio cue
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flappy_gates_settings";

    /// Flip the mute flag, returning the new value
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Volumes clamped to [0, 1]
    pub fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    pub fn load() -> Self {
        match platform::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings.clamped()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if platform::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_muted() {
        let mut settings = Settings::default();
        assert!(!settings.muted);
        assert!(settings.toggle_muted());
        assert!(!settings.toggle_muted());
    }

    #[test]
    fn test_json_roundtrip_with_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{ "muted": true }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_clamped() {
        let settings = Settings {
            master_volume: 3.0,
            sfx_volume: -1.0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_native_load_is_default() {
        assert_eq!(Settings::load(), Settings::default());
    }
}
