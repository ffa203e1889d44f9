//! Player preferences
//!
//! Persisted separately from tuning data in LocalStorage.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Aim guide ===
    /// Draw the predicted arc while the cannon is loaded
    pub show_trajectory: bool,
    /// Steps simulated for the aim guide
    pub trajectory_steps: usize,
    /// Draw every Nth predicted point
    pub trajectory_stride: usize,

    // === HUD ===
    /// Show the seven-segment score
    pub show_score: bool,
    /// Show the power gauge next to the cannon
    pub show_power: bool,
    /// Log FPS once per second
    pub show_fps: bool,

    // === Controls ===
    /// Aim follows the mouse pointer
    pub mouse_aim: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_trajectory: true,
            trajectory_steps: 240,
            trajectory_stride: 4,

            show_score: true,
            show_power: true,
            show_fps: false,

            mouse_aim: true,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lobshot_settings";

    /// Parse settings JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Preview step budget (0 when the guide is off)
    pub fn effective_trajectory_steps(&self) -> usize {
        if self.show_trajectory {
            self.trajectory_steps
        } else {
            0
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "show_trajectory": false }"#);
        assert!(!settings.show_trajectory);
        assert_eq!(settings.trajectory_steps, Settings::default().trajectory_steps);
        assert_eq!(settings.effective_trajectory_steps(), 0);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert_eq!(Settings::from_json("[1, 2"), Settings::default());
    }

    #[test]
    fn test_roundtrip_through_json() {
        let settings = Settings {
            mouse_aim: false,
            trajectory_stride: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }
}
