//! Player settings and preferences
//!
//! Persisted as JSON: LocalStorage on web, a file named by
//! `FURNACE_RELINE_SETTINGS` on native.

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 128,
            QualityPreset::High => 512,
        }
    }
}

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Dust and sparks from the tool head
    pub particles: bool,
    /// Reduced motion (no particles)
    pub reduced_motion: bool,
    /// How long a notification stays up
    pub notification_seconds: f32,
    /// Fixed run seed; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            reduced_motion: false,
            notification_seconds: 4.0,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Notification lifetime in ticks (at least one)
    pub fn notification_ticks(&self) -> u32 {
        let secs = if self.notification_seconds.is_finite() {
            self.notification_seconds.max(0.0)
        } else {
            0.0
        };
        ((secs / SIM_DT).round() as u32).max(1)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse stored JSON, falling back to defaults on malformed input
    fn parse_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Bad settings JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "furnace_reline_settings";

    /// Environment variable naming the native settings file
    pub const SETTINGS_ENV: &'static str = "FURNACE_RELINE_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::parse_or_default(&json);
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
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("LocalStorage rejected settings");
                    } else {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Load settings from the file named by `FURNACE_RELINE_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::parse_or_default(&json)
            }
            Err(e) => {
                log::warn!("Could not read {} ({}), using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Write settings back to the file named by `FURNACE_RELINE_SETTINGS`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(Self::SETTINGS_ENV) else {
            return;
        };
        match self.to_json() {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => log::info!("Settings saved to {}", path),
                Err(e) => log::warn!("Could not write {} ({})", path, e),
            },
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}
