//! Runtime configuration
//!
//! Read once at startup. On the web it comes from an inline
//! `<script type="application/json" id="game-config">` block when the page
//! provides one; nothing is written back.

use serde::{Deserialize, Serialize};

/// Coach feedback service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachSettings {
    /// Base URL of the text-generation API
    pub endpoint: String,
    /// Model name appended to the endpoint
    pub model: String,
    /// API key passed as a query parameter. No key means no request.
    pub api_key: Option<String>,
    /// Abort the request after this many milliseconds
    pub timeout_ms: u32,
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            timeout_ms: 8000,
        }
    }
}

impl CoachSettings {
    /// Full `generateContent` URL, or `None` when no key is configured
    pub fn url(&self) -> Option<String> {
        let key = self.api_key.as_deref().filter(|k| !k.is_empty())?;
        Some(format!(
            "{}/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            key
        ))
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sponge cursor image. Empty disables the image cursor.
    pub sponge_url: String,
    pub coach: CoachSettings,
    /// Freeze the hint pulse and the guide ring animation
    pub reduced_motion: bool,
    /// Fixed RNG seed (otherwise seeded from the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sponge_url: "https://api.iconify.design/mdi:sponge.svg?color=%23f3c85f".to_string(),
            coach: CoachSettings::default(),
            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Element id of the inline JSON config block
    const CONFIG_ELEMENT_ID: &'static str = "game-config";

    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => {
                log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                Self::from_json(&json)
            }
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native: settings from `CLEANING_RUSH_CONFIG` (a JSON file path) or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("CLEANING_RUSH_CONFIG") else {
            log::debug!("No {} config element on native, using defaults", Self::CONFIG_ELEMENT_ID);
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Self::default()
            }
        }
    }
}
