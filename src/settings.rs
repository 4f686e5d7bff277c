//! Board and ball configuration
//!
//! Persisted as JSON: LocalStorage in the browser, a file on native.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::hex_color;
use crate::renderer::Color;
use crate::renderer::vertex::colors;

/// Ball parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    /// Radius the ball starts growing from
    pub start_size: f32,
    /// Radius at which it stops growing and starts to fall
    pub target_size: f32,
    /// Growth per frame, as a fraction of half the current size
    pub growth_rate: f32,
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Spawn x; centered on the board when unset
    pub spawn_x: Option<f32>,
    pub spawn_y: f32,
    /// Spawn x is offset uniformly within ± this
    pub spawn_jitter: f32,
    /// `#RRGGBB`
    pub fill: String,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            start_size: BALL_START_SIZE,
            target_size: BALL_TARGET_SIZE,
            growth_rate: BALL_GROWTH_RATE,
            gravity: GRAVITY,
            spawn_x: None,
            spawn_y: SPAWN_Y,
            spawn_jitter: SPAWN_JITTER,
            fill: "#81A8B8".to_string(),
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    pub width: f32,
    pub height: f32,
    /// Gap between pegs on both axes
    pub peg_spacing: f32,
    pub peg_radius: f32,
    /// `#RRGGBB`
    pub peg_fill: String,
    /// Subdivision levels of the region index
    pub region_depth: u32,

    // === Ball ===
    pub ball: BallSettings,

    // === Run ===
    /// RNG seed for spawn jitter
    pub seed: u64,
    /// Draw region outlines and peg rims
    pub show_regions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            peg_spacing: PEG_SPACING,
            peg_radius: PEG_RADIUS,
            peg_fill: "#A4BCC2".to_string(),
            region_depth: REGION_DEPTH,
            ball: BallSettings::default(),
            seed: 0,
            show_regions: false,
        }
    }
}

impl Settings {
    /// Board width and height as a vector
    pub fn dimensions(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Spawn x before jitter
    pub fn spawn_x(&self) -> f32 {
        self.ball.spawn_x.unwrap_or(self.width / 2.0)
    }

    pub fn ball_color(&self) -> Color {
        hex_color(&self.ball.fill).unwrap_or(colors::BALL)
    }

    pub fn peg_color(&self) -> Color {
        hex_color(&self.peg_fill).unwrap_or(colors::PEG)
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "plinko_heat_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
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

    /// Load settings from a JSON file, falling back to defaults (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_board() {
        let settings = Settings::default();
        assert_eq!(settings.dimensions(), Vec2::new(500.0, 500.0));
        assert_eq!(settings.spawn_x(), 250.0);
        assert_eq!(settings.region_depth, 3);
        assert_eq!(settings.ball_color(), hex_color("#81A8B8").unwrap());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            Settings::from_json(r#"{ "width": 300, "ball": { "gravity": 0.5 } }"#).unwrap();
        assert_eq!(settings.width, 300.0);
        assert_eq!(settings.height, BOARD_HEIGHT);
        assert_eq!(settings.spawn_x(), 150.0);
        assert_eq!(settings.ball.gravity, 0.5);
        assert_eq!(settings.ball.target_size, BALL_TARGET_SIZE);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.seed = 42;
        settings.show_regions = true;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_color_falls_back() {
        let mut settings = Settings::default();
        settings.peg_fill = "teal".to_string();
        assert_eq!(settings.peg_color(), colors::PEG);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ width: }").is_err());
    }
}
