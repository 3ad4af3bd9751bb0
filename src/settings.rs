//! User settings persistence and chart layout.
//!
//! Settings are stored as JSON in the platform config directory. A missing or
//! unreadable file silently falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::SettingsError;
use crate::session::LandscapeMode;

/// Default location of the dashboard API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/metadome";

/// Default maximum zoom factor of the focus view
pub const DEFAULT_MAX_ZOOM: f64 = 30.0;

/// Inset of the focus x range from both sides of the landscape, in pixels
pub const FOCUS_X_INSET: f64 = 40.0;

/// Margins around one view, in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Pixel layout of the landscape and its coordinated views
///
/// Every view shares the outer canvas; its margins carve out a band.
/// Pixel ranges are fixed when a chart is constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub outer_width: f64,
    pub outer_height: f64,
    pub landscape: Margin,
    pub annotations: Margin,
    pub position_info: Margin,
    pub context: Margin,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            outer_width: 1300.0,
            outer_height: 700.0,
            landscape: Margin::new(20.0, 20.0, 410.0, 80.0),
            annotations: Margin::new(310.0, 20.0, 320.0, 80.0),
            position_info: Margin::new(325.0, 20.0, 335.0, 80.0),
            context: Margin::new(410.0, 20.0, 230.0, 80.0),
        }
    }
}

impl ChartLayout {
    /// Plot width shared by landscape, annotation and context views
    pub fn width(&self) -> f64 {
        (self.outer_width - self.landscape.left - self.landscape.right).max(1.0)
    }

    fn band_height(&self, margin: &Margin) -> f64 {
        (self.outer_height - margin.top - margin.bottom).max(1.0)
    }

    pub fn landscape_height(&self) -> f64 {
        self.band_height(&self.landscape)
    }

    pub fn annotations_height(&self) -> f64 {
        self.band_height(&self.annotations)
    }

    pub fn position_info_height(&self) -> f64 {
        self.band_height(&self.position_info)
    }

    pub fn context_height(&self) -> f64 {
        self.band_height(&self.context)
    }

    /// Focus x pixel range, inset so edge residues are not cut in half
    pub fn focus_x_range(&self) -> (f64, f64) {
        let width = self.width();
        if width > 2.0 * FOCUS_X_INSET {
            (FOCUS_X_INSET, width - FOCUS_X_INSET)
        } else {
            (0.0, width)
        }
    }

    pub fn context_x_range(&self) -> (f64, f64) {
        (0.0, self.width())
    }

    /// Landscape y range; pixel y grows downwards
    pub fn landscape_y_range(&self) -> (f64, f64) {
        (self.landscape_height(), 0.0)
    }

    pub fn context_y_range(&self) -> (f64, f64) {
        (self.context_height(), 0.0)
    }

    /// Scale the whole layout to a new outer size, keeping margins proportional
    pub fn resized(&self, outer_width: f64, outer_height: f64) -> Self {
        let sx = outer_width / self.outer_width;
        let sy = outer_height / self.outer_height;
        let scale = |m: &Margin| Margin::new(m.top * sy, m.right * sx, m.bottom * sy, m.left * sx);
        Self {
            outer_width,
            outer_height,
            landscape: scale(&self.landscape),
            annotations: scale(&self.annotations),
            position_info: scale(&self.position_info),
            context: scale(&self.context),
        }
    }
}

/// User settings that persist across sessions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Base URL of the dashboard API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Landscape shown when a chart is created
    #[serde(default)]
    pub default_mode: LandscapeMode,
    /// Maximum zoom factor of the focus view
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    /// Pixel layout of the chart
    #[serde(default)]
    pub layout: ChartLayout,
}

fn default_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_max_zoom() -> f64 {
    DEFAULT_MAX_ZOOM
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            api_base_url: default_api_base_url(),
            default_mode: LandscapeMode::default(),
            max_zoom: DEFAULT_MAX_ZOOM,
            layout: ChartLayout::default(),
        }
    }
}

impl Settings {
    /// Get the config directory path for the viewer
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("MetaDome"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("MetaDome"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("metadome"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        let Some(path) = Self::get_settings_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_json(&content),
            Err(e) => {
                tracing::warn!("Failed to read settings from {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse settings, falling back to defaults on malformed content
    pub fn from_json(content: &str) -> Self {
        match serde_json::from_str::<Settings>(content) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                tracing::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with defaults
    fn sanitized(mut self) -> Self {
        if !self.max_zoom.is_finite() || self.max_zoom < 1.0 {
            self.max_zoom = DEFAULT_MAX_ZOOM;
        }
        if !(self.layout.outer_width > 0.0 && self.layout.outer_height > 0.0) {
            self.layout = ChartLayout::default();
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::get_settings_path().ok_or(SettingsError::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::info!("Saved settings to {:?}", path);

        Ok(())
    }
}
