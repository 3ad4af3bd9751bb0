//! Tests for user settings persistence
//!
//! Tests cover:
//! - Default settings values
//! - Serialization/deserialization
//! - Chart layout derived ranges

use metadome::session::LandscapeMode;
use metadome::settings::{ChartLayout, Settings, DEFAULT_API_BASE_URL, DEFAULT_MAX_ZOOM};

// ============================================
// Default Settings Tests
// ============================================

#[test]
fn test_settings_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.version, 1);
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.default_mode, LandscapeMode::ToleranceLandscape);
    assert_eq!(settings.max_zoom, 30.0);
    assert_eq!(settings.layout, ChartLayout::default());
}

// ============================================
// Serialization Tests
// ============================================

#[test]
fn test_settings_roundtrip() {
    let settings = Settings {
        api_base_url: "https://example.org/metadome".to_string(),
        default_mode: LandscapeMode::MetaDomainLandscape,
        max_zoom: 12.0,
        ..Settings::default()
    };
    let json = serde_json::to_string_pretty(&settings).unwrap();
    let loaded = Settings::from_json(&json);

    assert_eq!(loaded.api_base_url, "https://example.org/metadome");
    assert_eq!(loaded.default_mode, LandscapeMode::MetaDomainLandscape);
    assert_eq!(loaded.max_zoom, 12.0);
    assert_eq!(loaded.layout, settings.layout);
}

#[test]
fn test_trailing_slash_trimmed() {
    let loaded = Settings::from_json(r#"{"api_base_url": "http://localhost:5000/metadome/"}"#);
    assert_eq!(loaded.api_base_url, "http://localhost:5000/metadome");
}

#[test]
fn test_empty_object_uses_defaults() {
    let loaded = Settings::from_json("{}");
    assert_eq!(loaded.max_zoom, DEFAULT_MAX_ZOOM);
    assert_eq!(loaded.layout, ChartLayout::default());
}

#[test]
fn test_degenerate_layout_replaced() {
    let loaded = Settings::from_json(r#"{"layout": {
        "outer_width": 0.0, "outer_height": 700.0,
        "landscape": {"top": 0, "right": 0, "bottom": 0, "left": 0},
        "annotations": {"top": 0, "right": 0, "bottom": 0, "left": 0},
        "position_info": {"top": 0, "right": 0, "bottom": 0, "left": 0},
        "context": {"top": 0, "right": 0, "bottom": 0, "left": 0}
    }}"#);
    assert_eq!(loaded.layout, ChartLayout::default());
}

// ============================================
// Layout Tests
// ============================================

#[test]
fn test_layout_band_heights() {
    let layout = ChartLayout::default();
    assert_eq!(layout.landscape_height(), 270.0);
    assert_eq!(layout.annotations_height(), 70.0);
    assert_eq!(layout.position_info_height(), 40.0);
    assert_eq!(layout.context_height(), 60.0);
}

#[test]
fn test_narrow_layout_drops_focus_inset() {
    let layout = ChartLayout::default().resized(80.0, 700.0);
    let width = layout.width();
    assert!(width < 80.0);
    assert_eq!(layout.focus_x_range(), (0.0, width));
}
