//! Application state types and constants shared by the UI modules.

use strum::{Display, EnumIter};

use crate::fetch::Endpoint;

// ============================================================================
// Constants
// ============================================================================

/// Payload file extensions (used in file dialogs)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Seconds a toast stays on screen
pub const TOAST_SECONDS: u64 = 3;

/// Zoom factor applied per scroll point on the focus view
pub const WHEEL_ZOOM_SPEED: f64 = 0.002;

/// Text colour used on the dark theme
pub const TEXT_COLOR: [u8; 3] = [220, 220, 220];

/// Muted text colour for secondary labels
pub const MUTED_TEXT_COLOR: [u8; 3] = [150, 150, 150];

// ============================================================================
// Core Types
// ============================================================================

/// Current state of data loading
#[derive(Clone, Debug, PartialEq)]
pub enum LoadingState {
    /// No loading in progress
    Idle,
    /// Loading (contains what is being loaded)
    Loading(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }
}

/// Where the side panel loads data from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumIter)]
pub enum DataSourceKind {
    /// Dashboard HTTP API
    #[default]
    #[strum(serialize = "Dashboard API")]
    Api,
    /// Directory of prebuilt visualizations
    #[strum(serialize = "Prebuilt directory")]
    Prebuilt,
}

/// Type of toast notification (determines color)
#[derive(Clone, Copy, Default)]
pub enum ToastType {
    /// Informational message (blue)
    #[default]
    Info,
    /// Success message (green)
    Success,
    /// Warning message (amber)
    Warning,
    /// Error message (red)
    Error,
}

impl ToastType {
    /// Get the background color for this toast type
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],    // Blue
            ToastType::Success => [113, 120, 78], // Olive green
            ToastType::Warning => [253, 193, 73], // Amber
            ToastType::Error => [135, 30, 28],    // Dark red
        }
    }

    /// Get the text color for this toast type
    pub fn text_color(&self) -> [u8; 3] {
        match self {
            ToastType::Warning => [30, 30, 30], // Dark text for amber background
            _ => [255, 255, 255],               // White text for other backgrounds
        }
    }
}

/// Human readable label of what an endpoint is loading
pub fn loading_label(endpoint: Endpoint, subject: &str) -> String {
    match endpoint {
        Endpoint::Transcripts => format!("transcripts of {}", subject),
        Endpoint::Landscape => format!("landscape of {}", subject),
    }
}

/// Pointer drag in progress on the chart, decided by where it started
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartDrag {
    /// Panning the focus view
    Pan,
    /// Drawing a new brush from a context pixel
    BrushNew { anchor: f64 },
    /// Moving the existing brush grabbed at a context pixel
    BrushMove { grab: f64, brush: (f64, f64) },
}
