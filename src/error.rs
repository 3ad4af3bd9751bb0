//! Error types for the landscape engine and its collaborators.
//!
//! Each concern has its own error enum; [`MetadomeError`] aggregates them for
//! callers that drive a whole session (the desktop app and the binaries).

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while constructing or updating a scale
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// Domain bounds are equal, so no mapping can be defined
    #[error("Degenerate scale domain: [{0}, {0}]")]
    DegenerateDomain(f64),

    /// A domain or range bound is NaN or infinite
    #[error("Non-finite scale bounds: domain ({0}, {1}), range ({2}, {3})")]
    NonFinite(f64, f64, f64, f64),

    /// Redraw was requested with scales that do not match the visible window
    #[error("Scales are out of sync with the visible window ({lo}, {hi})")]
    OutOfSync { lo: f64, hi: f64 },
}

/// Errors raised while reading a landscape payload
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The JSON could not be parsed
    #[error("Failed to parse payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The server answered with an error object instead of a landscape
    #[error("Server reported an error: {0}")]
    Server(String),

    /// Positions are not strictly increasing
    #[error("Position {current} follows {previous}; positions must be strictly increasing")]
    UnorderedPositions { previous: u32, current: u32 },

    /// A domain interval ends before it starts
    #[error("Domain {id} has start {start} after stop {stop}")]
    InvertedDomain { id: String, start: u32, stop: u32 },

    /// The payload file could not be read
    #[error("Failed to read payload file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the data-fetch layer
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transcript identifier does not look like an Ensembl transcript
    #[error("Invalid transcript identifier: {0}")]
    InvalidTranscript(String),

    /// Gene name is empty or contains unsupported characters
    #[error("Invalid gene name: {0}")]
    InvalidGene(String),

    /// HTTP request failed
    #[error("Request failed: {0}")]
    Http(String),

    /// Response body could not be turned into a payload
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Background worker went away before answering
    #[error("Fetch worker disconnected")]
    Disconnected,
}

/// Errors raised while exporting the visible window
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing loaded, so nothing to export
    #[error("No landscape loaded")]
    NothingLoaded,

    /// Writing the output file failed
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the raster image failed
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors raised while persisting settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Platform config directory is unknown
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Settings could not be written
    #[error("Failed to write settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Aggregate error for session-level operations
#[derive(Debug, Error)]
pub enum MetadomeError {
    #[error(transparent)]
    Scale(#[from] ScaleError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
