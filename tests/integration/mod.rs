//! Integration tests for end-to-end functionality
//!
//! Tests for:
//! - Chart session lifecycle and gestures
//! - TSV and PNG export of the visible window
//! - Loading payloads from prebuilt files

pub mod export_tests;
pub mod session_tests;
