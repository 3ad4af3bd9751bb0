//! Core module tests for the landscape engine
//!
//! Tests for:
//! - Linear scales and the scale set
//! - Visible window clamping and position boundaries
//! - Brush/zoom coordination
//! - Redraw of the retained scene
//! - Payload parsing and validation
//! - Settings persistence

pub mod interaction_tests;
pub mod payload_tests;
pub mod scale_tests;
pub mod settings_tests;
pub mod view_tests;
