//! MetaDome - interactive tolerance landscape viewer written in Rust
//!
//! This library provides the coordinated-view engine behind the landscape
//! (scales, visible window, brush/zoom synchronization, redraw and
//! selection) together with the data-fetch, export and desktop UI layers
//! that drive it.
//!
//! ## Module Structure
//!
//! - [`scale`] - Linear domain/range scales and the per-view scale set
//! - [`view`] - Visible window and per-residue boundaries
//! - [`interaction`] - Brush/zoom state machine with echo suppression
//! - [`redraw`] - Retained scene and redraw dispatcher
//! - [`selection`] - Selected residues, independent of the window
//! - [`session`] - `ChartSession` wiring all of the above together
//! - [`payload`] - Landscape payload model and validation
//! - [`details`] - Selected-position table and domain details data
//! - [`colors`] - Tolerance colour ramp and legend
//! - [`zorder`] - Explicit paint order for domain rectangles
//! - [`fetch`] - Background data fetching with last-request-wins
//! - [`export`] - TSV and PNG export of the visible window
//! - [`settings`] - User settings persistence and chart layout
//! - [`error`] - Error types
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components
//!   - `landscape` - Focus, annotation and context views
//!   - `side_panel` - Data source and view controls
//!   - `selection_table` - Selected positions table
//!   - `domain_details` - Domain details window
//!   - `export` - Export dialogs
//!   - `toast` - Toast notification system

pub mod app;
pub mod colors;
pub mod details;
pub mod error;
pub mod export;
pub mod fetch;
pub mod interaction;
pub mod payload;
pub mod redraw;
pub mod scale;
pub mod selection;
pub mod session;
pub mod settings;
pub mod state;
pub mod ui;
pub mod view;
pub mod zorder;
