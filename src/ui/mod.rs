//! UI rendering modules for the MetaDome application.
//!
//! - `landscape` - Focus landscape, schematic protein axis, domain track and context brush
//! - `side_panel` - Data source, transcript lookup and view controls
//! - `selection_table` - Selected positions table and homologous variants
//! - `domain_details` - Domain details window with missense bar charts
//! - `export` - TSV and PNG export dialogs
//! - `toast` - Toast notification system

pub mod domain_details;
pub mod export;
pub mod landscape;
pub mod selection_table;
pub mod side_panel;
pub mod toast;
