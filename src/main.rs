//! MetaDome - interactive tolerance landscape viewer
//!
//! Desktop front end for exploring the per-residue missense tolerance of a
//! protein together with its Pfam domains and ClinVar variants.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use metadome::app::MetadomeApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 1000.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("MetaDome - Tolerance Landscape Viewer")
            .with_app_id("MetaDome")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "MetaDome",
        native_options,
        Box::new(|cc| Ok(Box::new(MetadomeApp::new(cc)))),
    )
}
