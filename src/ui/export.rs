//! Landscape export actions (TSV, PNG).

use crate::app::MetadomeApp;
use crate::export::{render_png, write_tsv};

impl MetadomeApp {
    /// File name stem for exports of the loaded transcript
    fn export_stem(&self) -> String {
        let payload = self.session.payload();
        let (lo, hi) = self.session.visible_bounds();
        let subject = if payload.gene_name.is_empty() {
            payload.transcript_id.as_str()
        } else {
            payload.gene_name.as_str()
        };
        format!("metadome_{}_{}-{}", subject, lo, hi)
    }

    /// Export the visible positions as TSV
    pub fn export_tsv(&mut self) {
        // Show save dialog
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Tab-separated values", &["tsv"])
            .set_file_name(format!("{}.tsv", self.export_stem()))
            .save_file()
        else {
            return;
        };

        match write_tsv(&self.session, &path) {
            Ok(()) => self.show_toast_success("Positions exported as TSV"),
            Err(e) => self.show_toast_error(&format!("Export failed: {}", e)),
        }
    }

    /// Export the focus view as PNG
    pub fn export_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}.png", self.export_stem()))
            .save_file()
        else {
            return;
        };

        match render_png(&self.session, &path) {
            Ok(()) => self.show_toast_success("Landscape exported as PNG"),
            Err(e) => self.show_toast_error(&format!("Export failed: {}", e)),
        }
    }
}
