//! Side panel: data source, transcript lookup and view controls.

use eframe::egui;
use strum::IntoEnumIterator;

use crate::app::MetadomeApp;
use crate::details::{ensembl_url, uniprot_url};
use crate::session::LandscapeMode;
use crate::state::{DataSourceKind, MUTED_TEXT_COLOR, SUPPORTED_EXTENSIONS};

/// Default width of the side panel in pixels
pub const SIDE_PANEL_WIDTH: f32 = 280.0;

/// Minimum width of the side panel
pub const SIDE_PANEL_MIN_WIDTH: f32 = 220.0;

fn muted() -> egui::Color32 {
    egui::Color32::from_rgb(MUTED_TEXT_COLOR[0], MUTED_TEXT_COLOR[1], MUTED_TEXT_COLOR[2])
}

impl MetadomeApp {
    /// Render the side panel content
    pub fn render_side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("MetaDome");
        ui.add_space(8.0);
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.render_source_section(ui);
                ui.separator();
                self.render_lookup_section(ui);
                ui.separator();
                self.render_view_section(ui);
                ui.separator();
                self.render_export_section(ui);
                ui.separator();
                self.render_info_section(ui);
            });
    }

    fn render_source_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Data source").strong());

        let before = self.source_kind;
        for kind in DataSourceKind::iter() {
            ui.radio_value(&mut self.source_kind, kind, kind.to_string());
        }

        if self.source_kind == DataSourceKind::Prebuilt {
            ui.horizontal(|ui| {
                if ui.button("Choose directory…").clicked() {
                    if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                        self.prebuilt_dir = Some(dir);
                        self.apply_source();
                    }
                }
            });
            match &self.prebuilt_dir {
                Some(dir) => ui.label(egui::RichText::new(dir.display().to_string()).color(muted())),
                None => ui.label(egui::RichText::new("No directory chosen").color(muted())),
            };
        } else {
            ui.label(egui::RichText::new(&self.settings.api_base_url).color(muted()));
        }

        if self.source_kind != before {
            self.apply_source();
        }

        ui.add_space(4.0);
        let is_loading = self.loading_state.is_loading();
        if ui
            .add_enabled(!is_loading, egui::Button::new("Open payload file…"))
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Landscape JSON", SUPPORTED_EXTENSIONS)
                .pick_file()
            {
                self.start_loading_file(path);
            }
        }
    }

    fn render_lookup_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Gene").strong());
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.gene_query)
                    .hint_text("e.g. TBXT")
                    .desired_width(140.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Search").clicked() || submitted {
                self.start_fetching_transcripts();
            }
        });

        if !self.transcripts.transcript_ids.is_empty() || !self.transcripts.no_protein_data.is_empty() {
            ui.add_space(4.0);
            let mut chosen = None;
            for transcript_id in &self.transcripts.transcript_ids {
                if ui.selectable_label(false, transcript_id).clicked() {
                    chosen = Some(transcript_id.clone());
                }
            }
            for transcript_id in &self.transcripts.no_protein_data {
                ui.label(egui::RichText::new(format!("{} (no protein data)", transcript_id)).color(muted()));
            }
            if let Some(transcript_id) = chosen {
                self.start_fetching_landscape(&transcript_id);
            }
        }

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Transcript").strong());
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.transcript_query)
                    .hint_text("ENST…")
                    .desired_width(140.0),
            );
            if ui.button("Load").clicked() {
                let transcript_id = self.transcript_query.clone();
                self.start_fetching_landscape(&transcript_id);
            }
        });

        if let crate::state::LoadingState::Loading(what) = &self.loading_state {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Loading {}", what));
            });
        }
    }

    fn render_view_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("View").strong());
        let has_data = self.session.has_data();

        let mut mode = self.session.mode();
        egui::ComboBox::from_id_salt("landscape_mode")
            .selected_text(mode.to_string())
            .show_ui(ui, |ui| {
                for option in LandscapeMode::iter() {
                    ui.selectable_value(&mut mode, option, option.to_string());
                }
            });
        if mode != self.session.mode() {
            let result = self.session.set_mode(mode);
            self.report(result);

            // Remember the mode for the next launch
            self.settings.default_mode = mode;
            if let Err(e) = self.settings.save() {
                tracing::warn!("Failed to save settings: {}", e);
            }
        }

        let mut show_clinvar = self.session.show_clinvar();
        if ui
            .add_enabled(has_data, egui::Checkbox::new(&mut show_clinvar, "Show ClinVar variants"))
            .changed()
        {
            let result = self.session.set_show_clinvar(show_clinvar);
            self.report(result);
        }

        ui.horizontal(|ui| {
            if ui.add_enabled(has_data, egui::Button::new("Reset zoom")).clicked() {
                let result = self.session.reset_zoom();
                self.report(result);
            }
            let has_selection = self.session.selection().summary_visible();
            if ui
                .add_enabled(has_selection, egui::Button::new("Clear selection"))
                .clicked()
            {
                let result = self.session.clear_selection();
                self.report(result);
            }
        });

        if has_data {
            let (lo, hi) = self.session.visible_bounds();
            ui.label(format!("Showing positions {}-{}", lo, hi));
            ui.label(format!(
                "Selected positions: {}",
                self.session.selection().selected_count()
            ));
        }
    }

    fn render_export_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Export").strong());
        let has_data = self.session.has_data();
        ui.horizontal(|ui| {
            if ui.add_enabled(has_data, egui::Button::new("TSV")).clicked() {
                self.export_tsv();
            }
            if ui.add_enabled(has_data, egui::Button::new("PNG")).clicked() {
                self.export_png();
            }
        });
    }

    fn render_info_section(&mut self, ui: &mut egui::Ui) {
        if !self.session.has_data() {
            ui.label(egui::RichText::new("Load a landscape to begin").color(muted()));
            return;
        }

        let payload = self.session.payload();
        let gene = payload.gene_name.clone();
        let transcript_id = payload.transcript_id.clone();
        let protein_ac = payload.protein_ac.clone();

        ui.label(egui::RichText::new(format!("Gene {}", gene)).strong());
        if !transcript_id.is_empty() && ui.link(format!("Ensembl: {}", transcript_id)).clicked() {
            let _ = open::that(ensembl_url(&transcript_id));
        }
        if !protein_ac.is_empty() && ui.link(format!("UniProt: {}", protein_ac)).clicked() {
            let _ = open::that(uniprot_url(&protein_ac));
        }
    }
}
