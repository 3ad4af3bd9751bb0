//! Selected positions summary and homologous variant list.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::app::MetadomeApp;
use crate::details::{clinvar_url, meta_domain_variants, summaries, MetaDomainVariantRow};
use crate::state::MUTED_TEXT_COLOR;

const ROW_HEIGHT: f32 = 20.0;

impl MetadomeApp {
    /// Render the bottom panel listing every selected residue
    pub fn render_selection_table(&mut self, ui: &mut egui::Ui) {
        let rows = summaries(self.session.payload(), self.session.selection());

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("Selected positions ({})", rows.len())).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear").clicked() {
                    let result = self.session.clear_selection();
                    self.report(result);
                    self.inspected_position = None;
                }
            });
        });
        ui.separator();

        let mut clicked = None;
        let mut deselect = None;

        ui.columns(2, |columns| {
            egui::ScrollArea::horizontal()
                .id_salt("selection_table_scroll")
                .show(&mut columns[0], |ui| {
                    TableBuilder::new(ui)
                        .id_salt("selection_table")
                        .striped(true)
                        .sense(egui::Sense::click())
                        .column(Column::auto().at_least(60.0))
                        .column(Column::auto().at_least(60.0))
                        .column(Column::remainder().at_least(100.0))
                        .column(Column::auto().at_least(60.0))
                        .column(Column::auto().at_least(80.0))
                        .column(Column::auto().at_least(80.0))
                        .column(Column::auto())
                        .header(ROW_HEIGHT, |mut header| {
                            for title in [
                                "Position",
                                "Residue",
                                "Domains",
                                "ClinVar",
                                "Homologous gnomAD",
                                "Homologous ClinVar",
                                "",
                            ] {
                                header.col(|ui| {
                                    ui.strong(title);
                                });
                            }
                        })
                        .body(|mut body| {
                            for summary in &rows {
                                body.row(ROW_HEIGHT, |mut row| {
                                    row.set_selected(self.inspected_position == Some(summary.position));
                                    row.col(|ui| {
                                        ui.label(format!("p.{}", summary.position));
                                    });
                                    row.col(|ui| {
                                        ui.label(&summary.residue);
                                    });
                                    row.col(|ui| {
                                        ui.label(&summary.domains);
                                    });
                                    row.col(|ui| {
                                        ui.label(summary.clinvar_count.to_string());
                                    });
                                    row.col(|ui| {
                                        ui.label(&summary.related_gnomad);
                                    });
                                    row.col(|ui| {
                                        ui.label(&summary.related_clinvar);
                                    });
                                    row.col(|ui| {
                                        if ui.small_button("✕").on_hover_text("Deselect").clicked() {
                                            deselect = Some(summary.position);
                                        }
                                    });
                                    if row.response().clicked() {
                                        clicked = Some(summary.position);
                                    }
                                });
                            }
                        });
                });

            self.render_homologous_variants(&mut columns[1]);
        });

        if let Some(position) = clicked {
            self.inspected_position = Some(position);
        }
        if let Some(position) = deselect {
            let result = self.session.toggle_position(position);
            self.report(result);
            if self.inspected_position == Some(position) {
                self.inspected_position = None;
            }
        }
    }

    /// Variants observed at residues homologous to the inspected position
    fn render_homologous_variants(&self, ui: &mut egui::Ui) {
        let muted = egui::Color32::from_rgb(MUTED_TEXT_COLOR[0], MUTED_TEXT_COLOR[1], MUTED_TEXT_COLOR[2]);
        let Some(position) = self.inspected_position else {
            ui.label(egui::RichText::new("Click a row to list homologous variants").color(muted));
            return;
        };
        let Some(record) = self.session.payload().record(position) else {
            return;
        };

        let groups: Vec<(&String, Vec<MetaDomainVariantRow>)> = record
            .domains
            .iter()
            .filter_map(|(id, entry)| Some((id, meta_domain_variants(entry.as_ref()?))))
            .filter(|(_, rows)| !rows.is_empty())
            .collect();

        ui.label(egui::RichText::new(format!("Homologous variants of p.{}", position)).strong());
        if groups.is_empty() {
            ui.label(egui::RichText::new("No variants at homologous residues").color(muted));
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("homologous_variants_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (domain_id, rows) in groups {
                    egui::CollapsingHeader::new(format!("{} ({} variants)", domain_id, rows.len()))
                        .id_salt(("homologous", domain_id))
                        .default_open(true)
                        .show(ui, |ui| {
                            egui::Grid::new(("homologous_grid", domain_id))
                                .striped(true)
                                .show(ui, |ui| {
                                    for title in ["Source", "Location", "Codon", "Change", "AF", "ClinVar"] {
                                        ui.strong(title);
                                    }
                                    ui.end_row();

                                    for row in &rows {
                                        ui.label(row.source.to_string());
                                        ui.label(format!("{}:{}", row.chr, row.chr_position));
                                        ui.label(format!("{}>{}", row.ref_codon, row.alt_codon));
                                        ui.label(&row.change);
                                        ui.label(&row.allele_frequency);
                                        match &row.clinvar_id {
                                            Some(id) => {
                                                if ui.link(id).clicked() {
                                                    let _ = open::that(clinvar_url(id));
                                                }
                                            }
                                            None => {
                                                ui.label(egui::RichText::new("-").color(muted));
                                            }
                                        }
                                        ui.end_row();
                                    }
                                });
                        });
                }
            });
    }
}
