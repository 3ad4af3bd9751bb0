//! Domain details window with per-residue missense counts.

use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::app::MetadomeApp;
use crate::colors::CLINVAR_COLOR;
use crate::details::{pfam_url, DomainDetails};
use crate::state::MUTED_TEXT_COLOR;

const NORMAL_BAR_COLOR: egui::Color32 = egui::Color32::from_rgb(71, 108, 155); // Blue
const PATHOGENIC_BAR_COLOR: egui::Color32 =
    egui::Color32::from_rgb(CLINVAR_COLOR[0], CLINVAR_COLOR[1], CLINVAR_COLOR[2]);
const PLOT_HEIGHT: f32 = 140.0;

impl MetadomeApp {
    /// Render the details window of the clicked domain
    pub fn render_domain_details(&mut self, ctx: &egui::Context) {
        let Some(details) = &self.domain_details else {
            return;
        };

        let mut open = true;

        egui::Window::new(format!("{} · {}", details.id, details.name))
            .id(egui::Id::new("domain_details"))
            .open(&mut open)
            .resizable(true)
            .default_width(560.0)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                render_header(ui, details);
                ui.separator();

                if !details.metadomain || details.bars.is_empty() {
                    ui.label(
                        egui::RichText::new("No meta-domain variant counts for this domain")
                            .color(egui::Color32::from_rgb(
                                MUTED_TEXT_COLOR[0],
                                MUTED_TEXT_COLOR[1],
                                MUTED_TEXT_COLOR[2],
                            )),
                    );
                    return;
                }

                ui.label(egui::RichText::new("Missense variants at homologous residues").strong());
                missense_plot(
                    ui,
                    "domain_normal_plot",
                    "gnomAD missense",
                    details,
                    |bar| bar.normal_missense,
                    NORMAL_BAR_COLOR,
                );
                missense_plot(
                    ui,
                    "domain_pathogenic_plot",
                    "ClinVar missense",
                    details,
                    |bar| bar.pathogenic_missense,
                    PATHOGENIC_BAR_COLOR,
                );
            });

        if !open {
            self.domain_details = None;
        }
    }
}

fn render_header(ui: &mut egui::Ui, details: &DomainDetails) {
    egui::Grid::new("domain_details_grid")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Pfam");
            if ui.link(&details.id).clicked() {
                let _ = open::that(pfam_url(&details.id));
            }
            ui.end_row();

            ui.label("Residues");
            ui.label(format!("{}-{}", details.start, details.stop));
            ui.end_row();

            ui.label("Meta-domain");
            ui.label(if details.metadomain { "yes" } else { "no" });
            ui.end_row();

            if let Some(depth) = details.alignment_depth {
                ui.label("Alignment depth");
                ui.label(depth.to_string());
                ui.end_row();
            }
        });
}

fn missense_plot(
    ui: &mut egui::Ui,
    id: &str,
    name: &str,
    details: &DomainDetails,
    count: impl Fn(&crate::details::DomainBar) -> u32,
    color: egui::Color32,
) {
    let bars: Vec<Bar> = details
        .bars
        .iter()
        .map(|bar| {
            Bar::new(bar.position as f64, count(bar) as f64)
                .width(0.9)
                .name(format!("p.{}", bar.position))
        })
        .collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .include_y(0.0)
        .include_x(details.start as f64 - 0.5)
        .include_x(details.stop as f64 + 0.5)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(name, bars).color(color));
        });
}
