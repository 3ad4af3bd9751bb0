//! Landscape chart: focus view, domain track, position axis and context view.

use eframe::egui;

use crate::app::MetadomeApp;
use crate::colors::{
    CLINVAR_COLOR, DOMAIN_COLOR, DOMAIN_HOVER_COLOR, LEGEND_LABELS, TOLERANCE_GRADIENT,
};
use crate::details::DomainDetails;
use crate::interaction::{BrushEvent, GestureState};
use crate::settings::ChartLayout;
use crate::state::{ChartDrag, MUTED_TEXT_COLOR, TEXT_COLOR, WHEEL_ZOOM_SPEED};

/// Score gridlines on the tolerance axis
const Y_AXIS_TICKS: [f64; 4] = [0.0, 0.5, 1.0, 1.5];

const TICK_COLOR: [u8; 3] = [128, 128, 128];
const HOVERED_TICK_COLOR: [u8; 3] = [255, 165, 0];
const SELECTED_TICK_COLOR: [u8; 3] = [255, 0, 0];
const CLINVAR_TICK_HEIGHT: f32 = 12.0;
const LEGEND_WIDTH: f32 = 180.0;
const LEGEND_HEIGHT: f32 = 10.0;
const LABEL_FONT_SIZE: f32 = 11.0;

fn color(rgb: [u8; 3], opacity: f32) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], alpha)
}

/// Which band of the chart a screen point falls in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Band {
    Landscape,
    Annotations,
    Positions,
    Context,
}

/// Screen rectangles of the chart bands for the current layout
struct ChartFrame {
    /// Screen x of plot pixel 0
    origin_x: f32,
    landscape: egui::Rect,
    annotations: egui::Rect,
    positions: egui::Rect,
    context: egui::Rect,
}

impl ChartFrame {
    fn new(rect: egui::Rect, layout: &ChartLayout) -> Self {
        let origin_x = rect.left() + layout.landscape.left as f32;
        let width = layout.width() as f32;
        let band = |top: f64, height: f64| {
            egui::Rect::from_min_size(
                egui::pos2(origin_x, rect.top() + top as f32),
                egui::vec2(width, height as f32),
            )
        };
        Self {
            origin_x,
            landscape: band(layout.landscape.top, layout.landscape_height()),
            annotations: band(layout.annotations.top, layout.annotations_height()),
            positions: band(layout.position_info.top, layout.position_info_height()),
            context: band(layout.context.top, layout.context_height()),
        }
    }

    /// Plot pixel of a screen x
    fn plot_x(&self, x: f32) -> f64 {
        (x - self.origin_x) as f64
    }

    /// Screen x of a plot pixel
    fn screen_x(&self, x: f64) -> f32 {
        self.origin_x + x as f32
    }

    /// The position axis overlaps the domain track and takes precedence
    fn band_at(&self, pos: egui::Pos2) -> Option<Band> {
        if self.positions.contains(pos) {
            Some(Band::Positions)
        } else if self.annotations.contains(pos) {
            Some(Band::Annotations)
        } else if self.landscape.contains(pos) {
            Some(Band::Landscape)
        } else if self.context.contains(pos) {
            Some(Band::Context)
        } else {
            None
        }
    }
}

impl MetadomeApp {
    /// Render the landscape chart in the central panel
    pub fn render_landscape(&mut self, ui: &mut egui::Ui) {
        if !self.session.has_data() {
            self.render_empty_state(ui);
            return;
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        self.fit_layout(rect.size());
        self.measure_labels(ui);

        let frame = ChartFrame::new(rect, self.session.layout());
        let hovered_position = self.handle_chart_input(ui, &response, &frame);

        let painter = ui.painter_at(rect);
        self.paint_focus(&painter, &frame);
        self.paint_domains(&painter, &frame);
        self.paint_positions(&painter, &frame, hovered_position);
        self.paint_context(&painter, &frame);
        self.paint_readout(&painter, &frame, hovered_position);
    }

    fn render_empty_state(&self, ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| {
            let message = if self.loading_state.is_loading() {
                "Loading…"
            } else {
                "Look up a gene or drop a landscape JSON file here"
            };
            ui.label(
                egui::RichText::new(message)
                    .size(16.0)
                    .color(color(MUTED_TEXT_COLOR, 1.0)),
            );
        });
    }

    /// Resize the chart layout to the panel, keeping margins proportional
    fn fit_layout(&mut self, size: egui::Vec2) {
        let layout = self.session.layout();
        let (width, height) = (size.x as f64, size.y as f64);
        if width < 1.0 || height < 1.0 {
            return;
        }
        if (layout.outer_width - width).abs() > 1.0 || (layout.outer_height - height).abs() > 1.0 {
            let resized = layout.resized(width, height);
            let result = self.session.set_layout(resized);
            self.report(result);
        }
    }

    /// Digits have tabular width, so one glyph measures every position label
    fn measure_labels(&mut self, ui: &egui::Ui) {
        let glyph = ui
            .painter()
            .layout_no_wrap(
                "0".to_string(),
                egui::FontId::proportional(LABEL_FONT_SIZE),
                egui::Color32::WHITE,
            )
            .size()
            .x;
        let result = self.session.set_label_char_width(glyph as f64);
        self.report(result);
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Apply wheel, drag, hover and click input; returns the hovered residue
    fn handle_chart_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        frame: &ChartFrame,
    ) -> Option<u32> {
        let hover = response.hover_pos();
        let band = hover.and_then(|pos| frame.band_at(pos));

        // Wheel zoom over the focus view
        let mut scrolled = false;
        if let (Some(pos), Some(Band::Landscape)) = (hover, band) {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 && self.session.begin_zoom() {
                scrolled = true;
                let factor = (scroll as f64 * WHEEL_ZOOM_SPEED).exp();
                let result = self.session.zoom_at(frame.plot_x(pos.x), factor);
                self.report(result);
            }
        }

        self.handle_drag(ui, response, frame);

        if self.chart_drag.is_none()
            && !scrolled
            && self.session.controller().state() != GestureState::Idle
        {
            self.session.end_gesture();
        }

        // Domain hover keeps the hovered rectangle on top
        let hovered_domain = match (hover, band) {
            (Some(pos), Some(Band::Annotations)) => self
                .session
                .scene()
                .domain_at(frame.plot_x(pos.x), self.session.domain_order().iter()),
            _ => None,
        };
        self.session.hover_domain(hovered_domain);

        let hovered_position = match (hover, band) {
            (Some(pos), Some(Band::Positions)) => self.session.scene().tick_at(frame.plot_x(pos.x)),
            _ => None,
        };

        if response.clicked() {
            match band {
                Some(Band::Positions) => {
                    if let Some(position) = hovered_position {
                        let result = self.session.toggle_position(position);
                        if let Some(selected) = self.report(result) {
                            self.inspected_position = selected.then_some(position);
                        }
                    }
                }
                Some(Band::Annotations) => {
                    let id = hovered_domain
                        .and_then(|idx| self.session.payload().domains.get(idx))
                        .map(|domain| domain.id.clone());
                    if let Some(id) = id {
                        self.domain_details = DomainDetails::for_domain(self.session.payload(), &id);
                    }
                }
                _ => {}
            }
        }

        if hovered_domain.is_some() || hovered_position.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        hovered_position
    }

    fn handle_drag(&mut self, ui: &egui::Ui, response: &egui::Response, frame: &ChartFrame) {
        if response.drag_started() {
            let origin = ui.input(|i| i.pointer.press_origin());
            self.chart_drag = origin.and_then(|pos| match frame.band_at(pos)? {
                Band::Landscape => Some(ChartDrag::Pan),
                Band::Context => {
                    let grab = frame.plot_x(pos.x);
                    let brush = self.session.scene().brush;
                    if grab > brush.0 && grab < brush.1 && !self.session.view().is_full() {
                        Some(ChartDrag::BrushMove { grab, brush })
                    } else {
                        Some(ChartDrag::BrushNew { anchor: grab })
                    }
                }
                _ => None,
            });

            // A gesture already in progress keeps the pointer
            let accepted = match self.chart_drag {
                Some(ChartDrag::Pan) => self.session.begin_zoom(),
                Some(_) => self.session.begin_brush(),
                None => true,
            };
            if !accepted {
                self.chart_drag = None;
            }
        }

        if response.dragged() {
            let (r0, r1) = self.session.scales().context_x.range();
            let current = ui
                .input(|i| i.pointer.interact_pos())
                .map(|pos| frame.plot_x(pos.x).clamp(r0, r1));

            let result = match (self.chart_drag, current) {
                (Some(ChartDrag::Pan), _) => {
                    let dx = response.drag_delta().x as f64;
                    if dx != 0.0 {
                        self.session.pan_by(dx)
                    } else {
                        Ok(None)
                    }
                }
                (Some(ChartDrag::BrushNew { anchor }), Some(current)) => {
                    if (current - anchor).abs() >= 1.0 {
                        self.session.brush(BrushEvent::user(anchor, current))
                    } else {
                        Ok(None)
                    }
                }
                (Some(ChartDrag::BrushMove { grab, brush }), Some(current)) => {
                    let dx = (current - grab).clamp(r0 - brush.0, r1 - brush.1);
                    self.session.brush(BrushEvent::user(brush.0 + dx, brush.1 + dx))
                }
                _ => Ok(None),
            };
            self.report(result);
        }

        if response.drag_stopped() {
            self.chart_drag = None;
            self.session.end_gesture();
        }
    }

    // ========================================================================
    // Painting
    // ========================================================================

    fn paint_focus(&self, painter: &egui::Painter, frame: &ChartFrame) {
        let scene = self.session.scene();
        let band = frame.landscape;
        let clipped = painter.with_clip_rect(band);
        let opacity = scene.landscape_opacity;
        let to_screen = |x: f64, y: f64| egui::pos2(frame.screen_x(x), band.top() + y as f32);

        painter.rect_stroke(
            band,
            egui::CornerRadius::ZERO,
            egui::Stroke::new(1.0, color(MUTED_TEXT_COLOR, 0.4)),
            egui::StrokeKind::Inside,
        );

        if opacity > 0.0 {
            let mut mesh = egui::Mesh::default();
            for area in scene.areas.iter().filter(|a| a.visible) {
                let base = mesh.vertices.len() as u32;
                let start = color(area.start_color, opacity);
                let end = color(area.end_color, opacity);
                mesh.colored_vertex(to_screen(area.x0, area.y0), start);
                mesh.colored_vertex(to_screen(area.x1, area.y1), end);
                mesh.colored_vertex(to_screen(area.x1, area.baseline), end);
                mesh.colored_vertex(to_screen(area.x0, area.baseline), start);
                mesh.add_triangle(base, base + 1, base + 2);
                mesh.add_triangle(base, base + 2, base + 3);
            }
            clipped.add(egui::Shape::mesh(mesh));

            let stroke = egui::Stroke::new(1.5, color(TEXT_COLOR, opacity));
            for run in &scene.line {
                let points: Vec<egui::Pos2> = run.iter().map(|p| to_screen(p[0], p[1])).collect();
                if points.len() > 1 {
                    clipped.add(egui::Shape::line(points, stroke));
                }
            }

            // Tolerance axis
            let y = &self.session.scales().y;
            for value in Y_AXIS_TICKS {
                let py = band.top() + y.map(value) as f32;
                painter.line_segment(
                    [egui::pos2(band.left() - 4.0, py), egui::pos2(band.left(), py)],
                    egui::Stroke::new(1.0, color(MUTED_TEXT_COLOR, opacity)),
                );
                painter.text(
                    egui::pos2(band.left() - 6.0, py),
                    egui::Align2::RIGHT_CENTER,
                    format!("{:.1}", value),
                    egui::FontId::proportional(LABEL_FONT_SIZE),
                    color(MUTED_TEXT_COLOR, opacity),
                );
            }

            self.paint_legend(painter, band, opacity);
        }

        // ClinVar sites along the bottom of the focus view
        for variant in scene.variants.iter().filter(|v| v.visible) {
            let x = frame.screen_x(variant.x);
            clipped.line_segment(
                [
                    egui::pos2(x, band.bottom() - CLINVAR_TICK_HEIGHT),
                    egui::pos2(x, band.bottom()),
                ],
                egui::Stroke::new(2.0, color(CLINVAR_COLOR, 1.0)),
            );
        }
    }

    fn paint_legend(&self, painter: &egui::Painter, band: egui::Rect, opacity: f32) {
        let strip = egui::Rect::from_min_size(
            egui::pos2(band.right() - LEGEND_WIDTH - 12.0, band.top() + 10.0),
            egui::vec2(LEGEND_WIDTH, LEGEND_HEIGHT),
        );
        let at = |offset: f32| strip.left() + strip.width() * offset;

        let mut mesh = egui::Mesh::default();
        for pair in TOLERANCE_GRADIENT.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let base = mesh.vertices.len() as u32;
            let (x0, x1) = (at(left.0 / 100.0), at(right.0 / 100.0));
            mesh.colored_vertex(egui::pos2(x0, strip.top()), color(left.1, opacity));
            mesh.colored_vertex(egui::pos2(x1, strip.top()), color(right.1, opacity));
            mesh.colored_vertex(egui::pos2(x1, strip.bottom()), color(right.1, opacity));
            mesh.colored_vertex(egui::pos2(x0, strip.bottom()), color(left.1, opacity));
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
        painter.add(egui::Shape::mesh(mesh));

        for &(label, offset) in LEGEND_LABELS {
            painter.text(
                egui::pos2(at(offset), strip.bottom() + 3.0),
                egui::Align2::CENTER_TOP,
                label,
                egui::FontId::proportional(LABEL_FONT_SIZE),
                color(TEXT_COLOR, opacity),
            );
        }
    }

    fn paint_domains(&self, painter: &egui::Painter, frame: &ChartFrame) {
        let scene = self.session.scene();
        let band = frame.annotations;
        let clipped = painter.with_clip_rect(band);
        let hovered = self.session.hovered_domain();
        let font = egui::FontId::proportional(LABEL_FONT_SIZE);

        for &idx in self.session.domain_order().iter() {
            let Some(domain) = scene.domains.get(idx).filter(|d| d.visible) else {
                continue;
            };
            let rect = egui::Rect::from_min_max(
                egui::pos2(frame.screen_x(domain.x), band.top()),
                egui::pos2(frame.screen_x(domain.x + domain.width), band.bottom()),
            );
            let fill = if hovered == Some(idx) {
                DOMAIN_HOVER_COLOR
            } else {
                DOMAIN_COLOR
            };
            clipped.rect_filled(rect, egui::CornerRadius::same(2), color(fill, 0.85));
            clipped.rect_stroke(
                rect,
                egui::CornerRadius::same(2),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(30, 30, 30)),
                egui::StrokeKind::Inside,
            );

            let label_width = painter
                .layout_no_wrap(domain.name.clone(), font.clone(), egui::Color32::WHITE)
                .size()
                .x;
            let visible = rect.intersect(band);
            if label_width + 6.0 < visible.width() {
                let text_color = if hovered == Some(idx) {
                    egui::Color32::from_rgb(30, 30, 30) // Dark text on yellow
                } else {
                    egui::Color32::WHITE
                };
                clipped.text(
                    egui::pos2(visible.center().x, band.top() + band.height() * 0.2),
                    egui::Align2::CENTER_TOP,
                    &domain.name,
                    font.clone(),
                    text_color,
                );
            }
        }
    }

    fn paint_positions(&self, painter: &egui::Painter, frame: &ChartFrame, hovered: Option<u32>) {
        let scene = self.session.scene();
        let band = frame.positions;
        let clipped = painter.with_clip_rect(band);
        let font = egui::FontId::proportional(LABEL_FONT_SIZE);

        for tick in scene.visible_ticks() {
            let rect = egui::Rect::from_min_size(
                egui::pos2(frame.screen_x(tick.x), band.top()),
                egui::vec2(tick.width as f32, band.height()),
            );
            let fill = if tick.selected {
                color(SELECTED_TICK_COLOR, 0.7)
            } else if hovered == Some(tick.position) {
                color(HOVERED_TICK_COLOR, 0.5)
            } else {
                color(TICK_COLOR, 0.2)
            };
            clipped.rect_filled(rect, egui::CornerRadius::ZERO, fill);
            clipped.rect_stroke(
                rect,
                egui::CornerRadius::ZERO,
                egui::Stroke::new(0.5, color(MUTED_TEXT_COLOR, 0.5)),
                egui::StrokeKind::Inside,
            );
            if tick.label_opacity > 0.0 {
                clipped.text(
                    egui::pos2(frame.screen_x(tick.label_x), band.center().y),
                    egui::Align2::CENTER_CENTER,
                    &tick.label,
                    font.clone(),
                    color(TEXT_COLOR, tick.label_opacity),
                );
            }
        }
    }

    fn paint_context(&self, painter: &egui::Painter, frame: &ChartFrame) {
        let scene = self.session.scene();
        let band = frame.context;
        let to_screen = |p: &[f64; 2]| egui::pos2(frame.screen_x(p[0]), band.top() + p[1] as f32);

        painter.rect_stroke(
            band,
            egui::CornerRadius::ZERO,
            egui::Stroke::new(1.0, color(MUTED_TEXT_COLOR, 0.4)),
            egui::StrokeKind::Inside,
        );

        // First and last points sit on the baseline
        if scene.context_area.len() > 3 {
            let fill = color(MUTED_TEXT_COLOR, 0.8);
            let baseline = band.top() + scene.context_area[0][1] as f32;
            let mut mesh = egui::Mesh::default();
            for pair in scene.context_area[1..scene.context_area.len() - 1].windows(2) {
                let (p0, p1) = (to_screen(&pair[0]), to_screen(&pair[1]));
                let base = mesh.vertices.len() as u32;
                mesh.colored_vertex(p0, fill);
                mesh.colored_vertex(p1, fill);
                mesh.colored_vertex(egui::pos2(p1.x, baseline), fill);
                mesh.colored_vertex(egui::pos2(p0.x, baseline), fill);
                mesh.add_triangle(base, base + 1, base + 2);
                mesh.add_triangle(base, base + 2, base + 3);
            }
            painter.add(egui::Shape::mesh(mesh));
        }

        let (b0, b1) = scene.brush;
        let brush = egui::Rect::from_min_max(
            egui::pos2(frame.screen_x(b0.min(b1)), band.top()),
            egui::pos2(frame.screen_x(b0.max(b1)), band.bottom()),
        );
        painter.rect_filled(brush, egui::CornerRadius::ZERO, color(TEXT_COLOR, 0.15));
        painter.rect_stroke(
            brush,
            egui::CornerRadius::ZERO,
            egui::Stroke::new(1.0, color(TEXT_COLOR, 0.8)),
            egui::StrokeKind::Inside,
        );
    }

    /// Hovered residue details and the visible window
    fn paint_readout(&self, painter: &egui::Painter, frame: &ChartFrame, hovered: Option<u32>) {
        let band = frame.landscape;
        let font = egui::FontId::proportional(12.0);
        let (lo, hi) = self.session.visible_bounds();
        painter.text(
            egui::pos2(band.left() + 6.0, band.top() + 6.0),
            egui::Align2::LEFT_TOP,
            format!("{} · positions {}-{}", self.session.payload().title(), lo, hi),
            font.clone(),
            color(TEXT_COLOR, 1.0),
        );

        let Some(position) = hovered else {
            return;
        };
        let (Some(record), Some(tick)) = (
            self.session.payload().record(position),
            self.session.scene().tick(position),
        ) else {
            return;
        };

        let x = frame.screen_x(tick.label_x);
        painter.line_segment(
            [egui::pos2(x, band.top()), egui::pos2(x, frame.positions.top())],
            egui::Stroke::new(1.0, color(TEXT_COLOR, 0.5)),
        );

        let score = if record.has_score() {
            format!("{:.3}", record.sw_dn_ds)
        } else {
            "n/a".to_string()
        };
        painter.text(
            egui::pos2(band.left() + 6.0, band.top() + 24.0),
            egui::Align2::LEFT_TOP,
            format!(
                "p.{} {}  dN/dS {}  ClinVar {}",
                position,
                record.ref_aa_triplet,
                score,
                record.clinvar.len()
            ),
            font,
            color(HOVERED_TICK_COLOR, 1.0),
        );
    }
}
