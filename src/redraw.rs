//! Retained scene and redraw dispatcher.
//!
//! [`Scene::build`] creates one element per residue, domain and ClinVar
//! site once per payload. [`RedrawDispatcher`] then only rewrites the
//! presentation attributes of those elements (pixel geometry, visibility,
//! opacity, selection styling) for the current window. It never touches
//! the payload.

use crate::colors::{clamp_score, tolerance_color};
use crate::payload::LandscapePayload;
use crate::scale::ScaleSet;
use crate::selection::SelectionStore;
use crate::view::ViewState;

/// Staged label fade: the first stage with `text_width * k >= rect_width`
/// gives the label its opacity; a label passing every stage is opaque
pub const LABEL_FADE_STAGES: [(f64, f32); 5] =
    [(0.75, 0.0), (0.9, 0.1), (1.0, 0.4), (1.25, 0.5), (1.5, 0.7)];

/// Opacity of a residue label of `text_width` inside a tick `rect_width` wide
pub fn label_opacity(text_width: f64, rect_width: f64) -> f32 {
    LABEL_FADE_STAGES
        .iter()
        .find(|(k, _)| text_width * k >= rect_width)
        .map(|&(_, opacity)| opacity)
        .unwrap_or(1.0)
}

/// Measures rendered label text
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f64;
}

/// Measure assuming every glyph has the same advance
#[derive(Clone, Copy, Debug)]
pub struct FixedWidthMeasure {
    pub char_width: f64,
}

impl Default for FixedWidthMeasure {
    fn default() -> Self {
        Self { char_width: 7.0 }
    }
}

impl TextMeasure for FixedWidthMeasure {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

// ============================================================================
// Scene elements
// ============================================================================

/// Filled area between one residue and the next, coloured by a gradient
/// from the residue's score colour to the next residue's
#[derive(Clone, Debug, PartialEq)]
pub struct AreaElement {
    pub position: u32,
    pub next_position: u32,
    pub score: f64,
    pub next_score: f64,
    pub start_color: [u8; 3],
    pub end_color: [u8; 3],
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub baseline: f64,
    pub visible: bool,
}

/// One residue on the schematic protein axis
#[derive(Clone, Debug, PartialEq)]
pub struct TickElement {
    pub position: u32,
    pub label: String,
    pub x: f64,
    pub width: f64,
    pub label_x: f64,
    pub label_opacity: f32,
    pub selected: bool,
    pub visible: bool,
}

/// One Pfam domain on the annotation track
#[derive(Clone, Debug, PartialEq)]
pub struct DomainElement {
    /// Index into the payload's domain list
    pub index: usize,
    pub id: String,
    pub name: String,
    pub start: u32,
    pub stop: u32,
    pub x: f64,
    pub width: f64,
    pub visible: bool,
}

/// A ClinVar site tick mark
#[derive(Clone, Debug, PartialEq)]
pub struct VariantElement {
    pub position: u32,
    pub count: usize,
    pub x: f64,
    pub visible: bool,
}

/// Every drawable element of one chart
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub areas: Vec<AreaElement>,
    /// Tolerance line, split where scores are missing
    pub line: Vec<Vec<[f64; 2]>>,
    pub ticks: Vec<TickElement>,
    pub domains: Vec<DomainElement>,
    pub variants: Vec<VariantElement>,
    /// Overview area over the full extent
    pub context_area: Vec<[f64; 2]>,
    /// Brush selection in context pixels
    pub brush: (f64, f64),
    /// Opacity of the tolerance area, line and legend
    pub landscape_opacity: f32,
    /// Whether ClinVar ticks are drawn at all
    pub show_clinvar: bool,
    /// Completed redraws since the scene was built
    pub redraw_count: u64,
}

impl Scene {
    /// Create the elements for a payload; geometry is filled by the first redraw
    pub fn build(payload: &LandscapePayload) -> Self {
        let records = &payload.positional_annotation;

        let areas = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                // The last residue pairs with itself
                let next = records.get(i + 1).unwrap_or(record);
                AreaElement {
                    position: record.protein_pos,
                    next_position: next.protein_pos,
                    score: record.sw_dn_ds,
                    next_score: next.sw_dn_ds,
                    start_color: tolerance_color(record.sw_dn_ds),
                    end_color: tolerance_color(next.sw_dn_ds),
                    x0: 0.0,
                    x1: 0.0,
                    y0: 0.0,
                    y1: 0.0,
                    baseline: 0.0,
                    visible: false,
                }
            })
            .collect();

        let ticks = records
            .iter()
            .map(|record| TickElement {
                position: record.protein_pos,
                label: record.protein_pos.to_string(),
                x: 0.0,
                width: 0.0,
                label_x: 0.0,
                label_opacity: 0.0,
                selected: false,
                visible: false,
            })
            .collect();

        let domains = payload
            .domains
            .iter()
            .enumerate()
            .map(|(index, domain)| DomainElement {
                index,
                id: domain.id.clone(),
                name: domain.name.clone(),
                start: domain.start,
                stop: domain.stop,
                x: 0.0,
                width: 0.0,
                visible: false,
            })
            .collect();

        let variants = records
            .iter()
            .filter(|record| !record.clinvar.is_empty())
            .map(|record| VariantElement {
                position: record.protein_pos,
                count: record.clinvar.len(),
                x: 0.0,
                visible: false,
            })
            .collect();

        Self {
            areas,
            line: Vec::new(),
            ticks,
            domains,
            variants,
            context_area: Vec::new(),
            brush: (0.0, 0.0),
            landscape_opacity: 1.0,
            show_clinvar: true,
            redraw_count: 0,
        }
    }

    pub fn visible_ticks(&self) -> impl Iterator<Item = &TickElement> {
        self.ticks.iter().filter(|t| t.visible)
    }

    pub fn tick(&self, position: u32) -> Option<&TickElement> {
        self.ticks
            .binary_search_by_key(&position, |t| t.position)
            .ok()
            .map(|idx| &self.ticks[idx])
    }

    /// Residue whose tick covers focus pixel `x`
    pub fn tick_at(&self, x: f64) -> Option<u32> {
        self.visible_ticks()
            .find(|t| x >= t.x && x < t.x + t.width)
            .map(|t| t.position)
    }

    /// Visible domain under annotation pixel `x`, topmost in `order` first
    pub fn domain_at<'a>(
        &self,
        x: f64,
        mut order: impl DoubleEndedIterator<Item = &'a usize>,
    ) -> Option<usize> {
        order
            .rfind(|&&idx| {
                self.domains
                    .get(idx)
                    .is_some_and(|d| d.visible && x >= d.x && x <= d.x + d.width)
            })
            .copied()
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Recomputes element geometry for the current view
pub struct RedrawDispatcher<'a, M: TextMeasure> {
    pub measure: &'a M,
}

impl<'a, M: TextMeasure> RedrawDispatcher<'a, M> {
    pub fn new(measure: &'a M) -> Self {
        Self { measure }
    }

    /// Draw the overview area; only depends on the full extent
    pub fn draw_context(&self, scene: &mut Scene, payload: &LandscapePayload, scales: &ScaleSet) {
        let x = &scales.context_x;
        let y = &scales.context_y;
        let baseline = y.map(0.0);
        let mut path = Vec::with_capacity(payload.positional_annotation.len() + 2);
        if let (Some(first), Some(last)) = (
            payload.positional_annotation.first(),
            payload.positional_annotation.last(),
        ) {
            path.push([x.map(first.protein_pos as f64), baseline]);
            for record in &payload.positional_annotation {
                let score = clamp_score(record.sw_dn_ds);
                let py = if score.is_nan() { baseline } else { y.map(score) };
                path.push([x.map(record.protein_pos as f64), py]);
            }
            path.push([x.map(last.protein_pos as f64), baseline]);
        }
        scene.context_area = path;
    }

    /// Rewrite geometry of every element class for the current window
    ///
    /// Fails without touching the scene when the scales were not synced to
    /// the view's window.
    pub fn redraw(
        &self,
        scene: &mut Scene,
        view: &ViewState,
        scales: &ScaleSet,
        selection: &SelectionStore,
    ) -> Result<(), crate::error::ScaleError> {
        let window = view.window();
        scales.ensure_synced(window)?;

        let fx = &scales.focus_x;
        let y = &scales.y;
        let baseline = y.map(0.0);
        let score_y = |score: f64| {
            let s = clamp_score(score);
            if s.is_nan() {
                baseline
            } else {
                y.map(s)
            }
        };

        // Tolerance area
        for area in &mut scene.areas {
            area.visible =
                (area.position as f64) <= window.hi && (area.next_position as f64) >= window.lo;
            if area.visible {
                area.x0 = fx.map(area.position as f64);
                area.x1 = fx.map(area.next_position as f64);
                area.y0 = score_y(area.score);
                area.y1 = score_y(area.next_score);
                area.baseline = baseline;
            }
        }

        // Tolerance line, one residue beyond each window edge so it reaches the border
        let range = view.visible_range();
        let start = range.start.saturating_sub(1);
        let end = (range.end + 1).min(scene.areas.len());
        let mut line = Vec::new();
        let mut run = Vec::new();
        for area in &scene.areas[start..end] {
            let score = clamp_score(area.score);
            if score.is_nan() {
                if !run.is_empty() {
                    line.push(std::mem::take(&mut run));
                }
                continue;
            }
            run.push([fx.map(area.position as f64), y.map(score)]);
        }
        if !run.is_empty() {
            line.push(run);
        }
        scene.line = line;

        // Schematic protein axis: only residues inside the window are recomputed
        for tick in &mut scene.ticks {
            tick.visible = false;
        }
        for tick in &mut scene.ticks[range] {
            let Some((left, right)) = view.boundary_for(tick.position) else {
                continue;
            };
            tick.x = fx.map(left);
            tick.width = fx.map(right) - tick.x;
            tick.label_x = fx.map(tick.position as f64);
            tick.label_opacity = label_opacity(self.measure.text_width(&tick.label), tick.width);
            tick.selected = selection.is_selected(tick.position);
            tick.visible = true;
        }

        // Domain annotation track
        let ax = &scales.annotation_x;
        for element in &mut scene.domains {
            let (start, stop) = (element.start as f64, element.stop as f64);
            element.visible = start <= window.hi && stop >= window.lo;
            element.x = ax.map(start - 0.5);
            element.width = ax.map(stop + 1.0) - ax.map(start);
        }

        // ClinVar ticks
        let show_clinvar = scene.show_clinvar;
        for variant in &mut scene.variants {
            variant.visible = show_clinvar && window.contains(variant.position as f64);
            if variant.visible {
                variant.x = fx.map(variant.position as f64);
            }
        }

        scene.redraw_count += 1;
        Ok(())
    }
}
