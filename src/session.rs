//! Chart session: everything one loaded landscape needs.
//!
//! A [`ChartSession`] is created per window and handed by reference to
//! every UI handler. It owns the payload, the scales, the visible window,
//! the brush/zoom controller, the selection and the retained scene, and is
//! the only place where those pieces are wired together.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::colors::MAX_TOLERANCE;
use crate::error::{MetadomeError, ScaleError};
use crate::interaction::{
    BrushEvent, GestureKind, InteractionController, ViewUpdate, ZoomEvent, ZoomTransform,
};
use crate::payload::LandscapePayload;
use crate::redraw::{FixedWidthMeasure, RedrawDispatcher, Scene};
use crate::scale::ScaleSet;
use crate::selection::SelectionStore;
use crate::settings::{ChartLayout, Settings, DEFAULT_MAX_ZOOM};
use crate::view::ViewState;
use crate::zorder::ZOrder;

/// Which landscape the focus view shows
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum LandscapeMode {
    /// Tolerance area, line and legend
    #[default]
    #[strum(serialize = "Tolerance landscape")]
    ToleranceLandscape,
    /// Meta-domain view; the tolerance area is hidden
    #[strum(serialize = "Meta-domain landscape")]
    MetaDomainLandscape,
}

impl LandscapeMode {
    /// Opacity of the tolerance area in this mode
    pub fn landscape_opacity(self) -> f32 {
        match self {
            LandscapeMode::ToleranceLandscape => 1.0,
            LandscapeMode::MetaDomainLandscape => 0.0,
        }
    }
}

pub struct ChartSession {
    layout: ChartLayout,
    max_zoom: f64,
    payload: LandscapePayload,
    scales: ScaleSet,
    view: ViewState,
    controller: InteractionController,
    selection: SelectionStore,
    domain_order: ZOrder<usize>,
    hovered_domain: Option<usize>,
    mode: LandscapeMode,
    show_clinvar: bool,
    scene: Scene,
    measure: FixedWidthMeasure,
}

impl ChartSession {
    /// Empty session; call [`ChartSession::create_graph`] to show data
    pub fn new(layout: ChartLayout, max_zoom: f64, mode: LandscapeMode) -> Result<Self, ScaleError> {
        let view = ViewState::for_positions(Vec::new());
        let scales = ScaleSet::new(&layout, view.extent().as_tuple(), MAX_TOLERANCE)?;
        let controller = InteractionController::new(&scales.context_x, max_zoom);
        Ok(Self {
            layout,
            max_zoom,
            payload: LandscapePayload::default(),
            scales,
            view,
            controller,
            selection: SelectionStore::new(),
            domain_order: ZOrder::default(),
            hovered_domain: None,
            mode,
            show_clinvar: false,
            scene: Scene::default(),
            measure: FixedWidthMeasure::default(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ScaleError> {
        Self::new(settings.layout.clone(), settings.max_zoom, settings.default_mode)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn payload(&self) -> &LandscapePayload {
        &self.payload
    }

    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn mode(&self) -> LandscapeMode {
        self.mode
    }

    /// Whether ClinVar ticks are shown on the focus view
    pub fn show_clinvar(&self) -> bool {
        self.show_clinvar
    }

    /// Domain indices in paint order
    pub fn domain_order(&self) -> &ZOrder<usize> {
        &self.domain_order
    }

    pub fn hovered_domain(&self) -> Option<usize> {
        self.hovered_domain
    }

    pub fn has_data(&self) -> bool {
        !self.payload.is_empty()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Replace the payload and reset every per-session state, then render
    pub fn create_graph(&mut self, payload: LandscapePayload) -> Result<(), MetadomeError> {
        payload.validate()?;

        let view = ViewState::for_positions(payload.positions());
        let scales = ScaleSet::new(&self.layout, view.extent().as_tuple(), MAX_TOLERANCE)?;

        self.controller = InteractionController::new(&scales.context_x, self.max_zoom);
        self.view = view;
        self.scales = scales;
        self.selection.clear();
        self.domain_order = ZOrder::new(0..payload.domains.len());
        self.hovered_domain = None;
        self.show_clinvar = false;
        self.scene = Scene::build(&payload);
        self.payload = payload;

        RedrawDispatcher::new(&self.measure).draw_context(&mut self.scene, &self.payload, &self.scales);
        self.scene.brush = self.controller.brush();
        self.redraw()?;

        tracing::info!(
            "Created graph for {} with {} positions and {} domains",
            self.payload.transcript_id,
            self.payload.positional_annotation.len(),
            self.payload.domains.len()
        );
        Ok(())
    }

    /// Redraw with the current state
    pub fn rescale_landscape(&mut self) -> Result<(), ScaleError> {
        self.redraw()
    }

    /// Show the full extent and reset brush and zoom
    pub fn reset_zoom(&mut self) -> Result<ViewUpdate, ScaleError> {
        let update = self.controller.reset(&mut self.view, &self.scales.context_x);
        tracing::info!("Reset zoom to ({}, {})", update.window.lo, update.window.hi);
        self.apply(update)?;
        Ok(update)
    }

    /// Use a new pixel layout, keeping the visible window
    pub fn set_layout(&mut self, layout: ChartLayout) -> Result<(), ScaleError> {
        let window = self.view.window();
        let mut scales = ScaleSet::new(&layout, self.view.extent().as_tuple(), MAX_TOLERANCE)?;
        scales.sync_to(window)?;

        let mut controller = InteractionController::new(&scales.context_x, self.max_zoom);
        let update = controller.synchronize(window, &scales.context_x, GestureKind::Reset);

        self.layout = layout;
        self.scales = scales;
        self.controller = controller;
        RedrawDispatcher::new(&self.measure).draw_context(&mut self.scene, &self.payload, &self.scales);
        self.apply(update)
    }

    /// Width of one label glyph in pixels; triggers a redraw when it changes
    pub fn set_label_char_width(&mut self, char_width: f64) -> Result<(), ScaleError> {
        if !(char_width.is_finite() && char_width > 0.0) || char_width == self.measure.char_width {
            return Ok(());
        }
        self.measure.char_width = char_width;
        self.redraw()
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Apply a context-view brush; `None` when the event was dropped
    pub fn brush(&mut self, event: BrushEvent) -> Result<Option<ViewUpdate>, ScaleError> {
        let update = self
            .controller
            .on_brush(event, &mut self.view, &self.scales.context_x);
        self.apply_optional(update)
    }

    /// Apply a focus-view zoom transform; `None` when the event was dropped
    pub fn zoom(&mut self, event: ZoomEvent) -> Result<Option<ViewUpdate>, ScaleError> {
        let update = self
            .controller
            .on_zoom(event, &mut self.view, &self.scales.context_x);
        self.apply_optional(update)
    }

    /// Zoom by `factor` keeping the position under focus pixel `focus_px` fixed
    pub fn zoom_at(&mut self, focus_px: f64, factor: f64) -> Result<Option<ViewUpdate>, ScaleError> {
        let position = self.scales.focus_x.invert(focus_px);
        let window = self.view.window();
        let (r0, r1) = self.scales.context_x.range();
        let t = (position - window.lo) / window.width();
        let anchor = r0 + t * (r1 - r0);
        let transform = self.controller.transform().scaled_about(anchor, factor);
        self.zoom(ZoomEvent::user_at(transform, anchor))
    }

    /// Pan the focus view by `focus_dx` pixels
    pub fn pan_by(&mut self, focus_dx: f64) -> Result<Option<ViewUpdate>, ScaleError> {
        let dx = focus_dx * self.scales.context_x.range_width() / self.scales.focus_x.range_width();
        let transform: ZoomTransform = self.controller.transform().translated(dx);
        self.zoom(ZoomEvent::user(transform))
    }

    /// Pointer pressed on the context view; `false` while a zoom is running
    pub fn begin_brush(&mut self) -> bool {
        self.controller.begin_brush()
    }

    /// Wheel or drag started on the focus view; `false` while brushing
    pub fn begin_zoom(&mut self) -> bool {
        self.controller.begin_zoom()
    }

    /// Pointer released or wheel settled
    pub fn end_gesture(&mut self) {
        self.controller.end_gesture();
    }

    // ========================================================================
    // Selection, mode and z-order
    // ========================================================================

    /// Flip the selection of a residue; unknown positions are ignored
    pub fn toggle_position(&mut self, position: u32) -> Result<bool, ScaleError> {
        if self.payload.record(position).is_none() {
            tracing::debug!("Ignoring selection of unknown position {}", position);
            return Ok(false);
        }
        let selected = self.selection.toggle(position);
        self.redraw()?;
        Ok(selected)
    }

    pub fn clear_selection(&mut self) -> Result<(), ScaleError> {
        self.selection.clear();
        self.redraw()
    }

    pub fn set_mode(&mut self, mode: LandscapeMode) -> Result<(), ScaleError> {
        if mode != self.mode {
            tracing::info!("Switching to {}", mode);
            self.mode = mode;
        }
        self.redraw()
    }

    /// Show or hide the ClinVar ticks; a new graph starts with them hidden
    pub fn set_show_clinvar(&mut self, show: bool) -> Result<(), ScaleError> {
        if show != self.show_clinvar {
            tracing::info!("{} ClinVar variants", if show { "Showing" } else { "Hiding" });
            self.show_clinvar = show;
        }
        self.redraw()
    }

    /// Track the hovered domain; it is painted on top until the pointer leaves
    pub fn hover_domain(&mut self, index: Option<usize>) {
        if index == self.hovered_domain {
            return;
        }
        if let Some(previous) = self.hovered_domain {
            self.domain_order.send_to_back(&previous);
        }
        if let Some(current) = index {
            self.domain_order.bring_to_front(&current);
        }
        self.hovered_domain = index;
    }

    /// Visible window rounded outward to whole positions
    pub fn visible_bounds(&self) -> (u32, u32) {
        self.view.window().integer_bounds()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn apply_optional(&mut self, update: Option<ViewUpdate>) -> Result<Option<ViewUpdate>, ScaleError> {
        match update {
            Some(update) => {
                self.apply(update)?;
                Ok(Some(update))
            }
            None => Ok(None),
        }
    }

    fn apply(&mut self, update: ViewUpdate) -> Result<(), ScaleError> {
        self.scales.sync_to(update.window)?;
        self.scene.brush = update.brush;
        tracing::debug!(
            "{} moved window to ({:.3}, {:.3}) in cycle {}",
            update.source,
            update.window.lo,
            update.window.hi,
            update.cycle
        );
        self.redraw()
    }

    fn redraw(&mut self) -> Result<(), ScaleError> {
        self.scene.landscape_opacity = self.mode.landscape_opacity();
        self.scene.show_clinvar = self.show_clinvar;
        RedrawDispatcher::new(&self.measure).redraw(
            &mut self.scene,
            &self.view,
            &self.scales,
            &self.selection,
        )
    }
}

impl Default for ChartSession {
    fn default() -> Self {
        // The placeholder extent and score domain are never degenerate
        match Self::new(ChartLayout::default(), DEFAULT_MAX_ZOOM, LandscapeMode::default()) {
            Ok(session) => session,
            Err(e) => unreachable!("default chart session: {}", e),
        }
    }
}
