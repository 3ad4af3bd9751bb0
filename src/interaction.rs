//! Brush/zoom interaction controller.
//!
//! Two controls move the visible window: a brush over the context view and
//! a zoom (wheel or drag) over the focus view. Each one has to be kept in
//! step with the other after it moves. That programmatic update must not be
//! treated as a new user gesture, or the two controls would keep
//! re-triggering each other. Every applied gesture therefore opens a new
//! sync cycle, and the updates pushed to the other control are tagged with
//! [`Origin::Sync`] so they are recognised and ignored when they come back.

use strum::{Display, EnumString};

use crate::scale::LinearScale;
use crate::view::{ViewState, VisibleWindow};

/// Which gesture is in progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum GestureState {
    #[default]
    Idle,
    Brushing,
    Zooming,
}

/// The control a gesture came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum GestureKind {
    Brush,
    Zoom,
    Reset,
}

/// Where an event originated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Direct user input
    User,
    /// Programmatic update pushed out by the given sync cycle
    Sync(u64),
}

/// Zoom transform of the focus view: scale factor `k` and x translation
///
/// Expressed in context pixel coordinates: a context pixel `p` is shown at
/// `p * k + x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform { k: 1.0, x: 0.0 };

    pub fn new(k: f64, x: f64) -> Self {
        Self { k, x }
    }

    pub fn is_valid(&self) -> bool {
        self.k.is_finite() && self.x.is_finite() && self.k > 0.0
    }

    /// Context pixel shown at screen pixel `px`
    #[inline]
    pub fn invert_x(&self, px: f64) -> f64 {
        (px - self.x) / self.k
    }

    /// Screen pixel of context pixel `px`
    #[inline]
    pub fn apply_x(&self, px: f64) -> f64 {
        px * self.k + self.x
    }

    /// Zoom by `factor` keeping the screen pixel `anchor` fixed
    pub fn scaled_about(&self, anchor: f64, factor: f64) -> Self {
        let k = self.k * factor;
        let x = anchor - (anchor - self.x) * factor;
        Self { k, x }
    }

    /// Pan by `dx` screen pixels
    pub fn translated(&self, dx: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + dx,
        }
    }

    /// Transform that shows exactly the context pixels `selection` across
    /// the pixel range `range`
    pub fn for_selection(selection: (f64, f64), range: (f64, f64)) -> Self {
        let (s0, s1) = selection;
        let (r0, r1) = range;
        if s1 == s0 {
            return Self::IDENTITY;
        }
        let k = (r1 - r0) / (s1 - s0);
        Self { k, x: r0 - k * s0 }
    }
}

/// A brush event from the context view; `selection` is in context pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushEvent {
    pub selection: Option<(f64, f64)>,
    pub origin: Origin,
}

impl BrushEvent {
    pub fn user(x0: f64, x1: f64) -> Self {
        Self {
            selection: Some((x0, x1)),
            origin: Origin::User,
        }
    }
}

/// A zoom event from the focus view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomEvent {
    pub transform: ZoomTransform,
    /// Screen pixel the gesture zooms about; it stays fixed when the scale
    /// factor has to be clamped
    pub anchor: Option<f64>,
    pub origin: Origin,
}

impl ZoomEvent {
    pub fn user(transform: ZoomTransform) -> Self {
        Self {
            transform,
            anchor: None,
            origin: Origin::User,
        }
    }

    /// User zoom about the screen pixel `anchor`
    pub fn user_at(transform: ZoomTransform, anchor: f64) -> Self {
        Self {
            anchor: Some(anchor),
            ..Self::user(transform)
        }
    }
}

/// Result of an applied gesture: the new window plus the state both
/// controls must show
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewUpdate {
    pub window: VisibleWindow,
    /// Brush selection in context pixels
    pub brush: (f64, f64),
    pub transform: ZoomTransform,
    pub source: GestureKind,
    pub cycle: u64,
}

#[cfg(test)]
impl ViewUpdate {
    /// The brush move this update pushes into the context view
    pub(crate) fn brush_echo(&self) -> BrushEvent {
        BrushEvent {
            selection: Some(self.brush),
            origin: Origin::Sync(self.cycle),
        }
    }

    /// The transform this update pushes into the focus view
    pub(crate) fn zoom_echo(&self) -> ZoomEvent {
        ZoomEvent {
            transform: self.transform,
            anchor: None,
            origin: Origin::Sync(self.cycle),
        }
    }
}

/// Shift a window that fits the extent back inside it, keeping its width;
/// a window at least as wide as the extent becomes the whole extent
fn keep_inside(lo: f64, hi: f64, view: &ViewState) -> (f64, f64) {
    let extent = view.extent();
    let width = hi - lo;
    if !(width > 0.0) {
        return (lo, hi);
    }
    // Pixel round trips can leave a full-width window a hair short
    if width >= extent.width() * (1.0 - 1e-9) {
        return extent.as_tuple();
    }
    if lo < extent.min {
        (extent.min, extent.min + width)
    } else if hi > extent.max {
        (extent.max - width, extent.max)
    } else {
        (lo, hi)
    }
}

/// Whether two transforms show the same window, up to rounding
fn same_transform(a: ZoomTransform, b: ZoomTransform) -> bool {
    let close = |p: f64, q: f64| (p - q).abs() <= 1e-9 * p.abs().max(q.abs()).max(1.0);
    close(a.k, b.k) && close(a.x, b.x)
}

/// State machine coordinating brush and zoom
#[derive(Clone, Debug)]
pub struct InteractionController {
    state: GestureState,
    cycle: u64,
    brush: (f64, f64),
    transform: ZoomTransform,
    max_zoom: f64,
}

impl InteractionController {
    /// New controller with the brush covering the whole context range
    pub fn new(context_x: &LinearScale, max_zoom: f64) -> Self {
        Self {
            state: GestureState::Idle,
            cycle: 0,
            brush: context_x.range(),
            transform: ZoomTransform::IDENTITY,
            max_zoom: max_zoom.max(1.0),
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn brush(&self) -> (f64, f64) {
        self.brush
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Number of applied gestures since construction
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Context-view drag started; refused while zooming
    pub fn begin_brush(&mut self) -> bool {
        self.begin(GestureState::Brushing)
    }

    /// Focus-view wheel or drag started; refused while brushing
    pub fn begin_zoom(&mut self) -> bool {
        self.begin(GestureState::Zooming)
    }

    fn begin(&mut self, next: GestureState) -> bool {
        match self.state {
            GestureState::Idle => {
                self.state = next;
                true
            }
            current => current == next,
        }
    }

    /// Pointer released or wheel settled
    pub fn end_gesture(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Apply a brush event
    ///
    /// Echoes, events arriving during a zoom and malformed selections are
    /// dropped without touching `view`.
    pub fn on_brush(
        &mut self,
        event: BrushEvent,
        view: &mut ViewState,
        context_x: &LinearScale,
    ) -> Option<ViewUpdate> {
        if let Origin::Sync(cycle) = event.origin {
            tracing::debug!("Ignoring brush echo of sync cycle {}", cycle);
            return None;
        }
        if self.state == GestureState::Zooming {
            tracing::debug!("Ignoring brush event during zoom");
            return None;
        }
        let Some((x0, x1)) = event.selection else {
            tracing::debug!("Dropping brush event without selection");
            return None;
        };
        if !(x0.is_finite() && x1.is_finite()) || x0 == x1 {
            tracing::debug!("Dropping malformed brush selection ({}, {})", x0, x1);
            return None;
        }
        self.state = GestureState::Brushing;

        let window = view.set_window(context_x.invert(x0), context_x.invert(x1));
        Some(self.synchronize(window, context_x, GestureKind::Brush))
    }

    /// Apply a zoom event
    ///
    /// The scale factor is clamped to `[1, max_zoom]`; the resulting window
    /// is clamped into the extent, and the stored transform re-derived from
    /// it so panning cannot leave the data.
    pub fn on_zoom(
        &mut self,
        event: ZoomEvent,
        view: &mut ViewState,
        context_x: &LinearScale,
    ) -> Option<ViewUpdate> {
        if let Origin::Sync(cycle) = event.origin {
            tracing::debug!("Ignoring zoom echo of sync cycle {}", cycle);
            return None;
        }
        if self.state == GestureState::Brushing {
            tracing::debug!("Ignoring zoom event during brush");
            return None;
        }
        let transform = event.transform;
        if !transform.is_valid() {
            tracing::debug!("Dropping malformed zoom transform {:?}", transform);
            return None;
        }
        self.state = GestureState::Zooming;

        let transform = self.clamp_scale(transform, event.anchor, context_x);
        if same_transform(transform, self.transform) {
            tracing::debug!("Zoom already at its limit (k = {})", transform.k);
            return None;
        }
        let (r0, r1) = context_x.range();
        let lo = context_x.invert(transform.invert_x(r0));
        let hi = context_x.invert(transform.invert_x(r1));
        let (lo, hi) = keep_inside(lo, hi, view);
        let window = view.set_window(lo, hi);
        Some(self.synchronize(window, context_x, GestureKind::Zoom))
    }

    /// Show the full extent and reset both controls
    pub fn reset(&mut self, view: &mut ViewState, context_x: &LinearScale) -> ViewUpdate {
        self.state = GestureState::Idle;
        let window = view.reset();
        self.synchronize(window, context_x, GestureKind::Reset)
    }

    /// Clamp the scale factor to `[1, max_zoom]` about the gesture anchor
    ///
    /// The context pixel under the anchor stays under it. Without an anchor
    /// the point shown at the centre of the current view stays put.
    fn clamp_scale(
        &self,
        transform: ZoomTransform,
        anchor: Option<f64>,
        context_x: &LinearScale,
    ) -> ZoomTransform {
        let k = transform.k.clamp(1.0, self.max_zoom);
        if k == transform.k {
            return transform;
        }
        let (screen, point) = match anchor.filter(|a| a.is_finite()) {
            Some(anchor) => (anchor, transform.invert_x(anchor)),
            None => {
                let (r0, r1) = context_x.range();
                let centre = (r0 + r1) / 2.0;
                (centre, self.transform.invert_x(centre))
            }
        };
        ZoomTransform::new(k, screen - point * k)
    }

    /// Bring brush and transform in line with `window` and open a new cycle
    pub fn synchronize(
        &mut self,
        window: VisibleWindow,
        context_x: &LinearScale,
        source: GestureKind,
    ) -> ViewUpdate {
        self.cycle += 1;
        self.brush = (context_x.map(window.lo), context_x.map(window.hi));
        self.transform = ZoomTransform::for_selection(self.brush, context_x.range());
        ViewUpdate {
            window,
            brush: self.brush,
            transform: self.transform,
            source,
            cycle: self.cycle,
        }
    }
}
