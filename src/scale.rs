//! Linear domain/range scales and the per-view scale set.
//!
//! A [`LinearScale`] maps a data coordinate (protein position or tolerance
//! score) onto a pixel coordinate and back. Scales are values: changing the
//! domain produces a new scale and the caller replaces the stored one.

use crate::error::ScaleError;
use crate::settings::ChartLayout;
use crate::view::VisibleWindow;

/// Tolerance for comparing a scale domain against the visible window
const SYNC_EPSILON: f64 = 1e-9;

/// Monotonic linear mapping between a domain and a pixel range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Construct a linear scale, rejecting degenerate or non-finite domains
pub fn make_linear_scale(domain: (f64, f64), range: (f64, f64)) -> Result<LinearScale, ScaleError> {
    LinearScale::new(domain, range)
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        let (d0, d1) = domain;
        let (r0, r1) = range;
        if !(d0.is_finite() && d1.is_finite() && r0.is_finite() && r1.is_finite()) {
            return Err(ScaleError::NonFinite(d0, d1, r0, r1));
        }
        if d0 == d1 {
            return Err(ScaleError::DegenerateDomain(d0));
        }
        Ok(Self { domain, range })
    }

    /// Map a domain value onto the pixel range
    #[inline]
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (value - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }

    /// Map a pixel value back onto the domain
    ///
    /// A zero-width pixel range maps every pixel onto the domain start.
    #[inline]
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return d0;
        }
        let t = (pixel - r0) / (r1 - r0);
        d0 + t * (d1 - d0)
    }

    /// Same pixel range, new domain
    pub fn with_domain(&self, domain: (f64, f64)) -> Result<Self, ScaleError> {
        Self::new(domain, self.range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Signed pixel width of the range
    pub fn range_width(&self) -> f64 {
        self.range.1 - self.range.0
    }

    /// Pixels per domain unit
    pub fn pixels_per_unit(&self) -> f64 {
        self.range_width() / (self.domain.1 - self.domain.0)
    }
}

/// The scales of every coordinated view
///
/// The context scales always cover the full data extent. The focus and
/// annotation x scales cover the visible window and are replaced on every
/// window change through [`ScaleSet::sync_to`].
#[derive(Clone, Debug)]
pub struct ScaleSet {
    /// Focus (landscape) x scale: visible window -> focus pixels
    pub focus_x: LinearScale,
    /// Annotation track x scale: visible window -> annotation pixels
    pub annotation_x: LinearScale,
    /// Context (overview) x scale: full extent -> context pixels
    pub context_x: LinearScale,
    /// Focus y scale: tolerance score -> landscape pixels
    pub y: LinearScale,
    /// Context y scale: tolerance score -> context pixels
    pub context_y: LinearScale,
}

impl ScaleSet {
    /// Build all scales over the full extent
    pub fn new(layout: &ChartLayout, full_extent: (f64, f64), max_score: f64) -> Result<Self, ScaleError> {
        let score_domain = (0.0, max_score);
        Ok(Self {
            focus_x: LinearScale::new(full_extent, layout.focus_x_range())?,
            annotation_x: LinearScale::new(full_extent, layout.focus_x_range())?,
            context_x: LinearScale::new(full_extent, layout.context_x_range())?,
            y: LinearScale::new(score_domain, layout.landscape_y_range())?,
            context_y: LinearScale::new(score_domain, layout.context_y_range())?,
        })
    }

    /// Point the focus and annotation scales at a new visible window
    pub fn sync_to(&mut self, window: VisibleWindow) -> Result<(), ScaleError> {
        let domain = (window.lo, window.hi);
        let focus_x = self.focus_x.with_domain(domain)?;
        let annotation_x = self.annotation_x.with_domain(domain)?;
        self.focus_x = focus_x;
        self.annotation_x = annotation_x;
        Ok(())
    }

    /// Whether the window-following scales match `window`
    pub fn is_synced(&self, window: VisibleWindow) -> bool {
        let matches = |scale: &LinearScale| {
            let (d0, d1) = scale.domain();
            (d0 - window.lo).abs() <= SYNC_EPSILON && (d1 - window.hi).abs() <= SYNC_EPSILON
        };
        matches(&self.focus_x) && matches(&self.annotation_x)
    }

    /// Error unless the window-following scales match `window`
    pub fn ensure_synced(&self, window: VisibleWindow) -> Result<(), ScaleError> {
        if self.is_synced(window) {
            Ok(())
        } else {
            Err(ScaleError::OutOfSync {
                lo: window.lo,
                hi: window.hi,
            })
        }
    }
}
