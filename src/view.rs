//! Visible window and per-position layout.
//!
//! [`ViewState`] owns the part of position-space that is currently shown in
//! the focus and annotation views. Every change goes through
//! [`ViewState::set_window`], which keeps the window inside the full extent
//! and never lets it collapse to zero width.

/// Narrowest window the focus view may show, in positions
pub const MIN_WINDOW_WIDTH: f64 = 1.0;

/// Slack when testing whether a whole position lies inside a window, so a
/// bound that went through pixel space still includes its residue
const POSITION_EPSILON: f64 = 1e-6;

/// Full data extent in position-space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Placeholder extent for charts without positions
    pub const EMPTY: Extent = Extent { min: 0.0, max: 1.0 };

    /// Extent spanned by the first and last position
    ///
    /// A single residue gets half a position of room on each side, so the
    /// extent never has zero width.
    pub fn from_positions(positions: &[u32]) -> Self {
        match (positions.first(), positions.last()) {
            (Some(&first), Some(&last)) if first < last => Extent {
                min: first as f64,
                max: last as f64,
            },
            (Some(&only), Some(_)) => Extent {
                min: only as f64 - 0.5,
                max: only as f64 + 0.5,
            },
            _ => Self::EMPTY,
        }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// The visible sub-range of the full extent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleWindow {
    pub lo: f64,
    pub hi: f64,
}

impl VisibleWindow {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.lo - POSITION_EPSILON && position <= self.hi + POSITION_EPSILON
    }

    /// Window bounds rounded outward to whole positions
    pub fn integer_bounds(&self) -> (u32, u32) {
        let lo = (self.lo + POSITION_EPSILON).floor().max(0.0) as u32;
        let hi = (self.hi - POSITION_EPSILON).ceil().max(0.0) as u32;
        (lo, hi)
    }
}

/// Currently visible window plus the position layout derived from it
#[derive(Clone, Debug)]
pub struct ViewState {
    extent: Extent,
    window: VisibleWindow,
    positions: Vec<u32>,
}

impl ViewState {
    /// Start with the whole extent visible
    pub fn initialize(extent: Extent) -> Self {
        Self {
            extent,
            window: VisibleWindow::new(extent.min, extent.max),
            positions: Vec::new(),
        }
    }

    /// Start with the whole extent of `positions` visible
    ///
    /// `positions` must be strictly increasing.
    pub fn for_positions(positions: Vec<u32>) -> Self {
        let mut view = Self::initialize(Extent::from_positions(&positions));
        view.positions = positions;
        view
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    /// Whether the whole extent is visible
    pub fn is_full(&self) -> bool {
        self.window.lo <= self.extent.min && self.window.hi >= self.extent.max
    }

    /// Move the visible window
    ///
    /// Bounds are swapped when inverted and clamped into the extent. A
    /// window narrower than [`MIN_WINDOW_WIDTH`] is widened around its
    /// centre, then shifted back inside the extent. Non-finite bounds leave
    /// the current window untouched.
    pub fn set_window(&mut self, lo: f64, hi: f64) -> VisibleWindow {
        if !(lo.is_finite() && hi.is_finite()) {
            tracing::debug!("Ignoring non-finite window ({}, {})", lo, hi);
            return self.window;
        }

        let (mut lo, mut hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
        lo = lo.clamp(self.extent.min, self.extent.max);
        hi = hi.clamp(self.extent.min, self.extent.max);

        let min_width = MIN_WINDOW_WIDTH.min(self.extent.width());
        if hi - lo < min_width {
            let centre = (lo + hi) / 2.0;
            lo = centre - min_width / 2.0;
            hi = centre + min_width / 2.0;
            if lo < self.extent.min {
                lo = self.extent.min;
                hi = lo + min_width;
            }
            if hi > self.extent.max {
                hi = self.extent.max;
                lo = hi - min_width;
            }
        }

        self.window = VisibleWindow::new(lo, hi);
        self.window
    }

    /// Show the full extent again
    pub fn reset(&mut self) -> VisibleWindow {
        self.window = VisibleWindow::new(self.extent.min, self.extent.max);
        self.window
    }

    /// Index range of the positions inside the visible window
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let lo = self.window.lo - POSITION_EPSILON;
        let hi = self.window.hi + POSITION_EPSILON;
        let start = self.positions.partition_point(|&p| (p as f64) < lo);
        let end = self.positions.partition_point(|&p| (p as f64) <= hi);
        start..end.max(start)
    }

    /// Positions inside the visible window
    pub fn visible_positions(&self) -> &[u32] {
        &self.positions[self.visible_range()]
    }

    /// Left and right domain boundaries of the residue at `position`
    ///
    /// The segment starts half a position before the residue and is as wide
    /// as the gap to the next residue. The last residue reuses the width of
    /// the segment before it; a lone residue is one position wide. Unknown
    /// positions give `None`.
    pub fn boundary_for(&self, position: u32) -> Option<(f64, f64)> {
        let idx = self.positions.binary_search(&position).ok()?;
        let left = position as f64 - 0.5;
        let width = match (self.positions.get(idx + 1), idx.checked_sub(1)) {
            (Some(&next), _) => (next - position) as f64,
            (None, Some(prev_idx)) => (position - self.positions[prev_idx]) as f64,
            (None, None) => 1.0,
        };
        Some((left, left + width))
    }
}
