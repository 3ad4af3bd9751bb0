//! Per-position selection that survives zoom and pan.

use std::collections::BTreeSet;

/// Positions the user marked as selected, independent of the visible window
#[derive(Clone, Debug, Default)]
pub struct SelectionStore {
    selected: BTreeSet<u32>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the selection of `position`; returns the new state
    pub fn toggle(&mut self, position: u32) -> bool {
        if self.selected.remove(&position) {
            tracing::debug!("Deselected position {}", position);
            false
        } else {
            self.selected.insert(position);
            tracing::debug!("Selected position {}", position);
            true
        }
    }

    pub fn is_selected(&self, position: u32) -> bool {
        self.selected.contains(&position)
    }

    /// Number of selected positions, shown next to the summary panel
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Whether the selected-positions summary should be shown
    pub fn summary_visible(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Selected positions in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.selected.iter().copied()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
