//! Tests for the visible window and per-position boundaries
//!
//! Tests cover:
//! - Extent of regular, single and empty position lists
//! - Window clamping, swapping and minimum width
//! - Position boundaries, including the last position

use metadome::view::{Extent, ViewState, VisibleWindow, MIN_WINDOW_WIDTH};

// ============================================
// Extent Tests
// ============================================

#[test]
fn test_extent_from_positions() {
    assert_eq!(
        Extent::from_positions(&[3, 4, 9]),
        Extent { min: 3.0, max: 9.0 }
    );
}

#[test]
fn test_single_position_extent_has_width() {
    let extent = Extent::from_positions(&[42]);
    assert_eq!(extent, Extent { min: 41.5, max: 42.5 });
    assert_eq!(extent.width(), 1.0);
}

#[test]
fn test_empty_extent_is_placeholder() {
    assert_eq!(Extent::from_positions(&[]), Extent::EMPTY);
}

// ============================================
// Initial Load Tests
// ============================================

#[test]
fn test_initialize_shows_full_extent() {
    let view = ViewState::for_positions((1..=100).collect());
    assert_eq!(view.window(), VisibleWindow::new(1.0, 100.0));
    assert!(view.is_full());
    assert_eq!(view.visible_positions().len(), 100);
}

// ============================================
// Window Tests
// ============================================

#[test]
fn test_set_window_clamps_into_extent() {
    let mut view = ViewState::for_positions((1..=100).collect());
    let window = view.set_window(-50.0, 500.0);
    assert_eq!(window, VisibleWindow::new(1.0, 100.0));
}

#[test]
fn test_set_window_swaps_inverted_bounds() {
    let mut view = ViewState::for_positions((1..=100).collect());
    assert_eq!(view.set_window(40.0, 20.0), VisibleWindow::new(20.0, 40.0));
}

#[test]
fn test_zero_width_window_is_widened() {
    let mut view = ViewState::for_positions((1..=100).collect());
    let window = view.set_window(50.0, 50.0);
    assert_eq!(window.width(), MIN_WINDOW_WIDTH);
    assert_eq!(window, VisibleWindow::new(49.5, 50.5));

    // Widened windows stay inside the extent
    let window = view.set_window(100.0, 100.0);
    assert_eq!(window, VisibleWindow::new(99.0, 100.0));
}

#[test]
fn test_non_finite_window_ignored() {
    let mut view = ViewState::for_positions((1..=100).collect());
    view.set_window(10.0, 20.0);
    assert_eq!(
        view.set_window(f64::NAN, 30.0),
        VisibleWindow::new(10.0, 20.0)
    );
}

#[test]
fn test_reset_restores_extent() {
    let mut view = ViewState::for_positions((1..=100).collect());
    view.set_window(10.0, 20.0);
    assert!(!view.is_full());
    view.reset();
    assert!(view.is_full());
}

#[test]
fn test_visible_positions_follow_window() {
    let mut view = ViewState::for_positions(vec![1, 2, 5, 9, 12, 20]);
    view.set_window(4.0, 12.0);
    assert_eq!(view.visible_positions(), &[5, 9, 12]);
}

#[test]
fn test_integer_bounds_round_outward() {
    assert_eq!(VisibleWindow::new(19.6, 40.2).integer_bounds(), (19, 41));
    assert_eq!(VisibleWindow::new(20.0, 40.0).integer_bounds(), (20, 40));
    // Pixel round trips leave tiny errors that must not widen the bounds
    assert_eq!(
        VisibleWindow::new(20.000_000_000_1, 39.999_999_999_9).integer_bounds(),
        (20, 40)
    );
}

// ============================================
// Boundary Tests
// ============================================

#[test]
fn test_boundary_for_last_position_reuses_previous_width() {
    let view = ViewState::for_positions(vec![1, 2, 5, 9]);
    let (left, right) = view.boundary_for(9).unwrap();
    assert_eq!(left, 8.5);
    assert_eq!(right - left, 4.0);
}

#[test]
fn test_boundary_for_regular_positions() {
    let view = ViewState::for_positions((1..=100).collect());
    assert_eq!(view.boundary_for(1), Some((0.5, 1.5)));
    assert_eq!(view.boundary_for(100), Some((99.5, 100.5)));
}

#[test]
fn test_boundary_for_gap() {
    let view = ViewState::for_positions(vec![1, 2, 5, 9]);
    assert_eq!(view.boundary_for(2), Some((1.5, 4.5)));
}

#[test]
fn test_boundary_for_lone_and_unknown_positions() {
    let view = ViewState::for_positions(vec![7]);
    assert_eq!(view.boundary_for(7), Some((6.5, 7.5)));
    assert_eq!(view.boundary_for(8), None);
}
