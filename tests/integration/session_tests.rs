//! Chart session tests
//!
//! Tests cover the full pipeline a UI drives: create a graph, brush the
//! context view, zoom and pan the focus view, select residues and switch
//! modes, checking the visible window and the redrawn scene after each step.

use metadome::interaction::{BrushEvent, ZoomEvent};
use metadome::session::{ChartSession, LandscapeMode};

use crate::common::{payload_at, session_with, synthetic_payload};

fn brush_to(session: &mut ChartSession, lo: f64, hi: f64) {
    let ctx = session.scales().context_x;
    session
        .brush(BrushEvent::user(ctx.map(lo), ctx.map(hi)))
        .unwrap()
        .unwrap();
    session.end_gesture();
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ============================================
// Initial Load Tests
// ============================================

#[test]
fn test_initial_load_maps_extent_to_focus_range() {
    let session = session_with(100);
    let window = session.view().window();
    assert_eq!((window.lo, window.hi), (1.0, 100.0));

    let focus = session.scales().focus_x;
    assert_eq!(focus.map(1.0), 40.0);
    assert_eq!(focus.map(100.0), 1160.0);
    assert_eq!(session.scene().brush, (0.0, 1200.0));
}

#[test]
fn test_empty_payload_renders_nothing() {
    let mut session = ChartSession::default();
    session.create_graph(payload_at(&[])).unwrap();
    assert!(!session.has_data());
    assert!(session.scene().areas.is_empty());
    assert!(session.scene().line.is_empty());
    assert!(session.zoom_at(500.0, 2.0).is_ok());
    assert!(session.pan_by(50.0).is_ok());
}

#[test]
fn test_single_position_payload() {
    let mut session = ChartSession::default();
    session.create_graph(payload_at(&[42])).unwrap();
    let window = session.view().window();
    assert_eq!((window.lo, window.hi), (41.5, 42.5));
    let tick = session.scene().tick(42).unwrap();
    assert!(tick.visible);
    assert!(tick.width > 0.0);
}

// ============================================
// Brush Tests
// ============================================

#[test]
fn test_brush_to_sub_range_redraws_only_visible_ticks() {
    let mut session = session_with(100);
    brush_to(&mut session, 20.0, 40.0);

    let window = session.view().window();
    assert!(close(window.lo, 20.0));
    assert!(close(window.hi, 40.0));

    session.rescale_landscape().unwrap();
    let visible: Vec<u32> = session.scene().visible_ticks().map(|t| t.position).collect();
    assert_eq!(visible, (20..=40).collect::<Vec<_>>());
    assert_eq!(session.visible_bounds(), (20, 40));
}

#[test]
fn test_brush_syncs_zoom_transform() {
    let mut session = session_with(100);
    brush_to(&mut session, 20.0, 40.0);

    // Applying the synced zoom as a user gesture reproduces the window
    let transform = session.controller().transform();
    let before = session.view().window();
    session.zoom(ZoomEvent::user(transform)).unwrap().unwrap();
    let after = session.view().window();
    assert!(close(before.lo, after.lo));
    assert!(close(before.hi, after.hi));
}

// ============================================
// Gesture Exclusion Tests
// ============================================

#[test]
fn test_zoom_ignored_while_brushing() {
    let mut session = session_with(100);
    let ctx = session.scales().context_x;
    session
        .brush(BrushEvent::user(ctx.map(30.0), ctx.map(60.0)))
        .unwrap();
    let before = session.view().window();
    assert_eq!(session.zoom_at(600.0, 2.0).unwrap(), None);
    assert_eq!(session.view().window(), before);
}

// ============================================
// Zoom Tests
// ============================================

#[test]
fn test_window_stays_inside_extent_under_gestures() {
    let mut session = session_with(250);
    let extent = session.view().extent();

    for step in 0..60 {
        let px = 40.0 + (step * 37 % 1120) as f64;
        let factor = if step % 4 == 0 { 0.5 } else { 1.6 };
        session.zoom_at(px, factor).unwrap();
        session.pan_by(if step % 2 == 0 { 900.0 } else { -1300.0 }).unwrap();
        session.end_gesture();
        if step % 7 == 0 {
            brush_to(&mut session, -50.0 + step as f64, 400.0);
        }

        let window = session.view().window();
        assert!(window.lo >= extent.min && window.hi <= extent.max, "step {}: {:?}", step, window);
        assert!(session.scales().is_synced(window));
    }
}

#[test]
fn test_zoom_clamped_to_max_zoom() {
    let mut session = session_with(300);
    for _ in 0..20 {
        session.zoom_at(600.0, 3.0).unwrap();
    }
    session.end_gesture();
    let width = session.view().window().width();
    assert!(close(width, 299.0 / 30.0));
}

#[test]
fn test_zoom_out_at_full_extent_is_a_no_op() {
    let mut session = session_with(100);
    let px = session.scales().focus_x.map(70.0);
    assert_eq!(session.zoom_at(px, 0.9).unwrap(), None);
    session.end_gesture();

    let window = session.view().window();
    assert_eq!((window.lo, window.hi), (1.0, 100.0));
    assert_eq!(session.scene().brush, (0.0, 1200.0));
    assert_eq!(session.scene().visible_ticks().count(), 100);
}

#[test]
fn test_pan_at_full_extent_keeps_full_window() {
    let mut session = session_with(100);
    for dx in [100.0, -100.0, 5000.0] {
        session.pan_by(dx).unwrap();
        let window = session.view().window();
        assert_eq!((window.lo, window.hi), (1.0, 100.0), "pan by {}", dx);
    }
    session.end_gesture();
    assert!(session.view().is_full());
}

#[test]
fn test_wheel_at_max_zoom_keeps_anchor_residue() {
    let mut session = session_with(100);
    let px = session.scales().focus_x.map(86.0);
    for _ in 0..60 {
        session.zoom_at(px, 1.2).unwrap();
    }
    assert!(close(session.controller().transform().k, 30.0));
    assert!(close(session.scales().focus_x.invert(px), 86.0));

    let before = session.view().window();
    assert_eq!(session.zoom_at(px, 1.2).unwrap(), None);
    assert_eq!(session.view().window(), before);
    assert!(close(session.scales().focus_x.invert(px), 86.0));
}

#[test]
fn test_reset_zoom_after_gestures() {
    let mut session = session_with(100);
    session.zoom_at(300.0, 5.0).unwrap();
    session.end_gesture();
    session.reset_zoom().unwrap();
    assert!(session.view().is_full());
    assert_eq!(session.scene().visible_ticks().count(), 100);
}

// ============================================
// Selection Tests
// ============================================

#[test]
fn test_selection_survives_window_changes() {
    let mut session = session_with(100);
    assert!(session.toggle_position(25).unwrap());

    brush_to(&mut session, 50.0, 90.0);
    assert!(session.selection().is_selected(25));
    assert!(session.scene().tick(25).map_or(true, |t| !t.visible));

    brush_to(&mut session, 10.0, 40.0);
    assert!(session.selection().is_selected(25));
    let tick = session.scene().tick(25).unwrap();
    assert!(tick.visible);
    assert!(tick.selected);
}

#[test]
fn test_selection_toggle_count() {
    let mut session = session_with(100);
    for position in [12, 48, 77] {
        assert!(session.toggle_position(position).unwrap());
    }
    assert!(!session.toggle_position(48).unwrap());
    assert_eq!(session.selection().selected_count(), 2);
    assert!(session.selection().summary_visible());

    session.clear_selection().unwrap();
    assert_eq!(session.selection().selected_count(), 0);
    assert!(!session.selection().summary_visible());
}

#[test]
fn test_new_graph_clears_selection_and_order() {
    let mut session = session_with(100);
    session.toggle_position(30).unwrap();
    session.hover_domain(Some(0));

    session.create_graph(synthetic_payload(80)).unwrap();
    assert_eq!(session.selection().selected_count(), 0);
    assert_eq!(session.hovered_domain(), None);
    assert_eq!(session.domain_order().iter().copied().collect::<Vec<_>>(), vec![0, 1]);
}

// ============================================
// Mode Tests
// ============================================

#[test]
fn test_mode_switch_keeps_window_and_selection() {
    let mut session = session_with(100);
    brush_to(&mut session, 20.0, 40.0);
    session.toggle_position(30).unwrap();
    let window = session.view().window();

    session.set_mode(LandscapeMode::MetaDomainLandscape).unwrap();
    assert_eq!(session.scene().landscape_opacity, 0.0);
    assert_eq!(session.view().window(), window);
    assert!(session.scene().tick(30).unwrap().selected);
}

// ============================================
// ClinVar Tests
// ============================================

#[test]
fn test_clinvar_ticks_follow_toggle_and_window() {
    let mut session = session_with(100);
    assert_eq!(session.scene().variants.len(), 10);
    assert!(session.scene().variants.iter().all(|v| !v.visible));

    session.set_show_clinvar(true).unwrap();
    brush_to(&mut session, 25.0, 55.0);
    let visible: Vec<u32> = session
        .scene()
        .variants
        .iter()
        .filter(|v| v.visible)
        .map(|v| v.position)
        .collect();
    assert_eq!(visible, vec![30, 40, 50]);

    session.set_show_clinvar(false).unwrap();
    assert!(session.scene().variants.iter().all(|v| !v.visible));
}

// ============================================
// Layout Tests
// ============================================

#[test]
fn test_label_width_change_redraws() {
    let mut session = session_with(100);
    let before = session.scene().redraw_count;
    session.set_label_char_width(30.0).unwrap();
    assert_eq!(session.scene().redraw_count, before + 1);
    assert_eq!(session.scene().tick(50).unwrap().label_opacity, 0.0);

    // Same width and invalid widths are ignored
    session.set_label_char_width(30.0).unwrap();
    session.set_label_char_width(f64::NAN).unwrap();
    assert_eq!(session.scene().redraw_count, before + 1);
}
