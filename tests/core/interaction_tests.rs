//! Tests for brush/zoom coordination
//!
//! Tests cover:
//! - Window containment over long gesture sequences
//! - Zoom limits and panning at the full extent
//! - Sync cycle bookkeeping

use metadome::interaction::{
    BrushEvent, GestureKind, InteractionController, ZoomEvent, ZoomTransform,
};
use metadome::scale::LinearScale;
use metadome::view::ViewState;

/// Small deterministic generator so sequences are reproducible
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn between(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn setup(positions: Vec<u32>) -> (InteractionController, ViewState, LinearScale) {
    let view = ViewState::for_positions(positions);
    let context = LinearScale::new(view.extent().as_tuple(), (0.0, 1200.0)).unwrap();
    let controller = InteractionController::new(&context, 30.0);
    (controller, view, context)
}

// ============================================
// Containment Tests
// ============================================

#[test]
fn test_window_stays_inside_extent() {
    for seed in [1u64, 7, 42, 2024] {
        let (mut ctl, mut view, ctx) = setup((1..=500).collect());
        let extent = view.extent();
        let mut rng = Lcg(seed);

        for step in 0..400 {
            let kind = rng.next_f64();
            if kind < 0.4 {
                let x0 = rng.between(-300.0, 1500.0);
                let x1 = rng.between(-300.0, 1500.0);
                ctl.on_brush(BrushEvent::user(x0, x1), &mut view, &ctx);
            } else if kind < 0.8 {
                let current = ctl.transform();
                let t = current
                    .scaled_about(rng.between(0.0, 1200.0), rng.between(0.2, 5.0))
                    .translated(rng.between(-2000.0, 2000.0));
                ctl.on_zoom(ZoomEvent::user(t), &mut view, &ctx);
            } else if kind < 0.9 {
                ctl.reset(&mut view, &ctx);
            }
            // Gestures end regularly so both controls get their turn
            if step % 3 == 0 {
                ctl.end_gesture();
            }

            let window = view.window();
            assert!(window.lo >= extent.min, "seed {} step {}: {:?}", seed, step, window);
            assert!(window.hi <= extent.max, "seed {} step {}: {:?}", seed, step, window);
            assert!(window.width() > 0.0, "seed {} step {}: {:?}", seed, step, window);
        }
    }
}

#[test]
fn test_window_inside_sparse_extent() {
    let (mut ctl, mut view, ctx) = setup(vec![10, 11, 50, 400]);
    let t = ZoomTransform::new(30.0, -1e6);
    let update = ctl.on_zoom(ZoomEvent::user(t), &mut view, &ctx).unwrap();
    assert!(update.window.lo >= 10.0);
    assert!(update.window.hi <= 400.0);
}

// ============================================
// Limit Tests
// ============================================

#[test]
fn test_zoom_steps_past_max_zoom_are_dropped() {
    let (mut ctl, mut view, ctx) = setup((1..=100).collect());
    let anchor = 1000.0;
    let mut last = None;
    for _ in 0..40 {
        let t = ctl.transform().scaled_about(anchor, 1.5);
        if let Some(update) = ctl.on_zoom(ZoomEvent::user_at(t, anchor), &mut view, &ctx) {
            last = Some(update);
        }
    }
    let last = last.unwrap();
    assert!((last.transform.k - 30.0).abs() < 1e-6);
    // The context pixel under the anchor never moved
    assert!((ctl.transform().invert_x(anchor) - anchor).abs() < 1e-6);

    let window = view.window();
    let cycle = ctl.cycle();
    let t = ctl.transform().scaled_about(anchor, 1.5);
    assert_eq!(ctl.on_zoom(ZoomEvent::user_at(t, anchor), &mut view, &ctx), None);
    assert_eq!(view.window(), window);
    assert_eq!(ctl.cycle(), cycle);
}

#[test]
fn test_zoom_out_never_narrows_full_window() {
    let (mut ctl, mut view, ctx) = setup((1..=100).collect());
    for anchor in [0.0, 250.0, 840.0, 1200.0] {
        let t = ctl.transform().scaled_about(anchor, 0.5);
        ctl.on_zoom(ZoomEvent::user_at(t, anchor), &mut view, &ctx);
        assert!(view.is_full(), "anchor {}: {:?}", anchor, view.window());
    }
}

#[test]
fn test_pan_of_full_window_keeps_width() {
    let (mut ctl, mut view, ctx) = setup((1..=100).collect());
    for dx in [300.0, -300.0, 1e5] {
        let t = ctl.transform().translated(dx);
        ctl.on_zoom(ZoomEvent::user(t), &mut view, &ctx);
        assert!(view.is_full(), "pan {}: {:?}", dx, view.window());
    }
}

// ============================================
// Cycle Tests
// ============================================

#[test]
fn test_each_gesture_opens_a_cycle() {
    let (mut ctl, mut view, ctx) = setup((1..=100).collect());
    let first = ctl
        .on_brush(BrushEvent::user(100.0, 300.0), &mut view, &ctx)
        .unwrap();
    let second = ctl
        .on_brush(BrushEvent::user(100.0, 400.0), &mut view, &ctx)
        .unwrap();
    assert_eq!(first.source, GestureKind::Brush);
    assert_eq!(second.cycle, first.cycle + 1);
}
