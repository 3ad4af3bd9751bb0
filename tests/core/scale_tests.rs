//! Tests for linear scales and the scale set
//!
//! Tests cover:
//! - Map/invert round trips
//! - Degenerate and non-finite domains
//! - Syncing the window-following scales

use metadome::error::ScaleError;
use metadome::scale::{make_linear_scale, LinearScale, ScaleSet};
use metadome::settings::ChartLayout;
use metadome::view::VisibleWindow;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9 * a.abs().max(b.abs()).max(1.0)
}

// ============================================
// Round Trip Tests
// ============================================

#[test]
fn test_round_trip_law() {
    let scales = [
        ((1.0, 100.0), (40.0, 1160.0)),
        ((20.0, 40.0), (40.0, 1160.0)),
        ((0.0, 1.8), (270.0, 0.0)),
        ((-5.0, 12_345.0), (0.0, 333.3)),
        ((7.5, 8.5), (1000.0, -1000.0)),
    ];

    for (domain, range) in scales {
        let scale = make_linear_scale(domain, range).unwrap();
        for step in 0..=50 {
            let v = domain.0 + (domain.1 - domain.0) * step as f64 / 50.0;
            assert!(
                close(scale.invert(scale.map(v)), v),
                "round trip of {} through {:?} -> {:?}",
                v,
                domain,
                range
            );
        }
    }
}

#[test]
fn test_map_endpoints() {
    let scale = LinearScale::new((1.0, 100.0), (40.0, 1160.0)).unwrap();
    assert_eq!(scale.map(1.0), 40.0);
    assert_eq!(scale.map(100.0), 1160.0);
    assert_eq!(scale.invert(40.0), 1.0);
}

#[test]
fn test_inverted_range() {
    let y = LinearScale::new((0.0, 1.8), (270.0, 0.0)).unwrap();
    assert_eq!(y.map(0.0), 270.0);
    assert_eq!(y.map(1.8), 0.0);
    assert!(y.pixels_per_unit() < 0.0);
}

// ============================================
// Error Tests
// ============================================

#[test]
fn test_degenerate_domain_rejected() {
    assert_eq!(
        LinearScale::new((5.0, 5.0), (0.0, 100.0)),
        Err(ScaleError::DegenerateDomain(5.0))
    );
}

#[test]
fn test_non_finite_bounds_rejected() {
    assert!(matches!(
        LinearScale::new((0.0, f64::NAN), (0.0, 100.0)),
        Err(ScaleError::NonFinite(..))
    ));
    assert!(matches!(
        LinearScale::new((0.0, 1.0), (0.0, f64::INFINITY)),
        Err(ScaleError::NonFinite(..))
    ));
}

#[test]
fn test_with_domain_keeps_range() {
    let scale = LinearScale::new((1.0, 100.0), (40.0, 1160.0)).unwrap();
    let zoomed = scale.with_domain((20.0, 40.0)).unwrap();
    assert_eq!(zoomed.range(), (40.0, 1160.0));
    assert_eq!(zoomed.map(20.0), 40.0);
    assert!(scale.with_domain((3.0, 3.0)).is_err());
}

// ============================================
// Scale Set Tests
// ============================================

#[test]
fn test_scale_set_initial_ranges() {
    let scales = ScaleSet::new(&ChartLayout::default(), (1.0, 100.0), 1.8).unwrap();
    assert_eq!(scales.focus_x.map(1.0), 40.0);
    assert_eq!(scales.focus_x.map(100.0), 1160.0);
    assert_eq!(scales.context_x.range(), (0.0, 1200.0));
    assert_eq!(scales.y.map(0.0), 270.0);
    assert!(scales.is_synced(VisibleWindow::new(1.0, 100.0)));
}

#[test]
fn test_sync_moves_focus_and_annotation_only() {
    let mut scales = ScaleSet::new(&ChartLayout::default(), (1.0, 100.0), 1.8).unwrap();
    let window = VisibleWindow::new(20.0, 40.0);
    scales.sync_to(window).unwrap();

    assert_eq!(scales.focus_x.domain(), (20.0, 40.0));
    assert_eq!(scales.annotation_x.domain(), (20.0, 40.0));
    assert_eq!(scales.context_x.domain(), (1.0, 100.0));
    assert!(scales.ensure_synced(window).is_ok());
    assert_eq!(
        scales.ensure_synced(VisibleWindow::new(1.0, 100.0)),
        Err(ScaleError::OutOfSync { lo: 1.0, hi: 100.0 })
    );
}

#[test]
fn test_failed_sync_keeps_previous_scales() {
    let mut scales = ScaleSet::new(&ChartLayout::default(), (1.0, 100.0), 1.8).unwrap();
    assert!(scales.sync_to(VisibleWindow::new(10.0, 10.0)).is_err());
    assert_eq!(scales.focus_x.domain(), (1.0, 100.0));
}
