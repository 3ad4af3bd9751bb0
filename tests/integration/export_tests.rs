//! Export tests
//!
//! Tests write TSV tables and PNG snapshots of a brushed session to a
//! scratch directory and check what lands on disk.

use metadome::error::ExportError;
use metadome::export::{render_image, render_png, write_tsv};
use metadome::interaction::BrushEvent;
use metadome::session::ChartSession;

use crate::common::{scratch_dir, session_with};

fn brushed_session() -> ChartSession {
    let mut session = session_with(100);
    let ctx = session.scales().context_x;
    session
        .brush(BrushEvent::user(ctx.map(20.0), ctx.map(40.0)))
        .unwrap();
    session.end_gesture();
    session
}

// ============================================
// TSV Tests
// ============================================

#[test]
fn test_tsv_covers_visible_window() {
    let session = brushed_session();
    let dir = scratch_dir("export_tsv");
    let path = dir.join("window.tsv");
    write_tsv(&session, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.ends_with("\r\n"));
    let lines: Vec<&str> = content.trim_end_matches("\r\n").split("\r\n").collect();
    assert_eq!(lines[0], "pos\tscore\tclinvar\tpfam");

    let (lo, hi) = session.visible_bounds();
    assert_eq!(lines.len() - 1, (hi - lo + 1) as usize);
    assert!(lines[1].starts_with(&format!("{}\t", lo)));
    assert!(lines.last().unwrap().starts_with(&format!("{}\t", hi)));

    // Residue 30 has a ClinVar variant and lies inside the T-box domain
    let row = lines.iter().find(|l| l.starts_with("30\t")).unwrap();
    let columns: Vec<&str> = row.split('\t').collect();
    assert_eq!(columns[2], "Arg>Trp");
    assert_eq!(columns[3], "PF00907");

    // Residue 37 lies inside both domains
    let row = lines.iter().find(|l| l.starts_with("37\t")).unwrap();
    assert!(row.ends_with("\tPF00907;PF00001"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_tsv_requires_a_landscape() {
    let dir = scratch_dir("export_tsv_empty");
    let result = write_tsv(&ChartSession::default(), &dir.join("empty.tsv"));
    assert!(matches!(result, Err(ExportError::NothingLoaded)));
    assert!(!dir.join("empty.tsv").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

// ============================================
// PNG Tests
// ============================================

#[test]
fn test_png_written_to_disk() {
    let session = brushed_session();
    let dir = scratch_dir("export_png");
    let path = dir.join("window.png");
    render_png(&session, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_image_size_follows_layout() {
    let session = session_with(100);
    let image = render_image(&session);
    let layout = session.layout();
    assert_eq!(image.width(), layout.width() as u32);
    assert_eq!(image.height(), layout.landscape_height() as u32 + 4 + 20);
}

#[test]
fn test_png_requires_a_landscape() {
    let dir = scratch_dir("export_png_empty");
    let result = render_png(&ChartSession::default(), &dir.join("empty.png"));
    assert!(matches!(result, Err(ExportError::NothingLoaded)));
    let _ = std::fs::remove_dir_all(&dir);
}
