//! Export of the visible window: TSV table and PNG snapshot.

use image::{Rgb, RgbImage};
use std::path::Path;

use crate::colors::{DOMAIN_COLOR, MISSING_SCORE_COLOR};
use crate::details::NO_VALUE;
use crate::error::ExportError;
use crate::payload::LandscapePayload;
use crate::session::ChartSession;

/// Height of the domain band under the landscape in PNG exports
const DOMAIN_BAND_HEIGHT: u32 = 20;

/// Gap between the landscape and the domain band
const DOMAIN_BAND_GAP: u32 = 4;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Tab separated table of the positions in `[lo, hi]`
///
/// The clinvar column holds `ref>alt` amino acid changes and the pfam column
/// the ids of the domains covering the residue, both `;` separated. A
/// missing score is written as [`NO_VALUE`].
pub fn to_tsv(payload: &LandscapePayload, lo: u32, hi: u32) -> String {
    let mut out = String::from("pos\tscore\tclinvar\tpfam\r\n");
    for record in payload
        .positional_annotation
        .iter()
        .filter(|r| r.protein_pos >= lo && r.protein_pos <= hi)
    {
        let clinvar = record
            .clinvar
            .iter()
            .map(|v| format!("{}>{}", record.ref_aa_triplet, v.alt_aa_triplet))
            .collect::<Vec<_>>()
            .join(";");
        let pfam = payload
            .domains
            .iter()
            .filter(|d| d.contains(record.protein_pos))
            .map(|d| d.id.as_str())
            .collect::<Vec<_>>()
            .join(";");
        let score = if record.sw_dn_ds.is_nan() {
            NO_VALUE.to_string()
        } else {
            record.sw_dn_ds.to_string()
        };
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\r\n",
            record.protein_pos, score, clinvar, pfam
        ));
    }
    out
}

/// Write the TSV of the session's visible window
pub fn write_tsv(session: &ChartSession, path: &Path) -> Result<(), ExportError> {
    if !session.has_data() {
        return Err(ExportError::NothingLoaded);
    }
    let (lo, hi) = session.visible_bounds();
    std::fs::write(path, to_tsv(session.payload(), lo, hi))?;
    tracing::info!("Exported positions {}-{} to {:?}", lo, hi, path);
    Ok(())
}

fn lerp(a: [u8; 3], b: [u8; 3], t: f64) -> Rgb<u8> {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Rgb([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])])
}

fn fill_rect(img: &mut RgbImage, x0: f64, x1: f64, y0: f64, y1: f64, color: Rgb<u8>) {
    let (w, h) = (img.width() as f64, img.height() as f64);
    let xs = x0.min(x1).max(0.0).floor() as u32..x0.max(x1).min(w).ceil() as u32;
    let ys = y0.min(y1).max(0.0).floor() as u32..y0.max(y1).min(h).ceil() as u32;
    for x in xs {
        for y in ys.clone() {
            img.put_pixel(x, y, color);
        }
    }
}

/// Rasterize the focus view: the tolerance area of the visible window with
/// the domain band below it
pub fn render_image(session: &ChartSession) -> RgbImage {
    let layout = session.layout();
    let width = layout.width().max(1.0) as u32;
    let landscape_height = layout.landscape_height().max(1.0) as u32;
    let height = landscape_height + DOMAIN_BAND_GAP + DOMAIN_BAND_HEIGHT;
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    let scene = session.scene();

    if scene.landscape_opacity > 0.0 {
        for area in scene.areas.iter().filter(|a| a.visible) {
            let (left, right) = (area.x0.max(0.0), area.x1.min(width as f64));
            let span = area.x1 - area.x0;
            let mut x = left.floor();
            while x < right {
                let t = if span > 0.0 { (x + 0.5 - area.x0) / span } else { 0.0 };
                let t = t.clamp(0.0, 1.0);
                let top = area.y0 + (area.y1 - area.y0) * t;
                let color = if area.score.is_nan() && area.next_score.is_nan() {
                    Rgb(MISSING_SCORE_COLOR)
                } else {
                    lerp(area.start_color, area.end_color, t)
                };
                fill_rect(&mut img, x, x + 1.0, top, area.baseline, color);
                x += 1.0;
            }
        }
    }

    let band_top = (landscape_height + DOMAIN_BAND_GAP) as f64;
    for &idx in session.domain_order().iter() {
        let Some(domain) = scene.domains.get(idx).filter(|d| d.visible) else {
            continue;
        };
        fill_rect(
            &mut img,
            domain.x,
            domain.x + domain.width,
            band_top,
            band_top + DOMAIN_BAND_HEIGHT as f64,
            Rgb(DOMAIN_COLOR),
        );
    }

    img
}

/// Save the focus view as a PNG file
pub fn render_png(session: &ChartSession, path: &Path) -> Result<(), ExportError> {
    if !session.has_data() {
        return Err(ExportError::NothingLoaded);
    }
    let img = render_image(session);
    img.save_with_format(path, image::ImageFormat::Png)?;
    tracing::info!("Saved {}x{} snapshot to {:?}", img.width(), img.height(), path);
    Ok(())
}
