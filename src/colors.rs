//! Tolerance colour ramp and legend.

/// Upper bound of the landscape y domain
pub const MAX_TOLERANCE: f64 = 1.8;

/// Colour used for residues without a score
pub const MISSING_SCORE_COLOR: [u8; 3] = [153, 153, 153];

/// Gradient stops from intolerant (red) to tolerant (blue), with their
/// offset along the legend in percent
pub const TOLERANCE_GRADIENT: &[(f32, [u8; 3])] = &[
    (0.0, [0xd7, 0x19, 0x1c]),
    (12.5, [0xe7, 0x68, 0x18]),
    (25.0, [0xf2, 0x9e, 0x2e]),
    (37.5, [0xf9, 0xd0, 0x57]),
    (50.0, [0xff, 0xff, 0x8c]),
    (62.5, [0x90, 0xeb, 0x9d]),
    (75.0, [0x00, 0xcc, 0xbc]),
    (87.5, [0x00, 0xa6, 0xca]),
    (100.0, [0x2c, 0x7b, 0xb6]),
];

/// Inclusive upper score bound of each gradient stop but the last
const SCORE_THRESHOLDS: [f64; 8] = [0.175, 0.35, 0.525, 0.7, 0.875, 1.025, 1.2, 1.375];

/// Legend labels with their position along the legend (0 = bottom)
pub const LEGEND_LABELS: &[(&str, f32)] = &[("Intolerant", 0.1), ("Neutral", 0.5), ("Tolerant", 0.9)];

/// Colour of a tolerance score
///
/// `#f29e2e` marks the average dN/dS tolerance over all genes.
pub fn tolerance_color(score: f64) -> [u8; 3] {
    if score.is_nan() {
        return MISSING_SCORE_COLOR;
    }
    let idx = SCORE_THRESHOLDS
        .iter()
        .position(|&t| score <= t)
        .unwrap_or(SCORE_THRESHOLDS.len());
    TOLERANCE_GRADIENT[idx].1
}

/// Clamp a score into the drawable y domain; NaN stays NaN
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        score
    } else {
        score.clamp(0.0, MAX_TOLERANCE)
    }
}

/// Domain rectangle fill
pub const DOMAIN_COLOR: [u8; 3] = [0xc0, 0x14, 0xe2];

/// Domain rectangle fill while hovered
pub const DOMAIN_HOVER_COLOR: [u8; 3] = [255, 255, 0];

/// ClinVar tick colour
pub const CLINVAR_COLOR: [u8; 3] = [0, 128, 0];
