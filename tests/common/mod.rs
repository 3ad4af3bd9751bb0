//! Common test utilities shared across all test modules
//!
//! Synthetic payload builders so every test starts from a known landscape
//! without needing the dashboard API.

#![allow(dead_code)]

use metadome::payload::{ClinVarVariant, DomainInterval, LandscapePayload, PositionRecord};
use metadome::session::ChartSession;

/// Transcript id used by every synthetic payload
pub const TRANSCRIPT_ID: &str = "ENST00000296946.2";

/// Score of a residue in the synthetic ramp: low at the ends, high mid-protein
pub fn ramp_score(position: u32, length: u32) -> f64 {
    let t = position as f64 / length.max(1) as f64;
    1.8 * (1.0 - (2.0 * t - 1.0).abs())
}

/// Payload with residues `1..=length`, two overlapping domains and a ClinVar
/// variant every tenth residue
pub fn synthetic_payload(length: u32) -> LandscapePayload {
    let positional_annotation = (1..=length)
        .map(|p| {
            let mut record = PositionRecord::new(p, ramp_score(p, length));
            record.ref_aa_triplet = "Arg".to_string();
            if p % 10 == 0 {
                record.clinvar.push(ClinVarVariant {
                    alt_aa_triplet: "Trp".to_string(),
                    clinvar_id: Some(format!("{}", 1000 + p)),
                    ..Default::default()
                });
            }
            record
        })
        .collect();

    LandscapePayload {
        transcript_id: TRANSCRIPT_ID.to_string(),
        protein_ac: "O15178".to_string(),
        gene_name: "TBXT".to_string(),
        positional_annotation,
        domains: vec![
            DomainInterval::new("PF00907", "T-box", 20.min(length), 40.min(length)),
            DomainInterval::new("PF00001", "7tm_1", 35.min(length), 60.min(length)),
        ],
    }
}

/// Payload with residues at the given positions and a flat score
pub fn payload_at(positions: &[u32]) -> LandscapePayload {
    LandscapePayload {
        transcript_id: TRANSCRIPT_ID.to_string(),
        positional_annotation: positions
            .iter()
            .map(|&p| PositionRecord::new(p, 0.5))
            .collect(),
        ..Default::default()
    }
}

/// A session showing `synthetic_payload(length)` with the default layout
pub fn session_with(length: u32) -> ChartSession {
    let mut session = ChartSession::default();
    session
        .create_graph(synthetic_payload(length))
        .unwrap_or_else(|e| panic!("Failed to create graph: {}", e));
    session
}

/// Minimal dashboard JSON for `length` residues
pub fn payload_json(length: u32) -> String {
    let positions: Vec<String> = (1..=length)
        .map(|p| format!(r#"{{"protein_pos": {}, "sw_dn_ds": 0.5, "ref_aa_triplet": "Gly"}}"#, p))
        .collect();
    format!(
        r#"{{"transcript_id": "{}", "protein_ac": "O15178", "gene_name": "TBXT",
            "positional_annotation": [{}],
            "domains": [{{"ID": "PF00907", "Name": "T-box", "start": 2, "stop": 4}}]}}"#,
        TRANSCRIPT_ID,
        positions.join(",")
    )
}

/// Unique scratch directory under the system temp dir
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("metadome_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("Failed to create scratch dir {:?}: {}", dir, e));
    dir
}
