//! Tests for payload parsing and validation
//!
//! Tests cover:
//! - Field aliases and lenient number/string fields
//! - Reading payload files from disk
//! - Validation errors

use metadome::error::PayloadError;
use metadome::payload::LandscapePayload;

use crate::common::{payload_json, scratch_dir, synthetic_payload, TRANSCRIPT_ID};

// ============================================
// Parsing Tests
// ============================================

#[test]
fn test_parse_dashboard_json() {
    let payload = LandscapePayload::from_json(&payload_json(5)).unwrap();
    assert_eq!(payload.transcript_id, TRANSCRIPT_ID);
    assert_eq!(payload.positions(), vec![1, 2, 3, 4, 5]);
    assert_eq!(payload.domains[0].id, "PF00907");
    assert_eq!(payload.domains[0].name, "T-box");
    assert!(!payload.domains[0].metadomain);
}

#[test]
fn test_score_alias_and_missing_score() {
    let json = r#"{"positional_annotation": [
        {"protein_pos": 1, "sw_score": 0.25},
        {"protein_pos": 2}
    ]}"#;
    let payload = LandscapePayload::from_json(json).unwrap();
    assert_eq!(payload.positional_annotation[0].sw_dn_ds, 0.25);
    assert!(!payload.positional_annotation[1].has_score());
}

#[test]
fn test_numeric_genomic_fields_become_strings() {
    let json = r#"{"positional_annotation": [
        {"protein_pos": 1, "sw_dn_ds": 0.3, "cdna_pos": 4, "chr_positions": 1665123}
    ]}"#;
    let payload = LandscapePayload::from_json(json).unwrap();
    let record = &payload.positional_annotation[0];
    assert_eq!(record.cdna_pos.as_deref(), Some("4"));
    assert_eq!(record.chr_positions.as_deref(), Some("1665123"));
}

#[test]
fn test_gene_name_alias() {
    let payload = LandscapePayload::from_json(r#"{"geneName": "TBXT"}"#).unwrap();
    assert_eq!(payload.gene_name, "TBXT");
    assert!(payload.is_empty());
    assert_eq!(payload.extent(), None);
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = LandscapePayload::from_json("{not json").unwrap_err();
    assert!(matches!(err, PayloadError::Parse(_)));
}

// ============================================
// Validation Tests
// ============================================

#[test]
fn test_unordered_positions_reported() {
    let mut payload = synthetic_payload(10);
    payload.positional_annotation.swap(3, 4);
    let err = payload.validate().unwrap_err();
    assert!(matches!(
        err,
        PayloadError::UnorderedPositions { previous: 5, current: 4 }
    ));
}

#[test]
fn test_synthetic_payload_is_valid() {
    assert!(synthetic_payload(100).validate().is_ok());
    assert!(synthetic_payload(1).validate().is_ok());
}

// ============================================
// File Tests
// ============================================

#[test]
fn test_from_path() {
    let dir = scratch_dir("payload_from_path");
    let path = dir.join("landscape.json");
    std::fs::write(&path, payload_json(12)).unwrap();

    let payload = LandscapePayload::from_path(&path).unwrap();
    assert_eq!(payload.positional_annotation.len(), 12);
    assert_eq!(payload.record(12).unwrap().ref_aa_triplet, "Gly");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = scratch_dir("payload_missing");
    let err = LandscapePayload::from_path(&dir.join("absent.json")).unwrap_err();
    assert!(matches!(err, PayloadError::Io(_)));
    let _ = std::fs::remove_dir_all(&dir);
}
