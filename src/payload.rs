//! Landscape payload model.
//!
//! The dashboard API (or a prebuilt JSON file) delivers one object per
//! transcript: the per-residue tolerance scores, the Pfam domains of the
//! protein and the ClinVar variants per residue. Everything here is loaded
//! once and never mutated afterwards.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::PayloadError;

// ============================================================================
// Variants
// ============================================================================

/// A ClinVar variant at (or homologous to) a residue
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ClinVarVariant {
    #[serde(default)]
    pub alt_codon: String,
    #[serde(default)]
    pub alt_aa: String,
    #[serde(default)]
    pub alt_aa_triplet: String,
    /// missense, synonymous, nonsense, ...
    #[serde(default, rename = "type")]
    pub variant_type: String,
    #[serde(default)]
    pub pos: Option<u64>,
    #[serde(default, rename = "ref")]
    pub ref_nucleotide: String,
    #[serde(default, rename = "alt")]
    pub alt_nucleotide: String,
    #[serde(default, rename = "clinvar_ID", deserialize_with = "string_or_number")]
    pub clinvar_id: Option<String>,
}

/// A gnomAD variant at a homologous residue
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GnomadVariant {
    #[serde(default)]
    pub alt_codon: String,
    #[serde(default)]
    pub alt_aa: String,
    #[serde(default)]
    pub alt_aa_triplet: String,
    #[serde(default, rename = "type")]
    pub variant_type: String,
    #[serde(default)]
    pub pos: Option<u64>,
    #[serde(default, rename = "ref")]
    pub ref_nucleotide: String,
    #[serde(default, rename = "alt")]
    pub alt_nucleotide: String,
    #[serde(default)]
    pub allele_number: u64,
    #[serde(default)]
    pub allele_count: u64,
}

impl GnomadVariant {
    /// Allele frequency, `None` when the allele number is zero
    pub fn allele_frequency(&self) -> Option<f64> {
        if self.allele_number == 0 {
            None
        } else {
            Some(self.allele_count as f64 / self.allele_number as f64)
        }
    }
}

// ============================================================================
// Meta-domain annotation
// ============================================================================

/// A codon elsewhere in the genome aligned to the same consensus position
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HomologousCodon {
    #[serde(default)]
    pub chr: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub chr_positions: Option<String>,
    #[serde(default)]
    pub strand: String,
    #[serde(default)]
    pub ref_aa: String,
    #[serde(default)]
    pub ref_aa_triplet: String,
    #[serde(default)]
    pub ref_codon: String,
    #[serde(default)]
    pub normal_variants: Vec<GnomadVariant>,
    #[serde(default)]
    pub pathogenic_variants: Vec<ClinVarVariant>,
}

/// Meta-domain information of one residue for one domain
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MetaDomainEntry {
    #[serde(default, deserialize_with = "one_or_many")]
    pub consensus_pos: Vec<u32>,
    #[serde(default)]
    pub normal_missense_variant_count: u32,
    #[serde(default)]
    pub normal_variant_count: u32,
    #[serde(default)]
    pub pathogenic_missense_variant_count: u32,
    #[serde(default)]
    pub pathogenic_variant_count: u32,
    #[serde(default)]
    pub other_codons: Vec<HomologousCodon>,
}

// ============================================================================
// Positions and domains
// ============================================================================

/// One protein residue
#[derive(Clone, Debug, Deserialize)]
pub struct PositionRecord {
    /// 1-based protein position
    pub protein_pos: u32,
    /// Sliding-window tolerance score; NaN when absent
    #[serde(
        default = "missing_score",
        alias = "sw_score",
        deserialize_with = "nullable_score"
    )]
    pub sw_dn_ds: f64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cdna_pos: Option<String>,
    #[serde(default)]
    pub ref_codon: String,
    #[serde(default)]
    pub ref_aa: String,
    #[serde(default)]
    pub ref_aa_triplet: String,
    #[serde(default)]
    pub chr: String,
    #[serde(default)]
    pub strand: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub chr_positions: Option<String>,
    /// Domains covering this residue, with meta-domain data when available
    #[serde(default)]
    pub domains: BTreeMap<String, Option<MetaDomainEntry>>,
    #[serde(default, rename = "ClinVar")]
    pub clinvar: Vec<ClinVarVariant>,
}

impl PositionRecord {
    /// A bare record with only a position and a score
    pub fn new(protein_pos: u32, sw_dn_ds: f64) -> Self {
        Self {
            protein_pos,
            sw_dn_ds,
            cdna_pos: None,
            ref_codon: String::new(),
            ref_aa: String::new(),
            ref_aa_triplet: String::new(),
            chr: String::new(),
            strand: String::new(),
            chr_positions: None,
            domains: BTreeMap::new(),
            clinvar: Vec::new(),
        }
    }

    pub fn has_score(&self) -> bool {
        self.sw_dn_ds.is_finite()
    }
}

/// A Pfam domain over a closed range of positions
#[derive(Clone, Debug, Deserialize)]
pub struct DomainInterval {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    pub start: u32,
    pub stop: u32,
    /// Whether a meta-domain could be built for this domain
    #[serde(default)]
    pub metadomain: bool,
    #[serde(default)]
    pub meta_domain_alignment_depth: Option<u32>,
}

impl DomainInterval {
    pub fn new(id: &str, name: &str, start: u32, stop: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            start,
            stop,
            metadomain: false,
            meta_domain_alignment_depth: None,
        }
    }

    pub fn contains(&self, position: u32) -> bool {
        position >= self.start && position <= self.stop
    }

    /// Whether the domain overlaps the closed range `[lo, hi]`
    pub fn overlaps(&self, lo: f64, hi: f64) -> bool {
        (self.start as f64) <= hi && (self.stop as f64) >= lo
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Everything needed to draw one transcript's landscape
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LandscapePayload {
    #[serde(default)]
    pub transcript_id: String,
    #[serde(default)]
    pub protein_ac: String,
    #[serde(default, alias = "geneName")]
    pub gene_name: String,
    #[serde(default)]
    pub positional_annotation: Vec<PositionRecord>,
    #[serde(default)]
    pub domains: Vec<DomainInterval>,
}

impl LandscapePayload {
    /// Parse and validate a payload from JSON text
    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return Err(PayloadError::Server(message.to_string()));
        }
        let payload: LandscapePayload = serde_json::from_value(value)?;
        payload.validate()?;
        Ok(payload)
    }

    /// Read, parse and validate a payload file
    pub fn from_path(path: &Path) -> Result<Self, PayloadError> {
        let text = std::fs::read_to_string(path)?;
        let payload = Self::from_json(&text)?;
        tracing::info!(
            "Loaded payload for {} ({} positions, {} domains) from {:?}",
            payload.transcript_id,
            payload.positional_annotation.len(),
            payload.domains.len(),
            path
        );
        Ok(payload)
    }

    /// Check ordering and interval invariants
    pub fn validate(&self) -> Result<(), PayloadError> {
        for pair in self.positional_annotation.windows(2) {
            if pair[1].protein_pos <= pair[0].protein_pos {
                return Err(PayloadError::UnorderedPositions {
                    previous: pair[0].protein_pos,
                    current: pair[1].protein_pos,
                });
            }
        }
        if let Some(domain) = self.domains.iter().find(|d| d.start > d.stop) {
            return Err(PayloadError::InvertedDomain {
                id: domain.id.clone(),
                start: domain.start,
                stop: domain.stop,
            });
        }
        Ok(())
    }

    /// First and last protein position, `None` when there are no positions
    pub fn extent(&self) -> Option<(u32, u32)> {
        let first = self.positional_annotation.first()?;
        let last = self.positional_annotation.last()?;
        Some((first.protein_pos, last.protein_pos))
    }

    pub fn positions(&self) -> Vec<u32> {
        self.positional_annotation
            .iter()
            .map(|p| p.protein_pos)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.positional_annotation.is_empty()
    }

    /// Record at a protein position
    pub fn record(&self, position: u32) -> Option<&PositionRecord> {
        self.positional_annotation
            .binary_search_by_key(&position, |p| p.protein_pos)
            .ok()
            .map(|idx| &self.positional_annotation[idx])
    }

    pub fn domain(&self, id: &str) -> Option<&DomainInterval> {
        self.domains.iter().find(|d| d.id == id)
    }

    /// Human readable title line
    pub fn title(&self) -> String {
        format!(
            "Gene: {} (transcript: {}, protein: {})",
            self.gene_name, self.transcript_id, self.protein_ac
        )
    }
}

// ============================================================================
// Deserialization helpers
// ============================================================================

fn missing_score() -> f64 {
    f64::NAN
}

fn nullable_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.unwrap_or(f64::NAN))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(u32),
        Many(Vec<u32>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(v)) => vec![v],
        Some(OneOrMany::Many(v)) => v,
    })
}
