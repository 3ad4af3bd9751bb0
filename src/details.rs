//! Read-only views over the payload for the selection table and the domain
//! details window.

use crate::payload::{LandscapePayload, MetaDomainEntry, PositionRecord};
use crate::selection::SelectionStore;

pub const PFAM_FAMILY_URL: &str = "http://pfam.xfam.org/family/";
pub const CLINVAR_VARIATION_URL: &str = "https://www.ncbi.nlm.nih.gov/clinvar/variation/";
pub const ENSEMBL_TRANSCRIPT_URL: &str =
    "http://grch37.ensembl.org/Homo_sapiens/Transcript/Summary?t=";
pub const UNIPROT_URL: &str = "https://www.uniprot.org/uniprot/";

/// Placeholder for cells without a value
pub const NO_VALUE: &str = "-";

pub fn pfam_url(domain_id: &str) -> String {
    format!("{}{}", PFAM_FAMILY_URL, domain_id)
}

pub fn clinvar_url(clinvar_id: &str) -> String {
    format!("{}{}/", CLINVAR_VARIATION_URL, clinvar_id)
}

pub fn ensembl_url(transcript_id: &str) -> String {
    format!("{}{}", ENSEMBL_TRANSCRIPT_URL, transcript_id)
}

pub fn uniprot_url(protein_ac: &str) -> String {
    format!("{}{}", UNIPROT_URL, protein_ac)
}

// ============================================================================
// Selected positions
// ============================================================================

/// One row of the selected-positions table
#[derive(Clone, Debug, PartialEq)]
pub struct PositionSummary {
    pub position: u32,
    pub residue: String,
    /// Domain ids joined with ", " or [`NO_VALUE`]
    pub domains: String,
    /// ClinVar variants at this residue
    pub clinvar_count: usize,
    /// gnomAD variants at homologous residues, or [`NO_VALUE`]
    pub related_gnomad: String,
    /// ClinVar variants at homologous residues, or [`NO_VALUE`]
    pub related_clinvar: String,
}

impl PositionSummary {
    pub fn for_record(record: &PositionRecord) -> Self {
        let domains = if record.domains.is_empty() {
            NO_VALUE.to_string()
        } else {
            record.domains.keys().cloned().collect::<Vec<_>>().join(", ")
        };

        let (related_gnomad, related_clinvar) = if record.domains.is_empty() {
            (NO_VALUE.to_string(), NO_VALUE.to_string())
        } else {
            let entries = record.domains.values().flatten();
            let (normal, pathogenic) = entries.fold((0u32, 0u32), |(n, p), entry| {
                (n + entry.normal_variant_count, p + entry.pathogenic_variant_count)
            });
            (normal.to_string(), pathogenic.to_string())
        };

        Self {
            position: record.protein_pos,
            residue: record.ref_aa_triplet.clone(),
            domains,
            clinvar_count: record.clinvar.len(),
            related_gnomad,
            related_clinvar,
        }
    }
}

/// Summary rows for every selected position, ascending
pub fn summaries(payload: &LandscapePayload, selection: &SelectionStore) -> Vec<PositionSummary> {
    selection
        .iter()
        .filter_map(|pos| payload.record(pos))
        .map(PositionSummary::for_record)
        .collect()
}

// ============================================================================
// Domain details
// ============================================================================

/// Missense counts of one residue inside a domain
#[derive(Clone, Debug, PartialEq)]
pub struct DomainBar {
    pub position: u32,
    pub normal_missense: u32,
    pub pathogenic_missense: u32,
}

/// Bar chart data for a clicked domain
#[derive(Clone, Debug, PartialEq)]
pub struct DomainDetails {
    pub id: String,
    pub name: String,
    pub start: u32,
    pub stop: u32,
    pub metadomain: bool,
    pub alignment_depth: Option<u32>,
    pub bars: Vec<DomainBar>,
    pub max_normal: u32,
    pub max_pathogenic: u32,
}

impl DomainDetails {
    /// `None` when `domain_id` is not part of the payload
    pub fn for_domain(payload: &LandscapePayload, domain_id: &str) -> Option<Self> {
        let domain = payload.domain(domain_id)?;
        let bars: Vec<DomainBar> = payload
            .positional_annotation
            .iter()
            .filter(|record| domain.contains(record.protein_pos))
            .filter_map(|record| {
                let entry = record.domains.get(domain_id)?.as_ref()?;
                Some(DomainBar {
                    position: record.protein_pos,
                    normal_missense: entry.normal_missense_variant_count,
                    pathogenic_missense: entry.pathogenic_missense_variant_count,
                })
            })
            .collect();

        let max_normal = bars.iter().map(|b| b.normal_missense).max().unwrap_or(0);
        let max_pathogenic = bars.iter().map(|b| b.pathogenic_missense).max().unwrap_or(0);

        Some(Self {
            id: domain.id.clone(),
            name: domain.name.clone(),
            start: domain.start,
            stop: domain.stop,
            metadomain: domain.metadomain,
            alignment_depth: domain.meta_domain_alignment_depth,
            bars,
            max_normal,
            max_pathogenic,
        })
    }
}

// ============================================================================
// Meta-domain variants
// ============================================================================

/// Where a homologous variant was observed
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum VariantSource {
    #[strum(serialize = "gnomAD")]
    Gnomad,
    #[strum(serialize = "ClinVar")]
    ClinVar,
}

/// A variant at a residue homologous to the selected one
#[derive(Clone, Debug, PartialEq)]
pub struct MetaDomainVariantRow {
    pub source: VariantSource,
    pub chr: String,
    pub chr_position: String,
    pub ref_codon: String,
    pub alt_codon: String,
    /// e.g. `Arg>Trp`
    pub change: String,
    /// gnomAD allele frequency, six decimals
    pub allele_frequency: String,
    pub clinvar_id: Option<String>,
}

/// Flatten the homologous variants of one residue in one domain
pub fn meta_domain_variants(entry: &MetaDomainEntry) -> Vec<MetaDomainVariantRow> {
    let mut rows = Vec::new();
    for codon in &entry.other_codons {
        let chr_position = codon.chr_positions.clone().unwrap_or_default();
        for variant in &codon.normal_variants {
            rows.push(MetaDomainVariantRow {
                source: VariantSource::Gnomad,
                chr: codon.chr.clone(),
                chr_position: chr_position.clone(),
                ref_codon: codon.ref_codon.clone(),
                alt_codon: variant.alt_codon.clone(),
                change: format!("{}>{}", codon.ref_aa_triplet, variant.alt_aa_triplet),
                allele_frequency: variant
                    .allele_frequency()
                    .map(|af| format!("{:.6}", af))
                    .unwrap_or_else(|| NO_VALUE.to_string()),
                clinvar_id: None,
            });
        }
        for variant in &codon.pathogenic_variants {
            rows.push(MetaDomainVariantRow {
                source: VariantSource::ClinVar,
                chr: codon.chr.clone(),
                chr_position: chr_position.clone(),
                ref_codon: codon.ref_codon.clone(),
                alt_codon: variant.alt_codon.clone(),
                change: format!("{}>{}", codon.ref_aa_triplet, variant.alt_aa_triplet),
                allele_frequency: NO_VALUE.to_string(),
                clinvar_id: variant.clinvar_id.clone(),
            });
        }
    }
    rows
}
