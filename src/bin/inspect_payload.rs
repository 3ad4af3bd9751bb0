//! Print a summary of a landscape payload, optionally as TSV.
//!
//! Usage:
//!   inspect_payload <payload.json | ENST...> [--api <base-url>] [--tsv <lo> <hi>]
//!
//! A transcript id is fetched from the dashboard API (the configured base
//! URL unless `--api` is given); anything else is read as a payload file.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use metadome::export::to_tsv;
use metadome::fetch::{validate_transcript, FetchManager, FetchOutcome, HttpSource};
use metadome::payload::LandscapePayload;
use metadome::session::ChartSession;
use metadome::settings::Settings;

const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

struct Args {
    input: String,
    api: Option<String>,
    tsv: Option<(u32, u32)>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut api = None;
    let mut tsv = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api" => api = Some(args.next().context("--api needs a base URL")?),
            "--tsv" => {
                let lo = args.next().context("--tsv needs <lo> <hi>")?;
                let hi = args.next().context("--tsv needs <lo> <hi>")?;
                tsv = Some((
                    lo.parse().with_context(|| format!("invalid start position {:?}", lo))?,
                    hi.parse().with_context(|| format!("invalid end position {:?}", hi))?,
                ));
            }
            _ if input.is_none() => input = Some(arg),
            other => bail!("unexpected argument {:?}", other),
        }
    }

    Ok(Args {
        input: input.context(
            "usage: inspect_payload <payload.json | ENST...> [--api <base-url>] [--tsv <lo> <hi>]",
        )?,
        api,
        tsv,
    })
}

fn load(args: &Args) -> Result<LandscapePayload> {
    if let Ok(transcript_id) = validate_transcript(&args.input) {
        let base_url = args
            .api
            .clone()
            .unwrap_or_else(|| Settings::load().api_base_url);
        let mut manager = FetchManager::new(Arc::new(HttpSource::new(&base_url)));
        manager.request_landscape(transcript_id)?;
        for outcome in manager.wait(FETCH_TIMEOUT) {
            match outcome {
                FetchOutcome::Landscape(payload) => return Ok(*payload),
                FetchOutcome::Failed { error, .. } => {
                    return Err(error).with_context(|| format!("fetching {}", transcript_id))
                }
                FetchOutcome::Transcripts(_) => {}
            }
        }
        bail!("no response for {} from {}", transcript_id, base_url);
    }

    let path = PathBuf::from(&args.input);
    LandscapePayload::from_path(&path).with_context(|| format!("reading {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = parse_args()?;
    let payload = load(&args)?;

    if let Some((lo, hi)) = args.tsv {
        print!("{}", to_tsv(&payload, lo, hi));
        return Ok(());
    }

    let scored: Vec<f64> = payload
        .positional_annotation
        .iter()
        .filter(|r| r.has_score())
        .map(|r| r.sw_dn_ds)
        .collect();
    let clinvar: usize = payload
        .positional_annotation
        .iter()
        .map(|r| r.clinvar.len())
        .sum();

    println!("{}", payload.title());
    match payload.extent() {
        Some((first, last)) => println!(
            "Positions: {} ({}-{}), {} scored",
            payload.positional_annotation.len(),
            first,
            last,
            scored.len()
        ),
        None => println!("Positions: none"),
    }
    if !scored.is_empty() {
        let min = scored.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scored.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = scored.iter().sum::<f64>() / scored.len() as f64;
        println!("Tolerance: min {:.3}, mean {:.3}, max {:.3}", min, mean, max);
    }
    println!("ClinVar variants: {}", clinvar);
    println!("Domains: {}", payload.domains.len());
    for domain in &payload.domains {
        println!(
            "  {} {} [{}-{}]{}",
            domain.id,
            domain.name,
            domain.start,
            domain.stop,
            if domain.metadomain { " meta-domain" } else { "" }
        );
    }

    // Dry run of the chart engine so broken payloads show up here too
    let mut session = ChartSession::from_settings(&Settings::load())?;
    session.create_graph(payload)?;
    let (lo, hi) = session.visible_bounds();
    println!("Initial window: {}-{}", lo, hi);

    Ok(())
}
