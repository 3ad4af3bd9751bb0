//! Data-fetch layer.
//!
//! Requests run on a background thread and report back over an `mpsc`
//! channel that the UI drains once per frame with [`FetchManager::poll`].
//! Each endpoint has a single in-flight slot: a new request replaces the
//! pending one, and the replaced response is dropped when it arrives.

use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, LazyLock};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::FetchError;
use crate::payload::LandscapePayload;

/// User agent for API requests
const USER_AGENT: &str = concat!("metadome/", env!("CARGO_PKG_VERSION"));

/// Largest response body accepted from the API
const MAX_RESPONSE_BYTES: u64 = 512 * 1024 * 1024;

/// File name of a prebuilt visualization inside its transcript directory
pub const PREBUILT_FILE_NAME: &str = "visualization.json";

/// Ensembl transcript id with an optional version suffix
static TRANSCRIPT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ENST\d+(\.\d+)?$").expect("Invalid regex pattern"));

/// HGNC-style gene symbol
static GENE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("Invalid regex pattern"));

pub fn validate_transcript(transcript_id: &str) -> Result<&str, FetchError> {
    let trimmed = transcript_id.trim();
    if TRANSCRIPT_REGEX.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(FetchError::InvalidTranscript(transcript_id.to_string()))
    }
}

pub fn validate_gene(gene: &str) -> Result<&str, FetchError> {
    let trimmed = gene.trim();
    if GENE_REGEX.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(FetchError::InvalidGene(gene.to_string()))
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Transcripts known for a gene
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TranscriptList {
    /// Transcripts with protein data
    #[serde(default, rename = "trancript_ids", alias = "transcript_ids")]
    pub transcript_ids: Vec<String>,
    /// Transcripts without protein data, listed but not loadable
    #[serde(default)]
    pub no_protein_data: Vec<String>,
    #[serde(default)]
    pub message: String,
}

/// The API endpoints a request can target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Endpoint {
    Transcripts,
    Landscape,
}

/// A completed request, as handed to the UI
#[derive(Debug)]
pub enum FetchOutcome {
    Transcripts(TranscriptList),
    Landscape(Box<LandscapePayload>),
    Failed { endpoint: Endpoint, error: FetchError },
}

// ============================================================================
// Sources
// ============================================================================

/// Where transcripts and landscapes come from
pub trait DataSource: Send + Sync {
    fn fetch_transcripts(&self, gene: &str) -> Result<TranscriptList, FetchError>;
    fn fetch_landscape(&self, transcript_id: &str) -> Result<LandscapePayload, FetchError>;
}

/// The dashboard HTTP API
#[derive(Clone, Debug)]
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn transcripts_url(&self, gene: &str) -> String {
        format!("{}/api/gene/geneToTranscript/{}", self.base_url, gene)
    }

    pub fn landscape_url(&self, transcript_id: &str) -> String {
        format!(
            "{}/api/gene/getToleranceLandscape/{}/",
            self.base_url, transcript_id
        )
    }

    fn get(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!("GET {}", url);
        let mut response = ureq::get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) => FetchError::Http(format!("HTTP {}", status)),
                _ => FetchError::Http(e.to_string()),
            })?;

        response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_string()
            .map_err(|e| FetchError::Http(e.to_string()))
    }
}

impl DataSource for HttpSource {
    fn fetch_transcripts(&self, gene: &str) -> Result<TranscriptList, FetchError> {
        let gene = validate_gene(gene)?;
        let body = self.get(&self.transcripts_url(gene))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Payload(e.into()))
    }

    fn fetch_landscape(&self, transcript_id: &str) -> Result<LandscapePayload, FetchError> {
        let transcript_id = validate_transcript(transcript_id)?;
        let body = self.get(&self.landscape_url(transcript_id))?;
        Ok(LandscapePayload::from_json(&body)?)
    }
}

/// Prebuilt visualizations on disk
///
/// `root` is either a single payload file, served for every transcript, or
/// a directory with one `<transcript>/visualization.json` per transcript.
#[derive(Clone, Debug)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn payload_path(&self, transcript_id: &str) -> PathBuf {
        if self.root.is_file() {
            self.root.clone()
        } else {
            self.root.join(transcript_id).join(PREBUILT_FILE_NAME)
        }
    }
}

impl DataSource for FileSource {
    /// Every prebuilt transcript directory; the gene is not recorded on disk
    fn fetch_transcripts(&self, gene: &str) -> Result<TranscriptList, FetchError> {
        validate_gene(gene)?;
        let entries = std::fs::read_dir(&self.root)
            .map_err(|e| FetchError::Payload(e.into()))?;

        let mut transcript_ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join(PREBUILT_FILE_NAME).is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| TRANSCRIPT_REGEX.is_match(name))
            .collect();
        transcript_ids.sort();

        Ok(TranscriptList {
            message: format!("Prebuilt transcripts in {}", self.root.display()),
            transcript_ids,
            no_protein_data: Vec::new(),
        })
    }

    fn fetch_landscape(&self, transcript_id: &str) -> Result<LandscapePayload, FetchError> {
        let transcript_id = validate_transcript(transcript_id)?;
        Ok(LandscapePayload::from_path(&self.payload_path(transcript_id))?)
    }
}

// ============================================================================
// Fetch manager
// ============================================================================

struct FetchMessage {
    endpoint: Endpoint,
    generation: u64,
    result: Result<FetchOutcome, FetchError>,
}

/// Runs requests in the background, newest request per endpoint wins
pub struct FetchManager {
    source: Arc<dyn DataSource>,
    sender: Sender<FetchMessage>,
    receiver: Receiver<FetchMessage>,
    in_flight: HashMap<Endpoint, u64>,
    next_generation: u64,
}

impl FetchManager {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (sender, receiver) = channel();
        Self {
            source,
            sender,
            receiver,
            in_flight: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Swap the data source; responses from the old source are discarded
    pub fn set_source(&mut self, source: Arc<dyn DataSource>) {
        self.source = source;
        self.in_flight.clear();
    }

    /// Whether a request for `endpoint` is pending
    pub fn is_loading(&self, endpoint: Endpoint) -> bool {
        self.in_flight.contains_key(&endpoint)
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Request the transcripts of a gene; returns the request generation
    pub fn request_transcripts(&mut self, gene: &str) -> Result<u64, FetchError> {
        let gene = validate_gene(gene)?.to_string();
        Ok(self.spawn(Endpoint::Transcripts, move |source| {
            source.fetch_transcripts(&gene).map(FetchOutcome::Transcripts)
        }))
    }

    /// Request the landscape of a transcript; returns the request generation
    pub fn request_landscape(&mut self, transcript_id: &str) -> Result<u64, FetchError> {
        let transcript_id = validate_transcript(transcript_id)?.to_string();
        Ok(self.spawn(Endpoint::Landscape, move |source| {
            source
                .fetch_landscape(&transcript_id)
                .map(|payload| FetchOutcome::Landscape(Box::new(payload)))
        }))
    }

    /// Read a payload file; shares the landscape slot with API requests
    pub fn request_file(&mut self, path: PathBuf) -> u64 {
        self.spawn(Endpoint::Landscape, move |_| {
            let payload = LandscapePayload::from_path(&path)?;
            Ok(FetchOutcome::Landscape(Box::new(payload)))
        })
    }

    fn spawn<F>(&mut self, endpoint: Endpoint, request: F) -> u64
    where
        F: FnOnce(&dyn DataSource) -> Result<FetchOutcome, FetchError> + Send + 'static,
    {
        self.next_generation += 1;
        let generation = self.next_generation;
        if let Some(previous) = self.in_flight.insert(endpoint, generation) {
            tracing::debug!(
                "{} request {} supersedes request {}",
                endpoint,
                generation,
                previous
            );
        }

        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = request(source.as_ref());
            let _ = sender.send(FetchMessage {
                endpoint,
                generation,
                result,
            });
        });
        generation
    }

    /// Drain finished requests without blocking
    pub fn poll(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(message) = self.receiver.try_recv() {
            if let Some(outcome) = self.accept(message) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Block until nothing is in flight or `timeout` passes
    pub fn wait(&mut self, timeout: Duration) -> Vec<FetchOutcome> {
        let deadline = Instant::now() + timeout;
        let mut outcomes = Vec::new();
        while !self.in_flight.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(message) => {
                    if let Some(outcome) = self.accept(message) {
                        outcomes.push(outcome);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    tracing::warn!("Timed out waiting for {} request(s)", self.in_flight.len());
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        outcomes
    }

    fn accept(&mut self, message: FetchMessage) -> Option<FetchOutcome> {
        if self.in_flight.get(&message.endpoint) != Some(&message.generation) {
            tracing::warn!(
                "Discarding superseded {} response {}",
                message.endpoint,
                message.generation
            );
            return None;
        }
        self.in_flight.remove(&message.endpoint);

        match message.result {
            Ok(outcome) => Some(outcome),
            Err(error) => {
                tracing::error!("{} request failed: {}", message.endpoint, error);
                Some(FetchOutcome::Failed {
                    endpoint: message.endpoint,
                    error,
                })
            }
        }
    }
}
