//! Main application state and eframe::App implementation.

use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;

use crate::details::DomainDetails;
use crate::fetch::{
    DataSource, Endpoint, FetchManager, FetchOutcome, FileSource, HttpSource, TranscriptList,
};
use crate::payload::LandscapePayload;
use crate::session::ChartSession;
use crate::settings::Settings;
use crate::state::{loading_label, ChartDrag, DataSourceKind, LoadingState, ToastType, TOAST_SECONDS};

/// Main application state
pub struct MetadomeApp {
    /// Persisted user settings
    pub(crate) settings: Settings,
    /// The chart engine for the loaded landscape
    pub(crate) session: ChartSession,
    /// Background requests
    pub(crate) fetcher: FetchManager,
    /// Where gene and transcript lookups go
    pub(crate) source_kind: DataSourceKind,
    /// Directory of prebuilt visualizations
    pub(crate) prebuilt_dir: Option<PathBuf>,
    /// Gene search text
    pub(crate) gene_query: String,
    /// Transcript id text
    pub(crate) transcript_query: String,
    /// Transcripts of the last gene lookup
    pub(crate) transcripts: TranscriptList,
    /// Current loading state
    pub(crate) loading_state: LoadingState,
    /// Toast messages for user feedback
    pub(crate) toast_message: Option<(String, std::time::Instant, ToastType)>,
    /// Track dropped files to prevent duplicates
    last_drop_time: Option<std::time::Instant>,
    /// Open domain details window
    pub(crate) domain_details: Option<DomainDetails>,
    /// Position whose homologous variants are shown
    pub(crate) inspected_position: Option<u32>,
    /// Pointer drag on the chart
    pub(crate) chart_drag: Option<ChartDrag>,
}

impl MetadomeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::load();
        Self::with_settings(settings)
    }

    fn with_settings(settings: Settings) -> Self {
        let session = match ChartSession::from_settings(&settings) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Falling back to default chart layout: {}", e);
                ChartSession::default()
            }
        };
        let fetcher = FetchManager::new(Arc::new(HttpSource::new(&settings.api_base_url)));

        Self {
            settings,
            session,
            fetcher,
            source_kind: DataSourceKind::default(),
            prebuilt_dir: None,
            gene_query: String::new(),
            transcript_query: String::new(),
            transcripts: TranscriptList::default(),
            loading_state: LoadingState::Idle,
            toast_message: None,
            last_drop_time: None,
            domain_details: None,
            inspected_position: None,
            chart_drag: None,
        }
    }

    // ========================================================================
    // Toasts
    // ========================================================================

    pub(crate) fn show_toast(&mut self, message: &str) {
        self.show_toast_typed(message, ToastType::Info);
    }

    pub(crate) fn show_toast_success(&mut self, message: &str) {
        self.show_toast_typed(message, ToastType::Success);
    }

    pub(crate) fn show_toast_warning(&mut self, message: &str) {
        self.show_toast_typed(message, ToastType::Warning);
    }

    pub(crate) fn show_toast_error(&mut self, message: &str) {
        self.show_toast_typed(message, ToastType::Error);
    }

    fn show_toast_typed(&mut self, message: &str, toast_type: ToastType) {
        self.toast_message = Some((message.to_string(), std::time::Instant::now(), toast_type));
    }

    pub(crate) fn toast_expired(&self) -> bool {
        self.toast_message
            .as_ref()
            .is_some_and(|(_, time, _)| time.elapsed().as_secs() >= TOAST_SECONDS)
    }

    // ========================================================================
    // Data loading
    // ========================================================================

    /// Point lookups at the selected data source
    pub(crate) fn apply_source(&mut self) {
        let source: Arc<dyn DataSource> = match (self.source_kind, &self.prebuilt_dir) {
            (DataSourceKind::Prebuilt, Some(dir)) => Arc::new(FileSource::new(dir.clone())),
            _ => Arc::new(HttpSource::new(&self.settings.api_base_url)),
        };
        self.fetcher.set_source(source);
        self.loading_state = LoadingState::Idle;
    }

    /// Start loading a payload file in the background
    pub(crate) fn start_loading_file(&mut self, path: PathBuf) {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        self.loading_state = LoadingState::Loading(filename);
        self.fetcher.request_file(path);
    }

    pub(crate) fn start_fetching_transcripts(&mut self) {
        let gene = self.gene_query.clone();
        match self.fetcher.request_transcripts(&gene) {
            Ok(_) => {
                self.loading_state =
                    LoadingState::Loading(loading_label(Endpoint::Transcripts, gene.trim()));
            }
            Err(e) => self.show_toast_error(&e.to_string()),
        }
    }

    pub(crate) fn start_fetching_landscape(&mut self, transcript_id: &str) {
        match self.fetcher.request_landscape(transcript_id) {
            Ok(_) => {
                self.transcript_query = transcript_id.trim().to_string();
                self.loading_state =
                    LoadingState::Loading(loading_label(Endpoint::Landscape, transcript_id.trim()));
            }
            Err(e) => self.show_toast_error(&e.to_string()),
        }
    }

    /// Check for completed background requests
    fn check_loading_complete(&mut self) {
        for outcome in self.fetcher.poll() {
            match outcome {
                FetchOutcome::Landscape(payload) => self.show_payload(*payload),
                FetchOutcome::Transcripts(list) => {
                    if list.transcript_ids.is_empty() {
                        self.show_toast_warning(&list.message);
                    } else {
                        self.show_toast(&list.message);
                    }
                    self.transcripts = list;
                }
                FetchOutcome::Failed { endpoint, error } => {
                    self.show_toast_error(&format!("Failed to load {}: {}", endpoint, error));
                }
            }
        }
        if self.fetcher.is_idle() {
            self.loading_state = LoadingState::Idle;
        }
    }

    /// Replace the chart with a new payload
    pub(crate) fn show_payload(&mut self, payload: LandscapePayload) {
        let title = payload.title();
        let empty = payload.is_empty();
        match self.session.create_graph(payload) {
            Ok(()) => {
                self.domain_details = None;
                self.inspected_position = None;
                self.chart_drag = None;
                if empty {
                    self.show_toast_warning("No positions in this landscape");
                } else {
                    self.show_toast_success(&format!("Loaded {}", title));
                }
            }
            Err(e) => self.show_toast_error(&format!("Error: {}", e)),
        }
    }

    /// Handle file drops
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        // Don't accept drops while loading
        if self.loading_state.is_loading() {
            return;
        }

        // Debounce file drops
        if let Some(last_drop) = self.last_drop_time {
            if last_drop.elapsed().as_secs() < 2 {
                return;
            }
        }

        let dropped_files: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        if let Some(path) = dropped_files.into_iter().next() {
            self.last_drop_time = Some(std::time::Instant::now());
            self.start_loading_file(path);
        }
    }

    /// Report chart engine errors without interrupting the frame
    pub(crate) fn report<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Chart update failed: {}", e);
                self.show_toast_error(&format!("Chart update failed: {}", e));
                None
            }
        }
    }
}

impl eframe::App for MetadomeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background requests
        self.check_loading_complete();

        // Handle file drops
        self.handle_dropped_files(ctx);

        // Apply dark theme
        ctx.set_visuals(egui::Visuals::dark());

        // Request repaint while loading (for spinner animation)
        if self.loading_state.is_loading() {
            ctx.request_repaint();
        }

        // Toast notifications
        self.render_toast(ctx);

        // Domain details window
        self.render_domain_details(ctx);

        // Left panel for data source and view controls
        egui::SidePanel::left("controls_panel")
            .default_width(crate::ui::side_panel::SIDE_PANEL_WIDTH)
            .min_width(crate::ui::side_panel::SIDE_PANEL_MIN_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_side_panel(ui);
            });

        // Selected positions table (render before central to claim space)
        if self.session.selection().summary_visible() {
            egui::TopBottomPanel::bottom("selection_panel")
                .resizable(true)
                .default_height(220.0)
                .min_height(120.0)
                .show(ctx, |ui| {
                    self.render_selection_table(ui);
                });
        }

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_landscape(ui);
        });
    }
}
