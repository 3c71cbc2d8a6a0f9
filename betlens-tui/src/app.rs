//! Application state. Single owner, main thread only.
//!
//! Every interaction re-runs the pipeline: a file load rebuilds the
//! [`Dataset`], a selection change rebuilds the [`Analysis`] from it.
//! A halt replaces all output with one message until the next interaction.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use betlens_core::{Analysis, ColumnMap, Dataset, PipelineError, Selection, Threshold};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    OpenFile,
    Help,
}

/// Result of the most recent run.
#[derive(Debug, Clone)]
pub enum RunState {
    /// The run stopped early; this message is the only output.
    Halted { message: String, level: StatusLevel },
    Ready(Analysis),
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    pub columns: ColumnMap,
    pub selection: Selection,
    pub file: Option<PathBuf>,
    pub dataset: Option<Dataset>,
    pub run: RunState,
    pub loaded_at: Option<NaiveDateTime>,

    // Bet table
    pub table_scroll: usize,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub overlay: Overlay,
    pub path_input: String,
}

impl AppState {
    pub fn new(columns: ColumnMap, selection: Selection, file: Option<PathBuf>) -> Self {
        let mut app = Self {
            running: true,
            columns,
            selection,
            file,
            dataset: None,
            run: RunState::Halted {
                message: String::new(),
                level: StatusLevel::Info,
            },
            loaded_at: None,
            table_scroll: 0,
            status_message: None,
            overlay: Overlay::None,
            path_input: String::new(),
        };
        app.reload();
        app
    }

    /// Full run: read the file, derive, analyze.
    pub fn reload(&mut self) {
        self.table_scroll = 0;
        match Dataset::load(self.file.as_deref(), &self.columns) {
            Ok(dataset) => {
                info!(
                    source = %dataset.source.display(),
                    rows = dataset.rows.len(),
                    "dataset loaded"
                );
                self.loaded_at = Some(chrono::Local::now().naive_local());
                self.set_status(format!(
                    "Loaded {} rows from {}",
                    dataset.rows.len(),
                    dataset.source.display()
                ));
                self.run = RunState::Ready(dataset.analyze(self.selection));
                self.dataset = Some(dataset);
            }
            Err(err) => self.halt(err),
        }
    }

    /// Selection-only run against the already loaded dataset.
    pub fn rerun(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.run = RunState::Ready(dataset.analyze(self.selection));
            let max_scroll = self.bet_count().saturating_sub(1);
            self.table_scroll = self.table_scroll.min(max_scroll);
        }
    }

    /// Point at a new file and run from scratch.
    pub fn open(&mut self, path: PathBuf) {
        self.file = Some(path);
        self.reload();
    }

    pub fn set_threshold(&mut self, threshold: Threshold) {
        if threshold != self.selection.threshold {
            self.selection.threshold = threshold;
            self.rerun();
        }
    }

    pub fn toggle_gate(&mut self) {
        self.selection.gate = self.selection.gate.toggle();
        self.set_status(format!("Gate: {}", self.selection.gate.label()));
        self.rerun();
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.run {
            RunState::Ready(a) => Some(a),
            RunState::Halted { .. } => None,
        }
    }

    pub fn bet_count(&self) -> usize {
        self.analysis().map_or(0, |a| a.bets.len())
    }

    pub fn scroll_down(&mut self, by: usize) {
        let max_scroll = self.bet_count().saturating_sub(1);
        self.table_scroll = (self.table_scroll + by).min(max_scroll);
    }

    pub fn scroll_up(&mut self, by: usize) {
        self.table_scroll = self.table_scroll.saturating_sub(by);
    }

    fn halt(&mut self, err: PipelineError) {
        self.dataset = None;
        self.loaded_at = None;
        let message = err.halt_message();
        if err.is_no_file() {
            self.status_message = None;
            self.run = RunState::Halted {
                message,
                level: StatusLevel::Info,
            };
        } else {
            warn!(error = %err, "run halted");
            self.set_error(message.clone());
            self.run = RunState::Halted {
                message,
                level: StatusLevel::Error,
            };
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
