//! BetLens core — prediction loading, derivation, selection and aggregation.
//!
//! The pipeline runs strictly left to right, once per interaction:
//! - Load a CSV of model predictions into a raw table
//! - Normalize headers and derive confidence / should-bet / outcome columns
//! - Parse each outcome into a win flag and a signed unit result
//! - Gate to flagged bets, then keep rows at or above the confidence threshold
//! - Aggregate totals and the six-band confidence breakdown

pub mod aggregate;
pub mod bands;
pub mod columns;
pub mod config;
pub mod export;
pub mod loader;
pub mod outcome;
pub mod pipeline;
pub mod prediction;
pub mod selection;

pub use aggregate::{bucket_breakdown, round1, BucketStats, SummaryStats};
pub use bands::ConfidenceBand;
pub use columns::{
    derive_rows, is_missing, normalize_headers, ColumnMap, ColumnRef, DeriveError, MISSING_TOKENS,
};
pub use config::{BetLensConfig, ConfigError};
pub use export::{write_artifacts, ExportPaths};
pub use loader::{load_csv, read_csv, LoadError, RawTable, NO_FILE_MESSAGE};
pub use pipeline::{Analysis, Dataset, PipelineError};
pub use prediction::PredictionRow;
pub use selection::{BetGate, Selection, Threshold, ThresholdError};
