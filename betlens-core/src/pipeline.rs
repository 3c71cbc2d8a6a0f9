//! End-to-end pipeline: load → derive → gate → threshold → aggregate.
//!
//! A [`Dataset`] is built once per file load. An [`Analysis`] is rebuilt from
//! it for every selection change; nothing carries over between analyses.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::aggregate::{bucket_breakdown, BucketStats, SummaryStats};
use crate::columns::{derive_rows, normalize_headers, ColumnMap, DeriveError};
use crate::loader::{load_csv, LoadError, RawTable, NO_FILE_MESSAGE};
use crate::prediction::PredictionRow;
use crate::selection::Selection;

/// Anything that halts a run before metrics can be shown.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Error reading columns: {0}")]
    Derive(#[from] DeriveError),
}

impl PipelineError {
    /// True for the informational "nothing loaded yet" halt.
    pub fn is_no_file(&self) -> bool {
        matches!(self, PipelineError::Load(LoadError::NoFile))
    }

    /// The message a presenter shows in place of any output.
    pub fn halt_message(&self) -> String {
        if self.is_no_file() {
            NO_FILE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// A loaded and fully derived prediction table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: PathBuf,
    pub dataset_hash: String,
    /// Normalized headers.
    pub headers: Vec<String>,
    /// Every row of the file, with outcome columns derived.
    pub rows: Vec<PredictionRow>,
}

impl Dataset {
    /// Load and derive in one step. `None` halts with [`LoadError::NoFile`].
    pub fn load(path: Option<&Path>, columns: &ColumnMap) -> Result<Self, PipelineError> {
        let table = load_csv(path)?;
        Self::from_table(table, columns)
    }

    pub fn from_table(mut table: RawTable, columns: &ColumnMap) -> Result<Self, PipelineError> {
        normalize_headers(&mut table.headers);
        let rows = derive_rows(&table, columns)?;
        debug!(rows = rows.len(), "derived prediction rows");
        Ok(Self {
            source: table.source,
            dataset_hash: table.dataset_hash,
            headers: table.headers,
            rows,
        })
    }

    pub fn analyze(&self, selection: Selection) -> Analysis {
        let gated = selection.gated(&self.rows);
        let selected = selection.select(&self.rows);

        let summary = SummaryStats::compute(selected.iter().copied());
        let buckets = bucket_breakdown(gated.iter().copied());

        let mut bets: Vec<PredictionRow> = selected.into_iter().cloned().collect();
        sort_by_confidence_desc(&mut bets);

        debug!(
            gate = selection.gate.label(),
            threshold = selection.threshold.value(),
            gated = gated.len(),
            selected = bets.len(),
            "analysis complete"
        );

        Analysis {
            selection,
            total_rows: self.rows.len(),
            gated_rows: gated.len(),
            summary,
            buckets,
            bets,
        }
    }
}

/// Everything a presenter needs for one run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub selection: Selection,
    pub total_rows: usize,
    /// Rows admitted by the gate; the base for the band breakdown.
    pub gated_rows: usize,
    pub summary: SummaryStats,
    pub buckets: Vec<BucketStats>,
    /// Threshold-filtered rows, highest confidence first.
    pub bets: Vec<PredictionRow>,
}

/// Stable sort, highest confidence first. Missing confidence sorts last.
pub fn sort_by_confidence_desc(rows: &mut [PredictionRow]) {
    rows.sort_by(|a, b| match (a.confidence, b.confidence) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnRef;
    use crate::loader::read_csv;
    use crate::selection::{BetGate, Threshold};

    fn named() -> ColumnMap {
        ColumnMap {
            confidence: ColumnRef::Name("confidence".into()),
            should_bet: ColumnRef::Name("should_bet".into()),
            outcome: ColumnRef::Name("bet_outcome".into()),
        }
    }

    fn dataset(csv: &str) -> Dataset {
        let table = read_csv(csv.as_bytes(), "mem.csv").unwrap();
        Dataset::from_table(table, &named()).unwrap()
    }

    const SAMPLE: &str = "\
match, confidence ,should_bet,bet_outcome
A-B,0.55,True,WIN +0.80
C-D,0.62,True,LOSS -1.00
E-F,0.91,True,WIN +1.20
G-H,0.75,False,WIN +0.50
I-J,0.68,True,
K-L,0.45,True,LOSS -1.00
";

    #[test]
    fn headers_are_trimmed_before_lookup() {
        let ds = dataset(SAMPLE);
        assert_eq!(ds.headers[1], "confidence");
        assert_eq!(ds.rows.len(), 6);
    }

    #[test]
    fn flagged_gate_feeds_summary_and_bands() {
        let ds = dataset(SAMPLE);
        let a = ds.analyze(Selection::default());
        // Gate drops G-H (not flagged) and I-J (no outcome).
        assert_eq!(a.gated_rows, 4);
        assert_eq!(a.summary.total_bets, 2);
        assert_eq!(a.summary.wins, 1);
        let band_total: usize = a.buckets.iter().map(|b| b.total).sum();
        assert_eq!(band_total, 4);
    }

    #[test]
    fn all_rows_gate_keeps_everything() {
        let ds = dataset(SAMPLE);
        let a = ds.analyze(Selection {
            gate: BetGate::AllRows,
            threshold: Threshold::default(),
        });
        assert_eq!(a.gated_rows, 6);
        assert_eq!(a.summary.total_bets, 4);
        assert_eq!(a.summary.wins, 2);
    }

    #[test]
    fn bets_sorted_by_confidence_desc() {
        let ds = dataset(SAMPLE);
        let a = ds.analyze(Selection {
            gate: BetGate::AllRows,
            threshold: Threshold::min(),
        });
        let confs: Vec<f64> = a.bets.iter().filter_map(|r| r.confidence).collect();
        assert_eq!(confs, vec![0.91, 0.75, 0.68, 0.62, 0.55, 0.45]);
    }

    #[test]
    fn bands_ignore_threshold() {
        let ds = dataset(SAMPLE);
        let low = ds.analyze(Selection::default());
        let high = ds.analyze(Selection {
            gate: BetGate::FlaggedOnly,
            threshold: Threshold::max(),
        });
        assert_eq!(low.buckets, high.buckets);
        assert_eq!(high.summary.total_bets, 0);
        assert_eq!(high.summary.win_rate, 0.0);
    }

    #[test]
    fn halt_messages() {
        let no_file = Dataset::load(None, &ColumnMap::default()).unwrap_err();
        assert!(no_file.is_no_file());
        assert_eq!(no_file.halt_message(), NO_FILE_MESSAGE);

        let table = read_csv("a,b\n1,2\n".as_bytes(), "mem.csv").unwrap();
        let derive = Dataset::from_table(table, &ColumnMap::default()).unwrap_err();
        assert!(!derive.is_no_file());
        assert!(derive.halt_message().starts_with("Error reading columns:"));
    }

    #[test]
    fn missing_confidence_sorts_last() {
        let mut rows = vec![
            PredictionRow::new(0, None, true, None, vec![]),
            PredictionRow::new(1, Some(0.5), true, None, vec![]),
            PredictionRow::new(2, Some(0.9), true, None, vec![]),
        ];
        sort_by_confidence_desc(&mut rows);
        let order: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }
}
