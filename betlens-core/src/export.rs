//! Analysis export: summary manifest (JSON), band table and bet list (CSV).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::aggregate::{round1, SummaryStats};
use crate::pipeline::{Analysis, Dataset};
use crate::selection::Selection;

#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub summary: PathBuf,
    pub buckets: PathBuf,
    pub bets: PathBuf,
}

/// Contents of `summary.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryManifest {
    pub source: String,
    pub dataset_hash: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub selection: Selection,
    pub total_rows: usize,
    pub gated_rows: usize,
    pub summary: SummaryStats,
}

#[derive(Serialize)]
struct BetRecord<'a> {
    row: usize,
    confidence: Option<f64>,
    bet_outcome: &'a str,
    units: f64,
    is_win: bool,
}

/// Write `summary.json`, `buckets.csv` and `bets.csv` into `output_dir`.
pub fn write_artifacts(dataset: &Dataset, analysis: &Analysis, output_dir: &Path) -> Result<ExportPaths> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let paths = ExportPaths {
        summary: output_dir.join("summary.json"),
        buckets: output_dir.join("buckets.csv"),
        bets: output_dir.join("bets.csv"),
    };

    write_summary_json(&paths.summary, dataset, analysis)?;
    write_buckets_csv(&paths.buckets, analysis)?;
    write_bets_csv(&paths.bets, analysis)?;

    Ok(paths)
}

pub fn write_summary_json(path: &Path, dataset: &Dataset, analysis: &Analysis) -> Result<()> {
    let mut summary = analysis.summary;
    summary.win_rate = round1(summary.win_rate);
    summary.roi = round1(summary.roi);

    let manifest = SummaryManifest {
        source: dataset.source.display().to_string(),
        dataset_hash: dataset.dataset_hash.clone(),
        generated_at: chrono::Utc::now(),
        selection: analysis.selection,
        total_rows: analysis.total_rows,
        gated_rows: analysis.gated_rows,
        summary,
    };

    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary to {}", path.display()))?;
    Ok(())
}

pub fn write_buckets_csv(path: &Path, analysis: &Analysis) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create buckets CSV {}", path.display()))?;
    for bucket in &analysis.buckets {
        wtr.serialize(bucket)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_bets_csv(path: &Path, analysis: &Analysis) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create bets CSV {}", path.display()))?;
    for bet in &analysis.bets {
        wtr.serialize(BetRecord {
            row: bet.index,
            confidence: bet.confidence,
            bet_outcome: bet.bet_outcome.as_deref().unwrap_or(""),
            units: bet.units,
            is_win: bet.is_win,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{ColumnMap, ColumnRef};
    use crate::loader::read_csv;

    fn sample() -> (Dataset, Analysis) {
        let csv = "confidence,should_bet,bet_outcome\n0.7,True,WIN +0.91\n0.82,True,LOSS -1.00\n0.45,True,WIN +1.10\n";
        let map = ColumnMap {
            confidence: ColumnRef::Index(0),
            should_bet: ColumnRef::Index(1),
            outcome: ColumnRef::Index(2),
        };
        let ds = Dataset::from_table(read_csv(csv.as_bytes(), "mem.csv").unwrap(), &map).unwrap();
        let analysis = ds.analyze(Selection::default());
        (ds, analysis)
    }

    #[test]
    fn writes_all_three_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let (ds, analysis) = sample();
        let paths = write_artifacts(&ds, &analysis, dir.path()).unwrap();

        let manifest: SummaryManifest =
            serde_json::from_str(&std::fs::read_to_string(&paths.summary).unwrap()).unwrap();
        assert_eq!(manifest.summary.total_bets, 2);
        assert_eq!(manifest.summary.roi, -4.5);
        assert_eq!(manifest.dataset_hash, ds.dataset_hash);

        let buckets = std::fs::read_to_string(&paths.buckets).unwrap();
        assert_eq!(buckets.lines().count(), 7);
        assert!(buckets.starts_with("band,wins,total,units,win_rate,roi"));
        assert!(buckets.contains("0.40–0.50,1,1,1.1,100.0,110.0"));

        let bets = std::fs::read_to_string(&paths.bets).unwrap();
        let lines: Vec<&str> = bets.lines().collect();
        assert_eq!(lines[0], "row,confidence,bet_outcome,units,is_win");
        assert!(lines[1].starts_with("1,0.82,"));
        assert_eq!(lines.len(), 3);
    }
}
