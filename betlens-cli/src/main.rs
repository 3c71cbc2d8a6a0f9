//! BetLens CLI — prediction-model performance from the command line.
//!
//! Commands:
//! - `summary` — bets, wins, losses, win rate and ROI above the threshold
//! - `buckets` — win rate and ROI per confidence band
//! - `bets` — selected bets, highest confidence first
//! - `export` — write `summary.json`, `buckets.csv` and `bets.csv`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use betlens_core::{
    round1, write_artifacts, Analysis, BetGate, BetLensConfig, BucketStats, ColumnRef, Dataset,
    PredictionRow, Selection, SummaryStats, Threshold,
};

#[derive(Parser)]
#[command(
    name = "betlens",
    about = "BetLens CLI — Serie A prediction model performance"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline metrics for the selected bets.
    Summary {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Win rate and ROI per confidence band.
    Buckets {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Selected bets, highest confidence first.
    Bets {
        #[command(flatten)]
        common: CommonArgs,

        /// Show at most this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write summary.json, buckets.csv and bets.csv.
    Export {
        #[command(flatten)]
        common: CommonArgs,

        /// Output directory. Created if missing.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Predictions CSV.
    file: Option<PathBuf>,

    /// Minimum confidence, 0.40–1.00, snapped to 0.05 steps.
    #[arg(long, value_parser = parse_threshold)]
    threshold: Option<Threshold>,

    /// Analyze every row, not only rows flagged as bets.
    #[arg(long, default_value_t = false)]
    all_rows: bool,

    /// TOML config with column mapping and default selection.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Confidence column: zero-based index or header name.
    #[arg(long)]
    confidence_col: Option<ColumnRef>,

    /// Should-bet column: zero-based index or header name.
    #[arg(long)]
    should_bet_col: Option<ColumnRef>,

    /// Outcome column: zero-based index or header name.
    #[arg(long)]
    outcome_col: Option<ColumnRef>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_threshold(s: &str) -> Result<Threshold, String> {
    let value: f64 = s.trim().parse().map_err(|_| format!("not a number: {s}"))?;
    Threshold::new(value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { common } => run(&common, |_, a| print_summary(a, common.format)),
        Commands::Buckets { common } => run(&common, |_, a| print_buckets(&a.buckets, common.format)),
        Commands::Bets { common, limit } => {
            run(&common, |_, a| print_bets(&a.bets, limit, common.format))
        }
        Commands::Export { common, output_dir } => run(&common, |ds, a| {
            let paths = write_artifacts(ds, a, &output_dir)?;
            println!("Summary: {}", paths.summary.display());
            println!("Buckets: {}", paths.buckets.display());
            println!("Bets:    {}", paths.bets.display());
            Ok(())
        }),
    }
}

/// Load, derive and analyze, then hand the result to `present`.
///
/// No file prints the informational message and succeeds. Any other halt
/// is an error and nothing is presented.
fn run<F>(common: &CommonArgs, present: F) -> Result<()>
where
    F: FnOnce(&Dataset, &Analysis) -> Result<()>,
{
    let config = resolve_config(common)?;

    let dataset = match Dataset::load(common.file.as_deref(), &config.columns) {
        Ok(ds) => ds,
        Err(err) if err.is_no_file() => {
            println!("{}", err.halt_message());
            return Ok(());
        }
        Err(err) => bail!("{}", err.halt_message()),
    };

    let analysis = dataset.analyze(config.selection.unwrap_or_default());
    debug!(
        rows = analysis.total_rows,
        gated = analysis.gated_rows,
        bets = analysis.bets.len(),
        "analysis complete"
    );
    present(&dataset, &analysis)
}

/// Config file first, then flags on top.
fn resolve_config(common: &CommonArgs) -> Result<BetLensConfig> {
    let mut config = BetLensConfig::load_or_default(common.config.as_deref())
        .with_context(|| match &common.config {
            Some(p) => format!("failed to load config {}", p.display()),
            None => "failed to load config".to_string(),
        })?;

    if let Some(c) = &common.confidence_col {
        config.columns.confidence = c.clone();
    }
    if let Some(c) = &common.should_bet_col {
        config.columns.should_bet = c.clone();
    }
    if let Some(c) = &common.outcome_col {
        config.columns.outcome = c.clone();
    }
    if common.threshold.is_some() || common.all_rows {
        let selection = config.selection.get_or_insert_with(Selection::default);
        if let Some(t) = common.threshold {
            selection.threshold = t;
        }
        if common.all_rows {
            selection.gate = BetGate::AllRows;
        }
    }
    Ok(config)
}

#[derive(Serialize)]
struct SummaryOutput {
    selection: Selection,
    summary: SummaryStats,
}

fn print_summary(analysis: &Analysis, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let mut summary = analysis.summary;
            summary.win_rate = round1(summary.win_rate);
            summary.roi = round1(summary.roi);
            let out = SummaryOutput {
                selection: analysis.selection,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => print!("{}", format_summary(analysis)),
    }
    Ok(())
}

fn format_summary(analysis: &Analysis) -> String {
    let s = &analysis.summary;
    let mut out = String::new();
    out.push_str(&format!(
        "Threshold:  >= {} ({})\n",
        analysis.selection.threshold,
        analysis.selection.gate.label()
    ));
    out.push_str(&format!(
        "Rows:       {} ({} gated)\n\n",
        analysis.total_rows, analysis.gated_rows
    ));
    out.push_str(&format!("Bets:       {}\n", s.total_bets));
    out.push_str(&format!("Wins:       {}\n", s.wins));
    out.push_str(&format!("Losses:     {}\n", s.losses));
    out.push_str(&format!("Win rate:   {:.1}%\n", s.win_rate));
    out.push_str(&format!("ROI:        {:.1}%\n", s.roi));
    out
}

fn print_buckets(buckets: &[BucketStats], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(buckets)?),
        OutputFormat::Text => print!("{}", format_buckets(buckets)),
    }
    Ok(())
}

fn format_buckets(buckets: &[BucketStats]) -> String {
    let mut out = format!(
        "{:<11} {:>6} {:>6} {:>9} {:>9} {:>9}\n",
        "Band", "Wins", "Total", "Units", "Win rate", "ROI"
    );
    out.push_str(&"-".repeat(55));
    out.push('\n');
    for b in buckets {
        out.push_str(&format!(
            "{:<11} {:>6} {:>6} {:>+9.2} {:>8.1}% {:>8.1}%\n",
            b.band.label(),
            b.wins,
            b.total,
            b.units,
            b.win_rate,
            b.roi
        ));
    }
    out
}

fn print_bets(bets: &[PredictionRow], limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let shown = &bets[..limit.unwrap_or(bets.len()).min(bets.len())];
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(shown)?),
        OutputFormat::Text => {
            print!("{}", format_bets(shown));
            if shown.len() < bets.len() {
                println!("... {} more", bets.len() - shown.len());
            }
        }
    }
    Ok(())
}

fn format_bets(bets: &[PredictionRow]) -> String {
    let mut out = format!(
        "{:>6} {:>10} {:<28} {:>8} {:>4}\n",
        "Row", "Confidence", "Outcome", "Units", "Win"
    );
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for row in bets {
        let confidence = row
            .confidence
            .map_or_else(|| "-".to_string(), |c| format!("{c:.3}"));
        out.push_str(&format!(
            "{:>6} {:>10} {:<28} {:>+8.2} {:>4}\n",
            row.index + 1,
            confidence,
            row.bet_outcome.as_deref().unwrap_or("-"),
            row.units,
            if row.is_win { "yes" } else { "no" }
        ));
    }
    out
}
