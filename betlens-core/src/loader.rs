//! CSV loading for prediction files.
//!
//! The loader only parses: every cell stays a string until the column
//! derivation step decides what it means. A missing file is not a failure
//! of the loader itself but a deliberate halt: callers render
//! [`NO_FILE_MESSAGE`] and stop the run.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Shown when a run starts without an input file.
pub const NO_FILE_MESSAGE: &str =
    "Load a CSV file (e.g. 'serie_a_value_betting_predictions_with_eval_featsel.csv').";

/// Errors from the loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no file loaded")]
    NoFile,

    #[error("cannot open '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// An uploaded table: headers as written, rows as untyped cells.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Where the table came from (display only).
    pub source: PathBuf,
    /// BLAKE3 over headers and cells, identifying the exact upload.
    pub dataset_hash: String,
}

impl RawTable {
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load a CSV file. `None` means nothing was supplied and yields [`LoadError::NoFile`].
pub fn load_csv(path: Option<&Path>) -> Result<RawTable, LoadError> {
    let Some(path) = path else {
        return Err(LoadError::NoFile);
    };
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file, path)
}

/// Parse CSV from any reader.
///
/// Rows may be shorter or longer than the header; short rows read as
/// missing cells during derivation.
pub fn read_csv<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<RawTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect::<Vec<_>>());
    }

    let dataset_hash = compute_dataset_hash(&headers, &rows);
    let source = source.into();
    debug!(
        source = %source.display(),
        columns = headers.len(),
        rows = rows.len(),
        "loaded prediction table"
    );

    Ok(RawTable {
        headers,
        rows,
        source,
        dataset_hash,
    })
}

/// Deterministic BLAKE3 over every cell, with separators so that
/// `["ab", "c"]` and `["a", "bc"]` hash differently.
fn compute_dataset_hash(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut hasher = blake3::Hasher::new();
    for h in headers {
        hasher.update(h.as_bytes());
        hasher.update(&[0x1f]);
    }
    hasher.update(&[0x1e]);
    for row in rows {
        for cell in row {
            hasher.update(cell.as_bytes());
            hasher.update(&[0x1f]);
        }
        hasher.update(&[0x1e]);
    }
    hasher.finalize().to_hex().to_string()
}
