//! Header normalization and derivation of the three working columns.
//!
//! The prediction exports this tool was built for carry no stable header
//! names, so the default [`ColumnMap`] addresses columns by position
//! (13 = confidence, 15 = should-bet, 16 = outcome). Any entry can instead
//! name a header, which makes the dependency on the upstream layout explicit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::loader::RawTable;
use crate::prediction::PredictionRow;

pub const DEFAULT_CONFIDENCE_INDEX: usize = 13;
pub const DEFAULT_SHOULD_BET_INDEX: usize = 15;
pub const DEFAULT_OUTCOME_INDEX: usize = 16;

/// Cell texts that read as a missing value, compared after trimming.
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NULL", "null", "None", "NaN", "nan", "<NA>", "#N/A",
];

/// True when the cell holds no value.
pub fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell.trim())
}

/// Errors from column derivation. Any of these halts the run.
#[derive(Debug, Error, PartialEq)]
pub enum DeriveError {
    #[error("{role} column index {index} is out of bounds for a table with {width} columns")]
    IndexOutOfRange {
        role: ColumnRole,
        index: usize,
        width: usize,
    },

    #[error("{role} column '{name}' not found in headers")]
    UnknownColumn { role: ColumnRole, name: String },

    #[error("could not convert confidence '{value}' to float at row {row}")]
    InvalidConfidence { row: usize, value: String },
}

/// Which working column a reference resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Confidence,
    ShouldBet,
    Outcome,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnRole::Confidence => "confidence",
            ColumnRole::ShouldBet => "should-bet",
            ColumnRole::Outcome => "outcome",
        })
    }
}

/// A column addressed by zero-based position or by (trimmed) header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl FromStr for ColumnRef {
    type Err = std::convert::Infallible;

    /// All-digit strings are positions; anything else is a header name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<usize>() {
            Ok(i) => ColumnRef::Index(i),
            Err(_) => ColumnRef::Name(s.to_string()),
        })
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "#{i}"),
            ColumnRef::Name(n) => write!(f, "'{n}'"),
        }
    }
}

impl ColumnRef {
    fn resolve(&self, role: ColumnRole, headers: &[String]) -> Result<usize, DeriveError> {
        match self {
            ColumnRef::Index(index) if *index < headers.len() => Ok(*index),
            ColumnRef::Index(index) => Err(DeriveError::IndexOutOfRange {
                role,
                index: *index,
                width: headers.len(),
            }),
            ColumnRef::Name(name) => headers
                .iter()
                .position(|h| h == name.trim())
                .ok_or_else(|| DeriveError::UnknownColumn {
                    role,
                    name: name.clone(),
                }),
        }
    }
}

/// Where to find the three working columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub confidence: ColumnRef,
    pub should_bet: ColumnRef,
    pub outcome: ColumnRef,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            confidence: ColumnRef::Index(DEFAULT_CONFIDENCE_INDEX),
            should_bet: ColumnRef::Index(DEFAULT_SHOULD_BET_INDEX),
            outcome: ColumnRef::Index(DEFAULT_OUTCOME_INDEX),
        }
    }
}

/// Column positions after resolution against a concrete header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub confidence: usize,
    pub should_bet: usize,
    pub outcome: usize,
}

impl ColumnMap {
    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedColumns, DeriveError> {
        Ok(ResolvedColumns {
            confidence: self.confidence.resolve(ColumnRole::Confidence, headers)?,
            should_bet: self.should_bet.resolve(ColumnRole::ShouldBet, headers)?,
            outcome: self.outcome.resolve(ColumnRole::Outcome, headers)?,
        })
    }
}

/// Strip surrounding whitespace from every header in place.
pub fn normalize_headers(headers: &mut [String]) {
    for h in headers.iter_mut() {
        let trimmed = h.trim();
        if trimmed.len() != h.len() {
            *h = trimmed.to_string();
        }
    }
}

/// Derive a [`PredictionRow`] for every row of the table.
///
/// Headers are expected to be normalized already. Short rows read their
/// missing cells as empty, and any cell in [`MISSING_TOKENS`] is missing.
pub fn derive_rows(table: &RawTable, map: &ColumnMap) -> Result<Vec<PredictionRow>, DeriveError> {
    let cols = map.resolve(&table.headers)?;
    debug!(?cols, "resolved working columns");

    let mut rows = Vec::with_capacity(table.len());
    let mut short_rows = 0usize;
    let mut unbanded = 0usize;
    for (index, cells) in table.rows.iter().enumerate() {
        if cells.len() < table.width() {
            short_rows += 1;
        }
        let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");

        let confidence = parse_confidence(index, cell(cols.confidence))?;
        let should_bet = cell(cols.should_bet) == "True";
        let outcome = cell(cols.outcome);
        let bet_outcome = (!is_missing(outcome)).then(|| outcome.to_string());

        let row = PredictionRow::new(index, confidence, should_bet, bet_outcome, cells.clone());
        if row.confidence.is_some() && row.band.is_none() {
            unbanded += 1;
        }
        rows.push(row);
    }

    if short_rows > 0 {
        warn!(short_rows, "rows shorter than the header; missing cells read as empty");
    }
    if unbanded > 0 {
        warn!(unbanded, "confidence outside 0.40–1.00; rows left out of the band breakdown");
    }
    Ok(rows)
}

fn parse_confidence(row: usize, cell: &str) -> Result<Option<f64>, DeriveError> {
    if is_missing(cell) {
        return Ok(None);
    }
    let trimmed = cell.trim();
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| DeriveError::InvalidConfidence {
            row,
            value: cell.to_string(),
        })
}
