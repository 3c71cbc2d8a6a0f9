//! Row selection: the should-bet gate and the confidence threshold.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prediction::PredictionRow;

#[derive(Debug, Error, PartialEq)]
pub enum ThresholdError {
    #[error("threshold {0} is outside 0.40–1.00")]
    OutOfRange(f64),
}

/// Which rows enter the analysis before any threshold is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetGate {
    /// Rows the model flagged as bets that also have an outcome.
    #[default]
    FlaggedOnly,
    /// Every derived row.
    AllRows,
}

impl BetGate {
    pub fn admits(self, row: &PredictionRow) -> bool {
        match self {
            BetGate::FlaggedOnly => row.should_bet && row.bet_outcome.is_some(),
            BetGate::AllRows => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BetGate::FlaggedOnly => "flagged bets only",
            BetGate::AllRows => "all rows",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            BetGate::FlaggedOnly => BetGate::AllRows,
            BetGate::AllRows => BetGate::FlaggedOnly,
        }
    }
}

/// Minimum confidence, adjustable from 0.40 to 1.00 in steps of 0.05.
///
/// Held as whole hundredths so that 0.60 compares equal to a parsed "0.6".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold {
    hundredths: u8,
}

impl Threshold {
    pub const MIN_HUNDREDTHS: u8 = 40;
    pub const MAX_HUNDREDTHS: u8 = 100;
    pub const STEP_HUNDREDTHS: u8 = 5;
    pub const DEFAULT_HUNDREDTHS: u8 = 60;

    /// Validate and snap `value` to the nearest 0.05 step.
    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if !value.is_finite()
            || value < f64::from(Self::MIN_HUNDREDTHS) / 100.0 - 1e-9
            || value > f64::from(Self::MAX_HUNDREDTHS) / 100.0 + 1e-9
        {
            return Err(ThresholdError::OutOfRange(value));
        }
        let step = f64::from(Self::STEP_HUNDREDTHS);
        let snapped = ((value * 100.0) / step).round() * step;
        let hundredths = (snapped as u8).clamp(Self::MIN_HUNDREDTHS, Self::MAX_HUNDREDTHS);
        Ok(Self { hundredths })
    }

    pub fn min() -> Self {
        Self {
            hundredths: Self::MIN_HUNDREDTHS,
        }
    }

    pub fn max() -> Self {
        Self {
            hundredths: Self::MAX_HUNDREDTHS,
        }
    }

    pub fn value(self) -> f64 {
        f64::from(self.hundredths) / 100.0
    }

    pub fn hundredths(self) -> u8 {
        self.hundredths
    }

    pub fn step_up(self) -> Self {
        Self {
            hundredths: (self.hundredths + Self::STEP_HUNDREDTHS).min(Self::MAX_HUNDREDTHS),
        }
    }

    pub fn step_down(self) -> Self {
        Self {
            hundredths: self
                .hundredths
                .saturating_sub(Self::STEP_HUNDREDTHS)
                .max(Self::MIN_HUNDREDTHS),
        }
    }

    /// Slider position in [0, 1].
    pub fn fraction(self) -> f64 {
        f64::from(self.hundredths - Self::MIN_HUNDREDTHS)
            / f64::from(Self::MAX_HUNDREDTHS - Self::MIN_HUNDREDTHS)
    }

    /// Rows with missing confidence never pass.
    pub fn admits(self, row: &PredictionRow) -> bool {
        row.confidence.is_some_and(|c| c >= self.value())
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            hundredths: Self::DEFAULT_HUNDREDTHS,
        }
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ThresholdError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Threshold::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(t: Threshold) -> f64 {
        t.value()
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// The full selection applied to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub gate: BetGate,
    pub threshold: Threshold,
}

impl Selection {
    /// Rows admitted by the gate alone.
    pub fn gated<'a>(&self, rows: &'a [PredictionRow]) -> Vec<&'a PredictionRow> {
        rows.iter().filter(|r| self.gate.admits(r)).collect()
    }

    /// Gated rows that also meet the threshold.
    pub fn select<'a>(&self, rows: &'a [PredictionRow]) -> Vec<&'a PredictionRow> {
        rows.iter()
            .filter(|r| self.gate.admits(r) && self.threshold.admits(r))
            .collect()
    }
}
