//! One derived prediction row.

use serde::{Deserialize, Serialize};

use crate::bands::ConfidenceBand;
use crate::outcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    /// Zero-based data row index in the uploaded file.
    pub index: usize,
    /// Model confidence; `None` when the cell was empty.
    pub confidence: Option<f64>,
    pub should_bet: bool,
    /// Raw outcome text; `None` when the cell was empty or absent.
    pub bet_outcome: Option<String>,
    pub is_win: bool,
    pub units: f64,
    pub band: Option<ConfidenceBand>,
    /// Every uploaded cell, untyped.
    #[serde(skip)]
    pub raw: Vec<String>,
}

impl PredictionRow {
    /// Build a row and derive its outcome and band columns.
    pub fn new(
        index: usize,
        confidence: Option<f64>,
        should_bet: bool,
        bet_outcome: Option<String>,
        raw: Vec<String>,
    ) -> Self {
        let is_win = outcome::is_win(bet_outcome.as_deref());
        let units = outcome::units(bet_outcome.as_deref());
        let band = confidence.and_then(ConfidenceBand::classify);
        Self {
            index,
            confidence,
            should_bet,
            bet_outcome,
            is_win,
            units,
            band,
            raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_outcome_columns() {
        let row = PredictionRow::new(0, Some(0.72), true, Some("WIN +1.91".into()), vec![]);
        assert!(row.is_win);
        assert_eq!(row.units, 1.91);
        assert_eq!(row.band, Some(ConfidenceBand::SeventyToEighty));
    }

    #[test]
    fn missing_outcome_is_a_zero_unit_non_win() {
        let row = PredictionRow::new(3, Some(0.45), false, None, vec![]);
        assert!(!row.is_win);
        assert_eq!(row.units, 0.0);
        assert_eq!(row.band, Some(ConfidenceBand::FortyToFifty));
    }

    #[test]
    fn missing_confidence_has_no_band() {
        let row = PredictionRow::new(1, None, true, Some("LOSS -1.00".into()), vec![]);
        assert_eq!(row.band, None);
        assert_eq!(row.units, -1.0);
    }
}
