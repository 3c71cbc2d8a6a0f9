//! Aggregate statistics over selected rows.
//!
//! Every rate is guarded: with no rows, win rate and ROI are 0, never NaN.

use serde::{Deserialize, Serialize};

use crate::bands::ConfidenceBand;
use crate::prediction::PredictionRow;

/// Totals over the threshold-filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_bets: usize,
    pub wins: usize,
    pub losses: usize,
    pub total_units: f64,
    /// Percent, unrounded.
    pub win_rate: f64,
    /// Percent, unrounded.
    pub roi: f64,
}

impl SummaryStats {
    pub fn compute<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a PredictionRow>,
    {
        let mut total_bets = 0usize;
        let mut wins = 0usize;
        let mut total_units = 0.0;
        for row in rows {
            total_bets += 1;
            if row.is_win {
                wins += 1;
            }
            total_units += row.units;
        }
        Self {
            total_bets,
            wins,
            losses: total_bets - wins,
            total_units,
            win_rate: win_rate(wins, total_bets),
            roi: roi(total_units, total_bets),
        }
    }
}

/// Per-band totals. Rates are rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub band: ConfidenceBand,
    pub wins: usize,
    pub total: usize,
    pub units: f64,
    pub win_rate: f64,
    pub roi: f64,
}

/// Group rows into the six confidence bands.
///
/// Always returns all six bands in ascending order; rows without a band
/// (missing or out-of-domain confidence) are left out.
pub fn bucket_breakdown<'a, I>(rows: I) -> Vec<BucketStats>
where
    I: IntoIterator<Item = &'a PredictionRow>,
{
    let mut wins = [0usize; 6];
    let mut totals = [0usize; 6];
    let mut units = [0.0f64; 6];

    for row in rows {
        if let Some(band) = row.band {
            let i = band.index();
            totals[i] += 1;
            units[i] += row.units;
            if row.is_win {
                wins[i] += 1;
            }
        }
    }

    ConfidenceBand::ALL
        .iter()
        .map(|&band| {
            let i = band.index();
            BucketStats {
                band,
                wins: wins[i],
                total: totals[i],
                units: units[i],
                win_rate: round1(win_rate(wins[i], totals[i])),
                roi: round1(roi(units[i], totals[i])),
            }
        })
        .collect()
}

/// Wins as a percentage of bets; 0 with no bets.
pub fn win_rate(wins: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    wins as f64 / total as f64 * 100.0
}

/// Summed units per bet, as a percentage; 0 with no bets.
pub fn roi(units: f64, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    units / total as f64 * 100.0
}

/// Round to one decimal place.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(confidence: f64, outcome: &str) -> PredictionRow {
        PredictionRow::new(0, Some(confidence), true, Some(outcome.to_string()), vec![])
    }

    #[test]
    fn empty_selection_has_zero_rates() {
        let s = SummaryStats::compute(std::iter::empty());
        assert_eq!(s.total_bets, 0);
        assert_eq!(s.win_rate, 0.0);
        assert_eq!(s.roi, 0.0);
        assert!(!s.win_rate.is_nan());
    }

    #[test]
    fn ten_winning_bets() {
        let rows: Vec<PredictionRow> = (0..10).map(|_| row(0.7, "WIN +1.00")).collect();
        let s = SummaryStats::compute(&rows);
        assert_eq!(s.total_bets, 10);
        assert_eq!(s.wins, 10);
        assert_eq!(s.losses, 0);
        assert_eq!(s.win_rate, 100.0);
        assert_eq!(s.roi, 100.0);
    }

    #[test]
    fn mixed_results() {
        let rows = vec![
            row(0.65, "WIN +0.91"),
            row(0.72, "LOSS -1.00"),
            row(0.81, "WIN +1.10"),
            row(0.66, "PUSH"),
        ];
        let s = SummaryStats::compute(&rows);
        assert_eq!(s.wins, 2);
        assert_eq!(s.losses, 2);
        assert!((s.total_units - 1.01).abs() < 1e-9);
        assert_eq!(s.win_rate, 50.0);
        assert!((s.roi - 25.25).abs() < 1e-9);
    }

    #[test]
    fn breakdown_reports_all_bands() {
        let rows = vec![
            row(0.50, "WIN +1.00"),
            row(0.501, "LOSS -1.00"),
            row(0.95, "WIN +0.50"),
            row(0.30, "WIN +5.00"),
        ];
        let b = bucket_breakdown(&rows);
        assert_eq!(b.len(), 6);
        assert_eq!(b[0].band, ConfidenceBand::FortyToFifty);
        assert_eq!((b[0].wins, b[0].total), (1, 1));
        assert_eq!((b[1].wins, b[1].total), (0, 1));
        assert_eq!(b[1].roi, -100.0);
        assert_eq!(b[2].total, 0);
        assert_eq!(b[2].win_rate, 0.0);
        assert_eq!(b[5].roi, 50.0);
        let counted: usize = b.iter().map(|s| s.total).sum();
        assert_eq!(counted, 3);
    }

    #[test]
    fn breakdown_rates_are_rounded() {
        let rows = vec![
            row(0.75, "WIN +1.00"),
            row(0.75, "LOSS -1.00"),
            row(0.75, "LOSS -1.00"),
        ];
        let b = bucket_breakdown(&rows);
        assert_eq!(b[3].win_rate, 33.3);
        assert_eq!(b[3].roi, -33.3);
    }

    #[test]
    fn round1_rounds_half_away_from_zero() {
        assert_eq!(round1(12.25), 12.3);
        assert_eq!(round1(-0.04), -0.0);
        assert_eq!(round1(66.666), 66.7);
    }

    proptest! {
        #[test]
        fn losses_plus_wins_is_total(outcomes in proptest::collection::vec(any::<bool>(), 0..50)) {
            let rows: Vec<PredictionRow> = outcomes
                .iter()
                .map(|&w| row(0.7, if w { "WIN +1.00" } else { "LOSS -1.00" }))
                .collect();
            let s = SummaryStats::compute(&rows);
            prop_assert_eq!(s.wins + s.losses, s.total_bets);
            prop_assert!(s.win_rate >= 0.0 && s.win_rate <= 100.0);
        }
    }
}
