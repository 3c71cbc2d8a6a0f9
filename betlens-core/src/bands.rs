//! Fixed confidence bands for the grouped breakdown.
//!
//! Six contiguous bands partition [0.40, 1.00]. Each band is closed on the
//! right; the lowest band is also closed on the left so 0.40 is included.

use serde::{Deserialize, Serialize};

/// Band edges, lowest first.
pub const EDGES: [f64; 7] = [0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceBand {
    #[serde(rename = "0.40–0.50")]
    FortyToFifty,
    #[serde(rename = "0.50–0.60")]
    FiftyToSixty,
    #[serde(rename = "0.60–0.70")]
    SixtyToSeventy,
    #[serde(rename = "0.70–0.80")]
    SeventyToEighty,
    #[serde(rename = "0.80–0.90")]
    EightyToNinety,
    #[serde(rename = "0.90–1.00")]
    NinetyToHundred,
}

impl ConfidenceBand {
    pub const ALL: [ConfidenceBand; 6] = [
        ConfidenceBand::FortyToFifty,
        ConfidenceBand::FiftyToSixty,
        ConfidenceBand::SixtyToSeventy,
        ConfidenceBand::SeventyToEighty,
        ConfidenceBand::EightyToNinety,
        ConfidenceBand::NinetyToHundred,
    ];

    pub fn index(self) -> usize {
        match self {
            ConfidenceBand::FortyToFifty => 0,
            ConfidenceBand::FiftyToSixty => 1,
            ConfidenceBand::SixtyToSeventy => 2,
            ConfidenceBand::SeventyToEighty => 3,
            ConfidenceBand::EightyToNinety => 4,
            ConfidenceBand::NinetyToHundred => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceBand::FortyToFifty => "0.40–0.50",
            ConfidenceBand::FiftyToSixty => "0.50–0.60",
            ConfidenceBand::SixtyToSeventy => "0.60–0.70",
            ConfidenceBand::SeventyToEighty => "0.70–0.80",
            ConfidenceBand::EightyToNinety => "0.80–0.90",
            ConfidenceBand::NinetyToHundred => "0.90–1.00",
        }
    }

    /// Lower edge only, for narrow bar charts.
    pub fn short_label(self) -> &'static str {
        match self {
            ConfidenceBand::FortyToFifty => ".40",
            ConfidenceBand::FiftyToSixty => ".50",
            ConfidenceBand::SixtyToSeventy => ".60",
            ConfidenceBand::SeventyToEighty => ".70",
            ConfidenceBand::EightyToNinety => ".80",
            ConfidenceBand::NinetyToHundred => ".90",
        }
    }

    /// `(lower, upper)` edges of this band.
    pub fn bounds(self) -> (f64, f64) {
        let i = self.index();
        (EDGES[i], EDGES[i + 1])
    }

    /// Band containing `confidence`, or `None` outside [0.40, 1.00] (and for NaN).
    pub fn classify(confidence: f64) -> Option<Self> {
        if confidence == EDGES[0] {
            return Some(ConfidenceBand::FortyToFifty);
        }
        Self::ALL.into_iter().find(|band| {
            let (lo, hi) = band.bounds();
            confidence > lo && confidence <= hi
        })
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn right_edges_close_the_lower_band() {
        assert_eq!(ConfidenceBand::classify(0.50), Some(ConfidenceBand::FortyToFifty));
        assert_eq!(ConfidenceBand::classify(0.501), Some(ConfidenceBand::FiftyToSixty));
        assert_eq!(ConfidenceBand::classify(0.6), Some(ConfidenceBand::FiftyToSixty));
        assert_eq!(ConfidenceBand::classify(1.0), Some(ConfidenceBand::NinetyToHundred));
    }

    #[test]
    fn lowest_edge_is_inclusive() {
        assert_eq!(ConfidenceBand::classify(0.40), Some(ConfidenceBand::FortyToFifty));
    }

    #[test]
    fn out_of_domain_has_no_band() {
        assert_eq!(ConfidenceBand::classify(0.3999), None);
        assert_eq!(ConfidenceBand::classify(1.0001), None);
        assert_eq!(ConfidenceBand::classify(f64::NAN), None);
    }

    #[test]
    fn labels_serialize_as_ranges() {
        let json = serde_json::to_string(&ConfidenceBand::SeventyToEighty).unwrap();
        assert_eq!(json, "\"0.70–0.80\"");
    }

    #[test]
    fn index_matches_all_order() {
        for (i, band) in ConfidenceBand::ALL.iter().enumerate() {
            assert_eq!(band.index(), i);
        }
    }

    proptest! {
        #[test]
        fn domain_values_land_in_exactly_one_band(c in 0.4f64..=1.0) {
            let hits = ConfidenceBand::ALL
                .iter()
                .filter(|b| {
                    let (lo, hi) = b.bounds();
                    (c > lo || (b.index() == 0 && c == lo)) && c <= hi
                })
                .count();
            prop_assert_eq!(hits, 1);
            prop_assert!(ConfidenceBand::classify(c).is_some());
        }
    }
}
