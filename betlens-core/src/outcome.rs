//! Outcome string parsing: win flag and signed unit result.
//!
//! Outcomes look like `"WIN +1.91"` or `"LOSS -1.00"`. Neither function ever
//! fails; anything unrecognised degrades to "not a win" and zero units.

use std::sync::OnceLock;

use regex::Regex;

fn units_pattern() -> &'static Regex {
    static UNITS_RE: OnceLock<Regex> = OnceLock::new();
    UNITS_RE.get_or_init(|| Regex::new(r"[+-]?\d+\.\d+").expect("units pattern is valid"))
}

/// True iff the outcome contains "WIN", ignoring case.
pub fn is_win(outcome: Option<&str>) -> bool {
    outcome.is_some_and(|s| s.to_ascii_uppercase().contains("WIN"))
}

/// First signed decimal in the outcome, or 0.0 when there is none.
///
/// Integers without a decimal point do not count: `"WIN +2"` yields 0.
pub fn units(outcome: Option<&str>) -> f64 {
    outcome
        .and_then(|s| units_pattern().find(s))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
