//! Serializable analysis configuration (TOML).
//!
//! ```toml
//! [columns]
//! confidence = 13
//! should_bet = 15
//! outcome = "bet_outcome"
//!
//! [selection]
//! threshold = 0.6
//! gate = "flagged_only"
//! ```
//!
//! Every field is optional. Omitted column entries take the positional
//! defaults; an omitted `[selection]` table leaves `selection` unset so
//! callers can fall back to their own remembered choice.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::columns::ColumnMap;
use crate::selection::Selection;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BetLensConfig {
    pub columns: ColumnMap,
    pub selection: Option<Selection>,
}

impl BetLensConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from `path` if given, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnRef;
    use crate::selection::BetGate;

    #[test]
    fn empty_config_is_default() {
        let cfg = BetLensConfig::from_toml("").unwrap();
        assert_eq!(cfg, BetLensConfig::default());
        assert_eq!(cfg.columns.confidence, ColumnRef::Index(13));
        assert_eq!(cfg.selection, None);
    }

    #[test]
    fn parses_full_config() {
        let cfg = BetLensConfig::from_toml(
            r#"
[columns]
confidence = "confidence"
should_bet = 15
outcome = "bet_outcome"

[selection]
threshold = 0.75
gate = "all_rows"
"#,
        )
        .unwrap();
        assert_eq!(cfg.columns.confidence, ColumnRef::Name("confidence".into()));
        assert_eq!(cfg.columns.should_bet, ColumnRef::Index(15));
        let selection = cfg.selection.unwrap();
        assert_eq!(selection.threshold.hundredths(), 75);
        assert_eq!(selection.gate, BetGate::AllRows);
    }

    #[test]
    fn partial_columns_keep_other_defaults() {
        let cfg = BetLensConfig::from_toml("[columns]\noutcome = \"result\"\n").unwrap();
        assert_eq!(cfg.columns.confidence, ColumnRef::Index(13));
        assert_eq!(cfg.columns.outcome, ColumnRef::Name("result".into()));
        assert_eq!(cfg.selection, None);
    }

    #[test]
    fn partial_selection_fills_defaults() {
        let cfg = BetLensConfig::from_toml("[selection]\ngate = \"all_rows\"\n").unwrap();
        let selection = cfg.selection.unwrap();
        assert_eq!(selection.gate, BetGate::AllRows);
        assert_eq!(selection.threshold.hundredths(), 60);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = BetLensConfig::from_toml("[selection]\nthreshold = 0.2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = BetLensConfig::from_file(Path::new("/nonexistent/betlens.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn roundtrips_through_toml() {
        let cfg = BetLensConfig {
            selection: Some(Selection::default()),
            ..BetLensConfig::default()
        };
        let s = toml::to_string(&cfg).unwrap();
        assert_eq!(BetLensConfig::from_toml(&s).unwrap(), cfg);
    }
}
