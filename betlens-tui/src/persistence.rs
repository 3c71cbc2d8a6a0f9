//! Preference persistence — JSON save/load across restarts.
//!
//! Only preferences persist (last file, threshold, gate). Derived data is
//! always rebuilt from the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use betlens_core::{BetGate, Selection, Threshold};

use crate::app::AppState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub last_file: Option<PathBuf>,
    pub threshold: Threshold,
    pub gate: BetGate,
}

/// Default location: `<config_dir>/betlens/state.json`.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("betlens")
        .join("state.json")
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Starting file and selection.
///
/// A file given on the command line wins over the remembered one. A
/// `[selection]` table from a config file wins over the remembered
/// threshold and gate; a config without one leaves them alone.
pub fn resolve_startup(
    persisted: PersistedState,
    cli_file: Option<PathBuf>,
    configured: Option<Selection>,
) -> (Option<PathBuf>, Selection) {
    let file = cli_file.or(persisted.last_file);
    let selection = configured.unwrap_or(Selection {
        gate: persisted.gate,
        threshold: persisted.threshold,
    });
    (file, selection)
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        last_file: app.file.clone(),
        threshold: app.selection.threshold,
        gate: app.selection.gate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let state = PersistedState {
            last_file: Some(PathBuf::from("/data/serie_a.csv")),
            threshold: Threshold::new(0.75).unwrap(),
            gate: BetGate::AllRows,
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.last_file, state.last_file);
        assert_eq!(loaded.threshold.hundredths(), 75);
        assert_eq!(loaded.gate, BetGate::AllRows);
    }

    #[test]
    fn startup_prefers_command_line_and_config() {
        let remembered = || PersistedState {
            last_file: Some(PathBuf::from("old.csv")),
            threshold: Threshold::new(0.85).unwrap(),
            gate: BetGate::AllRows,
        };

        let (file, sel) = resolve_startup(remembered(), None, None);
        assert_eq!(file, Some(PathBuf::from("old.csv")));
        assert_eq!(sel.threshold.hundredths(), 85);
        assert_eq!(sel.gate, BetGate::AllRows);

        let (file, sel) =
            resolve_startup(remembered(), Some(PathBuf::from("new.csv")), Some(Selection::default()));
        assert_eq!(file, Some(PathBuf::from("new.csv")));
        assert_eq!(sel, Selection::default());
    }

    #[test]
    fn columns_only_config_keeps_remembered_selection() {
        let cfg =
            betlens_core::BetLensConfig::from_toml("[columns]\noutcome = \"result\"\n").unwrap();
        let remembered = PersistedState {
            last_file: None,
            threshold: Threshold::new(0.8).unwrap(),
            gate: BetGate::AllRows,
        };
        let (_, sel) = resolve_startup(remembered, None, cfg.selection);
        assert_eq!(sel.threshold.hundredths(), 80);
        assert_eq!(sel.gate, BetGate::AllRows);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert!(loaded.last_file.is_none());
        assert_eq!(loaded.threshold, Threshold::default());
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert!(loaded.last_file.is_none());
        assert_eq!(loaded.gate, BetGate::FlaggedOnly);
    }

    #[test]
    fn out_of_range_threshold_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"last_file":null,"threshold":3.0,"gate":"all_rows"}"#).unwrap();
        let loaded = load(&path);
        assert_eq!(loaded.threshold, Threshold::default());
    }
}
