//! BetLens TUI - terminal dashboard for prediction-model performance
//!
//! One page, rebuilt on every interaction:
//! - Confidence threshold slider and bet gate
//! - Five-cell metrics strip (bets, wins, losses, win rate, ROI)
//! - Win-rate and ROI bars per confidence band
//! - Selected bets, highest confidence first

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
