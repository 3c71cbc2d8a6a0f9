//! Parrot/neon theme tokens for the BetLens dashboard.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, win-rate bars)
//! - **Positive**: Neon green (wins, positive units)
//! - **Negative**: Hot pink (losses, negative units, errors)
//! - **Warning**: Neon orange (ROI bars, warnings)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, disabled text)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

/// Green for >= 0, pink below.
pub fn metric_color(value: f64) -> Style {
    if value >= 0.0 {
        positive()
    } else {
        negative()
    }
}

/// Win rate in percent.
pub fn win_rate_style(win_rate: f64) -> Style {
    match win_rate {
        w if w >= 70.0 => positive(),
        w if w >= 50.0 => accent(),
        w if w >= 40.0 => neutral(),
        _ => warning(),
    }
}
