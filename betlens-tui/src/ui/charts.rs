//! Win rate and ROI per confidence band, side by side.
//!
//! Bars are unsigned, so negative ROI is drawn by magnitude in the
//! negative colour and labelled with its signed value.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};
use ratatui::Frame;

use betlens_core::BucketStats;

use crate::theme;

const BAR_WIDTH: u16 = 6;
const BAR_GAP: u16 = 1;

pub fn render(f: &mut Frame, area: Rect, buckets: &[BucketStats]) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let win_bars = win_rate_bars(buckets);
    let win_chart = BarChart::default()
        .block(chart_block(" Win rate (%) by confidence "))
        .data(BarGroup::default().bars(&win_bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .max(100)
        .label_style(theme::muted());
    f.render_widget(win_chart, halves[0]);

    let roi_bars = roi_bars(buckets);
    let roi_chart = BarChart::default()
        .block(chart_block(" ROI (%) by confidence "))
        .data(BarGroup::default().bars(&roi_bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .max(roi_scale(buckets))
        .label_style(theme::muted());
    f.render_widget(roi_chart, halves[1]);
}

/// Largest bar height on the ROI chart, at least 1.
pub fn roi_scale(buckets: &[BucketStats]) -> u64 {
    buckets
        .iter()
        .map(|b| bar_height(b.roi))
        .max()
        .unwrap_or(0)
        .max(1)
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(title)
        .title_style(theme::accent())
}

pub fn win_rate_bars(buckets: &[BucketStats]) -> Vec<Bar<'static>> {
    buckets
        .iter()
        .map(|b| bar(b.band.short_label(), b.win_rate, theme::accent()))
        .collect()
}

pub fn roi_bars(buckets: &[BucketStats]) -> Vec<Bar<'static>> {
    buckets
        .iter()
        .map(|b| {
            let style = if b.roi < 0.0 {
                theme::negative()
            } else {
                theme::warning()
            };
            bar(b.band.short_label(), b.roi, style)
        })
        .collect()
}

fn bar(label: &'static str, value: f64, style: Style) -> Bar<'static> {
    Bar::default()
        .value(bar_height(value))
        .label(Line::from(label))
        .text_value(format!("{value:.1}"))
        .style(style)
        .value_style(Style::default().fg(Color::Black).bg(style.fg.unwrap_or(Color::Reset)))
}

fn bar_height(value: f64) -> u64 {
    value.abs().round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use betlens_core::{bucket_breakdown, PredictionRow};

    fn row(i: usize, conf: f64, outcome: &str) -> PredictionRow {
        PredictionRow::new(i, Some(conf), true, Some(outcome.to_string()), Vec::new())
    }

    #[test]
    fn negative_roi_scales_by_magnitude() {
        let rows = vec![row(0, 0.55, "LOSS -1.00"), row(1, 0.75, "WIN +0.50")];
        let buckets = bucket_breakdown(&rows);
        assert_eq!(buckets.len(), 6);
        assert_eq!(roi_scale(&buckets), 100);
        assert_eq!(roi_bars(&buckets).len(), 6);
    }

    #[test]
    fn empty_buckets_keep_a_nonzero_scale() {
        let buckets = bucket_breakdown(&Vec::<PredictionRow>::new());
        assert_eq!(roi_scale(&buckets), 1);
        assert_eq!(win_rate_bars(&buckets).len(), 6);
    }
}
