//! Bet list: threshold-filtered rows, highest confidence first.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use betlens_core::PredictionRow;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, bets: &[PredictionRow], scroll: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" Selected bets ({})  [j/k]scroll ", bets.len()))
        .title_style(theme::accent());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    if bets.is_empty() {
        lines.push(Line::from(Span::styled(
            "No bets at this threshold.",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    lines.push(Line::from(Span::styled(header(), theme::accent_bold())));

    let visible = inner.height.saturating_sub(1) as usize;
    let start = scroll.min(bets.len().saturating_sub(1));
    let end = (start + visible).min(bets.len());

    for row in &bets[start..end] {
        let result_style = if row.is_win {
            theme::positive()
        } else {
            theme::negative()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>6} {:>10} ", row.index + 1, fmt_confidence(row.confidence)),
                theme::secondary(),
            ),
            Span::styled(
                format!("{:<24} ", truncate(row.bet_outcome.as_deref().unwrap_or("-"), 24)),
                theme::secondary(),
            ),
            Span::styled(format!("{:>+8.2} ", row.units), theme::metric_color(row.units)),
            Span::styled(if row.is_win { "WIN" } else { "-" }, result_style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn header() -> String {
    format!(
        "{:>6} {:>10} {:<24} {:>8} {}",
        "Row", "Confidence", "Outcome", "Units", "Result"
    )
}

fn fmt_confidence(c: Option<f64>) -> String {
    c.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('~');
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_outcomes_are_cut() {
        assert_eq!(truncate("WIN +1.00", 24), "WIN +1.00");
        let long = "LOSS -1.00 (late equaliser in stoppage time)";
        let t = truncate(long, 24);
        assert_eq!(t.chars().count(), 24);
        assert!(t.ends_with('~'));
    }

    #[test]
    fn missing_confidence_renders_dash() {
        assert_eq!(fmt_confidence(None), "-");
        assert_eq!(fmt_confidence(Some(0.7)), "0.700");
    }
}
