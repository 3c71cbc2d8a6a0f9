//! Metrics strip over the threshold-filtered bets.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use betlens_core::SummaryStats;

use crate::theme;

/// `(label, value, style)` for each cell, left to right.
pub fn cells(s: &SummaryStats) -> [(&'static str, String, Style); 5] {
    [
        ("Bets", s.total_bets.to_string(), theme::accent()),
        ("Wins", s.wins.to_string(), theme::positive()),
        ("Losses", s.losses.to_string(), theme::negative()),
        ("Win rate", format!("{:.1}%", s.win_rate), theme::win_rate_style(s.win_rate)),
        ("ROI", format!("{:.1}%", s.roi), theme::metric_color(s.roi)),
    ]
}

pub fn render(f: &mut Frame, area: Rect, summary: &SummaryStats) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for ((label, value, style), col) in cells(summary).into_iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(Span::styled(format!(" {label} "), theme::muted()));
        let para = Paragraph::new(Line::from(Span::styled(
            value,
            style.add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(para, *col);
    }
}
