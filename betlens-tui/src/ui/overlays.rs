//! Overlay widgets: open-file prompt and key help.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

const KEYS: &[(&str, &str)] = &[
    ("o", "Open a predictions CSV"),
    ("r", "Reload the current file"),
    ("g", "Toggle flagged bets only / all rows"),
    ("h / l", "Lower / raise threshold by 0.05"),
    ("[ / ]", "Threshold to 0.40 / 1.00"),
    ("0", "Reset threshold to 0.60"),
    ("j / k", "Scroll the bet list"),
    ("PgUp / PgDn", "Scroll by page"),
    ("?", "This help"),
    ("q / Esc", "Quit"),
];

/// Path prompt for loading a file.
pub fn render_open_file(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(70, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Open CSV [Enter]load [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Path to predictions CSV:", theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys ")
        .title_style(theme::accent_bold());

    let mut lines = vec![Line::from("")];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<12}"), theme::accent()),
            Span::styled(*action, theme::secondary()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to dismiss...",
        theme::neutral(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}
