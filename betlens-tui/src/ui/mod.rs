//! Top-level UI layout — header, threshold slider, dashboard body, status bar.

pub mod bets_table;
pub mod charts;
pub mod metrics;
pub mod overlays;
pub mod status_bar;
pub mod widgets;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, Overlay, RunState, StatusLevel};
use crate::theme;
use crate::ui::widgets::slider::Slider;

pub const TITLE: &str = "Serie A prediction model performance";

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_slider(f, chunks[1], app);

    match &app.run {
        RunState::Halted { message, level } => render_halt(f, chunks[2], message, *level),
        RunState::Ready(_) => render_dashboard(f, chunks[2], app),
    }

    status_bar::render(f, chunks[3], app);

    match app.overlay {
        Overlay::OpenFile => overlays::render_open_file(f, chunks[2], &app.path_input),
        Overlay::Help => overlays::render_help(f, chunks[2]),
        Overlay::None => {}
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled(format!(" {TITLE} "), theme::accent_bold())];
    if let Some(ds) = &app.dataset {
        spans.push(Span::styled(
            format!("| {} ", ds.source.display()),
            theme::secondary(),
        ));
        if let Some(at) = app.loaded_at {
            spans.push(Span::styled(
                format!("| loaded {} ", at.format("%H:%M:%S")),
                theme::muted(),
            ));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_slider(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Confidence threshold ")
        .title_style(theme::accent_bold());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let slider = Slider::new(app.selection.threshold)
        .suffix(format!("  gate: {}  [h/l]adjust [g]ate", app.selection.gate.label()));
    f.render_widget(slider, inner);
}

fn render_halt(f: &mut Frame, area: Rect, message: &str, level: StatusLevel) {
    let (style, hint) = match level {
        StatusLevel::Error => (theme::negative(), "Press o to load another file or r to retry."),
        _ => (theme::accent(), "Press o to load a CSV file."),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), style)),
        Line::from(""),
        Line::from(Span::styled(hint, theme::muted())),
    ];
    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(analysis) = app.analysis() else {
        return;
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Min(5),
        ])
        .split(area);

    metrics::render(f, rows[0], &analysis.summary);
    charts::render(f, rows[1], &analysis.buckets);
    bets_table::render(f, rows[2], &analysis.bets, app.table_scroll);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
