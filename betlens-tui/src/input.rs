//! Keyboard input dispatch. Overlays see keys first, then the dashboard.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use betlens_core::Threshold;

use crate::app::{AppState, Overlay};

const PAGE: usize = 10;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::OpenFile => {
            handle_open_overlay(app, key);
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::None => {}
    }

    // 2. Dashboard keys.
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('o') => {
            app.path_input = app
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            app.overlay = Overlay::OpenFile;
        }
        KeyCode::Char('r') => {
            app.reload();
        }
        KeyCode::Char('g') => app.toggle_gate(),

        // Threshold slider
        KeyCode::Char('h') | KeyCode::Left => {
            let t = app.selection.threshold.step_down();
            app.set_threshold(t);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let t = app.selection.threshold.step_up();
            app.set_threshold(t);
        }
        KeyCode::Char('[') => app.set_threshold(Threshold::min()),
        KeyCode::Char(']') => app.set_threshold(Threshold::max()),
        KeyCode::Char('0') => app.set_threshold(Threshold::default()),

        // Bet table
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::Home => app.table_scroll = 0,
        _ => {}
    }
}

fn handle_open_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.path_input.clear();
        }
        KeyCode::Enter => {
            let path = app.path_input.trim().to_string();
            app.overlay = Overlay::None;
            app.path_input.clear();
            if path.is_empty() {
                app.set_warning("No path entered");
            } else {
                app.open(PathBuf::from(path));
            }
        }
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Char(c) => {
            app.path_input.push(c);
        }
        _ => {}
    }
}
