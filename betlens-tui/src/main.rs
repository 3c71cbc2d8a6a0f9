//! BetLens TUI — single-page dashboard over a predictions CSV.
//!
//! Usage: `betlens-tui [FILE] [--config PATH]`. Without a file the last one
//! opened is reused; with neither the dashboard waits for `o`.

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use betlens_core::BetLensConfig;
use betlens_tui::{input, persistence, ui, AppState};

const LOG_ENV: &str = "BETLENS_LOG";

#[derive(Parser)]
#[command(name = "betlens-tui", about = "Prediction model performance dashboard")]
struct Args {
    /// Predictions CSV to open.
    file: Option<PathBuf>,

    /// TOML config with column mapping and default selection.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let state_path = persistence::default_path();
    init_file_logging(&state_path)?;

    let config = BetLensConfig::load_or_default(args.config.as_deref())
        .with_context(|| "failed to load config")?;

    let persisted = persistence::load(&state_path);
    let (file, selection) = persistence::resolve_startup(persisted, args.file, config.selection);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(config.columns, selection, file);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(err) = persistence::save(&state_path, &persisted) {
        tracing::warn!(error = %err, "failed to save preferences");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll keeps the loop responsive without spinning.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Tracing goes to `betlens.log` next to the state file, and only when
/// `BETLENS_LOG` is set. The terminal belongs to the dashboard.
fn init_file_logging(state_path: &Path) -> Result<()> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let dir = state_path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let log_path = dir.join("betlens.log");
    let file = File::create(&log_path)
        .with_context(|| format!("failed to create {}", log_path.display()))?;

    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
