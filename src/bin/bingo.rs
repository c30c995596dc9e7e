use bingo_tracker::store::FileStore;
use bingo_tracker::tui::{app::AppState, controller};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::fs::{self, File};
use std::io::{self, IsTerminal, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const STORE_FILE: &str = "store.json";
const LOG_FILE: &str = "bingo-tracker.log";

/// `$BINGO_TRACKER_HOME`, else `~/.bingo-tracker`, else `./.bingo-tracker`.
fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("BINGO_TRACKER_HOME") {
        return PathBuf::from(dir);
    }
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bingo-tracker")
}

// Logs go to a file; stderr would tear the alternate screen.
fn init_logging(dir: &Path) -> io::Result<WorkerGuard> {
    fs::create_dir_all(dir)?;
    let file = File::create(dir.join(LOG_FILE))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();
    Ok(guard)
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "bingo-tracker TUI requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            bingo_tracker::VERSION
        );
        return Ok(());
    }
    let dir = data_dir();
    let _log_guard = init_logging(&dir)?;
    let mut store = FileStore::open(dir.join(STORE_FILE)).map_err(io::Error::other)?;
    log::info!("bingo-tracker {} using {}", bingo_tracker::VERSION, store.path().display());
    let mut app = AppState::load(&store).map_err(io::Error::other)?;
    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);

    let res = controller::run(&mut terminal, &mut app, &mut store, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
