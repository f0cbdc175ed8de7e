//! `todoapp`: terminal to-do list.
//!
//! Tasks live in a local in-memory store kept in sync with a simulated
//! remote. Configuration via CLI flags, environment variables, or config
//! file (`~/.config/todoapp/config.toml`).
//!
//! ```bash
//! cargo run --bin todoapp
//!
//! # Fast remote, start on the active filter, no demo tasks
//! cargo run --bin todoapp -- --remote-latency-ms 0 --filter active --no-seed
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::runtime::Handle;
use tracing_appender::non_blocking::WorkerGuard;

use todoapp::app::App;
use todoapp::config::{AppConfig, CliArgs};
use todoapp::dispatch::TokioDispatcher;
use todoapp::repository::{CachedRepository, FakeRemoteDataSource, InMemoryDataSource};
use todoapp::ui;

type AppRepository = CachedRepository<InMemoryDataSource, FakeRemoteDataSource>;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::default()
        }
    };

    // Logs go to a file, the TUI owns stdout.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(
        remote_latency = ?config.remote_latency,
        seed_demo_tasks = config.seed_demo_tasks,
        filter = %config.default_filter,
        "todoapp starting"
    );

    let repository = Arc::new(build_repository(&config));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, repository, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("todoapp exiting");
    result
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown so buffered
/// log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("todoapp.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

fn build_repository(config: &AppConfig) -> AppRepository {
    let remote = if config.seed_demo_tasks {
        FakeRemoteDataSource::with_demo_tasks(config.remote_latency)
    } else {
        FakeRemoteDataSource::new(config.remote_latency)
    };
    CachedRepository::new(InMemoryDataSource::new(), remote)
}

/// Main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    repository: Arc<AppRepository>,
    config: &AppConfig,
) -> io::Result<()> {
    let dispatcher = Arc::new(TokioDispatcher::new(Handle::current()));
    let mut app = App::new(repository, dispatcher, config.default_filter);
    app.start();

    loop {
        // Apply whatever background work finished since the last frame.
        app.tick();

        terminal.draw(|frame| ui::draw(frame, &app))?;

        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key_event(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
