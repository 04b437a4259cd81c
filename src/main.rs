//! Vertica - TV show discovery in the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! vertica
//!
//! # CLI mode (for automation)
//! vertica search "the crown"
//! vertica show 1396 --json
//!
//! # HTTP API
//! vertica serve --bind 127.0.0.1:3000
//! ```

use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vertica::app::{self, App};
use vertica::cli::{Cli, Command, ExitCode, Output};
use vertica::commands;
use vertica::config::{Config, Settings};
use vertica::models::Route;
use vertica::search::{EndpointSearch, SearchBox, SearchSource, TmdbSearch};
use vertica::ui;
use vertica::TmdbClient;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

const LOG_FILE: &str = "vertica.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let code = Output::new(&cli).error(e.to_string(), ExitCode::ConfigError);
            std::process::exit(code.into());
        }
    };
    let settings = Settings::from_env(&config);

    if cli.is_cli_mode() {
        let default_level = match cli.command {
            Some(Command::Serve(_)) => "info",
            _ => "warn",
        };
        init_stderr_logging(default_level);

        let exit_code = run_cli(cli, &settings).await;
        std::process::exit(exit_code.into());
    } else {
        if let Err(e) = init_file_logging() {
            eprintln!("Logging disabled: {:#}", e);
        }
        run_tui(cli.open, settings).await
    }
}

// =============================================================================
// Logging
// =============================================================================

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn init_stderr_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// TUI owns the terminal, so logs go to the cache directory instead
fn init_file_logging() -> Result<()> {
    let dir = dirs::cache_dir()
        .context("no cache directory")?
        .join("vertica");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

// =============================================================================
// CLI Mode
// =============================================================================

async fn run_cli(cli: Cli, settings: &Settings) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Serve(cmd)) => commands::serve_cmd(cmd, settings, &output).await,

        Some(Command::Search(cmd)) => commands::search_cmd(cmd, settings, &output).await,

        Some(Command::Home(cmd)) => commands::home_cmd(cmd, settings, &output).await,

        Some(Command::Show(cmd)) => commands::show_cmd(cmd, settings, &output).await,

        // Handled by the is_cli_mode check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_tui(start: Route, settings: Settings) -> Result<()> {
    let client = Arc::new(TmdbClient::from_settings(&settings));

    let source: Arc<dyn SearchSource> = match &settings.search_endpoint {
        Some(base) => Arc::new(EndpointSearch::new(base.clone())),
        None => Arc::new(TmdbSearch::new(Arc::clone(&client))),
    };
    let search = SearchBox::with_limit(source, settings.search_debounce, settings.search_limit);

    let mut app = App::new(search, start);
    if !settings.credentials.is_configured() {
        app.set_error("TMDB credentials missing: set TMDB_ACCESS_TOKEN or TMDB_API_KEY");
    }
    info!(%start, "starting tui");

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, client).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - performs effects, applies results, renders, reads keys
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: Arc<TmdbClient>) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel();

    while app.running {
        for effect in app.take_effects() {
            app::perform(effect, Arc::clone(&client), tx.clone());
        }

        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        app.tick(Instant::now());

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}
