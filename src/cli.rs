//! CLI - Command Line Interface for Vertica
//!
//! Every screen of the TUI has a scriptable counterpart, and `serve`
//! exposes the same data over HTTP. Output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! vertica                          # interactive TUI
//! vertica --open /tv/1396          # TUI starting on a show page
//! vertica search "the crown" --json
//! vertica home --section top-rated
//! vertica show 1396
//! vertica serve --bind 0.0.0.0:3000
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::SEARCH_RESULT_LIMIT;
use crate::models::{parse_show_id, Route};
use crate::pages::HomeSection;

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit status, stable across releases so scripts can branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// Anything not covered below (terminal or I/O failure)
    Error = 1,
    /// Bad show id or malformed flag
    InvalidArgs = 2,
    /// TMDB unreachable or answered with a non-404 failure
    NetworkError = 3,
    /// TMDB answered 404
    NotFound = 4,
    /// Missing credential or bad config file
    ConfigError = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Vertica - TV show discovery in the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "vertica",
    version,
    about = "TV show discovery backed by TMDB",
    long_about = "Browse trending, top rated and airing-today TV shows, search \
                  the catalogue and read episode guides.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation, or `serve` for the HTTP API.",
    after_help = "EXAMPLES:\n\
                  vertica                          Launch interactive TUI\n\
                  vertica --open /tv/1396          Start on a show page\n\
                  vertica search \"the crown\"       Search for shows\n\
                  vertica show 1396 --json         Show page as JSON\n\
                  vertica serve                    Run the HTTP API\n\n\
                  ENVIRONMENT:\n\
                  TMDB_ACCESS_TOKEN                Bearer token (preferred)\n\
                  TMDB_API_KEY                     v3 API key"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Route to open the TUI on ("/" or "/tv/<id>")
    #[arg(long, default_value = "/", value_parser = parse_route)]
    pub open: Route,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

fn parse_route(raw: &str) -> Result<Route, String> {
    match Route::parse(raw) {
        Route::NotFound => Err(format!("unknown route '{}'", raw)),
        route => Ok(route),
    }
}

impl Cli {
    /// A subcommand was given; otherwise the TUI runs
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// `--json`, or stdout is piped
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve(ServeCmd),

    /// Search for TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Trending, top rated and airing-today lists
    Home(HomeCmd),

    /// Show details and first season episodes
    #[command(visible_alias = "tv")]
    Show(ShowCmd),
}

#[derive(Args, Debug)]
pub struct ServeCmd {
    /// Address to listen on (overrides config)
    #[arg(long, short = 'b')]
    pub bind: Option<String>,
}

#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value_t = SEARCH_RESULT_LIMIT)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct HomeCmd {
    /// Only print one section
    #[arg(long, short = 's', value_enum)]
    pub section: Option<SectionArg>,

    /// Maximum shows per section
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionArg {
    Trending,
    TopRated,
    AiringToday,
}

impl From<SectionArg> for HomeSection {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Trending => HomeSection::Trending,
            SectionArg::TopRated => HomeSection::TopRated,
            SectionArg::AiringToday => HomeSection::AiringToday,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowCmd {
    /// TMDB show id (digits only)
    #[arg(required = true)]
    pub id: String,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Where command results and diagnostics are written
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data wrapped in the JSON envelope
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print a line of human-readable output
    pub fn line(&self, msg: impl std::fmt::Display) {
        println!("{}", msg);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Show ID Validation
// =============================================================================

/// Validate a show id argument (digits only)
pub fn validate_show_id(id: &str) -> Result<u64, &'static str> {
    parse_show_id(id).ok_or("Invalid show id (expected digits only)")
}

// =============================================================================
// Tests
// =============================================================================
