//! Vertica - TV show discovery backed by TMDB
//!
//! Browse trending, top rated and airing-today shows, search the catalogue
//! with a debounced search box and read episode guides, in the terminal or
//! over a small HTTP API.
//!
//! # Modules
//!
//! - `models` - Show, episode and route types
//! - `api` - TMDB client and response cache
//! - `config` - Config file and resolved settings
//! - `search` - Debounced search box and lookup sources
//! - `pages` - Home and show page composition
//! - `server` - HTTP routes
//! - `ui` - TUI components
//! - `app` - Application state and navigation

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod pages;
pub mod search;
pub mod server;
pub mod ui;

// Re-export commonly used types
pub use models::{Episode, Route, SeasonDetail, ShowDetail, ShowSummary};

pub use api::{Credentials, TmdbClient, TmdbError};
pub use app::{App, AppState};
pub use config::{Config, Settings};
pub use search::SearchBox;
