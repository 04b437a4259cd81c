//! API clients for external services
//!
//! - TMDB: TV metadata, season listings and search
//! - Cache: time-based response cache shared by the client

pub mod cache;
pub mod tmdb;

pub use cache::ResponseCache;
pub use tmdb::{Credentials, TmdbClient, TmdbError};
