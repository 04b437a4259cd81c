//! HTTP surface
//!
//! - `GET /api/search?q=` - passthrough to TMDB search
//! - `GET /api/home` - composed home page
//! - `GET /tv/{id}` - composed show page

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::TmdbClient;

#[derive(Clone)]
pub struct ServerState {
    pub client: Arc<TmdbClient>,
}

pub fn router(client: Arc<TmdbClient>) -> Router {
    Router::new()
        .route("/api/search", get(handlers::search))
        .route("/api/home", get(handlers::home))
        .route("/tv/{id}", get(handlers::show))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(ServerState { client })
}

/// Serve until Ctrl+C
pub async fn serve(bind: &str, client: Arc<TmdbClient>) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!(addr = %listener.local_addr()?, "vertica listening");

    axum::serve(listener, router(client))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
