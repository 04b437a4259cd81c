//! Route handlers; upstream failures are logged and replaced with fixed messages

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::error::{ApiError, ApiResult};
use super::ServerState;
use crate::pages::{self, HomePage, ShowOutcome, ShowPage};

pub const SEARCH_FAILED: &str = "Failed to search shows";
pub const HOME_FAILED: &str = "Failed to load shows";
pub const SHOW_NOT_FOUND: &str = "Show Not Found";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// `GET /api/search?q=` relays TMDB's search body unchanged
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Value>> {
    let query = params.q.as_deref().unwrap_or_default().trim();
    if query.is_empty() {
        return Ok(Json(json!({ "results": [] })));
    }

    match state.client.search_shows_raw(query).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            warn!(error = %e, query, "search passthrough failed");
            Err(ApiError::internal(SEARCH_FAILED))
        }
    }
}

pub async fn home(State(state): State<ServerState>) -> ApiResult<Json<HomePage>> {
    pages::load_home(&state.client).await.map(Json).map_err(|e| {
        warn!(error = %e, "home page failed");
        ApiError::internal(HOME_FAILED)
    })
}

pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ShowPage>> {
    match pages::load_show(&state.client, &id).await {
        ShowOutcome::Found(page) => Ok(Json(*page)),
        ShowOutcome::NotFound => {
            info!(id = %id, "show not found");
            Err(ApiError::not_found(SHOW_NOT_FOUND))
        }
    }
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
