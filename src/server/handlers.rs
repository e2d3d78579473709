use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::suggest::Candidate;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/suggest ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SuggestQuery {
    pub q: Option<String>,
}

pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
) -> Result<Json<Vec<Candidate>>, ApiError> {
    let start = Instant::now();

    let query = params.q.unwrap_or_default().trim().to_string();
    if query.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'q' parameter"));
    }

    // the external source is a blocking HTTP client
    let worker_state = state.clone();
    let worker_query = query.clone();
    let result = tokio::task::spawn_blocking(move || worker_state.session.suggest(&worker_query))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "suggestion task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Suggestion task failed")
        })?;

    tracing::info!(
        query = %query,
        count = result.cities.len(),
        cached = result.from_cache,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/suggest"
    );

    Ok(Json(result.cities))
}

// ─── GET /api/cities ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CityListQuery {
    pub q: Option<String>,
}

/// Full built-in list, or the built-in search result when `q` is given.
/// A `q` shorter than the session minimum yields an empty list.
pub async fn city_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CityListQuery>,
) -> Json<Vec<Candidate>> {
    let index = state.session.index();
    match params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) if q.chars().count() < state.session.min_query_len() => Json(Vec::new()),
        Some(q) => Json(index.search(q)),
        None => Json(index.cities()),
    }
}

// ─── GET /health ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub source: String,
    pub cached_queries: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        source: state.session.source_name().to_string(),
        cached_queries: state.session.cached_queries(),
    })
}
