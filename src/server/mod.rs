//! HTTP front end for the ranking session.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::suggest::types::{Result, SuggestError};
use crate::suggest::RankingSession;

pub use state::AppState;

const CACHE_PURGE_INTERVAL: Duration = Duration::from_secs(60);

pub fn build_router(session: RankingSession) -> Router {
    router(Arc::new(AppState { session }))
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/suggest", get(handlers::suggest))
        .route("/api/cities", get(handlers::city_list))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, session: RankingSession) -> Result<()> {
    let state = Arc::new(AppState { session });
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SuggestError::Server(format!("cannot bind to {}: {}", addr, e)))?;

    let purge_state = state.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(CACHE_PURGE_INTERVAL);
        loop {
            tick.tick().await;
            let purged = purge_state.session.purge_cache();
            if purged > 0 {
                tracing::debug!(purged, "expired suggestion cache entries");
            }
        }
    });

    tracing::info!(%addr, source = state.session.source_name(), "city-suggest server listening");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| SuggestError::Server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_router_serves_suggestions() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(RankingSession::offline())).await.unwrap();
        });

        let body = tokio::task::spawn_blocking(move || {
            ureq::get(&format!("http://{}/api/suggest", addr))
                .query("q", "san fra")
                .call()
                .unwrap()
                .into_string()
                .unwrap()
        })
        .await
        .unwrap();

        let cities: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(cities[0]["name"], "San Francisco");
        assert_eq!(cities[0]["searchValue"], "San Francisco");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_router_missing_query_is_400() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(RankingSession::offline())).await.unwrap();
        });

        let status = tokio::task::spawn_blocking(move || {
            match ureq::get(&format!("http://{}/api/suggest", addr)).call() {
                Err(ureq::Error::Status(code, _)) => code,
                Ok(r) => r.status(),
                Err(e) => panic!("transport error: {}", e),
            }
        })
        .await
        .unwrap();

        assert_eq!(status, 400);
    }
}
