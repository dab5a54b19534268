//! HTTP surface of the search service.
//!
//! ## Endpoints
//!
//! - `GET /search?q=<query>&top_k=<n>` — ranked agents as a JSON array
//! - `GET /health` — liveness probe
//!
//! Every response allows any origin.

use std::sync::Arc;

use agent_search::{AgentSource, RankConfig, SubgraphSource};
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::{Router, middleware};
use serde::Deserialize;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::error::Result;

struct AppState<S> {
    source: Arc<S>,
    ranking: RankConfig,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            ranking: self.ranking.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    top_k: Option<String>,
}

/// Build the service router over any candidate source.
pub fn router<S: AgentSource + 'static>(source: Arc<S>, ranking: RankConfig) -> Router {
    let state = AppState { source, ranking };
    Router::new()
        .route("/search", get(search_agents::<S>))
        .route("/health", get(health))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the subgraph client cannot be built or the
/// listener cannot be bound.
pub async fn run(config: ServiceConfig) -> Result<()> {
    let source = Arc::new(SubgraphSource::new(config.subgraph)?);
    let listener = TcpListener::bind(config.server.bind_addr()).await?;
    let local_addr = listener.local_addr()?;

    let app = router(source, config.ranking);
    tracing::info!("agent search listening on http://{local_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}

async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

async fn search_agents<S: AgentSource + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.as_deref().unwrap_or_default().trim();
    if query.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing query parameter 'q'");
    }

    let mut ranking = state.ranking.clone();
    if let Some(raw) = params.top_k.as_deref() {
        match raw.trim().parse::<usize>() {
            Ok(top_k) if top_k > 0 => ranking.top_k = top_k,
            _ => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "Query parameter 'top_k' must be a positive integer",
                );
            }
        }
    }

    match agent_search::search(query, state.source.as_ref(), &ranking).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "search request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
