use crate::startup::AppState;
use axum::{extract::State, http::header, response::IntoResponse};

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, state.metrics.content_type())],
        state.metrics.render(),
    )
}
