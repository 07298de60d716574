use crate::dtos::SlowResponse;
use crate::startup::AppState;
use axum::{extract::State, Json};
use rand::Rng;
use std::ops::Range;
use std::time::Duration;

pub const SLOW_ENDPOINT: &str = "/slow";

/// Seconds the slow endpoint sleeps, drawn uniformly.
pub const SLOW_DELAY_SECS: Range<f64> = 0.7..0.9;

/// Slow endpoint for exercising latency alerts
#[utoipa::path(
    get,
    path = "/slow",
    responses(
        (status = 200, description = "Answered after an artificial delay", body = SlowResponse)
    ),
    tag = "Debug"
)]
pub async fn slow_endpoint(State(state): State<AppState>) -> Json<SlowResponse> {
    let _timer = state.metrics.start_timer(SLOW_ENDPOINT);

    let delay = rand::thread_rng().gen_range(SLOW_DELAY_SECS);
    tokio::time::sleep(Duration::from_secs_f64(delay)).await;

    tracing::debug!(delay, "Slow endpoint answered");

    Json(SlowResponse {
        status: "slow".to_string(),
        delay,
    })
}
