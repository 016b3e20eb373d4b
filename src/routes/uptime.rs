//! Uptime endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct UptimeResponse {
    uptime_seconds: u64,
}

/// Uptime handler.
///
/// Reports whole seconds elapsed since process start, truncated. `Instant`
/// is monotonic, so the value never decreases within a process lifetime.
pub async fn uptime(State(state): State<AppState>) -> Json<UptimeResponse> {
    let uptime_seconds = state.started_at.elapsed().as_secs();
    tracing::debug!(uptime_seconds, "Reporting uptime");
    Json(UptimeResponse { uptime_seconds })
}
