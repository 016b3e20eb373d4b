//! Instance status endpoint.
//!
//! Reports the cloud instance id and the local IP address. Both lookups are
//! best-effort: a failure in either degrades to the `"not available"`
//! sentinel and the endpoint still answers 200, so orchestrators polling it
//! never see a lookup failure as an outage.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::LOOKUP_FALLBACK;
use crate::state::AppState;

/// Field order is the wire order: `instance_id` first, then `local_ip`.
#[derive(Serialize)]
pub struct StatusResponse {
    instance_id: String,
    local_ip: String,
}

/// Status handler.
///
/// Runs the metadata fetch and the local IP resolution concurrently; neither
/// blocks the other. Each failure is logged with its detail and replaced by
/// the fallback string.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let (instance_id, local_ip) =
        tokio::join!(state.metadata.instance_id(), state.local_ip.resolve());

    let instance_id = match instance_id {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch instance id");
            LOOKUP_FALLBACK.to_string()
        }
    };

    let local_ip = match local_ip {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve local IP");
            LOOKUP_FALLBACK.to_string()
        }
    };

    Json(StatusResponse {
        instance_id,
        local_ip,
    })
}
