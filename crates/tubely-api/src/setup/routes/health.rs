//! Health check handlers and response types.

use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

#[derive(serde::Serialize)]
pub(super) struct ReadinessResponse {
    pub status: String,
    pub database: String,
    pub thumbnail_store: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - video repository reachable, thumbnail store configured.
pub async fn readiness_check(state: Arc<AppState>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let mut response = ReadinessResponse {
        status: "ready".to_string(),
        database: "unknown".to_string(),
        thumbnail_store: state.thumbnails.store.backend_type().to_string(),
    };

    let mut overall_ready = true;
    match tokio::time::timeout(TIMEOUT, state.videos.ping()).await {
        Ok(Ok(())) => response.database = "ready".to_string(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Video repository readiness check failed");
            response.database = "not_ready".to_string();
            overall_ready = false;
        }
        Err(_) => {
            tracing::error!("Video repository readiness check timed out");
            response.database = "timeout".to_string();
            overall_ready = false;
        }
    }

    let status_code = if overall_ready {
        StatusCode::OK
    } else {
        response.status = "not_ready".to_string();
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
