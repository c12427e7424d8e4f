//! Thumbnail retrieval route: serves the stored bytes for a video (no auth).
//! This is the URL handed out by the in-memory store; it works for any backend.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::path::VideoIdParam;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tubely_core::AppError;

/// Serve the current thumbnail of a video with its stored media type.
#[utoipa::path(
    get,
    path = "/api/thumbnails/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = String, Path, description = "Video UUID")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes", content_type = "image/*"),
        (status = 400, description = "Invalid video ID", body = ErrorResponse),
        (status = 404, description = "No thumbnail stored for this video", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(video_id = %video_id, operation = "get_thumbnail"))]
pub async fn get_thumbnail(
    VideoIdParam(video_id): VideoIdParam,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    let thumbnail = state.thumbnails.store.get(video_id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, thumbnail.media_type.as_str())
        .header(header::CONTENT_LENGTH, thumbnail.data.len())
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(thumbnail.data))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
