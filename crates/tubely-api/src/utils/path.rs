//! Path parameter extraction

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tubely_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;

/// The `{video_id}` path segment parsed as a UUID.
///
/// Rejects with `InvalidIdentifier` and our JSON error body instead of axum's
/// plain-text path rejection.
#[derive(Debug, Clone, Copy)]
pub struct VideoIdParam(pub Uuid);

impl<S> FromRequestParts<S> for VideoIdParam
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidIdentifier(e.body_text()))?;

        let id = Uuid::parse_str(&raw)
            .map_err(|e| AppError::InvalidIdentifier(format!("'{}': {}", raw, e)))?;

        Ok(VideoIdParam(id))
    }
}
