//! Error types module
//!
//! This module provides the core error type used throughout Tubely. Every failure
//! of the thumbnail upload pipeline is one `AppError` variant, and each variant
//! describes its own HTTP presentation through [`ErrorMetadata`].

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;

use uuid::Uuid;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for client errors worth noticing (e.g. ownership violations)
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_WRITE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Which repository call failed. Lookups are reported as client errors, updates as
/// server errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryPhase {
    Lookup,
    Update,
}

impl Display for RepositoryPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RepositoryPhase::Lookup => write!(f, "lookup"),
            RepositoryPhase::Update => write!(f, "update"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("The Content-Type header of the upload is empty")]
    MissingContentType,

    #[error("Unsupported media type '{media_type}', allowed: {}", allowed.join(", "))]
    UnsupportedMediaType {
        media_type: String,
        allowed: Vec<String>,
    },

    #[error("Video not found: {0}")]
    VideoNotFound(Uuid),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Repository {phase} error: {message}")]
    Repository {
        phase: RepositoryPhase,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn repository_lookup(message: impl Into<String>) -> Self {
        AppError::Repository {
            phase: RepositoryPhase::Lookup,
            message: message.into(),
        }
    }

    pub fn repository_update(message: impl Into<String>) -> Self {
        AppError::Repository {
            phase: RepositoryPhase::Update,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidIdentifier(format!("UUID parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidIdentifier(_) => (
            400,
            "INVALID_IDENTIFIER",
            false,
            Some("Use a valid video UUID in the request path"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingCredential(_) => (
            401,
            "MISSING_CREDENTIAL",
            false,
            Some("Send an 'Authorization: Bearer <token>' header"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidCredential(_) => (
            401,
            "INVALID_CREDENTIAL",
            false,
            Some("Refresh the access token and retry"),
            false,
            LogLevel::Debug,
        ),
        AppError::MalformedRequest(_) => (
            400,
            "MALFORMED_REQUEST",
            false,
            Some("Send a multipart/form-data body with a 'thumbnail' file field"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingContentType => (
            400,
            "MISSING_CONTENT_TYPE",
            false,
            Some("Set a Content-Type on the thumbnail file part"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedMediaType { .. } => (
            400,
            "UNSUPPORTED_MEDIA_TYPE",
            false,
            Some("Upload an image of one of the allowed media types"),
            false,
            LogLevel::Debug,
        ),
        AppError::VideoNotFound(_) => (
            400,
            "VIDEO_NOT_FOUND",
            false,
            Some("Verify the video ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::Forbidden(_) => (
            401,
            "FORBIDDEN",
            false,
            Some("Only the owner of a video can change its thumbnail"),
            false,
            LogLevel::Warn,
        ),
        AppError::StorageWrite(_) => (
            500,
            "STORAGE_WRITE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Repository {
            phase: RepositoryPhase::Lookup,
            ..
        } => (
            400,
            "REPOSITORY_LOOKUP_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Repository {
            phase: RepositoryPhase::Update,
            ..
        } => (
            500,
            "REPOSITORY_UPDATE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the resource ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidIdentifier(_) => "InvalidIdentifier",
            AppError::MissingCredential(_) => "MissingCredential",
            AppError::InvalidCredential(_) => "InvalidCredential",
            AppError::MalformedRequest(_) => "MalformedRequest",
            AppError::MissingContentType => "MissingContentType",
            AppError::UnsupportedMediaType { .. } => "UnsupportedMediaType",
            AppError::VideoNotFound(_) => "NotFound",
            AppError::Forbidden(_) => "Forbidden",
            AppError::StorageWrite(_) => "StorageWriteError",
            AppError::Repository { .. } => "RepositoryError",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidIdentifier(_) => "Invalid ID".to_string(),
            AppError::MissingCredential(_) => "Couldn't find JWT".to_string(),
            AppError::InvalidCredential(_) => "Couldn't validate JWT".to_string(),
            AppError::MalformedRequest(ref msg) => msg.clone(),
            AppError::MissingContentType => "The Content-Type header is empty".to_string(),
            AppError::UnsupportedMediaType { allowed, .. } => unsupported_media_message(allowed),
            AppError::VideoNotFound(_) => "Video not found".to_string(),
            AppError::Forbidden(_) => {
                "You can't upload the thumbnail to a video that you don't own".to_string()
            }
            AppError::StorageWrite(_) => "Failed to store thumbnail".to_string(),
            AppError::Repository {
                phase: RepositoryPhase::Lookup,
                ..
            } => "Failed to retrieve the video".to_string(),
            AppError::Repository {
                phase: RepositoryPhase::Update,
                ..
            } => "Failed to update the video".to_string(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

/// "The thumbnail must be a png or a jpeg" style message built from the allow-list.
fn unsupported_media_message(allowed: &[String]) -> String {
    let kinds: Vec<String> = allowed
        .iter()
        .map(|media_type| {
            let subtype = media_type
                .split_once('/')
                .map(|(_, sub)| sub)
                .unwrap_or(media_type);
            format!("a {}", subtype)
        })
        .collect();

    match kinds.split_last() {
        None => "The thumbnail media type is not supported".to_string(),
        Some((last, [])) => format!("The thumbnail must be {}", last),
        Some((last, rest)) => format!("The thumbnail must be {} or {}", rest.join(", "), last),
    }
}
