//! HS256 access tokens
//!
//! Tokens are signed with the shared `JWT_SECRET`. `sub` carries the user id and
//! `iss` must be [`TOKEN_ISSUER`].

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tubely_core::constants::TOKEN_ISSUER;
use tubely_core::AppError;
use uuid::Uuid;

use crate::auth::models::JwtClaims;

const BEARER_PREFIX: &str = "Bearer";

/// Pull the bearer token out of the `Authorization` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::MissingCredential("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| {
            AppError::MissingCredential("Authorization header is not valid ASCII".to_string())
        })?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme == BEARER_PREFIX => Ok(token),
        _ => Err(AppError::MissingCredential(
            "Invalid authorization header format".to_string(),
        )),
    }
}

/// Validate a token and return the user id it was issued to.
pub fn validate_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let token_data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {}", e);
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::InvalidCredential("Token has expired".to_string())
            }
            jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                AppError::InvalidCredential("Invalid token issuer".to_string())
            }
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                AppError::InvalidCredential("Invalid token signature".to_string())
            }
            _ => AppError::InvalidCredential(format!("Invalid or expired token: {}", e)),
        }
    })?;

    Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::InvalidCredential("Invalid token subject".to_string()))
}

/// Sign a token for `user_id` that expires after `expires_in`.
pub fn issue_token(user_id: Uuid, secret: &str, expires_in: Duration) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = JwtClaims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}
