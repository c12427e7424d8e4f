//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use tubely_core::{Config, ThumbnailBackend};

/// Validate critical configuration values
///
/// Re-runs `Config::validate` (the config may have been built by hand, e.g. in
/// tests) and warns about settings that work but are unsuitable for production.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    // Validate database connection settings
    if config.database_url().is_some() {
        if config.db_max_connections() == 0 {
            return Err(anyhow::anyhow!("Database max connections cannot be 0"));
        }
        if config.db_timeout_seconds() == 0 {
            return Err(anyhow::anyhow!("Database timeout cannot be 0"));
        }
    } else if is_production {
        tracing::warn!("No DATABASE_URL in production - video records will not survive a restart");
    }

    if is_production && config.thumbnail_backend() == ThumbnailBackend::Memory {
        tracing::warn!(
            "In-memory thumbnail store in production - thumbnails will not survive a restart"
        );
    }

    if config.max_upload_size_bytes() > 100 * 1024 * 1024 {
        tracing::warn!(
            max_upload_size_bytes = config.max_upload_size_bytes(),
            "Upload limit above 100 MB - multipart bodies are buffered in memory"
        );
    }

    if config.public_base_url().contains("localhost") && is_production {
        tracing::warn!(
            public_base_url = %config.public_base_url(),
            "PUBLIC_BASE_URL points at localhost in production - thumbnail URLs will not resolve for clients"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server_port: 8091,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            jwt_secret: "k".repeat(32),
            database_url: None,
            db_max_connections: 10,
            db_timeout_seconds: 30,
            thumbnail_backend: ThumbnailBackend::Local,
            assets_root: "./assets".to_string(),
            public_base_url: "http://localhost:8091".to_string(),
            max_upload_size_bytes: 10 * 1024 * 1024,
            allowed_thumbnail_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        }
    }

    #[test]
    fn accepts_development_defaults() {
        assert!(validate_config(&config()).is_ok());
    }

    #[test]
    fn rejects_zero_pool_with_database() {
        let mut config = config();
        config.database_url = Some("postgres://localhost/tubely".to_string());
        config.db_max_connections = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_wildcard_cors_in_production() {
        let mut config = config();
        config.environment = "production".to_string();
        assert!(validate_config(&config).is_err());

        config.cors_origins = vec!["https://tubely.example".to_string()];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_short_secret() {
        let mut config = config();
        config.jwt_secret = "short".to_string();
        assert!(validate_config(&config).is_err());
    }
}
