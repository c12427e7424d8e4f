//! Configuration module
//!
//! Runtime configuration for the thumbnail service: HTTP server, token secret,
//! video database and thumbnail store settings. Values come from the process
//! environment, optionally seeded from a `.env` file.

use std::env;

use crate::constants::{DEFAULT_ALLOWED_THUMBNAIL_TYPES, DEFAULT_MAX_UPLOAD_SIZE_MB};
use crate::storage_types::ThumbnailBackend;

const SERVER_PORT: u16 = 8091;
const DB_MAX_CONNECTIONS: u32 = 10;
const DB_TIMEOUT_SECS: u64 = 30;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    /// Postgres connection string. When unset the API falls back to an
    /// in-memory video repository.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub thumbnail_backend: ThumbnailBackend,
    pub assets_root: String,
    /// Prefix of every thumbnail URL handed out to clients.
    pub public_base_url: String,
    pub max_upload_size_bytes: usize,
    pub allowed_thumbnail_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let server_port = env::var("PORT")
            .ok()
            .map(|p| {
                p.parse::<u16>()
                    .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))
            })
            .transpose()?
            .unwrap_or(SERVER_PORT);

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable must be set"))?;

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .map(|s| {
                s.trim().parse::<u32>().map_err(|e| {
                    anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid number: {}", e)
                })
            })
            .transpose()?
            .unwrap_or(DB_MAX_CONNECTIONS);

        let thumbnail_backend = env::var("THUMBNAIL_STORE")
            .ok()
            .map(|s| s.parse::<ThumbnailBackend>())
            .transpose()?
            .unwrap_or(ThumbnailBackend::Local);

        let assets_root = env::var("ASSETS_ROOT").unwrap_or_else(|_| "./assets".to_string());

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", server_port))
            .trim_end_matches('/')
            .to_string();

        let max_upload_size_bytes =
            parse_max_upload_size(env::var("MAX_UPLOAD_SIZE_MB").ok().as_deref())?;

        let allowed_thumbnail_types = env::var("ALLOWED_THUMBNAIL_TYPES")
            .map(|s| {
                s.split(',')
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                DEFAULT_ALLOWED_THUMBNAIL_TYPES
                    .iter()
                    .map(|t| t.to_string())
                    .collect()
            });

        let config = Config {
            server_port,
            environment,
            cors_origins,
            jwt_secret,
            database_url,
            db_max_connections,
            db_timeout_seconds: DB_TIMEOUT_SECS,
            thumbnail_backend,
            assets_root,
            public_base_url,
            max_upload_size_bytes,
            allowed_thumbnail_types,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.allowed_thumbnail_types.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_THUMBNAIL_TYPES cannot be empty"));
        }

        if let Some(bad) = self
            .allowed_thumbnail_types
            .iter()
            .find(|t| !t.starts_with("image/"))
        {
            return Err(anyhow::anyhow!(
                "ALLOWED_THUMBNAIL_TYPES may only contain image types, got '{}'",
                bad
            ));
        }

        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "PUBLIC_BASE_URL must start with http:// or https://"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn thumbnail_backend(&self) -> ThumbnailBackend {
        self.thumbnail_backend
    }

    pub fn assets_root(&self) -> &str {
        &self.assets_root
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn allowed_thumbnail_types(&self) -> &[String] {
        &self.allowed_thumbnail_types
    }
}

/// Upload limit in bytes from the `MAX_UPLOAD_SIZE_MB` value, if any.
fn parse_max_upload_size(value: Option<&str>) -> Result<usize, anyhow::Error> {
    let megabytes = value
        .map(|s| {
            s.trim().parse::<usize>().map_err(|e| {
                anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number: {}", e)
            })
        })
        .transpose()?
        .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", megabytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            server_port: 8091,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            jwt_secret: "a".repeat(32),
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
    fn accepts_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn rejects_short_jwt_secret() {
        let mut config = valid_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_postgres_database_url() {
        let mut config = valid_config();
        config.database_url = Some("sqlite://tubely.db".to_string());
        assert!(config.validate().is_err());

        config.database_url = Some("postgres://localhost/tubely".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_wildcard_cors_in_production() {
        let mut config = valid_config();
        config.environment = "production".to_string();
        assert!(config.is_production());
        assert!(config.validate().is_err());

        config.cors_origins = vec!["https://tubely.example".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_image_allow_list() {
        let mut config = valid_config();
        config.allowed_thumbnail_types = vec!["text/plain".to_string()];
        assert!(config.validate().is_err());

        config.allowed_thumbnail_types.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_upload_limit() {
        assert_eq!(
            parse_max_upload_size(None).unwrap(),
            DEFAULT_MAX_UPLOAD_SIZE_MB * 1024 * 1024
        );
        assert_eq!(parse_max_upload_size(Some(" 2 ")).unwrap(), 2 * 1024 * 1024);
    }

    #[test]
    fn rejects_bad_upload_limit() {
        assert!(parse_max_upload_size(Some("ten")).is_err());
        assert!(parse_max_upload_size(Some("-1")).is_err());
        assert!(parse_max_upload_size(Some(&usize::MAX.to_string())).is_err());
    }
}
