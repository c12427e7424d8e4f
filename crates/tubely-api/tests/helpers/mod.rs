//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p tubely-api`. The video repository is
//! the in-memory implementation, so no database is needed; the local thumbnail
//! store writes into a temporary directory.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::MultipartForm;
use axum_test::{TestResponse, TestServer};
use bytes::Bytes;
use chrono::Duration;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::jwt::issue_token;
use tubely_api::setup::routes;
use tubely_api::state::AppState;
use tubely_core::models::{CreateVideoParams, Video};
use tubely_core::{Config, ThumbnailBackend};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_storage::{create_thumbnail_store, ThumbnailStore};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const TEST_BASE_URL: &str = "http://localhost:8091";
/// Small body limit so oversize uploads are cheap to build.
pub const TEST_MAX_UPLOAD_BYTES: usize = 16 * 1024;

/// Test application: server, collaborators and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub videos: InMemoryVideoRepository,
    pub store: Arc<dyn ThumbnailStore>,
    pub config: Config,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn assets_root(&self) -> &Path {
        Path::new(self.config.assets_root())
    }

    /// Seed a video owned by `owner`.
    pub async fn create_video(&self, owner: Uuid) -> Video {
        self.videos
            .create_video(CreateVideoParams {
                title: "Boot camp".to_string(),
                description: "How to lace boots".to_string(),
                user_id: owner,
            })
            .await
            .expect("Failed to create test video")
    }

    pub async fn reload_video(&self, id: Uuid) -> Video {
        self.videos
            .get_video(id)
            .await
            .expect("lookup failed")
            .expect("video missing")
    }

    /// Files written under the assets root.
    pub fn asset_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.assets_root())
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    /// POST a multipart form to the upload route as `user_id`.
    pub async fn upload_as(
        &self,
        video_id: &str,
        user_id: Uuid,
        form: MultipartForm,
    ) -> TestResponse {
        self.server
            .post(&upload_path(video_id))
            .add_header("Authorization", format!("Bearer {}", token_for(user_id)))
            .multipart(form)
            .await
    }

    /// POST a raw body with the given content type to the upload route as `user_id`.
    pub async fn upload_raw_as(
        &self,
        video_id: &str,
        user_id: Uuid,
        content_type: &str,
        body: Vec<u8>,
    ) -> TestResponse {
        self.server
            .post(&upload_path(video_id))
            .add_header("Authorization", format!("Bearer {}", token_for(user_id)))
            .content_type(content_type)
            .bytes(Bytes::from(body))
            .await
    }
}

pub fn upload_path(video_id: &str) -> String {
    format!("/api/thumbnail_upload/{}", video_id)
}

/// Valid one-hour token for `user_id`.
pub fn token_for(user_id: Uuid) -> String {
    issue_token(user_id, TEST_JWT_SECRET, Duration::hours(1)).expect("Failed to issue token")
}

/// Strip the public base URL so a thumbnail URL can be requested from the test server.
pub fn route_of(url: &str) -> &str {
    url.strip_prefix(TEST_BASE_URL).unwrap_or(url)
}

pub fn create_test_config(
    backend: ThumbnailBackend,
    assets_root: &Path,
    allowed_types: &[&str],
) -> Config {
    Config {
        server_port: 8091,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        jwt_secret: TEST_JWT_SECRET.to_string(),
        database_url: None,
        db_max_connections: 1,
        db_timeout_seconds: 5,
        thumbnail_backend: backend,
        assets_root: assets_root.to_string_lossy().to_string(),
        public_base_url: TEST_BASE_URL.to_string(),
        max_upload_size_bytes: TEST_MAX_UPLOAD_BYTES,
        allowed_thumbnail_types: allowed_types.iter().map(|t| t.to_string()).collect(),
    }
}

/// Setup test app with an in-memory repository and the given thumbnail store.
pub async fn setup_test_app(backend: ThumbnailBackend) -> TestApp {
    setup_test_app_with_types(backend, &["image/jpeg", "image/png"]).await
}

/// Like [`setup_test_app`], accepting only `allowed_types` for thumbnails.
pub async fn setup_test_app_with_types(
    backend: ThumbnailBackend,
    allowed_types: &[&str],
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(backend, &temp_dir.path().join("assets"), allowed_types);

    let videos = InMemoryVideoRepository::new();
    let store = create_thumbnail_store(&config)
        .await
        .expect("Failed to create thumbnail store");

    let state = Arc::new(AppState::new(
        &config,
        Arc::new(videos.clone()),
        store.clone(),
    ));
    let router = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        videos,
        store,
        config,
        _temp_dir: temp_dir,
    }
}
