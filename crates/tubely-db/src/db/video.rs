//! Video repository: lookups and updates for the videos table.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tubely_core::models::{CreateVideoParams, Video};
use tubely_core::AppError;
use uuid::Uuid;

use crate::traits::VideoRepository;

const VIDEO_COLUMNS: &str =
    "id, created_at, updated_at, thumbnail_url, video_url, title, description, user_id";

/// Postgres-backed video repository.
#[derive(Clone)]
pub struct VideoRepositoryPg {
    pool: PgPool,
}

impl VideoRepositoryPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for VideoRepositoryPg {
    #[tracing::instrument(skip(self), fields(db.table = "videos"))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let query = format!("SELECT {} FROM videos WHERE id = $1", VIDEO_COLUMNS);
        sqlx::query_as::<Postgres, Video>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::repository_lookup(e.to_string()))
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", video_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET thumbnail_url = $2,
                video_url = $3,
                title = $4,
                description = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(video.id)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::repository_update(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::repository_update(format!(
                "video {} no longer exists",
                video.id
            )));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, params), fields(db.table = "videos", user_id = %params.user_id))]
    async fn create_video(&self, params: CreateVideoParams) -> Result<Video, AppError> {
        let video = Video::new(params);
        let query = format!(
            r#"
            INSERT INTO videos (id, created_at, updated_at, title, description, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        );

        sqlx::query_as::<Postgres, Video>(&query)
            .bind(video.id)
            .bind(video.created_at)
            .bind(video.updated_at)
            .bind(&video.title)
            .bind(&video.description)
            .bind(video.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::repository_update(e.to_string()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::repository_lookup(e.to_string()))
    }
}
