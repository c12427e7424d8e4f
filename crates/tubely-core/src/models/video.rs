use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A video record owned by a single user.
///
/// Only `thumbnail_url` is written by the upload path; the remaining metadata is
/// carried through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
}

/// Parameters for creating a video record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateVideoParams {
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
}

impl Video {
    /// Build a fresh record with no thumbnail and no video file.
    pub fn new(params: CreateVideoParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            thumbnail_url: None,
            video_url: None,
            title: params.title,
            description: params.description,
            user_id: params.user_id,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_video_has_no_thumbnail() {
        let owner = Uuid::new_v4();
        let video = Video::new(CreateVideoParams {
            title: "Boots".to_string(),
            description: "A video about boots".to_string(),
            user_id: owner,
        });

        assert!(video.thumbnail_url.is_none());
        assert!(video.video_url.is_none());
        assert!(video.is_owned_by(owner));
        assert!(!video.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let video = Video::new(CreateVideoParams {
            title: "t".to_string(),
            description: "d".to_string(),
            user_id: Uuid::new_v4(),
        });
        let json = serde_json::to_value(&video).expect("serialize");
        for key in [
            "id",
            "created_at",
            "updated_at",
            "thumbnail_url",
            "video_url",
            "title",
            "description",
            "user_id",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert!(json["thumbnail_url"].is_null());
    }
}
