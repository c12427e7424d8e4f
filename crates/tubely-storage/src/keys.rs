//! Shared filename and URL derivation for thumbnail stores.
//!
//! Filename format: `{video_id}.{ext}` where `ext` is the subtype of the media type
//! (`image/png` -> `png`, `image/jpeg` -> `jpeg`).

use crate::traits::{StorageError, StorageResult};
use uuid::Uuid;

/// Derive the file extension from a media type's subtype.
///
/// Parameters (`; charset=...`) are ignored. The subtype must be a plain token so
/// the result is always safe to use in a filename.
pub fn extension_for_media_type(media_type: &str) -> StorageResult<String> {
    let essence = media_type.split(';').next().unwrap_or("").trim();
    let subtype = essence
        .split_once('/')
        .map(|(_, sub)| sub.trim())
        .unwrap_or("");

    let is_token = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+' || c == '.');
    if !is_token || subtype.starts_with('.') {
        return Err(StorageError::UnsupportedMediaType(media_type.to_string()));
    }

    Ok(subtype.to_ascii_lowercase())
}

/// Map a stored file extension back to the image media type it was derived from.
///
/// Inverse of [`extension_for_media_type`] for `image/*` types; `jpg` is accepted
/// as an alias of `jpeg`.
pub fn media_type_for_extension(extension: &str) -> String {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" => "image/jpeg".to_string(),
        ext => format!("image/{}", ext),
    }
}

/// Filename of a video's thumbnail under the local store root.
pub fn thumbnail_filename(video_id: Uuid, extension: &str) -> String {
    format!("{}.{}", video_id, extension)
}

/// Join a base URL and a path without doubling the slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_the_subtype() {
        assert_eq!(extension_for_media_type("image/png").unwrap(), "png");
        assert_eq!(extension_for_media_type("image/jpeg").unwrap(), "jpeg");
        assert_eq!(
            extension_for_media_type("image/PNG; charset=binary").unwrap(),
            "png"
        );
    }

    #[test]
    fn extension_rejects_unsafe_subtypes() {
        assert!(extension_for_media_type("image").is_err());
        assert!(extension_for_media_type("image/").is_err());
        assert!(extension_for_media_type("image/../../etc").is_err());
        assert!(extension_for_media_type("image/p n g").is_err());
    }

    #[test]
    fn media_type_round_trips_for_image_types() {
        for media_type in ["image/png", "image/jpeg", "image/avif", "image/svg+xml"] {
            let ext = extension_for_media_type(media_type).unwrap();
            assert_eq!(media_type_for_extension(&ext), media_type);
        }
        assert_eq!(media_type_for_extension("JPG"), "image/jpeg");
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(
            join_url("http://localhost:8091/", "/assets/a.png"),
            "http://localhost:8091/assets/a.png"
        );
        assert_eq!(
            join_url("http://localhost:8091", "assets/a.png"),
            "http://localhost:8091/assets/a.png"
        );
    }
}
