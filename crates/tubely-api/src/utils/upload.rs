//! Multipart parsing and validation for thumbnail uploads

use axum::extract::multipart::{Field, Multipart, MultipartError};
use bytes::Bytes;
use tubely_core::AppError;

/// A thumbnail file pulled out of a multipart form, media type already validated.
#[derive(Debug, Clone)]
pub struct ThumbnailUpload {
    pub data: Bytes,
    pub media_type: String,
}

fn multipart_error(context: &str, err: MultipartError) -> AppError {
    AppError::MalformedRequest(format!("{}: {}", context, err.body_text()))
}

/// Read the first field named `field_name` from the form.
///
/// Other fields are skipped. The router caps the whole body, so a grossly oversized
/// body surfaces here as a read error; a file over `max_size` that fits in the
/// body cap is rejected by the size check. Both are reported as malformed.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    field_name: &str,
    max_size: usize,
) -> Result<(Bytes, Option<String>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Unable to parse form file", e))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        return read_file_field(field, max_size).await;
    }

    Err(AppError::MalformedRequest(format!(
        "Unable to parse form file: no '{}' field in the form",
        field_name
    )))
}

async fn read_file_field(
    field: Field<'_>,
    max_size: usize,
) -> Result<(Bytes, Option<String>), AppError> {
    let content_type = field.content_type().map(|s: &str| s.to_string());

    let data = field
        .bytes()
        .await
        .map_err(|e| multipart_error("Failed to read file data", e))?;

    if data.is_empty() {
        return Err(AppError::MalformedRequest("File is empty".to_string()));
    }
    validate_file_size(data.len(), max_size)?;

    Ok((data, content_type))
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::MalformedRequest(format!(
            "File size exceeds maximum allowed size of {} bytes",
            max_size
        )));
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate the declared media type of the file part against the allow-list and
/// return it normalized. Compares the bare MIME type only, so parameters cannot
/// be used to sneak past the check.
pub fn validate_content_type(
    content_type: Option<&str>,
    allowed_types: &[String],
) -> Result<String, AppError> {
    let content_type = content_type.map(str::trim).unwrap_or_default();
    if content_type.is_empty() {
        return Err(AppError::MissingContentType);
    }

    let normalized = normalize_mime_type(content_type).to_lowercase();
    if normalized.is_empty() {
        return Err(AppError::MissingContentType);
    }

    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(AppError::UnsupportedMediaType {
            media_type: normalized,
            allowed: allowed_types.to_vec(),
        });
    }
    Ok(normalized)
}

/// Parse a thumbnail upload: extract the file part, then validate its media type.
pub async fn parse_thumbnail_upload(
    multipart: Multipart,
    field_name: &str,
    max_size: usize,
    allowed_types: &[String],
) -> Result<ThumbnailUpload, AppError> {
    let (data, content_type) = extract_multipart_file(multipart, field_name, max_size).await?;
    let media_type = validate_content_type(content_type.as_deref(), allowed_types)?;

    tracing::debug!(
        media_type = %media_type,
        size_bytes = data.len(),
        "Parsed thumbnail upload"
    );

    Ok(ThumbnailUpload { data, media_type })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["image/jpeg".to_string(), "image/png".to_string()]
    }

    #[test]
    fn validate_content_type_accepts_allowed_types() {
        assert_eq!(
            validate_content_type(Some("image/png"), &allowed()).unwrap(),
            "image/png"
        );
        assert_eq!(
            validate_content_type(Some("IMAGE/JPEG"), &allowed()).unwrap(),
            "image/jpeg"
        );
    }

    #[test]
    fn validate_content_type_strips_parameters() {
        assert_eq!(
            validate_content_type(Some("image/png; charset=binary"), &allowed()).unwrap(),
            "image/png"
        );
    }

    #[test]
    fn validate_content_type_rejects_missing() {
        assert!(matches!(
            validate_content_type(None, &allowed()),
            Err(AppError::MissingContentType)
        ));
        assert!(matches!(
            validate_content_type(Some("   "), &allowed()),
            Err(AppError::MissingContentType)
        ));
        assert!(matches!(
            validate_content_type(Some(";charset=utf-8"), &allowed()),
            Err(AppError::MissingContentType)
        ));
    }

    #[test]
    fn validate_content_type_rejects_unlisted() {
        for media_type in ["text/plain", "image/gif", "image/jpeq", "image/png-evil"] {
            match validate_content_type(Some(media_type), &allowed()) {
                Err(AppError::UnsupportedMediaType { media_type: got, allowed }) => {
                    assert_eq!(got, media_type);
                    assert_eq!(allowed.len(), 2);
                }
                other => panic!("{} accepted: {:?}", media_type, other),
            }
        }
    }

    #[test]
    fn validate_file_size_limits() {
        assert!(validate_file_size(10, 10).is_ok());
        assert!(matches!(
            validate_file_size(11, 10),
            Err(AppError::MalformedRequest(_))
        ));
    }
}
