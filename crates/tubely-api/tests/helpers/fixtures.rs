//! Test fixtures: image blobs and upload forms.

use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// PNG signature padded to exactly `len` bytes. Content is never sniffed, so this
/// is enough to exercise size-sensitive paths.
pub fn png_of_len(len: usize) -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.resize(len, 0);
    data
}

/// JPEG start/end markers around a few filler bytes.
pub fn create_minimal_jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0xFF, 0xD9]
}

/// File part with a declared media type.
pub fn file_part(content_type: &str, data: &[u8]) -> Part {
    Part::bytes(Bytes::from(data.to_vec()))
        .file_name("thumbnail.bin")
        .mime_type(content_type)
}

/// Form with a single `thumbnail` file part.
pub fn thumbnail_form(content_type: &str, data: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part("thumbnail", file_part(content_type, data))
}

/// Boundary of the hand-encoded body below.
pub const RAW_BOUNDARY: &str = "tubely-test-boundary-7MA4YWxkTrZu0gW";

/// `Content-Type` header value for [`thumbnail_without_content_type`].
pub fn raw_multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", RAW_BOUNDARY)
}

/// A `thumbnail` file part that carries no `Content-Type` header at all.
/// `MultipartForm` always sets one, so this body is encoded by hand.
pub fn thumbnail_without_content_type(data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"thumbnail\"; filename=\"thumb.png\"\r\n\r\n",
        RAW_BOUNDARY
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", RAW_BOUNDARY).as_bytes());
    body
}
