//! API route constants
//!
//! Paths used when registering routes and in the OpenAPI annotations. The
//! thumbnail retrieval and asset prefixes live in `tubely_core::constants`
//! because the storage crate builds URLs from them.

/// Room for multipart boundaries and part headers on top of the per-file limit.
pub const MULTIPART_FRAMING_ALLOWANCE: usize = 16 * 1024;

/// Upload route, `{video_id}` is the path parameter.
pub const THUMBNAIL_UPLOAD_ROUTE: &str = "/api/thumbnail_upload/{video_id}";

/// Dynamic retrieval route for stored thumbnails.
pub const THUMBNAIL_GET_ROUTE: &str = "/api/thumbnails/{video_id}";

/// Location of the generated OpenAPI document.
pub const OPENAPI_JSON_ROUTE: &str = "/api/openapi.json";

/// RapiDoc browser for the OpenAPI document.
pub const DOCS_ROUTE: &str = "/docs";
