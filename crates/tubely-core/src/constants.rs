//! Constants shared across crates.

/// Multipart field that carries the thumbnail image.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Default media types accepted for thumbnails.
pub const DEFAULT_ALLOWED_THUMBNAIL_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Default multipart body limit in MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 10;

/// Issuer stamped on and required from access tokens.
pub const TOKEN_ISSUER: &str = "tubely-access";

/// Route prefix for static thumbnail files (filesystem store).
pub const ASSETS_ROUTE: &str = "/assets";

/// Route prefix for dynamic thumbnail retrieval (in-memory store).
pub const THUMBNAILS_ROUTE: &str = "/api/thumbnails";
