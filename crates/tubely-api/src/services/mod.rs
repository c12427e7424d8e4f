//! Business logic behind the HTTP handlers.

pub mod ownership;
pub mod upload;

pub use ownership::load_owned_video;
pub use upload::ThumbnailUploadService;
