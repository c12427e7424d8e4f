mod service;

pub use service::ThumbnailUploadService;
