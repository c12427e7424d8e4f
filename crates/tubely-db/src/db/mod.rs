//! Database repositories for data access layer
//
// Video records (thumbnail URL updates, lookups by id)
#[cfg(feature = "postgres")]
pub mod video;

#[cfg(feature = "postgres")]
pub use video::VideoRepositoryPg;
