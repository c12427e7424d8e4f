//! Tubely DB Library
//!
//! Video repository abstraction and its implementations: Postgres (sqlx) for
//! deployments and an in-memory map for development and tests.

pub mod db;
#[cfg(feature = "memory")]
pub mod memory;
pub mod traits;

#[cfg(feature = "postgres")]
pub use db::VideoRepositoryPg;
#[cfg(feature = "memory")]
pub use memory::InMemoryVideoRepository;
pub use traits::VideoRepository;
