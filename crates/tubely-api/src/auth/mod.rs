//! Bearer token authentication.

pub mod jwt;
pub mod models;

pub use models::CallerIdentity;
