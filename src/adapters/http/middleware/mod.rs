//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token extractor

pub mod auth;

pub use auth::{AuthRejection, BearerToken};
