//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure; `router` wires
//! them together with the shared state and tower-http layers.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod middleware;
pub mod router;
pub mod webhook;

// Re-export key types for convenience
pub use error::{ApiError, ErrorResponse};
pub use router::{app_router, AppState};
