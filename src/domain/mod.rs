//! Domain layer: value objects, records and error types.
//!
//! Pure types with no I/O. Persistence and the identity provider sit behind
//! the traits in [`crate::ports`].

pub mod analytics;
pub mod dashboard;
pub mod foundation;
pub mod subscription;
