//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the member portal domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthSession, AuthenticatedUser, Registration};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{Email, SubscriptionId, UserId};
pub use timestamp::Timestamp;
