//! HTTP adapter for auth endpoints.
//!
//! - `POST /api/auth/signup` - Create an account
//! - `POST /api/auth/signin` - Sign in and link a paid subscription
//! - `POST /api/auth/signout` - Revoke the session
//! - `GET /api/auth/subscription` - Current subscription and access flag
//! - `POST /api/analytics/events` - Record a user action

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;
