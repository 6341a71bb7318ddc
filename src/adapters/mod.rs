//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Identity provider (Supabase GoTrue, mock)
//! - `http` - Axum routes for the webhook, auth API and dashboard
//! - `memory` - In-memory store and analytics sink
//! - `postgres` - sqlx store and analytics sink

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
