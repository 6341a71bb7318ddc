//! HTTP adapter for the Kirvano payment webhook.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::webhook_routes;
