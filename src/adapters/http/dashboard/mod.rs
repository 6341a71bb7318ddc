//! Dashboard HTTP adapter module.

pub mod handlers;
pub mod routes;

pub use routes::dashboard_routes;
