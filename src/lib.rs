//! Member Portal - subscriber access for a paid content site.
//!
//! Three parts share one store of subscriptions:
//!
//! - a Kirvano payment webhook that creates or renews a subscription per
//!   buyer e-mail,
//! - an auth gateway over a GoTrue-compatible identity provider that links
//!   those subscriptions to accounts on sign-in,
//! - a dashboard endpoint serving the subscriber overview.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
