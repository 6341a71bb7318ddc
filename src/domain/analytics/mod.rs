//! Analytics domain module.
//!
//! Append-only user activity events. They are written best-effort and never
//! read back by the portal.

mod event;

pub use event::{AnalyticsEvent, UserAction, SIGN_IN_PAGE, SIGN_UP_PAGE};
