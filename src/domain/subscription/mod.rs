//! Subscription domain module.
//!
//! One row per paying e-mail, activated by the payment webhook and linked to
//! an identity provider account on sign-in.
//!
//! # Module Structure
//!
//! - `plan` - tier selection from the paid amount
//! - `status` - subscription and payment status values
//! - `record` - the stored row and the activation a paid event writes
//! - `kirvano_event` - webhook payload
//! - `errors` - error taxonomy with HTTP mapping

mod errors;
mod kirvano_event;
mod plan;
mod record;
mod status;

pub use errors::SubscriptionError;
pub use kirvano_event::{max_amount, KirvanoEvent, PAID_STATUS};
pub use plan::{SubscriptionPlan, BASIC_MAX_AMOUNT, PREMIUM_MAX_AMOUNT};
pub use record::{
    generated_payment_id, PaymentActivation, Subscription, UpsertOutcome,
    DEFAULT_PAYMENT_AMOUNT, GENERATED_PAYMENT_ID_PREFIX, SUBSCRIPTION_PERIOD_DAYS,
};
pub use status::{PaymentStatus, SubscriptionStatus};
