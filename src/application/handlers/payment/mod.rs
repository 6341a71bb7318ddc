//! Payment handlers.
//!
//! ## Commands
//! - Processing Kirvano checkout webhooks

mod handle_payment_webhook;

pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
    INVALID_AMOUNT, INVALID_EMAIL, INVALID_JSON, INVALID_TOKEN, STORE_NOT_CONFIGURED,
    STORE_WRITE_FAILED, TOKEN_NOT_CONFIGURED,
};
