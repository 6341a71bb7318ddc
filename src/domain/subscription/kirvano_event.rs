//! Payload posted by the Kirvano checkout webhook.
//!
//! Only the fields the portal acts on are modelled; anything else in the body
//! is ignored. Field types are not enforced at parse time: a body that is a
//! JSON object is accepted as-is and each accessor interprets its field.
//! `amount` arrives either as a JSON string (`"29.90"`) or number, and
//! `transaction_id` as a string or number.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

use crate::domain::foundation::{Email, ValidationError};

/// `payment_status` value that activates a subscription.
pub const PAID_STATUS: &str = "paid";

/// Largest amount the `payment_amount NUMERIC(12, 2)` column can hold.
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Webhook body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KirvanoEvent {
    #[serde(default)]
    pub email: Value,
    #[serde(default)]
    pub payment_status: Value,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub transaction_id: Value,
}

impl KirvanoEvent {
    /// Parses a raw request body. Fails only when the body is not a JSON object.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// True only for the exact string `"paid"`.
    pub fn is_paid(&self) -> bool {
        self.payment_status.as_str() == Some(PAID_STATUS)
    }

    /// Status as received, for logging and acknowledgement.
    pub fn payment_status(&self) -> Option<String> {
        match &self.payment_status {
            Value::Null => None,
            Value::String(status) => Some(status.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Buyer e-mail. Required once the event is paid.
    pub fn email(&self) -> Result<Email, ValidationError> {
        match &self.email {
            Value::String(raw) => Email::parse(raw),
            Value::Null => Err(ValidationError::empty_field("email")),
            other => Err(ValidationError::invalid_format(
                "email",
                format!("expected a string, got {}", other),
            )),
        }
    }

    /// Payment amount, `None` when absent or blank.
    pub fn amount(&self) -> Result<Option<Decimal>, ValidationError> {
        let parsed = match &self.amount {
            Value::Null => return Ok(None),
            Value::String(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                parse_decimal(text)?
            }
            Value::Number(number) => parse_number(number)?,
            other => return Err(invalid_amount(&other.to_string())),
        };

        if parsed.is_sign_negative() {
            return Err(ValidationError::invalid_format(
                "amount",
                "amount cannot be negative",
            ));
        }
        if parsed > max_amount() {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("amount exceeds {}", max_amount()),
            ));
        }
        Ok(Some(parsed))
    }

    /// Processor transaction id, `None` when absent or blank.
    pub fn transaction_id(&self) -> Option<String> {
        let raw = match &self.transaction_id {
            Value::String(id) => id.trim().to_string(),
            Value::Number(number) => number.to_string(),
            _ => return None,
        };
        Some(raw).filter(|id| !id.is_empty())
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| invalid_amount(text))
}

fn parse_number(number: &serde_json::Number) -> Result<Decimal, ValidationError> {
    if let Some(int) = number.as_i64() {
        return Ok(Decimal::from(int));
    }
    if let Some(int) = number.as_u64() {
        return Ok(Decimal::from(int));
    }
    parse_decimal(&number.to_string())
}

fn invalid_amount(raw: &str) -> ValidationError {
    ValidationError::invalid_format("amount", format!("'{}' is not a number", raw))
}
