//! Subscription plan tiers and the amount thresholds that select them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Highest amount (inclusive) that buys the basic plan.
pub const BASIC_MAX_AMOUNT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Highest amount (inclusive) that buys the premium plan.
pub const PREMIUM_MAX_AMOUNT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Basic,
    Premium,
    Diamond,
}

impl SubscriptionPlan {
    /// Plan bought by a payment of `amount`.
    ///
    /// - `amount <= 20` → Basic
    /// - `20 < amount <= 30` → Premium
    /// - `amount > 30` → Diamond
    pub fn for_amount(amount: Decimal) -> Self {
        if amount <= BASIC_MAX_AMOUNT {
            SubscriptionPlan::Basic
        } else if amount <= PREMIUM_MAX_AMOUNT {
            SubscriptionPlan::Premium
        } else {
            SubscriptionPlan::Diamond
        }
    }

    /// Plan for an event that may not report an amount. Premium when absent.
    pub fn resolve(amount: Option<Decimal>) -> Self {
        amount.map_or(SubscriptionPlan::Premium, Self::for_amount)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Basic => "basic",
            SubscriptionPlan::Premium => "premium",
            SubscriptionPlan::Diamond => "diamond",
        }
    }

    /// Parses the stored column value.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(SubscriptionPlan::Basic),
            "premium" => Ok(SubscriptionPlan::Premium),
            "diamond" => Ok(SubscriptionPlan::Diamond),
            other => Err(ValidationError::invalid_format(
                "subscription_plan",
                format!("unknown plan '{}'", other),
            )),
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
