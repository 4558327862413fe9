use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while building pricing inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The supplied tier string is not one of `LOW`, `MEDIUM`, `HIGH`.
    #[error("invalid customer tier `{0}`")]
    InvalidTier(String),
    /// One of the prices in a triple is below zero.
    #[error("{field} cannot be negative (got {value})")]
    NegativePrice { field: &'static str, value: i64 },
}

/// Pricing category assigned to a customer.
///
/// The tier decides which of the three stored prices applies to the customer.
/// [`CustomerTier::default`] is [`CustomerTier::Low`]; callers holding a customer
/// without a tier use it explicitly before resolving a price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerTier {
    #[default]
    Low,
    Medium,
    High,
}

impl CustomerTier {
    /// Every tier in ascending order.
    pub const ALL: [CustomerTier; 3] = [
        CustomerTier::Low,
        CustomerTier::Medium,
        CustomerTier::High,
    ];

    /// Canonical upper-case representation used in storage and forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTier::Low => "LOW",
            CustomerTier::Medium => "MEDIUM",
            CustomerTier::High => "HIGH",
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerTier {
    type Err = PricingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(CustomerTier::Low),
            "MEDIUM" => Ok(CustomerTier::Medium),
            "HIGH" => Ok(CustomerTier::High),
            _ => Err(PricingError::InvalidTier(value.to_string())),
        }
    }
}

impl From<CustomerTier> for &'static str {
    fn from(value: CustomerTier) -> Self {
        value.as_str()
    }
}

/// Three stored prices of a product or variant, in the smallest currency unit.
///
/// The intended ordering is `min <= avg <= max`, but nothing here enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceTriple {
    pub min_price_cents: i64,
    pub avg_price_cents: i64,
    pub max_price_cents: i64,
}

impl PriceTriple {
    /// Build a triple, rejecting negative prices.
    pub fn new(
        min_price_cents: i64,
        avg_price_cents: i64,
        max_price_cents: i64,
    ) -> Result<Self, PricingError> {
        for (field, value) in [
            ("min price", min_price_cents),
            ("avg price", avg_price_cents),
            ("max price", max_price_cents),
        ] {
            if value < 0 {
                return Err(PricingError::NegativePrice { field, value });
            }
        }

        Ok(Self {
            min_price_cents,
            avg_price_cents,
            max_price_cents,
        })
    }
}

/// Pick the price that applies to `tier`.
pub fn resolve_price(tier: CustomerTier, prices: &PriceTriple) -> i64 {
    match tier {
        CustomerTier::Low => prices.min_price_cents,
        CustomerTier::Medium => prices.avg_price_cents,
        CustomerTier::High => prices.max_price_cents,
    }
}

/// Format an amount in the smallest currency unit as `units.cents`.
pub fn format_cents(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
