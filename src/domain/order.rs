use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::pricing::CustomerTier;

/// Errors raised while computing an order total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderQuoteError {
    #[error("quantity {quantity} is below the minimum of {min_qty}")]
    BelowMinimumQuantity { quantity: i32, min_qty: i32 },
    #[error("minimum quantity must be positive (got {0})")]
    InvalidMinimumQuantity(i32),
    #[error("order total is too large")]
    Overflow,
}

/// Total for `quantity` units of an item priced at `unit_price_cents` per `min_qty` units.
///
/// Uses integer division, so fractional cents are dropped.
pub fn quote_order(
    unit_price_cents: i64,
    min_qty: i32,
    quantity: i32,
) -> Result<i64, OrderQuoteError> {
    if min_qty <= 0 {
        return Err(OrderQuoteError::InvalidMinimumQuantity(min_qty));
    }
    if quantity < min_qty {
        return Err(OrderQuoteError::BelowMinimumQuantity { quantity, min_qty });
    }

    unit_price_cents
        .checked_mul(i64::from(quantity))
        .map(|total| total / i64::from(min_qty))
        .ok_or(OrderQuoteError::Overflow)
}

/// Possible lifecycle states for an order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed by the customer, not yet picked up by staff.
    #[default]
    Pending,
    /// In production.
    Processing,
    /// Handed over to delivery.
    Dispatched,
    /// Cancelled by staff.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "dispatched" => Ok(OrderStatus::Dispatched),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status `{other}`")),
        }
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        value.as_str()
    }
}

/// Order placed by a customer for one product variant.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    pub id: i32,
    pub hub_id: i32,
    pub customer_id: i32,
    pub product_id: Option<i32>,
    pub variant_id: Option<i32>,
    /// SKU of the variant at purchase time.
    pub sku: String,
    /// Product name at purchase time.
    pub product_name: String,
    /// Tier the price was resolved for.
    pub tier: CustomerTier,
    pub quantity: i32,
    /// Resolved price for `min_qty` units at purchase time.
    pub unit_price_cents: i64,
    pub min_qty: i32,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub hub_id: i32,
    pub customer_id: i32,
    pub product_id: i32,
    pub variant_id: i32,
    pub sku: String,
    pub product_name: String,
    pub tier: CustomerTier,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub min_qty: i32,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list orders for a hub.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Optional status filter.
    pub status: Option<OrderStatus>,
    /// Optional customer identifier filter.
    pub customer_id: Option<i32>,
    /// Optional search term that matches the SKU or product name.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    /// Construct a query that targets all orders belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            status: None,
            customer_id: None,
            search: None,
            pagination: None,
        }
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter the results by customer identifier.
    pub fn customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Filter the results by a search term applied to the SKU or product name.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
