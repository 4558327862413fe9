use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{NewOrder as DomainNewOrder, Order as DomainOrder, OrderStatus};
use crate::domain::pricing::CustomerTier;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::orders,
    belongs_to(super::customer::Customer, foreign_key = customer_id)
)]
pub struct Order {
    pub id: i32,
    pub hub_id: i32,
    pub customer_id: i32,
    pub product_id: Option<i32>,
    pub variant_id: Option<i32>,
    pub sku: String,
    pub product_name: String,
    pub tier: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub min_qty: i32,
    pub total_cents: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub hub_id: i32,
    pub customer_id: i32,
    pub product_id: Option<i32>,
    pub variant_id: Option<i32>,
    pub sku: &'a str,
    pub product_name: &'a str,
    pub tier: &'a str,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub min_qty: i32,
    pub total_cents: i64,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Order> for DomainOrder {
    fn from(value: Order) -> Self {
        let tier: CustomerTier = value.tier.parse().unwrap_or_else(|err| {
            log::warn!("Order {} has an unreadable tier: {err}", value.id);
            CustomerTier::default()
        });
        let status: OrderStatus = value.status.parse().unwrap_or_else(|err| {
            log::warn!("Order {} has an unreadable status: {err}", value.id);
            OrderStatus::default()
        });
        Self {
            id: value.id,
            hub_id: value.hub_id,
            customer_id: value.customer_id,
            product_id: value.product_id,
            variant_id: value.variant_id,
            sku: value.sku,
            product_name: value.product_name,
            tier,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
            min_qty: value.min_qty,
            total_cents: value.total_cents,
            status,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            hub_id: value.hub_id,
            customer_id: value.customer_id,
            product_id: Some(value.product_id),
            variant_id: Some(value.variant_id),
            sku: value.sku.as_str(),
            product_name: value.product_name.as_str(),
            tier: value.tier.into(),
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
            min_qty: value.min_qty,
            total_cents: value.total_cents,
            status: value.status.into(),
            notes: value.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
