use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::pricing::PriceTriple;
use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::products,
    belongs_to(super::category::Category, foreign_key = category_id)
)]
pub struct Product {
    pub id: i32,
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub min_qty: i32,
    pub min_price_cents: i64,
    pub avg_price_cents: i64,
    pub max_price_cents: i64,
    pub og_price_cents: i64,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub min_qty: i32,
    pub min_price_cents: i64,
    pub avg_price_cents: i64,
    pub max_price_cents: i64,
    pub og_price_cents: i64,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub category_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub min_qty: i32,
    pub min_price_cents: i64,
    pub avg_price_cents: i64,
    pub max_price_cents: i64,
    pub og_price_cents: i64,
    pub is_available: bool,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name,
            description: value.description,
            min_qty: value.min_qty,
            prices: PriceTriple {
                min_price_cents: value.min_price_cents,
                avg_price_cents: value.avg_price_cents,
                max_price_cents: value.max_price_cents,
            },
            og_price_cents: value.og_price_cents,
            is_available: value.is_available,
            image_url: value.image_url,
            variants: Vec::new(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            min_qty: value.min_qty,
            min_price_cents: value.prices.min_price_cents,
            avg_price_cents: value.prices.avg_price_cents,
            max_price_cents: value.prices.max_price_cents,
            og_price_cents: value.og_price_cents,
            image_url: value.image_url.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            min_qty: value.min_qty,
            min_price_cents: value.prices.min_price_cents,
            avg_price_cents: value.prices.avg_price_cents,
            max_price_cents: value.prices.max_price_cents,
            og_price_cents: value.og_price_cents,
            is_available: value.is_available,
            image_url: value.image_url.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
