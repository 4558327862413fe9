use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::pricing::PriceTriple;
use crate::domain::variant::{
    AttributeOption as DomainAttributeOption, ProductVariant as DomainProductVariant,
    VariantDetails,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::product_variants,
    belongs_to(super::product::Product, foreign_key = product_id)
)]
pub struct ProductVariant {
    pub id: i32,
    pub product_id: i32,
    pub sku: String,
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

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::variant_options,
    belongs_to(ProductVariant, foreign_key = variant_id)
)]
pub struct VariantOption {
    pub id: i32,
    pub variant_id: i32,
    pub attribute_type_id: i32,
    pub value: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_variants)]
pub struct NewProductVariant<'a> {
    pub product_id: i32,
    pub sku: &'a str,
    pub min_qty: i32,
    pub min_price_cents: i64,
    pub avg_price_cents: i64,
    pub max_price_cents: i64,
    pub og_price_cents: i64,
    pub is_available: bool,
    pub image_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::product_variants)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProductVariant<'a> {
    pub min_qty: i32,
    pub min_price_cents: i64,
    pub avg_price_cents: i64,
    pub max_price_cents: i64,
    pub og_price_cents: i64,
    pub is_available: bool,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::variant_options)]
pub struct NewVariantOption<'a> {
    pub variant_id: i32,
    pub attribute_type_id: i32,
    pub value: &'a str,
}

impl ProductVariant {
    pub fn into_domain(self, options: Vec<VariantOption>) -> DomainProductVariant {
        DomainProductVariant {
            id: self.id,
            product_id: self.product_id,
            details: VariantDetails {
                sku: self.sku,
                min_qty: self.min_qty,
                prices: PriceTriple {
                    min_price_cents: self.min_price_cents,
                    avg_price_cents: self.avg_price_cents,
                    max_price_cents: self.max_price_cents,
                },
                og_price_cents: self.og_price_cents,
                is_available: self.is_available,
                image_url: self.image_url,
                options: options.into_iter().map(Into::into).collect(),
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<VariantOption> for DomainAttributeOption {
    fn from(value: VariantOption) -> Self {
        Self {
            attribute_type_id: value.attribute_type_id,
            value: value.value,
        }
    }
}

impl<'a> NewProductVariant<'a> {
    pub fn from_details(product_id: i32, value: &'a VariantDetails) -> Self {
        Self {
            product_id,
            sku: value.sku.as_str(),
            min_qty: value.min_qty,
            min_price_cents: value.prices.min_price_cents,
            avg_price_cents: value.prices.avg_price_cents,
            max_price_cents: value.prices.max_price_cents,
            og_price_cents: value.og_price_cents,
            is_available: value.is_available,
            image_url: value.image_url.as_deref(),
        }
    }
}

impl<'a> UpdateProductVariant<'a> {
    pub fn from_details(value: &'a VariantDetails, updated_at: NaiveDateTime) -> Self {
        Self {
            min_qty: value.min_qty,
            min_price_cents: value.prices.min_price_cents,
            avg_price_cents: value.prices.avg_price_cents,
            max_price_cents: value.prices.max_price_cents,
            og_price_cents: value.og_price_cents,
            is_available: value.is_available,
            image_url: value.image_url.as_deref(),
            updated_at,
        }
    }
}

impl<'a> NewVariantOption<'a> {
    pub fn from_domain(variant_id: i32, value: &'a DomainAttributeOption) -> Self {
        Self {
            variant_id,
            attribute_type_id: value.attribute_type_id,
            value: value.value.as_str(),
        }
    }
}
