use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::PriceTriple;
use crate::domain::variant::ProductVariant;

/// Domain representation of a printing product managed by a hub.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Category the product is listed under.
    pub category_id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to customers.
    pub description: Option<String>,
    /// Quantity the base prices are quoted for.
    pub min_qty: i32,
    /// Base tiered prices shown before a variant is picked.
    pub prices: PriceTriple,
    /// Reference (list) price.
    pub og_price_cents: i64,
    /// Whether the product is visible to customers.
    pub is_available: bool,
    /// Optional cover image.
    pub image_url: Option<String>,
    /// Purchasable configurations of the product.
    pub variants: Vec<ProductVariant>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product for a hub.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub min_qty: i32,
    pub prices: PriceTriple,
    pub og_price_cents: i64,
    pub image_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the supplied details and current timestamp.
    pub fn new(
        hub_id: i32,
        category_id: i32,
        name: impl Into<String>,
        min_qty: i32,
        prices: PriceTriple,
    ) -> Self {
        Self {
            hub_id,
            category_id,
            name: name.into(),
            description: None,
            min_qty,
            prices,
            og_price_cents: prices.max_price_cents,
            image_url: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_og_price(mut self, og_price_cents: i64) -> Self {
        self.og_price_cents = og_price_cents;
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Full replacement of the editable product fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub min_qty: i32,
    pub prices: PriceTriple,
    pub og_price_cents: i64,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    /// Patch that keeps every field of `product` unchanged.
    pub fn from_product(product: &Product) -> Self {
        Self {
            category_id: product.category_id,
            name: product.name.clone(),
            description: product.description.clone(),
            min_qty: product.min_qty,
            prices: product.prices,
            og_price_cents: product.og_price_cents,
            is_available: product.is_available,
            image_url: product.image_url.clone(),
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    /// Set the customer visibility flag.
    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }
}

/// Query definition used to list products for a hub.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Optional name or description search term.
    pub search: Option<String>,
    /// Optional category filter.
    pub category_id: Option<i32>,
    /// Optional availability filter.
    pub is_available: Option<bool>,
    /// Only products that are available and listed under an available category.
    pub visible_only: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets all products belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            search: None,
            category_id: None,
            is_available: None,
            visible_only: false,
            pagination: None,
        }
    }

    /// Filter the results by a search term applied to the name or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict the results to one category.
    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restrict the results by availability.
    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }

    /// Restrict the results to what customers are allowed to see.
    pub fn visible(mut self) -> Self {
        self.visible_only = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
