use pushkind_common::routes::empty_string_as_none;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::pricing::PriceTriple;
use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{parse_price_cents, sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = 4096;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// A price field is not a non-negative amount with at most two decimals.
    #[error("invalid {field} `{value}`")]
    InvalidPrice { field: &'static str, value: String },
}

/// Form payload emitted when submitting the "Add product" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional longer description.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    /// Quantity the prices are quoted for.
    #[validate(range(min = 1))]
    pub min_qty: i32,
    pub min_price: String,
    pub avg_price: String,
    pub max_price: String,
    /// Reference price; defaults to the max price.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub og_price: Option<String>,
    #[validate(url)]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image_url: Option<String>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, hub_id: i32) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let prices = parse_price_triple(&self.min_price, &self.avg_price, &self.max_price)?;

        let mut new_product = NewProduct::new(hub_id, self.category_id, name, self.min_qty, prices);

        if let Some(og_price) = self.og_price.as_deref() {
            new_product = new_product.with_og_price(parse_price("og price", og_price)?);
        }

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_description(description);
        }

        if let Some(image_url) = self.image_url {
            new_product = new_product.with_image_url(image_url.trim());
        }

        Ok(new_product)
    }
}

/// Normalized payload produced by the "Edit product" form.
#[derive(Debug)]
pub struct EditProductPayload {
    pub product_id: i32,
    pub update: UpdateProduct,
}

/// Form payload emitted when editing an existing product.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub min_qty: i32,
    pub min_price: String,
    pub avg_price: String,
    pub max_price: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub og_price: Option<String>,
    #[validate(url)]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image_url: Option<String>,
    /// Checkbox; absent when unchecked.
    #[serde(default)]
    pub is_available: bool,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a full product replacement.
    pub fn into_update_product(self) -> ProductFormResult<EditProductPayload> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let prices = parse_price_triple(&self.min_price, &self.avg_price, &self.max_price)?;
        let og_price_cents = match self.og_price.as_deref() {
            Some(value) => parse_price("og price", value)?,
            None => prices.max_price_cents,
        };

        let update = UpdateProduct {
            category_id: self.category_id,
            name,
            description: self
                .description
                .as_deref()
                .map(sanitize_multiline_text)
                .filter(|value| !value.is_empty()),
            min_qty: self.min_qty,
            prices,
            og_price_cents,
            is_available: self.is_available,
            image_url: self.image_url.map(|url| url.trim().to_string()),
            updated_at: chrono::Local::now().naive_utc(),
        };

        Ok(EditProductPayload {
            product_id: self.product_id,
            update,
        })
    }
}

fn parse_price(field: &'static str, value: &str) -> ProductFormResult<i64> {
    parse_price_cents(value).ok_or_else(|| ProductFormError::InvalidPrice {
        field,
        value: value.trim().to_string(),
    })
}

fn parse_price_triple(min: &str, avg: &str, max: &str) -> ProductFormResult<PriceTriple> {
    Ok(PriceTriple {
        min_price_cents: parse_price("min price", min)?,
        avg_price_cents: parse_price("avg price", avg)?,
        max_price_cents: parse_price("max price", max)?,
    })
}
