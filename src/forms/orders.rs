use pushkind_common::routes::empty_string_as_none;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::OrderStatus;
use crate::forms::sanitize_multiline_text;

const NOTES_MAX_LEN_VALIDATOR: u64 = 1024;

pub type OrderFormResult<T> = Result<T, OrderFormError>;

#[derive(Debug, Error)]
pub enum OrderFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    InvalidStatus(String),
}

/// Checkout form submitted from the product page.
#[derive(Debug, Deserialize, Validate)]
pub struct PlaceOrderForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub variant_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(length(max = NOTES_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub notes: Option<String>,
}

/// Sanitized checkout request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrderPayload {
    pub product_id: i32,
    pub variant_id: i32,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl PlaceOrderForm {
    pub fn into_payload(self) -> OrderFormResult<PlaceOrderPayload> {
        self.validate()?;

        Ok(PlaceOrderPayload {
            product_id: self.product_id,
            variant_id: self.variant_id,
            quantity: self.quantity,
            notes: self
                .notes
                .as_deref()
                .map(sanitize_multiline_text)
                .filter(|value| !value.is_empty()),
        })
    }
}

/// Back office form that moves an order to another status.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusForm {
    pub order_id: i32,
    pub status: String,
}

impl UpdateOrderStatusForm {
    pub fn into_parts(self) -> OrderFormResult<(i32, OrderStatus)> {
        let status = self
            .status
            .trim()
            .parse::<OrderStatus>()
            .map_err(OrderFormError::InvalidStatus)?;
        Ok((self.order_id, status))
    }
}
