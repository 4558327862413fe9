use pushkind_common::routes::empty_string_as_none;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::domain::pricing::{CustomerTier, PricingError};
use crate::forms::{parse_phone, sanitize_inline_text};

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN_VALIDATOR: u64 = 128;
const GST_NUMBER_LEN: usize = 15;

pub type CustomerFormResult<T> = Result<T, CustomerFormError>;

/// Errors that can occur while processing customer forms.
#[derive(Debug, Error)]
pub enum CustomerFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("name must be at least 2 characters")]
    NameTooShort,
    #[error("business name must be at least 2 characters")]
    BusinessNameTooShort,
    #[error("phone number must consist of exactly 10 digits, e.g. 1234567890")]
    InvalidPhone,
    #[error("GST number must consist of 15 letters and digits")]
    InvalidGstNumber,
    #[error(transparent)]
    InvalidTier(#[from] PricingError),
}

/// Form payload emitted when staff register a new customer.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCustomerForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub business_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub gst_number: Option<String>,
    /// `LOW`, `MEDIUM`, `HIGH` or empty for none.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tier: Option<String>,
}

impl AddCustomerForm {
    pub fn into_new_customer(self, hub_id: i32) -> CustomerFormResult<NewCustomer> {
        let form = AddCustomerForm {
            email: self.email.trim().to_string(),
            ..self
        };
        form.validate()?;

        let (name, business_name) = normalize_names(&form.name, &form.business_name)?;
        let phone = normalize_phone(&form.phone)?;
        let gst_number = normalize_gst_number(form.gst_number.as_deref())?;
        let tier = parse_optional_tier(form.tier.as_deref())?;

        let mut new_customer = NewCustomer::new(hub_id, name, business_name, form.email, phone);
        if let Some(gst_number) = gst_number {
            new_customer = new_customer.with_gst_number(gst_number);
        }
        if let Some(tier) = tier {
            new_customer = new_customer.with_tier(tier);
        }

        Ok(new_customer)
    }
}

/// Form payload emitted when staff edit the contact details of a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCustomerForm {
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub business_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    /// Empty clears the stored number.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub gst_number: Option<String>,
}

impl EditCustomerForm {
    pub fn into_update(self) -> CustomerFormResult<(i32, UpdateCustomer)> {
        let form = EditCustomerForm {
            email: self.email.trim().to_string(),
            ..self
        };
        form.validate()?;

        let (name, business_name) = normalize_names(&form.name, &form.business_name)?;
        let phone = normalize_phone(&form.phone)?;
        let gst_number = normalize_gst_number(form.gst_number.as_deref())?;

        Ok((
            form.customer_id,
            UpdateCustomer::new(name, business_name, form.email, phone, gst_number),
        ))
    }
}

/// Form payload emitted when staff change the tier of a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangeTierForm {
    #[validate(range(min = 1))]
    pub customer_id: i32,
    /// Empty clears the tier.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tier: Option<String>,
}

impl ChangeTierForm {
    pub fn into_parts(self) -> CustomerFormResult<(i32, Option<CustomerTier>)> {
        self.validate()?;
        let tier = parse_optional_tier(self.tier.as_deref())?;
        Ok((self.customer_id, tier))
    }
}

/// Form payload emitted by the ban / unban buttons.
#[derive(Debug, Deserialize)]
pub struct BanCustomerForm {
    pub customer_id: i32,
    #[serde(default)]
    pub is_banned: bool,
}

fn normalize_names(name: &str, business_name: &str) -> CustomerFormResult<(String, String)> {
    let name = sanitize_inline_text(name);
    if name.chars().count() < NAME_MIN_LEN {
        return Err(CustomerFormError::NameTooShort);
    }

    let business_name = sanitize_inline_text(business_name);
    if business_name.chars().count() < NAME_MIN_LEN {
        return Err(CustomerFormError::BusinessNameTooShort);
    }

    Ok((name, business_name))
}

fn normalize_gst_number(input: Option<&str>) -> CustomerFormResult<Option<String>> {
    let Some(value) = input.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    if value.len() == GST_NUMBER_LEN && value.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        Ok(Some(value.to_ascii_uppercase()))
    } else {
        Err(CustomerFormError::InvalidGstNumber)
    }
}

fn normalize_phone(input: &str) -> CustomerFormResult<String> {
    parse_phone(input).ok_or(CustomerFormError::InvalidPhone)
}

fn parse_optional_tier(value: Option<&str>) -> CustomerFormResult<Option<CustomerTier>> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => Ok(Some(value.parse()?)),
        None => Ok(None),
    }
}
