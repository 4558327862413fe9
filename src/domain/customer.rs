use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::CustomerTier;

/// Domain representation of a customer that belongs to a hub.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Unique identifier of the customer.
    pub id: i32,
    /// Hub identifier that owns the customer.
    pub hub_id: i32,
    /// Contact person.
    pub name: String,
    /// Registered business name.
    pub business_name: String,
    /// Primary email address stored in lowercase for comparisons.
    pub email: String,
    /// Ten digit phone number.
    pub phone: String,
    /// Tax registration (GSTIN), when the business has one.
    pub gst_number: Option<String>,
    /// Pricing tier; `None` until staff assign one.
    pub tier: Option<CustomerTier>,
    /// Banned customers cannot use the storefront.
    pub is_banned: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Customer {
    /// Tier used for pricing; customers without a tier pay the LOW price.
    pub fn pricing_tier(&self) -> CustomerTier {
        self.tier.unwrap_or_default()
    }
}

/// Payload required to insert a new customer for a hub.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewCustomer {
    pub hub_id: i32,
    pub name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub gst_number: Option<String>,
    pub tier: Option<CustomerTier>,
}

impl NewCustomer {
    /// Build a new customer payload while normalising the email to lowercase.
    #[must_use]
    pub fn new(
        hub_id: i32,
        name: impl Into<String>,
        business_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            hub_id,
            name: name.into(),
            business_name: business_name.into(),
            email: email.into().to_lowercase(),
            phone: phone.into(),
            gst_number: None,
            tier: None,
        }
    }

    #[must_use]
    pub fn with_gst_number(mut self, gst_number: impl Into<String>) -> Self {
        self.gst_number = Some(gst_number.into());
        self
    }

    /// Attach a pricing tier to the customer payload.
    #[must_use]
    pub fn with_tier(mut self, tier: CustomerTier) -> Self {
        self.tier = Some(tier);
        self
    }
}

/// Replacement of the contact details of a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCustomer {
    pub name: String,
    pub business_name: String,
    /// Stored lowercase like [`NewCustomer::email`].
    pub email: String,
    pub phone: String,
    pub gst_number: Option<String>,
}

impl UpdateCustomer {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        business_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        gst_number: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            business_name: business_name.into(),
            email: email.into().to_lowercase(),
            phone: phone.into(),
            gst_number,
        }
    }
}

/// Query definition used to list customers of a hub.
#[derive(Debug, Clone, Default)]
pub struct CustomerListQuery {
    pub hub_id: i32,
    /// Substring search over name, business name, email and phone.
    pub search: Option<String>,
    /// Only customers with this tier.
    pub tier: Option<CustomerTier>,
    /// Only banned (`true`) or active (`false`) customers.
    pub is_banned: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            ..Default::default()
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn tier(mut self, tier: CustomerTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn banned(mut self, is_banned: bool) -> Self {
        self.is_banned = Some(is_banned);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
