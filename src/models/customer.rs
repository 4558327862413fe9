use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::domain::pricing::CustomerTier;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
pub struct Customer {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub tier: Option<String>,
    pub is_banned: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub gst_number: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub business_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub tier: Option<&'a str>,
    pub gst_number: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCustomer<'a> {
    pub name: &'a str,
    pub business_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub gst_number: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

fn parse_tier(customer_id: i32, value: Option<String>) -> Option<CustomerTier> {
    let value = value?;
    match value.parse() {
        Ok(tier) => Some(tier),
        Err(err) => {
            log::warn!("Ignoring stored tier of customer {customer_id}: {err}");
            None
        }
    }
}

impl From<Customer> for DomainCustomer {
    fn from(value: Customer) -> Self {
        Self {
            tier: parse_tier(value.id, value.tier),
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            business_name: value.business_name,
            email: value.email,
            phone: value.phone,
            gst_number: value.gst_number,
            is_banned: value.is_banned,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(value: &'a DomainNewCustomer) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            business_name: value.business_name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_str(),
            tier: value.tier.map(Into::into),
            gst_number: value.gst_number.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(value: &'a DomainUpdateCustomer) -> Self {
        Self {
            name: value.name.as_str(),
            business_name: value.business_name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_str(),
            gst_number: value.gst_number.as_deref(),
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}
