use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::attribute::{
    AttributeType as DomainAttributeType, NewAttributeType as DomainNewAttributeType,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::attribute_types,
    belongs_to(super::category::Category, foreign_key = category_id)
)]
pub struct AttributeType {
    pub id: i32,
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::attribute_types)]
pub struct NewAttributeType<'a> {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<AttributeType> for DomainAttributeType {
    fn from(value: AttributeType) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewAttributeType> for NewAttributeType<'a> {
    fn from(value: &'a DomainNewAttributeType) -> Self {
        Self {
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name.as_str(),
            updated_at: value.updated_at,
        }
    }
}
