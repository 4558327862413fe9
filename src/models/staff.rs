use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::staff::{
    NewStaffMember as DomainNewStaffMember, StaffMember as DomainStaffMember, StaffRole,
    UpdateStaffMember as DomainUpdateStaffMember,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::staff)]
pub struct StaffMember {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub is_banned: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::staff)]
pub struct NewStaffMember<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub role: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::staff)]
pub struct UpdateStaffMember<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub role: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<StaffMember> for DomainStaffMember {
    fn from(value: StaffMember) -> Self {
        let role = value.role.parse().unwrap_or_else(|err| {
            log::warn!("Falling back to STAFF for member {}: {err}", value.id);
            StaffRole::Staff
        });

        Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            role,
            is_banned: value.is_banned,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewStaffMember> for NewStaffMember<'a> {
    fn from(value: &'a DomainNewStaffMember) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_str(),
            role: value.role.into(),
        }
    }
}

impl<'a> From<&'a DomainUpdateStaffMember> for UpdateStaffMember<'a> {
    fn from(value: &'a DomainUpdateStaffMember) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_str(),
            role: value.role.into(),
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}
