use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Position of a staff member inside the hub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StaffRole {
    Admin,
    #[default]
    Staff,
}

impl StaffRole {
    pub const ALL: [StaffRole; 2] = [StaffRole::Admin, StaffRole::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "ADMIN",
            StaffRole::Staff => "STAFF",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(StaffRole::Admin),
            "STAFF" => Ok(StaffRole::Staff),
            other => Err(format!("unknown staff role `{other}`")),
        }
    }
}

impl From<StaffRole> for &'static str {
    fn from(value: StaffRole) -> Self {
        value.as_str()
    }
}

/// Employee of a hub listed in the back office directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffMember {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    /// Stored lowercase.
    pub email: String,
    /// Ten digit phone number.
    pub phone: String,
    pub role: StaffRole,
    pub is_banned: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new staff member.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStaffMember {
    pub hub_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: StaffRole,
}

impl NewStaffMember {
    #[must_use]
    pub fn new(
        hub_id: i32,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        role: StaffRole,
    ) -> Self {
        Self {
            hub_id,
            name: name.into(),
            email: email.into().to_lowercase(),
            phone: phone.into(),
            role,
        }
    }
}

/// Replacement of the editable fields of a staff member.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStaffMember {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: StaffRole,
}

impl UpdateStaffMember {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        role: StaffRole,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into().to_lowercase(),
            phone: phone.into(),
            role,
        }
    }
}

/// Query definition used to list the staff of a hub.
#[derive(Debug, Clone, Default)]
pub struct StaffListQuery {
    pub hub_id: i32,
    /// Substring search over name, email and phone.
    pub search: Option<String>,
    pub is_banned: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl StaffListQuery {
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

    pub fn banned(mut self, is_banned: bool) -> Self {
        self.is_banned = Some(is_banned);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
