use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Product category shown in the storefront navigation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Whether the category is visible to customers.
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category for a hub.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub hub_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new category payload with the current timestamp.
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            name: name.into(),
            description: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach a descriptive text to the category payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Patch data applied when updating an existing category.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    /// Updated name for the category.
    pub name: String,
    /// New description value; `None` clears the description.
    pub description: Option<String>,
    /// Customer visibility flag.
    pub is_available: bool,
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    pub fn new(name: String, description: Option<String>, is_available: bool) -> Self {
        Self {
            name,
            description,
            is_available,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list categories of a hub.
#[derive(Debug, Clone)]
pub struct CategoryListQuery {
    pub hub_id: i32,
    /// Include categories hidden from customers.
    pub include_unavailable: bool,
    /// Optional substring search over the name and description.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            include_unavailable: false,
            search: None,
            pagination: None,
        }
    }

    /// Include categories hidden from customers.
    pub fn include_unavailable(mut self) -> Self {
        self.include_unavailable = true;
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(value.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
