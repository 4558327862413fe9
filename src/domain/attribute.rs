use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::variant::AttributeGroup;

/// Named axis of product configuration scoped to a category (for example
/// "Paper Weight").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeType {
    pub id: i32,
    pub hub_id: i32,
    /// Category whose products can be configured along this axis.
    pub category_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new attribute type.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttributeType {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub updated_at: NaiveDateTime,
}

impl NewAttributeType {
    pub fn new(hub_id: i32, category_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            category_id,
            name: name.into(),
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Attribute group enriched with the attribute type name for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NamedAttributeGroup {
    pub attribute_type_id: i32,
    /// Name of the attribute type, or `None` when it no longer exists.
    pub name: Option<String>,
    pub values: Vec<String>,
}

/// Attach attribute type names to groups produced by `extract_attributes`.
pub fn name_attribute_groups(
    groups: Vec<AttributeGroup>,
    attribute_types: &[AttributeType],
) -> Vec<NamedAttributeGroup> {
    groups
        .into_iter()
        .map(|group| NamedAttributeGroup {
            name: attribute_types
                .iter()
                .find(|item| item.id == group.attribute_type_id)
                .map(|item| item.name.clone()),
            attribute_type_id: group.attribute_type_id,
            values: group.values,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_named_when_type_is_known() {
        let finish = AttributeType {
            id: 4,
            hub_id: 1,
            category_id: 1,
            name: "Finish".to_string(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        let groups = vec![
            AttributeGroup {
                attribute_type_id: 4,
                values: vec!["Matte".to_string()],
            },
            AttributeGroup {
                attribute_type_id: 8,
                values: vec!["Red".to_string()],
            },
        ];

        let named = name_attribute_groups(groups, &[finish]);

        assert_eq!(named[0].name.as_deref(), Some("Finish"));
        assert_eq!(named[0].values, vec!["Matte".to_string()]);
        assert_eq!(named[1].name, None);
        assert_eq!(named[1].attribute_type_id, 8);
    }
}
