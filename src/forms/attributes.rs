use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::attribute::NewAttributeType;
use crate::forms::sanitize_inline_text;

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN_VALIDATOR: u64 = 64;

pub type AttributeTypeFormResult<T> = Result<T, AttributeTypeFormError>;

#[derive(Debug, Error)]
pub enum AttributeTypeFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("attribute name must be at least 2 characters")]
    NameTooShort,
}

/// Form payload emitted when adding an attribute type to a category.
#[derive(Debug, Deserialize, Validate)]
pub struct AddAttributeTypeForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl AddAttributeTypeForm {
    pub fn into_new_attribute_type(self, hub_id: i32) -> AttributeTypeFormResult<NewAttributeType> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.chars().count() < NAME_MIN_LEN {
            return Err(AttributeTypeFormError::NameTooShort);
        }

        Ok(NewAttributeType::new(hub_id, self.category_id, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_trimmed_name() {
        let form = AddAttributeTypeForm {
            category_id: 4,
            name: "  Paper   Weight ".to_string(),
        };

        let new_type = form.into_new_attribute_type(2).expect("expected success");

        assert_eq!(new_type.hub_id, 2);
        assert_eq!(new_type.category_id, 4);
        assert_eq!(new_type.name, "Paper Weight");
    }

    #[test]
    fn rejects_single_character_name() {
        let form = AddAttributeTypeForm {
            category_id: 4,
            name: " A ".to_string(),
        };

        assert!(matches!(
            form.into_new_attribute_type(2),
            Err(AttributeTypeFormError::NameTooShort)
        ));
    }
}
