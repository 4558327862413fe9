use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::staff::{NewStaffMember, StaffRole, UpdateStaffMember};
use crate::forms::{parse_phone, sanitize_inline_text};

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN_VALIDATOR: u64 = 128;

pub type StaffFormResult<T> = Result<T, StaffFormError>;

#[derive(Debug, Error)]
pub enum StaffFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("name must be at least 2 characters")]
    NameTooShort,
    #[error("phone number must consist of exactly 10 digits, e.g. 1234567890")]
    InvalidPhone,
    #[error("{0}")]
    InvalidRole(String),
}

/// Form payload emitted when an administrator adds a staff member.
#[derive(Debug, Deserialize, Validate)]
pub struct AddStaffForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    /// `ADMIN` or `STAFF`.
    pub role: String,
}

impl AddStaffForm {
    pub fn into_new_staff_member(self, hub_id: i32) -> StaffFormResult<NewStaffMember> {
        let form = AddStaffForm {
            email: self.email.trim().to_string(),
            ..self
        };
        form.validate()?;

        let (name, phone, role) = parse_fields(&form.name, &form.phone, &form.role)?;

        Ok(NewStaffMember::new(hub_id, name, form.email, phone, role))
    }
}

/// Form payload emitted when an administrator edits a staff member.
#[derive(Debug, Deserialize, Validate)]
pub struct EditStaffForm {
    #[validate(range(min = 1))]
    pub staff_id: i32,
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    pub role: String,
}

impl EditStaffForm {
    pub fn into_update(self) -> StaffFormResult<(i32, UpdateStaffMember)> {
        let form = EditStaffForm {
            email: self.email.trim().to_string(),
            ..self
        };
        form.validate()?;

        let (name, phone, role) = parse_fields(&form.name, &form.phone, &form.role)?;

        Ok((form.staff_id, UpdateStaffMember::new(name, form.email, phone, role)))
    }
}

/// Form payload emitted by the ban / unban buttons of the staff page.
#[derive(Debug, Deserialize)]
pub struct BanStaffForm {
    pub staff_id: i32,
    #[serde(default)]
    pub is_banned: bool,
}

fn parse_fields(
    name: &str,
    phone: &str,
    role: &str,
) -> StaffFormResult<(String, String, StaffRole)> {
    let name = sanitize_inline_text(name);
    if name.chars().count() < NAME_MIN_LEN {
        return Err(StaffFormError::NameTooShort);
    }

    let phone = parse_phone(phone).ok_or(StaffFormError::InvalidPhone)?;
    let role = role.parse::<StaffRole>().map_err(StaffFormError::InvalidRole)?;

    Ok((name, phone, role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_form() -> AddStaffForm {
        AddStaffForm {
            name: " Ivan   Petrov ".to_string(),
            email: " Ivan@Example.com ".to_string(),
            phone: "5551234567".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn add_staff_form_normalizes_fields() {
        let member = add_form().into_new_staff_member(3).expect("expected success");

        assert_eq!(member.hub_id, 3);
        assert_eq!(member.name, "Ivan Petrov");
        assert_eq!(member.email, "ivan@example.com");
        assert_eq!(member.role, StaffRole::Admin);
    }

    #[test]
    fn add_staff_form_rejects_invalid_fields() {
        let mut short = add_form();
        short.name = "I".to_string();
        assert!(matches!(
            short.into_new_staff_member(1),
            Err(StaffFormError::NameTooShort)
        ));

        let mut phone = add_form();
        phone.phone = "555-123".to_string();
        assert!(matches!(
            phone.into_new_staff_member(1),
            Err(StaffFormError::InvalidPhone)
        ));

        let mut role = add_form();
        role.role = "owner".to_string();
        assert!(matches!(
            role.into_new_staff_member(1),
            Err(StaffFormError::InvalidRole(_))
        ));

        let mut email = add_form();
        email.email = "ivan".to_string();
        assert!(matches!(
            email.into_new_staff_member(1),
            Err(StaffFormError::Validation(_))
        ));
    }

    #[test]
    fn edit_staff_form_requires_positive_id() {
        let form = EditStaffForm {
            staff_id: 0,
            name: "Ivan".to_string(),
            email: "ivan@example.com".to_string(),
            phone: "5551234567".to_string(),
            role: "STAFF".to_string(),
        };

        assert!(matches!(
            form.into_update(),
            Err(StaffFormError::Validation(_))
        ));
    }
}
