use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::attribute::AttributeType;
use crate::domain::category::Category;
use crate::forms::attributes::AddAttributeTypeForm;
use crate::repository::{AttributeTypeReader, AttributeTypeWriter, CategoryReader};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the attribute types of one category.
pub struct AttributeTypesPageData {
    pub category: Category,
    pub attribute_types: Vec<AttributeType>,
}

pub fn load_attribute_types<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
) -> ServiceResult<AttributeTypesPageData>
where
    R: CategoryReader + AttributeTypeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category = repo
        .get_category_by_id(category_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let attribute_types = repo
        .list_attribute_types(user.hub_id, Some(category.id))
        .map_err(ServiceError::from)?;

    Ok(AttributeTypesPageData {
        category,
        attribute_types,
    })
}

/// Adds an attribute type to a category; names are unique within a category.
pub fn create_attribute_type<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddAttributeTypeForm,
) -> ServiceResult<AttributeType>
where
    R: CategoryReader + AttributeTypeReader + AttributeTypeWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_attribute_type = form
        .into_new_attribute_type(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_category_by_id(new_attribute_type.category_id, user.hub_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let existing = repo
        .list_attribute_types(user.hub_id, Some(new_attribute_type.category_id))
        .map_err(ServiceError::from)?;
    if existing
        .iter()
        .any(|item| item.name.to_lowercase() == new_attribute_type.name.to_lowercase())
    {
        return Err(ServiceError::Conflict);
    }

    repo.create_attribute_type(&new_attribute_type)
        .map_err(ServiceError::from)
}

/// Deletes an attribute type and returns the category it belonged to.
pub fn remove_attribute_type<R>(
    repo: &R,
    user: &AuthenticatedUser,
    attribute_type_id: i32,
) -> ServiceResult<i32>
where
    R: AttributeTypeReader + AttributeTypeWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let attribute_type = repo
        .get_attribute_type_by_id(attribute_type_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_attribute_type(attribute_type.id, user.hub_id)
        .map_err(ServiceError::from)?;

    log::info!(
        "Deleted attribute type `{}` of category {}",
        attribute_type.name,
        attribute_type.category_id
    );

    Ok(attribute_type.category_id)
}
