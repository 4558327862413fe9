use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::attribute::AttributeType;
use crate::domain::category::{Category, CategoryListQuery};
use crate::domain::product::ProductListQuery;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::{AttributeTypeReader, CategoryReader, CategoryWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the categories page.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    pub search: Option<String>,
}

/// Category together with the attribute types its products are configured by.
#[derive(Debug, Serialize)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    pub attribute_types: Vec<AttributeType>,
}

/// Data required to render the categories index template.
pub struct CategoriesPageData {
    pub categories: Vec<CategoryView>,
    pub search: Option<String>,
}

/// Loads every category of the hub, hidden ones included.
pub fn load_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CategoriesQuery,
) -> ServiceResult<CategoriesPageData>
where
    R: CategoryReader + AttributeTypeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut list_query = CategoryListQuery::new(user.hub_id).include_unavailable();
    if let Some(term) = query.search.as_ref().filter(|term| !term.trim().is_empty()) {
        list_query = list_query.search(term.trim());
    }

    let (_, categories) = repo.list_categories(list_query).map_err(ServiceError::from)?;
    let attribute_types = repo
        .list_attribute_types(user.hub_id, None)
        .map_err(ServiceError::from)?;

    let mut types_by_category: HashMap<i32, Vec<AttributeType>> = HashMap::new();
    for attribute_type in attribute_types {
        types_by_category
            .entry(attribute_type.category_id)
            .or_default()
            .push(attribute_type);
    }

    let categories = categories
        .into_iter()
        .map(|category| CategoryView {
            attribute_types: types_by_category.remove(&category.id).unwrap_or_default(),
            category,
        })
        .collect();

    Ok(CategoriesPageData {
        categories,
        search: query.search,
    })
}

/// Creates a new category for the authenticated user's hub.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_category = form
        .into_new_category(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let (_, existing) = repo
        .list_categories(CategoryListQuery::new(user.hub_id).include_unavailable())
        .map_err(ServiceError::from)?;
    if existing
        .iter()
        .any(|category| category.name.to_lowercase() == new_category.name.to_lowercase())
    {
        return Err(ServiceError::Conflict);
    }

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

/// Updates an existing category for the authenticated user's hub.
pub fn modify_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_category(payload.category_id, user.hub_id, &payload.update)
        .map_err(ServiceError::from)
}

/// Deletes a category that no longer has products.
pub fn remove_category<R>(repo: &R, user: &AuthenticatedUser, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (product_count, _) = repo
        .list_products(
            ProductListQuery::new(user.hub_id)
                .category(category_id)
                .paginate(1, 1),
        )
        .map_err(ServiceError::from)?;

    if product_count > 0 {
        return Err(ServiceError::Conflict);
    }

    repo.delete_category(category_id, user.hub_id)
        .map_err(ServiceError::from)
}
