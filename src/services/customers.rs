use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::customer::{Customer, CustomerListQuery};
use crate::domain::order::OrderListQuery;
use crate::domain::pricing::CustomerTier;
use crate::forms::customers::{AddCustomerForm, BanCustomerForm, ChangeTierForm, EditCustomerForm};
use crate::repository::{CustomerReader, CustomerWriter, OrderReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the customers page.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    pub search: Option<String>,
    /// `LOW`, `MEDIUM` or `HIGH`; anything else is ignored.
    pub tier: Option<String>,
    pub banned: Option<bool>,
    pub page: Option<usize>,
}

/// Data required to render the customers page.
pub struct CustomersPageData {
    pub customers: Paginated<Customer>,
    pub search: Option<String>,
    pub tier: Option<CustomerTier>,
    pub banned: Option<bool>,
}

pub fn load_customers_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CustomersQuery,
) -> ServiceResult<CustomersPageData>
where
    R: CustomerReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let page = query.page.unwrap_or(1);
    let search = query
        .search
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty());
    let tier = query
        .tier
        .as_deref()
        .and_then(|value| value.parse::<CustomerTier>().ok());

    let mut list_query =
        CustomerListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = &search {
        list_query = list_query.search(term.clone());
    }
    if let Some(tier) = tier {
        list_query = list_query.tier(tier);
    }
    if let Some(banned) = query.banned {
        list_query = list_query.banned(banned);
    }

    let (total, items) = repo.list_customers(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(CustomersPageData {
        customers: Paginated::new(items, page, total_pages),
        search,
        tier,
        banned: query.banned,
    })
}

/// Registers a customer. Email and phone must be unique inside the hub.
pub fn create_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_customer = form
        .into_new_customer(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_customer_by_email(&new_customer.email, user.hub_id)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    if repo
        .get_customer_by_phone(&new_customer.phone, user.hub_id)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    let customer = repo
        .create_customer(&new_customer)
        .map_err(ServiceError::from)?;
    log::info!("Customer {} registered in hub {}", customer.id, customer.hub_id);

    Ok(customer)
}

/// Assigns or clears the pricing tier of a customer.
pub fn change_customer_tier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ChangeTierForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (customer_id, tier) = form
        .into_parts()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_customer_tier(customer_id, user.hub_id, tier)
        .map_err(ServiceError::from)
}

pub fn set_customer_ban<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: BanCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let customer = repo
        .set_customer_banned(form.customer_id, user.hub_id, form.is_banned)
        .map_err(ServiceError::from)?;
    log::info!(
        "Customer {} is_banned set to {}",
        customer.id,
        customer.is_banned
    );

    Ok(customer)
}

/// Replaces the contact details of a customer. Email and phone stay unique inside the hub.
pub fn edit_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (customer_id, updates) = form
        .into_update()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_customer_by_id(customer_id, user.hub_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let email_owner = repo
        .get_customer_by_email(&updates.email, user.hub_id)
        .map_err(ServiceError::from)?;
    if email_owner.is_some_and(|owner| owner.id != customer_id) {
        return Err(ServiceError::Conflict);
    }

    let phone_owner = repo
        .get_customer_by_phone(&updates.phone, user.hub_id)
        .map_err(ServiceError::from)?;
    if phone_owner.is_some_and(|owner| owner.id != customer_id) {
        return Err(ServiceError::Conflict);
    }

    let customer = repo
        .update_customer(customer_id, user.hub_id, &updates)
        .map_err(ServiceError::from)?;
    log::info!("Customer {} updated in hub {}", customer.id, customer.hub_id);

    Ok(customer)
}

/// Deletes a customer that has never placed an order.
pub fn remove_customer<R>(repo: &R, user: &AuthenticatedUser, customer_id: i32) -> ServiceResult<()>
where
    R: CustomerWriter + OrderReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (order_count, _) = repo
        .list_orders(
            OrderListQuery::new(user.hub_id)
                .customer_id(customer_id)
                .paginate(1, 1),
        )
        .map_err(ServiceError::from)?;

    if order_count > 0 {
        return Err(ServiceError::Conflict);
    }

    repo.delete_customer(customer_id, user.hub_id)
        .map_err(ServiceError::from)?;
    log::info!("Customer {customer_id} deleted from hub {}", user.hub_id);

    Ok(())
}
