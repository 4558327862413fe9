use chrono::Local;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::order::{NewOrder, Order, OrderListQuery, OrderStatus, quote_order};
use crate::domain::pricing::resolve_price;
use crate::forms::orders::{PlaceOrderForm, UpdateOrderStatusForm};
use crate::repository::{CategoryReader, CustomerReader, OrderReader, OrderWriter, ProductReader};
use crate::services::storefront::{load_visible_product, resolve_customer};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the order lists.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render an order list.
pub struct OrdersPageData {
    pub orders: Paginated<Order>,
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
}

/// Places an order for one variant at the price of the customer's tier.
pub fn place_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: PlaceOrderForm,
) -> ServiceResult<Order>
where
    R: CustomerReader + CategoryReader + ProductReader + OrderWriter + ?Sized,
{
    let customer = resolve_customer(repo, user)?;
    let tier = customer.pricing_tier();

    let payload = form
        .into_payload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let product = load_visible_product(repo, user.hub_id, payload.product_id)?;
    let variant = product
        .variants
        .iter()
        .find(|variant| variant.id == payload.variant_id)
        .ok_or(ServiceError::NotFound)?;

    if !variant.details.is_available {
        return Err(ServiceError::Form(format!(
            "variant {} is not available",
            variant.details.sku
        )));
    }

    let unit_price_cents = resolve_price(tier, &variant.details.prices);
    let total_cents = quote_order(unit_price_cents, variant.details.min_qty, payload.quantity)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let new_order = NewOrder {
        hub_id: user.hub_id,
        customer_id: customer.id,
        product_id: product.id,
        variant_id: variant.id,
        sku: variant.details.sku.clone(),
        product_name: product.name.clone(),
        tier,
        quantity: payload.quantity,
        unit_price_cents,
        min_qty: variant.details.min_qty,
        total_cents,
        status: OrderStatus::Pending,
        notes: payload.notes,
        updated_at: Local::now().naive_utc(),
    };

    let order = repo.create_order(&new_order).map_err(ServiceError::from)?;
    log::info!(
        "Customer {} placed order {} for {} x {}",
        customer.id,
        order.id,
        order.quantity,
        order.sku
    );

    Ok(order)
}

/// Orders of the signed-in customer, newest first.
pub fn load_my_orders<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: CustomerReader + OrderReader + ?Sized,
{
    let customer = resolve_customer(repo, user)?;
    list_orders_page(repo, user.hub_id, Some(customer.id), query)
}

/// Cancels an order of the signed-in customer while it is still pending.
pub fn cancel_my_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
) -> ServiceResult<Order>
where
    R: CustomerReader + OrderReader + OrderWriter + ?Sized,
{
    let customer = resolve_customer(repo, user)?;

    let order = repo
        .get_order_by_id(order_id, user.hub_id)
        .map_err(ServiceError::from)?
        .filter(|order| order.customer_id == customer.id)
        .ok_or(ServiceError::NotFound)?;

    if order.status != OrderStatus::Pending {
        return Err(ServiceError::Form(format!(
            "order {} is {} and can no longer be cancelled",
            order.id, order.status
        )));
    }

    repo.update_order_status(order.id, user.hub_id, OrderStatus::Cancelled)
        .map_err(ServiceError::from)
}

/// Back office list of every order in the hub.
pub fn load_orders_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    list_orders_page(repo, user.hub_id, None, query)
}

pub fn change_order_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: UpdateOrderStatusForm,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (order_id, status) = form
        .into_parts()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let order = repo
        .update_order_status(order_id, user.hub_id, status)
        .map_err(ServiceError::from)?;
    log::info!("Order {} moved to {}", order.id, order.status);

    Ok(order)
}

fn list_orders_page<R>(
    repo: &R,
    hub_id: i32,
    customer_id: Option<i32>,
    query: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let search = query
        .search
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty());
    let status = query
        .status
        .as_deref()
        .and_then(|value| value.trim().parse::<OrderStatus>().ok());

    let mut list_query = OrderListQuery::new(hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(customer_id) = customer_id {
        list_query = list_query.customer_id(customer_id);
    }
    if let Some(term) = &search {
        list_query = list_query.search(term.clone());
    }
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, orders) = repo.list_orders(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(OrdersPageData {
        orders: Paginated::new(orders, page, total_pages),
        search,
        status,
    })
}
