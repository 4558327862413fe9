use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::{Deserialize, Serialize};

use crate::domain::attribute::{NamedAttributeGroup, name_attribute_groups};
use crate::domain::category::{Category, CategoryListQuery};
use crate::domain::customer::Customer;
use crate::domain::pricing::{CustomerTier, format_cents, resolve_price};
use crate::domain::product::{Product, ProductListQuery};
use crate::domain::variant::{
    AttributeOption, ProductVariant, default_selection, extract_attributes, find_variant,
};
use crate::repository::{AttributeTypeReader, CategoryReader, CustomerReader, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the catalogue page.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogueQuery {
    pub search: Option<String>,
    pub category_id: Option<i32>,
    pub page: Option<usize>,
}

/// Product as shown to one customer: a single price for their tier.
#[derive(Debug, Clone, Serialize)]
pub struct PricedProduct {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub min_qty: i32,
    pub price_cents: i64,
    pub price: String,
    pub og_price: String,
}

impl PricedProduct {
    fn new(product: &Product, tier: CustomerTier) -> Self {
        let price_cents = resolve_price(tier, &product.prices);
        Self {
            id: product.id,
            category_id: product.category_id,
            name: product.name.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            min_qty: product.min_qty,
            price_cents,
            price: format_cents(price_cents),
            og_price: format_cents(product.og_price_cents),
        }
    }
}

/// Variant as shown to one customer.
#[derive(Debug, Clone, Serialize)]
pub struct PricedVariant {
    pub id: i32,
    pub sku: String,
    pub min_qty: i32,
    pub price_cents: i64,
    pub price: String,
    pub og_price: String,
    pub image_url: Option<String>,
    pub options: Vec<AttributeOption>,
}

impl PricedVariant {
    fn new(variant: &ProductVariant, tier: CustomerTier) -> Self {
        let details = &variant.details;
        let price_cents = resolve_price(tier, &details.prices);
        Self {
            id: variant.id,
            sku: details.sku.clone(),
            min_qty: details.min_qty,
            price_cents,
            price: format_cents(price_cents),
            og_price: format_cents(details.og_price_cents),
            image_url: details.image_url.clone(),
            options: details.options.clone(),
        }
    }
}

pub struct CataloguePageData {
    pub customer: Customer,
    pub tier: CustomerTier,
    pub categories: Vec<Category>,
    pub products: Paginated<PricedProduct>,
    pub search: Option<String>,
    pub category_id: Option<i32>,
}

/// Everything the product page and `/api/v1/products/{id}` expose.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetails {
    pub tier: CustomerTier,
    pub product: PricedProduct,
    /// Orderable variants only.
    pub variants: Vec<PricedVariant>,
    pub attributes: Vec<NamedAttributeGroup>,
    /// Preselected attribute values.
    pub selection: Vec<AttributeOption>,
    /// Variant matching `selection`, if any.
    pub selected_variant_id: Option<i32>,
}

/// Map the signed-in user to a customer of their hub.
///
/// Unknown and banned customers are treated as unauthorized.
pub fn resolve_customer<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    let customer = repo
        .get_customer_by_email(&user.email, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)?;

    if customer.is_banned {
        log::warn!("Banned customer {} tried to use the storefront", customer.id);
        return Err(ServiceError::Unauthorized);
    }

    Ok(customer)
}

pub fn load_catalogue<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CatalogueQuery,
) -> ServiceResult<CataloguePageData>
where
    R: CustomerReader + CategoryReader + ProductReader + ?Sized,
{
    let customer = resolve_customer(repo, user)?;
    let tier = customer.pricing_tier();

    let page = query.page.unwrap_or(1);
    let search = query
        .search
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty());

    let mut list_query = ProductListQuery::new(user.hub_id)
        .visible()
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = &search {
        list_query = list_query.search(term.clone());
    }
    if let Some(category_id) = query.category_id {
        list_query = list_query.category(category_id);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;
    let (_, categories) = repo
        .list_categories(CategoryListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;

    let products = items
        .iter()
        .map(|product| PricedProduct::new(product, tier))
        .collect();
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(CataloguePageData {
        customer,
        tier,
        categories,
        products: Paginated::new(products, page, total_pages),
        search,
        category_id: query.category_id,
    })
}

pub fn load_product_details<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<ProductDetails>
where
    R: CustomerReader + CategoryReader + ProductReader + AttributeTypeReader + ?Sized,
{
    let customer = resolve_customer(repo, user)?;
    let tier = customer.pricing_tier();

    let product = load_visible_product(repo, user.hub_id, product_id)?;

    let orderable: Vec<ProductVariant> = product
        .variants
        .iter()
        .filter(|variant| variant.details.is_available)
        .cloned()
        .collect();

    let attribute_types = repo
        .list_attribute_types(user.hub_id, Some(product.category_id))
        .map_err(ServiceError::from)?;

    let groups = extract_attributes(orderable.iter().map(|variant| &variant.details));
    let selection = default_selection(&groups);
    let selected_variant_id = find_variant(&orderable, &selection).map(|variant| variant.id);

    Ok(ProductDetails {
        tier,
        product: PricedProduct::new(&product, tier),
        variants: orderable
            .iter()
            .map(|variant| PricedVariant::new(variant, tier))
            .collect(),
        attributes: name_attribute_groups(groups, &attribute_types),
        selection,
        selected_variant_id,
    })
}

/// A product customers may see: available and listed under an available category.
pub(crate) fn load_visible_product<R>(
    repo: &R,
    hub_id: i32,
    product_id: i32,
) -> ServiceResult<Product>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id, hub_id)
        .map_err(ServiceError::from)?
        .filter(|product| product.is_available)
        .ok_or(ServiceError::NotFound)?;

    let category_visible = repo
        .get_category_by_id(product.category_id, hub_id)
        .map_err(ServiceError::from)?
        .is_some_and(|category| category.is_available);
    if !category_visible {
        return Err(ServiceError::NotFound);
    }

    Ok(product)
}
