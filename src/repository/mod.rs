use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::attribute::{AttributeType, NewAttributeType};
use crate::domain::category::{Category, CategoryListQuery, NewCategory, UpdateCategory};
use crate::domain::customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer};
use crate::domain::order::{NewOrder, Order, OrderListQuery, OrderStatus};
use crate::domain::pricing::CustomerTier;
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::staff::{NewStaffMember, StaffListQuery, StaffMember, UpdateStaffMember};
use crate::domain::variant::{SkuConflicts, VariantChangeSet};

pub mod attribute;
pub mod category;
pub mod customer;
pub mod order;
pub mod product;
pub mod staff;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over categories.
pub trait CategoryReader {
    fn get_category_by_id(
        &self,
        category_id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
}

/// Write operations over categories.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        hub_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    /// Removes the category together with its attribute types.
    fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over attribute types.
pub trait AttributeTypeReader {
    fn get_attribute_type_by_id(
        &self,
        attribute_type_id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<AttributeType>>;
    /// Attribute types of a hub ordered by name, optionally limited to one category.
    fn list_attribute_types(
        &self,
        hub_id: i32,
        category_id: Option<i32>,
    ) -> RepositoryResult<Vec<AttributeType>>;
}

/// Write operations over attribute types.
pub trait AttributeTypeWriter {
    fn create_attribute_type(
        &self,
        new_attribute_type: &NewAttributeType,
    ) -> RepositoryResult<AttributeType>;
    /// Removes the attribute type and every variant option that references it.
    fn delete_attribute_type(&self, attribute_type_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over products and their variants.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Checks which of `skus` are already used by variants of other products.
    fn find_sku_conflicts(
        &self,
        product_id: i32,
        hub_id: i32,
        skus: &[String],
    ) -> RepositoryResult<SkuConflicts>;
}

/// Write operations over products and their variants.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    /// Removes the product, its variants and their options.
    fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
    /// Applies a reconciled change set to the variants of a product in one transaction.
    fn apply_variant_changes(
        &self,
        product_id: i32,
        hub_id: i32,
        changes: &VariantChangeSet,
    ) -> RepositoryResult<()>;
}

/// Read-only operations over customers.
pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Customer>>;
    fn get_customer_by_email(&self, email: &str, hub_id: i32)
    -> RepositoryResult<Option<Customer>>;
    fn get_customer_by_phone(&self, phone: &str, hub_id: i32)
    -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

/// Write operations over customers.
pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer_tier(
        &self,
        customer_id: i32,
        hub_id: i32,
        tier: Option<CustomerTier>,
    ) -> RepositoryResult<Customer>;
    fn set_customer_banned(
        &self,
        customer_id: i32,
        hub_id: i32,
        is_banned: bool,
    ) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        customer_id: i32,
        hub_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, customer_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over orders.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

/// Write operations over orders.
pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order_status(
        &self,
        order_id: i32,
        hub_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<Order>;
}

/// Read-only operations over the staff directory.
pub trait StaffReader {
    fn get_staff_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<StaffMember>>;
    fn get_staff_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<StaffMember>>;
    fn get_staff_by_phone(&self, phone: &str, hub_id: i32) -> RepositoryResult<Option<StaffMember>>;
    fn list_staff(&self, query: StaffListQuery) -> RepositoryResult<(usize, Vec<StaffMember>)>;
}

/// Write operations over the staff directory.
pub trait StaffWriter {
    fn create_staff(&self, new_member: &NewStaffMember) -> RepositoryResult<StaffMember>;
    fn update_staff(
        &self,
        staff_id: i32,
        hub_id: i32,
        updates: &UpdateStaffMember,
    ) -> RepositoryResult<StaffMember>;
    fn set_staff_banned(
        &self,
        staff_id: i32,
        hub_id: i32,
        is_banned: bool,
    ) -> RepositoryResult<StaffMember>;
    fn delete_staff(&self, staff_id: i32, hub_id: i32) -> RepositoryResult<()>;
}
