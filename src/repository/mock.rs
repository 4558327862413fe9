use mockall::mock;

use super::{
    AttributeTypeReader, AttributeTypeWriter, CategoryReader, CategoryWriter, CustomerReader,
    CustomerWriter, OrderReader, OrderWriter, ProductReader, ProductWriter, StaffReader,
    StaffWriter,
};
use crate::domain::{
    attribute::{AttributeType, NewAttributeType},
    category::{Category, CategoryListQuery, NewCategory, UpdateCategory},
    customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer},
    order::{NewOrder, Order, OrderListQuery, OrderStatus},
    pricing::CustomerTier,
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    staff::{NewStaffMember, StaffListQuery, StaffMember, UpdateStaffMember},
    variant::{SkuConflicts, VariantChangeSet},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, category_id: i32, hub_id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<(usize, Vec<Category>)>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, hub_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub AttributeTypeReader {}

    impl AttributeTypeReader for AttributeTypeReader {
        fn get_attribute_type_by_id(&self, attribute_type_id: i32, hub_id: i32) -> RepositoryResult<Option<AttributeType>>;
        fn list_attribute_types(&self, hub_id: i32, category_id: Option<i32>) -> RepositoryResult<Vec<AttributeType>>;
    }
}

mock! {
    pub AttributeTypeWriter {}

    impl AttributeTypeWriter for AttributeTypeWriter {
        fn create_attribute_type(&self, new_attribute_type: &NewAttributeType) -> RepositoryResult<AttributeType>;
        fn delete_attribute_type(&self, attribute_type_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn find_sku_conflicts(&self, product_id: i32, hub_id: i32, skus: &[String]) -> RepositoryResult<SkuConflicts>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, hub_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
        fn apply_variant_changes(&self, product_id: i32, hub_id: i32, changes: &VariantChangeSet) -> RepositoryResult<()>;
    }
}

mock! {
    pub CustomerReader {}

    impl CustomerReader for CustomerReader {
        fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Customer>>;
        fn get_customer_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<Customer>>;
        fn get_customer_by_phone(&self, phone: &str, hub_id: i32) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }
}

mock! {
    pub CustomerWriter {}

    impl CustomerWriter for CustomerWriter {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer_tier(&self, customer_id: i32, hub_id: i32, tier: Option<CustomerTier>) -> RepositoryResult<Customer>;
        fn set_customer_banned(&self, customer_id: i32, hub_id: i32, is_banned: bool) -> RepositoryResult<Customer>;
        fn update_customer(&self, customer_id: i32, hub_id: i32, updates: &UpdateCustomer) -> RepositoryResult<Customer>;
        fn delete_customer(&self, customer_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, order_id: i32, hub_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
    }
}

mock! {
    pub StaffReader {}

    impl StaffReader for StaffReader {
        fn get_staff_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<StaffMember>>;
        fn get_staff_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<StaffMember>>;
        fn get_staff_by_phone(&self, phone: &str, hub_id: i32) -> RepositoryResult<Option<StaffMember>>;
        fn list_staff(&self, query: StaffListQuery) -> RepositoryResult<(usize, Vec<StaffMember>)>;
    }
}

mock! {
    pub StaffWriter {}

    impl StaffWriter for StaffWriter {
        fn create_staff(&self, new_member: &NewStaffMember) -> RepositoryResult<StaffMember>;
        fn update_staff(&self, staff_id: i32, hub_id: i32, updates: &UpdateStaffMember) -> RepositoryResult<StaffMember>;
        fn set_staff_banned(&self, staff_id: i32, hub_id: i32, is_banned: bool) -> RepositoryResult<StaffMember>;
        fn delete_staff(&self, staff_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}
