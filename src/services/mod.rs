pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod attributes;
pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;
pub mod staff;
pub mod storefront;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::domain::auth::AuthenticatedUser;

    use crate::domain::customer::Customer;
    use crate::domain::pricing::{CustomerTier, PriceTriple};
    use crate::domain::product::Product;
    use crate::domain::variant::{AttributeOption, ProductVariant, VariantDetails};

    pub const HUB_ID: i32 = 9;

    pub fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    pub fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            hub_id: HUB_ID,
            name: "Tester".to_string(),
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            exp: 0,
        }
    }

    pub fn sample_customer(tier: Option<CustomerTier>) -> Customer {
        Customer {
            id: 5,
            hub_id: HUB_ID,
            name: "Ann Lee".to_string(),
            business_name: "Lee Prints".to_string(),
            email: "user@example.com".to_string(),
            phone: "5551234567".to_string(),
            gst_number: None,
            tier,
            is_banned: false,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    pub fn details(sku: &str, min_price: i64, options: &[(i32, &str)]) -> VariantDetails {
        VariantDetails {
            sku: sku.to_string(),
            min_qty: 1000,
            prices: PriceTriple {
                min_price_cents: min_price,
                avg_price_cents: min_price + 100,
                max_price_cents: min_price + 200,
            },
            og_price_cents: min_price + 300,
            is_available: true,
            image_url: None,
            options: options
                .iter()
                .map(|(id, value)| AttributeOption::new(*id, *value))
                .collect(),
        }
    }

    pub fn stored_variant(id: i32, product_id: i32, details: VariantDetails) -> ProductVariant {
        ProductVariant {
            id,
            product_id,
            details,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    pub fn sample_product(id: i32, variants: Vec<ProductVariant>) -> Product {
        Product {
            id,
            hub_id: HUB_ID,
            category_id: 2,
            name: "Business Cards".to_string(),
            description: None,
            min_qty: 1000,
            prices: PriceTriple {
                min_price_cents: 5000,
                avg_price_cents: 5500,
                max_price_cents: 6000,
            },
            og_price_cents: 7000,
            is_available: true,
            image_url: None,
            variants,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }
}
