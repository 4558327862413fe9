use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::attribute::{AttributeType, NamedAttributeGroup, name_attribute_groups};
use crate::domain::category::{Category, CategoryListQuery};
use crate::domain::product::{Product, ProductListQuery, UpdateProduct};
use crate::domain::variant::{
    VariantChangeSet, VariantDetails, extract_attributes, reconcile_variants,
};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::forms::variants::{SaveVariantsForm, UploadVariantsForm};
use crate::repository::{AttributeTypeReader, CategoryReader, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the products index page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Optional category filter.
    pub category_id: Option<i32>,
    /// Optional availability filter.
    pub available: Option<bool>,
    /// Page requested by the UI (1-based).
    pub page: Option<usize>,
}

/// Data required to render the products index template.
pub struct ProductsPageData {
    pub products: Paginated<Product>,
    /// Categories for the filter and the "Add product" modal.
    pub categories: Vec<Category>,
    pub search: Option<String>,
    pub category_id: Option<i32>,
    pub available: Option<bool>,
}

/// Data required to render the product editor.
pub struct ProductEditorData {
    pub product: Product,
    pub category: Option<Category>,
    /// Attribute types a variant of this product may use.
    pub attribute_types: Vec<AttributeType>,
    /// Attribute values currently used by the variants.
    pub attributes: Vec<NamedAttributeGroup>,
}

/// Number of variant rows touched by a synchronisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VariantSyncSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl From<&VariantChangeSet> for VariantSyncSummary {
    fn from(changes: &VariantChangeSet) -> Self {
        Self {
            created: changes.created.len(),
            updated: changes.updated.len(),
            deleted: changes.deleted.len(),
        }
    }
}

/// Loads the products overview page.
pub fn load_products_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ProductsQuery,
) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let ProductsQuery {
        search,
        category_id,
        available,
        page,
    } = query;

    let page = page.unwrap_or(1);
    let mut list_query = ProductListQuery::new(user.hub_id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_ref().filter(|term| !term.trim().is_empty()) {
        list_query = list_query.search(search_term.trim());
    }

    if let Some(category_id) = category_id {
        list_query = list_query.category(category_id);
    }

    if let Some(available) = available {
        list_query = list_query.available(available);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;
    let (_, categories) = repo
        .list_categories(CategoryListQuery::new(user.hub_id).include_unavailable())
        .map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let products = Paginated::new(items, page, total_pages);

    Ok(ProductsPageData {
        products,
        categories,
        search,
        category_id,
        available,
    })
}

/// Creates a new product for the authenticated user's hub.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: CategoryReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_product = form
        .into_new_product(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_category(repo, user.hub_id, new_product.category_id)?;

    repo.create_product(&new_product).map_err(ServiceError::from)
}

/// Replaces the editable fields of a product.
pub fn modify_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: CategoryReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_category(repo, user.hub_id, payload.update.category_id)?;

    repo.update_product(payload.product_id, user.hub_id, &payload.update)
        .map_err(ServiceError::from)
}

/// Flips the customer visibility of a product.
pub fn toggle_product_availability<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product = repo
        .get_product_by_id(product_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let update = UpdateProduct::from_product(&product).available(!product.is_available);

    repo.update_product(product.id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

/// Deletes a product together with its variants.
pub fn remove_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_product(product_id, user.hub_id)
        .map_err(ServiceError::from)
}

/// Loads a product with everything the variant editor needs.
pub fn load_product_editor<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<ProductEditorData>
where
    R: ProductReader + CategoryReader + AttributeTypeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product = repo
        .get_product_by_id(product_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let category = repo
        .get_category_by_id(product.category_id, user.hub_id)
        .map_err(ServiceError::from)?;

    let attribute_types = repo
        .list_attribute_types(user.hub_id, Some(product.category_id))
        .map_err(ServiceError::from)?;

    let groups = extract_attributes(product.variants.iter().map(|variant| &variant.details));
    let attributes = name_attribute_groups(groups, &attribute_types);

    Ok(ProductEditorData {
        product,
        category,
        attribute_types,
        attributes,
    })
}

/// Replaces the variants of a product with the submitted list.
pub fn save_variants<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: SaveVariantsForm,
) -> ServiceResult<VariantSyncSummary>
where
    R: ProductReader + ProductWriter + AttributeTypeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (product, attribute_types) = load_product_with_attribute_types(repo, user, product_id)?;

    let incoming = form
        .into_variant_details(&attribute_types)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    sync_variants(repo, &product, incoming)
}

/// Replaces the variants of a product with the rows of an uploaded CSV.
pub fn import_variants<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    mut form: UploadVariantsForm,
) -> ServiceResult<VariantSyncSummary>
where
    R: ProductReader + ProductWriter + AttributeTypeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (product, attribute_types) = load_product_with_attribute_types(repo, user, product_id)?;

    let incoming = form
        .parse(&attribute_types)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    sync_variants(repo, &product, incoming)
}

fn ensure_category<R>(repo: &R, hub_id: i32, category_id: i32) -> ServiceResult<()>
where
    R: CategoryReader + ?Sized,
{
    match repo
        .get_category_by_id(category_id, hub_id)
        .map_err(ServiceError::from)?
    {
        Some(_) => Ok(()),
        None => Err(ServiceError::Form(format!("unknown category {category_id}"))),
    }
}

fn load_product_with_attribute_types<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<(Product, Vec<AttributeType>)>
where
    R: ProductReader + AttributeTypeReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let attribute_types = repo
        .list_attribute_types(user.hub_id, Some(product.category_id))
        .map_err(ServiceError::from)?;

    Ok((product, attribute_types))
}

fn sync_variants<R>(
    repo: &R,
    product: &Product,
    incoming: Vec<VariantDetails>,
) -> ServiceResult<VariantSyncSummary>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let changes = reconcile_variants(
        product.variants.iter().map(|variant| &variant.details),
        &incoming,
    )
    .map_err(|err| ServiceError::Form(err.to_string()))?;

    if changes.is_empty() {
        log::info!("Variants of product {} are already up to date", product.id);
        return Ok(VariantSyncSummary::default());
    }

    let new_skus: Vec<String> = changes
        .created
        .iter()
        .map(|variant| variant.sku.clone())
        .collect();
    let conflicts = repo
        .find_sku_conflicts(product.id, product.hub_id, &new_skus)
        .map_err(ServiceError::from)?;
    if !conflicts.same_hub.is_empty() {
        return Err(ServiceError::Form(format!(
            "SKU already used by another product: {}",
            conflicts.same_hub.join(", ")
        )));
    }
    if conflicts.other_hubs > 0 {
        return Err(ServiceError::Form(
            "SKU is not available, choose a different code".to_string(),
        ));
    }

    repo.apply_variant_changes(product.id, product.hub_id, &changes)
        .map_err(ServiceError::from)?;

    let summary = VariantSyncSummary::from(&changes);
    log::info!(
        "Synced variants of product {}: {} created, {} updated, {} deleted",
        product.id,
        summary.created,
        summary.updated,
        summary.deleted
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::category::{Category, CategoryListQuery};
    use crate::domain::product::NewProduct;
    use crate::domain::variant::{AttributeOption, SkuConflicts};
    use crate::forms::variants::{VariantInput, VariantOptionInput};
    use crate::repository::mock::{
        MockAttributeTypeReader, MockCategoryReader, MockProductReader, MockProductWriter,
    };
    use crate::services::test_support::{
        HUB_ID, details, fixed_datetime, sample_product, stored_variant, user_with_roles,
    };
    use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

    #[derive(Default)]
    struct FakeRepo {
        products: MockProductReader,
        writer: MockProductWriter,
        categories: MockCategoryReader,
        attributes: MockAttributeTypeReader,
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>> {
            self.products.get_product_by_id(id, hub_id)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.products.list_products(query)
        }

        fn find_sku_conflicts(
            &self,
            product_id: i32,
            hub_id: i32,
            skus: &[String],
        ) -> RepositoryResult<SkuConflicts> {
            self.products.find_sku_conflicts(product_id, hub_id, skus)
        }
    }

    impl ProductWriter for FakeRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.writer.create_product(new_product)
        }

        fn update_product(
            &self,
            product_id: i32,
            hub_id: i32,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product> {
            self.writer.update_product(product_id, hub_id, updates)
        }

        fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()> {
            self.writer.delete_product(product_id, hub_id)
        }

        fn apply_variant_changes(
            &self,
            product_id: i32,
            hub_id: i32,
            changes: &VariantChangeSet,
        ) -> RepositoryResult<()> {
            self.writer
                .apply_variant_changes(product_id, hub_id, changes)
        }
    }

    impl CategoryReader for FakeRepo {
        fn get_category_by_id(
            &self,
            category_id: i32,
            hub_id: i32,
        ) -> RepositoryResult<Option<Category>> {
            self.categories.get_category_by_id(category_id, hub_id)
        }

        fn list_categories(
            &self,
            query: CategoryListQuery,
        ) -> RepositoryResult<(usize, Vec<Category>)> {
            self.categories.list_categories(query)
        }
    }

    impl AttributeTypeReader for FakeRepo {
        fn get_attribute_type_by_id(
            &self,
            attribute_type_id: i32,
            hub_id: i32,
        ) -> RepositoryResult<Option<AttributeType>> {
            self.attributes
                .get_attribute_type_by_id(attribute_type_id, hub_id)
        }

        fn list_attribute_types(
            &self,
            hub_id: i32,
            category_id: Option<i32>,
        ) -> RepositoryResult<Vec<AttributeType>> {
            self.attributes.list_attribute_types(hub_id, category_id)
        }
    }

    fn attribute_types() -> Vec<AttributeType> {
        vec![
            AttributeType {
                id: 3,
                hub_id: HUB_ID,
                category_id: 2,
                name: "Paper Weight".to_string(),
                created_at: fixed_datetime(),
                updated_at: fixed_datetime(),
            },
            AttributeType {
                id: 4,
                hub_id: HUB_ID,
                category_id: 2,
                name: "Finish".to_string(),
                created_at: fixed_datetime(),
                updated_at: fixed_datetime(),
            },
        ]
    }

    fn category() -> Category {
        Category {
            id: 2,
            hub_id: HUB_ID,
            name: "Cards".to_string(),
            description: None,
            is_available: true,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn variant_input(sku: &str, min_price: &str, options: &[(i32, &str)]) -> VariantInput {
        VariantInput {
            sku: sku.to_string(),
            min_qty: "1000".to_string(),
            min_price: min_price.to_string(),
            avg_price: "60".to_string(),
            max_price: "65".to_string(),
            is_available: Some("on".to_string()),
            options: options
                .iter()
                .map(|(id, value)| VariantOptionInput {
                    attribute_type_id: *id,
                    value: value.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn repo_with_product(product: Product) -> FakeRepo {
        let mut repo = FakeRepo::default();
        repo.products
            .expect_get_product_by_id()
            .returning(move |_, _| Ok(Some(product.clone())));
        repo.attributes
            .expect_list_attribute_types()
            .returning(|hub_id, category_id| {
                assert_eq!(hub_id, HUB_ID);
                assert_eq!(category_id, Some(2));
                Ok(attribute_types())
            });
        repo
    }

    #[test]
    fn load_products_page_requires_role() {
        let repo = FakeRepo::default();
        let user = user_with_roles(&[]);

        let result = load_products_page(&repo, &user, ProductsQuery::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_products_page_passes_filters() {
        let mut repo = FakeRepo::default();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.products
            .expect_list_products()
            .times(1)
            .returning(|query| {
                assert_eq!(query.hub_id, HUB_ID);
                assert_eq!(query.search.as_deref(), Some("cards"));
                assert_eq!(query.category_id, Some(2));
                assert_eq!(query.is_available, Some(false));
                assert!(!query.visible_only);
                let pagination = query.pagination.expect("pagination expected");
                assert_eq!(pagination.page, 2);
                Ok((1, vec![sample_product(1, Vec::new())]))
            });
        repo.categories
            .expect_list_categories()
            .returning(|_| Ok((1, vec![category()])));

        let data = load_products_page(
            &repo,
            &user,
            ProductsQuery {
                search: Some(" cards ".to_string()),
                category_id: Some(2),
                available: Some(false),
                page: Some(2),
            },
        )
        .expect("expected success");

        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.category_id, Some(2));
    }

    #[test]
    fn create_product_rejects_unknown_category() {
        let mut repo = FakeRepo::default();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.categories
            .expect_get_category_by_id()
            .returning(|_, _| Ok(None));
        repo.writer.expect_create_product().never();

        let form = AddProductForm {
            category_id: 77,
            name: "Flyers".to_string(),
            description: None,
            min_qty: 100,
            min_price: "1".to_string(),
            avg_price: "2".to_string(),
            max_price: "3".to_string(),
            og_price: None,
            image_url: None,
        };

        assert!(matches!(
            create_product(&repo, &user, form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn toggle_flips_availability() {
        let mut repo = FakeRepo::default();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.products
            .expect_get_product_by_id()
            .returning(|id, _| Ok(Some(sample_product(id, Vec::new()))));
        repo.writer
            .expect_update_product()
            .times(1)
            .withf(|product_id, hub_id, update| {
                *product_id == 1 && *hub_id == HUB_ID && !update.is_available
            })
            .returning(|id, _, _| {
                let mut product = sample_product(id, Vec::new());
                product.is_available = false;
                Ok(product)
            });

        let product = toggle_product_availability(&repo, &user, 1).expect("expected success");

        assert!(!product.is_available);
    }

    #[test]
    fn remove_product_maps_missing_rows() {
        let mut repo = FakeRepo::default();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.writer
            .expect_delete_product()
            .returning(|_, _| Err(RepositoryError::NotFound));

        assert!(matches!(
            remove_product(&repo, &user, 1),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn editor_groups_variant_attributes() {
        let product = sample_product(
            1,
            vec![
                stored_variant(1, 1, details("BC-300", 5000, &[(3, "300 GSM"), (4, "Matte")])),
                stored_variant(2, 1, details("BC-350", 5379, &[(3, "350 GSM"), (4, "Matte")])),
            ],
        );
        let mut repo = repo_with_product(product);
        repo.categories
            .expect_get_category_by_id()
            .returning(|_, _| Ok(Some(category())));
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let data = load_product_editor(&repo, &user, 1).expect("expected success");

        assert_eq!(data.attribute_types.len(), 2);
        assert_eq!(data.attributes.len(), 2);
        assert_eq!(data.attributes[0].name.as_deref(), Some("Paper Weight"));
        assert_eq!(data.attributes[0].values, vec!["300 GSM", "350 GSM"]);
        assert_eq!(data.attributes[1].values, vec!["Matte"]);
    }

    #[test]
    fn save_variants_applies_reconciled_changes() {
        let product = sample_product(
            1,
            vec![
                stored_variant(1, 1, details("BC-300", 5000, &[(3, "300 GSM")])),
                stored_variant(2, 1, details("BC-350", 5379, &[(3, "350 GSM")])),
            ],
        );
        let mut repo = repo_with_product(product);
        repo.products
            .expect_find_sku_conflicts()
            .times(1)
            .returning(|product_id, hub_id, skus| {
                assert_eq!(product_id, 1);
                assert_eq!(hub_id, HUB_ID);
                assert_eq!(skus, &["BC-400".to_string()]);
                Ok(SkuConflicts::default())
            });
        repo.writer
            .expect_apply_variant_changes()
            .times(1)
            .withf(|product_id, hub_id, changes| {
                *product_id == 1
                    && *hub_id == HUB_ID
                    && changes.created.len() == 1
                    && changes.created[0].sku == "BC-400"
                    && changes.updated.len() == 1
                    && changes.updated[0].sku == "BC-350"
                    && changes.updated[0].options == vec![AttributeOption::new(4, "Glossy")]
                    && changes.deleted == vec!["BC-300".to_string()]
            })
            .returning(|_, _, _| Ok(()));
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let form = SaveVariantsForm {
            variants: vec![
                variant_input("BC-350", "53.79", &[(4, "Glossy")]),
                variant_input("BC-400", "55", &[(3, "400 GSM")]),
            ],
        };

        let summary = save_variants(&repo, &user, 1, form).expect("expected success");

        assert_eq!(
            summary,
            VariantSyncSummary {
                created: 1,
                updated: 1,
                deleted: 1
            }
        );
    }

    #[test]
    fn save_variants_skips_storage_when_nothing_changed() {
        let mut stored = details("BC-350", 5379, &[(3, "350 GSM")]);
        stored.prices.avg_price_cents = 6000;
        stored.prices.max_price_cents = 6500;
        stored.og_price_cents = 6500;
        let product = sample_product(1, vec![stored_variant(2, 1, stored)]);
        let mut repo = repo_with_product(product);
        repo.products.expect_find_sku_conflicts().never();
        repo.writer.expect_apply_variant_changes().never();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let form = SaveVariantsForm {
            variants: vec![variant_input("BC-350", "53.79", &[(3, "350 GSM")])],
        };

        let summary = save_variants(&repo, &user, 1, form).expect("expected success");

        assert_eq!(summary, VariantSyncSummary::default());
    }

    #[test]
    fn save_variants_rejects_duplicate_skus() {
        let product = sample_product(1, Vec::new());
        let mut repo = repo_with_product(product);
        repo.writer.expect_apply_variant_changes().never();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let form = SaveVariantsForm {
            variants: vec![
                variant_input("BC-350", "53.79", &[]),
                variant_input("BC-350", "55", &[]),
            ],
        };

        match save_variants(&repo, &user, 1, form) {
            Err(ServiceError::Form(message)) => assert!(message.contains("BC-350")),
            other => panic!("expected form error, got {other:?}"),
        }
    }

    #[test]
    fn save_variants_rejects_sku_of_another_product() {
        let product = sample_product(1, Vec::new());
        let mut repo = repo_with_product(product);
        repo.products
            .expect_find_sku_conflicts()
            .returning(|_, _, skus| {
                Ok(SkuConflicts {
                    same_hub: skus.to_vec(),
                    other_hubs: 0,
                })
            });
        repo.writer.expect_apply_variant_changes().never();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let form = SaveVariantsForm {
            variants: vec![variant_input("FL-A5", "10", &[])],
        };

        assert!(matches!(
            save_variants(&repo, &user, 1, form),
            Err(ServiceError::Form(message)) if message.contains("FL-A5")
        ));
    }

    #[test]
    fn save_variants_hides_skus_owned_by_other_hubs() {
        let product = sample_product(1, Vec::new());
        let mut repo = repo_with_product(product);
        repo.products
            .expect_find_sku_conflicts()
            .returning(|_, _, _| {
                Ok(SkuConflicts {
                    same_hub: Vec::new(),
                    other_hubs: 1,
                })
            });
        repo.writer.expect_apply_variant_changes().never();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let form = SaveVariantsForm {
            variants: vec![variant_input("OTHER-1", "10", &[])],
        };

        match save_variants(&repo, &user, 1, form) {
            Err(ServiceError::Form(message)) => assert!(!message.contains("OTHER-1")),
            other => panic!("expected form error, got {other:?}"),
        }
    }

    #[test]
    fn save_variants_returns_not_found_for_missing_product() {
        let mut repo = FakeRepo::default();
        repo.products
            .expect_get_product_by_id()
            .returning(|_, _| Ok(None));
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        assert!(matches!(
            save_variants(&repo, &user, 1, SaveVariantsForm::default()),
            Err(ServiceError::NotFound)
        ));
    }
}
