use std::collections::HashMap;

use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    domain::variant::{
        AttributeOption, ProductVariant as DomainProductVariant, SkuConflicts, VariantChangeSet,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    models::variant::{
        NewProductVariant as DbNewProductVariant, NewVariantOption as DbNewVariantOption,
        ProductVariant as DbProductVariant, UpdateProductVariant as DbUpdateProductVariant,
        VariantOption as DbVariantOption,
    },
    repository::{DieselRepository, ProductReader, ProductWriter},
    schema::products,
};

fn filtered_products(query: &ProductListQuery) -> products::BoxedQuery<'static, Sqlite> {
    use crate::schema::categories;

    let mut items = products::table
        .filter(products::hub_id.eq(query.hub_id))
        .into_boxed::<Sqlite>();

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            products::name
                .like(pattern.clone())
                .or(products::description.like(pattern)),
        );
    }

    if let Some(category_id) = query.category_id {
        items = items.filter(products::category_id.eq(category_id));
    }

    if let Some(is_available) = query.is_available {
        items = items.filter(products::is_available.eq(is_available));
    }

    if query.visible_only {
        items = items.filter(products::is_available.eq(true)).filter(
            products::category_id.eq_any(
                categories::table
                    .filter(categories::hub_id.eq(query.hub_id))
                    .filter(categories::is_available.eq(true))
                    .select(categories::id),
            ),
        );
    }

    items
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::hub_id.eq(hub_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        if let Some(db_product) = product {
            let mut domain: DomainProduct = db_product.into();
            let mut variants = load_variants_for_products(&mut conn, &[domain.id])?;
            domain.variants = variants.remove(&domain.id).unwrap_or_default();
            Ok(Some(domain))
        } else {
            Ok(None)
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        let mut conn = self.conn()?;

        let total = filtered_products(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items =
            filtered_products(&query).order((products::name.asc(), products::id.asc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
        let mut variant_map = load_variants_for_products(&mut conn, &product_ids)?;

        let mut domain_products = Vec::with_capacity(db_products.len());
        for db_product in db_products {
            let mut domain: DomainProduct = db_product.into();
            domain.variants = variant_map.remove(&domain.id).unwrap_or_default();
            domain_products.push(domain);
        }

        Ok((total, domain_products))
    }

    fn find_sku_conflicts(
        &self,
        product_id: i32,
        hub_id: i32,
        skus: &[String],
    ) -> RepositoryResult<SkuConflicts> {
        use crate::schema::product_variants;

        if skus.is_empty() {
            return Ok(SkuConflicts::default());
        }

        let mut conn = self.conn()?;

        let owners = product_variants::table
            .inner_join(products::table)
            .filter(product_variants::product_id.ne(product_id))
            .filter(product_variants::sku.eq_any(skus))
            .select((product_variants::sku, products::hub_id))
            .order(product_variants::sku.asc())
            .load::<(String, i32)>(&mut conn)?;

        let mut conflicts = SkuConflicts::default();
        for (sku, owner_hub_id) in owners {
            if owner_hub_id == hub_id {
                conflicts.same_hub.push(sku);
            } else {
                conflicts.other_hubs += 1;
            }
        }

        Ok(conflicts)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let target = products::table
            .filter(products::id.eq(product_id))
            .filter(products::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        let mut domain: DomainProduct = updated.into();
        let mut variants = load_variants_for_products(&mut conn, &[domain.id])?;
        domain.variants = variants.remove(&domain.id).unwrap_or_default();

        Ok(domain)
    }

    fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::{orders, product_variants};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let target = products::table
                .filter(products::id.eq(product_id))
                .filter(products::hub_id.eq(hub_id));

            let exists = diesel::select(diesel::dsl::exists(target.clone()))
                .get_result::<bool>(conn)?;
            if !exists {
                return Err(RepositoryError::NotFound);
            }

            let variant_ids = product_variants::table
                .filter(product_variants::product_id.eq(product_id))
                .select(product_variants::id)
                .load::<i32>(conn)?;
            delete_variants(conn, &variant_ids)?;

            diesel::update(orders::table.filter(orders::product_id.eq(Some(product_id))))
                .set(orders::product_id.eq::<Option<i32>>(None))
                .execute(conn)?;

            diesel::delete(target).execute(conn)?;

            Ok(())
        })
    }

    fn apply_variant_changes(
        &self,
        product_id: i32,
        hub_id: i32,
        changes: &VariantChangeSet,
    ) -> RepositoryResult<()> {
        use crate::schema::product_variants;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let now = Local::now().naive_utc();

            let touched = diesel::update(
                products::table
                    .filter(products::id.eq(product_id))
                    .filter(products::hub_id.eq(hub_id)),
            )
            .set(products::updated_at.eq(now))
            .execute(conn)?;

            if touched == 0 {
                return Err(RepositoryError::NotFound);
            }

            if !changes.deleted.is_empty() {
                let variant_ids = product_variants::table
                    .filter(product_variants::product_id.eq(product_id))
                    .filter(product_variants::sku.eq_any(&changes.deleted))
                    .select(product_variants::id)
                    .load::<i32>(conn)?;
                delete_variants(conn, &variant_ids)?;
            }

            for details in &changes.updated {
                let variant_id = diesel::update(
                    product_variants::table
                        .filter(product_variants::product_id.eq(product_id))
                        .filter(product_variants::sku.eq(&details.sku)),
                )
                .set(&DbUpdateProductVariant::from_details(details, now))
                .returning(product_variants::id)
                .get_result::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

                replace_options(conn, variant_id, &details.options)?;
            }

            for details in &changes.created {
                let variant_id = diesel::insert_into(product_variants::table)
                    .values(&DbNewProductVariant::from_details(product_id, details))
                    .returning(product_variants::id)
                    .get_result::<i32>(conn)?;

                replace_options(conn, variant_id, &details.options)?;
            }

            Ok(())
        })
    }
}

fn replace_options(
    conn: &mut SqliteConnection,
    variant_id: i32,
    options: &[AttributeOption],
) -> RepositoryResult<()> {
    use crate::schema::variant_options;

    diesel::delete(variant_options::table.filter(variant_options::variant_id.eq(variant_id)))
        .execute(conn)?;

    if options.is_empty() {
        return Ok(());
    }

    let rows: Vec<DbNewVariantOption> = options
        .iter()
        .map(|option| DbNewVariantOption::from_domain(variant_id, option))
        .collect();

    diesel::insert_into(variant_options::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

fn delete_variants(conn: &mut SqliteConnection, variant_ids: &[i32]) -> RepositoryResult<()> {
    use crate::schema::{orders, product_variants, variant_options};

    if variant_ids.is_empty() {
        return Ok(());
    }

    diesel::update(orders::table.filter(orders::variant_id.eq_any(variant_ids)))
        .set(orders::variant_id.eq::<Option<i32>>(None))
        .execute(conn)?;
    diesel::delete(variant_options::table.filter(variant_options::variant_id.eq_any(variant_ids)))
        .execute(conn)?;
    diesel::delete(product_variants::table.filter(product_variants::id.eq_any(variant_ids)))
        .execute(conn)?;

    Ok(())
}

fn load_variants_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainProductVariant>>> {
    use crate::schema::{product_variants, variant_options};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let variants = product_variants::table
        .filter(product_variants::product_id.eq_any(product_ids))
        .order(product_variants::id.asc())
        .load::<DbProductVariant>(conn)?;

    let options = DbVariantOption::belonging_to(&variants)
        .order((variant_options::attribute_type_id.asc(), variant_options::id.asc()))
        .load::<DbVariantOption>(conn)?;

    let grouped = options.grouped_by(&variants);

    let mut map: HashMap<i32, Vec<DomainProductVariant>> = HashMap::new();
    for (variant, options) in variants.into_iter().zip(grouped) {
        map.entry(variant.product_id)
            .or_default()
            .push(variant.into_domain(options));
    }

    Ok(map)
}
