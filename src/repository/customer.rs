use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::customer::{
        Customer as DomainCustomer, CustomerListQuery, NewCustomer as DomainNewCustomer,
        UpdateCustomer as DomainUpdateCustomer,
    },
    domain::pricing::CustomerTier,
    models::customer::{
        Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
    },
    repository::{CustomerReader, CustomerWriter, DieselRepository},
    schema::customers,
};

fn filtered_customers(query: &CustomerListQuery) -> customers::BoxedQuery<'static, Sqlite> {
    let mut items = customers::table
        .filter(customers::hub_id.eq(query.hub_id))
        .into_boxed::<Sqlite>();

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            customers::name
                .like(pattern.clone())
                .or(customers::business_name.like(pattern.clone()))
                .or(customers::email.like(pattern.clone()))
                .or(customers::phone.like(pattern)),
        );
    }

    if let Some(tier) = query.tier {
        items = items.filter(customers::tier.eq(tier.as_str()));
    }

    if let Some(is_banned) = query.is_banned {
        items = items.filter(customers::is_banned.eq(is_banned));
    }

    items
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainCustomer>> {
        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id))
            .filter(customers::hub_id.eq(hub_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn get_customer_by_email(
        &self,
        email: &str,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainCustomer>> {
        let normalized_email = email.trim().to_lowercase();

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::email.eq(normalized_email))
            .filter(customers::hub_id.eq(hub_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn get_customer_by_phone(
        &self,
        phone: &str,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainCustomer>> {
        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::phone.eq(phone))
            .filter(customers::hub_id.eq(hub_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCustomer>)> {
        let mut conn = self.conn()?;

        let total = filtered_customers(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_customers(&query).order(customers::created_at.desc());

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_customers = items.load::<DbCustomer>(&mut conn)?;

        Ok((total, db_customers.into_iter().map(Into::into).collect()))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(
        &self,
        new_customer: &DomainNewCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;

        let db_new = DbNewCustomer::from(new_customer);

        let created = diesel::insert_into(customers::table)
            .values(&db_new)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(created.into())
    }

    fn update_customer_tier(
        &self,
        customer_id: i32,
        hub_id: i32,
        tier: Option<CustomerTier>,
    ) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;

        let target = customers::table
            .filter(customers::id.eq(customer_id))
            .filter(customers::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set((
                customers::tier.eq(tier.map(|tier| tier.as_str())),
                customers::updated_at.eq(Local::now().naive_utc()),
            ))
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_customer_banned(
        &self,
        customer_id: i32,
        hub_id: i32,
        is_banned: bool,
    ) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;

        let target = customers::table
            .filter(customers::id.eq(customer_id))
            .filter(customers::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set((
                customers::is_banned.eq(is_banned),
                customers::updated_at.eq(Local::now().naive_utc()),
            ))
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(updated.into())
    }

    fn update_customer(
        &self,
        customer_id: i32,
        hub_id: i32,
        updates: &DomainUpdateCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;

        let db_updates = DbUpdateCustomer::from(updates);

        let target = customers::table
            .filter(customers::id.eq(customer_id))
            .filter(customers::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_customer(&self, customer_id: i32, hub_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            customers::table
                .filter(customers::id.eq(customer_id))
                .filter(customers::hub_id.eq(hub_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
