use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use pushkind_common::repository::errors::RepositoryResult;

use crate::{
    domain::order::{NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery, OrderStatus},
    models::order::{NewOrder as DbNewOrder, Order as DbOrder},
    repository::{DieselRepository, OrderReader, OrderWriter},
    schema::orders,
};

fn filtered_orders(query: &OrderListQuery) -> orders::BoxedQuery<'static, Sqlite> {
    let mut items = orders::table
        .filter(orders::hub_id.eq(query.hub_id))
        .into_boxed::<Sqlite>();

    if let Some(status) = query.status {
        items = items.filter(orders::status.eq(status.as_str()));
    }

    if let Some(customer_id) = query.customer_id {
        items = items.filter(orders::customer_id.eq(customer_id));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            orders::sku
                .like(pattern.clone())
                .or(orders::product_name.like(pattern)),
        );
    }

    items
}

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainOrder>> {
        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .filter(orders::hub_id.eq(hub_id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        Ok(order.map(Into::into))
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        let mut conn = self.conn()?;

        let total = filtered_orders(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items =
            filtered_orders(&query).order((orders::created_at.desc(), orders::id.desc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_orders = items.load::<DbOrder>(&mut conn)?;

        Ok((total, db_orders.into_iter().map(Into::into).collect()))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(orders::table)
            .values(&DbNewOrder::from(new_order))
            .get_result::<DbOrder>(&mut conn)?;

        Ok(created.into())
    }

    fn update_order_status(
        &self,
        order_id: i32,
        hub_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;

        let target = orders::table
            .filter(orders::id.eq(order_id))
            .filter(orders::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set((
                orders::status.eq(status.as_str()),
                orders::updated_at.eq(Local::now().naive_utc()),
            ))
            .get_result::<DbOrder>(&mut conn)?;

        Ok(updated.into())
    }
}
