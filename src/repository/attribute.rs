use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::attribute::{
    AttributeType as DomainAttributeType, NewAttributeType as DomainNewAttributeType,
};
use crate::models::attribute::{
    AttributeType as DbAttributeType, NewAttributeType as DbNewAttributeType,
};
use crate::repository::{AttributeTypeReader, AttributeTypeWriter, DieselRepository};

impl AttributeTypeReader for DieselRepository {
    fn get_attribute_type_by_id(
        &self,
        attribute_type_id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainAttributeType>> {
        use crate::schema::attribute_types;

        let mut conn = self.conn()?;

        let attribute_type = attribute_types::table
            .filter(attribute_types::id.eq(attribute_type_id))
            .filter(attribute_types::hub_id.eq(hub_id))
            .first::<DbAttributeType>(&mut conn)
            .optional()?;

        Ok(attribute_type.map(Into::into))
    }

    fn list_attribute_types(
        &self,
        hub_id: i32,
        category_id: Option<i32>,
    ) -> RepositoryResult<Vec<DomainAttributeType>> {
        use crate::schema::attribute_types;

        let mut conn = self.conn()?;

        let mut items = attribute_types::table
            .filter(attribute_types::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = category_id {
            items = items.filter(attribute_types::category_id.eq(category_id));
        }

        let rows = items
            .order((attribute_types::name.asc(), attribute_types::id.asc()))
            .load::<DbAttributeType>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl AttributeTypeWriter for DieselRepository {
    fn create_attribute_type(
        &self,
        new_attribute_type: &DomainNewAttributeType,
    ) -> RepositoryResult<DomainAttributeType> {
        use crate::schema::{attribute_types, categories};

        let mut conn = self.conn()?;

        conn.transaction::<DomainAttributeType, RepositoryError, _>(|conn| {
            let category_exists = diesel::select(diesel::dsl::exists(
                categories::table
                    .filter(categories::id.eq(new_attribute_type.category_id))
                    .filter(categories::hub_id.eq(new_attribute_type.hub_id)),
            ))
            .get_result::<bool>(conn)?;

            if !category_exists {
                return Err(RepositoryError::NotFound);
            }

            let created = diesel::insert_into(attribute_types::table)
                .values(&DbNewAttributeType::from(new_attribute_type))
                .get_result::<DbAttributeType>(conn)?;

            Ok(created.into())
        })
    }

    fn delete_attribute_type(&self, attribute_type_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::{attribute_types, variant_options};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let target = attribute_types::table
                .filter(attribute_types::id.eq(attribute_type_id))
                .filter(attribute_types::hub_id.eq(hub_id));

            let exists = diesel::select(diesel::dsl::exists(target.clone()))
                .get_result::<bool>(conn)?;
            if !exists {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(
                variant_options::table
                    .filter(variant_options::attribute_type_id.eq(attribute_type_id)),
            )
            .execute(conn)?;

            diesel::delete(target).execute(conn)?;

            Ok(())
        })
    }
}
