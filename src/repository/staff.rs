use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::staff::{
        NewStaffMember as DomainNewStaffMember, StaffListQuery, StaffMember as DomainStaffMember,
        UpdateStaffMember as DomainUpdateStaffMember,
    },
    models::staff::{
        NewStaffMember as DbNewStaffMember, StaffMember as DbStaffMember,
        UpdateStaffMember as DbUpdateStaffMember,
    },
    repository::{DieselRepository, StaffReader, StaffWriter},
    schema::staff,
};

fn filtered_staff(query: &StaffListQuery) -> staff::BoxedQuery<'static, Sqlite> {
    let mut items = staff::table
        .filter(staff::hub_id.eq(query.hub_id))
        .into_boxed::<Sqlite>();

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            staff::name
                .like(pattern.clone())
                .or(staff::email.like(pattern.clone()))
                .or(staff::phone.like(pattern)),
        );
    }

    if let Some(is_banned) = query.is_banned {
        items = items.filter(staff::is_banned.eq(is_banned));
    }

    items
}

impl StaffReader for DieselRepository {
    fn get_staff_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainStaffMember>> {
        let mut conn = self.conn()?;
        let member = staff::table
            .filter(staff::id.eq(id))
            .filter(staff::hub_id.eq(hub_id))
            .first::<DbStaffMember>(&mut conn)
            .optional()?;

        Ok(member.map(Into::into))
    }

    fn get_staff_by_email(
        &self,
        email: &str,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainStaffMember>> {
        let normalized_email = email.trim().to_lowercase();

        let mut conn = self.conn()?;
        let member = staff::table
            .filter(staff::email.eq(normalized_email))
            .filter(staff::hub_id.eq(hub_id))
            .first::<DbStaffMember>(&mut conn)
            .optional()?;

        Ok(member.map(Into::into))
    }

    fn get_staff_by_phone(
        &self,
        phone: &str,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainStaffMember>> {
        let mut conn = self.conn()?;
        let member = staff::table
            .filter(staff::phone.eq(phone))
            .filter(staff::hub_id.eq(hub_id))
            .first::<DbStaffMember>(&mut conn)
            .optional()?;

        Ok(member.map(Into::into))
    }

    fn list_staff(
        &self,
        query: StaffListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainStaffMember>)> {
        let mut conn = self.conn()?;

        let total = filtered_staff(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_staff(&query).order(staff::name.asc());

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let members = items.load::<DbStaffMember>(&mut conn)?;

        Ok((total, members.into_iter().map(Into::into).collect()))
    }
}

impl StaffWriter for DieselRepository {
    fn create_staff(
        &self,
        new_member: &DomainNewStaffMember,
    ) -> RepositoryResult<DomainStaffMember> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(staff::table)
            .values(&DbNewStaffMember::from(new_member))
            .get_result::<DbStaffMember>(&mut conn)?;

        Ok(created.into())
    }

    fn update_staff(
        &self,
        staff_id: i32,
        hub_id: i32,
        updates: &DomainUpdateStaffMember,
    ) -> RepositoryResult<DomainStaffMember> {
        let mut conn = self.conn()?;

        let target = staff::table
            .filter(staff::id.eq(staff_id))
            .filter(staff::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&DbUpdateStaffMember::from(updates))
            .get_result::<DbStaffMember>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_staff_banned(
        &self,
        staff_id: i32,
        hub_id: i32,
        is_banned: bool,
    ) -> RepositoryResult<DomainStaffMember> {
        let mut conn = self.conn()?;

        let target = staff::table
            .filter(staff::id.eq(staff_id))
            .filter(staff::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set((
                staff::is_banned.eq(is_banned),
                staff::updated_at.eq(Local::now().naive_utc()),
            ))
            .get_result::<DbStaffMember>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_staff(&self, staff_id: i32, hub_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            staff::table
                .filter(staff::id.eq(staff_id))
                .filter(staff::hub_id.eq(hub_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
