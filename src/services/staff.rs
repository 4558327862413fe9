use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::staff::{StaffListQuery, StaffMember};
use crate::forms::staff::{AddStaffForm, BanStaffForm, EditStaffForm};
use crate::repository::{StaffReader, StaffWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the staff page.
#[derive(Debug, Default, Deserialize)]
pub struct StaffQuery {
    pub search: Option<String>,
    pub banned: Option<bool>,
    pub page: Option<usize>,
}

/// Data required to render the staff page.
pub struct StaffPageData {
    pub staff: Paginated<StaffMember>,
    pub search: Option<String>,
    pub banned: Option<bool>,
}

pub fn load_staff_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: StaffQuery,
) -> ServiceResult<StaffPageData>
where
    R: StaffReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let page = query.page.unwrap_or(1);
    let search = query
        .search
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty());

    let mut list_query = StaffListQuery::new(user.hub_id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = &search {
        list_query = list_query.search(term.clone());
    }
    if let Some(banned) = query.banned {
        list_query = list_query.banned(banned);
    }

    let (total, items) = repo.list_staff(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(StaffPageData {
        staff: Paginated::new(items, page, total_pages),
        search,
        banned: query.banned,
    })
}

pub fn create_staff_member<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddStaffForm,
) -> ServiceResult<StaffMember>
where
    R: StaffReader + StaffWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_member = form
        .into_new_staff_member(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_contacts_free(
        repo,
        user.hub_id,
        None,
        &new_member.email,
        &new_member.phone,
    )?;

    let member = repo.create_staff(&new_member).map_err(ServiceError::from)?;
    log::info!("Staff member {} added to hub {}", member.id, member.hub_id);

    Ok(member)
}

pub fn edit_staff_member<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditStaffForm,
) -> ServiceResult<StaffMember>
where
    R: StaffReader + StaffWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (staff_id, updates) = form
        .into_update()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    load_member(repo, user.hub_id, staff_id)?;
    ensure_contacts_free(
        repo,
        user.hub_id,
        Some(staff_id),
        &updates.email,
        &updates.phone,
    )?;

    repo.update_staff(staff_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

/// Bans or unbans a staff member. Nobody can ban their own record.
pub fn set_staff_ban<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: BanStaffForm,
) -> ServiceResult<StaffMember>
where
    R: StaffReader + StaffWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let member = load_member(repo, user.hub_id, form.staff_id)?;
    if form.is_banned && is_current_user(&member, user) {
        return Err(ServiceError::Form("You cannot ban yourself".to_string()));
    }

    let member = repo
        .set_staff_banned(member.id, user.hub_id, form.is_banned)
        .map_err(ServiceError::from)?;
    log::info!(
        "Staff member {} is_banned set to {}",
        member.id,
        member.is_banned
    );

    Ok(member)
}

pub fn remove_staff_member<R>(
    repo: &R,
    user: &AuthenticatedUser,
    staff_id: i32,
) -> ServiceResult<()>
where
    R: StaffReader + StaffWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let member = load_member(repo, user.hub_id, staff_id)?;
    if is_current_user(&member, user) {
        return Err(ServiceError::Form("You cannot delete yourself".to_string()));
    }

    repo.delete_staff(member.id, user.hub_id)
        .map_err(ServiceError::from)?;
    log::info!("Staff member {} removed from hub {}", member.id, user.hub_id);

    Ok(())
}

fn load_member<R>(repo: &R, hub_id: i32, staff_id: i32) -> ServiceResult<StaffMember>
where
    R: StaffReader + ?Sized,
{
    repo.get_staff_by_id(staff_id, hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

fn is_current_user(member: &StaffMember, user: &AuthenticatedUser) -> bool {
    member.email == user.email.trim().to_lowercase()
}

/// Email and phone must not belong to another member of the hub.
fn ensure_contacts_free<R>(
    repo: &R,
    hub_id: i32,
    staff_id: Option<i32>,
    email: &str,
    phone: &str,
) -> ServiceResult<()>
where
    R: StaffReader + ?Sized,
{
    let is_other = |member: StaffMember| Some(member.id) != staff_id;

    let email_owner = repo
        .get_staff_by_email(email, hub_id)
        .map_err(ServiceError::from)?;
    if email_owner.is_some_and(is_other) {
        return Err(ServiceError::Conflict);
    }

    let phone_owner = repo
        .get_staff_by_phone(phone, hub_id)
        .map_err(ServiceError::from)?;
    if phone_owner.is_some_and(is_other) {
        return Err(ServiceError::Conflict);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::staff::{NewStaffMember, StaffRole, UpdateStaffMember};
    use crate::repository::mock::{MockStaffReader, MockStaffWriter};
    use crate::services::test_support::{HUB_ID, fixed_datetime, user_with_roles};
    use pushkind_common::repository::errors::RepositoryResult;

    #[derive(Default)]
    struct FakeRepo {
        reader: MockStaffReader,
        writer: MockStaffWriter,
    }

    impl StaffReader for FakeRepo {
        fn get_staff_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<StaffMember>> {
            self.reader.get_staff_by_id(id, hub_id)
        }

        fn get_staff_by_email(
            &self,
            email: &str,
            hub_id: i32,
        ) -> RepositoryResult<Option<StaffMember>> {
            self.reader.get_staff_by_email(email, hub_id)
        }

        fn get_staff_by_phone(
            &self,
            phone: &str,
            hub_id: i32,
        ) -> RepositoryResult<Option<StaffMember>> {
            self.reader.get_staff_by_phone(phone, hub_id)
        }

        fn list_staff(
            &self,
            query: StaffListQuery,
        ) -> RepositoryResult<(usize, Vec<StaffMember>)> {
            self.reader.list_staff(query)
        }
    }

    impl StaffWriter for FakeRepo {
        fn create_staff(&self, new_member: &NewStaffMember) -> RepositoryResult<StaffMember> {
            self.writer.create_staff(new_member)
        }

        fn update_staff(
            &self,
            staff_id: i32,
            hub_id: i32,
            updates: &UpdateStaffMember,
        ) -> RepositoryResult<StaffMember> {
            self.writer.update_staff(staff_id, hub_id, updates)
        }

        fn set_staff_banned(
            &self,
            staff_id: i32,
            hub_id: i32,
            is_banned: bool,
        ) -> RepositoryResult<StaffMember> {
            self.writer.set_staff_banned(staff_id, hub_id, is_banned)
        }

        fn delete_staff(&self, staff_id: i32, hub_id: i32) -> RepositoryResult<()> {
            self.writer.delete_staff(staff_id, hub_id)
        }
    }

    fn member(id: i32, email: &str) -> StaffMember {
        StaffMember {
            id,
            hub_id: HUB_ID,
            name: "Ivan Petrov".to_string(),
            email: email.to_string(),
            phone: format!("555000000{id}"),
            role: StaffRole::Staff,
            is_banned: false,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn add_form() -> AddStaffForm {
        AddStaffForm {
            name: "Ivan Petrov".to_string(),
            email: "ivan@example.com".to_string(),
            phone: "5550000001".to_string(),
            role: "STAFF".to_string(),
        }
    }

    fn edit_form(staff_id: i32) -> EditStaffForm {
        EditStaffForm {
            staff_id,
            name: "Ivan Petrov".to_string(),
            email: "ivan@example.com".to_string(),
            phone: "5550000001".to_string(),
            role: "ADMIN".to_string(),
        }
    }

    #[test]
    fn staff_page_requires_role() {
        let repo = FakeRepo::default();
        let user = user_with_roles(&[]);

        assert!(matches!(
            load_staff_page(&repo, &user, StaffQuery::default()),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn staff_page_applies_search_and_ban_filter() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_list_staff()
            .times(1)
            .returning(|query| {
                assert_eq!(query.hub_id, HUB_ID);
                assert_eq!(query.search.as_deref(), Some("ivan"));
                assert_eq!(query.is_banned, Some(false));
                Ok((1, vec![member(1, "ivan@example.com")]))
            });
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let data = load_staff_page(
            &repo,
            &user,
            StaffQuery {
                search: Some(" ivan ".to_string()),
                banned: Some(false),
                page: Some(1),
            },
        )
        .expect("expected success");

        assert_eq!(data.search.as_deref(), Some("ivan"));
        assert_eq!(data.banned, Some(false));
    }

    #[test]
    fn create_staff_member_rejects_taken_phone() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_get_staff_by_email()
            .returning(|_, _| Ok(None));
        repo.reader
            .expect_get_staff_by_phone()
            .returning(|_, _| Ok(Some(member(4, "olga@example.com"))));
        repo.writer.expect_create_staff().never();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        assert!(matches!(
            create_staff_member(&repo, &user, add_form()),
            Err(ServiceError::Conflict)
        ));
    }

    #[test]
    fn create_staff_member_persists_payload() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_get_staff_by_email()
            .returning(|_, _| Ok(None));
        repo.reader
            .expect_get_staff_by_phone()
            .returning(|_, _| Ok(None));
        repo.writer
            .expect_create_staff()
            .times(1)
            .withf(|new_member| new_member.hub_id == HUB_ID && new_member.role == StaffRole::Staff)
            .returning(|_| Ok(member(1, "ivan@example.com")));
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let created = create_staff_member(&repo, &user, add_form()).expect("expected success");

        assert_eq!(created.id, 1);
    }

    #[test]
    fn edit_staff_member_keeps_own_contacts() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_get_staff_by_id()
            .returning(|id, _| Ok(Some(member(id, "ivan@example.com"))));
        repo.reader
            .expect_get_staff_by_email()
            .returning(|_, _| Ok(Some(member(1, "ivan@example.com"))));
        repo.reader
            .expect_get_staff_by_phone()
            .returning(|_, _| Ok(Some(member(1, "ivan@example.com"))));
        repo.writer
            .expect_update_staff()
            .times(1)
            .withf(|staff_id, hub_id, updates| {
                *staff_id == 1 && *hub_id == HUB_ID && updates.role == StaffRole::Admin
            })
            .returning(|id, _, updates| {
                Ok(StaffMember {
                    role: updates.role,
                    ..member(id, "ivan@example.com")
                })
            });
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let updated = edit_staff_member(&repo, &user, edit_form(1)).expect("expected success");

        assert_eq!(updated.role, StaffRole::Admin);
    }

    #[test]
    fn edit_staff_member_rejects_email_of_colleague() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_get_staff_by_id()
            .returning(|id, _| Ok(Some(member(id, "old@example.com"))));
        repo.reader
            .expect_get_staff_by_email()
            .returning(|_, _| Ok(Some(member(2, "ivan@example.com"))));
        repo.writer.expect_update_staff().never();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        assert!(matches!(
            edit_staff_member(&repo, &user, edit_form(1)),
            Err(ServiceError::Conflict)
        ));
    }

    #[test]
    fn edit_missing_staff_member_is_not_found() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_get_staff_by_id()
            .returning(|_, _| Ok(None));
        repo.writer.expect_update_staff().never();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        assert!(matches!(
            edit_staff_member(&repo, &user, edit_form(7)),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn staff_member_cannot_ban_themselves() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_get_staff_by_id()
            .returning(|id, _| Ok(Some(member(id, "user@example.com"))));
        repo.writer.expect_set_staff_banned().never();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        assert!(matches!(
            set_staff_ban(
                &repo,
                &user,
                BanStaffForm {
                    staff_id: 1,
                    is_banned: true
                }
            ),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn ban_of_colleague_is_stored() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_get_staff_by_id()
            .returning(|id, _| Ok(Some(member(id, "olga@example.com"))));
        repo.writer
            .expect_set_staff_banned()
            .times(1)
            .withf(|staff_id, hub_id, is_banned| *staff_id == 2 && *hub_id == HUB_ID && *is_banned)
            .returning(|id, _, is_banned| {
                Ok(StaffMember {
                    is_banned,
                    ..member(id, "olga@example.com")
                })
            });
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let banned = set_staff_ban(
            &repo,
            &user,
            BanStaffForm {
                staff_id: 2,
                is_banned: true,
            },
        )
        .expect("expected success");

        assert!(banned.is_banned);
    }

    #[test]
    fn remove_staff_member_deletes_colleague() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_get_staff_by_id()
            .returning(|id, _| Ok(Some(member(id, "olga@example.com"))));
        repo.writer
            .expect_delete_staff()
            .times(1)
            .withf(|staff_id, hub_id| *staff_id == 2 && *hub_id == HUB_ID)
            .returning(|_, _| Ok(()));
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        assert!(remove_staff_member(&repo, &user, 2).is_ok());
    }

    #[test]
    fn remove_staff_member_refuses_own_record() {
        let mut repo = FakeRepo::default();
        repo.reader
            .expect_get_staff_by_id()
            .returning(|id, _| Ok(Some(member(id, "user@example.com"))));
        repo.writer.expect_delete_staff().never();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        assert!(matches!(
            remove_staff_member(&repo, &user, 1),
            Err(ServiceError::Form(_))
        ));
    }
}
