use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::domain::staff::StaffRole;
use crate::forms::staff::{AddStaffForm, BanStaffForm, EditStaffForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::staff::{
    StaffQuery, create_staff_member, edit_staff_member, load_staff_page, remove_staff_member,
    set_staff_ban,
};

#[get("/admin/staff")]
pub async fn show_staff(
    params: web::Query<StaffQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_staff_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "staff", &server_config.auth_service_url);
            context.insert("staff", &data.staff);
            context.insert("search", &data.search);
            context.insert("banned", &data.banned);
            context.insert("roles", &StaffRole::ALL);
            render_template(&tera, "staff/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list staff: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/staff/add")]
pub async fn add_staff(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddStaffForm>,
) -> impl Responder {
    match create_staff_member(repo.get_ref(), &user, form) {
        Ok(member) => {
            FlashMessage::success(format!("Сотрудник «{}» добавлен.", member.name)).send();
            redirect("/admin/staff")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/staff")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Сотрудник с таким email или телефоном уже существует.").send();
            redirect("/admin/staff")
        }
        Err(err) => {
            log::error!("Failed to create staff member: {err}");
            FlashMessage::error("Не удалось добавить сотрудника.").send();
            redirect("/admin/staff")
        }
    }
}

#[post("/admin/staff/edit")]
pub async fn update_staff(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditStaffForm>,
) -> impl Responder {
    match edit_staff_member(repo.get_ref(), &user, form) {
        Ok(member) => {
            FlashMessage::success(format!("Сотрудник «{}» обновлён.", member.name)).send();
            redirect("/admin/staff")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/staff")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Сотрудник не найден.").send();
            redirect("/admin/staff")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Сотрудник с таким email или телефоном уже существует.").send();
            redirect("/admin/staff")
        }
        Err(err) => {
            log::error!("Failed to update staff member: {err}");
            FlashMessage::error("Не удалось обновить сотрудника.").send();
            redirect("/admin/staff")
        }
    }
}

#[post("/admin/staff/ban")]
pub async fn ban_staff(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BanStaffForm>,
) -> impl Responder {
    match set_staff_ban(repo.get_ref(), &user, form) {
        Ok(member) if member.is_banned => {
            FlashMessage::success(format!("Сотрудник «{}» заблокирован.", member.name)).send();
            redirect("/admin/staff")
        }
        Ok(member) => {
            FlashMessage::success(format!("Сотрудник «{}» разблокирован.", member.name)).send();
            redirect("/admin/staff")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(_)) => {
            FlashMessage::error("Нельзя заблокировать самого себя.").send();
            redirect("/admin/staff")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Сотрудник не найден.").send();
            redirect("/admin/staff")
        }
        Err(err) => {
            log::error!("Failed to change staff ban: {err}");
            FlashMessage::error("Не удалось изменить статус сотрудника.").send();
            redirect("/admin/staff")
        }
    }
}

#[post("/admin/staff/{staff_id}/delete")]
pub async fn delete_staff(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let staff_id = path.into_inner();

    match remove_staff_member(repo.get_ref(), &user, staff_id) {
        Ok(()) => {
            FlashMessage::success("Сотрудник удалён.").send();
            redirect("/admin/staff")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(_)) => {
            FlashMessage::error("Нельзя удалить самого себя.").send();
            redirect("/admin/staff")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Сотрудник не найден или уже удалён.").send();
            redirect("/admin/staff")
        }
        Err(err) => {
            log::error!("Failed to delete staff member {staff_id}: {err}");
            FlashMessage::error("Не удалось удалить сотрудника.").send();
            redirect("/admin/staff")
        }
    }
}
