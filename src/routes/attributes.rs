use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::attributes::AddAttributeTypeForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::attributes::{
    create_attribute_type, load_attribute_types, remove_attribute_type,
};

#[get("/admin/categories/{category_id}/attributes")]
pub async fn show_attribute_types(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category_id = path.into_inner();

    match load_attribute_types(repo.get_ref(), &user, category_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "categories",
                &server_config.auth_service_url,
            );
            context.insert("category", &data.category);
            context.insert("attribute_types", &data.attribute_types);
            render_template(&tera, "attributes/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Категория не найдена.").send();
            redirect("/admin/categories")
        }
        Err(err) => {
            log::error!("Failed to list attribute types of category {category_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/attributes/add")]
pub async fn add_attribute_type(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddAttributeTypeForm>,
) -> impl Responder {
    let back = format!("/admin/categories/{}/attributes", form.category_id);

    match create_attribute_type(repo.get_ref(), &user, form) {
        Ok(attribute_type) => {
            FlashMessage::success(format!("Характеристика «{}» добавлена.", attribute_type.name))
                .send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Категория не найдена.").send();
            redirect("/admin/categories")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Характеристика с таким названием уже есть в категории.").send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to create attribute type: {err}");
            FlashMessage::error("Не удалось добавить характеристику.").send();
            redirect(&back)
        }
    }
}

#[post("/admin/attributes/{attribute_type_id}/delete")]
pub async fn delete_attribute_type(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let attribute_type_id = path.into_inner();

    match remove_attribute_type(repo.get_ref(), &user, attribute_type_id) {
        Ok(category_id) => {
            FlashMessage::success("Характеристика удалена.").send();
            redirect(&format!("/admin/categories/{category_id}/attributes"))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Характеристика не найдена или уже удалена.").send();
            redirect("/admin/categories")
        }
        Err(err) => {
            log::error!("Failed to delete attribute type {attribute_type_id}: {err}");
            FlashMessage::error("Не удалось удалить характеристику.").send();
            redirect("/admin/categories")
        }
    }
}
