use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::domain::pricing::CustomerTier;
use crate::forms::customers::{AddCustomerForm, BanCustomerForm, ChangeTierForm, EditCustomerForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::customers::{
    CustomersQuery, change_customer_tier, create_customer, edit_customer, load_customers_page,
    remove_customer, set_customer_ban,
};

#[get("/admin/customers")]
pub async fn show_customers(
    params: web::Query<CustomersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_customers_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "customers",
                &server_config.auth_service_url,
            );
            context.insert("customers", &data.customers);
            context.insert("search", &data.search);
            context.insert("tier", &data.tier);
            context.insert("banned", &data.banned);
            context.insert("tiers", &CustomerTier::ALL);
            render_template(&tera, "customers/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list customers: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/customers/add")]
pub async fn add_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCustomerForm>,
) -> impl Responder {
    match create_customer(repo.get_ref(), &user, form) {
        Ok(customer) => {
            FlashMessage::success(format!("Клиент «{}» добавлен.", customer.business_name)).send();
            redirect("/admin/customers")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/customers")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Клиент с таким email или телефоном уже существует.").send();
            redirect("/admin/customers")
        }
        Err(err) => {
            log::error!("Failed to create customer: {err}");
            FlashMessage::error("Не удалось добавить клиента.").send();
            redirect("/admin/customers")
        }
    }
}

#[post("/admin/customers/tier")]
pub async fn change_tier(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ChangeTierForm>,
) -> impl Responder {
    match change_customer_tier(repo.get_ref(), &user, form) {
        Ok(customer) => {
            let tier = customer
                .tier
                .map(|tier| tier.as_str())
                .unwrap_or("не задан");
            FlashMessage::success(format!(
                "Уровень цен клиента «{}»: {tier}.",
                customer.business_name
            ))
            .send();
            redirect("/admin/customers")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/customers")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Клиент не найден.").send();
            redirect("/admin/customers")
        }
        Err(err) => {
            log::error!("Failed to change customer tier: {err}");
            FlashMessage::error("Не удалось изменить уровень цен.").send();
            redirect("/admin/customers")
        }
    }
}

#[post("/admin/customers/ban")]
pub async fn ban_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BanCustomerForm>,
) -> impl Responder {
    match set_customer_ban(repo.get_ref(), &user, form) {
        Ok(customer) if customer.is_banned => {
            FlashMessage::success(format!("Клиент «{}» заблокирован.", customer.business_name))
                .send();
            redirect("/admin/customers")
        }
        Ok(customer) => {
            FlashMessage::success(format!("Клиент «{}» разблокирован.", customer.business_name))
                .send();
            redirect("/admin/customers")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Клиент не найден.").send();
            redirect("/admin/customers")
        }
        Err(err) => {
            log::error!("Failed to change customer ban: {err}");
            FlashMessage::error("Не удалось изменить статус клиента.").send();
            redirect("/admin/customers")
        }
    }
}

#[post("/admin/customers/edit")]
pub async fn update_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditCustomerForm>,
) -> impl Responder {
    match edit_customer(repo.get_ref(), &user, form) {
        Ok(customer) => {
            FlashMessage::success(format!("Клиент «{}» обновлён.", customer.business_name)).send();
            redirect("/admin/customers")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/customers")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Клиент не найден.").send();
            redirect("/admin/customers")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Клиент с таким email или телефоном уже существует.").send();
            redirect("/admin/customers")
        }
        Err(err) => {
            log::error!("Failed to update customer: {err}");
            FlashMessage::error("Не удалось обновить клиента.").send();
            redirect("/admin/customers")
        }
    }
}

#[post("/admin/customers/{customer_id}/delete")]
pub async fn delete_customer(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let customer_id = path.into_inner();

    match remove_customer(repo.get_ref(), &user, customer_id) {
        Ok(()) => {
            FlashMessage::success("Клиент удалён.").send();
            redirect("/admin/customers")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Клиент не найден или уже удалён.").send();
            redirect("/admin/customers")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("У клиента есть заказы, его можно только заблокировать.").send();
            redirect("/admin/customers")
        }
        Err(err) => {
            log::error!("Failed to delete customer {customer_id}: {err}");
            FlashMessage::error("Не удалось удалить клиента.").send();
            redirect("/admin/customers")
        }
    }
}
