use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::orders::{PlaceOrderForm, UpdateOrderStatusForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::orders::{
    OrdersQuery, cancel_my_order, change_order_status, load_my_orders, load_orders_page,
    place_order,
};

#[get("/orders")]
pub async fn show_my_orders(
    params: web::Query<OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_my_orders(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "orders",
                &server_config.auth_service_url,
            );
            context.insert("orders", &data.orders);
            context.insert("search", &data.search);
            context.insert("status", &data.status);
            render_template(&tera, "orders/mine.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Доступ к магазину закрыт.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list customer orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/orders/place")]
pub async fn checkout(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<PlaceOrderForm>,
) -> impl Responder {
    let back = format!("/products/{}", form.product_id);

    match place_order(repo.get_ref(), &user, form) {
        Ok(order) => {
            FlashMessage::success(format!("Заказ №{} оформлен.", order.id)).send();
            redirect("/orders")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Доступ к магазину закрыт.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to place order: {err}");
            FlashMessage::error("Не удалось оформить заказ.").send();
            redirect(&back)
        }
    }
}

#[post("/orders/{order_id}/cancel")]
pub async fn cancel_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let order_id = path.into_inner();

    match cancel_my_order(repo.get_ref(), &user, order_id) {
        Ok(order) => {
            FlashMessage::success(format!("Заказ №{} отменён.", order.id)).send();
            redirect("/orders")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Доступ к магазину закрыт.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/orders")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Заказ не найден.").send();
            redirect("/orders")
        }
        Err(err) => {
            log::error!("Failed to cancel order {order_id}: {err}");
            FlashMessage::error("Не удалось отменить заказ.").send();
            redirect("/orders")
        }
    }
}

#[get("/admin/orders")]
pub async fn show_orders(
    params: web::Query<OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_orders_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "admin_orders",
                &server_config.auth_service_url,
            );
            context.insert("orders", &data.orders);
            context.insert("search", &data.search);
            context.insert("status", &data.status);
            render_template(&tera, "orders/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/orders/status")]
pub async fn update_order_status(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateOrderStatusForm>,
) -> impl Responder {
    match change_order_status(repo.get_ref(), &user, form) {
        Ok(order) => {
            FlashMessage::success(format!("Статус заказа №{} изменён.", order.id)).send();
            redirect("/admin/orders")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/orders")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Заказ не найден.").send();
            redirect("/admin/orders")
        }
        Err(err) => {
            log::error!("Failed to change order status: {err}");
            FlashMessage::error("Не удалось изменить статус заказа.").send();
            redirect("/admin/orders")
        }
    }
}
