use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::products::{AddProductForm, EditProductForm};
use crate::forms::variants::{SaveVariantsForm, UploadVariantsForm};
use crate::repository::DieselRepository;
use crate::services::products::{self, VariantSyncSummary};
use crate::services::{ServiceError, ServiceResult};

#[get("/admin/products")]
pub async fn show_products(
    params: web::Query<products::ProductsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products::load_products_page(repo.get_ref(), &user, params.0) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            let has_active_filters = data.category_id.is_some()
                || data.available.is_some()
                || data
                    .search
                    .as_ref()
                    .map(|value| !value.trim().is_empty())
                    .unwrap_or(false);
            context.insert("products", &data.products);
            context.insert("categories", &data.categories);
            context.insert("search", &data.search);
            context.insert("category_id", &data.category_id);
            context.insert("available", &data.available);
            context.insert("has_active_filters", &has_active_filters);
            render_template(&tera, "products/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), &user, form) {
        Ok(product) => {
            FlashMessage::success(format!("Товар «{}» добавлен.", product.name)).send();
            redirect(&format!("/admin/products/{}", product.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            FlashMessage::error("Не удалось добавить товар.").send();
            redirect("/admin/products")
        }
    }
}

#[post("/admin/products/edit")]
pub async fn edit_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditProductForm>,
) -> impl Responder {
    let back = format!("/admin/products/{}", form.product_id);

    match products::modify_product(repo.get_ref(), &user, form) {
        Ok(product) => {
            FlashMessage::success(format!("Товар «{}» изменён.", product.name)).send();
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
            FlashMessage::error("Товар не найден.").send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("Failed to change product: {err}");
            FlashMessage::error("Не удалось изменить товар.").send();
            redirect(&back)
        }
    }
}

#[post("/admin/products/{product_id}/toggle")]
pub async fn toggle_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::toggle_product_availability(repo.get_ref(), &user, product_id) {
        Ok(product) if product.is_available => {
            FlashMessage::success(format!("Товар «{}» опубликован.", product.name)).send();
            redirect("/admin/products")
        }
        Ok(product) => {
            FlashMessage::success(format!("Товар «{}» скрыт.", product.name)).send();
            redirect("/admin/products")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("Failed to toggle product {product_id}: {err}");
            FlashMessage::error("Не удалось изменить товар.").send();
            redirect("/admin/products")
        }
    }
}

#[post("/admin/products/{product_id}/delete")]
pub async fn delete_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::remove_product(repo.get_ref(), &user, product_id) {
        Ok(()) => {
            FlashMessage::success("Товар удалён.").send();
            redirect("/admin/products")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден или уже удалён.").send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            FlashMessage::error("Не удалось удалить товар.").send();
            redirect("/admin/products")
        }
    }
}

#[get("/admin/products/{product_id}")]
pub async fn show_product_editor(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::load_product_editor(repo.get_ref(), &user, product_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            context.insert("product", &data.product);
            context.insert("category", &data.category);
            context.insert("attribute_types", &data.attribute_types);
            context.insert("attributes", &data.attributes);
            render_template(&tera, "products/editor.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Accepts the nested `variants[i][...]` fields of the variant editor.
#[post("/admin/products/{product_id}/variants")]
pub async fn save_variants(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: String,
) -> impl Responder {
    let product_id = path.into_inner();

    let form = match SaveVariantsForm::from_body(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&format!("/admin/products/{product_id}"));
        }
    };

    let result = products::save_variants(repo.get_ref(), &user, product_id, form);
    respond_to_variant_sync(product_id, result)
}

#[post("/admin/products/{product_id}/variants/upload")]
pub async fn upload_variants(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadVariantsForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    let result = products::import_variants(repo.get_ref(), &user, product_id, form);
    respond_to_variant_sync(product_id, result)
}

fn respond_to_variant_sync(
    product_id: i32,
    result: ServiceResult<VariantSyncSummary>,
) -> HttpResponse {
    let back = format!("/admin/products/{product_id}");

    match result {
        Ok(summary) => {
            FlashMessage::success(format!(
                "Варианты сохранены: добавлено {}, изменено {}, удалено {}.",
                summary.created, summary.updated, summary.deleted
            ))
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
            FlashMessage::error("Товар не найден.").send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("Failed to save variants of product {product_id}: {err}");
            FlashMessage::error("Не удалось сохранить варианты.").send();
            redirect(&back)
        }
    }
}
