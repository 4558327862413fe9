use actix_web::{HttpResponse, Responder, get, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::storefront::load_product_details;

#[get("/v1/products/{product_id}")]
/// Return the product as priced for the signed-in customer, with its orderable
/// variants, attribute groups and the preselected variant.
///
/// Unknown or banned customers receive `401 Unauthorized`; hidden products `404 Not Found`.
pub async fn api_v1_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match load_product_details(repo.get_ref(), &user, product_id) {
        Ok(details) => HttpResponse::Ok().json(details),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
