use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{logout, not_assigned};
use tera::Tera;

use printshop::repository::DieselRepository;
use printshop::routes::api::api_v1_product;
use printshop::routes::attributes::{
    add_attribute_type, delete_attribute_type, show_attribute_types,
};
use printshop::routes::categories::{add_category, delete_category, edit_category, show_categories};
use printshop::routes::customers::{
    add_customer, ban_customer, change_tier, delete_customer, show_customers, update_customer,
};
use printshop::routes::main::{show_catalogue, show_product};
use printshop::routes::orders::{
    cancel_order, checkout, show_my_orders, show_orders, update_order_status,
};
use printshop::routes::products::{
    add_product, delete_product, edit_product, save_variants, show_product_editor, show_products,
    toggle_product, upload_variants,
};
use printshop::routes::staff::{add_staff, ban_staff, delete_staff, show_staff, update_staff};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let auth_service_url = env::var("AUTH_SERVICE_URL");
    let auth_service_url = match auth_service_url {
        Ok(auth_service_url) => auth_service_url,
        Err(_) => {
            log::error!("AUTH_SERVICE_URL environment variable not set");
            std::process::exit(1);
        }
    };

    let common_config = CommonServerConfig {
        secret: secret.unwrap_or_default(),
        auth_service_url,
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(web::scope("/api").service(api_v1_product))
                    .service(show_catalogue)
                    .service(show_product)
                    .service(show_my_orders)
                    .service(checkout)
                    .service(cancel_order)
                    .service(show_categories)
                    .service(add_category)
                    .service(edit_category)
                    .service(delete_category)
                    .service(show_attribute_types)
                    .service(add_attribute_type)
                    .service(delete_attribute_type)
                    .service(show_products)
                    .service(add_product)
                    .service(edit_product)
                    .service(toggle_product)
                    .service(delete_product)
                    .service(show_product_editor)
                    .service(save_variants)
                    .service(upload_variants)
                    .service(show_customers)
                    .service(add_customer)
                    .service(change_tier)
                    .service(ban_customer)
                    .service(update_customer)
                    .service(delete_customer)
                    .service(show_staff)
                    .service(add_staff)
                    .service(update_staff)
                    .service(ban_staff)
                    .service(delete_staff)
                    .service(show_orders)
                    .service(update_order_status)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
