#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::{ProductCache, RemoteRepository};

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod query_state;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Registers every storefront route.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    use crate::routes::api::api_v1_products;
    use crate::routes::catalog::{show_catalog, show_product};
    use crate::routes::main::show_index;
    use crate::routes::products_table::{
        add_product, delete_product, search_products, show_products_table, update_product,
    };

    cfg.service(web::scope("/api").service(api_v1_products))
        .service(show_index)
        .service(show_catalog)
        .service(show_product)
        .service(show_products_table)
        .service(search_products)
        .service(add_product)
        .service(update_product)
        .service(delete_product);
}

/// Flash message middleware signing its cookie with `secret`.
#[cfg(feature = "server")]
pub fn message_framework(secret: &str) -> std::io::Result<FlashMessagesFramework> {
    let secret_key = Key::try_from(secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key).build();
    Ok(FlashMessagesFramework::builder(message_store).build())
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let cache = ProductCache::new(server_config.cache_capacity, server_config.cache_ttl());

    let repo = RemoteRepository::new(
        &server_config.api_base_url,
        server_config.request_timeout(),
        cache,
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build product API client: {e}")))?;

    let message_framework = message_framework(&server_config.secret)?;

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Serving storefront on {}:{} backed by {}",
        server_config.address,
        server_config.port,
        server_config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
