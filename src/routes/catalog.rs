use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::query_state::QueryState;
use crate::repository::RemoteRepository;
use crate::routes::{base_context, listing_context, render_template, render_template_with_status};
use crate::services::ServiceError;
use crate::services::catalog as catalog_service;

#[get("/products")]
pub async fn show_catalog(
    req: HttpRequest,
    repo: web::Data<RemoteRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = QueryState::parse(req.query_string());
    let data = catalog_service::load_catalog_page(repo.get_ref(), &state).await;

    let mut context = listing_context(&flash_messages, "products", data.status);
    context.insert("products", &data.products);
    context.insert("controls", &data.controls);

    render_template(&tera, "catalog/index.html", &context)
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<String>,
    repo: web::Data<RemoteRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "products");

    let result = match product_id.trim().parse::<i64>() {
        Ok(product_id) => catalog_service::load_product_detail(repo.get_ref(), product_id).await,
        Err(_) => Err(ServiceError::NotFound),
    };

    match result {
        Ok(data) => {
            let mut context = context;
            context.insert("product", &data.product);
            render_template(&tera, "catalog/detail.html", &context)
        }
        // Network faults and missing products share the same view.
        Err(err) => {
            log::warn!("Product {} not shown: {err}", product_id.as_str());
            render_template_with_status(
                &tera,
                "catalog/not_found.html",
                &context,
                StatusCode::NOT_FOUND,
            )
        }
    }
}
