use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::product::{DeleteProductForm, ProductForm};
use crate::query_state::QueryState;
use crate::repository::RemoteRepository;
use crate::routes::{listing_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::products_table::{
    self as table_service, PRODUCTS_TABLE_PATH, ProductsTableView, return_url, search_url,
};

#[get("/products-table")]
pub async fn show_products_table(
    req: HttpRequest,
    repo: web::Data<RemoteRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = QueryState::parse(req.query_string());
    let data = match table_service::load_products_table(repo.get_ref(), &state).await {
        ProductsTableView::Page(data) => data,
        ProductsTableView::OutOfRange(last_page) => return redirect(&last_page),
    };

    let mut context = listing_context(&flash_messages, "products_table", data.status);
    context.insert("products", &data.products);
    context.insert("pagination", &data.pagination);
    context.insert("controls", &data.controls);
    context.insert("categories", &data.categories);

    render_template(&tera, "products_table/index.html", &context)
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
    /// State of the table the search was submitted from.
    #[serde(default)]
    query: String,
}

#[get("/products-table/search")]
pub async fn search_products(params: web::Query<SearchParams>) -> impl Responder {
    redirect(&search_url(&params.query, &params.q))
}

/// Flashes the outcome of a modal submission.
fn report<T>(result: Result<T, ServiceError>, success: &str, failure: &str) {
    match result {
        Ok(_) => FlashMessage::success(success).send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(_) => FlashMessage::error(failure).send(),
    }
}

#[post("/products-table/add")]
pub async fn add_product(repo: web::Data<RemoteRepository>, body: web::Bytes) -> impl Responder {
    let form = match ProductForm::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse product form: {err}");
            FlashMessage::error("Failed to create product").send();
            return redirect(PRODUCTS_TABLE_PATH);
        }
    };
    let back = return_url(&form.query);

    report(
        table_service::create_product(repo.get_ref(), form).await,
        "Product created successfully",
        "Failed to create product",
    );
    redirect(&back)
}

#[post("/products-table/{product_id}/update")]
pub async fn update_product(
    product_id: web::Path<i64>,
    repo: web::Data<RemoteRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match ProductForm::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse product form: {err}");
            FlashMessage::error("Failed to update product").send();
            return redirect(PRODUCTS_TABLE_PATH);
        }
    };
    let back = return_url(&form.query);

    report(
        table_service::update_product(repo.get_ref(), product_id.into_inner(), form).await,
        "Product updated successfully",
        "Failed to update product",
    );
    redirect(&back)
}

#[post("/products-table/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i64>,
    repo: web::Data<RemoteRepository>,
    web::Form(form): web::Form<DeleteProductForm>,
) -> impl Responder {
    report(
        table_service::delete_product(repo.get_ref(), product_id.into_inner()).await,
        "Product deleted successfully",
        "Failed to delete product",
    );
    redirect(&return_url(&form.query))
}
