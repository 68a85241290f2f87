use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::RemoteRepository;
use crate::routes::{listing_context, render_template};
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    repo: web::Data<RemoteRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = main_service::load_home_page(repo.get_ref()).await;

    let mut context = listing_context(&flash_messages, "index", data.status);
    context.insert("products", &data.featured);

    render_template(&tera, "main/index.html", &context)
}
