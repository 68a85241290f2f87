use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::query_state::QueryState;
use crate::repository::RemoteRepository;
use crate::services::api as api_service;

#[get("/v1/products")]
pub async fn api_v1_products(req: HttpRequest, repo: web::Data<RemoteRepository>) -> impl Responder {
    let state = QueryState::parse(req.query_string());

    match api_service::list_products(repo.get_ref(), &state).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(_) => HttpResponse::BadGateway().finish(),
    }
}
