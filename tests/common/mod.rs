//! Shared test helpers: an in-process stand-in for the DummyJSON API.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde::Deserialize;
use serde_json::{Value, json};

use storefront::domain::product::{Product, ProductPage};
use storefront::repository::{ProductCache, RemoteRepository};

pub const TEST_SECRET: &str =
    "test-secret-test-secret-test-secret-test-secret-test-secret-test-secret";

#[derive(Default)]
pub struct FakeState {
    products: Mutex<Vec<Product>>,
    requests: Mutex<Vec<String>>,
    failing: AtomicBool,
}

pub struct FakeApi {
    pub base_url: String,
    pub state: web::Data<FakeState>,
    handle: ServerHandle,
}

impl FakeApi {
    /// Paths and queries received so far, e.g. `GET /products?limit=10&skip=0`.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().unwrap().clear();
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.products.lock().unwrap().clone()
    }

    /// Makes every endpoint answer with 500 until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    pub fn repository(&self) -> RemoteRepository {
        RemoteRepository::new(
            &self.base_url,
            Duration::from_secs(5),
            ProductCache::new(100, Duration::from_secs(60)),
        )
        .unwrap()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub fn product(id: i64, title: &str, category: &str, price: f64) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        category: category.to_string(),
        price,
        stock: 10,
        images: vec![format!("https://cdn.example.com/{id}.png")],
        ..Product::default()
    }
}

pub fn sample_products() -> Vec<Product> {
    vec![
        product(1, "Essence Mascara Lash Princess", "beauty", 9.99),
        product(2, "Eyeshadow Palette with Mirror", "beauty", 19.99),
        product(3, "Annibale Colombo Bed", "furniture", 1899.99),
        product(4, "Decoration Swing", "home-decoration", 59.99),
        product(5, "Red Lipstick", "beauty", 12.99),
    ]
}

#[derive(Deserialize)]
struct ListParams {
    q: Option<String>,
    limit: Option<usize>,
    skip: Option<usize>,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
    order: Option<String>,
}

fn record(state: &FakeState, req: &HttpRequest) -> bool {
    let line = match req.uri().query() {
        Some(query) => format!("{} {}?{}", req.method(), req.path(), query),
        None => format!("{} {}", req.method(), req.path()),
    };
    state.requests.lock().unwrap().push(line);
    state.failing.load(Ordering::SeqCst)
}

fn page(mut products: Vec<Product>, params: &ListParams) -> ProductPage {
    if let Some(field) = params.sort_by.as_deref() {
        match field {
            "price" => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
            _ => products.sort_by(|a, b| a.title.cmp(&b.title)),
        }
        if params.order.as_deref() == Some("desc") {
            products.reverse();
        }
    }

    let total = products.len();
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(30);
    ProductPage {
        products: products.into_iter().skip(skip).take(limit).collect(),
        total,
        skip,
        limit,
    }
}

fn not_found(id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": format!("Product with id '{id}' not found") }))
}

fn from_payload(id: i64, payload: &Value) -> Product {
    Product {
        id,
        title: payload["title"].as_str().unwrap_or_default().to_string(),
        description: payload["description"].as_str().unwrap_or_default().to_string(),
        category: payload["category"].as_str().unwrap_or_default().to_string(),
        price: payload["price"].as_f64().unwrap_or_default(),
        discount_percentage: payload["discountPercentage"].as_f64().unwrap_or_default(),
        images: payload["images"]
            .as_array()
            .map(|images| {
                images
                    .iter()
                    .filter_map(|i| i.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        ..Product::default()
    }
}

async fn list(
    req: HttpRequest,
    state: web::Data<FakeState>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    if record(&state, &req) {
        return HttpResponse::InternalServerError().finish();
    }
    let products = state.products.lock().unwrap().clone();
    HttpResponse::Ok().json(page(products, &params))
}

async fn search(
    req: HttpRequest,
    state: web::Data<FakeState>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    if record(&state, &req) {
        return HttpResponse::InternalServerError().finish();
    }
    let term = params.q.clone().unwrap_or_default().to_lowercase();
    let products = state
        .products
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&term))
        .cloned()
        .collect();
    HttpResponse::Ok().json(page(products, &params))
}

async fn by_category(
    req: HttpRequest,
    state: web::Data<FakeState>,
    slug: web::Path<String>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    if record(&state, &req) {
        return HttpResponse::InternalServerError().finish();
    }
    let products = state
        .products
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.category == slug.as_str())
        .cloned()
        .collect();
    HttpResponse::Ok().json(page(products, &params))
}

async fn category_list(req: HttpRequest, state: web::Data<FakeState>) -> HttpResponse {
    if record(&state, &req) {
        return HttpResponse::InternalServerError().finish();
    }
    let mut categories: Vec<String> = state
        .products
        .lock()
        .unwrap()
        .iter()
        .map(|p| p.category.clone())
        .collect();
    categories.sort();
    categories.dedup();
    HttpResponse::Ok().json(categories)
}

async fn get_one(req: HttpRequest, state: web::Data<FakeState>, id: web::Path<String>) -> HttpResponse {
    if record(&state, &req) {
        return HttpResponse::InternalServerError().finish();
    }
    let products = state.products.lock().unwrap();
    match products.iter().find(|p| p.id.to_string() == *id) {
        Some(product) => HttpResponse::Ok().json(product),
        None => not_found(&id),
    }
}

async fn add(req: HttpRequest, state: web::Data<FakeState>, payload: web::Json<Value>) -> HttpResponse {
    if record(&state, &req) {
        return HttpResponse::InternalServerError().finish();
    }
    let mut products = state.products.lock().unwrap();
    let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let created = from_payload(id, &payload);
    products.push(created.clone());
    HttpResponse::Created().json(created)
}

async fn update(
    req: HttpRequest,
    state: web::Data<FakeState>,
    id: web::Path<String>,
    payload: web::Json<Value>,
) -> HttpResponse {
    if record(&state, &req) {
        return HttpResponse::InternalServerError().finish();
    }
    let mut products = state.products.lock().unwrap();
    match products.iter_mut().find(|p| p.id.to_string() == *id) {
        Some(existing) => {
            *existing = from_payload(existing.id, &payload);
            HttpResponse::Ok().json(existing.clone())
        }
        None => not_found(&id),
    }
}

async fn remove(req: HttpRequest, state: web::Data<FakeState>, id: web::Path<String>) -> HttpResponse {
    if record(&state, &req) {
        return HttpResponse::InternalServerError().finish();
    }
    let mut products = state.products.lock().unwrap();
    match products.iter().position(|p| p.id.to_string() == *id) {
        Some(index) => {
            let deleted = products.remove(index);
            HttpResponse::Ok().json(json!({ "id": deleted.id, "title": deleted.title, "isDeleted": true }))
        }
        None => not_found(&id),
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/products", web::get().to(list))
        .route("/products/search", web::get().to(search))
        .route("/products/category-list", web::get().to(category_list))
        .route("/products/category/{slug}", web::get().to(by_category))
        .route("/products/add", web::post().to(add))
        .route("/products/{id}", web::get().to(get_one))
        .route("/products/{id}", web::put().to(update))
        .route("/products/{id}", web::delete().to(remove));
}

/// Starts the fake API on an ephemeral port.
pub async fn spawn_fake_api(products: Vec<Product>) -> FakeApi {
    let state = web::Data::new(FakeState {
        products: Mutex::new(products),
        ..FakeState::default()
    });

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let app_state = state.clone();
    let server = HttpServer::new(move || App::new().app_data(app_state.clone()).configure(routes))
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    FakeApi {
        base_url: format!("http://127.0.0.1:{port}"),
        state,
        handle,
    }
}
