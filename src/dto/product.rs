//! View models derived from catalog products.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::category::format_category;
use crate::domain::product::{Product, Review};

/// Display format for audit timestamps, e.g. `May 23, 2024 8:56 am`.
pub const DATE_TIME_FORMAT: &str = "%b %-d, %Y %-I:%M %P";

/// Length of the description shown in table rows.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 120;

pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

pub fn format_timestamp(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|ts| ts.format(DATE_TIME_FORMAT).to_string())
}

/// Cuts `text` to `max_chars` characters, marking the cut with `...`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

fn discount_badge(product: &Product) -> Option<String> {
    (product.discount_percentage > 0.0).then(|| format!("-{:.0}% OFF", product.discount_percentage))
}

fn original_price(product: &Product) -> Option<String> {
    (product.discount_percentage > 0.0).then(|| format_price(product.price))
}

/// Number of filled stars for a rating out of five.
fn stars(rating: f64) -> usize {
    rating.clamp(0.0, 5.0).floor() as usize
}

/// Grid tile on the home and catalog pages.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub image: Option<String>,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_badge: Option<String>,
    pub rating: Option<String>,
    pub out_of_stock: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            url: format!("/products/{}", product.id),
            image: product.cover_image().map(str::to_string),
            price: format_price(product.discounted_price()),
            original_price: original_price(product),
            discount_badge: discount_badge(product),
            rating: (product.rating > 0.0).then(|| format!("{:.1}", product.rating)),
            out_of_stock: product.is_out_of_stock(),
        }
    }
}

/// Row of the products table. Carries the raw values the edit modal is
/// pre-filled with.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub description_excerpt: String,
    pub category: String,
    pub price: String,
    pub raw_price: f64,
    pub discount_percentage: f64,
    pub images: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.cover_image().map(str::to_string),
            description: product.description.clone(),
            description_excerpt: excerpt(&product.description, DESCRIPTION_EXCERPT_CHARS),
            category: product.category.clone(),
            price: format_price(product.price),
            raw_price: product.price,
            discount_percentage: product.discount_percentage,
            images: product.images.clone(),
            created_at: format_timestamp(product.created_at()),
            updated_at: format_timestamp(product.updated_at()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    pub reviewer_name: String,
    pub date: Option<String>,
    pub stars: usize,
    pub comment: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            reviewer_name: review.reviewer_name.clone(),
            date: review.date.map(|date| date.format("%b %-d, %Y").to_string()),
            stars: stars(review.rating),
            comment: review.comment.clone(),
        }
    }
}

/// Everything the product detail template shows.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub brand: Option<String>,
    pub rating: String,
    pub stars: usize,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_badge: Option<String>,
    pub in_stock: bool,
    pub stock: i64,
    pub availability: Option<String>,
    pub minimum_order_quantity: Option<i64>,
    pub shipping: Option<String>,
    pub return_policy: Option<String>,
    pub warranty: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub sku: Option<String>,
    pub weight: Option<String>,
    pub dimensions: Option<String>,
    pub barcode: Option<String>,
    pub images: Vec<String>,
    pub reviews: Vec<ReviewView>,
}

impl From<&Product> for ProductDetail {
    fn from(product: &Product) -> Self {
        let mut images = product.images.clone();
        if images.is_empty() {
            images.extend(product.thumbnail.clone());
        }

        Self {
            id: product.id,
            title: product.title.clone(),
            category: format_category(&product.category),
            brand: product.brand.clone().filter(|b| !b.is_empty()),
            rating: format!("{}", product.rating),
            stars: stars(product.rating),
            price: format_price(product.discounted_price()),
            original_price: original_price(product),
            discount_badge: discount_badge(product),
            in_stock: product.stock > 0,
            stock: product.stock,
            availability: product.availability_status.clone(),
            minimum_order_quantity: product.minimum_order_quantity,
            shipping: product.shipping_information.clone(),
            return_policy: product.return_policy.clone(),
            warranty: product.warranty_information.clone(),
            description: product.description.clone(),
            tags: product.tags.clone(),
            sku: product.sku.clone(),
            weight: product.weight.map(|w| format!("{w} kg")),
            dimensions: product
                .dimensions
                .as_ref()
                .map(|d| format!("{} × {} × {} cm", d.width, d.height, d.depth)),
            barcode: product.meta.as_ref().and_then(|meta| meta.barcode.clone()),
            images,
            reviews: product.reviews.iter().map(ReviewView::from).collect(),
        }
    }
}
