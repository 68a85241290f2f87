use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategorySlug, DiscountPercentage, ImageUrl, Price, ProductDescription, ProductTitle,
};

/// Product as served by the remote catalog API.
///
/// Only `id` and `title` are guaranteed; everything else defaults when the
/// API omits it (freshly created products come back without `meta`,
/// `reviews` and friends).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub warranty_information: Option<String>,
    #[serde(default)]
    pub shipping_information: Option<String>,
    #[serde(default)]
    pub availability_status: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub return_policy: Option<String>,
    #[serde(default)]
    pub minimum_order_quantity: Option<i64>,
    #[serde(default)]
    pub meta: Option<ProductMeta>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Product {
    /// Price after applying the discount percentage.
    pub fn discounted_price(&self) -> f64 {
        if self.discount_percentage > 0.0 {
            self.price * (1.0 - self.discount_percentage / 100.0)
        } else {
            self.price
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Image shown in grids and tables: the first gallery image, falling
    /// back to the thumbnail.
    pub fn cover_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| self.thumbnail.as_deref().filter(|s| !s.is_empty()))
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.meta.as_ref().and_then(|meta| meta.created_at)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.meta.as_ref().and_then(|meta| meta.updated_at)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Dimensions {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub depth: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: String,
}

/// Audit metadata attached to every stored product.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub qr_code: Option<String>,
}

/// Listing envelope returned by the collection endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub limit: usize,
}

/// Payload sent to the create and update endpoints.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: ProductTitle,
    pub description: ProductDescription,
    pub category: CategorySlug,
    pub price: Price,
    pub discount_percentage: DiscountPercentage,
    pub images: Vec<ImageUrl>,
}

impl NewProduct {
    #[must_use]
    pub fn new(
        title: ProductTitle,
        description: ProductDescription,
        category: CategorySlug,
        price: Price,
        discount_percentage: DiscountPercentage,
        images: Vec<ImageUrl>,
    ) -> Self {
        Self {
            title,
            description,
            category,
            price,
            discount_percentage,
            images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_product_with_meta() {
        let json = r#"{
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Popular mascara",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "tags": ["beauty", "mascara"],
            "reviews": [{"rating": 2, "comment": "Very unhappy!", "date": "2024-05-23T08:56:21.618Z", "reviewerName": "John Doe", "reviewerEmail": "john.doe@x.dummyjson.com"}],
            "meta": {"createdAt": "2024-05-23T08:56:21.618Z", "updatedAt": "2024-05-23T08:56:21.618Z", "barcode": "9164035109868", "qrCode": "https://assets.dummyjson.com/public/qr-code.png"},
            "images": ["https://cdn.dummyjson.com/products/images/beauty/1.png"],
            "thumbnail": "https://cdn.dummyjson.com/products/images/beauty/thumbnail.png"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.reviews.len(), 1);
        assert_eq!(product.reviews[0].reviewer_name, "John Doe");
        assert!(product.created_at().is_some());
        assert_eq!(
            product.cover_image(),
            Some("https://cdn.dummyjson.com/products/images/beauty/1.png")
        );
    }

    #[test]
    fn deserializes_freshly_created_product_without_meta() {
        let json = r#"{"id": 195, "title": "Lamp", "price": 12.5, "images": ["https://x.test/a.png"]}"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 195);
        assert!(product.meta.is_none());
        assert!(product.created_at().is_none());
        assert_eq!(product.cover_image(), Some("https://x.test/a.png"));
    }

    #[test]
    fn cover_image_falls_back_to_thumbnail() {
        let product = Product {
            images: vec![String::new()],
            thumbnail: Some("https://x.test/thumb.png".to_string()),
            ..Product::default()
        };

        assert_eq!(product.cover_image(), Some("https://x.test/thumb.png"));
        assert_eq!(Product::default().cover_image(), None);
    }

    #[test]
    fn discounted_price_applies_percentage() {
        let product = Product {
            price: 200.0,
            discount_percentage: 25.0,
            ..Product::default()
        };
        assert!((product.discounted_price() - 150.0).abs() < f64::EPSILON);

        let full_price = Product {
            price: 10.0,
            ..Product::default()
        };
        assert!((full_price.discounted_price() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_product_serializes_in_camel_case() {
        let product = NewProduct::new(
            ProductTitle::new("Lamp").unwrap(),
            ProductDescription::new("Desk lamp").unwrap(),
            CategorySlug::new("home-decoration").unwrap(),
            Price::new(12.5).unwrap(),
            DiscountPercentage::new(10.0).unwrap(),
            vec![ImageUrl::new("https://x.test/a.png").unwrap()],
        );

        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["title"], "Lamp");
        assert_eq!(value["category"], "home-decoration");
        assert_eq!(value["discountPercentage"], 10.0);
        assert_eq!(value["images"][0], "https://x.test/a.png");
    }
}
