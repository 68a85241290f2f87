//! Create and edit product modal forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::product::NewProduct;
use crate::domain::types::{
    CategorySlug, DiscountPercentage, ImageUrl, Price, ProductDescription, ProductTitle,
};
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Product modal submission. Numbers arrive as text and are coerced later.
pub struct ProductForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, rename = "discountPercentage")]
    pub discount_percentage: String,
    /// One entry per image input; blank inputs are ignored.
    #[serde(default)]
    pub images: Vec<String>,
    /// Query string of the table view the modal was opened from.
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
/// Delete confirmation submission.
pub struct DeleteProductForm {
    #[serde(default)]
    pub query: String,
}

impl ProductForm {
    /// Decodes an `application/x-www-form-urlencoded` body with repeated
    /// `images` keys.
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| FormError::Malformed(err.to_string()))
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let title = ProductTitle::new(form.title).map_err(|_| FormError::InvalidTitle)?;
        let description =
            ProductDescription::new(form.description).map_err(|_| FormError::InvalidDescription)?;
        let category = CategorySlug::new(form.category).map_err(|_| FormError::InvalidCategory)?;

        let price = parse_number(&form.price)
            .and_then(|value| Price::new(value).ok())
            .ok_or(FormError::InvalidPrice)?;

        let discount_percentage = if form.discount_percentage.trim().is_empty() {
            DiscountPercentage::default()
        } else {
            parse_number(&form.discount_percentage)
                .and_then(|value| DiscountPercentage::new(value).ok())
                .ok_or(FormError::InvalidDiscount)?
        };

        let images = form
            .images
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .map(|url| ImageUrl::new(url).map_err(|_| FormError::InvalidImageUrl))
            .collect::<Result<Vec<_>, _>>()?;

        if images.is_empty() {
            return Err(FormError::MissingImages);
        }

        Ok(NewProduct::new(
            title,
            description,
            category,
            price,
            discount_percentage,
            images,
        ))
    }
}
