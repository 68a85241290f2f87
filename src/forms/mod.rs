//! Form definitions backing the storefront routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod product;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("{}", first_message(.0))]
    Validation(#[from] ValidationErrors),

    #[error("malformed form data: {0}")]
    Malformed(String),

    #[error("Title is required")]
    InvalidTitle,

    #[error("Description is required")]
    InvalidDescription,

    #[error("Category is required")]
    InvalidCategory,

    #[error("Price must be greater than zero")]
    InvalidPrice,

    #[error("Discount percentage must be between 0 and 100")]
    InvalidDiscount,

    #[error("At least one image is required")]
    MissingImages,

    #[error("Images must be valid URLs")]
    InvalidImageUrl,
}

/// Picks the first human readable message out of a validation report.
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .find_map(|error| error.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "Invalid form data".to_string())
}
