//! Domain aggregates exposed by the storefront service layer.

pub mod category;
pub mod product;
pub mod types;
