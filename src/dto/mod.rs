//! DTO modules that bridge services with templates and APIs.

pub mod api;
pub mod catalog;
pub mod listing;
pub mod main;
pub mod product;
pub mod products_table;

use serde::Serialize;

/// How fresh the products shown by a listing view are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Fresh,
    /// The refetch failed; the last page loaded for the same view is shown.
    Previous,
    /// The refetch failed and nothing was loaded before.
    Unavailable,
}

impl ListingStatus {
    /// Notice shown above the listing, if any.
    pub fn notice(self) -> Option<&'static str> {
        match self {
            ListingStatus::Fresh => None,
            ListingStatus::Previous => Some("Showing previously loaded products"),
            ListingStatus::Unavailable => Some("Failed to load products"),
        }
    }
}
