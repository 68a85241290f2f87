//! Product categories as exposed by the catalog API.

use serde::Serialize;

/// Category slug together with its display label.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Category {
    pub slug: String,
    pub label: String,
}

impl Category {
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let label = format_category(&slug);
        Self { slug, label }
    }
}

/// Turns `mens-shirts` into `Mens Shirts`.
pub fn format_category(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
