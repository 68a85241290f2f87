//! List view state carried in the address bar.
//!
//! Every filter, sort and pagination control of the product views is a link
//! or a form whose target is computed here, so the URL stays the single
//! source of truth for what a listing shows.

use serde::Serialize;

use crate::domain::types::{SortField, SortOrder};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

/// Upper bound for the `limit` parameter.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Raw query parameters as they appear in the URL.
#[derive(Debug, Default)]
pub struct ListingParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Normalized listing state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<SortField>,
    pub order: SortOrder,
    pub page: usize,
    pub limit: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            sort_by: None,
            order: SortOrder::Asc,
            page: 1,
            limit: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

#[derive(Serialize)]
struct UrlParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(rename = "sortBy", skip_serializing_if = "Option::is_none")]
    sort_by: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'static str>,
    page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
}

impl From<ListingParams> for QueryState {
    fn from(params: ListingParams) -> Self {
        let sort_by = params
            .sort_by
            .as_deref()
            .and_then(|s| s.parse::<SortField>().ok());
        // The order is meaningless without a sort field.
        let order = params
            .order
            .as_deref()
            .filter(|_| sort_by.is_some())
            .and_then(|s| s.parse::<SortOrder>().ok())
            .unwrap_or_default();

        Self {
            search: non_empty(params.search),
            category: non_empty(params.category),
            sort_by,
            order,
            page: positive(params.page.as_deref()).unwrap_or(1),
            limit: positive(params.limit.as_deref())
                .map(|limit| limit.min(MAX_ITEMS_PER_PAGE))
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        }
    }
}

impl QueryState {
    /// Parses a raw query string, falling back to defaults for anything
    /// malformed. A repeated key keeps its first value.
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let pairs: Vec<(String, String)> = serde_html_form::from_str(query).unwrap_or_default();
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone())
        };

        ListingParams {
            search: first("search"),
            category: first("category"),
            sort_by: first("sortBy"),
            order: first("order"),
            page: first("page"),
            limit: first("limit"),
        }
        .into()
    }

    /// Explicit search submission. A term starts a fresh listing holding
    /// only the search; an empty term clears every parameter.
    #[must_use]
    pub fn submit_search(&self, term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            return self.cleared();
        }
        Self {
            search: Some(term.to_string()),
            ..Self::default()
        }
    }

    /// Sets the category filter, `None` meaning all categories.
    #[must_use]
    pub fn with_category(&self, category: Option<&str>) -> Self {
        Self {
            category: non_empty(category.map(str::to_string)),
            page: 1,
            ..self.clone()
        }
    }

    /// Sets the sort field keeping the current order; `None` clears sorting.
    #[must_use]
    pub fn with_sort(&self, sort_by: Option<SortField>) -> Self {
        Self {
            sort_by,
            order: if sort_by.is_some() {
                self.order
            } else {
                SortOrder::Asc
            },
            page: 1,
            ..self.clone()
        }
    }

    /// Flips the sort order. Without a sort field this is a no-op.
    #[must_use]
    pub fn toggle_order(&self) -> Self {
        if self.sort_by.is_none() {
            return self.clone();
        }
        Self {
            order: self.order.flipped(),
            page: 1,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    pub fn has_active_filters(&self) -> bool {
        self.search.is_some() || self.category.is_some() || self.sort_by.is_some()
    }

    /// Encodes the tracked parameters, empty for the default state.
    pub fn to_query_string(&self) -> String {
        if *self == Self::default() {
            return String::new();
        }

        let params = UrlParams {
            search: self.search.as_deref(),
            category: self.category.as_deref(),
            sort_by: self.sort_by.map(SortField::as_str),
            order: self.sort_by.map(|_| self.order.as_str()),
            page: self.page,
            limit: (self.limit != DEFAULT_ITEMS_PER_PAGE).then_some(self.limit),
        };

        serde_html_form::to_string(&params).unwrap_or_default()
    }

    /// Full link to `base_path` carrying this state.
    pub fn to_url(&self, base_path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            base_path.to_string()
        } else {
            format!("{base_path}?{query}")
        }
    }
}
