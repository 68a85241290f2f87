//! Links and labels for the filter, sort and pagination controls.
//!
//! Every control is a plain link computed from the current [`QueryState`].

use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::category::format_category;
use crate::domain::types::{SortField, SortOrder};
use crate::pagination::Paginated;
use crate::query_state::QueryState;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterLink {
    pub label: String,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActiveFilter {
    pub label: &'static str,
    pub value: String,
}

/// Search box, category and sort selectors of a listing view.
#[derive(Debug, Clone, Serialize)]
pub struct ListingControls {
    pub search: Option<String>,
    pub categories: Vec<FilterLink>,
    pub sort_options: Vec<FilterLink>,
    /// Present only while a sort field is selected.
    pub order_toggle: Option<FilterLink>,
    pub active_filters: Vec<ActiveFilter>,
    /// Present only while a filter is active.
    pub clear_url: Option<String>,
    /// Encoded current state, echoed back by forms.
    pub query: String,
}

impl ListingControls {
    pub fn new(state: &QueryState, base_path: &str, categories: &[Category]) -> Self {
        let mut category_links = vec![FilterLink {
            label: "All Categories".to_string(),
            url: state.with_category(None).to_url(base_path),
            active: state.category.is_none(),
        }];
        category_links.extend(categories.iter().map(|category| FilterLink {
            label: category.label.clone(),
            url: state.with_category(Some(&category.slug)).to_url(base_path),
            active: state.category.as_deref() == Some(category.slug.as_str()),
        }));

        let mut sort_options = vec![FilterLink {
            label: "None".to_string(),
            url: state.with_sort(None).to_url(base_path),
            active: state.sort_by.is_none(),
        }];
        sort_options.extend(SortField::ALL.iter().map(|field| FilterLink {
            label: field.label().to_string(),
            url: state.with_sort(Some(*field)).to_url(base_path),
            active: state.sort_by == Some(*field),
        }));

        let order_toggle = state.sort_by.map(|_| FilterLink {
            label: match state.order {
                SortOrder::Asc => "Ascending".to_string(),
                SortOrder::Desc => "Descending".to_string(),
            },
            url: state.toggle_order().to_url(base_path),
            active: state.order == SortOrder::Desc,
        });

        let mut active_filters = Vec::new();
        if let Some(search) = &state.search {
            active_filters.push(ActiveFilter {
                label: "Search",
                value: search.clone(),
            });
        }
        if let Some(category) = &state.category {
            active_filters.push(ActiveFilter {
                label: "Category",
                value: format_category(category),
            });
        }
        if let Some(field) = state.sort_by {
            active_filters.push(ActiveFilter {
                label: "Sort",
                value: format!("{} ({})", field.label(), state.order.as_str()),
            });
        }

        Self {
            search: state.search.clone(),
            categories: category_links,
            sort_options,
            order_toggle,
            active_filters,
            clear_url: state
                .has_active_filters()
                .then(|| state.cleared().to_url(base_path)),
            query: state.to_query_string(),
        }
    }
}

/// Single entry of the page selector. An entry without a number is an
/// ellipsis.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub number: Option<usize>,
    pub url: Option<String>,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationControls {
    pub pages: Vec<PageLink>,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
}

impl PaginationControls {
    /// `None` when the listing fits on a single page.
    pub fn new<T>(paginated: &Paginated<T>, state: &QueryState, base_path: &str) -> Option<Self> {
        if !paginated.is_paginated() {
            return None;
        }

        let pages = paginated
            .pages
            .iter()
            .map(|page| PageLink {
                number: *page,
                url: page.map(|n| state.with_page(n).to_url(base_path)),
                current: *page == Some(paginated.page),
            })
            .collect();

        Some(Self {
            pages,
            previous_url: paginated
                .has_previous
                .then(|| state.with_page(paginated.page - 1).to_url(base_path)),
            next_url: paginated
                .has_next
                .then(|| state.with_page(paginated.page + 1).to_url(base_path)),
        })
    }
}
