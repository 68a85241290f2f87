use serde::Serialize;

/// Default number of rows per page in the products table.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Page counts up to this value are listed without compression.
const FULL_WINDOW_PAGES: usize = 7;

/// Number of pages needed to show `total` items, `limit` at a time.
pub fn max_page(total: usize, limit: usize) -> usize {
    if limit == 0 { 0 } else { total.div_ceil(limit) }
}

/// Page indicators for the pagination control. `None` is an ellipsis.
///
/// Returns `None` when there is at most one page and no control should be
/// rendered. `current_page` is expected to be within `1..=max_page`.
pub fn page_window(total: usize, limit: usize, current_page: usize) -> Option<Vec<Option<usize>>> {
    let last_page = max_page(total, limit);

    if last_page <= 1 {
        return None;
    }

    if last_page <= FULL_WINDOW_PAGES {
        return Some((1..=last_page).map(Some).collect());
    }

    let mid_start = current_page.saturating_sub(1).max(2);
    let mid_end = current_page.saturating_add(1).min(last_page - 1);

    let mut pages = vec![Some(1)];

    if mid_start > 2 {
        pages.push(None);
    }
    pages.extend((mid_start..=mid_end).map(Some));

    if mid_end < last_page - 1 {
        pages.push(None);
    }
    pages.push(Some(last_page));

    Some(pages)
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Empty when the control is not rendered.
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub max_page: usize,
    pub total: usize,
    pub limit: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total: usize, limit: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let max_page = max_page(total, limit);

        let pages = page_window(total, limit, current_page).unwrap_or_default();

        Self {
            items,
            pages,
            page: current_page,
            max_page,
            total,
            limit,
            has_previous: current_page > 1,
            has_next: current_page < max_page,
        }
    }

    /// Whether a pagination control should be rendered at all.
    pub fn is_paginated(&self) -> bool {
        !self.pages.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pages: self.pages,
            page: self.page,
            max_page: self.max_page,
            total: self.total,
            limit: self.limit,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}
