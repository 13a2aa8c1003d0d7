//! Local Sort-over-Page
//!
//! Client-side re-ordering and re-slicing of the page window the server
//! already delivered. Totals reported by the server are untouched.

use std::cmp::Ordering;

use crate::models::Item;

use super::{SortDirection, SortField, SortSpec};

/// Compare two items on `spec.field` in `spec.direction`.
///
/// Items without an expiration date sort after dated ones in both
/// directions.
pub fn compare_items(a: &Item, b: &Item, spec: SortSpec) -> Ordering {
    let ordering = match spec.field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Category => a
            .category
            .name
            .to_lowercase()
            .cmp(&b.category.name.to_lowercase()),
        SortField::UnitPrice => a.unit_price.cmp(&b.unit_price),
        SortField::Stock => a.stock.cmp(&b.stock),
        SortField::Expiration => match (a.expires_at(), b.expires_at()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(x), Some(y)) => x.cmp(&y),
        },
    };
    match spec.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable sort; equal keys keep their window order
pub fn sort_items(items: &mut [Item], spec: SortSpec) {
    items.sort_by(|a, b| compare_items(a, b, spec));
}

/// One client-side page of rows
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPage {
    pub rows: Vec<Item>,
    /// 1-based
    pub page: usize,
    pub page_count: usize,
}

/// Client-chosen sort and page over the delivered window
#[derive(Debug, Clone, PartialEq)]
pub struct LocalView {
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl LocalView {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Mirror the server's sort (the window already arrives in this order)
    pub fn seed(&mut self, server_sort: SortSpec) {
        self.sort = Some(server_sort);
        self.page = 1;
    }

    /// Header click: same field flips direction, a new field starts
    /// ascending on page 1.
    pub fn toggle(&mut self, field: SortField) {
        match self.sort {
            Some(current) if current.field == field => {
                self.sort = Some(current.toggled(field));
            }
            _ => {
                self.sort = Some(SortSpec::ascending(field));
                self.page = 1;
            }
        }
    }

    /// Show rows in the order the server delivered them
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.page = 1;
    }

    /// Called after every successful remote fetch
    pub fn on_window_replaced(&mut self) {
        self.page = 1;
    }

    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize, row_count: usize) {
        self.page = page.clamp(1, self.page_count(row_count));
    }

    pub fn sorted(&self, items: &[Item]) -> Vec<Item> {
        let mut rows = items.to_vec();
        if let Some(spec) = self.sort {
            sort_items(&mut rows, spec);
        }
        rows
    }

    /// Sorted rows of the current local page
    pub fn visible(&self, items: &[Item]) -> LocalPage {
        let page_count = self.page_count(items.len());
        let page = self.page.clamp(1, page_count);
        let rows = self
            .sorted(items)
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();
        LocalPage { rows, page, page_count }
    }

    /// Arrow shown next to a column header
    pub fn indicator(&self, field: SortField) -> &'static str {
        match self.sort {
            Some(SortSpec { field: f, direction: SortDirection::Ascending }) if f == field => " ▲",
            Some(SortSpec { field: f, direction: SortDirection::Descending }) if f == field => " ▼",
            _ => "",
        }
    }
}
