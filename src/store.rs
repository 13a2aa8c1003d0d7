//! Global Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Category, InventoryMetricsReport};

/// Dashboard-wide state outside the table coordinator
#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    /// Categories offered by the filter panel and item form
    pub categories: Vec<Category>,
    /// Last metrics report that loaded successfully
    pub metrics: Option<InventoryMetricsReport>,
    /// Bumped after every create, update, delete or category change
    pub catalog_version: u32,
}

pub type DashboardStore = Store<DashboardState>;

pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Signal that the catalog changed so categories and metrics reload
pub fn store_bump_catalog(store: &DashboardStore) {
    *store.catalog_version().write() += 1;
}

/// Replace categories, keeping them ordered by name
pub fn store_set_categories(store: &DashboardStore, mut categories: Vec<Category>) {
    categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    store.categories().set(categories);
}

pub fn store_set_metrics(store: &DashboardStore, report: InventoryMetricsReport) {
    store.metrics().set(Some(report));
}
