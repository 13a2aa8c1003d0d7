//! Inventory Dashboard App
//!
//! Root component: builds the coordinator, provides context and lays out
//! filters, table and metrics.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::components::{ActivityLog, CategoryForm, FilterPanel, ItemFormModal, ItemFormMode, ItemTable, MetricsPanel};
use crate::config::DashboardConfig;
use crate::context::AppContext;
use crate::store::{store_set_categories, DashboardState, DashboardStateStoreFields};
use crate::table::TableCoordinator;

#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let api = ApiClient::new(config.api_base_url.clone());
    let table = TableCoordinator::new(Rc::new(api.clone()), config.local_page_size, config.stale_responses);
    tracing::info!(base_url = %api.base_url(), local_page_size = config.local_page_size, "dashboard starting");

    let store = Store::new(DashboardState::default());
    let ctx = AppContext::new(api, table);
    provide_context(store);
    provide_context(ctx);

    let (form_mode, set_form_mode) = signal::<Option<ItemFormMode>>(None);

    // First page with the default criteria
    Effect::new(move |_| {
        let table = ctx.table();
        spawn_local(async move {
            table.refetch().await;
        });
    });

    // Categories reload when the catalog changes
    Effect::new(move |_| {
        let _ = store.catalog_version().get();
        let api = ctx.api();
        spawn_local(async move {
            match api.list_categories().await {
                Ok(categories) => store_set_categories(&store, categories),
                Err(err) => tracing::warn!(error = %err, "category load failed"),
            }
        });
    });

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"Inventory"</h1>
                <CategoryForm />
                <button class="primary-btn" on:click=move |_| set_form_mode.set(Some(ItemFormMode::Create))>
                    "New Item"
                </button>
            </header>

            <FilterPanel />
            <ItemTable set_form_mode=set_form_mode />
            <MetricsPanel />
            <ActivityLog />

            <ItemFormModal mode=form_mode set_mode=set_form_mode />
        </div>
    }
}
