//! Metrics Panel Component
//!
//! Overall and per-category stock totals. Reloads whenever the catalog
//! version in the store changes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::LOAD_METRICS;
use crate::context::use_app_context;
use crate::format;
use crate::store::{store_set_metrics, use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn MetricsPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();

    // Bumped by Refresh and Try Again
    let (retry_trigger, set_retry_trigger) = signal(0u32);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let version = store.catalog_version().get();
        let _ = retry_trigger.get();
        set_loading.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.get_metrics().await {
                Ok(report) => {
                    tracing::debug!(version, categories = report.category_metrics.len(), "metrics loaded");
                    store_set_metrics(&store, report);
                    set_error.set(None);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "metrics load failed");
                    set_error.set(Some(err.user_message(&LOAD_METRICS)));
                }
            }
            set_loading.set(false);
        });
    });

    view! {
        <section class="metrics-panel">
            <div class="panel-header">
                <h2>"Inventory Metrics"</h2>
                <button
                    class="secondary-btn"
                    disabled=move || loading.get()
                    on:click=move |_| set_retry_trigger.update(|v| *v += 1)
                >
                    "Refresh"
                </button>
            </div>
            {move || error.get().map(|message| view! {
                <div class="notice notice-error">
                    <span>{message}</span>
                    <button class="retry-btn" on:click=move |_| set_retry_trigger.update(|v| *v += 1)>
                        "Try Again"
                    </button>
                </div>
            })}
            <Show when=move || loading.get() && store.metrics().with(Option::is_none)>
                <div class="loading-marker">"Loading metrics..."</div>
            </Show>
            {move || store.metrics().get().map(|report| {
                let overall = report.overall_metrics;
                view! {
                    <table class="metrics-table">
                        <thead>
                            <tr>
                                <th>"Category"</th>
                                <th>"Products in Stock"</th>
                                <th>"Value in Stock"</th>
                                <th>"Average Price"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {report.category_metrics.into_iter().map(|m| view! {
                                <tr>
                                    <td>{m.category_name}</td>
                                    <td>{format::count(m.total_products_in_stock)}</td>
                                    <td>{format::currency(m.total_value_in_stock)}</td>
                                    <td>{format::currency(m.average_price_in_stock)}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                        <tfoot>
                            <tr class="overall-row">
                                <td>"Overall"</td>
                                <td>{format::count(overall.total_products_in_stock)}</td>
                                <td>{format::currency(overall.total_value_in_stock)}</td>
                                <td>{format::currency(overall.average_price_in_stock)}</td>
                            </tr>
                        </tfoot>
                    </table>
                }
            })}
        </section>
    }
}
