//! Filter Panel Component
//!
//! Edits the staged criteria. Nothing is fetched until Search or Clear.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};
use crate::table::{FilterCriteria, StockSelection};

#[component]
pub fn FilterPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();

    let staged = Memo::new(move |_| ctx.table_state.with(|s| s.filters.staged().clone()));

    let edit = move |change: Box<dyn FnOnce(&mut FilterCriteria)>| {
        let table = ctx.table();
        let mut draft = table.staged();
        change(&mut draft);
        table.stage(draft);
    };

    let search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let table = ctx.table();
        spawn_local(async move {
            table.search().await;
        });
    };

    let clear = move |_| {
        let table = ctx.table();
        spawn_local(async move {
            table.clear().await;
        });
    };

    view! {
        <form class="filter-panel" on:submit=search>
            <label class="filter-field">
                <span>"Name"</span>
                <input
                    type="text"
                    placeholder="Search by name..."
                    prop:value=move || staged.with(|c| c.name.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        edit(Box::new(move |draft| draft.name = value));
                    }
                />
            </label>

            <fieldset class="filter-field category-filter">
                <legend>"Categories"</legend>
                <For
                    each=move || store.categories().get()
                    key=|category| category.name.clone()
                    let:category
                >
                    {
                        let name = category.name.clone();
                        let checked_name = name.clone();
                        view! {
                            <label class="category-option">
                                <input
                                    type="checkbox"
                                    prop:checked=move || staged.with(|c| c.categories.contains(&checked_name))
                                    on:change=move |_| {
                                        let name = name.clone();
                                        edit(Box::new(move |draft| draft.toggle_category(&name)));
                                    }
                                />
                                {category.name}
                            </label>
                        }
                    }
                </For>
            </fieldset>

            <label class="filter-field">
                <span>"Availability"</span>
                <select
                    prop:value=move || staged.with(|c| c.stock_selection().as_str())
                    on:change=move |ev| {
                        let selection = StockSelection::parse(&event_target_value(&ev));
                        edit(Box::new(move |draft| draft.in_stock = selection.to_filter()));
                    }
                >
                    {StockSelection::ALL.iter().map(|selection| view! {
                        <option value=selection.as_str()>{selection.label()}</option>
                    }).collect_view()}
                </select>
            </label>

            <div class="filter-actions">
                <button type="submit" class="primary-btn">"Search"</button>
                <button type="button" class="secondary-btn" on:click=clear>"Clear"</button>
            </div>

            <div class="active-filters">
                {move || staged.with(|c| c.categories.iter().cloned().collect::<Vec<_>>()).into_iter().map(|name| {
                    let removed = name.clone();
                    view! {
                        <span class="filter-chip">
                            {name}
                            <button
                                type="button"
                                class="chip-remove"
                                on:click=move |_| {
                                    let removed = removed.clone();
                                    edit(Box::new(move |draft| draft.remove_category(&removed)));
                                }
                            >
                                "×"
                            </button>
                        </span>
                    }
                }).collect_view()}
            </div>
        </form>
    }
}
