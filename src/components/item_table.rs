//! Item Table Component
//!
//! Renders the coordinator snapshot: sortable headers, classified rows,
//! per-row stock toggles and both pagers.

use chrono::{DateTime, Utc};
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::DELETE_ITEM;
use crate::components::item_form::ItemFormMode;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::format;
use crate::models::Item;
use crate::store::{store_bump_catalog, use_dashboard_store};
use crate::table::{classify, SortField};

const PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

/// How often row colours are re-evaluated against the wall clock
const CLOCK_TICK_MS: u32 = 60_000;

/// Clickable column header showing the local sort arrow
#[component]
fn SortHeader(field: SortField) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <th class="sortable" on:click=move |_| ctx.table().toggle_sort(field)>
            {field.label()}
            <span class="sort-indicator">
                {move || ctx.table_state.with(|s| s.local.indicator(field))}
            </span>
        </th>
    }
}

#[component]
fn ItemRow(
    item: Item,
    busy: bool,
    now: DateTime<Utc>,
    set_form_mode: WriteSignal<Option<ItemFormMode>>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let class = classify(&item, now);

    let toggle_label = if busy {
        "Loading"
    } else if item.stock > 0 {
        "Set Out of Stock"
    } else {
        "Set In Stock"
    };
    let store = use_dashboard_store();
    let toggle_item = item.clone();
    let toggle = move |_| {
        let table = ctx.table();
        let item = toggle_item.clone();
        spawn_local(async move {
            if table.toggle_stock(&item).await.changed_stock() {
                store_bump_catalog(&store);
            }
        });
    };

    let edit_id = item.id.clone();
    let delete_id = item.id.clone();

    view! {
        <tr class="item-row">
            <td>
                <button class="toggle-btn" disabled=busy on:click=toggle>
                    {toggle_label}
                </button>
            </td>
            <td class=class.name_class()>{item.name.clone()}</td>
            <td><span class="category-badge">{item.category.name.clone()}</span></td>
            <td class="price">{format::currency(item.unit_price)}</td>
            <td>
                <span class=class.stock.css_class()>{item.stock}</span>
            </td>
            <td class=class.expiration_class()>{format::optional_date(item.expiration_date)}</td>
            <td class="row-actions">
                <button
                    class="action-btn edit-btn"
                    disabled=busy
                    on:click=move |_| set_form_mode.set(Some(ItemFormMode::Edit(edit_id.clone())))
                >
                    "Edit"
                </button>
                <DeleteConfirmButton
                    item_name=item.name.clone()
                    disabled=Signal::derive(move || busy)
                    on_confirm=Callback::new(move |_| on_delete.run(delete_id.clone()))
                />
            </td>
        </tr>
    }
}

/// Placeholder rows shown before the first window arrives
fn skeleton_rows(count: usize) -> impl IntoView {
    (0..count)
        .map(|_| view! {
            <tr class="skeleton-row">
                {(0..7).map(|_| view! { <td><span class="skeleton-cell"></span></td> }).collect_view()}
            </tr>
        })
        .collect_view()
}

#[component]
pub fn ItemTable(set_form_mode: WriteSignal<Option<ItemFormMode>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let (delete_error, set_delete_error) = signal::<Option<String>>(None);

    // Expiration bands move with the date even when no data changes
    let (now, set_now) = signal(Utc::now());
    StoredValue::new_local(Interval::new(CLOCK_TICK_MS, move || set_now.set(Utc::now())));

    let on_delete = Callback::new(move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_item(&id).await {
                Ok(()) => {
                    tracing::info!(item_id = %id, "item deleted");
                    set_delete_error.set(None);
                    ctx.refetch_table();
                    store_bump_catalog(&store);
                }
                Err(err) => {
                    tracing::error!(item_id = %id, error = %err, "item delete failed");
                    set_delete_error.set(Some(err.user_message(&DELETE_ITEM)));
                }
            }
        });
    });

    let retry = move |_| {
        let table = ctx.table();
        spawn_local(async move {
            table.retry().await;
        });
    };

    let go_to_page = move |page: u32| {
        let table = ctx.table();
        spawn_local(async move {
            table.go_to_page(page).await;
        });
    };

    let set_page_size = move |size: u32| {
        let table = ctx.table();
        spawn_local(async move {
            table.set_page_size(size).await;
        });
    };

    let has_window = move || ctx.table_state.with(|s| s.fetch.window().is_some());
    let is_loading = move || ctx.table_state.with(|s| s.fetch.is_loading());
    let error_message = move || ctx.table_state.with(|s| s.fetch.error_message().map(str::to_string));
    let notice = move || ctx.table_state.with(|s| s.mutation_notice.clone());

    view! {
        <section class="item-table">
            {move || notice().map(|message| view! {
                <div class="notice notice-error">
                    <span>{message}</span>
                    <button class="notice-dismiss" on:click=move |_| ctx.table().dismiss_notice()>"×"</button>
                </div>
            })}
            {move || delete_error.get().map(|message| view! {
                <div class="notice notice-error">
                    <span>{message}</span>
                    <button class="notice-dismiss" on:click=move |_| set_delete_error.set(None)>"×"</button>
                </div>
            })}
            {move || error_message().map(|message| view! {
                <div class="notice notice-error table-error">
                    <span>{message}</span>
                    <button class="retry-btn" on:click=retry>"Try Again"</button>
                </div>
            })}
            <Show when=move || is_loading() && has_window()>
                <div class="loading-marker">"Refreshing..."</div>
            </Show>

            <table>
                <thead>
                    <tr>
                        <th>"Stock"</th>
                        <SortHeader field=SortField::Name />
                        <SortHeader field=SortField::Category />
                        <SortHeader field=SortField::UnitPrice />
                        <SortHeader field=SortField::Stock />
                        <SortHeader field=SortField::Expiration />
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let now = now.get();
                        ctx.table_state.with(|state| {
                            if state.fetch.window().is_none() {
                                let rows = if state.fetch.is_loading() { state.local.page_size() } else { 0 };
                                return skeleton_rows(rows).into_any();
                            }
                            let page = state.visible_page();
                            if page.rows.is_empty() {
                                return view! {
                                    <tr class="empty-row"><td colspan="7">"No items found"</td></tr>
                                }.into_any();
                            }
                            page.rows
                                .into_iter()
                                .map(|item| {
                                    let busy = state.is_row_busy(&item.id);
                                    view! {
                                        <ItemRow item=item busy=busy now=now set_form_mode=set_form_mode on_delete=on_delete />
                                    }
                                })
                                .collect_view()
                                .into_any()
                        })
                    }}
                </tbody>
            </table>

            <footer class="table-footer">
                <div class="local-pager">
                    {move || {
                        let (page, page_count) = ctx.table_state.with(|s| {
                            let visible = s.visible_page();
                            (visible.page, visible.page_count)
                        });
                        view! {
                            <button
                                disabled={page <= 1}
                                on:click=move |_| ctx.table().set_local_page(page - 1)
                            >
                                "‹"
                            </button>
                            <span>{format!("Page {} of {}", page, page_count)}</span>
                            <button
                                disabled={page >= page_count}
                                on:click=move |_| ctx.table().set_local_page(page + 1)
                            >
                                "›"
                            </button>
                        }
                    }}
                </div>

                <div class="server-pager">
                    {move || {
                        let (page, size, total_pages, total_elements) = ctx.table_state.with(|s| {
                            let committed = s.filters.committed();
                            let (pages, elements) = s
                                .fetch
                                .window()
                                .map(|w| (w.total_pages, w.total_elements))
                                .unwrap_or_default();
                            (committed.page, committed.size, pages, elements)
                        });
                        view! {
                            <button
                                disabled={page == 0}
                                on:click=move |_| go_to_page(page.saturating_sub(1))
                            >
                                "Previous"
                            </button>
                            <span>
                                {format!(
                                    "{} of {} ({} items)",
                                    page + 1,
                                    total_pages.max(1),
                                    format::count(total_elements),
                                )}
                            </span>
                            <button
                                disabled={page + 1 >= total_pages}
                                on:click=move |_| go_to_page(page + 1)
                            >
                                "Next"
                            </button>
                            <select
                                prop:value=size.to_string()
                                on:change=move |ev| {
                                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                                        set_page_size(size);
                                    }
                                }
                            >
                                {PAGE_SIZES.iter().map(|n| view! {
                                    <option value=n.to_string()>{format!("{} / page", n)}</option>
                                }).collect_view()}
                            </select>
                        }
                    }}
                </div>
            </footer>
        </section>
    }
}
