//! Category Form Component
//!
//! Inline "add category" form in the dashboard header.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::CREATE_CATEGORY;
use crate::context::use_app_context;
use crate::forms::validate_category_name;
use crate::store::{store_bump_catalog, use_dashboard_store};

#[component]
pub fn CategoryForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();

    let (name, set_name) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let add_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = match validate_category_name(&name.get_untracked()) {
            Ok(name) => name,
            Err(err) => {
                set_error.set(Some(err.to_string()));
                return;
            }
        };

        set_saving.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.create_category(&name).await {
                Ok(category) => {
                    tracing::info!(category = %category.name, "category created");
                    set_name.set(String::new());
                    set_error.set(None);
                    store_bump_catalog(&store);
                }
                Err(err) => {
                    tracing::warn!(category = %name, error = %err, "category create failed");
                    set_error.set(Some(err.user_message(&CREATE_CATEGORY)));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="category-form" on:submit=add_category>
            <input
                type="text"
                placeholder="New category..."
                prop:value=move || name.get()
                on:input=move |ev| {
                    set_name.set(event_target_value(&ev));
                    set_error.set(None);
                }
            />
            <button type="submit" disabled=move || saving.get()>"Add Category"</button>
            {move || error.get().map(|message| view! { <span class="field-error">{message}</span> })}
        </form>
    }
}
