//! Item Form Component
//!
//! Create and edit share one modal. Validation runs locally before any
//! request is sent.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{CREATE_ITEM, UPDATE_ITEM};
use crate::context::use_app_context;
use crate::forms::{FieldErrors, FormField, ItemForm};
use crate::store::{store_bump_catalog, use_dashboard_store, DashboardStateStoreFields};

#[derive(Debug, Clone, PartialEq)]
pub enum ItemFormMode {
    Create,
    /// Item id to load and update
    Edit(String),
}

/// Labelled input bound to one form field
#[component]
fn FormInput(
    label: &'static str,
    field: FormField,
    #[prop(default = "text")] input_type: &'static str,
    form: RwSignal<ItemForm>,
    errors: RwSignal<FieldErrors>,
) -> impl IntoView {
    let value = move || {
        form.with(|f| match field {
            FormField::Name => f.name.clone(),
            FormField::Category => f.category_name.clone(),
            FormField::Stock => f.stock.clone(),
            FormField::UnitPrice => f.unit_price.clone(),
            FormField::Expiration => f.expiration.clone(),
        })
    };
    let error = move || errors.with(|e| e.message(field));

    view! {
        <label class="form-field" class:has-error=move || error().is_some()>
            <span>{label}</span>
            <input
                type=input_type
                prop:value=value
                on:input=move |ev| {
                    form.update(|f| f.set(field, event_target_value(&ev)));
                    errors.update(|e| e.clear(field));
                }
            />
            {move || error().map(|message| view! { <span class="field-error">{message}</span> })}
        </label>
    }
}

#[component]
fn ItemFormDialog(mode: ItemFormMode, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();

    let form = RwSignal::new(ItemForm::default());
    let errors = RwSignal::new(FieldErrors::default());
    let general_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    if let ItemFormMode::Edit(id) = mode.clone() {
        busy.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.get_item(&id).await {
                Ok(item) => form.set(ItemForm::from_item(&item)),
                Err(err) => {
                    tracing::warn!(item_id = %id, error = %err, "could not load item for editing");
                    general_error.set(Some(err.user_message(&UPDATE_ITEM)));
                }
            }
            busy.set(false);
        });
    }

    let title = match &mode {
        ItemFormMode::Create => "Add Item",
        ItemFormMode::Edit(_) => "Edit Item",
    };

    let submit_mode = mode.clone();
    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let payload = match form.with_untracked(ItemForm::validate) {
            Ok(payload) => payload,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };

        busy.set(true);
        general_error.set(None);
        let api = ctx.api();
        let mode = submit_mode.clone();
        spawn_local(async move {
            let (result, messages) = match &mode {
                ItemFormMode::Create => (api.create_item(&payload).await, &CREATE_ITEM),
                ItemFormMode::Edit(id) => (api.update_item(id, &payload).await, &UPDATE_ITEM),
            };
            busy.set(false);
            match result {
                Ok(saved) => {
                    tracing::info!(item_id = %saved.id, "item saved");
                    ctx.refetch_table();
                    store_bump_catalog(&store);
                    on_close.run(());
                }
                Err(err) => {
                    tracing::error!(error = %err, "item save failed");
                    general_error.set(Some(err.user_message(messages)));
                }
            }
        });
    };

    let category_error = move || errors.with(|e| e.message(FormField::Category));

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <form
                class="modal item-form"
                on:click=|ev| ev.stop_propagation()
                on:submit=submit
            >
                <h2>{title}</h2>
                {move || general_error.get().map(|message| view! {
                    <div class="notice notice-error">{message}</div>
                })}

                <FormInput label="Name" field=FormField::Name form=form errors=errors />

                <label class="form-field" class:has-error=move || category_error().is_some()>
                    <span>"Category"</span>
                    <select
                        prop:value=move || form.with(|f| f.category_name.clone())
                        on:change=move |ev| {
                            form.update(|f| f.set(FormField::Category, event_target_value(&ev)));
                            errors.update(|e| e.clear(FormField::Category));
                        }
                    >
                        <option value="">"Select a category"</option>
                        <For
                            each=move || store.categories().get()
                            key=|category| category.name.clone()
                            let:category
                        >
                            <option value=category.name.clone()>{category.name.clone()}</option>
                        </For>
                    </select>
                    {move || category_error().map(|message| view! { <span class="field-error">{message}</span> })}
                </label>

                <FormInput label="Stock" field=FormField::Stock input_type="number" form=form errors=errors />
                <FormInput label="Unit Price" field=FormField::UnitPrice input_type="number" form=form errors=errors />
                <FormInput label="Expiration Date" field=FormField::Expiration input_type="date" form=form errors=errors />

                <div class="form-actions">
                    <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="primary-btn" disabled=move || busy.get()>
                        {move || if busy.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

/// Modal host; renders nothing while `mode` is `None`
#[component]
pub fn ItemFormModal(
    mode: ReadSignal<Option<ItemFormMode>>,
    set_mode: WriteSignal<Option<ItemFormMode>>,
) -> impl IntoView {
    let on_close = Callback::new(move |_| set_mode.set(None));
    view! {
        {move || mode.get().map(|mode| view! { <ItemFormDialog mode=mode on_close=on_close /> })}
    }
}
