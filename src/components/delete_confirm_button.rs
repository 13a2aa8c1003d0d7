//! Delete Confirm Button Component
//!
//! Two-step delete for a table row: the first click asks, the second
//! click (on "Yes") runs `on_confirm`.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Idle,
    Confirming,
}

fn prompt_for(item_name: &str) -> String {
    match item_name.trim() {
        "" => "Delete this item?".to_string(),
        name => format!("Delete \u{201c}{}\u{201d}?", name),
    }
}

/// # Arguments
/// * `item_name` - Shown in the confirmation prompt
/// * `disabled` - Row is busy (stock toggle in flight); asking is blocked
/// * `on_confirm` - Runs once the user answers "Yes"
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] item_name: String,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let step = RwSignal::new(Step::Idle);
    let prompt = prompt_for(&item_name);

    // a row that turns busy while asking drops back to the plain button
    Effect::new(move |_| {
        if disabled.get() {
            step.set(Step::Idle);
        }
    });

    view! {
        {move || match step.get() {
            Step::Idle => view! {
                <button
                    class="action-btn delete-btn"
                    disabled=move || disabled.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        step.set(Step::Confirming);
                    }
                >
                    "Delete"
                </button>
            }.into_any(),
            Step::Confirming => view! {
                <span class="delete-confirm" role="alertdialog">
                    <span class="delete-confirm-text">{prompt.clone()}</span>
                    <button
                        class="confirm-btn danger"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            step.set(Step::Idle);
                            on_confirm.run(());
                        }
                    >
                        "Yes"
                    </button>
                    <button
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            step.set(Step::Idle);
                        }
                    >
                        "No"
                    </button>
                </span>
            }.into_any(),
        }}
    }
}
