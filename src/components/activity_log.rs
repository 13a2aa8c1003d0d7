//! Activity Log Component
//!
//! Collapsible view over the in-memory log ring, newest first.

use leptos::prelude::*;
use rolling_logger::{LogBuffer, LogEntry};
use tracing::Level;

#[component]
pub fn ActivityLog() -> impl IntoView {
    let buffer = use_context::<LogBuffer>();
    let (open, set_open) = signal(false);
    let (entries, set_entries) = signal(Vec::<LogEntry>::new());

    let refresh = move || {
        if let Some(buffer) = &buffer {
            let mut recent = buffer.entries_at_least(Level::INFO);
            recent.reverse();
            set_entries.set(recent);
        }
    };
    let refresh_on_open = refresh.clone();

    view! {
        <section class="activity-log">
            <button
                class="secondary-btn"
                on:click=move |_| {
                    let opening = !open.get_untracked();
                    if opening {
                        refresh_on_open();
                    }
                    set_open.set(opening);
                }
            >
                {move || if open.get() { "Hide Activity" } else { "Show Activity" }}
            </button>
            <Show when=move || open.get()>
                <button class="secondary-btn" on:click={
                    let refresh = refresh.clone();
                    move |_| refresh()
                }>"Refresh"</button>
                <ul class="activity-entries">
                    {move || entries.get().into_iter().map(|entry| view! {
                        <li class=format!("log-{}", entry.level.as_str().to_lowercase())>{entry.to_string()}</li>
                    }).collect_view()}
                </ul>
            </Show>
        </section>
    }
}
