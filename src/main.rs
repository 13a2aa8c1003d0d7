//! Inventory Dashboard Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod format;
mod forms;
mod models;
mod store;
mod table;

use app::App;
use config::DashboardConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = DashboardConfig::from_build_env();
    let log_buffer = match rolling_logger::init_logger(config.log_capacity, "InventoryDashboard") {
        Ok(buffer) => Some(buffer),
        Err(err) => {
            leptos::logging::warn!("logging disabled: {}", err);
            None
        }
    };
    mount_to_body(move || {
        if let Some(buffer) = log_buffer.clone() {
            provide_context(buffer);
        }
        view! { <App config=config.clone() /> }
    });
}
