//! UI Components
//!
//! Leptos components for the inventory dashboard.

mod activity_log;
mod category_form;
mod delete_confirm_button;
mod filter_panel;
mod item_form;
mod item_table;
mod metrics_panel;

pub use activity_log::ActivityLog;
pub use category_form::CategoryForm;
pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_panel::FilterPanel;
pub use item_form::{ItemFormModal, ItemFormMode};
pub use item_table::ItemTable;
pub use metrics_panel::MetricsPanel;
