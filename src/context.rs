//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::table::{TableCoordinator, TableState};

pub type Table = TableCoordinator<ApiClient>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<ApiClient, LocalStorage>,
    table: StoredValue<Table, LocalStorage>,
    /// Latest table snapshot pushed by the coordinator
    pub table_state: ReadSignal<TableState>,
}

impl AppContext {
    /// Build the context and mirror every coordinator change into a signal
    pub fn new(api: ApiClient, table: Table) -> Self {
        let (table_state, set_table_state) = signal(table.snapshot());
        table.subscribe(move |state| set_table_state.set(state.clone()));
        Self {
            api: StoredValue::new_local(api),
            table: StoredValue::new_local(table),
            table_state,
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn table(&self) -> Table {
        self.table.get_value()
    }

    /// Re-run the committed query; used after any catalog mutation
    pub fn refetch_table(&self) {
        let table = self.table();
        leptos::task::spawn_local(async move {
            table.refetch().await;
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
