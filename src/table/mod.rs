//! Table Coordination Layer
//!
//! Reconciles the server-driven page window with client-side sorting and
//! paging, and guards per-row stock toggles.

mod classify;
mod coordinator;
mod criteria;
mod fetch;
mod local_sort;
mod row_lock;

pub use classify::*;
pub use coordinator::{TableCoordinator, TableState, ToggleOutcome};
pub use criteria::*;
pub use fetch::*;
pub use local_sort::*;
pub use row_lock::RowLocks;
