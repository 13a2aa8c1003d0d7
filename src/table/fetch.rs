//! Remote Collection Fetch Cycle
//!
//! Tracks idle → loading → success | error for the item collection and
//! holds the last delivered page window. Requests are numbered so that a
//! response overtaken by a newer request can be recognised.

use std::collections::BTreeMap;

use crate::api::{ApiError, LOAD_ITEMS};
use crate::models::{Item, ItemPage};

use super::FilterCriteria;

/// Handling of a response whose request was superseded by a newer one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponsePolicy {
    /// Discard it; only the newest request may write the window
    #[default]
    DropSuperseded,
    /// Apply it anyway (whichever response lands last wins)
    LastWriteWins,
}

impl StaleResponsePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "drop" => Some(StaleResponsePolicy::DropSuperseded),
            "apply" => Some(StaleResponsePolicy::LastWriteWins),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    /// Human-readable failure text
    Error(String),
}

/// Items of one server page plus the server's totals for the filtered set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageWindow {
    pub items: Vec<Item>,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl From<ItemPage> for PageWindow {
    fn from(page: ItemPage) -> Self {
        Self {
            items: page.content,
            total_elements: page.page.total_elements,
            total_pages: page.page.total_pages,
        }
    }
}

/// Handle for one issued request
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub seq: u64,
    pub criteria: FilterCriteria,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Window replaced
    Applied,
    /// Request failed; the previous window is still shown
    Failed(ApiError),
    /// Response arrived after a newer request was issued and was dropped
    Superseded,
    /// An identical request is already pending; nothing was sent
    AlreadyInFlight,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchCycle {
    status: FetchStatus,
    window: Option<PageWindow>,
    issued: u64,
    pending: BTreeMap<u64, FilterCriteria>,
    policy: StaleResponsePolicy,
}

impl FetchCycle {
    pub fn new(policy: StaleResponsePolicy) -> Self {
        Self { policy, ..Default::default() }
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Last delivered window, if any fetch has succeeded
    pub fn window(&self) -> Option<&PageWindow> {
        self.window.as_ref()
    }

    pub fn items(&self) -> &[Item] {
        self.window.as_ref().map(|w| w.items.as_slice()).unwrap_or(&[])
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn last_issued(&self) -> u64 {
        self.issued
    }

    /// Start a request. With `dedupe`, returns `None` when the newest
    /// pending request already carries identical criteria.
    pub fn begin(&mut self, criteria: FilterCriteria, dedupe: bool) -> Option<FetchTicket> {
        if dedupe && self.pending.get(&self.issued) == Some(&criteria) {
            return None;
        }
        self.issued += 1;
        self.pending.insert(self.issued, criteria.clone());
        self.status = FetchStatus::Loading;
        Some(FetchTicket { seq: self.issued, criteria })
    }

    /// Record the response for `ticket`
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<ItemPage, ApiError>) -> FetchOutcome {
        self.pending.remove(&ticket.seq);

        if ticket.seq < self.issued && self.policy == StaleResponsePolicy::DropSuperseded {
            tracing::info!(
                seq = ticket.seq,
                newest = self.issued,
                "dropping response of superseded item fetch"
            );
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(page) => {
                self.window = Some(page.into());
                self.status = FetchStatus::Success;
                FetchOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(seq = ticket.seq, error = %err, "item fetch failed");
                self.status = FetchStatus::Error(err.user_message(&LOAD_ITEMS));
                FetchOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::item;
    use crate::models::PageMeta;

    fn page(names: &[&str], total_pages: u32) -> ItemPage {
        ItemPage {
            content: names
                .iter()
                .enumerate()
                .map(|(i, n)| item(&i.to_string(), n, "General", 1.0, 1))
                .collect(),
            page: PageMeta { total_elements: names.len() as u64, total_pages },
        }
    }

    #[test]
    fn test_idle_to_loading_to_success() {
        let mut cycle = FetchCycle::default();
        assert_eq!(cycle.status(), &FetchStatus::Idle);

        let ticket = cycle.begin(FilterCriteria::default(), true).unwrap();
        assert!(cycle.is_loading());

        let outcome = cycle.complete(&ticket, Ok(page(&["a", "b", "c"], 1)));
        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(cycle.status(), &FetchStatus::Success);
        assert_eq!(cycle.items().len(), 3);
        assert_eq!(cycle.window().unwrap().total_pages, 1);
        assert_eq!(cycle.pending_count(), 0);
    }

    #[test]
    fn test_error_keeps_previous_window() {
        let mut cycle = FetchCycle::default();
        let first = cycle.begin(FilterCriteria::default(), true).unwrap();
        cycle.complete(&first, Ok(page(&["a"], 1)));

        let retry = cycle.begin(FilterCriteria::default(), true).unwrap();
        let outcome = cycle.complete(&retry, Err(ApiError::Network("offline".into())));

        assert!(matches!(outcome, FetchOutcome::Failed(ApiError::Network(_))));
        assert_eq!(cycle.error_message(), Some(LOAD_ITEMS.other));
        assert_eq!(cycle.items().len(), 1);
    }

    #[test]
    fn test_error_then_retry_recovers() {
        let mut cycle = FetchCycle::default();
        let first = cycle.begin(FilterCriteria::default(), true).unwrap();
        cycle.complete(&first, Err(ApiError::from_response(500, "")));
        assert!(cycle.window().is_none());

        let retry = cycle.begin(first.criteria.clone(), true).unwrap();
        assert!(cycle.is_loading());
        cycle.complete(&retry, Ok(page(&["a"], 1)));
        assert_eq!(cycle.status(), &FetchStatus::Success);
    }

    #[test]
    fn test_identical_pending_request_is_not_duplicated() {
        let mut cycle = FetchCycle::default();
        let ticket = cycle.begin(FilterCriteria::default(), true).unwrap();
        assert!(cycle.begin(FilterCriteria::default(), true).is_none());
        assert!(cycle.begin(FilterCriteria::default(), false).is_some());
        assert!(cycle.begin(FilterCriteria::default().with_page(1), true).is_some());
        assert_eq!(cycle.pending_count(), 3);
        assert_eq!(ticket.seq, 1);
    }

    #[test]
    fn test_superseded_response_is_dropped() {
        let mut cycle = FetchCycle::new(StaleResponsePolicy::DropSuperseded);
        let slow = cycle.begin(FilterCriteria::default(), true).unwrap();
        let fast = cycle.begin(FilterCriteria::default().with_name("tea"), true).unwrap();

        assert_eq!(cycle.complete(&fast, Ok(page(&["tea"], 1))), FetchOutcome::Applied);
        assert_eq!(cycle.complete(&slow, Ok(page(&["a", "b"], 1))), FetchOutcome::Superseded);
        assert_eq!(cycle.items()[0].name, "tea");
    }

    #[test]
    fn test_superseded_response_keeps_loading_until_newest_arrives() {
        let mut cycle = FetchCycle::new(StaleResponsePolicy::DropSuperseded);
        let old = cycle.begin(FilterCriteria::default(), true).unwrap();
        let new = cycle.begin(FilterCriteria::default().with_page(1), true).unwrap();

        cycle.complete(&old, Ok(page(&["a"], 2)));
        assert!(cycle.is_loading());
        assert!(cycle.window().is_none());

        cycle.complete(&new, Ok(page(&["k"], 2)));
        assert_eq!(cycle.status(), &FetchStatus::Success);
    }

    #[test]
    fn test_last_write_wins_applies_late_response() {
        let mut cycle = FetchCycle::new(StaleResponsePolicy::LastWriteWins);
        let slow = cycle.begin(FilterCriteria::default(), true).unwrap();
        let fast = cycle.begin(FilterCriteria::default().with_name("tea"), true).unwrap();

        cycle.complete(&fast, Ok(page(&["tea"], 1)));
        assert_eq!(cycle.complete(&slow, Ok(page(&["a", "b"], 1))), FetchOutcome::Applied);
        assert_eq!(cycle.items().len(), 2);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(StaleResponsePolicy::parse("drop"), Some(StaleResponsePolicy::DropSuperseded));
        assert_eq!(StaleResponsePolicy::parse("apply"), Some(StaleResponsePolicy::LastWriteWins));
        assert_eq!(StaleResponsePolicy::parse("later"), None);
    }
}
