//! Table Coordinator
//!
//! Single owner of the table's mutable view state. Components hold a
//! cloned handle (from context) and go through its read/commit entry
//! points. Every change is pushed to subscribers as a full snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiError, InventoryApi, TOGGLE_STOCK};
use crate::models::Item;

use super::{
    FetchCycle, FetchOutcome, FilterCriteria, FilterState, LocalPage, LocalView, RowLocks,
    SortField, StaleResponsePolicy,
};

/// Everything the table renders from
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub filters: FilterState,
    pub fetch: FetchCycle,
    pub local: LocalView,
    pub locks: RowLocks,
    /// Last stock-toggle failure shown above the table
    pub mutation_notice: Option<String>,
}

impl TableState {
    pub fn new(local_page_size: usize, policy: StaleResponsePolicy) -> Self {
        let filters = FilterState::default();
        let mut local = LocalView::new(local_page_size);
        local.seed(filters.committed().sort);
        Self {
            filters,
            fetch: FetchCycle::new(policy),
            local,
            locks: RowLocks::default(),
            mutation_notice: None,
        }
    }

    /// Rows of the current local page, locally sorted
    pub fn visible_page(&self) -> LocalPage {
        self.local.visible(self.fetch.items())
    }

    pub fn is_row_busy(&self, id: &str) -> bool {
        self.locks.is_locked(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// A toggle for this row is already in flight; nothing was sent
    Busy,
    /// The service accepted the change and a refetch was issued
    Applied,
    Failed(ApiError),
}

impl ToggleOutcome {
    /// Stock on the service changed, so derived totals are stale
    pub fn changed_stock(&self) -> bool {
        matches!(self, ToggleOutcome::Applied)
    }
}

type Listener = Box<dyn Fn(&TableState)>;

pub struct TableCoordinator<A> {
    api: Rc<A>,
    state: Rc<RefCell<TableState>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl<A> Clone for TableCoordinator<A> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            state: Rc::clone(&self.state),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<A: InventoryApi> TableCoordinator<A> {
    pub fn new(api: Rc<A>, local_page_size: usize, policy: StaleResponsePolicy) -> Self {
        Self {
            api,
            state: Rc::new(RefCell::new(TableState::new(local_page_size, policy))),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Register a callback run after every state change
    pub fn subscribe(&self, listener: impl Fn(&TableState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn snapshot(&self) -> TableState {
        self.state.borrow().clone()
    }

    pub fn committed(&self) -> FilterCriteria {
        self.state.borrow().filters.committed().clone()
    }

    pub fn staged(&self) -> FilterCriteria {
        self.state.borrow().filters.staged().clone()
    }

    // The state borrow is released before listeners run, so a listener may
    // call back into the coordinator.
    fn notify(&self) {
        let snapshot = self.snapshot();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }

    // ========================
    // Filter State
    // ========================

    /// Replace the draft criteria; no request is sent
    pub fn stage(&self, draft: FilterCriteria) {
        self.state.borrow_mut().filters.stage(draft);
        self.notify();
    }

    /// Persist `criteria` as committed and fetch with exactly those criteria
    pub async fn commit(&self, criteria: FilterCriteria) -> FetchOutcome {
        {
            let mut state = self.state.borrow_mut();
            let previous_sort = state.filters.committed().sort;
            let committed = state.filters.commit(criteria.clone());
            if committed.sort != previous_sort {
                state.local.seed(committed.sort);
            }
        }
        self.fetch(criteria, true).await
    }

    /// Commit the staged draft, starting again from the first server page
    pub async fn search(&self) -> FetchOutcome {
        let draft = self.staged().with_page(0);
        self.commit(draft).await
    }

    /// Reset staged and committed criteria to the default and fetch
    pub async fn clear(&self) -> FetchOutcome {
        self.commit(FilterCriteria::default()).await
    }

    /// Fetch another server page of the committed query; the staged
    /// draft is left as the user typed it
    pub async fn go_to_page(&self, page: u32) -> FetchOutcome {
        let criteria = {
            let mut state = self.state.borrow_mut();
            let size = state.filters.committed().size;
            state.filters.paginate(page, size)
        };
        self.fetch(criteria, true).await
    }

    /// Change the server page size and start again from page 0
    pub async fn set_page_size(&self, size: u32) -> FetchOutcome {
        let criteria = self.state.borrow_mut().filters.paginate(0, size);
        self.fetch(criteria, true).await
    }

    // ========================
    // Fetch Cycle
    // ========================

    /// User-initiated retry with the last committed criteria
    pub async fn retry(&self) -> FetchOutcome {
        let criteria = self.committed();
        self.fetch(criteria, true).await
    }

    /// Unconditional fetch with the committed criteria
    pub async fn refetch(&self) -> FetchOutcome {
        let criteria = self.committed();
        self.fetch(criteria, false).await
    }

    async fn fetch(&self, criteria: FilterCriteria, dedupe: bool) -> FetchOutcome {
        let ticket = self.state.borrow_mut().fetch.begin(criteria, dedupe);
        let Some(ticket) = ticket else {
            tracing::debug!("identical item fetch already pending, not sending another");
            return FetchOutcome::AlreadyInFlight;
        };
        self.notify();

        tracing::info!(seq = ticket.seq, query = ?ticket.criteria.query_pairs(), "fetching items");
        let result = self.api.list_items(&ticket.criteria).await;

        let outcome = {
            let mut state = self.state.borrow_mut();
            let outcome = state.fetch.complete(&ticket, result);
            if outcome == FetchOutcome::Applied {
                state.local.on_window_replaced();
            }
            outcome
        };
        self.notify();
        outcome
    }

    // ========================
    // Local Sort-over-Page
    // ========================

    pub fn toggle_sort(&self, field: SortField) {
        self.state.borrow_mut().local.toggle(field);
        self.notify();
    }

    pub fn clear_sort(&self) {
        self.state.borrow_mut().local.clear_sort();
        self.notify();
    }

    pub fn set_local_page(&self, page: usize) {
        {
            let mut state = self.state.borrow_mut();
            let rows = state.fetch.items().len();
            state.local.set_page(page, rows);
        }
        self.notify();
    }

    // ========================
    // Row Mutation Lock
    // ========================

    /// Flip a row between in stock and out of stock.
    ///
    /// At most one request per row is in flight; a second call while the
    /// first is pending returns [`ToggleOutcome::Busy`] without sending.
    pub async fn toggle_stock(&self, item: &Item) -> ToggleOutcome {
        if !self.state.borrow_mut().locks.try_acquire(&item.id) {
            tracing::debug!(item_id = %item.id, "stock toggle ignored, row busy");
            return ToggleOutcome::Busy;
        }
        self.notify();

        let result = if item.stock > 0 {
            self.api.mark_out_of_stock(&item.id).await
        } else {
            self.api.mark_in_stock(&item.id).await
        };

        self.state.borrow_mut().locks.release(&item.id);

        match result {
            Ok(()) => {
                tracing::info!(item_id = %item.id, was_in_stock = item.stock > 0, "stock toggled");
                self.notify();
                self.refetch().await;
                ToggleOutcome::Applied
            }
            Err(err) => {
                tracing::error!(item_id = %item.id, error = %err, "stock toggle failed");
                self.state.borrow_mut().mutation_notice = Some(err.user_message(&TOGGLE_STOCK));
                self.notify();
                ToggleOutcome::Failed(err)
            }
        }
    }

    pub fn dismiss_notice(&self) {
        self.state.borrow_mut().mutation_notice = None;
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::item;
    use crate::models::{ItemPage, PageMeta};
    use crate::table::{FetchStatus, SortDirection, SortSpec};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::collections::VecDeque;
    use std::future::Future;

    type ListReply = oneshot::Sender<Result<ItemPage, ApiError>>;
    type ToggleReply = oneshot::Sender<Result<(), ApiError>>;

    /// Service double: every request waits until the test answers it,
    /// unless an automatic list page is configured.
    #[derive(Default)]
    struct FakeApi {
        list_requests: RefCell<Vec<FilterCriteria>>,
        list_replies: RefCell<VecDeque<ListReply>>,
        auto_page: RefCell<Option<ItemPage>>,
        toggle_requests: RefCell<Vec<(String, &'static str)>>,
        toggle_replies: RefCell<VecDeque<ToggleReply>>,
    }

    impl FakeApi {
        fn answer_list(&self, result: Result<ItemPage, ApiError>) {
            let reply = self.list_replies.borrow_mut().pop_front().expect("no pending list request");
            reply.send(result).expect("list request dropped");
        }

        fn answer_list_at(&self, index: usize, result: Result<ItemPage, ApiError>) {
            let reply = self.list_replies.borrow_mut().remove(index).expect("no such list request");
            reply.send(result).expect("list request dropped");
        }

        fn answer_toggle(&self, result: Result<(), ApiError>) {
            let reply = self.toggle_replies.borrow_mut().pop_front().expect("no pending toggle");
            reply.send(result).expect("toggle request dropped");
        }

        fn list_count(&self) -> usize {
            self.list_requests.borrow().len()
        }

        async fn gated_toggle(&self, id: &str, action: &'static str) -> Result<(), ApiError> {
            self.toggle_requests.borrow_mut().push((id.to_string(), action));
            let (tx, rx) = oneshot::channel();
            self.toggle_replies.borrow_mut().push_back(tx);
            rx.await.unwrap_or_else(|_| Err(ApiError::Network("dropped".into())))
        }
    }

    #[async_trait(?Send)]
    impl InventoryApi for FakeApi {
        async fn list_items(&self, criteria: &FilterCriteria) -> Result<ItemPage, ApiError> {
            self.list_requests.borrow_mut().push(criteria.clone());
            let auto = self.auto_page.borrow().clone();
            if let Some(page) = auto {
                return Ok(page);
            }
            let (tx, rx) = oneshot::channel();
            self.list_replies.borrow_mut().push_back(tx);
            rx.await.unwrap_or_else(|_| Err(ApiError::Network("dropped".into())))
        }

        async fn mark_out_of_stock(&self, id: &str) -> Result<(), ApiError> {
            self.gated_toggle(id, "outofstock").await
        }

        async fn mark_in_stock(&self, id: &str) -> Result<(), ApiError> {
            self.gated_toggle(id, "instock").await
        }
    }

    fn page_of(items: Vec<Item>) -> ItemPage {
        let total_elements = items.len() as u64;
        ItemPage {
            content: items,
            page: PageMeta { total_elements, total_pages: 1 },
        }
    }

    fn three_items() -> Vec<Item> {
        vec![
            item("1", "Apples", "Fruit", 1.0, 20),
            item("2", "Bread", "Bakery", 2.0, 0),
            item("3", "Cheese", "Dairy", 5.0, 7),
        ]
    }

    fn setup(local_page_size: usize) -> (Rc<FakeApi>, TableCoordinator<FakeApi>, LocalPool) {
        let api = Rc::new(FakeApi::default());
        let coordinator =
            TableCoordinator::new(Rc::clone(&api), local_page_size, StaleResponsePolicy::DropSuperseded);
        (api, coordinator, LocalPool::new())
    }

    /// Spawn onto the pool and keep the result for later inspection
    fn spawn<T: 'static>(pool: &LocalPool, fut: impl Future<Output = T> + 'static) -> Rc<RefCell<Option<T>>> {
        let slot = Rc::new(RefCell::new(None));
        let out = Rc::clone(&slot);
        pool.spawner()
            .spawn_local(async move {
                *out.borrow_mut() = Some(fut.await);
            })
            .expect("spawn failed");
        slot
    }

    fn names(state: &TableState) -> Vec<String> {
        state.visible_page().rows.into_iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_default_commit_then_name_header_toggle() {
        let (api, table, mut pool) = setup(10);
        *api.auto_page.borrow_mut() = Some(page_of(three_items()));

        let c = table.clone();
        let outcome = spawn(&pool, async move { c.commit(FilterCriteria::default()).await });
        pool.run_until_stalled();

        assert_eq!(outcome.borrow().clone(), Some(FetchOutcome::Applied));
        assert_eq!(api.list_requests.borrow()[0], FilterCriteria::default());
        let state = table.snapshot();
        let window = state.fetch.window().unwrap();
        assert_eq!(window.items.len(), 3);
        assert_eq!(window.total_pages, 1);
        assert_eq!(names(&state), vec!["Apples", "Bread", "Cheese"]);

        table.toggle_sort(SortField::Name);
        let state = table.snapshot();
        assert_eq!(
            state.local.sort(),
            Some(SortSpec { field: SortField::Name, direction: SortDirection::Descending })
        );
        assert_eq!(names(&state), vec!["Cheese", "Bread", "Apples"]);
    }

    #[test]
    fn test_clear_fetches_with_canonical_default() {
        let (api, table, mut pool) = setup(10);
        *api.auto_page.borrow_mut() = Some(page_of(three_items()));

        let mut criteria = FilterCriteria::default()
            .with_name("che")
            .with_page(2)
            .with_sort(SortSpec::ascending(SortField::UnitPrice));
        criteria.toggle_category("Dairy");

        let c = table.clone();
        spawn(&pool, async move {
            c.commit(criteria).await;
            c.stage(FilterCriteria::default().with_name("draft"));
            c.clear().await
        });
        pool.run_until_stalled();

        let requests = api.list_requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1], FilterCriteria::default());
        assert_eq!(table.committed(), FilterCriteria::default());
        assert_eq!(table.staged(), FilterCriteria::default());
        assert_eq!(table.snapshot().local.sort(), Some(SortSpec::default()));
    }

    #[test]
    fn test_stage_does_not_fetch() {
        let (api, table, _pool) = setup(10);
        table.stage(FilterCriteria::default().with_name("tea"));
        assert_eq!(api.list_count(), 0);
        assert_eq!(table.snapshot().fetch.status(), &FetchStatus::Idle);
    }

    #[test]
    fn test_search_commits_staged_from_first_page() {
        let (api, table, mut pool) = setup(10);
        *api.auto_page.borrow_mut() = Some(page_of(vec![]));
        table.stage(FilterCriteria::default().with_name("tea").with_page(4));

        let c = table.clone();
        spawn(&pool, async move { c.search().await });
        pool.run_until_stalled();

        assert_eq!(api.list_requests.borrow()[0], FilterCriteria::default().with_name("tea"));
    }

    #[test]
    fn test_paging_keeps_staged_draft() {
        let (api, table, mut pool) = setup(10);
        *api.auto_page.borrow_mut() = Some(page_of(three_items()));
        let c = table.clone();
        spawn(&pool, async move { c.commit(FilterCriteria::default().with_name("milk")).await });
        pool.run_until_stalled();

        table.stage(FilterCriteria::default().with_name("tea"));
        let c = table.clone();
        spawn(&pool, async move {
            c.go_to_page(1).await;
            c.set_page_size(50).await
        });
        pool.run_until_stalled();

        let requests = api.list_requests.borrow();
        assert_eq!(requests[1], FilterCriteria::default().with_name("milk").with_page(1));
        assert_eq!(requests[2], FilterCriteria::default().with_name("milk").with_size(50));
        assert_eq!(table.staged().name, "tea");
        assert_eq!(table.committed().name, "milk");

        // a later search sends the draft with the size chosen in the pager
        drop(requests);
        let c = table.clone();
        spawn(&pool, async move { c.search().await });
        pool.run_until_stalled();
        assert_eq!(
            api.list_requests.borrow()[3],
            FilterCriteria::default().with_name("tea").with_size(50)
        );
    }

    #[test]
    fn test_double_toggle_sends_one_request() {
        let (api, table, mut pool) = setup(10);
        let target = item("1", "Apples", "Fruit", 1.0, 20);

        let (c1, c2) = (table.clone(), table.clone());
        let (t1, t2) = (target.clone(), target.clone());
        let first = spawn(&pool, async move { c1.toggle_stock(&t1).await });
        pool.run_until_stalled();
        let second = spawn(&pool, async move { c2.toggle_stock(&t2).await });
        pool.run_until_stalled();

        assert_eq!(api.toggle_requests.borrow().len(), 1);
        assert_eq!(api.toggle_requests.borrow()[0], ("1".to_string(), "outofstock"));
        assert_eq!(second.borrow().clone(), Some(ToggleOutcome::Busy));
        assert!(table.snapshot().is_row_busy("1"));

        api.answer_toggle(Ok(()));
        pool.run_until_stalled();
        assert!(!table.snapshot().is_row_busy("1"));
        assert_eq!(api.list_count(), 1, "success triggers a refetch");

        api.answer_list(Ok(page_of(three_items())));
        pool.run_until_stalled();
        assert_eq!(first.borrow().clone(), Some(ToggleOutcome::Applied));
        assert!(first.borrow().as_ref().is_some_and(ToggleOutcome::changed_stock));
        assert!(!ToggleOutcome::Busy.changed_stock());
    }

    #[test]
    fn test_zero_stock_row_is_marked_in_stock() {
        let (api, table, mut pool) = setup(10);
        let c = table.clone();
        spawn(&pool, async move { c.toggle_stock(&item("2", "Bread", "Bakery", 2.0, 0)).await });
        pool.run_until_stalled();
        assert_eq!(api.toggle_requests.borrow()[0], ("2".to_string(), "instock"));
    }

    #[test]
    fn test_not_found_toggle_leaves_row_and_skips_refetch() {
        let (api, table, mut pool) = setup(10);
        *api.auto_page.borrow_mut() = Some(page_of(three_items()));
        let c = table.clone();
        spawn(&pool, async move { c.commit(FilterCriteria::default()).await });
        pool.run_until_stalled();
        *api.auto_page.borrow_mut() = None;

        let target = table.snapshot().fetch.items()[0].clone();
        let c = table.clone();
        let outcome = spawn(&pool, async move { c.toggle_stock(&target).await });
        pool.run_until_stalled();
        api.answer_toggle(Err(ApiError::from_response(404, r#"{"message": "gone"}"#)));
        pool.run_until_stalled();

        assert!(matches!(outcome.borrow().clone(), Some(ToggleOutcome::Failed(e)) if e.is_not_found()));
        assert!(!outcome.borrow().as_ref().is_some_and(ToggleOutcome::changed_stock));
        assert_eq!(api.list_count(), 1, "no refetch after failure");
        let state = table.snapshot();
        assert_eq!(state.fetch.items()[0].stock, 20);
        assert!(!state.is_row_busy("1"));
        assert_eq!(state.mutation_notice.as_deref(), Some(TOGGLE_STOCK.not_found));

        table.dismiss_notice();
        assert_eq!(table.snapshot().mutation_notice, None);
    }

    #[test]
    fn test_failed_toggle_is_logged_with_item_id() {
        use rolling_logger::{LogBuffer, RollingLayer};
        use tracing::Level;
        use tracing_subscriber::prelude::*;

        let buffer = LogBuffer::new(32).unwrap();
        let subscriber = tracing_subscriber::registry().with(RollingLayer::new(buffer.clone()).quiet());

        let outcome = tracing::subscriber::with_default(subscriber, || {
            let (api, table, mut pool) = setup(10);
            let c = table.clone();
            let outcome = spawn(&pool, async move { c.toggle_stock(&item("7", "Yogurt", "Dairy", 1.5, 4)).await });
            pool.run_until_stalled();
            api.answer_toggle(Err(ApiError::from_response(500, "")));
            pool.run_until_stalled();
            let result = outcome.borrow().clone();
            result
        });

        assert!(matches!(outcome, Some(ToggleOutcome::Failed(_))));
        let errors = buffer.entries_at_least(Level::ERROR);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].level, Level::ERROR);
        assert!(errors[0].message.contains("stock toggle failed"));
        assert!(errors[0].message.contains("item_id=7"), "got {}", errors[0].message);
    }

    #[test]
    fn test_other_rows_toggle_concurrently() {
        let (api, table, mut pool) = setup(10);
        let (c1, c2) = (table.clone(), table.clone());
        spawn(&pool, async move { c1.toggle_stock(&item("1", "A", "C", 1.0, 3)).await });
        pool.run_until_stalled();
        spawn(&pool, async move { c2.toggle_stock(&item("2", "B", "C", 1.0, 0)).await });
        pool.run_until_stalled();

        assert_eq!(api.toggle_requests.borrow().len(), 2);
        let state = table.snapshot();
        assert!(state.is_row_busy("1") && state.is_row_busy("2"));

        api.answer_toggle(Err(ApiError::Network("offline".into())));
        pool.run_until_stalled();
        let state = table.snapshot();
        assert!(!state.is_row_busy("1"));
        assert!(state.is_row_busy("2"), "failure on one row leaves the other locked");
    }

    #[test]
    fn test_local_page_resets_on_new_window() {
        let (api, table, mut pool) = setup(2);
        *api.auto_page.borrow_mut() = Some(page_of(three_items()));
        let c = table.clone();
        spawn(&pool, async move { c.commit(FilterCriteria::default()).await });
        pool.run_until_stalled();

        table.set_local_page(2);
        assert_eq!(table.snapshot().local.page(), 2);
        let sort_before = table.snapshot().local.sort();

        let c = table.clone();
        spawn(&pool, async move { c.refetch().await });
        pool.run_until_stalled();

        let state = table.snapshot();
        assert_eq!(state.local.page(), 1);
        assert_eq!(state.local.sort(), sort_before);
    }

    #[test]
    fn test_identical_commit_while_pending_is_not_resent() {
        let (api, table, mut pool) = setup(10);
        let (c1, c2) = (table.clone(), table.clone());
        spawn(&pool, async move { c1.commit(FilterCriteria::default()).await });
        pool.run_until_stalled();
        let second = spawn(&pool, async move { c2.commit(FilterCriteria::default()).await });
        pool.run_until_stalled();

        assert_eq!(api.list_count(), 1);
        assert_eq!(second.borrow().clone(), Some(FetchOutcome::AlreadyInFlight));
    }

    #[test]
    fn test_late_superseded_response_is_dropped() {
        let (api, table, mut pool) = setup(10);
        let (c1, c2) = (table.clone(), table.clone());
        let slow = spawn(&pool, async move { c1.commit(FilterCriteria::default()).await });
        pool.run_until_stalled();
        let fast = spawn(&pool, async move {
            c2.commit(FilterCriteria::default().with_name("che")).await
        });
        pool.run_until_stalled();
        assert_eq!(api.list_count(), 2);

        api.answer_list_at(1, Ok(page_of(vec![item("3", "Cheese", "Dairy", 5.0, 7)])));
        pool.run_until_stalled();
        api.answer_list(Ok(page_of(three_items())));
        pool.run_until_stalled();

        assert_eq!(fast.borrow().clone(), Some(FetchOutcome::Applied));
        assert_eq!(slow.borrow().clone(), Some(FetchOutcome::Superseded));
        assert_eq!(names(&table.snapshot()), vec!["Cheese"]);
    }

    #[test]
    fn test_retry_after_error_uses_committed_criteria() {
        let (api, table, mut pool) = setup(10);
        let criteria = FilterCriteria::default().with_name("milk");
        let c = table.clone();
        let committed = criteria.clone();
        spawn(&pool, async move { c.commit(committed).await });
        pool.run_until_stalled();
        api.answer_list(Err(ApiError::from_response(503, "")));
        pool.run_until_stalled();

        let state = table.snapshot();
        assert!(state.fetch.error_message().is_some());

        let c = table.clone();
        spawn(&pool, async move { c.retry().await });
        pool.run_until_stalled();
        assert!(table.snapshot().fetch.is_loading());
        assert_eq!(api.list_requests.borrow()[1], criteria);

        api.answer_list(Ok(page_of(vec![])));
        pool.run_until_stalled();
        assert_eq!(table.snapshot().fetch.status(), &FetchStatus::Success);
    }

    #[test]
    fn test_changed_server_sort_reseeds_local_sort() {
        let (api, table, mut pool) = setup(10);
        *api.auto_page.borrow_mut() = Some(page_of(three_items()));
        let by_price = SortSpec { field: SortField::UnitPrice, direction: SortDirection::Descending };

        let c = table.clone();
        spawn(&pool, async move { c.commit(FilterCriteria::default().with_sort(by_price)).await });
        pool.run_until_stalled();

        assert_eq!(table.snapshot().local.sort(), Some(by_price));
        assert_eq!(names(&table.snapshot()), vec!["Cheese", "Bread", "Apples"]);
    }

    #[test]
    fn test_listeners_see_lock_state() {
        let (_api, table, mut pool) = setup(10);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        table.subscribe(move |state| log.borrow_mut().push(state.is_row_busy("1")));

        let c = table.clone();
        spawn(&pool, async move { c.toggle_stock(&item("1", "A", "C", 1.0, 3)).await });
        pool.run_until_stalled();
        assert_eq!(seen.borrow().as_slice(), &[true]);
    }
}
