//! Request coordination for an inventory view.
//!
//! Turns filter changes into requests and responses into result state.
//! Free-text edits are debounced; everything else fires immediately.
//! Responses are applied only if they belong to the most recently *issued*
//! request, so a slow old response can never overwrite a newer one.
//!
//! This type does no I/O: the Leptos controller owns the timers and HTTP
//! calls and reports back through `on_debounce_elapsed` and `on_response`.

use super::error::FetchError;
use super::query::{compile, QueryParams};
use super::state::{FilterState, Trigger};
use contracts::dashboards::d410_inventory::{
    FilterOptions, InventoryPage, InventoryRow, InventoryStats, PageInfo,
};

/// Quiet period after the last keystroke before a search request is sent.
pub const DEFAULT_DEBOUNCE_MS: u32 = 300;

/// What the dashboard currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultState {
    pub rows: Vec<InventoryRow>,
    pub pagination: PageInfo,
    pub filter_options: FilterOptions,
    pub stats: Option<InventoryStats>,
    /// Request whose data is displayed (0 before the first success).
    pub request_id: u64,
    pub is_loading: bool,
    pub error: Option<String>,
    /// At least one response has been applied.
    pub has_loaded: bool,
}

impl ResultState {
    pub fn new(page_size: u32) -> Self {
        Self {
            rows: Vec::new(),
            pagination: PageInfo::empty(page_size),
            filter_options: FilterOptions::default(),
            stats: None,
            request_id: 0,
            is_loading: false,
            error: None,
            has_loaded: false,
        }
    }

    /// No data has ever loaded and the last attempt failed: show the error
    /// panel instead of an empty table.
    pub fn is_first_load_failure(&self) -> bool {
        self.error.is_some() && !self.has_loaded
    }

    /// Nothing to show yet, waiting for the first response.
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && !self.has_loaded
    }
}

/// A request that must be sent now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRequest {
    pub request_id: u64,
    pub query: QueryParams,
    /// Requested page and size, used when the response omits pagination.
    pub page: u32,
    pub page_size: u32,
}

/// A debounce timer that must be started. Only the latest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    pub generation: u64,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Schedule(DebounceTicket),
    Issue(IssuedRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Failed,
    /// Superseded by a later request; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestCoordinator {
    debounce_ms: u32,
    debounce_generation: u64,
    debounce_pending: bool,
    latest_issued: u64,
    result: ResultState,
}

impl RequestCoordinator {
    pub fn new(debounce_ms: u32, page_size: u32) -> Self {
        Self {
            debounce_ms,
            debounce_generation: 0,
            debounce_pending: false,
            latest_issued: 0,
            result: ResultState::new(page_size),
        }
    }

    pub fn result(&self) -> &ResultState {
        &self.result
    }

    pub fn latest_issued(&self) -> u64 {
        self.latest_issued
    }

    pub fn is_debounce_pending(&self) -> bool {
        self.debounce_pending
    }

    pub fn is_current(&self, request_id: u64) -> bool {
        request_id == self.latest_issued
    }

    /// Reacts to a state transition. Any pending debounce timer is superseded,
    /// either by a fresh timer or by an immediate request.
    pub fn on_filter_change(&mut self, state: &FilterState, trigger: Trigger) -> Dispatch {
        self.debounce_generation += 1;
        match trigger {
            Trigger::Debounced => {
                self.debounce_pending = true;
                Dispatch::Schedule(DebounceTicket {
                    generation: self.debounce_generation,
                    delay_ms: self.debounce_ms,
                })
            }
            Trigger::Immediate => {
                self.debounce_pending = false;
                Dispatch::Issue(self.issue(state))
            }
        }
    }

    /// Called when a debounce timer fires. Compiles the state as it is *now*,
    /// so the request carries the last text the user entered.
    pub fn on_debounce_elapsed(
        &mut self,
        generation: u64,
        state: &FilterState,
    ) -> Option<IssuedRequest> {
        if generation != self.debounce_generation || !self.debounce_pending {
            return None;
        }
        self.debounce_pending = false;
        Some(self.issue(state))
    }

    /// Assigns the next request id to the current state's query.
    pub fn issue(&mut self, state: &FilterState) -> IssuedRequest {
        self.latest_issued += 1;
        self.result.is_loading = true;
        IssuedRequest {
            request_id: self.latest_issued,
            query: compile(state),
            page: state.page,
            page_size: state.page_size,
        }
    }

    /// Manual retry after a failure: re-compiles the current state, never
    /// replays a cached query.
    pub fn retry(&mut self, state: &FilterState) -> IssuedRequest {
        self.debounce_generation += 1;
        self.debounce_pending = false;
        self.issue(state)
    }

    /// Applies a settled request. Rows, pagination, options and stats are
    /// replaced together or not at all; a failure keeps the previous data.
    pub fn on_response(
        &mut self,
        request_id: u64,
        outcome: Result<InventoryPage, FetchError>,
    ) -> ApplyOutcome {
        if !self.is_current(request_id) {
            return ApplyOutcome::Stale;
        }
        self.result.is_loading = false;
        match outcome {
            Ok(page) => {
                self.result.rows = page.rows;
                self.result.pagination = page.pagination;
                self.result.filter_options = page.filter_options;
                self.result.stats = page.stats;
                self.result.request_id = request_id;
                self.result.error = None;
                self.result.has_loaded = true;
                ApplyOutcome::Applied
            }
            Err(err) => {
                self.result.error = Some(err.user_message());
                ApplyOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_inventory::state::FilterPatch;
    use contracts::dashboards::d410_inventory::KpiFilter;

    fn coordinator() -> RequestCoordinator {
        RequestCoordinator::new(DEFAULT_DEBOUNCE_MS, 10)
    }

    fn page_with(skus: &[&str], total: u64) -> InventoryPage {
        InventoryPage {
            rows: skus
                .iter()
                .map(|s| InventoryRow {
                    gb_sku: Some(s.to_string()),
                    ..Default::default()
                })
                .collect(),
            pagination: PageInfo {
                page: 1,
                page_size: 10,
                total_items: total,
                total_pages: total.div_ceil(10) as u32,
            },
            filter_options: FilterOptions::default(),
            stats: None,
        }
    }

    fn skus(result: &ResultState) -> Vec<String> {
        result
            .rows
            .iter()
            .filter_map(|r| r.gb_sku.clone())
            .collect()
    }

    fn expect_issue(dispatch: Dispatch) -> IssuedRequest {
        match dispatch {
            Dispatch::Issue(request) => request,
            other => panic!("expected an immediate request, got {other:?}"),
        }
    }

    fn expect_schedule(dispatch: Dispatch) -> DebounceTicket {
        match dispatch {
            Dispatch::Schedule(ticket) => ticket,
            other => panic!("expected a debounce timer, got {other:?}"),
        }
    }

    #[test]
    fn test_last_issued_wins_over_last_completed() {
        let mut c = coordinator();
        let state = FilterState::default();

        let first = expect_issue(c.on_filter_change(&state, Trigger::Immediate));
        let second = expect_issue(c.on_filter_change(&state, Trigger::Immediate));
        assert!(second.request_id > first.request_id);

        // second completes first
        assert_eq!(
            c.on_response(second.request_id, Ok(page_with(&["NEW"], 1))),
            ApplyOutcome::Applied
        );
        // slow first response arrives later and is dropped
        assert_eq!(
            c.on_response(first.request_id, Ok(page_with(&["OLD"], 1))),
            ApplyOutcome::Stale
        );

        assert_eq!(skus(c.result()), vec!["NEW"]);
        assert_eq!(c.result().request_id, second.request_id);
        assert!(!c.result().is_loading);
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut c = coordinator();
        let state = FilterState::default();
        let first = c.issue(&state);
        let _second = c.issue(&state);

        assert_eq!(
            c.on_response(first.request_id, Ok(page_with(&["OLD"], 1))),
            ApplyOutcome::Stale
        );
        assert!(c.result().is_loading);
        assert!(c.result().rows.is_empty());
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut c = coordinator();
        let state = FilterState::default();
        let first = c.issue(&state);
        let second = c.issue(&state);
        c.on_response(second.request_id, Ok(page_with(&["A"], 1)));

        assert_eq!(
            c.on_response(first.request_id, Err(FetchError::Http(500))),
            ApplyOutcome::Stale
        );
        assert_eq!(c.result().error, None);
    }

    #[test]
    fn test_burst_of_search_edits_issues_one_request_with_last_text() {
        let mut c = coordinator();
        let mut state = FilterState::default();
        let mut tickets = Vec::new();

        for text in ["h", "ha", "hai", "hair", "hair oil"] {
            let trigger = state.apply_patch(FilterPatch::search(text)).unwrap();
            tickets.push(expect_schedule(c.on_filter_change(&state, trigger)));
        }
        assert!(tickets.iter().all(|t| t.delay_ms == 300));

        // every timer fires in order; only the last one may issue
        let issued: Vec<IssuedRequest> = tickets
            .iter()
            .filter_map(|t| c.on_debounce_elapsed(t.generation, &state))
            .collect();

        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].query.get("search"), Some("hair oil"));
        assert_eq!(c.latest_issued(), 1);
        assert!(!c.is_debounce_pending());
    }

    #[test]
    fn test_ticket_fires_only_once() {
        let mut c = coordinator();
        let state = FilterState::default();
        let ticket = expect_schedule(c.on_filter_change(&state, Trigger::Debounced));
        assert!(c.on_debounce_elapsed(ticket.generation, &state).is_some());
        assert!(c.on_debounce_elapsed(ticket.generation, &state).is_none());
    }

    #[test]
    fn test_immediate_action_cancels_pending_search_timer() {
        let mut c = coordinator();
        let mut state = FilterState::default();

        state.apply_patch(FilterPatch::search("gel"));
        let ticket = expect_schedule(c.on_filter_change(&state, Trigger::Debounced));

        state.apply_patch(FilterPatch::page_size(50));
        let request = expect_issue(c.on_filter_change(&state, Trigger::Immediate));
        assert_eq!(request.query.get("search"), Some("gel"));
        assert_eq!(request.query.get("limit"), Some("50"));

        assert!(c.on_debounce_elapsed(ticket.generation, &state).is_none());
        assert_eq!(c.latest_issued(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut c = coordinator();
        let state = FilterState::default();

        let ok = c.issue(&state);
        c.on_response(ok.request_id, Ok(page_with(&["A", "B"], 2)));

        let failing = c.issue(&state);
        assert_eq!(
            c.on_response(failing.request_id, Err(FetchError::Network("offline".into()))),
            ApplyOutcome::Failed
        );

        let result = c.result();
        assert_eq!(skus(result), vec!["A", "B"]);
        assert_eq!(result.pagination.total_items, 2);
        assert_eq!(result.request_id, ok.request_id);
        assert_eq!(
            result.error.as_deref(),
            Some("Error loading data: Network error: offline")
        );
        assert!(!result.is_loading);
        assert!(!result.is_first_load_failure());
    }

    #[test]
    fn test_first_load_failure() {
        let mut c = coordinator();
        let request = c.issue(&FilterState::default());
        assert!(c.result().is_initial_loading());
        c.on_response(request.request_id, Err(FetchError::Http(503)));
        assert!(c.result().is_first_load_failure());
    }

    #[test]
    fn test_success_clears_error() {
        let mut c = coordinator();
        let state = FilterState::default();
        let failing = c.issue(&state);
        c.on_response(failing.request_id, Err(FetchError::Http(500)));

        let retry = c.retry(&state);
        assert_eq!(retry.query, compile(&state));
        c.on_response(retry.request_id, Ok(page_with(&["A"], 1)));
        assert_eq!(c.result().error, None);
        assert!(c.result().has_loaded);
    }

    #[test]
    fn test_retry_uses_current_state_not_last_query() {
        let mut c = coordinator();
        let mut state = FilterState::default();
        let failing = c.issue(&state);
        c.on_response(failing.request_id, Err(FetchError::Http(500)));

        state.kpi_filter = Some(KpiFilter::StockAlert);
        let retry = c.retry(&state);
        assert_eq!(retry.query.get("kpiFilter"), Some("stock_alert"));
        assert_ne!(retry.query, failing.query);
    }

    #[test]
    fn test_retry_supersedes_pending_timer() {
        let mut c = coordinator();
        let state = FilterState::default();
        let ticket = expect_schedule(c.on_filter_change(&state, Trigger::Debounced));
        c.retry(&state);
        assert!(c.on_debounce_elapsed(ticket.generation, &state).is_none());
    }

    #[test]
    fn test_kpi_toggle_round_trip_refetches_without_param() {
        let mut c = coordinator();
        let mut state = FilterState::default();

        let trigger = state.apply_patch(FilterPatch::kpi(Some(KpiFilter::StockAlert))).unwrap();
        let first = expect_issue(c.on_filter_change(&state, trigger));
        assert_eq!(first.query.get("kpiFilter"), Some("stock_alert"));

        let trigger = state.apply_patch(FilterPatch::kpi(None)).unwrap();
        let second = expect_issue(c.on_filter_change(&state, trigger));
        assert!(!second.query.contains("kpiFilter"));
    }
}
