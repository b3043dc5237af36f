//! Leptos glue around [`RequestCoordinator`].
//!
//! Owns the filter and coordinator signals of one dashboard instance, runs
//! the debounce timers and HTTP calls, and reports their outcomes back to the
//! coordinator. Child components reach it through context.

use super::api;
use super::config::DashboardConfig;
use super::coordinator::{
    ApplyOutcome, DebounceTicket, Dispatch, IssuedRequest, RequestCoordinator, ResultState,
};
use super::handlers;
use super::state::{CategoryField, FilterPatch, FilterState, Trigger};
use chrono::NaiveDate;
use contracts::dashboards::d410_inventory::KpiFilter;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct InventoryController {
    filters: RwSignal<FilterState>,
    coordinator: RwSignal<RequestCoordinator>,
    result: Memo<ResultState>,
    config: StoredValue<DashboardConfig>,
}

impl InventoryController {
    pub fn new(config: DashboardConfig) -> Self {
        let filters = RwSignal::new(config.initial_state());
        let coordinator = RwSignal::new(RequestCoordinator::new(
            config.debounce_ms,
            config.default_page_size,
        ));
        let result = Memo::new(move |_| coordinator.with(|c| c.result().clone()));
        Self {
            filters,
            coordinator,
            result,
            config: StoredValue::new(config),
        }
    }

    /// Creates a controller, makes it available to child components and
    /// issues the first request.
    pub fn provide(config: DashboardConfig) -> Self {
        let controller = Self::new(config);
        provide_context(controller);
        controller.refresh();
        controller
    }

    pub fn filters(&self) -> Signal<FilterState> {
        let filters = self.filters;
        Signal::derive(move || filters.get())
    }

    pub fn result(&self) -> Memo<ResultState> {
        self.result
    }

    pub fn page_size_options(&self) -> Vec<u32> {
        self.config.with_value(|c| c.page_size_options.clone())
    }

    /// Merges a patch and fetches if anything changed.
    pub fn apply(&self, patch: FilterPatch) {
        let mut next = self.filters.get_untracked();
        let Some(trigger) = next.apply_patch(patch) else {
            return;
        };
        self.filters.set(next);
        self.dispatch(trigger);
    }

    /// Runs an interaction handler against the current state.
    pub fn handle(&self, handler: impl FnOnce(&FilterState) -> Option<FilterPatch>) {
        if let Some(patch) = self.filters.with_untracked(handler) {
            self.apply(patch);
        }
    }

    pub fn reset(&self) {
        let default_page_size = self.config.with_value(|c| c.default_page_size);
        let mut next = self.filters.get_untracked();
        next.reset(default_page_size);
        self.filters.set(next);
        self.dispatch(Trigger::Immediate);
    }

    /// Re-issues the current query.
    pub fn refresh(&self) {
        self.dispatch(Trigger::Immediate);
    }

    pub fn retry(&self) {
        let state = self.filters.get_untracked();
        if let Some(request) = self.coordinator.try_update(|c| c.retry(&state)) {
            self.send(request);
        }
    }

    pub fn export(&self) {
        let state = self.filters.get_untracked();
        if let Err(e) = api::open_export(&state) {
            log::error!("Failed to open inventory export: {}", e);
        }
    }

    pub fn set_search(&self, text: String) {
        self.handle(|s| handlers::search_changed(s, &text));
    }

    pub fn set_category(&self, field: CategoryField, value: String) {
        self.handle(|s| handlers::category_changed(s, field, &value));
    }

    pub fn set_start_date(&self, raw: String) {
        self.handle(|s| handlers::start_date_changed(s, &raw));
    }

    pub fn set_end_date(&self, raw: String) {
        self.handle(|s| handlers::end_date_changed(s, &raw));
    }

    pub fn set_date_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.handle(|s| handlers::date_range_changed(s, start, end));
    }

    pub fn go_to_page(&self, page: u32) {
        self.handle(|s| handlers::page_changed(s, page));
    }

    pub fn set_page_size(&self, size: u32) {
        self.handle(|s| handlers::page_size_changed(s, size));
    }

    pub fn toggle_sort(&self, key: &str) {
        self.handle(|s| handlers::sort_clicked(s, key));
    }

    pub fn toggle_kpi(&self, kpi: KpiFilter) {
        self.handle(|s| handlers::kpi_clicked(s, kpi));
    }

    fn dispatch(&self, trigger: Trigger) {
        let state = self.filters.get_untracked();
        let Some(dispatch) = self
            .coordinator
            .try_update(|c| c.on_filter_change(&state, trigger))
        else {
            return;
        };
        match dispatch {
            Dispatch::Schedule(ticket) => self.schedule(ticket),
            Dispatch::Issue(request) => self.send(request),
        }
    }

    fn schedule(&self, ticket: DebounceTicket) {
        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(ticket.delay_ms).await;
            // view may be gone by now
            let Some(state) = this.filters.try_get_untracked() else {
                return;
            };
            let request = this
                .coordinator
                .try_update(|c| c.on_debounce_elapsed(ticket.generation, &state))
                .flatten();
            if let Some(request) = request {
                this.send(request);
            }
        });
    }

    fn send(&self, request: IssuedRequest) {
        let this = *self;
        let Some(path) = self.config.try_with_value(|c| c.source.path()) else {
            return;
        };
        log::debug!(
            "inventory request #{}: {}?{}",
            request.request_id,
            path,
            request.query.to_query_string()
        );

        spawn_local(async move {
            let request_id = request.request_id;
            let outcome = api::fetch_inventory(&path, &request).await;
            if let Err(e) = &outcome {
                log::warn!("inventory request #{} failed: {}", request_id, e);
            }

            match this.coordinator.try_update(|c| c.on_response(request_id, outcome)) {
                Some(ApplyOutcome::Applied) => {
                    log::debug!("inventory request #{} applied", request_id)
                }
                Some(ApplyOutcome::Failed) => {}
                Some(ApplyOutcome::Stale) => {
                    log::debug!("inventory request #{} superseded, discarded", request_id)
                }
                None => log::debug!("inventory view disposed before request #{} settled", request_id),
            }
        });
    }
}

pub fn use_inventory_controller() -> InventoryController {
    use_context::<InventoryController>().expect("InventoryController should be provided")
}
