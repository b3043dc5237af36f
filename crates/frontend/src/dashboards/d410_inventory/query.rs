//! Compiles a [`FilterState`] into the query parameters of the inventory endpoints.

use super::state::{CategoryField, FilterState};
use crate::shared::date_utils::format_iso_date;
use contracts::dashboards::d410_inventory::DEFAULT_SORT_BY;

pub const PARAM_PAGE: &str = "page";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_BRAND: &str = "brand";
pub const PARAM_VENDOR: &str = "vendor";
pub const PARAM_LOCATION: &str = "location";
pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_START_DATE: &str = "startDate";
pub const PARAM_END_DATE: &str = "endDate";
pub const PARAM_KPI_FILTER: &str = "kpiFilter";
pub const PARAM_SORT_BY: &str = "sortBy";
pub const PARAM_SORT_ORDER: &str = "sortOrder";

/// Ordered key/value pairs of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn push(&mut self, key: &str, value: impl Into<String>) {
        self.0.push((key.to_string(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `k1=v1&k2=v2` with percent-encoded keys and values.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Filter parameters shared by list and export queries, in canonical order.
fn push_filters(params: &mut QueryParams, state: &FilterState) {
    let search = state.search_text.trim();
    if !search.is_empty() {
        params.push(PARAM_SEARCH, search);
    }
    for field in CategoryField::ALL {
        if let Some(value) = state.category_value(field) {
            params.push(field.param(), value);
        }
    }
    if let Some(start) = state.date_range.start {
        params.push(PARAM_START_DATE, format_iso_date(start));
    }
    if let Some(end) = state.date_range.end {
        params.push(PARAM_END_DATE, format_iso_date(end));
    }
    if let Some(kpi) = state.kpi_filter {
        params.push(PARAM_KPI_FILTER, kpi.as_str());
    }
}

/// Query for the list endpoints.
///
/// `page`, `limit`, `sortBy` and `sortOrder` are always present; every other
/// key is present only when its filter is set.
pub fn compile(state: &FilterState) -> QueryParams {
    let mut params = QueryParams::default();
    params.push(PARAM_PAGE, state.page.max(1).to_string());
    params.push(PARAM_LIMIT, state.page_size.to_string());
    push_filters(&mut params, state);

    let sort_by = state.sort_by.trim();
    let sort_by = if sort_by.is_empty() { DEFAULT_SORT_BY } else { sort_by };
    params.push(PARAM_SORT_BY, sort_by);
    params.push(PARAM_SORT_ORDER, state.sort_order.as_str());
    params
}

/// Query for the export link: filters only, no paging or ordering.
pub fn compile_export(state: &FilterState) -> QueryParams {
    let mut params = QueryParams::default();
    push_filters(&mut params, state);
    params
}
