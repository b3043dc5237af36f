//! Translate control events into [`FilterPatch`]es.
//!
//! Each handler compares the incoming control value with the current state
//! and returns `None` when nothing would change, so redundant events never
//! reach the coordinator.

use super::state::{normalize_category, CategoryField, FilterPatch, FilterState};
use crate::shared::date_utils::parse_iso_date;
use chrono::NaiveDate;
use contracts::dashboards::d410_inventory::{is_allowed_page_size, KpiFilter, SortOrder};

pub fn search_changed(state: &FilterState, text: &str) -> Option<FilterPatch> {
    (state.search_text != text).then(|| FilterPatch::search(text))
}

pub fn category_changed(
    state: &FilterState,
    field: CategoryField,
    value: &str,
) -> Option<FilterPatch> {
    let next = normalize_category(field, Some(value));
    // select values arrive as raw strings keyed by the query parameter
    (state.category_value(field) != next).then(|| FilterPatch::from_pairs([(field.param(), value)]))
}

/// `""` clears the date; unparsable input is ignored.
fn date_input(raw: &str) -> Option<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        Some(None)
    } else {
        parse_iso_date(raw).map(Some)
    }
}

pub fn start_date_changed(state: &FilterState, raw: &str) -> Option<FilterPatch> {
    let date = date_input(raw)?;
    (state.date_range.start != date).then(|| FilterPatch::start_date(date))
}

pub fn end_date_changed(state: &FilterState, raw: &str) -> Option<FilterPatch> {
    let date = date_input(raw)?;
    (state.date_range.end != date).then(|| FilterPatch::end_date(date))
}

/// Quick range buttons set both ends at once.
pub fn date_range_changed(
    state: &FilterState,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<FilterPatch> {
    (state.date_range.start != start || state.date_range.end != end)
        .then(|| FilterPatch::date_range(start, end))
}

pub fn page_changed(state: &FilterState, page: u32) -> Option<FilterPatch> {
    (page >= 1 && page != state.page).then(|| FilterPatch::page(page))
}

pub fn page_size_changed(state: &FilterState, size: u32) -> Option<FilterPatch> {
    (is_allowed_page_size(size) && size != state.page_size).then(|| FilterPatch::page_size(size))
}

/// Same column toggles the direction; a new column starts descending.
pub fn sort_clicked(state: &FilterState, key: &str) -> Option<FilterPatch> {
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let order = if state.sort_by == key {
        state.sort_order.toggled()
    } else {
        SortOrder::Desc
    };
    Some(FilterPatch::sort(key, order))
}

/// Clicking the active KPI card clears it; any other card replaces it.
pub fn kpi_clicked(state: &FilterState, kpi: KpiFilter) -> Option<FilterPatch> {
    if state.kpi_filter == Some(kpi) {
        Some(FilterPatch::kpi(None))
    } else {
        Some(FilterPatch::kpi(Some(kpi)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_inventory::state::Trigger;

    #[test]
    fn test_sort_toggle() {
        let mut state = FilterState::default();

        let patch = sort_clicked(&state, "brand").unwrap();
        state.apply_patch(patch);
        assert_eq!(state.sort_by, "brand");
        assert_eq!(state.sort_order, SortOrder::Desc);

        let patch = sort_clicked(&state, "brand").unwrap();
        state.apply_patch(patch);
        assert_eq!(state.sort_order, SortOrder::Asc);

        let patch = sort_clicked(&state, "brand").unwrap();
        state.apply_patch(patch);
        assert_eq!(state.sort_order, SortOrder::Desc);

        assert!(sort_clicked(&state, " ").is_none());
    }

    #[test]
    fn test_sort_on_default_key_toggles() {
        let state = FilterState::default();
        let patch = sort_clicked(&state, "created_at").unwrap();
        assert_eq!(patch.sort_order, Some(SortOrder::Asc));
    }

    #[test]
    fn test_kpi_toggle() {
        let mut state = FilterState::default();

        state.apply_patch(kpi_clicked(&state, KpiFilter::StockAlert).unwrap());
        assert_eq!(state.kpi_filter, Some(KpiFilter::StockAlert));

        state.apply_patch(kpi_clicked(&state, KpiFilter::PoRequired).unwrap());
        assert_eq!(state.kpi_filter, Some(KpiFilter::PoRequired));

        state.apply_patch(kpi_clicked(&state, KpiFilter::PoRequired).unwrap());
        assert_eq!(state.kpi_filter, None);
    }

    #[test]
    fn test_unchanged_values_produce_no_patch() {
        let mut state = FilterState::default();
        assert!(search_changed(&state, "").is_none());
        assert!(category_changed(&state, CategoryField::Brand, "All Brands").is_none());
        assert!(page_changed(&state, 1).is_none());
        assert!(page_changed(&state, 0).is_none());
        assert!(page_size_changed(&state, 10).is_none());
        assert!(page_size_changed(&state, 33).is_none());
        assert!(start_date_changed(&state, "").is_none());

        state.apply_patch(FilterPatch::category(CategoryField::Brand, Some("Urban Yog".into())));
        assert!(category_changed(&state, CategoryField::Brand, " Urban Yog ").is_none());
    }

    #[test]
    fn test_category_back_to_sentinel_clears() {
        let mut state = FilterState::default();
        state.apply_patch(category_changed(&state, CategoryField::Location, "Amazon FBA").unwrap());
        assert_eq!(state.location.as_deref(), Some("Amazon FBA"));

        state.apply_patch(category_changed(&state, CategoryField::Location, "All Locations").unwrap());
        assert_eq!(state.location, None);
    }

    #[test]
    fn test_category_select_value_is_trimmed() {
        let mut state = FilterState::default();
        let patch = category_changed(&state, CategoryField::Vendor, "  Acme Traders ").unwrap();
        assert_eq!(patch.vendor, Some(Some("  Acme Traders ".to_string())));
        state.apply_patch(patch);
        assert_eq!(state.vendor.as_deref(), Some("Acme Traders"));
        assert_eq!(state.brand, None);
    }

    #[test]
    fn test_date_inputs() {
        let mut state = FilterState::default();
        assert!(start_date_changed(&state, "31/01/2024").is_none());

        state.apply_patch(start_date_changed(&state, "2024-01-31").unwrap());
        assert_eq!(state.date_range.start, NaiveDate::from_ymd_opt(2024, 1, 31));

        state.apply_patch(start_date_changed(&state, "").unwrap());
        assert_eq!(state.date_range.start, None);

        state.apply_patch(end_date_changed(&state, "2024-02-29").unwrap());
        assert_eq!(state.date_range.end, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_search_patch_is_debounced() {
        let mut state = FilterState::default();
        let patch = search_changed(&state, "hai").unwrap();
        assert_eq!(state.apply_patch(patch), Some(Trigger::Debounced));
    }
}
