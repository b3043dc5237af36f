//! Filter state of an inventory view and its single transition, `apply_patch`.

use super::query::{
    PARAM_BRAND, PARAM_CATEGORY, PARAM_END_DATE, PARAM_KPI_FILTER, PARAM_LIMIT, PARAM_LOCATION,
    PARAM_PAGE, PARAM_SEARCH, PARAM_SORT_BY, PARAM_SORT_ORDER, PARAM_START_DATE, PARAM_VENDOR,
};
use crate::shared::date_utils::parse_iso_date;
use chrono::NaiveDate;
use contracts::dashboards::d410_inventory::{
    is_allowed_page_size, KpiFilter, SortOrder, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY,
};

/// Categorical filters backed by a select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Brand,
    Vendor,
    Location,
    Category,
}

impl CategoryField {
    pub const ALL: [CategoryField; 4] = [
        CategoryField::Brand,
        CategoryField::Vendor,
        CategoryField::Location,
        CategoryField::Category,
    ];

    pub fn param(&self) -> &'static str {
        match self {
            CategoryField::Brand => PARAM_BRAND,
            CategoryField::Vendor => PARAM_VENDOR,
            CategoryField::Location => PARAM_LOCATION,
            CategoryField::Category => PARAM_CATEGORY,
        }
    }

    /// "All X" option label; selecting it means no filter.
    pub fn sentinel(&self) -> &'static str {
        match self {
            CategoryField::Brand => "All Brands",
            CategoryField::Vendor => "All Vendors",
            CategoryField::Location => "All Locations",
            CategoryField::Category => "All Categories",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryField::Brand => "Brand",
            CategoryField::Vendor => "Vendor",
            CategoryField::Location => "Location",
            CategoryField::Category => "Category",
        }
    }
}

/// `None`, blank and the "All X" sentinel all mean "unset".
pub fn normalize_category(field: CategoryField, value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(field.sentinel()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// How the request coordinator should react to a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Free-text edits: wait for the user to pause typing.
    Debounced,
    /// Everything else fires right away.
    Immediate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub search_text: String,
    pub brand: Option<String>,
    pub vendor: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub date_range: DateRange,
    pub kpi_filter: Option<KpiFilter>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    /// 1-based
    pub page: u32,
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            brand: None,
            vendor: None,
            location: None,
            category: None,
            date_range: DateRange::default(),
            kpi_filter: None,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::Desc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    pub fn with_page_size(page_size: u32) -> Self {
        let mut state = Self::default();
        if is_allowed_page_size(page_size) {
            state.page_size = page_size;
        }
        state
    }

    /// Normalized value of a categorical filter.
    pub fn category_value(&self, field: CategoryField) -> Option<&str> {
        let raw = match field {
            CategoryField::Brand => &self.brand,
            CategoryField::Vendor => &self.vendor,
            CategoryField::Location => &self.location,
            CategoryField::Category => &self.category,
        };
        normalize_category(field, raw.as_deref())
    }

    fn category_slot(&mut self, field: CategoryField) -> &mut Option<String> {
        match field {
            CategoryField::Brand => &mut self.brand,
            CategoryField::Vendor => &mut self.vendor,
            CategoryField::Location => &mut self.location,
            CategoryField::Category => &mut self.category,
        }
    }

    /// Merges `patch` into the state.
    ///
    /// Out-of-domain values (page 0, page sizes outside the allowed set, blank
    /// sort keys) are ignored. The state is replaced in one step, so a caller
    /// never observes half of a patch. `page` goes back to 1 unless the patch
    /// is a pure page change.
    ///
    /// Returns `None` when nothing in the patch was applicable, in which case
    /// no fetch must happen.
    pub fn apply_patch(&mut self, patch: FilterPatch) -> Option<Trigger> {
        let page_only = patch.is_page_only();
        let search_only = patch.is_search_only();

        let mut next = self.clone();
        let mut applied = false;

        if let Some(text) = patch.search_text {
            next.search_text = text;
            applied = true;
        }
        for (field, value) in [
            (CategoryField::Brand, patch.brand),
            (CategoryField::Vendor, patch.vendor),
            (CategoryField::Location, patch.location),
            (CategoryField::Category, patch.category),
        ] {
            if let Some(value) = value {
                *next.category_slot(field) =
                    normalize_category(field, value.as_deref()).map(str::to_string);
                applied = true;
            }
        }
        if let Some(start) = patch.start_date {
            next.date_range.start = start;
            applied = true;
        }
        if let Some(end) = patch.end_date {
            next.date_range.end = end;
            applied = true;
        }
        if let Some(kpi) = patch.kpi_filter {
            next.kpi_filter = kpi;
            applied = true;
        }
        if let Some(sort_by) = patch.sort_by {
            let sort_by = sort_by.trim();
            if !sort_by.is_empty() {
                next.sort_by = sort_by.to_string();
                applied = true;
            }
        }
        if let Some(order) = patch.sort_order {
            next.sort_order = order;
            applied = true;
        }
        if let Some(size) = patch.page_size {
            if is_allowed_page_size(size) {
                next.page_size = size;
                applied = true;
            }
        }
        if let Some(page) = patch.page {
            if page >= 1 {
                next.page = page;
                applied = true;
            }
        }

        if !applied {
            return None;
        }
        if !page_only {
            next.page = 1;
        }
        *self = next;

        Some(if search_only {
            Trigger::Debounced
        } else {
            Trigger::Immediate
        })
    }

    /// Back to defaults. `default_page_size` is the dashboard's configured
    /// size, not the one currently selected.
    pub fn reset(&mut self, default_page_size: u32) {
        *self = Self::with_page_size(default_page_size);
    }

    /// Number of narrowing filters currently applied (badge on the filter panel).
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if !self.search_text.trim().is_empty() {
            count += 1;
        }
        count += CategoryField::ALL
            .iter()
            .filter(|f| self.category_value(**f).is_some())
            .count();
        if self.date_range.is_set() {
            count += 1;
        }
        if self.kpi_filter.is_some() {
            count += 1;
        }
        count
    }
}

/// Partial update of [`FilterState`]. The outer `Option` of every field means
/// "present in the patch"; for clearable fields the inner `Option` carries the
/// new value (`None` clears it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub search_text: Option<String>,
    pub brand: Option<Option<String>>,
    pub vendor: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub kpi_filter: Option<Option<KpiFilter>>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl FilterPatch {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn category(field: CategoryField, value: Option<String>) -> Self {
        let mut patch = Self::default();
        match field {
            CategoryField::Brand => patch.brand = Some(value),
            CategoryField::Vendor => patch.vendor = Some(value),
            CategoryField::Location => patch.location = Some(value),
            CategoryField::Category => patch.category = Some(value),
        }
        patch
    }

    pub fn start_date(date: Option<NaiveDate>) -> Self {
        Self {
            start_date: Some(date),
            ..Default::default()
        }
    }

    pub fn end_date(date: Option<NaiveDate>) -> Self {
        Self {
            end_date: Some(date),
            ..Default::default()
        }
    }

    pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }

    pub fn kpi(kpi: Option<KpiFilter>) -> Self {
        Self {
            kpi_filter: Some(kpi),
            ..Default::default()
        }
    }

    pub fn sort(sort_by: impl Into<String>, order: SortOrder) -> Self {
        Self {
            sort_by: Some(sort_by.into()),
            sort_order: Some(order),
            ..Default::default()
        }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn page_size(size: u32) -> Self {
        Self {
            page_size: Some(size),
            ..Default::default()
        }
    }

    /// Builds a patch from loosely typed `(key, value)` pairs using the query
    /// parameter names as keys. Unknown keys and unparsable values are dropped
    /// so that a bad control value never blocks the UI.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut patch = Self::default();
        for (key, value) in pairs {
            match key {
                PARAM_SEARCH => patch.search_text = Some(value.to_string()),
                PARAM_BRAND => patch.brand = Some(Some(value.to_string())),
                PARAM_VENDOR => patch.vendor = Some(Some(value.to_string())),
                PARAM_LOCATION => patch.location = Some(Some(value.to_string())),
                PARAM_CATEGORY => patch.category = Some(Some(value.to_string())),
                PARAM_START_DATE => {
                    if let Some(date) = parse_optional_date(value) {
                        patch.start_date = Some(date);
                    }
                }
                PARAM_END_DATE => {
                    if let Some(date) = parse_optional_date(value) {
                        patch.end_date = Some(date);
                    }
                }
                PARAM_KPI_FILTER => {
                    if value.trim().is_empty() {
                        patch.kpi_filter = Some(None);
                    } else if let Some(kpi) = KpiFilter::parse(value) {
                        patch.kpi_filter = Some(Some(kpi));
                    }
                }
                PARAM_SORT_BY => patch.sort_by = Some(value.to_string()),
                PARAM_SORT_ORDER => {
                    if let Some(order) = SortOrder::parse(value) {
                        patch.sort_order = Some(order);
                    }
                }
                PARAM_PAGE => {
                    if let Ok(page) = value.trim().parse::<u32>() {
                        patch.page = Some(page);
                    }
                }
                PARAM_LIMIT => {
                    if let Ok(size) = value.trim().parse::<u32>() {
                        patch.page_size = Some(size);
                    }
                }
                other => log::debug!("ignoring unknown filter key '{}'", other),
            }
        }
        patch
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn is_page_only(&self) -> bool {
        self.page.is_some()
            && Self {
                page: None,
                ..self.clone()
            }
            .is_empty()
    }

    fn is_search_only(&self) -> bool {
        self.search_text.is_some()
            && Self {
                search_text: None,
                ..self.clone()
            }
            .is_empty()
    }
}

/// `""` clears, a valid date sets, anything else is ignored (`None`).
fn parse_optional_date(raw: &str) -> Option<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        Some(None)
    } else {
        parse_iso_date(raw).map(Some)
    }
}
