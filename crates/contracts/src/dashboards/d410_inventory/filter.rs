use serde::{Deserialize, Serialize};

/// Allowed page sizes for inventory lists.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Server-side default ordering: newest rows first.
pub const DEFAULT_SORT_BY: &str = "created_at";

pub fn is_allowed_page_size(size: u32) -> bool {
    PAGE_SIZE_OPTIONS.contains(&size)
}

/// Filter activated by clicking a KPI card. Single-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiFilter {
    StockAlert,
    UpcomingStock,
    PoRequired,
    OverInventory,
}

impl KpiFilter {
    pub const ALL: [KpiFilter; 4] = [
        KpiFilter::StockAlert,
        KpiFilter::UpcomingStock,
        KpiFilter::PoRequired,
        KpiFilter::OverInventory,
    ];

    /// Wire value of the `kpiFilter` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiFilter::StockAlert => "stock_alert",
            KpiFilter::UpcomingStock => "upcoming_stock",
            KpiFilter::PoRequired => "po_required",
            KpiFilter::OverInventory => "over_inventory",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            KpiFilter::StockAlert => "STOCK ALERT",
            KpiFilter::UpcomingStock => "UPCOMING STOCK",
            KpiFilter::PoRequired => "PO REQUIRED",
            KpiFilter::OverInventory => "OVER INVENTORY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[default]
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// Accepts `asc`/`desc` in any case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Asc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_wire_values() {
        for kpi in KpiFilter::ALL {
            assert_eq!(KpiFilter::parse(kpi.as_str()), Some(kpi));
        }
        assert_eq!(KpiFilter::parse("PO_REQUIRED"), Some(KpiFilter::PoRequired));
        assert_eq!(KpiFilter::parse("unknown"), None);
    }

    #[test]
    fn test_kpi_serde_matches_wire_value() {
        let json = serde_json::to_string(&KpiFilter::OverInventory).unwrap();
        assert_eq!(json, "\"over_inventory\"");
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
        assert_eq!(serde_json::to_string(&SortOrder::Asc).unwrap(), "\"ASC\"");
    }

    #[test]
    fn test_page_sizes() {
        assert!(is_allowed_page_size(25));
        assert!(!is_allowed_page_size(20));
        assert!(is_allowed_page_size(DEFAULT_PAGE_SIZE));
    }
}
