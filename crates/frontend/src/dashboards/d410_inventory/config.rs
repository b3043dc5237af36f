use super::coordinator::DEFAULT_DEBOUNCE_MS;
use super::state::FilterState;
use contracts::dashboards::d410_inventory::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

pub const EXPORT_PATH: &str = "/api/inventory/export";

/// Backend endpoint an inventory view reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventorySource {
    /// Latest daily snapshot.
    LastDay,
    /// Planning aggregates (stock, cover, PO status).
    Planning,
    /// Any other named view under `/api/inventory/`.
    View(String),
}

impl InventorySource {
    pub fn path(&self) -> String {
        match self {
            InventorySource::LastDay => InventorySource::View("last-day".to_string()).path(),
            InventorySource::Planning => "/api/planning".to_string(),
            InventorySource::View(name) => {
                format!("/api/inventory/{}", urlencoding::encode(name.trim_matches('/')))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub source: InventorySource,
    pub debounce_ms: u32,
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
}

impl DashboardConfig {
    pub fn product_availability() -> Self {
        Self {
            source: InventorySource::Planning,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
        }
    }

    pub fn inventory_table() -> Self {
        Self {
            source: InventorySource::LastDay,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
        }
    }

    pub fn initial_state(&self) -> FilterState {
        FilterState::with_page_size(self.default_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_paths() {
        assert_eq!(InventorySource::LastDay.path(), "/api/inventory/last-day");
        assert_eq!(InventorySource::Planning.path(), "/api/planning");
        assert_eq!(
            InventorySource::View("/weekly summary/".to_string()).path(),
            "/api/inventory/weekly%20summary"
        );
    }

    #[test]
    fn test_presets() {
        let config = DashboardConfig::inventory_table();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.page_size_options, vec![10, 25, 50, 100]);
        assert_eq!(config.initial_state().page_size, 10);
        assert_eq!(DashboardConfig::product_availability().source, InventorySource::Planning);
    }
}
