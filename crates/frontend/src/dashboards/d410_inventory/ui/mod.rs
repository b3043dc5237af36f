mod dashboard;
mod details;
mod sku_table;
mod table;
mod widgets;

pub use dashboard::ProductAvailabilityDashboard;
pub use table::InventoryTable;
