pub mod d410_inventory;

pub use d410_inventory::ui::{InventoryTable, ProductAvailabilityDashboard};
