use crate::shared::lenient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One inventory record as returned by `/api/inventory/<view>` and `/api/planning`.
///
/// The backend contract has drifted between endpoint versions, so this is a
/// superset of every observed shape and every field is optional. Fields that
/// are not modelled here are kept in `extra` and shown raw in the details view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    // Identity
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub brand: Option<String>,
    #[serde(default, alias = "sku", deserialize_with = "lenient::opt_string")]
    pub gb_sku: Option<String>,
    #[serde(default, alias = "product", deserialize_with = "lenient::opt_string")]
    pub product_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub asin: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub ean_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub multiple_listing: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub pack_size: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_bundle: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub launch_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,

    // Pricing
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub mrp: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub selling_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub cogs: Option<f64>,

    // Aggregated stock (planning view)
    #[serde(default, alias = "currentStock", deserialize_with = "lenient::opt_i64")]
    pub current_stock: Option<i64>,
    #[serde(default, alias = "inTransit", deserialize_with = "lenient::opt_i64")]
    pub in_transit: Option<i64>,
    #[serde(default, alias = "upcomingStock", deserialize_with = "lenient::opt_i64")]
    pub upcoming_stock: Option<i64>,
    #[serde(default, alias = "upcomingDays", deserialize_with = "lenient::opt_string")]
    pub upcoming_days: Option<String>,
    #[serde(default, alias = "drr", deserialize_with = "lenient::opt_f64")]
    pub speed: Option<f64>,
    #[serde(default, alias = "daysCover", deserialize_with = "lenient::opt_f64")]
    pub days_cover: Option<f64>,
    #[serde(default, alias = "poStatus", deserialize_with = "lenient::opt_string")]
    pub po_status: Option<String>,
    #[serde(default, alias = "poIntent", deserialize_with = "lenient::opt_i64")]
    pub po_intent: Option<i64>,
    /// Status computed by the backend; informational only, the UI re-derives its own.
    #[serde(default, alias = "stockStatus", deserialize_with = "lenient::opt_string")]
    pub stock_status: Option<String>,

    // Fulfilment channel units
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub fba_units_gb: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub fbf_units_gb: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub myntra_units_gb: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub increff_units: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub pc_units: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub allocated_on_hold: Option<i64>,

    // Quick commerce / marketplace stock
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub instamart_stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub zepto_stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub blinkit_b2b_stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub blinkit_b2c_stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub nykaa_stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub reliance_stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub bigbasket_stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub meesho_stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub purple_stock: Option<i64>,

    // Run rates (units/day) and cover (days)
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub fba_drr: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub fbf_drr: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub myntra_drr: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub swiggy_drr_30d: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub marketplace_speed_30_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub quickcomm_speed_30_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub b2b_speed_30_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub total_day_cover: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub warehouse_total_days_of_cover: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub increff_day_cover: Option<f64>,

    /// Everything the backend sent that is not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl InventoryRow {
    /// Stock used for the row's status badge: the aggregated figure when the
    /// endpoint provides one, otherwise FBA + FBF units.
    pub fn effective_stock(&self) -> i64 {
        match self.current_stock {
            Some(stock) => stock,
            None => self
                .fba_units_gb
                .unwrap_or(0)
                .saturating_add(self.fbf_units_gb.unwrap_or(0)),
        }
    }

    /// Run rate used for days-of-cover when the backend did not compute it.
    pub fn effective_drr(&self) -> f64 {
        match self.speed {
            Some(speed) => speed,
            None => self.fba_drr.unwrap_or(0.0) + self.fbf_drr.unwrap_or(0.0),
        }
    }

    /// Last segment of a dash-separated category path.
    pub fn category_leaf(&self) -> Option<&str> {
        self.category
            .as_deref()
            .and_then(|c| c.rsplit('-').next())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Distinct values the backend offers for each categorical filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default)]
    pub available_brands: Vec<String>,
    #[serde(default)]
    pub available_vendors: Vec<String>,
    #[serde(default)]
    pub available_locations: Vec<String>,
    #[serde(default)]
    pub available_categories: Vec<String>,
}

/// Named quantity for small bar lists (channel distribution, quick commerce).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "units", alias = "days", deserialize_with = "lenient::opt_f64")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub warehouse: Option<bool>,
}

/// Summary block (`stats` on the list endpoints, `summary` on planning).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub total_products: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub active_products: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub total_fba_stock: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub total_fbf_stock: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_fba_drr: Option<f64>,

    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub total_stock: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub in_transit: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub current_stock: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub over_inventory: Option<f64>,
    #[serde(default, alias = "inventoryCogs", deserialize_with = "lenient::opt_f64")]
    pub inventory_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub week_over_week_change: Option<f64>,

    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub stock_alert: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub zero_stock: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub low_stock: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_days_cover: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub upcoming_stock: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub po_required: Option<u64>,

    #[serde(default)]
    pub channel_distribution: Vec<NamedValue>,
    #[serde(default)]
    pub days_cover_trend: Vec<NamedValue>,
    #[serde(default)]
    pub quick_commerce: Vec<NamedValue>,
}

/// Nested pagination block used by newer endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationBlock {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub limit: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub total_pages: Option<u64>,
}

/// Raw list response in any of the observed shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryListResponse {
    /// Missing on older planning responses; absent means success.
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<InventoryRow>>,
    #[serde(default, rename = "sku_inventory_details")]
    pub sku_inventory_details: Option<Vec<InventoryRow>>,

    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub current_page: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub total_pages: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub items_per_page: Option<u64>,
    #[serde(default)]
    pub pagination: Option<PaginationBlock>,

    #[serde(default)]
    pub filters: Option<FilterOptions>,
    #[serde(default)]
    pub stats: Option<InventoryStats>,
    #[serde(default)]
    pub summary: Option<InventoryStats>,
}

fn default_success() -> bool {
    true
}

/// Pagination metadata after normalization. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PageInfo {
    pub fn empty(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            total_items: 0,
            total_pages: 0,
        }
    }
}

/// Normalized payload the dashboard works with.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryPage {
    pub rows: Vec<InventoryRow>,
    pub pagination: PageInfo,
    pub filter_options: FilterOptions,
    pub stats: Option<InventoryStats>,
}

impl InventoryListResponse {
    /// Normalizes any response shape. `requested_page`/`requested_size` fill
    /// in pagination fields the endpoint did not return.
    ///
    /// Returns the backend message when `success` is false.
    pub fn into_page(self, requested_page: u32, requested_size: u32) -> Result<InventoryPage, String> {
        if !self.success {
            return Err(self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Failed to fetch data".to_string()));
        }

        let rows = self
            .data
            .or(self.sku_inventory_details)
            .unwrap_or_default();

        let block = self.pagination.unwrap_or_default();
        let page = block.page.or(self.current_page).unwrap_or(requested_page as u64);
        let page_size = block
            .limit
            .or(self.items_per_page)
            .filter(|s| *s > 0)
            .unwrap_or(requested_size as u64);
        let total_items = block.total.or(self.count).unwrap_or(rows.len() as u64);
        let total_pages = block
            .total_pages
            .or(self.total_pages)
            .unwrap_or_else(|| if page_size == 0 { 0 } else { total_items.div_ceil(page_size) });

        Ok(InventoryPage {
            rows,
            pagination: PageInfo {
                page: clamp_u32(page.max(1)),
                page_size: clamp_u32(page_size),
                total_items,
                total_pages: clamp_u32(total_pages),
            },
            filter_options: self.filters.unwrap_or_default(),
            stats: self.stats.or(self.summary),
        })
    }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> InventoryListResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flat_pagination_shape() {
        let page = parse(
            r#"{
                "success": true,
                "data": [{"gb_sku": "100000661934", "brand": "Urban Gabru", "mrp": "499"}],
                "currentPage": 2, "totalPages": 7, "count": 65, "itemsPerPage": 10,
                "filters": {"availableBrands": ["Urban Gabru", "Urban Yog"]},
                "stats": {"totalProducts": 65, "activeProducts": 60, "totalFbaStock": 1200}
            }"#,
        )
        .into_page(1, 10)
        .unwrap();

        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].mrp, Some(499.0));
        assert_eq!(
            page.pagination,
            PageInfo { page: 2, page_size: 10, total_items: 65, total_pages: 7 }
        );
        assert_eq!(page.filter_options.available_brands.len(), 2);
        assert_eq!(page.stats.unwrap().total_products, Some(65));
    }

    #[test]
    fn test_nested_pagination_shape() {
        let page = parse(
            r#"{
                "sku_inventory_details": [{"sku": 200000254662, "currentStock": 0, "daysCover": 0}],
                "pagination": {"page": 1, "limit": 25, "total": 51, "totalPages": 3},
                "summary": {"stockAlert": 4, "zeroStock": 1, "lowStock": 3}
            }"#,
        )
        .into_page(1, 10)
        .unwrap();

        assert_eq!(page.rows[0].gb_sku.as_deref(), Some("200000254662"));
        assert_eq!(page.rows[0].current_stock, Some(0));
        assert_eq!(page.pagination.page_size, 25);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.stats.unwrap().stock_alert, Some(4));
    }

    #[test]
    fn test_missing_pagination_falls_back_to_request() {
        let page = parse(r#"{"data": [{}, {}, {}]}"#).into_page(1, 25).unwrap();
        assert_eq!(
            page.pagination,
            PageInfo { page: 1, page_size: 25, total_items: 3, total_pages: 1 }
        );
    }

    #[test]
    fn test_unsuccessful_payload() {
        let err = parse(r#"{"success": false, "message": "DB down"}"#)
            .into_page(1, 10)
            .unwrap_err();
        assert_eq!(err, "DB down");

        let err = parse(r#"{"success": false}"#).into_page(1, 10).unwrap_err();
        assert_eq!(err, "Failed to fetch data");
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let row: InventoryRow = serde_json::from_str(
            r#"{"gb_sku": "X1", "quick_commerce_speed": {"instamart": 3}}"#,
        )
        .unwrap();
        assert!(row.extra.contains_key("quick_commerce_speed"));
        assert_eq!(row.gb_sku.as_deref(), Some("X1"));
    }

    #[test]
    fn test_effective_stock_and_category_leaf() {
        let row = InventoryRow {
            fba_units_gb: Some(12),
            fbf_units_gb: Some(5),
            category: Some("Beauty-Hair-Hair Oil".to_string()),
            ..Default::default()
        };
        assert_eq!(row.effective_stock(), 17);
        assert_eq!(row.category_leaf(), Some("Hair Oil"));

        let row = InventoryRow { current_stock: Some(3800), fba_units_gb: Some(1), ..Default::default() };
        assert_eq!(row.effective_stock(), 3800);
    }

    #[test]
    fn test_effective_stock_saturates() {
        let row: InventoryRow = serde_json::from_str(
            r#"{"fba_units_gb": "99999999999999999999999", "fbf_units_gb": 5}"#,
        )
        .unwrap();
        assert_eq!(row.fba_units_gb, Some(i64::MAX));
        assert_eq!(row.effective_stock(), i64::MAX);

        let row = InventoryRow { fba_units_gb: Some(i64::MIN), fbf_units_gb: Some(-1), ..Default::default() };
        assert_eq!(row.effective_stock(), i64::MIN);
    }
}
