//! Display values derived from raw inventory rows.
//!
//! Everything here is recomputed on render; nothing is cached.

use crate::shared::components::table::{format_money, format_number_int, format_number_with_decimals};
use contracts::dashboards::d410_inventory::InventoryRow;

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Per-row price: two decimals, never abbreviated.
pub fn format_price(value: Option<f64>) -> String {
    format!("₹{:.2}", finite_or_zero(value.unwrap_or(0.0)))
}

/// Summary amount with thousands separators.
pub fn format_currency(value: f64) -> String {
    format!("₹{}", format_money(value))
}

/// Summary amount for KPI cards: lakh / crore abbreviations for large values.
pub fn format_currency_compact(value: f64) -> String {
    let value = finite_or_zero(value);
    let magnitude = value.abs();
    if magnitude >= CRORE {
        format!("₹{:.2}Cr", value / CRORE)
    } else if magnitude >= LAKH {
        format!("₹{:.2}L", value / LAKH)
    } else {
        format_currency(value)
    }
}

/// Profit margin in percent, based on selling price when there is one and on
/// MRP otherwise. Always finite.
pub fn margin_percent(selling_price: Option<f64>, mrp: Option<f64>, cogs: Option<f64>) -> f64 {
    let selling = selling_price.unwrap_or(0.0);
    let mrp = mrp.unwrap_or(0.0);
    let cogs = cogs.unwrap_or(0.0);

    let margin = if selling > 0.0 {
        (selling - cogs) / selling * 100.0
    } else if mrp > 0.0 {
        (mrp - cogs) / mrp * 100.0
    } else {
        0.0
    };
    finite_or_zero(margin)
}

pub fn format_margin(margin: f64) -> String {
    format!("{:.1}%", finite_or_zero(margin))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginClass {
    Good,
    Warning,
    Bad,
}

impl MarginClass {
    pub fn from_percent(margin: f64) -> Self {
        if margin > 30.0 {
            MarginClass::Good
        } else if margin > 10.0 {
            MarginClass::Warning
        } else {
            MarginClass::Bad
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MarginClass::Good => "margin-good",
            MarginClass::Warning => "margin-warning",
            MarginClass::Bad => "margin-bad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    Zero,
    Low,
    Medium,
    Good,
}

impl StockStatus {
    /// Negative unit counts are treated as zero.
    pub fn from_units(units: i64) -> Self {
        match units.max(0) {
            0 => StockStatus::Zero,
            1..=9 => StockStatus::Low,
            10..=49 => StockStatus::Medium,
            _ => StockStatus::Good,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Zero => "Out of Stock",
            StockStatus::Low => "Low Stock",
            StockStatus::Medium => "Medium",
            StockStatus::Good => "In Stock",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            StockStatus::Zero => "zero",
            StockStatus::Low => "low",
            StockStatus::Medium => "medium",
            StockStatus::Good => "good",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverStatus {
    Zero,
    Low,
    Good,
}

impl CoverStatus {
    /// Non-finite input counts as zero cover.
    pub fn from_days(days: f64) -> Self {
        let days = finite_or_zero(days);
        if days <= 0.0 {
            CoverStatus::Zero
        } else if days <= 14.0 {
            CoverStatus::Low
        } else {
            CoverStatus::Good
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            CoverStatus::Zero => "zero",
            CoverStatus::Low => "low",
            CoverStatus::Good => "good",
        }
    }

    /// Row highlight, empty for healthy rows.
    pub fn row_class(&self) -> &'static str {
        match self {
            CoverStatus::Zero => "row-alert-zero",
            CoverStatus::Low => "row-alert-low",
            CoverStatus::Good => "",
        }
    }
}

/// Stock divided by daily run rate; zero when the run rate is not positive.
pub fn days_of_cover(stock: i64, drr: f64) -> f64 {
    if !drr.is_finite() || drr <= 0.0 {
        return 0.0;
    }
    finite_or_zero(stock.max(0) as f64 / drr)
}

/// One table row ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub brand: String,
    pub sku: String,
    pub product: String,
    pub category: String,
    pub vendor: String,
    pub stock: String,
    pub stock_status: StockStatus,
    pub speed: String,
    pub days_cover: String,
    pub cover_status: CoverStatus,
    pub in_transit: String,
    pub po_status: String,
    pub po_required: bool,
    pub po_intent: String,
    pub upcoming: String,
    pub upcoming_days: String,
    pub mrp: String,
    pub selling_price: String,
    pub cogs: String,
    pub margin: String,
    pub margin_class: MarginClass,
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn units(value: Option<i64>) -> String {
    format_number_int(value.unwrap_or(0) as f64)
}

fn to_tenths(value: f64) -> f64 {
    finite_or_zero((value * 10.0).round() / 10.0)
}

pub fn project(row: &InventoryRow) -> DisplayRow {
    let stock = row.effective_stock();
    // classify on the value the table shows
    let cover = to_tenths(
        row.days_cover
            .unwrap_or_else(|| days_of_cover(stock, row.effective_drr())),
    );
    let margin = margin_percent(row.selling_price, row.mrp, row.cogs);
    let po_status = text_or(row.po_status.as_deref(), "-");

    DisplayRow {
        brand: text_or(row.brand.as_deref(), "-"),
        sku: text_or(row.gb_sku.as_deref(), "-"),
        product: text_or(row.product_title.as_deref(), "-"),
        category: text_or(row.category_leaf(), "Uncategorized"),
        vendor: text_or(row.vendor.as_deref(), "-"),
        stock: format_number_int(stock as f64),
        stock_status: StockStatus::from_units(stock),
        speed: format_number_with_decimals(row.effective_drr(), 1),
        days_cover: format_number_with_decimals(cover, 1),
        cover_status: CoverStatus::from_days(cover),
        in_transit: units(row.in_transit),
        po_required: po_status.to_ascii_lowercase().contains("needed")
            || po_status.to_ascii_lowercase().contains("required"),
        po_status,
        po_intent: row.po_intent.map(|v| format_number_int(v as f64)).unwrap_or_else(|| "-".to_string()),
        upcoming: units(row.upcoming_stock),
        upcoming_days: text_or(row.upcoming_days.as_deref(), ""),
        mrp: format_price(row.mrp),
        selling_price: format_price(row.selling_price),
        cogs: format_price(row.cogs),
        margin: format_margin(margin),
        margin_class: MarginClass::from_percent(margin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_percent() {
        assert_eq!(margin_percent(Some(100.0), None, Some(70.0)), 30.0);
        assert_eq!(margin_percent(Some(0.0), Some(100.0), Some(60.0)), 40.0);
        assert_eq!(margin_percent(Some(0.0), Some(0.0), Some(10.0)), 0.0);
        assert_eq!(margin_percent(None, None, None), 0.0);
        assert_eq!(format_margin(margin_percent(Some(100.0), None, Some(70.0))), "30.0%");
    }

    #[test]
    fn test_margin_never_nan() {
        assert_eq!(margin_percent(Some(f64::NAN), Some(100.0), Some(60.0)), 40.0);
        assert_eq!(margin_percent(Some(f64::INFINITY), None, Some(f64::INFINITY)), 0.0);
        assert_eq!(format_margin(f64::NAN), "0.0%");
    }

    #[test]
    fn test_stock_status_boundaries() {
        let cases = [
            (0, "Out of Stock"),
            (9, "Low Stock"),
            (10, "Medium"),
            (49, "Medium"),
            (50, "In Stock"),
            (-3, "Out of Stock"),
        ];
        for (units, label) in cases {
            assert_eq!(StockStatus::from_units(units).label(), label, "units = {units}");
        }
        assert_eq!(StockStatus::from_units(1).tag(), "low");
    }

    #[test]
    fn test_cover_status() {
        assert_eq!(CoverStatus::from_days(0.0), CoverStatus::Zero);
        assert_eq!(CoverStatus::from_days(-2.0), CoverStatus::Zero);
        assert_eq!(CoverStatus::from_days(0.5), CoverStatus::Low);
        assert_eq!(CoverStatus::from_days(14.0), CoverStatus::Low);
        assert_eq!(CoverStatus::from_days(14.1), CoverStatus::Good);
        assert_eq!(CoverStatus::from_days(f64::NAN), CoverStatus::Zero);
    }

    #[test]
    fn test_days_of_cover() {
        assert_eq!(days_of_cover(120, 12.0), 10.0);
        assert_eq!(days_of_cover(120, 0.0), 0.0);
        assert_eq!(days_of_cover(120, -1.0), 0.0);
    }

    #[test]
    fn test_currency_formats() {
        assert_eq!(format_price(Some(1234.5)), "₹1234.50");
        assert_eq!(format_price(None), "₹0.00");
        assert_eq!(format_currency(1234.5), "₹1,234.50");
        assert_eq!(format_currency_compact(99_999.0), "₹99,999.00");
        assert_eq!(format_currency_compact(12_300_000.0), "₹1.23Cr");
        assert_eq!(format_currency_compact(100_000.0), "₹1.00L");
        assert_eq!(format_currency_compact(9_999_999.0), "₹100.00L");
        assert_eq!(format_currency_compact(10_000_000.0), "₹1.00Cr");
    }

    #[test]
    fn test_margin_class() {
        assert_eq!(MarginClass::from_percent(30.5), MarginClass::Good);
        assert_eq!(MarginClass::from_percent(30.0), MarginClass::Warning);
        assert_eq!(MarginClass::from_percent(10.0), MarginClass::Bad);
    }

    #[test]
    fn test_project_row() {
        let row = InventoryRow {
            brand: Some("Urban Yog".to_string()),
            gb_sku: Some("200000254662".to_string()),
            category: Some("Beauty - Face - Serum".to_string()),
            current_stock: Some(0),
            in_transit: Some(300),
            speed: Some(12.0),
            po_status: Some("PO Needed".to_string()),
            po_intent: Some(720),
            upcoming_stock: Some(700),
            upcoming_days: Some("14d".to_string()),
            selling_price: Some(100.0),
            cogs: Some(70.0),
            ..Default::default()
        };
        let display = project(&row);
        assert_eq!(display.stock_status, StockStatus::Zero);
        assert_eq!(display.cover_status, CoverStatus::Zero);
        assert_eq!(display.category, "Serum");
        assert_eq!(display.in_transit, "300");
        assert_eq!(display.po_intent, "720");
        assert!(display.po_required);
        assert_eq!(display.margin, "30.0%");
        assert_eq!(display.product, "-");
    }

    #[test]
    fn test_project_computes_cover_when_missing() {
        let row = InventoryRow {
            fba_units_gb: Some(100),
            fbf_units_gb: Some(50),
            fba_drr: Some(5.0),
            ..Default::default()
        };
        let display = project(&row);
        assert_eq!(display.stock, "150");
        assert_eq!(display.stock_status, StockStatus::Good);
        assert_eq!(display.days_cover, "30.0");
        assert_eq!(display.cover_status, CoverStatus::Good);
    }

    #[test]
    fn test_cover_status_matches_shown_value() {
        let cover = |days: f64| {
            let display = project(&InventoryRow {
                days_cover: Some(days),
                ..Default::default()
            });
            (display.days_cover, display.cover_status)
        };
        assert_eq!(cover(0.04), ("0.0".to_string(), CoverStatus::Zero));
        assert_eq!(cover(0.4), ("0.4".to_string(), CoverStatus::Low));
        assert_eq!(cover(14.04), ("14.0".to_string(), CoverStatus::Low));
        assert_eq!(cover(14.06), ("14.1".to_string(), CoverStatus::Good));
    }
}
