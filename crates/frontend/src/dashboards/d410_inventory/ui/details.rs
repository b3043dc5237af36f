use crate::dashboards::d410_inventory::projection::{
    format_margin, format_price, margin_percent, MarginClass, StockStatus,
};
use crate::shared::components::table::{format_number_int, format_number_with_decimals};
use crate::shared::date_utils::format_datetime;
use crate::shared::modal::Modal;
use contracts::dashboards::d410_inventory::InventoryRow;
use leptos::prelude::*;
use thaw::*;

fn text(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}

fn units(value: Option<i64>) -> String {
    format_number_int(value.unwrap_or(0) as f64)
}

fn rate(value: Option<f64>) -> String {
    format_number_with_decimals(value.unwrap_or(0.0), 1)
}

fn detail_item(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-item">
            <span class="detail-label">{label}</span>
            <span class="detail-value">{value}</span>
        </div>
    }
}

fn stock_chip(label: &'static str, units: Option<i64>) -> impl IntoView {
    let status = StockStatus::from_units(units.unwrap_or(0));
    let color = match status {
        StockStatus::Zero => BadgeColor::Danger,
        StockStatus::Low => BadgeColor::Warning,
        StockStatus::Medium => BadgeColor::Informative,
        StockStatus::Good => BadgeColor::Success,
    };
    view! {
        <div class="stock-chip">
            <span class="detail-label">{label}</span>
            <span class="detail-value">{format_number_int(units.unwrap_or(0) as f64)}</span>
            <Badge appearance=BadgeAppearance::Tint color=color>{status.label()}</Badge>
        </div>
    }
}

/// Marketplace channels with a non-zero count, in display order.
fn quick_commerce(row: &InventoryRow) -> Vec<(&'static str, i64)> {
    [
        ("Instamart", row.instamart_stock),
        ("Zepto", row.zepto_stock),
        ("Blinkit B2B", row.blinkit_b2b_stock),
        ("Blinkit B2C", row.blinkit_b2c_stock),
        ("Nykaa", row.nykaa_stock),
        ("Reliance", row.reliance_stock),
        ("BigBasket", row.bigbasket_stock),
        ("Meesho", row.meesho_stock),
        ("Purple", row.purple_stock),
    ]
    .into_iter()
    .filter_map(|(name, units)| units.filter(|u| *u != 0).map(|u| (name, u)))
    .collect()
}

/// Full record of one inventory row.
#[component]
pub fn ProductDetails(row: InventoryRow, on_close: Callback<()>) -> impl IntoView {
    let title = text(&row.product_title);
    let subtitle = format!("SKU: {} | ASIN: {}", text(&row.gb_sku), text(&row.asin));

    let margin = margin_percent(row.selling_price, row.mrp, row.cogs);
    let margin_class = MarginClass::from_percent(margin).css_class();
    let channels = quick_commerce(&row);
    let created = row
        .created_at
        .as_deref()
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string());
    let extra = row
        .extra
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect::<Vec<_>>();

    view! {
        <Modal title=title subtitle=subtitle on_close=on_close>
            <div class="details-section">
                <h3 class="details-section__title">"Pricing"</h3>
                <div class="details-grid">
                    {detail_item("MRP", format_price(row.mrp))}
                    {detail_item("Selling Price", format_price(row.selling_price))}
                    {detail_item("COGS", format_price(row.cogs))}
                    <div class="detail-item">
                        <span class="detail-label">"Margin"</span>
                        <span class=format!("margin-chip {margin_class}")>{format_margin(margin)}</span>
                    </div>
                </div>
            </div>

            <div class="details-section">
                <h3 class="details-section__title">"Stock Summary"</h3>
                <div class="details-grid">
                    {stock_chip("FBA Units", row.fba_units_gb)}
                    {stock_chip("FBF Units", row.fbf_units_gb)}
                    {stock_chip("Myntra Units", row.myntra_units_gb)}
                </div>
            </div>

            <div class="details-section">
                <h3 class="details-section__title">"Sales Performance"</h3>
                <div class="details-grid">
                    {detail_item("FBA DRR", rate(row.fba_drr))}
                    {detail_item("FBF DRR", rate(row.fbf_drr))}
                    {detail_item("Myntra DRR", rate(row.myntra_drr))}
                    {detail_item("Swiggy DRR (30d)", rate(row.swiggy_drr_30d))}
                    {detail_item("Marketplace Speed (30d)", rate(row.marketplace_speed_30_days))}
                    {detail_item("Quick Commerce Speed (30d)", rate(row.quickcomm_speed_30_days))}
                    {detail_item("B2B Speed (30d)", rate(row.b2b_speed_30_days))}
                    {detail_item("Total Day Cover", rate(row.total_day_cover))}
                </div>
            </div>

            <div class="details-section">
                <h3 class="details-section__title">"Warehouse"</h3>
                <div class="details-grid">
                    {detail_item("Increff Units", units(row.increff_units))}
                    {detail_item("PC Units", units(row.pc_units))}
                    {detail_item("Allocated / On Hold", units(row.allocated_on_hold))}
                    {detail_item("Warehouse Days Cover", rate(row.warehouse_total_days_of_cover))}
                    {detail_item("Increff Day Cover", rate(row.increff_day_cover))}
                </div>
            </div>

            {(!channels.is_empty()).then(|| view! {
                <div class="details-section">
                    <h3 class="details-section__title">"Quick Commerce"</h3>
                    <div class="details-grid">
                        {channels
                            .into_iter()
                            .map(|(name, units)| detail_item(name, format_number_int(units as f64)))
                            .collect_view()}
                    </div>
                </div>
            })}

            <div class="details-section">
                <h3 class="details-section__title">"Additional Information"</h3>
                <div class="details-grid">
                    {detail_item("Brand", text(&row.brand))}
                    {detail_item("Category", text(&row.category))}
                    {detail_item("Vendor", text(&row.vendor))}
                    {detail_item("EAN", text(&row.ean_code))}
                    {detail_item("Pack Size", text(&row.pack_size))}
                    {detail_item("Multiple Listing", text(&row.multiple_listing))}
                    {detail_item("Bundle", if row.is_bundle.unwrap_or(false) { "Yes" } else { "No" }.to_string())}
                    {detail_item("Launch Date", text(&row.launch_date))}
                    {detail_item("Created", created)}
                </div>
            </div>

            {(!extra.is_empty()).then(|| view! {
                <div class="details-section">
                    <h3 class="details-section__title">"Other Fields"</h3>
                    <div class="details-grid details-grid--raw">
                        {extra
                            .into_iter()
                            .map(|(key, value)| view! {
                                <div class="detail-item">
                                    <span class="detail-label">{key}</span>
                                    <span class="detail-value">{value}</span>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            })}
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_commerce_skips_empty_channels() {
        let row = InventoryRow {
            zepto_stock: Some(12),
            nykaa_stock: Some(0),
            purple_stock: Some(3),
            ..Default::default()
        };
        assert_eq!(quick_commerce(&row), vec![("Zepto", 12), ("Purple", 3)]);
    }

    #[test]
    fn test_text_fallback() {
        assert_eq!(text(&None), "-");
        assert_eq!(text(&Some("  ".to_string())), "-");
        assert_eq!(text(&Some(" Urban Yog ".to_string())), "Urban Yog");
    }
}
