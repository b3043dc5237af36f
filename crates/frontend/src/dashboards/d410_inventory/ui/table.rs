use super::details::ProductDetails;
use super::widgets::{CategorySelect, LoadError};
use crate::dashboards::d410_inventory::config::DashboardConfig;
use crate::dashboards::d410_inventory::controller::InventoryController;
use crate::dashboards::d410_inventory::projection::{project, DisplayRow, StockStatus};
use crate::dashboards::d410_inventory::state::CategoryField;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{CardTone, StatCard};
use crate::shared::components::table::{
    format_number_int, format_number_with_decimals, SortableHeaderCell,
};
use crate::shared::date_utils::format_date;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::dashboards::d410_inventory::InventoryRow;
use leptos::prelude::*;
use thaw::*;

const COLUMNS: usize = 12;

impl CsvExportable for DisplayRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "SKU",
            "Product",
            "Brand",
            "Category",
            "MRP",
            "Selling Price",
            "COGS",
            "Margin",
            "Stock",
            "Stock Status",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.sku.clone(),
            self.product.clone(),
            self.brand.clone(),
            self.category.clone(),
            self.mrp.clone(),
            self.selling_price.clone(),
            self.cogs.clone(),
            self.margin.clone(),
            self.stock.clone(),
            self.stock_status.label().to_string(),
        ]
    }
}

fn stock_badge(units: Option<i64>) -> impl IntoView {
    let units = units.unwrap_or(0);
    let status = StockStatus::from_units(units);
    view! {
        <span class=format!("stock-badge stock-badge--{}", status.tag()) title=status.label()>
            {format_number_int(units as f64)}
        </span>
    }
}

/// Product inventory list backed by the `last-day` view.
#[component]
pub fn InventoryTable() -> impl IntoView {
    let ctrl = InventoryController::provide(DashboardConfig::inventory_table());
    let result = ctrl.result();
    let filters = ctrl.filters();

    let (selected, set_selected) = signal::<Option<InventoryRow>>(None);

    let is_loading = Signal::derive(move || result.with(|r| r.is_loading));
    let total_count = Signal::derive(move || result.with(|r| r.pagination.total_items));
    let stats = Memo::new(move |_| result.with(|r| r.stats.clone()));

    let sort_field = Signal::derive(move || filters.with(|f| f.sort_by.clone()));
    let sort_ascending = Signal::derive(move || filters.with(|f| f.sort_order.is_ascending()));
    let on_sort = Callback::new(move |field: String| ctrl.toggle_sort(&field));

    let export_page = move |_| {
        let rows = result.with_untracked(|r| r.rows.iter().map(project).collect::<Vec<_>>());
        if let Err(e) = export_to_csv(&rows, "inventory_page.csv") {
            log::error!("Failed to export page: {}", e);
        }
    };

    view! {
        <PageFrame page_id="d410_inventory--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("package")}
                    <h1 class="page__title">"Inventory"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || format_number_int(total_count.get() as f64)}</span>
                    </Badge>
                </div>

                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctrl.refresh()
                        disabled=is_loading
                    >
                        {icon("refresh")}
                        {move || if is_loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| ctrl.reset()>
                        {icon("x")}
                        " Reset"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=export_page>
                        {icon("download")}
                        " Page CSV"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| ctrl.export()>
                        {icon("download")}
                        " Export"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="metrics-grid">
                    <StatCard
                        label="TOTAL PRODUCTS".to_string()
                        icon_name="package"
                        value=Signal::derive(move || stats.with(|s| s.as_ref().and_then(|s| s.total_products).map(|v| format_number_int(v as f64))))
                    />
                    <StatCard
                        label="ACTIVE PRODUCTS".to_string()
                        icon_name="eye"
                        value=Signal::derive(move || stats.with(|s| s.as_ref().and_then(|s| s.active_products).map(|v| format_number_int(v as f64))))
                        tone=CardTone::Success
                    />
                    <StatCard
                        label="FBA STOCK".to_string()
                        icon_name="warehouse"
                        value=Signal::derive(move || stats.with(|s| s.as_ref().and_then(|s| s.total_fba_stock).map(format_number_int)))
                        tone=CardTone::Info
                    />
                    <StatCard
                        label="FBF STOCK".to_string()
                        icon_name="warehouse"
                        value=Signal::derive(move || stats.with(|s| s.as_ref().and_then(|s| s.total_fbf_stock).map(format_number_int)))
                        tone=CardTone::Info
                    />
                    <StatCard
                        label="AVG FBA DRR".to_string()
                        icon_name="trending-up"
                        value=Signal::derive(move || stats.with(|s| s.as_ref().and_then(|s| s.avg_fba_drr).map(|v| format_number_with_decimals(v, 1))))
                    />
                </div>

                <div class="filter-bar">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div class="filter-group">
                            <Label>"Search"</Label>
                            <SearchInput
                                value=Signal::derive(move || filters.with(|f| f.search_text.clone()))
                                on_change=Callback::new(move |text: String| ctrl.set_search(text))
                                placeholder="SKU, product, ASIN...".to_string()
                            />
                        </div>
                        <CategorySelect field=CategoryField::Brand />
                    </Flex>
                </div>

                <LoadError />

                {move || result.with(|r| r.is_loading && r.has_loaded).then(|| view! {
                    <div class="loading-line">
                        <Spinner size=SpinnerSize::Small />
                        <span>"Updating..."</span>
                    </div>
                })}

                <div class="table-container">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="SKU" sort_field="gb_sku" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <SortableHeaderCell label="Product" sort_field="product_title" min_width=220.0 current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <SortableHeaderCell label="Brand" sort_field="brand" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <SortableHeaderCell label="Category" sort_field="category" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <SortableHeaderCell label="MRP" sort_field="mrp" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <SortableHeaderCell label="Selling" sort_field="selling_price" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <SortableHeaderCell label="COGS" sort_field="cogs" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <TableHeaderCell min_width=80.0>"Margin"</TableHeaderCell>
                                <SortableHeaderCell label="FBA" sort_field="fba_units_gb" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <SortableHeaderCell label="FBF" sort_field="fbf_units_gb" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <SortableHeaderCell label="Created" sort_field="created_at" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                                <TableHeaderCell min_width=50.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            {move || {
                                let (rows, is_loading, has_loaded) =
                                    result.with(|r| (r.rows.clone(), r.is_loading, r.has_loaded));

                                if rows.is_empty() {
                                    let text = if is_loading && !has_loaded { "Loading..." } else { "No data" };
                                    return vec![view! {
                                        <TableRow>
                                            <TableCell attr:colspan=COLUMNS.to_string()>
                                                <TableCellLayout>
                                                    <span class="text-muted">{text}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }.into_any()];
                                }

                                rows.into_iter()
                                    .map(|row| {
                                        let display = project(&row);
                                        let created = row
                                            .created_at
                                            .as_deref()
                                            .map(format_date)
                                            .unwrap_or_else(|| "-".to_string());
                                        let fba = row.fba_units_gb;
                                        let fbf = row.fbf_units_gb;
                                        view! {
                                            <TableRow>
                                                <TableCell class="sku-cell"><TableCellLayout>{display.sku}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout truncate=true>{display.product}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{display.brand}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{display.category}</TableCellLayout></TableCell>
                                                <TableCell class="table__cell--right"><TableCellLayout>{display.mrp}</TableCellLayout></TableCell>
                                                <TableCell class="table__cell--right"><TableCellLayout>{display.selling_price}</TableCellLayout></TableCell>
                                                <TableCell class="table__cell--right"><TableCellLayout>{display.cogs}</TableCellLayout></TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <span class=format!("margin-chip {}", display.margin_class.css_class())>{display.margin}</span>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell class="table__cell--right"><TableCellLayout>{stock_badge(fba)}</TableCellLayout></TableCell>
                                                <TableCell class="table__cell--right"><TableCellLayout>{stock_badge(fbf)}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{created}</TableCellLayout></TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <button
                                                            class="button button--icon"
                                                            title="Details"
                                                            on:click=move |_| set_selected.set(Some(row.clone()))
                                                        >
                                                            {icon("eye")}
                                                        </button>
                                                    </TableCellLayout>
                                                </TableCell>
                                            </TableRow>
                                        }.into_any()
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </TableBody>
                    </Table>
                </div>

                <PaginationControls
                    current_page=Signal::derive(move || result.with(|r| r.pagination.page))
                    total_pages=Signal::derive(move || result.with(|r| r.pagination.total_pages))
                    total_count=total_count
                    page_size=Signal::derive(move || filters.with(|f| f.page_size))
                    on_page_change=Callback::new(move |page: u32| ctrl.go_to_page(page))
                    on_page_size_change=Callback::new(move |size: u32| ctrl.set_page_size(size))
                    page_size_options=ctrl.page_size_options()
                />
            </div>

            {move || selected.get().map(|row| view! {
                <ProductDetails row=row on_close=Callback::new(move |_: ()| set_selected.set(None)) />
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::to_csv;

    #[test]
    fn test_page_csv() {
        let row = InventoryRow {
            gb_sku: Some("GB-1".to_string()),
            product_title: Some("Serum, 30ml".to_string()),
            selling_price: Some(100.0),
            cogs: Some(70.0),
            current_stock: Some(5),
            ..Default::default()
        };
        let csv = to_csv(&[project(&row)]);
        let mut lines = csv.trim_start_matches('\u{FEFF}').lines();
        assert_eq!(
            lines.next(),
            Some("SKU,Product,Brand,Category,MRP,Selling Price,COGS,Margin,Stock,Stock Status")
        );
        assert_eq!(
            lines.next(),
            Some("GB-1,\"Serum, 30ml\",-,Uncategorized,₹0.00,₹100.00,₹70.00,30.0%,5,Low Stock")
        );
    }
}
