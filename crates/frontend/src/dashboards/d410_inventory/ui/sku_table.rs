use crate::dashboards::d410_inventory::controller::use_inventory_controller;
use crate::dashboards::d410_inventory::projection::{project, DisplayRow};
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

const COLUMNS: usize = 11;

/// Planning view of the current page: stock, run rate, cover and PO state
/// per SKU, rows highlighted by days of cover.
#[component]
pub fn SkuTable() -> impl IntoView {
    let ctrl = use_inventory_controller();
    let result = ctrl.result();
    let filters = ctrl.filters();

    let sort_field = Signal::derive(move || filters.with(|f| f.sort_by.clone()));
    let sort_ascending = Signal::derive(move || filters.with(|f| f.sort_order.is_ascending()));
    let on_sort = Callback::new(move |field: String| ctrl.toggle_sort(&field));

    let rows = Memo::new(move |_| {
        result.with(|r| r.rows.iter().map(project).collect::<Vec<DisplayRow>>())
    });

    view! {
        <div class="table-container">
            <Table attr:style="width: 100%;" class="inventory-table">
                <TableHeader>
                    <TableRow>
                        <SortableHeaderCell label="Brand" sort_field="brand" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                        <SortableHeaderCell label="SKU" sort_field="gb_sku" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                        <SortableHeaderCell label="Product" sort_field="product_title" min_width=220.0 current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                        <SortableHeaderCell label="Current Stock" sort_field="current_stock" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                        <SortableHeaderCell label="Speed" sort_field="speed" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                        <SortableHeaderCell label="Days Cover" sort_field="days_cover" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                        <SortableHeaderCell label="In Transit" sort_field="in_transit" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                        <SortableHeaderCell label="Vendor" sort_field="vendor" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                        <TableHeaderCell min_width=110.0>"PO Status"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"PO Intent"</TableHeaderCell>
                        <SortableHeaderCell label="Upcoming Stock" sort_field="upcoming_stock" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                    </TableRow>
                </TableHeader>

                <TableBody>
                    {move || {
                        let (is_loading, has_loaded) = result.with(|r| (r.is_loading, r.has_loaded));
                        let data = rows.get();

                        if data.is_empty() {
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

                        data.into_iter().map(sku_row).collect::<Vec<_>>()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}

fn sku_row(row: DisplayRow) -> AnyView {
    let po_cell = if row.po_required {
        view! {
            <span class="po-status-btn">
                {icon("shopping-bag")}
                {row.po_status.clone()}
            </span>
        }
        .into_any()
    } else {
        view! { <span class="po-status-empty">{row.po_status.clone()}</span> }.into_any()
    };

    let upcoming_days = (!row.upcoming_days.is_empty())
        .then(|| view! { <span class="upcoming-days">{format!(" in {}", row.upcoming_days)}</span> });

    view! {
        <TableRow class=row.cover_status.row_class()>
            <TableCell><TableCellLayout><span class="brand-tag">{row.brand}</span></TableCellLayout></TableCell>
            <TableCell class="sku-cell"><TableCellLayout>{row.sku}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout truncate=true>{row.product}</TableCellLayout></TableCell>
            <TableCell class="table__cell--right">
                <TableCellLayout>
                    <span class=format!("stock-value {}", row.stock_status.tag())>{row.stock}</span>
                </TableCellLayout>
            </TableCell>
            <TableCell class="table__cell--right"><TableCellLayout>{row.speed}</TableCellLayout></TableCell>
            <TableCell class="table__cell--right">
                <TableCellLayout>
                    <span class=format!("days-cover {}", row.cover_status.tag())>{row.days_cover}</span>
                </TableCellLayout>
            </TableCell>
            <TableCell class="table__cell--right"><TableCellLayout>{row.in_transit}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{row.vendor}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{po_cell}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{row.po_intent}</TableCellLayout></TableCell>
            <TableCell class="table__cell--right">
                <TableCellLayout>
                    <span class="upcoming-stock">{row.upcoming}{upcoming_days}</span>
                </TableCellLayout>
            </TableCell>
        </TableRow>
    }
    .into_any()
}
