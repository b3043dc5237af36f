use crate::dashboards::d410_inventory::controller::use_inventory_controller;
use crate::dashboards::d410_inventory::projection::format_currency_compact;
use crate::dashboards::d410_inventory::state::CategoryField;
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::stat_card::{CardTone, StatCard};
use crate::shared::components::table::{format_number_int, format_number_with_decimals};
use crate::shared::date_utils::format_iso_date;
use crate::shared::icons::icon;
use chrono::NaiveDate;
use contracts::dashboards::d410_inventory::{FilterOptions, InventoryStats, KpiFilter};
use leptos::prelude::*;
use thaw::*;

fn count(value: Option<u64>) -> Option<String> {
    value.map(|v| format_number_int(v as f64))
}

fn units(value: Option<f64>) -> Option<String> {
    value.map(format_number_int)
}

/// Formatted stats field; `None` while stats are missing.
fn stat<T>(
    stats: Memo<Option<InventoryStats>>,
    pick: impl Fn(&InventoryStats) -> Option<T> + Send + Sync + 'static,
    fmt: impl Fn(Option<T>) -> Option<String> + Send + Sync + 'static,
) -> Signal<Option<String>> {
    Signal::derive(move || stats.with(|s| fmt(s.as_ref().and_then(|s| pick(s)))))
}

/// Headline stock metrics. OVER INVENTORY doubles as a KPI filter.
#[component]
pub fn MetricCards() -> impl IntoView {
    let ctrl = use_inventory_controller();
    let result = ctrl.result();
    let filters = ctrl.filters();
    let stats = Memo::new(move |_| result.with(|r| r.stats.clone()));

    let week_change = Signal::derive(move || {
        stats.with(|s| {
            s.as_ref()
                .and_then(|s| s.week_over_week_change)
                .map(|pct| format!("{}% vs last week", format_number_with_decimals(pct, 1)))
        })
    });

    view! {
        <div class="metrics-grid">
            <StatCard
                label="TOTAL STOCK".to_string()
                icon_name="box"
                value=stat(stats, |s| s.total_stock, units)
                tone=CardTone::Info
                subtitle=week_change
            />
            <StatCard
                label="IN TRANSIT".to_string()
                icon_name="truck"
                value=stat(stats, |s| s.in_transit, units)
                tone=CardTone::Info
            />
            <StatCard
                label="CURRENT STOCK".to_string()
                icon_name="warehouse"
                value=stat(stats, |s| s.current_stock, units)
                tone=CardTone::Success
                subtitle=Signal::derive(|| Some("WH + Marketplace".to_string()))
            />
            <StatCard
                label=KpiFilter::OverInventory.label().to_string()
                icon_name="trending-up"
                value=stat(stats, |s| s.over_inventory, units)
                tone=CardTone::Warning
                subtitle=Signal::derive(|| Some("> 90 Days Cover".to_string()))
                active=Signal::derive(move || filters.get().kpi_filter == Some(KpiFilter::OverInventory))
                on_click=Callback::new(move |_: ()| ctrl.toggle_kpi(KpiFilter::OverInventory))
            />
            <StatCard
                label="INVENTORY (COGS)".to_string()
                icon_name="shopping-bag"
                value=stat(stats, |s| s.inventory_value, |v: Option<f64>| v.map(format_currency_compact))
                tone=CardTone::Info
                subtitle=Signal::derive(|| Some("Total Value".to_string()))
            />
        </div>
    }
}

/// Alert cards. Clicking one filters the table; clicking it again clears.
#[component]
pub fn AlertCards() -> impl IntoView {
    let ctrl = use_inventory_controller();
    let result = ctrl.result();
    let filters = ctrl.filters();
    let stats = Memo::new(move |_| result.with(|r| r.stats.clone()));

    let is_active = move |kpi: KpiFilter| Signal::derive(move || filters.get().kpi_filter == Some(kpi));
    let toggle = move |kpi: KpiFilter| Callback::new(move |_: ()| ctrl.toggle_kpi(kpi));

    let stock_alert_split = Signal::derive(move || {
        stats.with(|s| {
            let s = s.as_ref()?;
            match (s.zero_stock, s.low_stock) {
                (None, None) => None,
                (zero, low) => Some(format!("{} Zero | {} Low", zero.unwrap_or(0), low.unwrap_or(0))),
            }
        })
    });

    view! {
        <div class="alert-metrics-grid">
            <StatCard
                label=KpiFilter::StockAlert.label().to_string()
                icon_name="alert-triangle"
                value=stat(stats, |s| s.stock_alert, count)
                tone=CardTone::Danger
                subtitle=stock_alert_split
                active=is_active(KpiFilter::StockAlert)
                on_click=toggle(KpiFilter::StockAlert)
            />
            <StatCard
                label="AVG DAYS COVER".to_string()
                icon_name="package"
                value=stat(stats, |s| s.avg_days_cover, units)
                tone=CardTone::Info
            />
            <StatCard
                label=KpiFilter::UpcomingStock.label().to_string()
                icon_name="package"
                value=stat(stats, |s| s.upcoming_stock, count)
                tone=CardTone::Info
                subtitle=Signal::derive(|| Some("Pending Receipts".to_string()))
                active=is_active(KpiFilter::UpcomingStock)
                on_click=toggle(KpiFilter::UpcomingStock)
            />
            <StatCard
                label=KpiFilter::PoRequired.label().to_string()
                icon_name="package"
                value=stat(stats, |s| s.po_required, count)
                tone=CardTone::Warning
                subtitle=Signal::derive(|| Some("Release to vendor".to_string()))
                active=is_active(KpiFilter::PoRequired)
                on_click=toggle(KpiFilter::PoRequired)
            />
        </div>
    }
}

fn options_for(options: &FilterOptions, field: CategoryField) -> Vec<String> {
    match field {
        CategoryField::Brand => options.available_brands.clone(),
        CategoryField::Vendor => options.available_vendors.clone(),
        CategoryField::Location => options.available_locations.clone(),
        CategoryField::Category => options.available_categories.clone(),
    }
}

/// Select for one categorical filter, fed by the options of the last response.
#[component]
pub fn CategorySelect(field: CategoryField) -> impl IntoView {
    let ctrl = use_inventory_controller();
    let result = ctrl.result();
    let filters = ctrl.filters();

    let options = Memo::new(move |_| result.with(|r| options_for(&r.filter_options, field)));
    let selected = move || {
        filters.with(|f| f.category_value(field).unwrap_or(field.sentinel()).to_string())
    };

    view! {
        <div class="filter-group">
            <Label>{field.label()}</Label>
            <select
                class="filter-select"
                prop:value=selected
                on:change=move |ev| ctrl.set_category(field, event_target_value(&ev))
            >
                <option value=field.sentinel()>{field.sentinel()}</option>
                {move || {
                    let current = selected();
                    let mut values = options.get();
                    // keep the active value selectable after the options change
                    if current != field.sentinel() && !values.contains(&current) {
                        values.insert(0, current.clone());
                    }
                    values
                        .into_iter()
                        .map(|v| {
                            let is_selected = v == current;
                            view! { <option value=v.clone() selected=is_selected>{v.clone()}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

#[component]
pub fn DateFilter() -> impl IntoView {
    let ctrl = use_inventory_controller();
    let filters = ctrl.filters();

    view! {
        <DateRangePicker
            date_from=Signal::derive(move || filters.get().date_range.start.map(format_iso_date).unwrap_or_default())
            date_to=Signal::derive(move || filters.get().date_range.end.map(format_iso_date).unwrap_or_default())
            on_from_change=Callback::new(move |raw: String| ctrl.set_start_date(raw))
            on_to_change=Callback::new(move |raw: String| ctrl.set_end_date(raw))
            on_range=Callback::new(move |(start, end): (Option<NaiveDate>, Option<NaiveDate>)| {
                ctrl.set_date_range(start, end)
            })
            label="Created".to_string()
        />
    }
}

/// Error display: a full panel while nothing has loaded yet, an inline
/// banner above the stale data afterwards.
#[component]
pub fn LoadError() -> impl IntoView {
    let ctrl = use_inventory_controller();
    let result = ctrl.result();

    move || {
        let (message, first_load) =
            result.with(|r| (r.error.clone(), r.is_first_load_failure()));
        let message = message?;
        let retry = move |_| ctrl.retry();

        Some(if first_load {
            view! {
                <div class="load-error-panel">
                    {icon("alert-triangle")}
                    <div class="load-error-panel__text">{message}</div>
                    <Button appearance=ButtonAppearance::Primary on_click=retry>
                        "Retry"
                    </Button>
                </div>
            }
            .into_any()
        } else {
            view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <div style="display: flex; align-items: center; gap: var(--spacing-sm); flex-wrap: wrap;">
                        <span>{message}</span>
                        <Button appearance=ButtonAppearance::Transparent size=ButtonSize::Small on_click=retry>
                            "Retry"
                        </Button>
                    </div>
                </MessageBar>
            }
            .into_any()
        })
    }
}
