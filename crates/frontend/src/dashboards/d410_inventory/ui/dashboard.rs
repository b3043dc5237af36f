use super::sku_table::SkuTable;
use super::widgets::{AlertCards, CategorySelect, DateFilter, LoadError, MetricCards};
use crate::dashboards::d410_inventory::config::DashboardConfig;
use crate::dashboards::d410_inventory::controller::InventoryController;
use crate::dashboards::d410_inventory::state::CategoryField;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::format_number_int;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d410_inventory::{InventoryStats, NamedValue};
use leptos::prelude::*;
use thaw::*;

/// Bar widths relative to the largest entry, in percent.
fn bar_widths(items: &[NamedValue]) -> Vec<f64> {
    let max = items
        .iter()
        .filter_map(|i| i.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    items
        .iter()
        .map(|i| match i.value {
            Some(v) if max > 0.0 && v.is_finite() => (v.max(0.0) / max * 100.0).min(100.0),
            _ => 0.0,
        })
        .collect()
}

#[component]
fn BarList(
    title: &'static str,
    #[prop(into)] items: Signal<Vec<NamedValue>>,
    /// Appended to each value, e.g. `" days"`
    #[prop(optional)]
    unit: &'static str,
) -> impl IntoView {
    view! {
        <div class="chart-card">
            <h3 class="chart-card__title">{title}</h3>
            {move || {
                let items = items.get();
                if items.is_empty() {
                    return view! { <div class="text-muted">"No data"</div> }.into_any();
                }
                let widths = bar_widths(&items);
                items
                    .into_iter()
                    .zip(widths)
                    .map(|(item, width)| {
                        let class = if item.warehouse.unwrap_or(false) {
                            "bar-list__fill bar-list__fill--warehouse"
                        } else {
                            "bar-list__fill"
                        };
                        let value = item
                            .value
                            .map(|v| format!("{}{}", format_number_int(v), unit))
                            .unwrap_or_else(|| "-".to_string());
                        view! {
                            <div class="bar-list__row">
                                <span class="bar-list__label">{item.name}</span>
                                <div class="bar-list__track">
                                    <div class=class style=format!("width: {width:.1}%;")></div>
                                </div>
                                <span class="bar-list__value">{value}</span>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

/// Stock availability and replenishment planning across channels.
#[component]
pub fn ProductAvailabilityDashboard() -> impl IntoView {
    let ctrl = InventoryController::provide(DashboardConfig::product_availability());
    let result = ctrl.result();
    let filters = ctrl.filters();

    let is_loading = Signal::derive(move || result.with(|r| r.is_loading));
    let active_filters = Signal::derive(move || filters.with(|f| f.active_filter_count()));
    let stats = Memo::new(move |_| result.with(|r| r.stats.clone()));

    // Stamped whenever a response is applied.
    let applied_request = Memo::new(move |_| result.with(|r| r.request_id));
    let last_updated = Memo::new(move |_| {
        (applied_request.get() > 0).then(|| chrono::Local::now().format("%H:%M:%S").to_string())
    });

    let stats_list = move |pick: fn(&InventoryStats) -> &Vec<NamedValue>| {
        Signal::derive(move || stats.with(|s| s.as_ref().map(|s| pick(s).clone()).unwrap_or_default()))
    };

    view! {
        <PageFrame page_id="d410_inventory--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("box")}
                    <h1 class="page__title">"Product Availability"</h1>
                    {move || last_updated.get().map(|t| view! {
                        <span class="page__subtitle">{format!("Last updated {t}")}</span>
                    })}
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
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| ctrl.export()>
                        {icon("download")}
                        " Export"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <MetricCards />
                <AlertCards />

                <div class="filters-panel">
                    <div class="filters-panel__header">
                        {icon("filter")}
                        <span>"Filters"</span>
                        {move || (active_filters.get() > 0).then(|| view! {
                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                                {active_filters.get().to_string()}
                            </Badge>
                        })}
                        <Button
                            appearance=ButtonAppearance::Subtle
                            size=ButtonSize::Small
                            on_click=move |_| ctrl.reset()
                            disabled=Signal::derive(move || active_filters.get() == 0)
                        >
                            {icon("x")}
                            " Reset"
                        </Button>
                    </div>
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div class="filter-group">
                            <Label>"Search"</Label>
                            <SearchInput
                                value=Signal::derive(move || filters.with(|f| f.search_text.clone()))
                                on_change=Callback::new(move |text: String| ctrl.set_search(text))
                                placeholder="SKU or product...".to_string()
                            />
                        </div>
                        <CategorySelect field=CategoryField::Brand />
                        <CategorySelect field=CategoryField::Vendor />
                        <CategorySelect field=CategoryField::Location />
                        <CategorySelect field=CategoryField::Category />
                        <DateFilter />
                    </Flex>
                </div>

                <LoadError />

                {move || result.with(|r| r.is_initial_loading()).then(|| view! {
                    <div class="loading-line">
                        <Spinner size=SpinnerSize::Small />
                        <span>"Loading inventory..."</span>
                    </div>
                })}

                <div class="table-legend">
                    <span class="table-legend__item table-legend__item--zero">"Zero cover"</span>
                    <span class="table-legend__item table-legend__item--low">"Cover of 14 days or less"</span>
                </div>

                <SkuTable />

                <PaginationControls
                    current_page=Signal::derive(move || result.with(|r| r.pagination.page))
                    total_pages=Signal::derive(move || result.with(|r| r.pagination.total_pages))
                    total_count=Signal::derive(move || result.with(|r| r.pagination.total_items))
                    page_size=Signal::derive(move || filters.with(|f| f.page_size))
                    on_page_change=Callback::new(move |page: u32| ctrl.go_to_page(page))
                    on_page_size_change=Callback::new(move |size: u32| ctrl.set_page_size(size))
                    page_size_options=ctrl.page_size_options()
                />

                <div class="charts-grid">
                    <BarList title="Channel Distribution" items=stats_list(|s| &s.channel_distribution) />
                    <BarList title="Days Cover Trend" items=stats_list(|s| &s.days_cover_trend) unit=" days" />
                    <BarList title="Quick Commerce Stock" items=stats_list(|s| &s.quick_commerce) />
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, value: Option<f64>) -> NamedValue {
        NamedValue {
            name: name.to_string(),
            value,
            warehouse: None,
        }
    }

    #[test]
    fn test_bar_widths() {
        let items = vec![
            item("Amazon", Some(200.0)),
            item("Flipkart", Some(50.0)),
            item("Myntra", None),
            item("Returns", Some(-10.0)),
        ];
        assert_eq!(bar_widths(&items), vec![100.0, 25.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bar_widths_all_zero() {
        let items = vec![item("A", Some(0.0)), item("B", Some(f64::NAN))];
        assert_eq!(bar_widths(&items), vec![0.0, 0.0]);
    }
}
