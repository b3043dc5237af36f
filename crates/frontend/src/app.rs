use crate::dashboards::{InventoryTable, ProductAvailabilityDashboard};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPage {
    ProductAvailability,
    Inventory,
}

impl AppPage {
    pub const ALL: [AppPage; 2] = [AppPage::ProductAvailability, AppPage::Inventory];

    pub fn title(&self) -> &'static str {
        match self {
            AppPage::ProductAvailability => "Product Availability",
            AppPage::Inventory => "Inventory",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            AppPage::ProductAvailability => "box",
            AppPage::Inventory => "package",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(AppPage::ProductAvailability);

    view! {
        <div class="app">
            <div class="top-header">
                <div class="top-header__brand">
                    <span class="top-header__title">"Inventory"</span>
                </div>
                <nav class="top-header__nav">
                    {AppPage::ALL
                        .into_iter()
                        .map(|p| view! {
                            <button
                                class=move || if page.get() == p {
                                    "top-header__nav-btn top-header__nav-btn--active"
                                } else {
                                    "top-header__nav-btn"
                                }
                                on:click=move |_| set_page.set(p)
                            >
                                {icon(p.icon_name())}
                                <span>{p.title()}</span>
                            </button>
                        })
                        .collect_view()}
                </nav>
            </div>

            // Each page owns its controller; switching pages starts fresh.
            <main class="app__content">
                {move || match page.get() {
                    AppPage::ProductAvailability => view! { <ProductAvailabilityDashboard /> }.into_any(),
                    AppPage::Inventory => view! { <InventoryTable /> }.into_any(),
                }}
            </main>
        </div>
    }
}
