use crate::shared::icons::icon;
use leptos::prelude::*;

/// Visual accent of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl CardTone {
    fn modifier(&self) -> &'static str {
        match self {
            CardTone::Neutral => "",
            CardTone::Info => " stat-card--info",
            CardTone::Success => " stat-card--success",
            CardTone::Warning => " stat-card--warning",
            CardTone::Danger => " stat-card--error",
        }
    }
}

/// Metric card. Pass `on_click` to make it a toggle; `active` marks the
/// selected state.
#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Already formatted value; `None` renders a dash
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(optional, default = CardTone::Neutral)]
    tone: CardTone,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
    #[prop(into, optional)]
    active: Signal<bool>,
    #[prop(optional)]
    on_click: Option<Callback<()>>,
) -> impl IntoView {
    let clickable = on_click.is_some();

    let class = move || {
        let mut class = format!("stat-card{}", tone.modifier());
        if clickable {
            class.push_str(" stat-card--clickable");
        }
        if active.get() {
            class.push_str(" stat-card--active");
        }
        class
    };

    let formatted = move || value.get().unwrap_or_else(|| "—".to_string());

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div
            class=class
            role=if clickable { "button" } else { "group" }
            on:click=move |_| {
                if let Some(cb) = on_click {
                    cb.run(());
                }
            }
        >
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {subtitle_view}
            </div>
        </div>
    }
}
