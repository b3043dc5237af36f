use crate::shared::date_utils::{last_days, month_to_date, today_local};
use chrono::NaiveDate;
use leptos::prelude::*;
use thaw::*;

/// Two date inputs plus quick range buttons.
///
/// The inputs report raw `YYYY-MM-DD` text (empty when cleared). Quick
/// buttons report both ends at once, computed from the local calendar day.
#[component]
pub fn DateRangePicker(
    /// Start date, `YYYY-MM-DD` or empty
    #[prop(into)]
    date_from: Signal<String>,

    /// End date, `YYYY-MM-DD` or empty
    #[prop(into)]
    date_to: Signal<String>,

    on_from_change: Callback<String>,

    on_to_change: Callback<String>,

    /// Quick buttons and clear
    on_range: Callback<(Option<NaiveDate>, Option<NaiveDate>)>,

    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let quick_range = move |days: i64| {
        let (start, end) = last_days(today_local(), days);
        on_range.run((Some(start), Some(end)));
    };

    let on_month_to_date = move |_| {
        let (start, end) = month_to_date(today_local());
        on_range.run((Some(start), Some(end)));
    };

    let input_style = "
        margin-top: 4px;
        margin-bottom: 4px;
        padding: 0px 12px;
        font-size: 0.875rem;
        border: none;
        border-radius: var(--borderRadiusMedium, 4px);
        background: var(--colorNeutralBackground6, #fff);
        color: var(--colorNeutralForeground1, #242424);
        width: 130px;
    ";

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! { <Label>{l}</Label> })}

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    prop:value=date_from
                    on:input=move |ev| on_from_change.run(event_target_value(&ev))
                    style=input_style
                />

                <div>"—"</div>

                <input
                    type="date"
                    prop:value=date_to
                    on:input=move |ev| on_to_change.run(event_target_value(&ev))
                    style=input_style
                />

                <div class="date-range-picker-compact">
                    <ButtonGroup>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| quick_range(7)
                        >
                            "7D"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| quick_range(30)
                        >
                            "30D"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=on_month_to_date
                        >
                            "MTD"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| on_range.run((None, None))
                        >
                            "✕"
                        </Button>
                    </ButtonGroup>
                </div>
            </Flex>
        </Flex>
    }
}
