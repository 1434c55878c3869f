use crate::shared::date_utils::{format_month, today};
use chrono::Datelike;
use leptos::prelude::*;

/// Month after / before `(year, month)`; `delta` is +1 or -1
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

/// Previous / current / next month navigation
#[component]
pub fn MonthSelector(
    /// (year, month 1..=12)
    #[prop(into)]
    value: Signal<(i32, u32)>,
    on_change: Callback<(i32, u32)>,
) -> impl IntoView {
    let step = move |delta: i32| {
        let (year, month) = value.get_untracked();
        on_change.run(shift_month(year, month, delta));
    };

    let go_today = move |_| {
        let now = today();
        on_change.run((now.year(), now.month()));
    };

    view! {
        <div class="month-selector">
            <button class="month-selector__btn" on:click=move |_| step(-1) title="Bulan sebelumnya">
                {crate::shared::icons::icon("chevron-left")}
            </button>
            <span class="month-selector__label">
                {move || {
                    let (year, month) = value.get();
                    format_month(year, month)
                }}
            </span>
            <button class="month-selector__btn" on:click=move |_| step(1) title="Bulan berikutnya">
                {crate::shared::icons::icon("chevron-right")}
            </button>
            <button class="month-selector__today" on:click=go_today>"Hari ini"</button>
        </div>
    }
}
