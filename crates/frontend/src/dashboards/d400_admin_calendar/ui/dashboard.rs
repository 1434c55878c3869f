use chrono::{Datelike, NaiveDate};
use contracts::domain::a003_reservation::aggregate::Reservation;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;
use thaw::*;

use super::detail::ReservationDetail;
use crate::dashboards::d400_admin_calendar::api::{self, CalendarData};
use crate::dashboards::d400_admin_calendar::model::{
    bucket_by_date, derive_status, month_grid, CalendarStatus, StatusCounts,
};
use crate::shared::components::month_selector::MonthSelector;
use crate::shared::config::config;
use crate::shared::date_utils::{format_long_date, today, WEEKDAY_SHORT};
use crate::shared::icons::icon;
use crate::shared::notice::use_notice;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::poll::{accept_ticket, issue_ticket, use_polling, PollGuard};

#[component]
pub fn AdminCalendarDashboard() -> impl IntoView {
    let notices = use_notice();
    let now = today();
    let period = RwSignal::new((now.year(), now.month()));
    let selected_day = RwSignal::new(Some(now));
    let data = RwSignal::new(CalendarData::default());
    let loading = RwSignal::new(false);
    let last_error = RwSignal::new(Option::<String>::None);
    let open_reservation = RwSignal::new(Option::<Reservation>::None);
    let guard = StoredValue::new(PollGuard::new());

    let fetch = move || {
        let Some(ticket) = issue_ticket(guard) else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_all().await;
            if !accept_ticket(guard, ticket, "calendar") {
                return;
            }
            loading.set(false);
            match result {
                Ok(fresh) => {
                    last_error.set(None);
                    // Keep an open detail in step with the refreshed row
                    if let Some(current) = open_reservation.get_untracked() {
                        if let Some(updated) = fresh.reservations.iter().find(|r| r.id == current.id) {
                            if *updated != current {
                                open_reservation.set(Some(updated.clone()));
                            }
                        }
                    }
                    data.set(fresh);
                }
                Err(e) => {
                    // Report a failure once, not on every poll
                    if last_error.get_untracked().is_none() {
                        notices.error(format!("Gagal memuat data kalender: {}", e));
                    }
                    last_error.set(Some(e.to_string()));
                }
            }
        });
    };

    use_polling(config().app.poll_interval_ms, fetch);

    let buckets: Memo<BTreeMap<NaiveDate, Vec<Reservation>>> =
        Memo::new(move |_| data.with(|d| bucket_by_date(&d.reservations)));

    let month_counts = Signal::derive(move || {
        let (year, month) = period.get();
        buckets.with(|b| {
            let in_month: Vec<Reservation> = b
                .iter()
                .filter(|(date, _)| date.year() == year && date.month() == month)
                .flat_map(|(_, items)| items.iter().cloned())
                .collect();
            StatusCounts::of(&in_month)
        })
    });

    let on_period = Callback::new(move |(year, month): (i32, u32)| {
        period.set((year, month));
        let today = today();
        selected_day.set(if today.year() == year && today.month() == month {
            Some(today)
        } else {
            NaiveDate::from_ymd_opt(year, month, 1)
        });
    });

    let on_assigned = Callback::new(move |_| fetch());
    let on_close = Callback::new(move |_| open_reservation.set(None));

    let day_cell = move |date: NaiveDate| {
        let counts = buckets.with(|b| b.get(&date).map(|items| StatusCounts::of(items)).unwrap_or_default());
        let is_today = date == today();
        let class = move || {
            let mut class = String::from("calendar__day");
            if is_today {
                class.push_str(" calendar__day--today");
            }
            if selected_day.get() == Some(date) {
                class.push_str(" calendar__day--selected");
            }
            if counts.total() > 0 {
                class.push_str(" calendar__day--busy");
            }
            class
        };
        view! {
            <td class=class on:click=move |_| selected_day.set(Some(date))>
                <div class="calendar__day-number">{date.day()}</div>
                <div class="calendar__day-counts">
                    {CalendarStatus::ALL.into_iter()
                        .filter(|status| counts.get(*status) > 0)
                        .map(|status| view! {
                            <span class=status.class() title=status.label()>{counts.get(status)}</span>
                        })
                        .collect_view()}
                </div>
            </td>
        }
    };

    view! {
        <PageFrame page_id="d400_admin_calendar--dashboard" category=PAGE_CAT_DASHBOARD title="Kalender Reservasi">
            <div class="page__toolbar">
                <div class="page__toolbar-left">
                    <MonthSelector value=period on_change=on_period />
                </div>
                <div class="page__toolbar-right">
                    <Flex gap=FlexGap::Small>
                        {CalendarStatus::ALL.into_iter().map(|status| view! {
                            <span class=status.class()>
                                {move || format!("{}: {}", status.label(), month_counts.get().get(status))}
                            </span>
                        }).collect_view()}
                    </Flex>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| fetch()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <Show when=move || last_error.get().is_some()>
                <div class="alert alert--error">
                    {move || format!("Data terakhir gagal dimuat: {}", last_error.get().unwrap_or_default())}
                </div>
            </Show>

            <div class="calendar-layout">
                <table class="calendar">
                    <thead>
                        <tr>
                            {WEEKDAY_SHORT.iter().map(|d| view! { <th>{*d}</th> }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let (year, month) = period.get();
                            month_grid(year, month).into_iter().map(|week| view! {
                                <tr>
                                    {week.into_iter().map(|day| match day {
                                        Some(date) => day_cell(date).into_any(),
                                        None => view! { <td class="calendar__day calendar__day--empty"></td> }.into_any(),
                                    }).collect_view()}
                                </tr>
                            }).collect_view()
                        }}
                    </tbody>
                </table>

                <div class="calendar-day-panel">
                    {move || selected_day.get().map(|date| {
                        let items = buckets.with(|b| b.get(&date).cloned().unwrap_or_default());
                        view! {
                            <h3 class="calendar-day-panel__title">{format_long_date(date)}</h3>
                            {if items.is_empty() {
                                view! { <p class="empty-state">"Tidak ada reservasi"</p> }.into_any()
                            } else {
                                items.into_iter().map(|r| {
                                    let status = derive_status(&r);
                                    let customer = r.user.as_ref().map(|u| u.full_name.clone()).unwrap_or_else(|| "-".into());
                                    let service = data.with_untracked(|d| d.service_name(&r));
                                    let slot = r.time_slot.clone();
                                    view! {
                                        <div class="calendar-day-panel__item" on:click=move |_| open_reservation.set(Some(r.clone()))>
                                            <span class="calendar-day-panel__slot">{slot}</span>
                                            <span class="calendar-day-panel__customer">{customer}</span>
                                            <span class="calendar-day-panel__service">{service}</span>
                                            <span class=status.class()>{status.label()}</span>
                                        </div>
                                    }
                                }).collect_view().into_any()
                            }}
                        }
                    })}
                </div>
            </div>

            {move || open_reservation.get().map(|reservation| {
                let (service_name, employee_name, employees) = data.with_untracked(|d| {
                    (d.service_name(&reservation), d.employee_name(&reservation), d.employees.clone())
                });
                view! {
                    <ReservationDetail
                        reservation=reservation
                        service_name=service_name
                        employee_name=employee_name
                        employees=employees
                        on_assigned=on_assigned
                        on_close=on_close
                    />
                }
            })}
        </PageFrame>
    }
}
