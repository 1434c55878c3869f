use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::InspectionForm;
use crate::domain::a004_assignment::api::{self as assignment_api, AssignmentTask};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::notice::use_notice;
use crate::shared::config::config;
use crate::shared::number_format::{format_rupiah, format_volume};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::poll::{accept_ticket, issue_ticket, use_polling, PollGuard, PollHealth};

/// Open tasks first, each group by reservation date ascending
pub fn order_tasks(tasks: &mut [AssignmentTask]) {
    tasks.sort_by(|a, b| {
        let date = |t: &AssignmentTask| t.reservation.as_ref().map(|r| r.reservation_date.clone());
        a.inspected
            .cmp(&b.inspected)
            .then_with(|| date(a).cmp(&date(b)))
    });
}

#[component]
pub fn EmployeeTasksPage() -> impl IntoView {
    let notices = use_notice();
    let tasks = RwSignal::new(Vec::<AssignmentTask>::new());
    let loading = RwSignal::new(false);
    let inspecting = RwSignal::new(Option::<(EntityId, String)>::None);

    let guard = StoredValue::new(PollGuard::new());
    let health = StoredValue::new(PollHealth::default());

    // Also refreshed on a timer so newly assigned work shows up
    let load = move || {
        let Some(ticket) = issue_ticket(guard) else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let result = assignment_api::list_mine().await;
            if !accept_ticket(guard, ticket, "tasks") {
                return;
            }
            loading.set(false);
            let report = health.try_update_value(|h| h.record(result.is_ok())).unwrap_or(false);
            match result {
                Ok(mut list) => {
                    order_tasks(&mut list);
                    tasks.set(list);
                }
                Err(e) if report => notices.error(format!("Gagal memuat tugas: {}", e)),
                Err(e) => log::warn!("Task refresh failed again: {}", e),
            }
        });
    };

    use_polling(config().app.poll_interval_ms, load);

    let on_saved = Callback::new(move |_| {
        if let Some((id, _)) = inspecting.get_untracked() {
            tasks.update(|list| {
                if let Some(task) = list.iter_mut().find(|t| t.assignment.id == id) {
                    task.inspected = true;
                }
                order_tasks(list);
            });
        }
        inspecting.set(None);
        // Supersedes any refresh that started before the save
        load();
    });
    let on_close = Callback::new(move |_| inspecting.set(None));

    view! {
        <PageFrame page_id="a007_inspection--list" category=PAGE_CAT_LIST title="Tugas Saya">
            <div class="page__toolbar">
                <div class="page__toolbar-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Muat ulang"
                    </Button>
                </div>
            </div>

            <Show
                when=move || !tasks.with(|t| t.is_empty())
                fallback=move || view! {
                    <div class="empty-state">
                        {move || if loading.get() {
                            view! { <Spinner label="Memuat tugas..." /> }.into_any()
                        } else {
                            view! { <p>"Tidak ada tugas"</p> }.into_any()
                        }}
                    </div>
                }
            >
                <div class="task-list">
                    {move || tasks.get().into_iter().map(|task| {
                        let id = task.assignment.id.clone();
                        let reservation = task.reservation.clone();
                        let customer = reservation.as_ref()
                            .and_then(|r| r.user.as_ref())
                            .map(|u| u.full_name.clone())
                            .unwrap_or_else(|| "-".into());
                        let address = reservation.as_ref()
                            .and_then(|r| r.location.as_ref())
                            .map(|l| l.address.clone())
                            .unwrap_or_default();
                        let subject = if address.is_empty() { customer.clone() } else { address.clone() };
                        let when = reservation.as_ref()
                            .map(|r| format!("{} · {}", format_date(&r.reservation_date), r.time_slot))
                            .unwrap_or_default();
                        let estimate = reservation.as_ref()
                            .map(|r| format!("Perkiraan {} · {}", format_volume(r.volume_m3), format_rupiah(r.total_price)))
                            .unwrap_or_default();
                        let inspected = task.inspected;
                        view! {
                            <div class="card task-card">
                                <div class="task-card__header">
                                    <span class="task-card__when">{when}</span>
                                    {if inspected {
                                        view! { <Badge color=BadgeColor::Success>"Sudah diperiksa"</Badge> }.into_any()
                                    } else {
                                        view! { <Badge color=BadgeColor::Warning>"Belum diperiksa"</Badge> }.into_any()
                                    }}
                                </div>
                                <div class="task-card__body">
                                    <div>{customer}</div>
                                    <div class="task-card__address">{address}</div>
                                    <div>{estimate}</div>
                                </div>
                                {(!inspected).then(move || view! {
                                    <Button
                                        appearance=ButtonAppearance::Primary
                                        on_click=move |_| inspecting.set(Some((id.clone(), subject.clone())))
                                    >
                                        {icon("clipboard")}
                                        " Isi hasil pemeriksaan"
                                    </Button>
                                })}
                            </div>
                        }
                    }).collect_view()}
                </div>
            </Show>

            {move || inspecting.get().map(|(id, subject)| view! {
                <InspectionForm assignment_id=id subject=subject on_saved=on_saved on_close=on_close />
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, date: &str, inspected: bool) -> AssignmentTask {
        serde_json::from_value(serde_json::json!({
            "id": id, "reservation_id": id, "employee_id": 1, "inspected": inspected,
            "reservation": {"id": id, "user_id": 1, "location_id": 1, "service_id": 1,
                            "reservation_date": date, "time_slot": "08:00-10:00"}
        }))
        .unwrap()
    }

    #[test]
    fn test_open_tasks_first_by_date() {
        let mut tasks = vec![
            task(1, "2026-10-22", false),
            task(2, "2026-10-20", true),
            task(3, "2026-10-21", false),
        ];
        order_tasks(&mut tasks);
        let ids: Vec<String> = tasks.iter().map(|t| t.assignment.id.as_string()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }
}
