use contracts::domain::a003_reservation::aggregate::{Reservation, ReservationStatus};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_reservation::api;
use crate::domain::a005_payment::api as payment_api;
use crate::domain::a005_payment::snap::{self, PaymentOutcome};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::notice::{use_notice, Notice};
use crate::shared::number_format::{format_rupiah, format_volume};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

fn status_color(status: ReservationStatus) -> BadgeColor {
    match status {
        ReservationStatus::Pending => BadgeColor::Warning,
        ReservationStatus::Confirmed | ReservationStatus::InProgress => BadgeColor::Brand,
        ReservationStatus::Completed => BadgeColor::Success,
        ReservationStatus::Cancelled => BadgeColor::Danger,
        ReservationStatus::Unknown => BadgeColor::Informative,
    }
}

/// Payment badge text; reservations without a payment row are unpaid
fn payment_label(reservation: &Reservation) -> &'static str {
    match &reservation.payment {
        Some(payment) => payment.status.label(),
        None => "Belum Dibayar",
    }
}

/// "21/10/2026 · 08:00-10:00"
fn schedule_text(reservation: &Reservation) -> String {
    format!("{} · {}", format_date(&reservation.reservation_date), reservation.time_slot)
}

/// "2,5 m³ · Rp 287.500"
fn amount_text(reservation: &Reservation) -> String {
    format!(
        "{} · {}",
        format_volume(reservation.volume_m3),
        format_rupiah(reservation.total_price)
    )
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let notices = use_notice();
    let items = RwSignal::new(Vec::<Reservation>::new());
    let loading = RwSignal::new(false);
    let paying = RwSignal::new(Option::<EntityId>::None);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::list_mine().await {
                Ok(list) => items.set(list),
                Err(e) => notices.error(format!("Gagal memuat riwayat: {}", e)),
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let on_outcome = move |outcome: PaymentOutcome| {
        paying.set(None);
        match outcome {
            PaymentOutcome::Success | PaymentOutcome::Pending => notices.success(outcome.message()),
            PaymentOutcome::Error => notices.error(outcome.message()),
            PaymentOutcome::Closed => notices.show(Notice::info(outcome.message())),
        }
        if outcome.needs_refresh() {
            load();
        }
    };

    let pay = move |id: EntityId| {
        paying.set(Some(id.clone()));
        spawn_local(async move {
            let token = match payment_api::create_token(&id).await {
                Ok(response) => response.token,
                Err(e) => {
                    paying.set(None);
                    notices.error(format!("Gagal membuat transaksi: {}", e));
                    return;
                }
            };
            if let Err(message) = snap::pay(&token, on_outcome) {
                log::error!("Snap pay failed for reservation {}: {}", id, message);
                paying.set(None);
                notices.error(message);
            }
        });
    };

    view! {
        <PageFrame page_id="a003_reservation--history" category=PAGE_CAT_LIST title="Riwayat Reservasi">
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
                when=move || !items.with(|i| i.is_empty())
                fallback=move || view! {
                    <div class="empty-state">
                        {move || if loading.get() {
                            view! { <Spinner label="Memuat riwayat..." /> }.into_any()
                        } else {
                            view! { <p>"Belum ada reservasi"</p> }.into_any()
                        }}
                    </div>
                }
            >
                <div class="history-list">
                    {move || items.get().into_iter().map(|r| {
                        let id = r.id.clone();
                        let busy_id = r.id.clone();
                        let can_pay = r.awaiting_payment();
                        let service = r.service.as_ref().map(|s| s.name.clone()).unwrap_or_else(|| "-".into());
                        let address = r.location.as_ref().map(|l| l.address.clone()).unwrap_or_default();
                        let officer = r.assignment.as_ref()
                            .and_then(|a| a.employee.as_ref())
                            .map(|e| e.full_name.clone());
                        let when = schedule_text(&r);
                        let status = r.status;
                        let paid_color = if r.is_paid() { BadgeColor::Success } else { BadgeColor::Warning };
                        let paid_text = payment_label(&r);
                        let amount = amount_text(&r);
                        view! {
                            <div class="card history-card">
                                <div class="history-card__header">
                                    <span class="history-card__date">
                                        {when}
                                    </span>
                                    <Flex gap=FlexGap::Small>
                                        <Badge color=status_color(status)>{status.label()}</Badge>
                                        <Badge
                                            color=paid_color
                                            appearance=BadgeAppearance::Outline
                                        >
                                            {paid_text}
                                        </Badge>
                                    </Flex>
                                </div>
                                <div class="history-card__body">
                                    <div>{service}</div>
                                    <div class="history-card__address">{address}</div>
                                    <div>{amount}</div>
                                    {officer.map(|name| view! {
                                        <div class="history-card__officer">{format!("Petugas: {}", name)}</div>
                                    })}
                                </div>
                                {can_pay.then(move || view! {
                                    <Button
                                        appearance=ButtonAppearance::Primary
                                        disabled=Signal::derive(move || paying.get().is_some())
                                        on_click=move |_| pay(id.clone())
                                    >
                                        {move || if paying.get().as_ref() == Some(&busy_id) {
                                            "Memproses..."
                                        } else {
                                            "Bayar"
                                        }}
                                    </Button>
                                })}
                            </div>
                        }
                    }).collect_view()}
                </div>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_label() {
        let mut r: Reservation = serde_json::from_str(
            r#"{"id": 1, "user_id": 1, "location_id": 1, "service_id": 1,
                "reservation_date": "2026-10-21", "time_slot": "08:00-10:00"}"#,
        )
        .unwrap();
        assert_eq!(payment_label(&r), "Belum Dibayar");
        assert!(r.awaiting_payment());
        r.payment = serde_json::from_str(r#"{"id": 2, "reservation_id": 1, "status": "settlement"}"#).unwrap();
        assert_eq!(payment_label(&r), "Lunas");
        assert!(!r.awaiting_payment());
    }

    #[test]
    fn test_card_texts() {
        let r: Reservation = serde_json::from_str(
            r#"{"id": 7, "user_id": 1, "location_id": 1, "service_id": 1,
                "reservation_date": "2026-10-21", "time_slot": "08:00-10:00",
                "volume_m3": 2.5, "total_price": 287500}"#,
        )
        .unwrap();
        assert_eq!(schedule_text(&r), "21/10/2026 · 08:00-10:00");
        assert_eq!(amount_text(&r), "2,5 m³ · Rp 287.500");
        assert_eq!(payment_label(&r), "Belum Dibayar");
    }
}
