use contracts::domain::a003_reservation::aggregate::Reservation;
use contracts::domain::a004_assignment::aggregate::{CreateAssignmentDto, Employee};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::super::model::derive_status;
use crate::domain::a004_assignment::api as assignment_api;
use crate::shared::date_utils::format_date;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notice::use_notice;
use crate::shared::number_format::{format_rupiah, format_volume};

/// Reservation detail with the employee picker
#[component]
pub fn ReservationDetail(
    reservation: Reservation,
    service_name: String,
    employee_name: Option<String>,
    employees: Vec<Employee>,
    on_assigned: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let notices = use_notice();
    let status = derive_status(&reservation);
    let reservation_id = reservation.id.clone();
    let employee_id = RwSignal::new(String::new());
    let saving = RwSignal::new(false);
    let roster = StoredValue::new(employees.clone());

    let assign = move |_| {
        let chosen = employee_id.get_untracked();
        let Some(employee) = roster.with_value(|list| list.iter().find(|e| e.id.as_string() == chosen).cloned()) else {
            notices.error("Pilih petugas terlebih dahulu");
            return;
        };
        let dto = CreateAssignmentDto {
            reservation_id: reservation_id.clone(),
            employee_id: employee.id.clone(),
        };
        saving.set(true);
        spawn_local(async move {
            match assignment_api::assign(&dto).await {
                Ok(_) => {
                    log::info!("Reservation {} assigned to {}", dto.reservation_id, employee.full_name);
                    notices.success("Petugas ditugaskan");
                    on_assigned.run(());
                }
                Err(e) => notices.error(format!("Gagal menugaskan petugas: {}", e)),
            }
            saving.set(false);
        });
    };

    let customer = reservation.user.as_ref().map(|u| u.full_name.clone()).unwrap_or_else(|| "-".into());
    let phone = reservation.user.as_ref().and_then(|u| u.phone.clone()).unwrap_or_else(|| "-".into());
    let address = reservation.location.as_ref().map(|l| l.address.clone()).unwrap_or_else(|| "-".into());
    let payment = reservation
        .payment
        .as_ref()
        .map(|p| p.status.label())
        .unwrap_or("Belum Dibayar");

    view! {
        <ModalFrame title=format!("Reservasi #{}", reservation.id) on_close=on_close>
            <dl class="detail-list">
                <dt>"Status"</dt>
                <dd><span class=status.class()>{status.label()}</span></dd>
                <dt>"Pelanggan"</dt>
                <dd>{customer}</dd>
                <dt>"Telepon"</dt>
                <dd>{phone}</dd>
                <dt>"Alamat"</dt>
                <dd>{address}</dd>
                <dt>"Jadwal"</dt>
                <dd>{format!("{} · {}", format_date(&reservation.reservation_date), reservation.time_slot)}</dd>
                <dt>"Layanan"</dt>
                <dd>{service_name}</dd>
                <dt>"Volume"</dt>
                <dd>{format_volume(reservation.volume_m3)}</dd>
                <dt>"Total"</dt>
                <dd>{format_rupiah(reservation.total_price)}</dd>
                <dt>"Pembayaran"</dt>
                <dd>{payment}</dd>
                {reservation.notes.clone().map(|notes| view! {
                    <dt>"Catatan"</dt>
                    <dd>{notes}</dd>
                })}
            </dl>

            {match employee_name {
                Some(name) => view! {
                    <div class="detail-assigned">{format!("Ditugaskan ke {}", name)}</div>
                }.into_any(),
                None => view! {
                    <div class="detail-assign">
                        <Select value=employee_id>
                            <option value="">"Pilih petugas"</option>
                            {employees.into_iter().map(|e| view! {
                                <option value=e.id.as_string()>{e.full_name}</option>
                            }).collect_view()}
                        </Select>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=assign
                            disabled=Signal::derive(move || saving.get())
                        >
                            {move || if saving.get() { "Menyimpan..." } else { "Tugaskan" }}
                        </Button>
                    </div>
                }.into_any(),
            }}
        </ModalFrame>
    }
}
