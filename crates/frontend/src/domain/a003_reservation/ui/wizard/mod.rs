mod state;

use contracts::domain::a001_service::aggregate::Service;
use contracts::domain::a002_location::aggregate::Location;
use contracts::domain::a003_reservation::aggregate::{AvailabilityResponse, TIME_SLOTS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use thaw::*;

use self::state::ReservationDraft;
use crate::domain::a001_service::api as service_api;
use crate::domain::a002_location::api as location_api;
use crate::domain::a003_reservation::api;
use crate::shared::config::config;
use crate::shared::date_utils::today;
use crate::shared::notice::use_notice;
use crate::shared::number_format::{format_rupiah, format_volume};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::poll::{accept_ticket, issue_ticket, use_polling, PollGuard};
use crate::system::auth::session::use_session;

#[component]
pub fn ReservationWizardPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notice();
    let navigate = use_navigate();

    let locations = RwSignal::new(Vec::<Location>::new());
    let services = RwSignal::new(Vec::<Service>::new());
    let draft = RwSignal::new(ReservationDraft::default());
    let availability = RwSignal::new(Option::<AvailabilityResponse>::None);
    let guard = StoredValue::new(PollGuard::new());
    let submitting = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let location_id = RwSignal::new(String::new());
    let service_id = RwSignal::new(String::new());
    let volume = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    // Mirror the thaw inputs into the draft
    Effect::new(move |_| {
        let (l, s, v, n) = (location_id.get(), service_id.get(), volume.get(), notes.get());
        draft.update(|d| {
            d.location_id = l;
            d.service_id = s;
            d.volume = v;
            d.notes = n;
        });
    });

    Effect::new(move |_| {
        let Some(user) = session.user() else {
            return;
        };
        spawn_local(async move {
            let user_id = user.id.as_string();
            let (found_locations, found_services) = futures::join!(
                location_api::list_mine(&user_id),
                service_api::list_active()
            );
            match found_locations {
                Ok(list) => {
                    if let Some(first) = list.first() {
                        if location_id.get_untracked().is_empty() {
                            location_id.set(first.id.as_string());
                        }
                    }
                    locations.set(list);
                }
                Err(e) => notices.error(format!("Gagal memuat lokasi: {}", e)),
            }
            match found_services {
                Ok(list) => services.set(list),
                Err(e) => notices.error(format!("Gagal memuat layanan: {}", e)),
            }
        });
    });

    let refresh_availability = move || {
        let date = draft.with_untracked(|d| d.date.clone());
        if date.is_empty() {
            return;
        }
        let Some(ticket) = issue_ticket(guard) else {
            return;
        };
        spawn_local(async move {
            let result = api::availability(&date).await;
            if !accept_ticket(guard, ticket, "availability") {
                return;
            }
            match result {
                Ok(a) => availability.set(Some(a)),
                Err(e) => log::warn!("Availability for {} failed: {}", date, e),
            }
        });
    };

    use_polling(config().app.poll_interval_ms, refresh_availability);

    let set_date = move |value: String| {
        draft.update(|d| {
            d.date = value;
            d.time_slot.clear();
        });
        availability.set(None);
        refresh_availability();
    };

    let quote = Signal::derive(move || services.with(|s| draft.with(|d| d.quote(s))));

    let slot_open = move |slot: &str| {
        availability.with(|a| a.as_ref().map(|a| a.is_slot_open(slot)).unwrap_or(true))
    };

    let submit = move |_| {
        let today = today().format("%Y-%m-%d").to_string();
        let result = locations.with_untracked(|l| {
            services.with_untracked(|s| {
                availability.with_untracked(|a| draft.with_untracked(|d| d.to_dto(l, s, a.as_ref(), &today)))
            })
        });
        let dto = match result {
            Ok(dto) => dto,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        error.set(None);
        submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create(&dto).await {
                Ok(reservation) => {
                    log::info!("Reservation {} created", reservation.id);
                    notices.success("Reservasi berhasil dibuat, silakan lakukan pembayaran");
                    navigate("/history", Default::default());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let min_date = today().format("%Y-%m-%d").to_string();

    view! {
        <PageFrame page_id="a003_reservation--wizard" category=PAGE_CAT_USECASE title="Reservasi Baru">
            <Show when=move || error.get().is_some()>
                <div class="alert alert--error">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <div class="card">
                <div class="card__body">
                    <Flex vertical=true gap=FlexGap::Medium>
                        <div class="form__group">
                            <label class="form__label">"Lokasi"</label>
                            <Show
                                when=move || !locations.with(|l| l.is_empty())
                                fallback=|| view! {
                                    <p class="form-hint">
                                        "Belum ada lokasi. "
                                        <A href="/locations">"Tambah lokasi dulu"</A>
                                    </p>
                                }
                            >
                                <Select value=location_id>
                                    {move || locations.get().into_iter().map(|l| view! {
                                        <option value=l.id.as_string()>{format!("{} - {}", l.label, l.address)}</option>
                                    }).collect_view()}
                                </Select>
                            </Show>
                        </div>

                        <div class="form__group">
                            <label class="form__label">"Jenis layanan"</label>
                            <Select value=service_id>
                                <option value="">"Pilih layanan"</option>
                                {move || services.get().into_iter().map(|s| view! {
                                    <option value=s.id.as_string()>
                                        {format!("{} ({})", s.name, format_rupiah(s.base_price))}
                                    </option>
                                }).collect_view()}
                            </Select>
                        </div>

                        <div class="form__group">
                            <label class="form__label">"Tanggal"</label>
                            <input
                                type="date"
                                class="form__input"
                                min=min_date
                                prop:value=move || draft.with(|d| d.date.clone())
                                on:change=move |ev| set_date(event_target_value(&ev))
                            />
                        </div>

                        <div class="form__group">
                            <label class="form__label">"Jam layanan"</label>
                            <div class="slot-picker">
                                {TIME_SLOTS.iter().map(|slot| {
                                    let slot = *slot;
                                    let selected = move || draft.with(|d| d.time_slot == slot);
                                    let disabled = Signal::derive(move || {
                                        draft.with(|d| d.date.is_empty()) || !slot_open(slot)
                                    });
                                    view! {
                                        <Button
                                            appearance=Signal::derive(move || if selected() {
                                                ButtonAppearance::Primary
                                            } else {
                                                ButtonAppearance::Secondary
                                            })
                                            disabled=disabled
                                            on_click=move |_| draft.update(|d| d.time_slot = slot.to_string())
                                        >
                                            {slot}
                                            {move || (!slot_open(slot)).then_some(" (penuh)")}
                                        </Button>
                                    }
                                }).collect_view()}
                            </div>
                        </div>

                        <div class="form__group">
                            <label class="form__label">"Perkiraan volume (m³)"</label>
                            <Input value=volume input_type=InputType::Number placeholder="Contoh: 2,5" />
                        </div>

                        <div class="form__group">
                            <label class="form__label">"Catatan"</label>
                            <Textarea value=notes placeholder="Informasi tambahan untuk petugas" attr:rows=3 />
                        </div>
                    </Flex>
                </div>
            </div>

            {move || quote.get().map(|q| view! {
                <div class="card price-quote">
                    <div class="price-quote__row">
                        <span>"Tarif dasar"</span>
                        <span>{format_rupiah(q.base_price)}</span>
                    </div>
                    <div class="price-quote__row">
                        <span>{format!("Kelebihan volume {}", format_volume(q.extra_volume_m3))}</span>
                        <span>{format_rupiah(q.extra_cost)}</span>
                    </div>
                    <div class="price-quote__row price-quote__row--total">
                        <span>"Total"</span>
                        <span>{format_rupiah(q.total)}</span>
                    </div>
                </div>
            })}

            <Button
                appearance=ButtonAppearance::Primary
                on_click=submit
                disabled=Signal::derive(move || submitting.get())
            >
                {move || if submitting.get() { "Menyimpan..." } else { "Buat Reservasi" }}
            </Button>
        </PageFrame>
    }
}
