mod state;

use contracts::domain::a002_location::aggregate::{Location, PlaceResult};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::LocationForm;
use crate::domain::a002_location::{api, geocode};
use crate::shared::icons::icon;
use crate::shared::modal_frame::confirm;
use crate::shared::notice::use_notice;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::session::use_session;

#[component]
pub fn LocationsPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notice();

    let items = RwSignal::new(Vec::<Location>::new());
    let loading = RwSignal::new(false);
    let form = RwSignal::new(LocationForm::default());
    let label = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let query = RwSignal::new(String::new());
    let places = RwSignal::new(Vec::<PlaceResult>::new());
    let searching = RwSignal::new(false);
    let saving = RwSignal::new(false);

    let load = move || {
        let Some(user) = session.user() else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            match api::list_mine(&user.id.as_string()).await {
                Ok(list) => items.set(list),
                Err(e) => notices.error(format!("Gagal memuat lokasi: {}", e)),
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let run_search = move |_| {
        let q = query.get_untracked();
        if q.trim().chars().count() < geocode::MIN_QUERY_CHARS {
            notices.error(format!("Ketik minimal {} huruf alamat", geocode::MIN_QUERY_CHARS));
            return;
        }
        searching.set(true);
        spawn_local(async move {
            match geocode::search(&q).await {
                Ok(found) => {
                    if found.is_empty() {
                        notices.error("Alamat tidak ditemukan");
                    }
                    places.set(found);
                }
                Err(e) => notices.error(format!("Pencarian alamat gagal: {}", e)),
            }
            searching.set(false);
        });
    };

    let save = move |_| {
        let Some(user) = session.user() else {
            return;
        };
        let mut current = form.get_untracked();
        current.label = label.get_untracked();
        current.notes = notes.get_untracked();
        let dto = match current.to_dto(&user.id) {
            Ok(dto) => dto,
            Err(message) => {
                notices.error(message);
                return;
            }
        };
        saving.set(true);
        spawn_local(async move {
            match api::create(&dto).await {
                Ok(location) => {
                    log::info!("Location {} saved", location.id);
                    items.update(|list| list.insert(0, location));
                    form.set(LocationForm::default());
                    label.set(String::new());
                    notes.set(String::new());
                    query.set(String::new());
                    places.set(Vec::new());
                    notices.success("Lokasi disimpan");
                }
                Err(e) => notices.error(format!("Gagal menyimpan lokasi: {}", e)),
            }
            saving.set(false);
        });
    };

    let remove = move |location: Location| {
        if !confirm(&format!("Hapus lokasi \"{}\"?", location.label)) {
            return;
        }
        spawn_local(async move {
            let id = location.id.clone();
            match api::remove(&id.as_string()).await {
                Ok(()) => {
                    items.update(|list| list.retain(|l| l.id != id));
                    notices.success("Lokasi dihapus");
                }
                Err(e) => notices.error(format!("Gagal menghapus lokasi: {}", e)),
            }
        });
    };

    view! {
        <PageFrame page_id="a002_location--list" category=PAGE_CAT_LIST title="Lokasi Saya">
            <div class="card">
                <div class="card__header">
                    <h3>"Tambah lokasi"</h3>
                </div>
                <div class="card__body">
                    <Flex vertical=true gap=FlexGap::Medium>
                        <div class="form__group">
                            <label class="form__label">"Nama lokasi"</label>
                            <Input value=label placeholder="Contoh: Rumah, Kantor" />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Cari alamat"</label>
                            <Flex gap=FlexGap::Small>
                                <Input value=query placeholder="Nama jalan, kelurahan, kota" />
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=run_search
                                    disabled=Signal::derive(move || searching.get())
                                >
                                    {icon("search")}
                                    {move || if searching.get() { " Mencari..." } else { " Cari" }}
                                </Button>
                            </Flex>
                        </div>
                        <Show when=move || !places.with(|p| p.is_empty())>
                            <ul class="place-results">
                                {move || places.get().into_iter().map(|place| {
                                    let name = place.display_name.clone();
                                    view! {
                                        <li
                                            class="place-results__item"
                                            on:click=move |_| {
                                                form.update(|f| f.pick(&place));
                                                places.set(Vec::new());
                                            }
                                        >
                                            {icon("map-pin")}
                                            " "
                                            {name}
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        </Show>
                        {move || form.with(|f| f.coordinates.map(|(lat, lon)| view! {
                            <div class="picked-place">
                                <div class="picked-place__address">{f.address.clone()}</div>
                                <div class="picked-place__coords">{format!("{:.6}, {:.6}", lat, lon)}</div>
                            </div>
                        }))}
                        <div class="form__group">
                            <label class="form__label">"Catatan akses"</label>
                            <Textarea value=notes placeholder="Patokan, lebar jalan, posisi septic tank" attr:rows=2 />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=save
                            disabled=Signal::derive(move || saving.get())
                        >
                            {icon("plus")}
                            {move || if saving.get() { " Menyimpan..." } else { " Simpan lokasi" }}
                        </Button>
                    </Flex>
                </div>
            </div>

            <Show
                when=move || !items.with(|i| i.is_empty())
                fallback=move || view! {
                    <div class="empty-state">
                        {move || if loading.get() {
                            view! { <Spinner label="Memuat lokasi..." /> }.into_any()
                        } else {
                            view! { <p>"Belum ada lokasi tersimpan"</p> }.into_any()
                        }}
                    </div>
                }
            >
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Nama"</TableHeaderCell>
                            <TableHeaderCell>"Alamat"</TableHeaderCell>
                            <TableHeaderCell>"Catatan"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || items.get().into_iter().map(|location| {
                            let for_delete = location.clone();
                            view! {
                                <TableRow>
                                    <TableCell>{location.label.clone()}</TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{location.address.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>{location.notes.clone().unwrap_or_else(|| "-".into())}</TableCell>
                                    <TableCell>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| remove(for_delete.clone())
                                            attr:title="Hapus"
                                        >
                                            {icon("trash")}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
            </Show>
        </PageFrame>
    }
}
