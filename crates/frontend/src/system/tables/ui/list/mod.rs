use contracts::domain::common::EntityId;
use contracts::system::tables::{Collection, Record};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::RecordForm;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::today;
use crate::shared::export::{export_csv, header_label};
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SearchInput};
use crate::shared::modal_frame::confirm;
use crate::shared::notice::use_notice;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::record_set::value_text;
use crate::system::tables::actions::{self, LoadOutcome};
use crate::system::tables::api::HttpCollectionApi;
use crate::system::tables::state::{record_id, LoadState, TableSession};

const MAX_CELL_CHARS: usize = 60;

fn cell_text(record: &Record, column: &str) -> String {
    let text = record.get(column).and_then(value_text).unwrap_or_else(|| "-".to_string());
    if text.chars().count() > MAX_CELL_CHARS {
        let short: String = text.chars().take(MAX_CELL_CHARS).collect();
        format!("{}…", short)
    } else {
        text
    }
}

#[component]
pub fn TablesPage() -> impl IntoView {
    let notices = use_notice();
    let session = RwSignal::new(TableSession::new(Collection::default()));

    let reload = move || {
        spawn_local(async move {
            if let LoadOutcome::Failed(e) = actions::load(&HttpCollectionApi, &session).await {
                notices.error(format!("Gagal memuat data: {}", e));
            }
        });
    };

    // Initial load
    Effect::new(move |_| reload());

    let select_collection = move |path: String| {
        if let Some(collection) = Collection::from_path(&path) {
            session.update(|s| s.select_collection(collection));
            reload();
        }
    };

    let export = move |_| {
        let result = session.with_untracked(|s| {
            let slice = s.slice();
            export_csv(&s.columns, &slice.filtered, s.collection.label(), today())
        });
        match result {
            Ok(filename) => notices.success(format!("File {} diunduh", filename)),
            Err(message) => notices.error(message),
        }
    };

    let remove = move |id: EntityId| {
        spawn_local(async move {
            match actions::delete(&HttpCollectionApi, &session, &id, confirm).await {
                Ok(Some(message)) => notices.success(message),
                Ok(None) => {}
                Err(message) => notices.error(message),
            }
        });
    };

    let loading = Signal::derive(move || session.with(|s| s.is_loading()));
    let columns = Signal::derive(move || session.with(|s| s.columns.clone()));

    view! {
        <PageFrame page_id="sys_tables--list" category=PAGE_CAT_LIST>
            <div class="page__toolbar">
                <div class="page__toolbar-left">
                    <select
                        class="collection-select"
                        prop:value=move || session.with(|s| s.collection.path().to_string())
                        on:change=move |ev| select_collection(event_target_value(&ev))
                    >
                        {Collection::ALL.iter().map(|c| view! {
                            <option value=c.path()>{c.label()}</option>
                        }).collect_view()}
                    </select>
                    <Badge>{move || session.with(|s| s.slice().filtered.len().to_string())}</Badge>
                </div>
                <div class="page__toolbar-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| session.update(|s| s.open_add())
                        disabled=Signal::derive(move || session.with(|s| s.load != LoadState::Loaded))
                    >
                        {icon("plus")}
                        " Tambah"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=export>
                        {icon("download")}
                        " Ekspor CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reload()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Memuat..." } else { " Muat ulang" }}
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <SearchInput
                    value=Signal::derive(move || session.with(|s| s.view.query.clone()))
                    on_change=Callback::new(move |q: String| session.update(|s| s.view.set_query(q)))
                    placeholder="Cari di semua kolom..."
                />
                <PaginationControls
                    current_page=Signal::derive(move || session.with(|s| s.view.page))
                    total_pages=Signal::derive(move || session.with(|s| s.slice().total_pages))
                    total_count=Signal::derive(move || session.with(|s| s.slice().filtered.len()))
                    page_size=Signal::derive(move || session.with(|s| s.view.page_size))
                    on_page_change=Callback::new(move |page: usize| session.update(|s| {
                        let count = s.slice().filtered.len();
                        s.view.go_to(page, count);
                    }))
                    on_page_size_change=Callback::new(move |size: usize| session.update(|s| s.view.set_page_size(size)))
                />
            </div>

            <Show
                when=move || !session.with(|s| s.shows_empty_state())
                fallback=move || view! {
                    <div class="empty-state">
                        {move || if loading.get() {
                            view! { <Spinner label="Memuat data..." /> }.into_any()
                        } else {
                            view! { <p>"Tidak ada data"</p> }.into_any()
                        }}
                    </div>
                }
            >
                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {move || columns.get().into_iter().map(|column| {
                                    let field = column.clone();
                                    let field_for_class = column.clone();
                                    let field_for_indicator = column.clone();
                                    view! {
                                        <TableHeaderCell>
                                            <div
                                                class="table__sortable-header"
                                                style="cursor:pointer;"
                                                on:click=move |_| session.update(|s| s.view.toggle_sort(&field))
                                            >
                                                {header_label(&column)}
                                                <span class=move || session.with(|s| get_sort_class(&s.view.sort_field, &field_for_class))>
                                                    {move || session.with(|s| get_sort_indicator(&s.view.sort_field, &field_for_indicator, s.view.sort_direction))}
                                                </span>
                                            </div>
                                        </TableHeaderCell>
                                    }
                                }).collect_view()}
                                <TableHeaderCell>"Aksi"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || session.with(|s| {
                                let slice = s.slice();
                                slice.rows.into_iter().map(|record| {
                                    let cells = s.columns.iter().map(|c| {
                                        let text = cell_text(record, c);
                                        view! {
                                            <TableCell>
                                                <TableCellLayout truncate=true>{text}</TableCellLayout>
                                            </TableCell>
                                        }
                                    }).collect_view();
                                    let id = record_id(record);
                                    let edit_id = id.clone();
                                    view! {
                                        <TableRow>
                                            {cells}
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=edit_id.is_none()
                                                        on_click=move |_| {
                                                            if let Some(id) = edit_id.clone() {
                                                                session.update(|s| { s.open_edit(&id); });
                                                            }
                                                        }
                                                        attr:title="Ubah"
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=id.is_none()
                                                        on_click=move |_| {
                                                            if let Some(id) = id.clone() {
                                                                remove(id);
                                                            }
                                                        }
                                                        attr:title="Hapus"
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                </Flex>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view()
                            })}
                        </TableBody>
                    </Table>
                </div>
            </Show>

            <Show when=move || session.with(|s| s.form.is_open())>
                <RecordForm session=session />
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text() {
        let record = json!({"a": null, "b": "x".repeat(70), "c": 5})
            .as_object()
            .cloned()
            .unwrap_or_default();
        assert_eq!(cell_text(&record, "a"), "-");
        assert_eq!(cell_text(&record, "missing"), "-");
        assert_eq!(cell_text(&record, "c"), "5");
        assert_eq!(cell_text(&record, "b").chars().count(), MAX_CELL_CHARS + 1);
    }
}
