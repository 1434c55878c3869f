use contracts::domain::a006_notification_template::aggregate::{BroadcastResponse, NotificationTemplate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::TemplateForm;
use crate::domain::a006_notification_template::api;
use crate::shared::icons::icon;
use crate::shared::modal_frame::confirm;
use crate::shared::notice::use_notice;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

#[derive(Clone, Debug, PartialEq)]
enum Editor {
    Closed,
    Adding,
    Editing(NotificationTemplate),
}

/// Summary line after a broadcast
pub fn broadcast_summary(result: &BroadcastResponse) -> String {
    if result.failed == 0 {
        format!("Pesan terkirim ke {} pelanggan", result.sent)
    } else {
        format!("Terkirim: {}, gagal: {}", result.sent, result.failed)
    }
}

#[component]
pub fn BroadcastPage() -> impl IntoView {
    let notices = use_notice();
    let items = RwSignal::new(Vec::<NotificationTemplate>::new());
    let loading = RwSignal::new(false);
    let editor = RwSignal::new(Editor::Closed);
    let sending = RwSignal::new(false);
    let last_result = RwSignal::new(Option::<(String, BroadcastResponse)>::None);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::list().await {
                Ok(list) => items.set(list),
                Err(e) => notices.error(format!("Gagal memuat template: {}", e)),
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let on_saved = Callback::new(move |_| {
        editor.set(Editor::Closed);
        load();
    });
    let on_close = Callback::new(move |_| editor.set(Editor::Closed));

    let remove = move |template: NotificationTemplate| {
        if !confirm(&format!("Hapus template \"{}\"?", template.name)) {
            return;
        }
        spawn_local(async move {
            match api::remove(&template.id).await {
                Ok(()) => {
                    notices.success("Template dihapus");
                    load();
                }
                Err(e) => notices.error(format!("Gagal menghapus template: {}", e)),
            }
        });
    };

    let send = move |template: NotificationTemplate| {
        if !template.is_active {
            notices.error("Aktifkan template sebelum mengirim broadcast");
            return;
        }
        if !confirm(&format!("Kirim \"{}\" ke semua pelanggan lewat WhatsApp?", template.name)) {
            return;
        }
        sending.set(true);
        spawn_local(async move {
            match api::broadcast(&template.id).await {
                Ok(result) => {
                    log::info!("Broadcast {}: sent={} failed={}", template.id, result.sent, result.failed);
                    let summary = broadcast_summary(&result);
                    if result.failed > 0 && result.sent == 0 {
                        notices.error(summary);
                    } else {
                        notices.success(summary);
                    }
                    last_result.set(Some((template.name.clone(), result)));
                }
                Err(e) => notices.error(format!("Broadcast gagal: {}", e)),
            }
            sending.set(false);
        });
    };

    view! {
        <PageFrame page_id="a006_notification_template--list" category=PAGE_CAT_LIST title="Broadcast WhatsApp">
            <div class="page__toolbar">
                <div class="page__toolbar-left">
                    <Badge>{move || items.with(|i| i.len().to_string())}</Badge>
                </div>
                <div class="page__toolbar-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| editor.set(Editor::Adding)>
                        {icon("plus")}
                        " Template baru"
                    </Button>
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

            {move || last_result.get().map(|(name, result)| view! {
                <div class="broadcast-result">
                    <strong>{name}</strong>
                    <span class="broadcast-result__sent">{format!("Terkirim: {}", result.sent)}</span>
                    <span class="broadcast-result__failed">{format!("Gagal: {}", result.failed)}</span>
                </div>
            })}

            <Show
                when=move || !items.with(|i| i.is_empty())
                fallback=move || view! {
                    <div class="empty-state">
                        {move || if loading.get() {
                            view! { <Spinner label="Memuat template..." /> }.into_any()
                        } else {
                            view! { <p>"Belum ada template"</p> }.into_any()
                        }}
                    </div>
                }
            >
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Nama"</TableHeaderCell>
                            <TableHeaderCell>"Isi pesan"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                            <TableHeaderCell>"Aksi"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || items.get().into_iter().map(|t| {
                            let for_edit = t.clone();
                            let for_delete = t.clone();
                            let for_send = t.clone();
                            view! {
                                <TableRow>
                                    <TableCell>{t.name.clone()}</TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{t.body.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        {if t.is_active {
                                            view! { <Badge color=BadgeColor::Success>"Aktif"</Badge> }.into_any()
                                        } else {
                                            view! { <Badge color=BadgeColor::Subtle>"Nonaktif"</Badge> }.into_any()
                                        }}
                                    </TableCell>
                                    <TableCell>
                                        <Flex gap=FlexGap::Small>
                                            <Button
                                                appearance=ButtonAppearance::Primary
                                                disabled=Signal::derive(move || sending.get())
                                                on_click=move |_| send(for_send.clone())
                                            >
                                                {icon("bell")}
                                                " Kirim"
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| editor.set(Editor::Editing(for_edit.clone()))
                                                attr:title="Ubah"
                                            >
                                                {icon("edit")}
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| remove(for_delete.clone())
                                                attr:title="Hapus"
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </Flex>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
            </Show>

            {move || match editor.get() {
                Editor::Closed => None,
                Editor::Adding => Some(view! {
                    <TemplateForm existing=None on_saved=on_saved on_close=on_close />
                }),
                Editor::Editing(t) => Some(view! {
                    <TemplateForm existing=Some(t) on_saved=on_saved on_close=on_close />
                }),
            }}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_summary() {
        assert_eq!(
            broadcast_summary(&BroadcastResponse { sent: 12, failed: 0 }),
            "Pesan terkirim ke 12 pelanggan"
        );
        assert_eq!(
            broadcast_summary(&BroadcastResponse { sent: 10, failed: 2 }),
            "Terkirim: 10, gagal: 2"
        );
    }
}
