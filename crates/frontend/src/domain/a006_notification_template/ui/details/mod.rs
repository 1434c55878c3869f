use contracts::domain::a006_notification_template::aggregate::{
    placeholders, render_template, NotificationTemplate, TemplateDto,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;
use thaw::*;

use crate::domain::a006_notification_template::api;
use crate::shared::date_utils::{format_long_date, today};
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notice::use_notice;

/// Values substituted into the preview
pub fn sample_vars(date_text: String) -> BTreeMap<String, String> {
    [
        ("name", "Budi Santoso".to_string()),
        ("date", date_text),
        ("time_slot", "08:00-10:00".to_string()),
        ("service", "Penyedotan Rumah Tangga".to_string()),
        ("address", "Jl. Merdeka No. 1".to_string()),
        ("total", "Rp 250.000".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Add/edit form for one template. `existing` is `None` when adding.
#[component]
pub fn TemplateForm(
    existing: Option<NotificationTemplate>,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let notices = use_notice();
    let initial = existing.as_ref().map(TemplateDto::from_template).unwrap_or_else(|| TemplateDto {
        is_active: true,
        ..Default::default()
    });
    let id = existing.map(|t| t.id);
    let is_edit = id.is_some();

    let name = RwSignal::new(initial.name);
    let body = RwSignal::new(initial.body);
    let is_active = RwSignal::new(initial.is_active);
    let error = RwSignal::new(Option::<String>::None);
    let saving = RwSignal::new(false);

    let vars = sample_vars(format_long_date(today()));
    let preview = Signal::derive(move || body.with(|b| render_template(b, &vars)));
    let used = Signal::derive(move || body.with(|b| placeholders(b)));

    let save = move |_| {
        let dto = TemplateDto {
            name: name.get_untracked().trim().to_string(),
            body: body.get_untracked(),
            is_active: is_active.get_untracked(),
        };
        if let Err(message) = dto.validate() {
            error.set(Some(message));
            return;
        }
        error.set(None);
        saving.set(true);
        let id = id.clone();
        spawn_local(async move {
            let result = match &id {
                Some(id) => api::update(id, &dto).await,
                None => api::create(&dto).await,
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    notices.success("Template disimpan");
                    on_saved.run(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let title = if is_edit { "Ubah Template" } else { "Tambah Template" };

    view! {
        <ModalFrame title=Signal::derive(move || title.to_string()) on_close=on_close>
            <Show when=move || error.get().is_some()>
                <div class="alert alert--error">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <Flex vertical=true gap=FlexGap::Medium>
                <div class="form__group">
                    <label class="form__label">"Nama template"</label>
                    <Input value=name />
                </div>
                <div class="form__group">
                    <label class="form__label">"Isi pesan"</label>
                    <Textarea value=body placeholder="Halo {{name}}, jadwal penyedotan Anda {{date}}" attr:rows=6 />
                    <div class="form-hint">
                        {move || {
                            let names = used.get();
                            if names.is_empty() {
                                "Tanpa variabel".to_string()
                            } else {
                                format!("Variabel: {}", names.join(", "))
                            }
                        }}
                    </div>
                </div>
                <Checkbox checked=is_active label="Aktif" />
                <div class="template-preview">
                    <div class="template-preview__title">"Pratinjau"</div>
                    <pre class="template-preview__body">{move || preview.get()}</pre>
                </div>
            </Flex>
            <div class="form-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>"Batal"</Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=save
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Menyimpan..." } else { "Simpan" }}
                </Button>
            </div>
        </ModalFrame>
    }
}
