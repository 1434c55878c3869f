use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::export::header_label;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notice::use_notice;
use crate::system::tables::actions;
use crate::system::tables::api::HttpCollectionApi;
use crate::system::tables::draft::{DraftField, FieldKind};
use crate::system::tables::state::{FormState, TableSession};

/// Add / edit form over the open draft
#[component]
pub fn RecordForm(session: RwSignal<TableSession>) -> impl IntoView {
    let notices = use_notice();

    let title = Signal::derive(move || {
        session.with(|s| match &s.form {
            FormState::Editing { id, .. } => format!("Ubah {} #{}", s.collection.label(), id),
            _ => format!("Tambah {}", s.collection.label()),
        })
    });

    let fields = move || {
        session.with(|s| s.form.draft().map(|d| d.fields.clone()).unwrap_or_default())
    };

    let on_submit = move |_| {
        spawn_local(async move {
            match actions::submit(&HttpCollectionApi, &session).await {
                Ok(message) => notices.success(message),
                Err(message) if !message.is_empty() => notices.error(message),
                Err(_) => {}
            }
        });
    };

    let close = Callback::new(move |_| session.update(|s| s.close_form()));
    let submitting = Signal::derive(move || session.with(|s| s.submitting));

    view! {
        <ModalFrame title=title on_close=close>
            <div class="record-form">
                {move || session.with(|s| s.form_error.clone()).map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}
                // Field list is fixed while the form is open; inputs keep focus
                {fields().into_iter().map(|field| view! { <FieldInput session=session field=field /> }).collect_view()}
                <div class="form-actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(()) disabled=submitting>
                        "Batal"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_submit disabled=submitting>
                        {move || if submitting.get() { "Menyimpan..." } else { "Simpan" }}
                    </Button>
                </div>
            </div>
        </ModalFrame>
    }
}

#[component]
fn FieldInput(session: RwSignal<TableSession>, field: DraftField) -> impl IntoView {
    let name = StoredValue::new(field.name.clone());
    let label = header_label(&field.name);

    let text = move || {
        session.with(|s| {
            name.with_value(|n| s.form.draft().and_then(|d| d.field(n)).map(|f| f.text.clone()))
        })
        .unwrap_or_default()
    };
    let set_text = move |value: String| {
        session.update(|s| {
            if let Some(d) = s.form.draft_mut() {
                name.with_value(|n| d.set_text(n, value));
            }
        })
    };

    let input = match field.kind {
        FieldKind::Boolean => view! {
            <input
                type="checkbox"
                prop:checked=move || session.with(|s| {
                    name.with_value(|n| s.form.draft().and_then(|d| d.field(n)).map(|f| f.flag))
                }).unwrap_or(false)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    session.update(|s| {
                        if let Some(d) = s.form.draft_mut() {
                            name.with_value(|n| d.set_flag(n, checked));
                        }
                    })
                }
            />
        }
        .into_any(),
        FieldKind::Json => view! {
            <textarea
                class="record-form__json"
                rows="4"
                prop:value=text
                on:input=move |ev| set_text(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Number => view! {
            <input type="text" inputmode="decimal" prop:value=text on:input=move |ev| set_text(event_target_value(&ev)) />
        }
        .into_any(),
        FieldKind::Text => view! {
            <input type="text" prop:value=text on:input=move |ev| set_text(event_target_value(&ev)) />
        }
        .into_any(),
    };

    view! {
        <div class="form-group">
            <Label>{label}</Label>
            {input}
        </div>
    }
}
