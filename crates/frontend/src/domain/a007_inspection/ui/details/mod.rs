use contracts::domain::a007_inspection::aggregate::{InspectionDto, SepticCondition};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a007_inspection::api;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notice::use_notice;
use crate::shared::number_format::parse_decimal;

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Collect the form fields into a payload, validating before anything is sent
pub fn build_dto(
    assignment_id: &EntityId,
    volume: &str,
    condition: &str,
    access_notes: &str,
    notes: &str,
) -> Result<InspectionDto, String> {
    let actual_volume_m3 = parse_decimal(volume).ok_or("Volume aktual harus berupa angka")?;
    let septic_condition = SepticCondition::parse(condition).ok_or("Pilih kondisi septic tank")?;
    let dto = InspectionDto {
        assignment_id: assignment_id.clone(),
        actual_volume_m3,
        septic_condition,
        access_notes: optional_text(access_notes),
        notes: optional_text(notes),
    };
    dto.validate()?;
    Ok(dto)
}

#[component]
pub fn InspectionForm(
    assignment_id: EntityId,
    /// Shown in the title, e.g. the customer's address
    #[prop(into)]
    subject: String,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let notices = use_notice();
    let volume = RwSignal::new(String::new());
    let condition = RwSignal::new(SepticCondition::Good.as_str().to_string());
    let access_notes = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let saving = RwSignal::new(false);

    let submit = move |_| {
        let dto = match build_dto(
            &assignment_id,
            &volume.get_untracked(),
            &condition.get_untracked(),
            &access_notes.get_untracked(),
            &notes.get_untracked(),
        ) {
            Ok(dto) => dto,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            match api::create(&dto).await {
                Ok(inspection) => {
                    log::info!("Inspection {} recorded", inspection.id);
                    notices.success("Hasil pemeriksaan tersimpan");
                    on_saved.run(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    view! {
        <ModalFrame title=format!("Pemeriksaan: {}", subject) on_close=on_close>
            <Show when=move || error.get().is_some()>
                <div class="alert alert--error">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <Flex vertical=true gap=FlexGap::Medium>
                <div class="form__group">
                    <label class="form__label">"Volume aktual (m³)"</label>
                    <Input value=volume input_type=InputType::Number />
                </div>
                <div class="form__group">
                    <label class="form__label">"Kondisi septic tank"</label>
                    <Select value=condition>
                        {SepticCondition::ALL.into_iter().map(|c| view! {
                            <option value=c.as_str()>{c.label()}</option>
                        }).collect_view()}
                    </Select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Catatan akses"</label>
                    <Textarea value=access_notes placeholder="Akses jalan, jarak selang" attr:rows=2 />
                </div>
                <div class="form__group">
                    <label class="form__label">"Catatan"</label>
                    <Textarea value=notes attr:rows=3 />
                </div>
            </Flex>
            <div class="form-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>"Batal"</Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Menyimpan..." } else { "Simpan hasil" }}
                </Button>
            </div>
        </ModalFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_dto() {
        let id = EntityId::from(4);
        let dto = build_dto(&id, "2,75", "good", " ", "").unwrap();
        assert_eq!(dto.actual_volume_m3, 2.75);
        assert_eq!(dto.access_notes, None);

        assert_eq!(
            build_dto(&id, "x", "good", "", "").unwrap_err(),
            "Volume aktual harus berupa angka"
        );
        assert!(build_dto(&id, "2", "broken", "", "").is_err());
        assert!(build_dto(&id, "2", "damaged", "", "").is_err());
        assert!(build_dto(&id, "2", "damaged", "", "Pipa bocor").is_ok());
    }
}
