use contracts::shared::phone::{is_valid_phone, mask_phone, normalize_phone};
use contracts::system::otp::PendingAction;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::session::use_session;
use crate::system::auth::{api, storage};
use crate::system::otp::api as otp_api;

/// Profile edit as an OTP action; `Err` when nothing would change
pub fn profile_change(
    user_id: &str,
    current_name: &str,
    current_phone: &str,
    new_name: &str,
    new_phone: &str,
) -> Result<PendingAction, String> {
    let new_name = new_name.trim();
    let new_phone = normalize_phone(new_phone);
    if new_name.chars().count() < 3 {
        return Err("Nama lengkap minimal 3 karakter".into());
    }
    if !new_phone.is_empty() && new_phone != current_phone {
        if !is_valid_phone(&new_phone) {
            return Err("Nomor WhatsApp tidak valid".into());
        }
        return Ok(PendingAction::ChangePhone {
            user_id: user_id.to_string(),
            old_phone: Some(current_phone.to_string()),
            new_phone,
        });
    }
    if new_name == current_name {
        return Err("Tidak ada perubahan".into());
    }
    Ok(PendingAction::UpdateProfile {
        user_id: user_id.to_string(),
        phone: current_phone.to_string(),
        full_name: new_name.to_string(),
    })
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let user = session.user();
    let full_name = RwSignal::new(user.as_ref().map(|u| u.full_name.clone()).unwrap_or_default());
    let phone = RwSignal::new(user.as_ref().map(|u| u.phone.clone()).unwrap_or_default());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_save = move |_| {
        let Some(user) = session.user() else {
            return;
        };
        let action = match profile_change(
            &user.id.as_string(),
            &user.full_name,
            &user.phone,
            &full_name.get_untracked(),
            &phone.get_untracked(),
        ) {
            Ok(action) => action,
            Err(message) => {
                set_error_message.set(Some(message));
                return;
            }
        };

        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = async {
                if matches!(action, PendingAction::ChangePhone { .. }) && api::phone_exists(action.phone()).await? {
                    return Ok(false);
                }
                otp_api::send_otp(action.phone(), action.purpose()).await?;
                Ok::<_, crate::shared::api_utils::ApiError>(true)
            }
            .await;

            match result {
                Ok(true) => {
                    storage::save_pending_action(&action);
                    navigate("/verify-otp", Default::default());
                }
                Ok(false) => set_error_message.set(Some("Nomor sudah dipakai akun lain".into())),
                Err(e) => set_error_message.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <PageFrame page_id="sys_profile--detail" category=PAGE_CAT_DETAIL title="Profil Saya">
            {move || session.user().map(|u| view! {
                <div class="profile-summary">
                    <div class="profile-summary__name">{u.full_name.clone()}</div>
                    <div class="profile-summary__phone">{mask_phone(&u.phone)}</div>
                    <Badge>{format!("{:?}", u.role).to_lowercase()}</Badge>
                </div>
            })}

            <Show when=move || error_message.get().is_some()>
                <div class="alert alert--error">{move || error_message.get().unwrap_or_default()}</div>
            </Show>

            <div class="form-group">
                <Label>"Nama lengkap"</Label>
                <Input value=full_name />
            </div>
            <div class="form-group">
                <Label>"Nomor WhatsApp"</Label>
                <Input value=phone input_type=InputType::Tel />
            </div>
            <p class="form-hint">"Perubahan dikonfirmasi dengan kode OTP lewat WhatsApp."</p>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=on_save
                disabled=Signal::derive(move || is_loading.get())
            >
                {move || if is_loading.get() { "Mengirim kode..." } else { "Simpan perubahan" }}
            </Button>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "6281234567890";

    #[test]
    fn test_name_change_is_update_profile() {
        let action = profile_change("7", "Budi", PHONE, "Budi Santoso", PHONE);
        assert_eq!(
            action,
            Ok(PendingAction::UpdateProfile {
                user_id: "7".into(),
                phone: PHONE.into(),
                full_name: "Budi Santoso".into(),
            })
        );
    }

    #[test]
    fn test_new_number_is_change_phone() {
        let action = profile_change("7", "Budi", PHONE, "Budi", "0898-7654-3210").unwrap();
        assert_eq!(action.phone(), "6289876543210");
        assert!(matches!(action, PendingAction::ChangePhone { .. }));
    }

    #[test]
    fn test_no_change_and_bad_input() {
        assert_eq!(profile_change("7", "Budi", PHONE, "Budi", PHONE), Err("Tidak ada perubahan".to_string()));
        assert!(profile_change("7", "Budi", PHONE, "Budi", "0812").is_err());
        assert!(profile_change("7", "Budi", PHONE, "B", PHONE).is_err());
    }
}
