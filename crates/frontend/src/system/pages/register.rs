use contracts::shared::password_policy::validate_new_password;
use contracts::shared::phone::{is_valid_phone, normalize_phone};
use contracts::system::otp::PendingAction;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::password_rules::PasswordRules;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_AUTH;
use crate::system::auth::{api, storage};
use crate::system::otp::api as otp_api;

/// Client-side checks before anything is sent
pub fn validate_registration(
    full_name: &str,
    phone: &str,
    password: &str,
    confirm: &str,
) -> Result<PendingAction, String> {
    let full_name = full_name.trim();
    if full_name.chars().count() < 3 {
        return Err("Nama lengkap minimal 3 karakter".into());
    }
    let phone = normalize_phone(phone);
    if !is_valid_phone(&phone) {
        return Err("Nomor WhatsApp tidak valid".into());
    }
    validate_new_password(password, confirm)?;
    Ok(PendingAction::Register {
        full_name: full_name.to_string(),
        phone,
        password: password.to_string(),
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let navigate = use_navigate();

    let full_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let action = match validate_registration(&full_name.get(), &phone.get(), &password.get(), &confirm.get()) {
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
                if api::phone_exists(action.phone()).await? {
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
                Ok(false) => set_error_message.set(Some("Nomor sudah terdaftar, silakan masuk".into())),
                Err(e) => set_error_message.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <PageFrame page_id="sys_register--auth" category=PAGE_CAT_AUTH>
            <div class="login-box">
                <h2>"Daftar Akun"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="full_name">"Nama lengkap"</label>
                        <input
                            type="text"
                            id="full_name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <div class="form-group">
                        <label for="phone">"Nomor WhatsApp"</label>
                        <input
                            type="tel"
                            id="phone"
                            placeholder="08xxxxxxxxxx"
                            prop:value=move || phone.get()
                            on:input=move |ev| phone.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Kata sandi"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                        <PasswordRules password=password />
                    </div>
                    <div class="form-group">
                        <label for="confirm">"Ulangi kata sandi"</label>
                        <input
                            type="password"
                            id="confirm"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Mengirim kode..." } else { "Daftar" }}
                    </button>
                </form>

                <div class="login-links">
                    <a href="/login">"Sudah punya akun? Masuk"</a>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration_builds_action() {
        let action = validate_registration(" Budi Santoso ", "0812-3456-7890", "Rahasia1!", "Rahasia1!");
        assert_eq!(
            action,
            Ok(PendingAction::Register {
                full_name: "Budi Santoso".into(),
                phone: "6281234567890".into(),
                password: "Rahasia1!".into(),
            })
        );
    }

    #[test]
    fn test_registration_rejections() {
        assert!(validate_registration("Bu", "081234567890", "Rahasia1!", "Rahasia1!").is_err());
        assert_eq!(
            validate_registration("Budi", "12345", "Rahasia1!", "Rahasia1!"),
            Err("Nomor WhatsApp tidak valid".to_string())
        );
        assert!(validate_registration("Budi", "081234567890", "rahasia", "rahasia").is_err());
        assert_eq!(
            validate_registration("Budi", "081234567890", "Rahasia1!", "Rahasia2!"),
            Err("Konfirmasi kata sandi tidak sama".to_string())
        );
    }
}
