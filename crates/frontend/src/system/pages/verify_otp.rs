use contracts::shared::phone::mask_phone;
use contracts::system::auth::RegisterRequest;
use contracts::system::otp::{is_valid_otp, PendingAction, OTP_LENGTH};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use serde_json::json;

use crate::shared::api_utils::ApiError;
use crate::shared::baas;
use crate::shared::notice::use_notice;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_AUTH;
use crate::shared::poll::use_interval;
use crate::system::auth::session::{landing_path, use_session, Session, SessionStore};
use crate::system::auth::{api, storage};
use crate::system::otp::api as otp_api;
use crate::system::otp::flow::{parse_query, resolve_action, sanitize_code, Cooldown};

fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Carry out what the verified OTP unlocks; returns the next route
async fn finalize(
    action: PendingAction,
    reset_token: Option<String>,
    session: SessionStore,
) -> Result<String, ApiError> {
    match action {
        PendingAction::Register { full_name, phone, password } => {
            let response = api::register(&RegisterRequest { full_name, phone: phone.clone(), password: password.clone() }).await?;
            let signed_in = match (response.token, response.user) {
                (Some(token), Some(user)) => {
                    session.sign_in_with(Session { token, user });
                    session.current()
                }
                _ => session
                    .sign_in(contracts::system::auth::LoginRequest { phone, password })
                    .await
                    .ok(),
            };
            storage::clear_pending_action();
            Ok(signed_in
                .map(|s| landing_path(s.role()).to_string())
                .unwrap_or_else(|| "/login".to_string()))
        }
        reset @ PendingAction::ResetPassword { .. } => {
            storage::save_pending_action(&reset.into_verified(reset_token));
            Ok("/set-new-password".to_string())
        }
        PendingAction::UpdateProfile { user_id, full_name, .. } => {
            baas::update("profiles", &user_id, &json!({ "full_name": full_name })).await?;
            if let Some(mut user) = session.user() {
                user.full_name = full_name;
                session.update_user(user);
            }
            storage::clear_pending_action();
            Ok("/profile".to_string())
        }
        PendingAction::ChangePhone { user_id, new_phone, .. } => {
            baas::update("profiles", &user_id, &json!({ "phone": new_phone })).await?;
            if let Some(mut user) = session.user() {
                user.phone = new_phone;
                session.update_user(user);
            }
            storage::clear_pending_action();
            Ok("/profile".to_string())
        }
    }
}

#[component]
pub fn VerifyOtpPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notice();
    let navigate = use_navigate();

    let action = match resolve_action(parse_query(&location_search()), storage::load_pending_action()) {
        Ok(action) => action,
        Err(e) => {
            log::warn!("OTP page opened without an action: {}", e);
            return view! {
                <PageFrame page_id="sys_verify_otp--auth" category=PAGE_CAT_AUTH>
                    <div class="login-box">
                        <div class="error-message">{e.to_string()}</div>
                        <a href="/login">"Kembali ke halaman masuk"</a>
                    </div>
                </PageFrame>
            }
            .into_any();
        }
    };
    // A legacy link's action must survive a page reload too
    storage::save_pending_action(&action);

    let action = StoredValue::new(action);
    let code = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    // The previous page already sent the first code
    let cooldown = RwSignal::new(Cooldown::started());
    use_interval(1_000, move || {
        cooldown.try_update(|c| c.tick());
    });

    let resend = move |_| {
        if !cooldown.get_untracked().can_resend() {
            return;
        }
        let (phone, purpose) = action.with_value(|a| (a.phone().to_string(), a.purpose()));
        spawn_local(async move {
            match otp_api::send_otp(&phone, purpose).await {
                Ok(_) => {
                    cooldown.set(Cooldown::started());
                    notices.success("Kode baru telah dikirim");
                }
                Err(e) => notices.error(e.to_string()),
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let code_val = code.get();
        if !is_valid_otp(&code_val) {
            set_error_message.set(Some(format!("Masukkan {} digit kode", OTP_LENGTH)));
            return;
        }
        set_is_loading.set(true);
        set_error_message.set(None);

        let pending = action.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = async {
                let verified = otp_api::verify_otp(pending.phone(), &code_val, pending.purpose()).await?;
                if !verified.verified {
                    let message = verified.message.unwrap_or_else(|| "Kode OTP salah".into());
                    return Err(ApiError::Status { status: 400, message });
                }
                finalize(pending, verified.reset_token, session).await
            }
            .await;

            match result {
                Ok(next) => navigate(&next, Default::default()),
                Err(e) => set_error_message.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    let title = action.with_value(|a| a.title());
    let masked = action.with_value(|a| mask_phone(a.phone()));

    view! {
        <PageFrame page_id="sys_verify_otp--auth" category=PAGE_CAT_AUTH>
            <div class="login-box">
                <h2>{title}</h2>
                <p class="login-box__hint">{format!("Kode dikirim ke WhatsApp {}", masked)}</p>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="code">"Kode OTP"</label>
                        <input
                            type="text"
                            id="code"
                            class="otp-input"
                            inputmode="numeric"
                            autocomplete="one-time-code"
                            maxlength=OTP_LENGTH.to_string()
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(sanitize_code(&event_target_value(&ev)))
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Memverifikasi..." } else { "Verifikasi" }}
                    </button>
                </form>

                <button
                    class="btn-link"
                    on:click=resend
                    disabled=move || !cooldown.get().can_resend()
                >
                    {move || {
                        let c = cooldown.get();
                        if c.can_resend() {
                            "Kirim ulang kode".to_string()
                        } else {
                            format!("Kirim ulang dalam {} detik", c.remaining())
                        }
                    }}
                </button>
            </div>
        </PageFrame>
    }
    .into_any()
}
