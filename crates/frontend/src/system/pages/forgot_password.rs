use contracts::shared::phone::{is_valid_phone, normalize_phone};
use contracts::system::otp::PendingAction;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_AUTH;
use crate::system::auth::storage;
use crate::system::otp::api as otp_api;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let navigate = use_navigate();
    let phone = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let phone_val = normalize_phone(&phone.get());
        if !is_valid_phone(&phone_val) {
            set_error_message.set(Some("Nomor WhatsApp tidak valid".into()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match otp_api::forgot_password(&phone_val).await {
                Ok(_) => {
                    storage::save_pending_action(&PendingAction::ResetPassword {
                        phone: phone_val,
                        verified: false,
                        reset_token: None,
                    });
                    navigate("/verify-otp", Default::default());
                }
                Err(e) => set_error_message.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <PageFrame page_id="sys_forgot_password--auth" category=PAGE_CAT_AUTH>
            <div class="login-box">
                <h2>"Lupa Kata Sandi"</h2>
                <p class="login-box__hint">"Kode verifikasi akan dikirim lewat WhatsApp."</p>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
                </Show>

                <form on:submit=on_submit>
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
                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Mengirim..." } else { "Kirim kode" }}
                    </button>
                </form>

                <div class="login-links">
                    <a href="/login">"Kembali ke halaman masuk"</a>
                </div>
            </div>
        </PageFrame>
    }
}
