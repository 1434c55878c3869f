use contracts::shared::phone::{is_valid_phone, normalize_phone};
use contracts::system::auth::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_AUTH;
use crate::system::auth::session::{landing_path, use_session};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let phone_val = normalize_phone(&phone.get());
        if !is_valid_phone(&phone_val) {
            set_error_message.set(Some("Nomor WhatsApp tidak valid".into()));
            return;
        }
        let request = LoginRequest { phone: phone_val, password: password.get() };

        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match session.sign_in(request).await {
                Ok(s) => navigate(landing_path(s.role()), Default::default()),
                Err(e) => set_error_message.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <PageFrame page_id="sys_login--auth" category=PAGE_CAT_AUTH>
            <div class="login-box">
                <h1>"UPTD PAL"</h1>
                <h2>"Masuk"</h2>

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
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Memproses..." } else { "Masuk" }}
                    </button>
                </form>

                <div class="login-links">
                    <a href="/forgot-password">"Lupa kata sandi?"</a>
                    <a href="/register">"Belum punya akun? Daftar"</a>
                </div>
            </div>
        </PageFrame>
    }
}
