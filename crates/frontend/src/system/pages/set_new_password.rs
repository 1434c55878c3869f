use contracts::shared::password_policy::validate_new_password;
use contracts::system::auth::ResetPasswordRequest;
use contracts::system::otp::PendingAction;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;

use super::password_rules::PasswordRules;
use crate::shared::notice::use_notice;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_AUTH;
use crate::system::auth::{api, storage};

/// Reset request for a verified reset action; `None` for anything else
pub fn reset_request(action: &PendingAction, password: &str) -> Option<ResetPasswordRequest> {
    match action {
        PendingAction::ResetPassword { phone, verified: true, reset_token } => Some(ResetPasswordRequest {
            phone: phone.clone(),
            password: password.to_string(),
            reset_token: reset_token.clone(),
        }),
        _ => None,
    }
}

#[component]
pub fn SetNewPasswordPage() -> impl IntoView {
    let notices = use_notice();
    let navigate = use_navigate();

    let Some(action) = storage::load_pending_action().filter(|a| reset_request(a, "").is_some()) else {
        log::warn!("Set-new-password opened without a verified reset");
        return view! { <Redirect path="/forgot-password" /> }.into_any();
    };
    let action = StoredValue::new(action);

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let password_val = password.get();
        if let Err(message) = validate_new_password(&password_val, &confirm.get()) {
            set_error_message.set(Some(message));
            return;
        }
        let Some(request) = action.with_value(|a| reset_request(a, &password_val)) else {
            return;
        };

        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::reset_password(&request).await {
                Ok(_) => {
                    storage::clear_pending_action();
                    notices.success("Kata sandi berhasil diubah, silakan masuk");
                    navigate("/login", Default::default());
                }
                Err(e) => set_error_message.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <PageFrame page_id="sys_set_new_password--auth" category=PAGE_CAT_AUTH>
            <div class="login-box">
                <h2>"Kata Sandi Baru"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="password">"Kata sandi baru"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
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
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Menyimpan..." } else { "Simpan" }}
                    </button>
                </form>
            </div>
        </PageFrame>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_verified_reset_builds_request() {
        let unverified = PendingAction::ResetPassword { phone: "62811".into(), verified: false, reset_token: None };
        assert!(reset_request(&unverified, "x").is_none());

        let verified = unverified.into_verified(Some("rt-1".into()));
        let request = reset_request(&verified, "Rahasia1!");
        assert_eq!(request.as_ref().map(|r| r.reset_token.as_deref()), Some(Some("rt-1")));
        assert_eq!(request.map(|r| r.password), Some("Rahasia1!".to_string()));

        let register = PendingAction::Register { full_name: "A".into(), phone: "62811".into(), password: "p".into() };
        assert!(reset_request(&register, "x").is_none());
    }
}
