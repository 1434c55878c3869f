use contracts::shared::password_policy::check_password;
use leptos::prelude::*;

/// Live checklist of the password rules
#[component]
pub fn PasswordRules(#[prop(into)] password: Signal<String>) -> impl IntoView {
    view! {
        <ul class="password-rules">
            {move || {
                check_password(&password.get())
                    .rules()
                    .into_iter()
                    .map(|(label, ok)| view! {
                        <li class=if ok { "password-rules__item password-rules__item--ok" } else { "password-rules__item" }>
                            {if ok { "✓ " } else { "• " }}
                            {label}
                        </li>
                    })
                    .collect_view()
            }}
        </ul>
    }
}
