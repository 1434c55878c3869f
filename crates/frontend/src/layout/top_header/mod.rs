//! Top bar: sidebar toggle, brand, signed-in user and logout.

use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::shared::icons::icon;
use crate::system::auth::session::use_session;

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Employee => "Petugas",
        Role::Customer => "Pelanggan",
    }
}

#[component]
pub fn TopHeader(sidebar_open: RwSignal<bool>) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let logout = move |_| {
        session.sign_out();
        log::info!("Signed out");
        navigate("/login", Default::default());
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| sidebar_open.update(|open| *open = !*open)
                    title=move || if sidebar_open.get() { "Sembunyikan menu" } else { "Tampilkan menu" }
                >
                    {icon("table")}
                </button>
                <span class="top-header__title">"UPTD PAL"</span>
            </div>

            <div class="top-header__actions">
                {move || session.current().map(|s| view! {
                    <div class="top-header__user">
                        {icon("users")}
                        <span>{s.user.full_name.clone()}</span>
                        <span class="top-header__role">{role_label(s.role())}</span>
                    </div>
                })}
                <button class="top-header__icon-btn" on:click=logout title="Keluar">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
