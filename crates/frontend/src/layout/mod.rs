pub mod left;
pub mod top_header;

use leptos::prelude::*;

use crate::shared::notice::NoticeBanner;
use left::Sidebar;
use top_header::TopHeader;

/// Frame around every signed-in page.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |           Content            |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let sidebar_open = RwSignal::new(true);

    view! {
        <div class="app-layout">
            <TopHeader sidebar_open=sidebar_open />
            <div class="app-body">
                <div data-zone="left" class="left" class:hidden=move || !sidebar_open.get()>
                    <Sidebar />
                </div>
                <main class="app-main">
                    <NoticeBanner />
                    {children()}
                </main>
            </div>
        </div>
    }
}

/// Centered frame for the sign-in, registration and OTP pages
#[component]
pub fn AuthShell(children: Children) -> impl IntoView {
    view! {
        <div class="auth-layout">
            <div class="auth-layout__brand">
                <span class="auth-layout__title">"UPTD PAL"</span>
                <span class="auth-layout__subtitle">"Layanan Penyedotan Lumpur Tinja"</span>
            </div>
            <NoticeBanner />
            <div class="auth-layout__card">{children()}</div>
        </div>
    }
}
