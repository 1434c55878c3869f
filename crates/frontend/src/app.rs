use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::routes::routes::AppRoutes;
use crate::shared::notice::NoticeService;
use crate::system::auth::session::SessionStore;

#[component]
pub fn App() -> impl IntoView {
    let session = SessionStore::new();
    provide_context(session);
    provide_context(NoticeService::new());

    // Revalidate a stored token; guards wait while this runs
    spawn_local(async move {
        session.restore().await;
    });

    view! {
        <AppRoutes />
    }
}
