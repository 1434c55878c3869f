use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use thaw::Spinner;

use super::session::{landing_path, use_session, SessionStatus};

/// Renders children only for a signed-in user; otherwise sends to `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || match session.status() {
        SessionStatus::Restoring => view! { <Spinner label="Memeriksa sesi..." /> }.into_any(),
        SessionStatus::SignedOut => view! { <Redirect path="/login" /> }.into_any(),
        SessionStatus::SignedIn(_) => children().into_any(),
    }
}

/// Like [`RequireAuth`], restricted to `roles`. A signed-in user with another
/// role is sent to their own landing page.
#[component]
pub fn RequireRole(roles: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || match session.status() {
        SessionStatus::Restoring => view! { <Spinner label="Memeriksa sesi..." /> }.into_any(),
        SessionStatus::SignedOut => view! { <Redirect path="/login" /> }.into_any(),
        SessionStatus::SignedIn(s) if roles.contains(&s.role()) => children().into_any(),
        SessionStatus::SignedIn(s) => {
            log::warn!("Role {:?} may not open this page", s.role());
            view! { <Redirect path=landing_path(s.role()) /> }.into_any()
        }
    }
}

/// For sign-in pages: a signed-in user goes straight to their landing page.
#[component]
pub fn GuestOnly(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || match session.status() {
        SessionStatus::SignedIn(s) => view! { <Redirect path=landing_path(s.role()) /> }.into_any(),
        _ => children().into_any(),
    }
}
