//! Role-dependent navigation menu

use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::shared::icons::icon;
use crate::system::auth::session::use_session;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const fn item(path: &'static str, label: &'static str, icon: &'static str) -> MenuItem {
    MenuItem { path, label, icon }
}

pub fn menu_for(role: Role) -> Vec<MenuItem> {
    let mut items = match role {
        Role::Admin => vec![
            item("/admin/calendar", "Kalender", "calendar"),
            item("/admin/tables", "Tabel Data", "table"),
            item("/admin/broadcast", "Broadcast", "bell"),
        ],
        Role::Employee => vec![item("/employee/tasks", "Tugas Saya", "truck")],
        Role::Customer => vec![
            item("/reservation/new", "Reservasi Baru", "plus"),
            item("/history", "Riwayat", "history"),
            item("/locations", "Lokasi Saya", "map-pin"),
        ],
    };
    items.push(item("/profile", "Profil", "users"));
    items
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = use_session();
    let location = use_location();

    view! {
        <nav class="app-sidebar__content">
            {move || {
                let role = session.current().map(|s| s.role()).unwrap_or_default();
                menu_for(role).into_iter().map(|entry| {
                    let path = entry.path;
                    let is_active = move || location.pathname.with(|p| p.starts_with(path));
                    view! {
                        <A href=path attr:class="app-sidebar__link">
                            <div class="app-sidebar__item" class:app-sidebar__item--active=is_active>
                                <div class="app-sidebar__item-content">
                                    {icon(entry.icon)}
                                    <span>{entry.label}</span>
                                </div>
                            </div>
                        </A>
                    }
                }).collect_view()
            }}
        </nav>
    }
}
