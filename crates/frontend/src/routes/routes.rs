use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;
use thaw::Spinner;

use crate::dashboards::AdminCalendarDashboard;
use crate::domain::a002_location::ui::LocationsPage;
use crate::domain::a003_reservation::ui::{HistoryPage, ReservationWizardPage};
use crate::domain::a006_notification_template::ui::BroadcastPage;
use crate::domain::a007_inspection::ui::EmployeeTasksPage;
use crate::layout::{AuthShell, Shell};
use crate::system::auth::guard::{GuestOnly, RequireAuth, RequireRole};
use crate::system::auth::session::{landing_path, use_session, SessionStatus};
use crate::system::pages::forgot_password::ForgotPasswordPage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::profile::ProfilePage;
use crate::system::pages::register::RegisterPage;
use crate::system::pages::set_new_password::SetNewPasswordPage;
use crate::system::pages::verify_otp::VerifyOtpPage;
use crate::system::tables::ui::list::TablesPage;

const ADMIN: &[Role] = &[Role::Admin];
const EMPLOYEE: &[Role] = &[Role::Employee];
const CUSTOMER: &[Role] = &[Role::Customer];

/// Sign-in pages; signed-in users are sent on to their landing page
#[component]
fn Guest(children: ChildrenFn) -> impl IntoView {
    view! {
        <AuthShell>
            <GuestOnly>{children()}</GuestOnly>
        </AuthShell>
    }
}

/// Pages in the main shell, limited to `roles`
#[component]
fn Staffed(roles: &'static [Role], children: ChildrenFn) -> impl IntoView {
    view! {
        <Shell>
            <RequireRole roles=roles>{children()}</RequireRole>
        </Shell>
    }
}

/// `/` goes to the sign-in page or the user's landing page
#[component]
fn Home() -> impl IntoView {
    let session = use_session();
    move || match session.status() {
        SessionStatus::Restoring => view! { <Spinner label="Memeriksa sesi..." /> }.into_any(),
        SessionStatus::SignedOut => view! { <Redirect path="/login" /> }.into_any(),
        SessionStatus::SignedIn(s) => view! { <Redirect path=landing_path(s.role()) /> }.into_any(),
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="empty-state">
            <h2>"Halaman tidak ditemukan"</h2>
            <a href="/">"Kembali ke beranda"</a>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=NotFound>
                <Route path=path!("/") view=Home />

                <Route path=path!("/login") view=|| view! { <Guest><LoginPage /></Guest> } />
                <Route path=path!("/register") view=|| view! { <Guest><RegisterPage /></Guest> } />
                <Route path=path!("/forgot-password") view=|| view! { <Guest><ForgotPasswordPage /></Guest> } />
                <Route path=path!("/set-new-password") view=|| view! { <Guest><SetNewPasswordPage /></Guest> } />
                // Also used by signed-in users confirming a profile change
                <Route path=path!("/verify-otp") view=|| view! { <AuthShell><VerifyOtpPage /></AuthShell> } />

                <Route
                    path=path!("/profile")
                    view=|| view! { <Shell><RequireAuth><ProfilePage /></RequireAuth></Shell> }
                />

                <Route
                    path=path!("/reservation/new")
                    view=|| view! { <Staffed roles=CUSTOMER><ReservationWizardPage /></Staffed> }
                />
                <Route path=path!("/history") view=|| view! { <Staffed roles=CUSTOMER><HistoryPage /></Staffed> } />
                <Route path=path!("/locations") view=|| view! { <Staffed roles=CUSTOMER><LocationsPage /></Staffed> } />

                <Route
                    path=path!("/admin/calendar")
                    view=|| view! { <Staffed roles=ADMIN><AdminCalendarDashboard /></Staffed> }
                />
                <Route path=path!("/admin/tables") view=|| view! { <Staffed roles=ADMIN><TablesPage /></Staffed> } />
                <Route path=path!("/admin/broadcast") view=|| view! { <Staffed roles=ADMIN><BroadcastPage /></Staffed> } />

                <Route
                    path=path!("/employee/tasks")
                    view=|| view! { <Staffed roles=EMPLOYEE><EmployeeTasksPage /></Staffed> }
                />
            </Routes>
        </Router>
    }
}
