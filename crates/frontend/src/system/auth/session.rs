//! Signed-in session: who the user is and the token that proves it.
//!
//! `SessionStore` is provided once from `App`; pages read it through
//! [`use_session`].

use contracts::system::auth::{LoginRequest, Role, UserInfo};
use leptos::prelude::*;

use super::{api, storage};
use crate::shared::api_utils::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// Stored token is being checked at startup
    Restoring,
    SignedOut,
    SignedIn(Session),
}

/// First page after sign-in for each role
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/calendar",
        Role::Employee => "/employee/tasks",
        Role::Customer => "/reservation/new",
    }
}

#[derive(Clone, Copy)]
pub struct SessionStore {
    status: RwSignal<SessionStatus>,
}

impl SessionStore {
    pub fn new() -> Self {
        let initial = if storage::get_token().is_some() {
            SessionStatus::Restoring
        } else {
            SessionStatus::SignedOut
        };
        Self { status: RwSignal::new(initial) }
    }

    pub fn status(&self) -> SessionStatus {
        self.status.get()
    }

    pub fn current(&self) -> Option<Session> {
        self.status.with(|s| match s {
            SessionStatus::SignedIn(session) => Some(session.clone()),
            _ => None,
        })
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.current().map(|s| s.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.status.with(|s| matches!(s, SessionStatus::SignedIn(_)))
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.status.with(|s| match s {
            SessionStatus::SignedIn(session) => roles.contains(&session.role()),
            _ => false,
        })
    }

    /// `POST /auth/login`, then persist and publish the session
    pub async fn sign_in(&self, credentials: LoginRequest) -> Result<Session, ApiError> {
        let response = api::login(&credentials).await?;
        let session = Session { token: response.token, user: response.user };
        self.sign_in_with(session.clone());
        log::info!("Signed in as {:?}", session.role());
        Ok(session)
    }

    /// Adopt a session obtained elsewhere (registration)
    pub fn sign_in_with(&self, session: Session) {
        storage::save_session(&session.token, &session.user);
        self.status.set(SessionStatus::SignedIn(session));
    }

    /// Replace the user after a profile change, keeping the token
    pub fn update_user(&self, user: UserInfo) {
        if let Some(session) = self.current() {
            self.sign_in_with(Session { token: session.token, user });
        }
    }

    pub fn sign_out(&self) {
        storage::clear_session();
        self.status.set(SessionStatus::SignedOut);
    }

    /// Revalidate the stored token with `GET /auth/me`
    pub async fn restore(&self) {
        let Some(token) = storage::get_token() else {
            self.status.set(SessionStatus::SignedOut);
            return;
        };
        match api::me(&token).await {
            Ok(user) => self.sign_in_with(Session { token, user }),
            Err(e) => {
                log::warn!("Stored session rejected: {}", e);
                self.sign_out();
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_session() -> SessionStore {
    use_context::<SessionStore>().expect("SessionStore not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_by_role() {
        assert_eq!(landing_path(Role::Admin), "/admin/calendar");
        assert_eq!(landing_path(Role::Employee), "/employee/tasks");
        assert_eq!(landing_path(Role::Customer), "/reservation/new");
    }
}
