//! Glue between the pages of the OTP flow.
//!
//! The requesting page stores a [`PendingAction`] in session storage; the
//! verification page picks it up, or rebuilds it from a legacy link's query.

use contracts::system::otp::{OtpQuery, PendingAction, PendingActionError, OTP_LENGTH};

pub const RESEND_COOLDOWN_SECS: u32 = 60;

/// Keep digits only, at most one code long
pub fn sanitize_code(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(OTP_LENGTH)
        .collect()
}

/// Parse a `?phone=…&register=true…` query string
pub fn parse_query(search: &str) -> OtpQuery {
    let search = search.trim_start_matches('?');
    serde_qs::from_str(search).unwrap_or_else(|e| {
        log::debug!("Ignoring unreadable OTP query: {}", e);
        OtpQuery::default()
    })
}

/// Action the verification page works on. An explicit link wins; without
/// one the action stored by the previous page is used.
pub fn resolve_action(
    query: OtpQuery,
    stored: Option<PendingAction>,
) -> Result<PendingAction, PendingActionError> {
    match PendingAction::try_from(query) {
        Ok(action) => Ok(action),
        Err(PendingActionError::NoAction) => stored.ok_or(PendingActionError::NoAction),
        Err(e) => Err(e),
    }
}

/// Seconds left before another code may be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cooldown {
    remaining: u32,
}

impl Cooldown {
    pub fn started() -> Self {
        Self { remaining: RESEND_COOLDOWN_SECS }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_reset() -> PendingAction {
        PendingAction::ResetPassword {
            phone: "6281234567890".into(),
            verified: false,
            reset_token: None,
        }
    }

    #[test]
    fn test_sanitize_code() {
        assert_eq!(sanitize_code("12 34-56"), "123456");
        assert_eq!(sanitize_code("12345678"), "123456");
        assert_eq!(sanitize_code("abc"), "");
    }

    #[test]
    fn test_legacy_query_parses() {
        let q = parse_query("?phone=6281234567890&register=true&name=Budi%20S&password=Rahasia1!");
        let action = resolve_action(q, None).unwrap();
        assert_eq!(
            action,
            PendingAction::Register {
                full_name: "Budi S".into(),
                phone: "6281234567890".into(),
                password: "Rahasia1!".into(),
            }
        );
    }

    #[test]
    fn test_camel_case_flags() {
        let q = parse_query("phone=6281111111111&changePhone=1&user_id=9&old_phone=6282222222222");
        let action = resolve_action(q, None).unwrap();
        assert_eq!(action.phone(), "6281111111111");
    }

    #[test]
    fn test_stored_action_used_without_flags() {
        let action = resolve_action(parse_query(""), Some(stored_reset()));
        assert_eq!(action, Ok(stored_reset()));
        assert_eq!(resolve_action(parse_query(""), None), Err(PendingActionError::NoAction));
    }

    #[test]
    fn test_broken_link_is_not_masked_by_stored_action() {
        let q = parse_query("phone=62812&register=true&forgot=true");
        assert_eq!(resolve_action(q, Some(stored_reset())), Err(PendingActionError::Ambiguous));
    }

    #[test]
    fn test_cooldown() {
        let mut c = Cooldown::started();
        assert!(!c.can_resend());
        for _ in 0..RESEND_COOLDOWN_SECS + 5 {
            c.tick();
        }
        assert_eq!(c.remaining(), 0);
        assert!(c.can_resend());
        assert!(Cooldown::default().can_resend());
    }
}
