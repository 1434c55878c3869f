use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::OtpPurpose;

/// The action an OTP verification unlocks.
///
/// Carried from the page that requested the OTP to the verification page and,
/// for password resets, on to the new-password page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingAction {
    Register {
        full_name: String,
        phone: String,
        password: String,
    },
    ResetPassword {
        phone: String,
        /// Set once the OTP has been verified
        #[serde(default)]
        verified: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reset_token: Option<String>,
    },
    UpdateProfile {
        user_id: String,
        phone: String,
        full_name: String,
    },
    ChangePhone {
        user_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        old_phone: Option<String>,
        new_phone: String,
    },
}

impl PendingAction {
    /// Number the OTP is delivered to
    pub fn phone(&self) -> &str {
        match self {
            PendingAction::Register { phone, .. }
            | PendingAction::ResetPassword { phone, .. }
            | PendingAction::UpdateProfile { phone, .. } => phone,
            PendingAction::ChangePhone { new_phone, .. } => new_phone,
        }
    }

    pub fn purpose(&self) -> OtpPurpose {
        match self {
            PendingAction::Register { .. } => OtpPurpose::Register,
            PendingAction::ResetPassword { .. } => OtpPurpose::ForgotPassword,
            PendingAction::UpdateProfile { .. } => OtpPurpose::ProfileUpdate,
            PendingAction::ChangePhone { .. } => OtpPurpose::ChangePhone,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PendingAction::Register { .. } => "Verifikasi Pendaftaran",
            PendingAction::ResetPassword { .. } => "Verifikasi Lupa Kata Sandi",
            PendingAction::UpdateProfile { .. } => "Verifikasi Perubahan Profil",
            PendingAction::ChangePhone { .. } => "Verifikasi Nomor Baru",
        }
    }

    /// Reset action after a successful OTP check
    pub fn into_verified(self, token: Option<String>) -> Self {
        match self {
            PendingAction::ResetPassword { phone, .. } => PendingAction::ResetPassword {
                phone,
                verified: true,
                reset_token: token,
            },
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PendingActionError {
    #[error("Tautan verifikasi tidak menyebutkan tindakan yang dilakukan")]
    NoAction,
    #[error("Tautan verifikasi menyebutkan lebih dari satu tindakan")]
    Ambiguous,
    #[error("Tautan verifikasi tidak lengkap: {0} tidak ada")]
    Missing(&'static str),
}

/// Query string of legacy verification links
/// (`/verify-otp?phone=…&register=true&name=…&password=…`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpQuery {
    pub phone: Option<String>,
    pub register: Option<String>,
    pub forgot: Option<String>,
    pub profile_update: Option<String>,
    pub change_phone: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "full_name")]
    pub full_name: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "user_id")]
    pub user_id: Option<String>,
    #[serde(rename = "old_phone")]
    pub old_phone: Option<String>,
}

fn flag(value: &Option<String>) -> bool {
    matches!(value.as_deref().map(str::trim), Some("true") | Some("1"))
}

fn required(value: Option<String>, name: &'static str) -> Result<String, PendingActionError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PendingActionError::Missing(name)),
    }
}

impl TryFrom<OtpQuery> for PendingAction {
    type Error = PendingActionError;

    fn try_from(q: OtpQuery) -> Result<Self, Self::Error> {
        let flags = [
            flag(&q.register),
            flag(&q.forgot),
            flag(&q.profile_update),
            flag(&q.change_phone),
        ];
        match flags.iter().filter(|f| **f).count() {
            0 => return Err(PendingActionError::NoAction),
            1 => {}
            _ => return Err(PendingActionError::Ambiguous),
        }
        let phone = required(q.phone, "phone")?;
        let name = q.full_name.or(q.name);

        if flags[0] {
            Ok(PendingAction::Register {
                full_name: required(name, "name")?,
                phone,
                password: required(q.password, "password")?,
            })
        } else if flags[1] {
            Ok(PendingAction::ResetPassword {
                phone,
                verified: false,
                reset_token: None,
            })
        } else if flags[2] {
            Ok(PendingAction::UpdateProfile {
                user_id: required(q.user_id, "user_id")?,
                phone,
                full_name: required(name, "full_name")?,
            })
        } else {
            Ok(PendingAction::ChangePhone {
                user_id: required(q.user_id, "user_id")?,
                old_phone: q.old_phone,
                new_phone: phone,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> OtpQuery {
        OtpQuery {
            phone: Some("6281234567890".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_register_from_query() {
        let q = OtpQuery {
            register: Some("true".into()),
            name: Some("Budi".into()),
            password: Some("Sedot#2024".into()),
            ..query()
        };
        let action = PendingAction::try_from(q).unwrap();
        assert_eq!(action.purpose(), OtpPurpose::Register);
        assert_eq!(action.phone(), "6281234567890");
        assert!(matches!(action, PendingAction::Register { ref full_name, .. } if full_name == "Budi"));
    }

    #[test]
    fn test_flags_must_be_exactly_one() {
        assert_eq!(PendingAction::try_from(query()), Err(PendingActionError::NoAction));
        let q = OtpQuery {
            forgot: Some("true".into()),
            change_phone: Some("1".into()),
            ..query()
        };
        assert_eq!(PendingAction::try_from(q), Err(PendingActionError::Ambiguous));
        let q = OtpQuery {
            forgot: Some("false".into()),
            ..query()
        };
        assert_eq!(PendingAction::try_from(q), Err(PendingActionError::NoAction));
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let q = OtpQuery {
            register: Some("true".into()),
            name: Some("Budi".into()),
            ..query()
        };
        assert_eq!(PendingAction::try_from(q), Err(PendingActionError::Missing("password")));
        let q = OtpQuery {
            forgot: Some("true".into()),
            phone: None,
            ..Default::default()
        };
        assert_eq!(PendingAction::try_from(q), Err(PendingActionError::Missing("phone")));
    }

    #[test]
    fn test_change_phone_targets_new_number() {
        let q = OtpQuery {
            change_phone: Some("true".into()),
            user_id: Some("7".into()),
            old_phone: Some("628111".into()),
            ..query()
        };
        let action = PendingAction::try_from(q).unwrap();
        assert_eq!(action.phone(), "6281234567890");
        assert_eq!(action.purpose(), OtpPurpose::ChangePhone);
    }

    #[test]
    fn test_tagged_serde_and_verification() {
        let action = PendingAction::ResetPassword {
            phone: "62812".into(),
            verified: false,
            reset_token: None,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"kind":"reset_password","phone":"62812","verified":false}"#);
        let verified = action.into_verified(Some("tok".into()));
        assert_eq!(
            verified,
            PendingAction::ResetPassword {
                phone: "62812".into(),
                verified: true,
                reset_token: Some("tok".into()),
            }
        );
        let back: PendingAction = serde_json::from_str(&serde_json::to_string(&verified).unwrap()).unwrap();
        assert_eq!(back, verified);
    }
}
