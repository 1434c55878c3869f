mod pending_action;

pub use pending_action::{OtpQuery, PendingAction, PendingActionError};

use serde::{Deserialize, Serialize};

/// Why an OTP is being requested; the backend picks the WhatsApp wording from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Register,
    ForgotPassword,
    ProfileUpdate,
    ChangePhone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpRequest {
    pub phone: String,
    pub purpose: OtpPurpose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub code: String,
    pub purpose: OtpPurpose,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default = "default_verified")]
    pub verified: bool,
    /// Issued for password resets so the follow-up call can prove the OTP step
    #[serde(default)]
    pub reset_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_verified() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub phone: String,
}

pub const OTP_LENGTH: usize = 6;

/// OTP codes are exactly six ASCII digits
pub fn is_valid_otp(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_format() {
        assert!(is_valid_otp("012345"));
        assert!(!is_valid_otp("12345"));
        assert!(!is_valid_otp("12345a"));
        assert!(!is_valid_otp("١٢٣٤٥٦"));
    }

    #[test]
    fn test_verify_response_defaults_to_verified() {
        let r: VerifyOtpResponse = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert!(r.verified);
        let r: VerifyOtpResponse = serde_json::from_str(r#"{"verified": false}"#).unwrap();
        assert!(!r.verified);
    }
}
