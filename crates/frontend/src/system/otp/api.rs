use contracts::system::auth::MessageResponse;
use contracts::system::otp::{
    ForgotPasswordRequest, OtpPurpose, SendOtpRequest, VerifyOtpRequest, VerifyOtpResponse,
};

use crate::shared::api_utils::{post_public, ApiError};

pub async fn send_otp(phone: &str, purpose: OtpPurpose) -> Result<MessageResponse, ApiError> {
    let request = SendOtpRequest { phone: phone.to_string(), purpose };
    post_public("/otp/send", &request).await
}

/// Sends the reset OTP; the backend refuses unknown numbers
pub async fn forgot_password(phone: &str) -> Result<MessageResponse, ApiError> {
    let request = ForgotPasswordRequest { phone: phone.to_string() };
    post_public("/otp/forgot-password", &request).await
}

pub async fn verify_otp(phone: &str, code: &str, purpose: OtpPurpose) -> Result<VerifyOtpResponse, ApiError> {
    let request = VerifyOtpRequest {
        phone: phone.to_string(),
        code: code.to_string(),
        purpose,
    };
    post_public("/otp/verify", &request).await
}
