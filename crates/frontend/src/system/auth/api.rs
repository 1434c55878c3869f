use contracts::system::auth::{
    CheckPhoneRequest, CheckPhoneResponse, LoginRequest, LoginResponse, MeResponse,
    MessageResponse, RegisterRequest, RegisterResponse, ResetPasswordRequest, UserInfo,
};

use crate::shared::api_utils::{get_with_token, post_public, ApiError};

/// Sign in with phone and password
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    post_public("/auth/login", request).await
}

/// Current user for `token`; fails when the token is no longer valid
pub async fn me(token: &str) -> Result<UserInfo, ApiError> {
    let body: MeResponse = get_with_token("/auth/me", token).await?;
    Ok(body.into_user())
}

pub async fn register(request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
    post_public("/auth/register", request).await
}

/// Whether an account already uses `phone`
pub async fn phone_exists(phone: &str) -> Result<bool, ApiError> {
    let request = CheckPhoneRequest { phone: phone.to_string() };
    let response: CheckPhoneResponse = post_public("/auth/check-phone", &request).await?;
    Ok(response.exists)
}

pub async fn reset_password(request: &ResetPasswordRequest) -> Result<MessageResponse, ApiError> {
    post_public("/auth/reset-password", request).await
}
