//! Helpers for talking to the backend REST API.
//!
//! Every request carries the proxy bypass header and, when a session exists,
//! the bearer token. Responses are mapped onto [`ApiError`].

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::config;
use crate::system::auth::storage;

/// Fallback shown when the backend gives no usable message
pub const GENERIC_FAILURE: &str = "Terjadi kesalahan, silakan coba lagi";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Tidak dapat terhubung ke server")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Respons server tidak valid")]
    Parse(String),
    #[error("Sesi Anda telah berakhir, silakan masuk kembali")]
    NotAuthenticated,
}

impl ApiError {
    /// Build the error for a non-2xx response, preferring the server's own
    /// `message` (or `error`) field.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["message", "error", "msg"]
                    .iter()
                    .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::NotAuthenticated) || self.status() == Some(401)
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Parse(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// List endpoints answer either with a bare array or wrapped in `data`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

/// Join a base URL and an absolute path without doubling the slash
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Build a full API URL from a path such as `/auth/login`
pub fn api_url(path: &str) -> String {
    join_url(&config().api.base_url, path)
}

fn with_headers(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    let api = &config().api;
    let builder = builder
        .header(&api.bypass_header, &api.bypass_value)
        .header("Accept", "application/json");
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn required_token() -> Result<String, ApiError> {
    storage::get_token().ok_or(ApiError::NotAuthenticated)
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    log::warn!("API {} -> HTTP {}", response.url(), status);
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// GET without credentials (public endpoints)
pub async fn get_public<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = with_headers(Request::get(&api_url(path)), None).send().await?;
    read_json(check(response).await?).await
}

/// POST without credentials (login, register, OTP)
pub async fn post_public<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = with_headers(Request::post(&api_url(path)), None)
        .json(body)?
        .send()
        .await?;
    read_json(check(response).await?).await
}

/// GET with an explicit token; used to validate a token before it is stored
pub async fn get_with_token<T: DeserializeOwned>(path: &str, token: &str) -> Result<T, ApiError> {
    let response = with_headers(Request::get(&api_url(path)), Some(token)).send().await?;
    read_json(check(response).await?).await
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let token = required_token()?;
    get_with_token(path, &token).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let token = required_token()?;
    let response = with_headers(Request::post(&api_url(path)), Some(&token))
        .json(body)?
        .send()
        .await?;
    read_json(check(response).await?).await
}

/// GET a list, accepting both list body shapes
pub async fn get_list<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, ApiError> {
    let body: ListBody<T> = get_json(path).await?;
    Ok(body.into_items())
}

/// POST whose response body is not needed (may be empty)
pub async fn post_unit<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let token = required_token()?;
    let response = with_headers(Request::post(&api_url(path)), Some(&token))
        .json(body)?
        .send()
        .await?;
    check(response).await?;
    Ok(())
}

pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let token = required_token()?;
    let response = with_headers(Request::put(&api_url(path)), Some(&token))
        .json(body)?
        .send()
        .await?;
    check(response).await?;
    Ok(())
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let token = required_token()?;
    let response = with_headers(Request::delete(&api_url(path)), Some(&token))
        .send()
        .await?;
    check(response).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_body_shapes() {
        let bare: ListBody<serde_json::Value> = serde_json::from_str(r#"[{"id": 1}]"#).unwrap();
        assert_eq!(bare.into_items().len(), 1);
        let wrapped: ListBody<serde_json::Value> =
            serde_json::from_str(r#"{"data": [{"id": 1}, {"id": 2}]}"#).unwrap();
        assert_eq!(wrapped.into_items().len(), 2);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://x.id/api/", "/auth/me"), "https://x.id/api/auth/me");
        assert_eq!(join_url("https://x.id", "auth/me"), "https://x.id/auth/me");
    }

    #[test]
    fn test_status_error_prefers_server_message() {
        let e = ApiError::from_status(422, r#"{"message": "Nomor sudah terdaftar"}"#);
        assert_eq!(e.to_string(), "Nomor sudah terdaftar");
        assert_eq!(e.status(), Some(422));
        let e = ApiError::from_status(400, r#"{"error": "Kode OTP salah"}"#);
        assert_eq!(e.to_string(), "Kode OTP salah");
    }

    #[test]
    fn test_status_error_falls_back() {
        assert_eq!(ApiError::from_status(500, "<html>").to_string(), GENERIC_FAILURE);
        assert_eq!(ApiError::from_status(500, r#"{"message": ""}"#).to_string(), GENERIC_FAILURE);
        assert_eq!(ApiError::from_status(500, r#"{"message": 12}"#).to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(ApiError::NotAuthenticated.is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
        assert_eq!(ApiError::Network("x".into()).to_string(), "Tidak dapat terhubung ke server");
    }
}
