//! Thin PostgREST-style client for the hosted database tables
//! (profiles, locations, services) that the app reads and writes directly.

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_utils::{join_url, ApiError};
use super::config::config;
use crate::system::auth::storage;

/// Query string of `select=*` plus one `col=eq.value` per filter
pub fn eq_query(filters: &[(&str, &str)]) -> String {
    let mut parts = vec!["select=*".to_string()];
    parts.extend(
        filters
            .iter()
            .map(|(col, value)| format!("{}=eq.{}", col, urlencoding::encode(value))),
    );
    parts.join("&")
}

pub fn table_url(table: &str, query: &str) -> String {
    let base = join_url(&config().baas.url, &format!("/rest/v1/{}", table));
    if query.is_empty() {
        base
    } else {
        format!("{}?{}", base, query)
    }
}

fn authorize(builder: RequestBuilder) -> RequestBuilder {
    let baas = &config().baas;
    let bearer = storage::get_token().unwrap_or_else(|| baas.anon_key.clone());
    builder
        .header("apikey", &baas.anon_key)
        .header("Authorization", &format!("Bearer {}", bearer))
        .header("Accept", "application/json")
}

async fn check(response: gloo_net::http::Response) -> Result<gloo_net::http::Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    log::warn!("BaaS {} -> HTTP {}", response.url(), status);
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

/// `GET /rest/v1/{table}?select=*&col=eq.v...`
pub async fn select<T: DeserializeOwned>(table: &str, filters: &[(&str, &str)]) -> Result<Vec<T>, ApiError> {
    let response = authorize(Request::get(&table_url(table, &eq_query(filters))))
        .send()
        .await?;
    let text = check(response).await?.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Insert one row and return it as stored
pub async fn insert<B: Serialize, T: DeserializeOwned>(table: &str, row: &B) -> Result<T, ApiError> {
    let response = authorize(Request::post(&table_url(table, "")))
        .header("Prefer", "return=representation")
        .json(row)?
        .send()
        .await?;
    let text = check(response).await?.text().await?;
    let mut rows: Vec<T> = serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))?;
    if rows.is_empty() {
        return Err(ApiError::Parse(format!("insert into {} returned no rows", table)));
    }
    Ok(rows.swap_remove(0))
}

/// `PATCH /rest/v1/{table}?id=eq.{id}`
pub async fn update<B: Serialize>(table: &str, id: &str, patch: &B) -> Result<(), ApiError> {
    let query = format!("id=eq.{}", urlencoding::encode(id));
    let response = authorize(Request::patch(&table_url(table, &query)))
        .json(patch)?
        .send()
        .await?;
    check(response).await?;
    Ok(())
}

/// `DELETE /rest/v1/{table}?id=eq.{id}`
pub async fn remove(table: &str, id: &str) -> Result<(), ApiError> {
    let query = format!("id=eq.{}", urlencoding::encode(id));
    let response = authorize(Request::delete(&table_url(table, &query)))
        .send()
        .await?;
    check(response).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_query() {
        assert_eq!(eq_query(&[]), "select=*");
        assert_eq!(
            eq_query(&[("user_id", "abc-1"), ("label", "Rumah Ibu")]),
            "select=*&user_id=eq.abc-1&label=eq.Rumah%20Ibu"
        );
    }
}
