//! Address search against the public geocoder.

use contracts::domain::a002_location::aggregate::PlaceResult;
use gloo_net::http::Request;

use crate::shared::api_utils::{join_url, ApiError};
use crate::shared::config::config;

/// Queries shorter than this are not sent
pub const MIN_QUERY_CHARS: usize = 3;

pub fn search_url(base: &str, query: &str) -> String {
    format!(
        "{}?format=json&countrycodes=id&q={}",
        join_url(base, "/search"),
        urlencoding::encode(query.trim())
    )
}

/// Places matching `query`; results without usable coordinates are dropped
pub async fn search(query: &str) -> Result<Vec<PlaceResult>, ApiError> {
    if query.trim().chars().count() < MIN_QUERY_CHARS {
        return Ok(Vec::new());
    }
    let url = search_url(&config().geocoder.url, query);
    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;
    if !response.ok() {
        let status = response.status();
        log::warn!("Geocoder -> HTTP {}", status);
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(status, &body));
    }
    let text = response.text().await?;
    let places: Vec<PlaceResult> =
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(places.into_iter().filter(|p| p.coordinates().is_some()).collect())
}
