use contracts::domain::a002_location::aggregate::{Location, LocationDto};

use crate::shared::api_utils::ApiError;
use crate::shared::baas;

const TABLE: &str = "locations";

/// Locations owned by `user_id`, most recent first
pub async fn list_mine(user_id: &str) -> Result<Vec<Location>, ApiError> {
    let mut items: Vec<Location> = baas::select(TABLE, &[("user_id", user_id)]).await?;
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(items)
}

pub async fn create(dto: &LocationDto) -> Result<Location, ApiError> {
    baas::insert(TABLE, dto).await
}

pub async fn remove(id: &str) -> Result<(), ApiError> {
    baas::remove(TABLE, id).await
}
