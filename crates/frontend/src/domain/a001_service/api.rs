use contracts::domain::a001_service::aggregate::Service;

use crate::shared::api_utils::ApiError;
use crate::shared::baas;

/// Services customers can book, cheapest first
pub async fn list_active() -> Result<Vec<Service>, ApiError> {
    let mut items: Vec<Service> = baas::select("services", &[("is_active", "true")]).await?;
    items.retain(|s| s.is_active);
    items.sort_by(|a, b| a.base_price.cmp(&b.base_price).then_with(|| a.name.cmp(&b.name)));
    Ok(items)
}

/// All services including inactive ones, for admin screens
pub async fn list_all() -> Result<Vec<Service>, ApiError> {
    baas::select("services", &[]).await
}
