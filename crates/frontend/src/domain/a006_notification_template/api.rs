use contracts::domain::a006_notification_template::aggregate::{
    BroadcastRequest, BroadcastResponse, NotificationTemplate, TemplateDto,
};
use contracts::domain::common::EntityId;

use crate::shared::api_utils::{delete, get_list, post_json, post_unit, put_json, ApiError};

const BASE: &str = "/notifications/templates";

fn template_path(id: &EntityId) -> String {
    format!("{}/{}", BASE, urlencoding::encode(&id.as_string()))
}

pub async fn list() -> Result<Vec<NotificationTemplate>, ApiError> {
    let mut items: Vec<NotificationTemplate> = get_list(BASE).await?;
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

pub async fn create(dto: &TemplateDto) -> Result<(), ApiError> {
    post_unit(BASE, dto).await
}

pub async fn update(id: &EntityId, dto: &TemplateDto) -> Result<(), ApiError> {
    put_json(&template_path(id), dto).await
}

pub async fn remove(id: &EntityId) -> Result<(), ApiError> {
    delete(&template_path(id)).await
}

/// Send the template to every customer; the backend reports per-recipient results
pub async fn broadcast(template_id: &EntityId) -> Result<BroadcastResponse, ApiError> {
    let request = BroadcastRequest {
        template_id: template_id.clone(),
    };
    post_json("/notifications/broadcast", &request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_path() {
        assert_eq!(template_path(&EntityId::from(3)), "/notifications/templates/3");
        assert_eq!(template_path(&EntityId::from("a/b")), "/notifications/templates/a%2Fb");
    }
}
