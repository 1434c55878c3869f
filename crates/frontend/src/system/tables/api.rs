use async_trait::async_trait;
use contracts::domain::common::EntityId;
use contracts::system::tables::{Collection, Record};

use super::actions::CollectionApi;
use crate::shared::api_utils::{self, ApiError};

fn collection_path(collection: Collection) -> String {
    format!("/admin/{}", collection.path())
}

fn record_path(collection: Collection, id: &EntityId) -> String {
    format!("/admin/{}/{}", collection.path(), urlencoding::encode(&id.as_string()))
}

/// The backend's `/admin/{collection}` endpoints
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpCollectionApi;

#[async_trait(?Send)]
impl CollectionApi for HttpCollectionApi {
    async fn list(&self, collection: Collection) -> Result<Vec<Record>, ApiError> {
        api_utils::get_list(&collection_path(collection)).await
    }

    async fn create(&self, collection: Collection, payload: &Record) -> Result<(), ApiError> {
        api_utils::post_unit(&collection_path(collection), payload).await
    }

    async fn update(&self, collection: Collection, id: &EntityId, payload: &Record) -> Result<(), ApiError> {
        api_utils::put_json(&record_path(collection, id), payload).await
    }

    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<(), ApiError> {
        api_utils::delete(&record_path(collection, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(collection_path(Collection::NotificationTemplates), "/admin/notification_templates");
        assert_eq!(record_path(Collection::Users, &EntityId::from("a b")), "/admin/users/a%20b");
        assert_eq!(record_path(Collection::Payments, &EntityId::from(12)), "/admin/payments/12");
    }
}
