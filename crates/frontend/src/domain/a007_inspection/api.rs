use contracts::domain::a007_inspection::aggregate::{Inspection, InspectionDto};

use crate::shared::api_utils::{post_json, ApiError};

pub async fn create(dto: &InspectionDto) -> Result<Inspection, ApiError> {
    post_json("/inspections", dto).await
}
