use contracts::domain::a005_payment::aggregate::{PaymentTokenRequest, PaymentTokenResponse};
use contracts::domain::common::EntityId;

use crate::shared::api_utils::{post_json, ApiError};

/// Ask the backend to open a gateway transaction for a reservation
pub async fn create_token(reservation_id: &EntityId) -> Result<PaymentTokenResponse, ApiError> {
    let request = PaymentTokenRequest {
        reservation_id: reservation_id.clone(),
    };
    post_json("/payments/token", &request).await
}
