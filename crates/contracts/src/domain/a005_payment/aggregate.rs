use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Payment state as reported by the gateway webhook and stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    #[serde(alias = "waiting")]
    Pending,
    #[serde(alias = "settlement", alias = "capture", alias = "success", alias = "lunas")]
    Paid,
    #[serde(alias = "deny", alias = "cancel", alias = "failure")]
    Failed,
    #[serde(alias = "expire")]
    Expired,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Menunggu Pembayaran",
            PaymentStatus::Paid => "Lunas",
            PaymentStatus::Failed => "Gagal",
            PaymentStatus::Expired => "Kedaluwarsa",
            PaymentStatus::Unknown => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: EntityId,
    pub reservation_id: EntityId,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub paid_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTokenRequest {
    pub reservation_id: EntityId,
}

/// Snap transaction token issued by the backend for the checkout popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTokenResponse {
    pub token: String,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_statuses_map_to_paid() {
        for raw in ["\"paid\"", "\"settlement\"", "\"capture\"", "\"success\""] {
            let s: PaymentStatus = serde_json::from_str(raw).unwrap();
            assert!(s.is_paid(), "{raw}");
        }
    }

    #[test]
    fn test_other_statuses() {
        let s: PaymentStatus = serde_json::from_str("\"expire\"").unwrap();
        assert_eq!(s, PaymentStatus::Expired);
        let s: PaymentStatus = serde_json::from_str("\"deny\"").unwrap();
        assert_eq!(s, PaymentStatus::Failed);
        let s: PaymentStatus = serde_json::from_str("\"refund\"").unwrap();
        assert_eq!(s, PaymentStatus::Unknown);
        let p: Payment = serde_json::from_str(r#"{"id": 1, "reservation_id": 9}"#).unwrap();
        assert_eq!(p.status, PaymentStatus::Pending);
    }
}
