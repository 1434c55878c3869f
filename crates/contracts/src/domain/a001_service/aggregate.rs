use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Jenis layanan penyedotan lumpur tinja dengan tarifnya
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Flat fee covering the first `included_volume_m3`
    pub base_price: i64,
    pub price_per_m3: i64,
    #[serde(default)]
    pub included_volume_m3: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Price breakdown shown while the customer fills in the reservation form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub base_price: i64,
    pub extra_volume_m3: f64,
    pub extra_cost: i64,
    pub total: i64,
}

impl Service {
    /// Tariff for an estimated volume. Volume above the included amount is
    /// billed per m³, rounded up to the whole rupiah.
    pub fn quote(&self, volume_m3: f64) -> PriceQuote {
        let volume = if volume_m3.is_finite() { volume_m3.max(0.0) } else { 0.0 };
        let extra_volume_m3 = (volume - self.included_volume_m3).max(0.0);
        let extra_cost = (extra_volume_m3 * self.price_per_m3 as f64).ceil() as i64;
        PriceQuote {
            base_price: self.base_price,
            extra_volume_m3,
            extra_cost,
            total: self.base_price + extra_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Service {
        Service {
            id: EntityId::Number(1),
            name: "Penyedotan Rumah Tangga".into(),
            description: None,
            base_price: 250_000,
            price_per_m3: 75_000,
            included_volume_m3: 2.0,
            is_active: true,
        }
    }

    #[test]
    fn test_quote_within_included_volume() {
        let q = service().quote(1.5);
        assert_eq!(q.extra_cost, 0);
        assert_eq!(q.total, 250_000);
    }

    #[test]
    fn test_quote_bills_extra_volume_rounded_up() {
        let q = service().quote(3.5);
        assert_eq!(q.extra_volume_m3, 1.5);
        assert_eq!(q.extra_cost, 112_500);
        assert_eq!(q.total, 362_500);

        let mut odd = service();
        odd.price_per_m3 = 75_001;
        assert_eq!(odd.quote(2.5).extra_cost, 37_501);
    }

    #[test]
    fn test_quote_ignores_negative_and_nan() {
        assert_eq!(service().quote(-4.0).total, 250_000);
        assert_eq!(service().quote(f64::NAN).total, 250_000);
    }

    #[test]
    fn test_deserialize_defaults() {
        let s: Service = serde_json::from_str(
            r#"{"id": 3, "name": "Kantor", "base_price": 500000, "price_per_m3": 90000}"#,
        )
        .unwrap();
        assert!(s.is_active);
        assert_eq!(s.included_volume_m3, 0.0);
        assert_eq!(s.quote(1.0).total, 590_000);
    }
}
