use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_service::aggregate::Service;
use crate::domain::a002_location::aggregate::Location;
use crate::domain::a004_assignment::aggregate::Assignment;
use crate::domain::a005_payment::aggregate::Payment;
use crate::domain::common::{first_of_many, EntityId};

/// Time windows offered to customers, in display order
pub const TIME_SLOTS: &[&str] = &["08:00-10:00", "10:00-12:00", "13:00-15:00", "15:00-17:00"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Menunggu",
            ReservationStatus::Confirmed => "Terkonfirmasi",
            ReservationStatus::InProgress => "Dikerjakan",
            ReservationStatus::Completed => "Selesai",
            ReservationStatus::Cancelled => "Dibatalkan",
            ReservationStatus::Unknown => "-",
        }
    }
}

/// Pemilik reservasi as embedded by the backend join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationUser {
    pub id: EntityId,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Reservasi layanan sedot tinja.
///
/// The nested relations are present only on endpoints that join them
/// (admin listing, history); plain inserts echo just the flat columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: EntityId,
    pub user_id: EntityId,
    pub location_id: EntityId,
    pub service_id: EntityId,
    /// `YYYY-MM-DD`, possibly with a time suffix
    pub reservation_date: String,
    pub time_slot: String,
    #[serde(default)]
    pub volume_m3: f64,
    #[serde(default)]
    pub total_price: i64,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "first_of_many")]
    pub user: Option<ReservationUser>,
    #[serde(default, deserialize_with = "first_of_many")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "first_of_many")]
    pub service: Option<Service>,
    #[serde(default, deserialize_with = "first_of_many", alias = "assignments")]
    pub assignment: Option<Assignment>,
    #[serde(default, deserialize_with = "first_of_many", alias = "payments")]
    pub payment: Option<Payment>,
}

impl Reservation {
    /// Calendar day of the reservation, ignoring any time suffix
    pub fn date(&self) -> Option<NaiveDate> {
        let day = self.reservation_date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    pub fn is_paid(&self) -> bool {
        self.payment.as_ref().map(|p| p.status.is_paid()).unwrap_or(false)
    }

    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    /// Whether the customer can still open the payment popup
    pub fn awaiting_payment(&self) -> bool {
        !self.is_paid()
            && !matches!(self.status, ReservationStatus::Cancelled | ReservationStatus::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateReservationDto {
    pub location_id: EntityId,
    pub service_id: EntityId,
    pub reservation_date: String,
    pub time_slot: String,
    pub volume_m3: f64,
    pub total_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateReservationDto {
    /// Checks run before the request is sent. `today` is `YYYY-MM-DD`.
    pub fn validate(&self, today: &str) -> Result<(), String> {
        if self.location_id == EntityId::default() {
            return Err("Pilih lokasi terlebih dahulu".into());
        }
        if self.service_id == EntityId::default() {
            return Err("Pilih jenis layanan".into());
        }
        let Ok(date) = NaiveDate::parse_from_str(&self.reservation_date, "%Y-%m-%d") else {
            return Err("Tanggal reservasi tidak valid".into());
        };
        if let Ok(today) = NaiveDate::parse_from_str(today, "%Y-%m-%d") {
            if date < today {
                return Err("Tanggal reservasi tidak boleh di masa lalu".into());
            }
        }
        if self.time_slot.trim().is_empty() {
            return Err("Pilih jam layanan".into());
        }
        if !(self.volume_m3 > 0.0) {
            return Err("Perkiraan volume harus lebih dari 0 m³".into());
        }
        Ok(())
    }
}

/// Remaining capacity of one time slot on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub slot: String,
    pub capacity: u32,
    pub booked: u32,
}

impl SlotAvailability {
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.booked)
    }

    pub fn is_available(&self) -> bool {
        self.remaining() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub date: String,
    #[serde(default)]
    pub slots: Vec<SlotAvailability>,
}

impl AvailabilityResponse {
    /// Slots that are still bookable. A slot the backend did not mention is
    /// treated as open.
    pub fn is_slot_open(&self, slot: &str) -> bool {
        self.slots
            .iter()
            .find(|s| s.slot == slot)
            .map(SlotAvailability::is_available)
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_payment::aggregate::PaymentStatus;

    const JOINED: &str = r#"{
        "id": 10, "user_id": 2, "location_id": 3, "service_id": 1,
        "reservation_date": "2026-10-21T00:00:00", "time_slot": "08:00-10:00",
        "volume_m3": 2.5, "total_price": 287500, "status": "confirmed",
        "user": {"id": 2, "full_name": "Budi"},
        "assignments": [],
        "payments": [{"id": 5, "reservation_id": 10, "amount": 287500, "status": "settlement"}]
    }"#;

    #[test]
    fn test_deserialize_joined_reservation() {
        let r: Reservation = serde_json::from_str(JOINED).unwrap();
        assert_eq!(r.date(), NaiveDate::from_ymd_opt(2026, 10, 21));
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert!(!r.is_assigned());
        assert!(r.is_paid());
        assert_eq!(r.payment.unwrap().status, PaymentStatus::Paid);
        assert_eq!(r.user.unwrap().full_name, "Budi");
    }

    #[test]
    fn test_date_rejects_garbage() {
        let mut r: Reservation = serde_json::from_str(JOINED).unwrap();
        r.reservation_date = "21/10/2026".into();
        assert_eq!(r.date(), None);
        r.reservation_date = "2026".into();
        assert_eq!(r.date(), None);
    }

    #[test]
    fn test_create_dto_validation() {
        let mut dto = CreateReservationDto {
            location_id: EntityId::Number(3),
            service_id: EntityId::Number(1),
            reservation_date: "2026-10-20".into(),
            time_slot: "08:00-10:00".into(),
            volume_m3: 2.0,
            total_price: 250_000,
            notes: None,
        };
        assert!(dto.validate("2026-10-19").is_ok());
        assert!(dto.validate("2026-10-20").is_ok());
        assert_eq!(
            dto.validate("2026-10-21").unwrap_err(),
            "Tanggal reservasi tidak boleh di masa lalu"
        );
        dto.volume_m3 = 0.0;
        assert!(dto.validate("2026-10-19").is_err());
        dto.volume_m3 = f64::NAN;
        assert!(dto.validate("2026-10-19").is_err());
        dto.location_id = EntityId::default();
        assert_eq!(dto.validate("2026-10-19").unwrap_err(), "Pilih lokasi terlebih dahulu");
    }

    #[test]
    fn test_slot_availability() {
        let a: AvailabilityResponse = serde_json::from_str(
            r#"{"date": "2026-10-20", "slots": [
                {"slot": "08:00-10:00", "capacity": 3, "booked": 3},
                {"slot": "10:00-12:00", "capacity": 3, "booked": 1}
            ]}"#,
        )
        .unwrap();
        assert!(!a.is_slot_open("08:00-10:00"));
        assert!(a.is_slot_open("10:00-12:00"));
        assert!(a.is_slot_open("13:00-15:00"));
        assert_eq!(a.slots[1].remaining(), 2);
    }
}
