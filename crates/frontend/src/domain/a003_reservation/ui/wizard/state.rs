use contracts::domain::a001_service::aggregate::{PriceQuote, Service};
use contracts::domain::a002_location::aggregate::Location;
use contracts::domain::a003_reservation::aggregate::{AvailabilityResponse, CreateReservationDto};

use crate::shared::number_format::parse_decimal;

/// Raw wizard inputs; ids are kept as the strings the `<select>`s report
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReservationDraft {
    pub location_id: String,
    pub service_id: String,
    pub date: String,
    pub time_slot: String,
    pub volume: String,
    pub notes: String,
}

impl ReservationDraft {
    pub fn service<'a>(&self, services: &'a [Service]) -> Option<&'a Service> {
        services.iter().find(|s| s.id.as_string() == self.service_id)
    }

    pub fn location<'a>(&self, locations: &'a [Location]) -> Option<&'a Location> {
        locations.iter().find(|l| l.id.as_string() == self.location_id)
    }

    /// Price for the chosen service and volume, once both are usable
    pub fn quote(&self, services: &[Service]) -> Option<PriceQuote> {
        let service = self.service(services)?;
        let volume = parse_decimal(&self.volume)?;
        Some(service.quote(volume))
    }

    pub fn to_dto(
        &self,
        locations: &[Location],
        services: &[Service],
        availability: Option<&AvailabilityResponse>,
        today: &str,
    ) -> Result<CreateReservationDto, String> {
        let location = self.location(locations).ok_or("Pilih lokasi terlebih dahulu")?;
        let service = self.service(services).ok_or("Pilih jenis layanan")?;
        let volume = parse_decimal(&self.volume).ok_or("Perkiraan volume harus berupa angka")?;
        let notes = self.notes.trim();
        let dto = CreateReservationDto {
            location_id: location.id.clone(),
            service_id: service.id.clone(),
            reservation_date: self.date.trim().to_string(),
            time_slot: self.time_slot.clone(),
            volume_m3: volume,
            total_price: service.quote(volume).total,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        };
        dto.validate(today)?;
        if let Some(a) = availability {
            if a.date == dto.reservation_date && !a.is_slot_open(&dto.time_slot) {
                return Err("Jam layanan tersebut sudah penuh, pilih jam lain".into());
            }
        }
        Ok(dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityId;

    fn services() -> Vec<Service> {
        serde_json::from_str(
            r#"[{"id": 1, "name": "Rumah", "base_price": 250000, "price_per_m3": 75000, "included_volume_m3": 2.0}]"#,
        )
        .unwrap()
    }

    fn locations() -> Vec<Location> {
        serde_json::from_str(
            r#"[{"id": "loc-1", "user_id": "u-1", "label": "Rumah", "address": "Jl. Braga",
                 "latitude": -6.9, "longitude": 107.6}]"#,
        )
        .unwrap()
    }

    fn draft() -> ReservationDraft {
        ReservationDraft {
            location_id: "loc-1".into(),
            service_id: "1".into(),
            date: "2026-10-21".into(),
            time_slot: "08:00-10:00".into(),
            volume: "3,5".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_quote_needs_service_and_volume() {
        assert_eq!(draft().quote(&services()).map(|q| q.total), Some(362_500));
        let mut d = draft();
        d.volume = String::new();
        assert_eq!(d.quote(&services()), None);
        d = draft();
        d.service_id = "9".into();
        assert_eq!(d.quote(&services()), None);
    }

    #[test]
    fn test_to_dto_carries_quoted_total() {
        let dto = draft().to_dto(&locations(), &services(), None, "2026-10-19").unwrap();
        assert_eq!(dto.total_price, 362_500);
        assert_eq!(dto.location_id, EntityId::Text("loc-1".into()));
        assert_eq!(dto.notes, None);
    }

    #[test]
    fn test_to_dto_rejects_full_slot() {
        let availability: AvailabilityResponse = serde_json::from_str(
            r#"{"date": "2026-10-21", "slots": [{"slot": "08:00-10:00", "capacity": 2, "booked": 2}]}"#,
        )
        .unwrap();
        let err = draft()
            .to_dto(&locations(), &services(), Some(&availability), "2026-10-19")
            .unwrap_err();
        assert!(err.contains("penuh"));

        // availability for another day does not apply
        let mut d = draft();
        d.date = "2026-10-22".into();
        assert!(d.to_dto(&locations(), &services(), Some(&availability), "2026-10-19").is_ok());
    }

    #[test]
    fn test_to_dto_rejects_past_date() {
        let mut d = draft();
        d.date = "2026-10-01".into();
        assert!(d.to_dto(&locations(), &services(), None, "2026-10-19").is_err());
    }
}
