use contracts::domain::a002_location::aggregate::{LocationDto, PlaceResult};
use contracts::domain::common::EntityId;

/// Fields of the "add location" form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationForm {
    pub label: String,
    pub address: String,
    pub notes: String,
    pub coordinates: Option<(f64, f64)>,
}

impl LocationForm {
    /// Take address and coordinates from a geocoder hit
    pub fn pick(&mut self, place: &PlaceResult) {
        if let Some(coords) = place.coordinates() {
            self.address = place.display_name.clone();
            self.coordinates = Some(coords);
        }
    }

    pub fn to_dto(&self, user_id: &EntityId) -> Result<LocationDto, String> {
        let (latitude, longitude) = self.coordinates.unwrap_or((0.0, 0.0));
        let notes = self.notes.trim();
        let dto = LocationDto {
            user_id: user_id.clone(),
            label: self.label.trim().to_string(),
            address: self.address.trim().to_string(),
            latitude,
            longitude,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        };
        dto.validate()?;
        Ok(dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place() -> PlaceResult {
        PlaceResult {
            display_name: "Jl. Braga, Bandung".into(),
            lat: "-6.917".into(),
            lon: "107.609".into(),
        }
    }

    #[test]
    fn test_pick_fills_address_and_coordinates() {
        let mut form = LocationForm::default();
        form.pick(&place());
        assert_eq!(form.address, "Jl. Braga, Bandung");
        assert_eq!(form.coordinates, Some((-6.917, 107.609)));

        let mut broken = place();
        broken.lat = "?".into();
        broken.display_name = "Other".into();
        form.pick(&broken);
        assert_eq!(form.address, "Jl. Braga, Bandung");
    }

    #[test]
    fn test_to_dto_requires_picked_place() {
        let mut form = LocationForm {
            label: "Rumah".into(),
            address: "Jl. Braga".into(),
            ..Default::default()
        };
        let user = EntityId::Text("u-1".into());
        assert!(form.to_dto(&user).is_err());
        form.pick(&place());
        form.notes = "  ".into();
        let dto = form.to_dto(&user).unwrap();
        assert_eq!(dto.notes, None);
        assert_eq!(dto.user_id, user);
    }
}
