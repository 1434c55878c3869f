use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Titik lokasi septic tank milik pelanggan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    pub user_id: EntityId,
    pub label: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert payload; `id`/`created_at` are assigned by the data service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationDto {
    pub user_id: EntityId,
    pub label: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LocationDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.label.trim().is_empty() {
            return Err("Nama lokasi wajib diisi".into());
        }
        if self.address.trim().is_empty() {
            return Err("Alamat wajib diisi".into());
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Err("Koordinat tidak valid".into());
        }
        if self.latitude == 0.0 && self.longitude == 0.0 {
            return Err("Pilih titik lokasi dari hasil pencarian alamat".into());
        }
        Ok(())
    }
}

/// Place as returned by the geocoding search endpoint.
///
/// The geocoder sends coordinates as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl PlaceResult {
    /// Coordinates as numbers, `None` if the geocoder sent garbage
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lon = self.lon.trim().parse::<f64>().ok()?;
        Some((lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_coordinates() {
        let places: Vec<PlaceResult> = serde_json::from_str(
            r#"[{"display_name":"Jl. Merdeka, Bandung","lat":"-6.9147","lon":"107.6098","importance":0.5},
                {"display_name":"Broken","lat":"n/a","lon":"1"}]"#,
        )
        .unwrap();
        assert_eq!(places[0].coordinates(), Some((-6.9147, 107.6098)));
        assert_eq!(places[1].coordinates(), None);
    }

    #[test]
    fn test_location_dto_validation() {
        let mut dto = LocationDto {
            user_id: EntityId::Number(1),
            label: "Rumah".into(),
            address: "Jl. Merdeka 1".into(),
            latitude: -6.9,
            longitude: 107.6,
            notes: None,
        };
        assert!(dto.validate().is_ok());
        dto.latitude = 0.0;
        dto.longitude = 0.0;
        assert!(dto.validate().is_err());
        dto.latitude = 120.0;
        assert_eq!(dto.validate().unwrap_err(), "Koordinat tidak valid");
        dto.label = " ".into();
        assert_eq!(dto.validate().unwrap_err(), "Nama lokasi wajib diisi");
    }
}
