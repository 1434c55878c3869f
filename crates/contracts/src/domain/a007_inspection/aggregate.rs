use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SepticCondition {
    #[default]
    Good,
    NeedsRepair,
    Damaged,
}

impl SepticCondition {
    pub const ALL: [SepticCondition; 3] =
        [SepticCondition::Good, SepticCondition::NeedsRepair, SepticCondition::Damaged];

    pub fn as_str(&self) -> &'static str {
        match self {
            SepticCondition::Good => "good",
            SepticCondition::NeedsRepair => "needs_repair",
            SepticCondition::Damaged => "damaged",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SepticCondition::Good => "Baik",
            SepticCondition::NeedsRepair => "Perlu Perbaikan",
            SepticCondition::Damaged => "Rusak",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Hasil pemeriksaan lapangan oleh petugas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: EntityId,
    pub assignment_id: EntityId,
    pub actual_volume_m3: f64,
    pub septic_condition: SepticCondition,
    #[serde(default)]
    pub access_notes: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InspectionDto {
    pub assignment_id: EntityId,
    pub actual_volume_m3: f64,
    pub septic_condition: SepticCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InspectionDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.assignment_id == EntityId::default() {
            return Err("Penugasan tidak dikenal".into());
        }
        if !self.actual_volume_m3.is_finite() || self.actual_volume_m3 <= 0.0 {
            return Err("Volume aktual harus lebih dari 0 m³".into());
        }
        if self.septic_condition != SepticCondition::Good
            && self.notes.as_deref().map(str::trim).unwrap_or("").is_empty()
        {
            return Err("Jelaskan kondisi septic tank pada catatan".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let mut dto = InspectionDto {
            assignment_id: EntityId::Number(4),
            actual_volume_m3: 2.0,
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.septic_condition = SepticCondition::Damaged;
        assert!(dto.validate().is_err());
        dto.notes = Some("Retak di dinding".into());
        assert!(dto.validate().is_ok());
        dto.actual_volume_m3 = 0.0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_condition_round_trip_names() {
        for c in SepticCondition::ALL {
            assert_eq!(SepticCondition::parse(c.as_str()), Some(c));
            assert_eq!(serde_json::to_string(&c).unwrap(), format!("\"{}\"", c.as_str()));
        }
    }
}
