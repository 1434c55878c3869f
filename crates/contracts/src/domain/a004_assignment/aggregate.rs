use serde::{Deserialize, Serialize};

use crate::domain::common::{first_of_many, EntityId};

/// Petugas lapangan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Penugasan petugas ke sebuah reservasi
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: EntityId,
    pub reservation_id: EntityId,
    pub employee_id: EntityId,
    #[serde(default)]
    pub assigned_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "first_of_many")]
    pub employee: Option<Employee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAssignmentDto {
    pub reservation_id: EntityId,
    pub employee_id: EntityId,
}
