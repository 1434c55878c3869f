//! Generic admin collection endpoints: `GET/POST /admin/{collection}`,
//! `PUT/DELETE /admin/{collection}/{id}`.

use serde::{Deserialize, Serialize};

/// One row of an admin collection: field name → JSON value, in the order the
/// backend sent the fields.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Collections the admin table browser can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    #[default]
    Users,
    Employees,
    Services,
    Locations,
    Reservations,
    Assignments,
    Payments,
    NotificationTemplates,
    Inspections,
}

impl Collection {
    pub const ALL: [Collection; 9] = [
        Collection::Users,
        Collection::Employees,
        Collection::Services,
        Collection::Locations,
        Collection::Reservations,
        Collection::Assignments,
        Collection::Payments,
        Collection::NotificationTemplates,
        Collection::Inspections,
    ];

    /// Path segment under `/admin/`
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Employees => "employees",
            Collection::Services => "services",
            Collection::Locations => "locations",
            Collection::Reservations => "reservations",
            Collection::Assignments => "assignments",
            Collection::Payments => "payments",
            Collection::NotificationTemplates => "notification_templates",
            Collection::Inspections => "inspections",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::Users => "Pengguna",
            Collection::Employees => "Petugas",
            Collection::Services => "Layanan",
            Collection::Locations => "Lokasi",
            Collection::Reservations => "Reservasi",
            Collection::Assignments => "Penugasan",
            Collection::Payments => "Pembayaran",
            Collection::NotificationTemplates => "Template Notifikasi",
            Collection::Inspections => "Inspeksi",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.path() == path)
    }
}
