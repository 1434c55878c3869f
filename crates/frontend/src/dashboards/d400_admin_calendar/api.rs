use contracts::domain::a001_service::aggregate::Service;
use contracts::domain::a003_reservation::aggregate::Reservation;
use contracts::domain::a004_assignment::aggregate::Employee;
use futures::future::try_join3;

use crate::domain::a001_service::api as service_api;
use crate::domain::a003_reservation::api as reservation_api;
use crate::domain::a004_assignment::api as assignment_api;
use crate::shared::api_utils::ApiError;

/// Everything the calendar renders, fetched together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarData {
    pub reservations: Vec<Reservation>,
    pub employees: Vec<Employee>,
    pub services: Vec<Service>,
}

impl CalendarData {
    pub fn service_name(&self, reservation: &Reservation) -> String {
        reservation
            .service
            .as_ref()
            .or_else(|| self.services.iter().find(|s| s.id == reservation.service_id))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn employee_name(&self, reservation: &Reservation) -> Option<String> {
        let assignment = reservation.assignment.as_ref()?;
        assignment
            .employee
            .as_ref()
            .or_else(|| self.employees.iter().find(|e| e.id == assignment.employee_id))
            .map(|e| e.full_name.clone())
    }
}

/// Fetch the three lists concurrently; fails as a whole if any one fails so
/// the view never shows a mix of old and new lists.
pub async fn fetch_all() -> Result<CalendarData, ApiError> {
    let (reservations, employees, services) = try_join3(
        reservation_api::list_all(),
        assignment_api::list_employees(),
        service_api::list_all(),
    )
    .await?;
    Ok(CalendarData {
        reservations,
        employees,
        services,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_fall_back_to_lookup_lists() {
        let data = CalendarData {
            reservations: Vec::new(),
            employees: serde_json::from_str(r#"[{"id": 4, "full_name": "Pak Joko"}]"#).unwrap(),
            services: serde_json::from_str(
                r#"[{"id": 1, "name": "Rumah Tangga", "base_price": 1, "price_per_m3": 1}]"#,
            )
            .unwrap(),
        };
        let reservation: Reservation = serde_json::from_str(
            r#"{"id": 10, "user_id": 1, "location_id": 1, "service_id": 1,
                "reservation_date": "2026-10-20", "time_slot": "08:00-10:00",
                "assignments": [{"id": 9, "reservation_id": 10, "employee_id": 4}]}"#,
        )
        .unwrap();
        assert_eq!(data.service_name(&reservation), "Rumah Tangga");
        assert_eq!(data.employee_name(&reservation).as_deref(), Some("Pak Joko"));
    }
}
