use contracts::domain::a003_reservation::aggregate::Reservation;
use contracts::domain::a004_assignment::aggregate::{Assignment, CreateAssignmentDto, Employee};
use serde::Deserialize;

use crate::shared::api_utils::{get_list, post_json, ApiError};

/// Employee assignment joined with its reservation, as listed for the
/// signed-in employee
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssignmentTask {
    #[serde(flatten)]
    pub assignment: Assignment,
    #[serde(default, deserialize_with = "contracts::domain::common::first_of_many", alias = "reservations")]
    pub reservation: Option<Reservation>,
    #[serde(default)]
    pub inspected: bool,
}

pub async fn assign(dto: &CreateAssignmentDto) -> Result<Assignment, ApiError> {
    post_json("/assignments", dto).await
}

pub async fn list_mine() -> Result<Vec<AssignmentTask>, ApiError> {
    get_list("/assignments/mine").await
}

pub async fn list_employees() -> Result<Vec<Employee>, ApiError> {
    let mut items: Vec<Employee> = get_list("/admin/employees").await?;
    items.retain(|e| e.is_active);
    items.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityId;

    #[test]
    fn test_task_flattens_assignment() {
        let task: AssignmentTask = serde_json::from_str(
            r#"{"id": 4, "reservation_id": 10, "employee_id": 2, "status": "assigned",
                "reservations": [{"id": 10, "user_id": 1, "location_id": 3, "service_id": 1,
                                  "reservation_date": "2026-10-21", "time_slot": "08:00-10:00"}]}"#,
        )
        .unwrap();
        assert_eq!(task.assignment.id, EntityId::Number(4));
        assert!(!task.inspected);
        assert_eq!(task.reservation.unwrap().time_slot, "08:00-10:00");
    }
}
