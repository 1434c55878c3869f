use contracts::domain::a003_reservation::aggregate::{
    AvailabilityResponse, CreateReservationDto, Reservation,
};

use crate::shared::api_utils::{get_json, get_list, post_json, ApiError};

pub fn availability_path(date: &str) -> String {
    format!("/reservations/availability?date={}", urlencoding::encode(date))
}

pub async fn availability(date: &str) -> Result<AvailabilityResponse, ApiError> {
    get_json(&availability_path(date)).await
}

pub async fn create(dto: &CreateReservationDto) -> Result<Reservation, ApiError> {
    post_json("/reservations", dto).await
}

/// The signed-in customer's reservations, newest first
pub async fn list_mine() -> Result<Vec<Reservation>, ApiError> {
    let mut items: Vec<Reservation> = get_list("/reservations/mine").await?;
    sort_newest_first(&mut items);
    Ok(items)
}

/// Every reservation with its joined relations, for the admin calendar
pub async fn list_all() -> Result<Vec<Reservation>, ApiError> {
    get_list("/admin/reservations").await
}

/// Most recently created first; rows without a timestamp fall back to the
/// reservation date
pub fn sort_newest_first(items: &mut [Reservation]) {
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.reservation_date.cmp(&a.reservation_date))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(id: i64, date: &str, created_at: Option<&str>) -> Reservation {
        serde_json::from_value(serde_json::json!({
            "id": id, "user_id": 1, "location_id": 1, "service_id": 1,
            "reservation_date": date, "time_slot": "08:00-10:00",
            "created_at": created_at,
        }))
        .unwrap()
    }

    #[test]
    fn test_sort_newest_first() {
        let mut items = vec![
            reservation(1, "2026-10-01", Some("2026-09-20T08:00:00")),
            reservation(2, "2026-10-05", Some("2026-09-25T08:00:00")),
            reservation(3, "2026-11-01", None),
            reservation(4, "2026-12-01", None),
        ];
        sort_newest_first(&mut items);
        let ids: Vec<String> = items.iter().map(|r| r.id.as_string()).collect();
        assert_eq!(ids, vec!["2", "1", "4", "3"]);
    }

    #[test]
    fn test_availability_path() {
        assert_eq!(availability_path("2026-10-21"), "/reservations/availability?date=2026-10-21");
    }
}
