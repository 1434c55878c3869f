//! Calendar arithmetic and status derivation for the admin dashboard.

use chrono::{Datelike, Duration, NaiveDate};
use contracts::domain::a003_reservation::aggregate::Reservation;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CalendarStatus {
    Pending,
    Paid,
    Assigned,
}

impl CalendarStatus {
    pub const ALL: [CalendarStatus; 3] =
        [CalendarStatus::Pending, CalendarStatus::Paid, CalendarStatus::Assigned];

    pub fn label(&self) -> &'static str {
        match self {
            CalendarStatus::Pending => "Menunggu",
            CalendarStatus::Paid => "Lunas",
            CalendarStatus::Assigned => "Ditugaskan",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            CalendarStatus::Pending => "calendar-status calendar-status--pending",
            CalendarStatus::Paid => "calendar-status calendar-status--paid",
            CalendarStatus::Assigned => "calendar-status calendar-status--assigned",
        }
    }
}

/// An assignment wins over payment; anything else is still pending
pub fn derive_status(reservation: &Reservation) -> CalendarStatus {
    if reservation.is_assigned() {
        CalendarStatus::Assigned
    } else if reservation.is_paid() {
        CalendarStatus::Paid
    } else {
        CalendarStatus::Pending
    }
}

/// Group reservations by calendar day. Rows whose date cannot be read are
/// skipped.
pub fn bucket_by_date(reservations: &[Reservation]) -> BTreeMap<NaiveDate, Vec<Reservation>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Reservation>> = BTreeMap::new();
    for reservation in reservations {
        match reservation.date() {
            Some(date) => buckets.entry(date).or_default().push(reservation.clone()),
            None => log::warn!(
                "Reservation {} has unreadable date {:?}",
                reservation.id,
                reservation.reservation_date
            ),
        }
    }
    for day in buckets.values_mut() {
        day.sort_by(|a, b| a.time_slot.cmp(&b.time_slot));
    }
    buckets
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub paid: usize,
    pub assigned: usize,
}

impl StatusCounts {
    pub fn of(reservations: &[Reservation]) -> Self {
        let mut counts = Self::default();
        for r in reservations {
            match derive_status(r) {
                CalendarStatus::Pending => counts.pending += 1,
                CalendarStatus::Paid => counts.paid += 1,
                CalendarStatus::Assigned => counts.assigned += 1,
            }
        }
        counts
    }

    pub fn get(&self, status: CalendarStatus) -> usize {
        match status {
            CalendarStatus::Pending => self.pending,
            CalendarStatus::Paid => self.paid,
            CalendarStatus::Assigned => self.assigned,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.paid + self.assigned
    }
}

pub type Week = [Option<NaiveDate>; 7];

/// Weeks of a month, Monday first, padded with `None` outside the month.
/// An invalid month yields no weeks.
pub fn month_grid(year: i32, month: u32) -> Vec<Week> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    let mut day = first;
    while day.month() == month {
        let column = day.weekday().num_days_from_monday() as usize;
        week[column] = Some(day);
        if column == 6 {
            weeks.push(week);
            week = [None; 7];
        }
        day += Duration::days(1);
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}
