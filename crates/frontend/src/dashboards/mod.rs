pub mod d400_admin_calendar;

pub use d400_admin_calendar::ui::AdminCalendarDashboard;
