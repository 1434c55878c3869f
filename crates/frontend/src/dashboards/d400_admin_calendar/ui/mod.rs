mod dashboard;
mod detail;

pub use dashboard::AdminCalendarDashboard;
