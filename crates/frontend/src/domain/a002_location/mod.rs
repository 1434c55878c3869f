pub mod api;
pub mod geocode;
pub mod ui;
