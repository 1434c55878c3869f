pub mod actions;
pub mod api;
pub mod draft;
pub mod state;
pub mod ui;
