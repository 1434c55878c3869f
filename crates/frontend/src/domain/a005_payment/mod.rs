pub mod api;
pub mod snap;
