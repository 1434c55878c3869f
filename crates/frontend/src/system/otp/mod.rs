pub mod api;
pub mod flow;
