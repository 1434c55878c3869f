pub mod month_selector;
pub mod pagination_controls;
