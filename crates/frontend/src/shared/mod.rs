pub mod api_utils;
pub mod baas;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod notice;
pub mod number_format;
pub mod page_frame;
pub mod page_standard;
pub mod poll;
pub mod record_set;
