pub mod a001_service;
pub mod a002_location;
pub mod a003_reservation;
pub mod a004_assignment;
pub mod a005_payment;
pub mod a006_notification_template;
pub mod a007_inspection;
pub mod common;
