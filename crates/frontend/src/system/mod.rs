pub mod auth;
pub mod otp;
pub mod pages;
pub mod tables;
