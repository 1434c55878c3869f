pub mod password_policy;
pub mod phone;
