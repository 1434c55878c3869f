pub mod forgot_password;
pub mod login;
pub mod password_rules;
pub mod profile;
pub mod register;
pub mod set_new_password;
pub mod verify_otp;
