pub mod login;
pub mod reset_password;
pub mod send_reset_link;
