pub mod api;
pub mod claims;
pub mod employee;
pub mod reset_token;
