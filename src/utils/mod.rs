pub mod config;
pub mod context;
pub mod errors;
pub mod hasher;
pub mod jwt;
pub mod time_provider;
