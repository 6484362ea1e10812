// handlers/public/mod.rs - endpoints that do not require a bearer token

pub mod auth;
pub mod status;
pub mod users;
