// handlers/protected/mod.rs - endpoints behind the bearer token middleware
//
// Every handler receives the authenticated `Principal` from request
// extensions and hands it to the service layer explicitly.

pub mod merchants;
pub mod outlets;
pub mod products;
pub mod users;
