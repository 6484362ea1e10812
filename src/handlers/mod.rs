// handlers/mod.rs - HTTP handlers split by security tier
//
// Public (no auth): login, registration, banner, health
// Protected (bearer JWT): every resource operation under /api

pub mod extract;
pub mod protected;
pub mod public;
