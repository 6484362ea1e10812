pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod criteria;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod services;

pub use app::{app, AppState};
