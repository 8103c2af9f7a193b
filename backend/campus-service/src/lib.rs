pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod notifications;
pub mod routes;
pub mod services;
pub mod state;
pub mod validators;
