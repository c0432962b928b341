//! Digital wallet REST API.
//!
//! Users register, log in with a bearer token, top up a wallet and pay for
//! catalog services from it. Every balance change is written together with
//! an immutable ledger row carrying a daily-sequential invoice number.
//!
//! The library exposes the router and its building blocks so integration
//! tests can drive the full HTTP stack.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod services;
pub mod state;
pub mod validation;

pub use app::build_router;
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
