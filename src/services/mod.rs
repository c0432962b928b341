//! Business logic services.
//!
//! Services own every SQL statement. Handlers call them with the pool and
//! never issue queries themselves.

pub mod auth;
pub mod invoice;
pub mod reference_service;
pub mod transaction_service;
pub mod user_service;
pub mod wallet_service;

pub use auth::AuthService;
