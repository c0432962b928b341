//! Data models representing database entities and API payloads.
//!
//! Request types carry their `validator` rules; response types are what the
//! handlers put inside the envelope's `data` field.

/// Users, credentials and profile payloads
pub mod user;
/// Wallet balance and top-up payloads
pub mod wallet;
/// Service catalog and banners
pub mod reference;
/// Ledger entries, payments and history
pub mod transaction;
