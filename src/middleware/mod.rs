//! HTTP middleware components.
//!
//! Middleware run before route handlers. They can:
//! - Authenticate requests
//! - Rewrite responses
//! - Short-circuit requests (reject unauthorized)

/// Bearer token authentication
pub mod auth;
/// Development-only internal error details
pub mod error_detail;
