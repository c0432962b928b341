//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives validated request data (JSON body, query, auth context)
//! 2. Calls the services layer
//! 3. Wraps the result in the `{status, message, data}` envelope

use axum::http::StatusCode;

use crate::response::ApiResponse;

/// Registration and login
pub mod auth;
/// Liveness and database connectivity
pub mod health;
/// Current user's profile
pub mod profile;
/// Service catalog and banners
pub mod reference;
/// Payments, history and invoice lookup
pub mod transactions;
/// Balance and top-up
pub mod wallet;

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, ApiResponse<()>) {
    (
        StatusCode::NOT_FOUND,
        ApiResponse::failure(404, "Endpoint not found"),
    )
}
