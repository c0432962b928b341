//! Health check endpoint for service monitoring.

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{db, db::DbPool, error::AppError, response::ApiResponse};

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current server timestamp
    pub timestamp: DateTime<Utc>,

    /// Crate version
    pub version: &'static str,

    /// Database connection status
    pub database: &'static str,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": 0,
///   "message": "Server is running",
///   "data": {
///     "timestamp": "2025-12-21T19:00:00Z",
///     "version": "0.1.0",
///     "database": "connected"
///   }
/// }
/// ```
///
/// If the database is unreachable the standard 500 envelope is returned.
pub async fn health_check(
    State(pool): State<DbPool>,
) -> Result<ApiResponse<HealthResponse>, AppError> {
    db::ping(&pool).await?;

    Ok(ApiResponse::success(
        "Server is running",
        HealthResponse {
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            database: "connected",
        },
    ))
}
