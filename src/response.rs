//! The `{status, message, data}` envelope every endpoint responds with.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Envelope status reported on success.
pub const STATUS_SUCCESS: i32 = 0;

/// Response envelope.
///
/// `status` is 0 on success; failures carry an application code alongside
/// the HTTP status (see [`crate::error::AppError`]).
///
/// ```json
/// {
///   "status": 0,
///   "message": "Get balance succeeded",
///   "data": { "balance": 250000 }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Success without a payload (`"data": null`).
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Raw error text attached to failed responses as an extension.
///
/// Only surfaced to clients by [`crate::middleware::error_detail`] in development.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);
