//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and envelope bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::{ApiResponse, ErrorDetail};

/// Envelope status for malformed input and duplicate registrations.
pub const STATUS_INVALID_PARAMETER: i32 = 102;
/// Envelope status for a failed login.
pub const STATUS_INVALID_CREDENTIALS: i32 = 103;
/// Envelope status for a missing, invalid, or expired session token.
pub const STATUS_INVALID_TOKEN: i32 = 401;

/// Application-wide error type.
///
/// Each variant maps to an HTTP status code, an envelope status code and a
/// client-facing message.
///
/// # Error Categories
///
/// - **Validation**: malformed or out-of-range input, duplicate email.
///   Account and profile input reports envelope status 102, wallet and
///   ledger input reports 400.
/// - **Authentication**: bad credentials, invalid or expired tokens
/// - **Not found**: missing wallet, user, service or transaction
/// - **Business rules**: insufficient balance
/// - **Store / internal**: anything the database or runtime reports
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed.
    ///
    /// Constraint violations are translated into client errors; everything
    /// else becomes a 500.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body or parameters are invalid.
    ///
    /// The String is the field-level message shown to the client.
    #[error("{0}")]
    Validation(String),

    /// Invalid wallet or ledger input, reported with envelope status 400.
    #[error("{0}")]
    BadRequest(String),

    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password. Both look the same to the client.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Wallet not found")]
    WalletNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Service not found")]
    ServiceNotFound,

    #[error("Transaction not found")]
    TransactionNotFound,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Map the error to (HTTP status, envelope status, client message).
    fn parts(&self) -> (StatusCode, i32, String) {
        match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, STATUS_INVALID_PARAMETER, msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 400, msg.clone()),
            AppError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                STATUS_INVALID_PARAMETER,
                self.to_string(),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                STATUS_INVALID_CREDENTIALS,
                self.to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                STATUS_INVALID_TOKEN,
                self.to_string(),
            ),
            AppError::WalletNotFound
            | AppError::UserNotFound
            | AppError::ServiceNotFound
            | AppError::TransactionNotFound => (StatusCode::NOT_FOUND, 404, self.to_string()),
            AppError::InsufficientBalance => (StatusCode::BAD_REQUEST, 400, self.to_string()),
            AppError::Database(err) => translate_database_error(err),
            AppError::Internal(_) => internal_error(),
        }
    }
}

/// Translate PostgreSQL constraint violations into client errors.
fn translate_database_error(err: &sqlx::Error) -> (StatusCode, i32, String) {
    let sqlx::Error::Database(db_err) = err else {
        return internal_error();
    };

    match db_err.code().as_deref() {
        // unique_violation
        Some("23505") => {
            let on_email = db_err
                .constraint()
                .is_some_and(|constraint| constraint.contains("email"));
            if on_email {
                (
                    StatusCode::BAD_REQUEST,
                    STATUS_INVALID_PARAMETER,
                    AppError::DuplicateEmail.to_string(),
                )
            } else {
                (StatusCode::BAD_REQUEST, 400, "Data already exists".to_string())
            }
        }
        // foreign_key_violation
        Some("23503") => (
            StatusCode::BAD_REQUEST,
            400,
            "Referenced data not found".to_string(),
        ),
        // check_violation
        Some("23514") => (StatusCode::BAD_REQUEST, 400, "Invalid data".to_string()),
        _ => internal_error(),
    }
}

fn internal_error() -> (StatusCode, i32, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        500,
        "Internal server error".to_string(),
    )
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("password hashing failed: {err}"))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("blocking task failed: {err}"))
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "status": 102,
///   "message": "Email format is invalid",
///   "data": null
/// }
/// ```
///
/// Internal details never appear in the body. For 5xx responses the raw error
/// text is attached as an [`ErrorDetail`] response extension, which the
/// development-only middleware may expose.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let mut response = (status, ApiResponse::<()>::failure(code, message)).into_response();

        if status.is_server_error() {
            response
                .extensions_mut()
                .insert(ErrorDetail(self.to_string()));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_uses_invalid_parameter_status() {
        let response = AppError::Validation("Email format is invalid".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["status"], 102);
        assert_eq!(body["message"], "Email format is invalid");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn bad_request_uses_http_status_as_envelope_status() {
        let response = AppError::BadRequest("Limit must be a number".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "Limit must be a number");
    }

    #[tokio::test]
    async fn token_and_credential_errors_are_unauthorized() {
        let response = AppError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["status"], 401);

        let response = AppError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["status"], 103);
    }

    #[tokio::test]
    async fn not_found_variants_map_to_404() {
        for err in [
            AppError::WalletNotFound,
            AppError::UserNotFound,
            AppError::ServiceNotFound,
            AppError::TransactionNotFound,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(body_json(response).await["status"], 404);
        }
    }

    #[tokio::test]
    async fn insufficient_balance_is_bad_request() {
        let response = AppError::InsufficientBalance.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "Insufficient balance");
    }

    #[tokio::test]
    async fn internal_errors_hide_details_but_attach_extension() {
        let response = AppError::Internal("pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let detail = response.extensions().get::<ErrorDetail>().cloned();
        assert_eq!(
            detail.map(|d| d.0),
            Some("Internal error: pool exhausted".to_string())
        );

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn non_constraint_database_errors_are_internal() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["status"], 500);
    }
}
