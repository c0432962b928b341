//! Registration and login handlers.
//!
//! - POST /api/v1/registration - Create a user and an empty wallet
//! - POST /api/v1/login - Exchange credentials for a session token

use std::sync::Arc;

use axum::extract::State;

use crate::{
    db::DbPool,
    error::AppError,
    models::user::{LoginRequest, LoginResponse, RegistrationRequest},
    response::ApiResponse,
    services::{
        AuthService,
        user_service::{self, NewUser},
    },
    validation::ValidatedJson,
};

/// Register a new user.
///
/// # Request Body
///
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "abcdef1234",
///   "first_name": "User",
///   "last_name": "Example"
/// }
/// ```
///
/// # Response
///
/// - **200**: `data` is null; the client logs in separately
/// - **400 / 102**: validation failure or email already registered
pub async fn registration(
    State(pool): State<DbPool>,
    State(auth): State<Arc<AuthService>>,
    ValidatedJson(request): ValidatedJson<RegistrationRequest>,
) -> Result<ApiResponse<()>, AppError> {
    if user_service::email_exists(&pool, &request.email).await? {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = auth.hash_password(request.password).await?;

    let user = user_service::create_user_with_wallet(
        &pool,
        NewUser {
            email: &request.email,
            password_hash: &password_hash,
            first_name: &request.first_name,
            last_name: &request.last_name,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(ApiResponse::message_only("Registration succeeded, please log in"))
}

/// Log in and receive a session token valid for the configured lifetime.
///
/// Unknown email and wrong password return the same 401 / 103 response.
pub async fn login(
    State(pool): State<DbPool>,
    State(auth): State<Arc<AuthService>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let user = user_service::find_by_email(&pool, &request.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !auth
        .verify_password(request.password, user.password_hash.clone())
        .await?
    {
        return Err(AppError::InvalidCredentials);
    }

    let token = auth.issue_token(user.id)?;

    Ok(ApiResponse::success("Login succeeded", LoginResponse { token }))
}
