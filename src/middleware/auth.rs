//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the token from the Authorization header
//! 2. Verify its signature and expiry
//! 3. Load the user it names from the database
//! 4. Inject authentication context into the request
//! 5. Reject anything else with HTTP 401

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, models::user::User, services::user_service, state::AppState};

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; handlers extract it with
/// `Extension<AuthContext>`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The user row as loaded for this request
    pub user: User,
}

impl AuthContext {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}

/// Token authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <token>` header from request
/// 2. Verify the token (signature, `exp`, subject is a UUID)
/// 3. Load the user; a deleted user invalidates the token
/// 4. If found: inject `AuthContext` into request, call next handler
/// 5. Otherwise: return 401 with envelope status 401
///
/// Database failures while loading the user are reported as 500, not 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::InvalidToken)?;

    let user_id = state.auth.verify_token(token)?;

    let user = user_service::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::InvalidToken)?;

    request.extensions_mut().insert(AuthContext { user });

    Ok(next.run(request).await)
}
