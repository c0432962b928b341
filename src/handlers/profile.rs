//! Profile handlers for the authenticated user.
//!
//! - GET /api/v1/profile
//! - PUT /api/v1/profile (also /profile/update)
//! - PUT /api/v1/profile/image

use axum::{Extension, extract::State};

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::user::{ProfileImageRequest, ProfileResponse, ProfileUpdateRequest},
    response::ApiResponse,
    services::user_service,
    validation::{ValidatedJson, validate_image_reference},
};

/// Return the profile loaded by the auth middleware.
pub async fn get_profile(
    Extension(auth): Extension<AuthContext>,
) -> Result<ApiResponse<ProfileResponse>, AppError> {
    Ok(ApiResponse::success("Success", auth.user.into()))
}

/// Update first and/or last name.
pub async fn update_profile(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<ProfileUpdateRequest>,
) -> Result<ApiResponse<ProfileResponse>, AppError> {
    let user = user_service::update_profile(
        &pool,
        auth.user_id(),
        request.first_name.as_deref(),
        request.last_name.as_deref(),
    )
    .await?
    .ok_or(AppError::UserNotFound)?;

    Ok(ApiResponse::success("Profile updated", user.into()))
}

/// Replace the profile image.
///
/// # Request Body
///
/// ```json
/// { "profile_image": "https://cdn.example.com/me.png" }
/// ```
///
/// `data:image/jpeg` and `data:image/png` URIs are accepted as well.
pub async fn update_profile_image(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<ProfileImageRequest>,
) -> Result<ApiResponse<ProfileResponse>, AppError> {
    let profile_image = request.profile_image.trim();
    validate_image_reference(profile_image)?;

    let user = user_service::update_profile_image(&pool, auth.user_id(), profile_image)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(ApiResponse::success("Profile image updated", user.into()))
}
