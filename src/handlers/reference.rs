//! Public catalog endpoints.

use axum::extract::State;

use crate::{
    db::DbPool,
    error::AppError,
    models::reference::{Banner, Service},
    response::ApiResponse,
    services::reference_service,
};

/// `GET /api/v1/banner`
pub async fn list_banners(
    State(pool): State<DbPool>,
) -> Result<ApiResponse<Vec<Banner>>, AppError> {
    let banners = reference_service::list_banners(&pool).await?;
    Ok(ApiResponse::success("Success", banners))
}

/// `GET /api/v1/services`
pub async fn list_services(
    State(pool): State<DbPool>,
) -> Result<ApiResponse<Vec<Service>>, AppError> {
    let services = reference_service::list_services(&pool).await?;
    Ok(ApiResponse::success("Success", services))
}
