//! Read-only access to the service catalog and banners.

use crate::{
    db::DbPool,
    error::AppError,
    models::reference::{Banner, Service},
};

/// All banners, newest first.
pub async fn list_banners(pool: &DbPool) -> Result<Vec<Banner>, AppError> {
    let banners = sqlx::query_as::<_, Banner>(
        r#"
        SELECT banner_name, banner_image, description
        FROM banners
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(banners)
}

/// All services, grouped by category and cheapest first within a category.
pub async fn list_services(pool: &DbPool) -> Result<Vec<Service>, AppError> {
    let services = sqlx::query_as::<_, Service>(
        r#"
        SELECT service_code, service_name, service_icon, service_tariff, category
        FROM services
        ORDER BY category, service_tariff ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn find_service(pool: &DbPool, service_code: &str) -> Result<Option<Service>, AppError> {
    let service = sqlx::query_as::<_, Service>(
        r#"
        SELECT service_code, service_name, service_icon, service_tariff, category
        FROM services
        WHERE service_code = $1
        "#,
    )
    .bind(service_code)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}
