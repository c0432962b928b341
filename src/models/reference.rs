//! Reference catalog: payable services and promotional banners.
//!
//! Both tables are seeded by migration and read-only through the API.

use serde::Serialize;

/// A payable service from the `services` table.
///
/// `service_tariff` is the exact amount a payment for this service debits.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Service {
    pub service_code: String,
    pub service_name: String,
    pub service_icon: String,
    pub service_tariff: i64,
    pub category: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Banner {
    pub banner_name: String,
    pub banner_image: String,
    pub description: String,
}
