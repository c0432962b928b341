//! Transaction HTTP handlers.
//!
//! This module implements the ledger endpoints:
//! - POST /api/v1/transaction - Pay for a service
//! - GET /api/v1/transaction/history - Paged ledger, newest first
//! - GET /api/v1/transaction/{invoice_number} - Single ledger entry

use axum::{
    Extension,
    extract::{Path, State},
};

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::transaction::{
        HistoryQuery, HistoryResponse, PaymentRequest, PaymentResponse,
        TransactionDetailResponse, TransactionType,
    },
    response::ApiResponse,
    services::{reference_service, transaction_service},
    validation::{ValidatedJson, ValidatedQuery},
};

/// Pay for a service with the wallet balance.
///
/// # Request Body
///
/// ```json
/// { "service_code": "PULSA" }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "status": 0,
///   "message": "Transaction succeeded",
///   "data": {
///     "invoice_number": "INV17082023-001",
///     "service_code": "PULSA",
///     "service_name": "Pulsa",
///     "transaction_type": "PAYMENT",
///     "total_amount": 40000,
///     "created_on": "2023-08-17T10:10:10.000Z"
///   }
/// }
/// ```
///
/// # Errors
///
/// - 404 if the service code is unknown
/// - 400 if the balance does not cover the tariff
pub async fn create_payment(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<PaymentRequest>,
) -> Result<ApiResponse<PaymentResponse>, AppError> {
    let service = reference_service::find_service(&pool, request.service_code.trim())
        .await?
        .ok_or(AppError::ServiceNotFound)?;

    let mutation = transaction_service::execute_payment(&pool, auth.user_id(), &service).await?;

    Ok(ApiResponse::success(
        "Transaction succeeded",
        PaymentResponse {
            invoice_number: mutation.transaction.invoice_number,
            service_code: service.service_code,
            service_name: service.service_name,
            transaction_type: TransactionType::Payment,
            total_amount: mutation.transaction.amount,
            created_on: mutation.transaction.created_at,
        },
    ))
}

/// Page through the current user's ledger.
///
/// Query: `offset` (default 0) and `limit` (default 10, at most 100).
pub async fn get_history(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    ValidatedQuery(query): ValidatedQuery<HistoryQuery>,
) -> Result<ApiResponse<HistoryResponse>, AppError> {
    let records =
        transaction_service::get_history(&pool, auth.user_id(), query.limit, query.offset).await?;

    Ok(ApiResponse::success(
        "Get history succeeded",
        HistoryResponse {
            offset: query.offset,
            limit: query.limit,
            records: records.into_iter().map(Into::into).collect(),
        },
    ))
}

/// Get one transaction by invoice number.
///
/// # Security
///
/// Returns 404 for invoices that belong to another user.
pub async fn get_transaction(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(invoice_number): Path<String>,
) -> Result<ApiResponse<TransactionDetailResponse>, AppError> {
    let record = transaction_service::find_by_invoice(&pool, auth.user_id(), &invoice_number)
        .await?
        .ok_or(AppError::TransactionNotFound)?;

    Ok(ApiResponse::success("Success", record.into()))
}
