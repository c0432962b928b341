//! Wallet handlers.
//!
//! - GET /api/v1/balance - Current balance
//! - POST /api/v1/topup - Credit the wallet

use axum::{Extension, extract::State};

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::wallet::{BalanceResponse, TopUpRequest},
    response::ApiResponse,
    services::{transaction_service, wallet_service},
    validation::ValidatedJson,
};

pub async fn get_balance(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
) -> Result<ApiResponse<BalanceResponse>, AppError> {
    let balance = wallet_service::get_balance(&pool, auth.user_id()).await?;
    Ok(ApiResponse::success(
        "Get balance succeeded",
        BalanceResponse { balance },
    ))
}

/// Top up the wallet.
///
/// # Request Body
///
/// ```json
/// { "top_up_amount": 1000000 }
/// ```
///
/// The amount must be an integer between 10,000 and 10,000,000 inclusive.
/// Responds with the new balance.
pub async fn top_up(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<TopUpRequest>,
) -> Result<ApiResponse<BalanceResponse>, AppError> {
    let mutation =
        transaction_service::execute_top_up(&pool, auth.user_id(), request.amount()).await?;

    Ok(ApiResponse::success(
        "Top up balance succeeded",
        BalanceResponse {
            balance: mutation.balance,
        },
    ))
}
