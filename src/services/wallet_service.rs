//! Wallet reads. Writes go through `transaction_service` so every balance
//! change is paired with a ledger row.

use uuid::Uuid;

use crate::{db::DbPool, error::AppError};

/// Current balance of the user's wallet.
///
/// # Errors
///
/// - `WalletNotFound`: the user has no wallet row
pub async fn get_balance(pool: &DbPool, user_id: Uuid) -> Result<i64, AppError> {
    let balance: i64 = sqlx::query_scalar("SELECT balance FROM wallets WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::WalletNotFound)?;

    Ok(balance)
}
