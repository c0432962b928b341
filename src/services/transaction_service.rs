//! Transaction service - Core business logic for wallet balance mutations.
//!
//! This service handles:
//! - Atomic balance updates paired with ledger inserts
//! - Balance validation for payments
//! - Invoice number generation
//! - Ledger reads (history, lookup by invoice)
//!
//! # Atomicity Guarantees
//!
//! Every balance change and the `transactions` row recording it are written
//! in one PostgreSQL transaction. Returning early with an error drops the
//! transaction, which rolls it back.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        reference::Service,
        transaction::{Transaction, TransactionRecord, TransactionType},
    },
    services::invoice,
};

/// Description stored on every top-up row.
pub const TOP_UP_DESCRIPTION: &str = "Top Up balance";

/// A committed balance mutation.
#[derive(Debug, Clone)]
pub struct BalanceMutation {
    /// The ledger row written for it
    pub transaction: Transaction,
    /// Wallet balance after the mutation
    pub balance: i64,
}

/// Credit a user's wallet.
///
/// # Process
///
/// 1. Start database transaction
/// 2. Increment the wallet balance (row lock taken by the UPDATE)
/// 3. Generate the invoice number
/// 4. Record the TOPUP row
/// 5. Commit (or rollback on error)
///
/// # Errors
///
/// - `BadRequest`: amount is zero or negative
/// - `WalletNotFound`: the user has no wallet
/// - `Database`: database error occurred
pub async fn execute_top_up(
    pool: &DbPool,
    user_id: Uuid,
    amount: i64,
) -> Result<BalanceMutation, AppError> {
    if amount <= 0 {
        return Err(AppError::BadRequest("Amount must be positive".to_string()));
    }

    let mut tx = pool.begin().await?;

    let balance: i64 = sqlx::query_scalar(
        r#"
        UPDATE wallets
        SET balance = balance + $1,
            updated_at = NOW()
        WHERE user_id = $2
        RETURNING balance
        "#,
    )
    .bind(amount)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::WalletNotFound)?;

    let invoice_number = invoice::next_invoice_number(&mut *tx, Utc::now()).await?;

    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (
            invoice_number,
            user_id,
            transaction_type,
            service_code,
            amount,
            description
        )
        VALUES ($1, $2, $3, NULL, $4, $5)
        RETURNING id, invoice_number, user_id, transaction_type, service_code,
                  amount, description, created_at
        "#,
    )
    .bind(&invoice_number)
    .bind(user_id)
    .bind(TransactionType::TopUp.as_str())
    .bind(amount)
    .bind(TOP_UP_DESCRIPTION)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id = %user_id,
        invoice_number = %transaction.invoice_number,
        amount,
        balance,
        "top-up committed"
    );

    Ok(BalanceMutation {
        transaction,
        balance,
    })
}

/// Pay for a service from a user's wallet.
///
/// The amount is the service tariff.
///
/// # Process
///
/// 1. Start database transaction
/// 2. Lock the wallet row and read the current balance
/// 3. Reject if the balance is below the tariff
/// 4. Generate the invoice number and record the PAYMENT row
/// 5. Decrement the balance
/// 6. Commit (or rollback on error)
///
/// # Errors
///
/// - `WalletNotFound`: the user has no wallet
/// - `InsufficientBalance`: balance < tariff; nothing is written
/// - `Database`: database error occurred
pub async fn execute_payment(
    pool: &DbPool,
    user_id: Uuid,
    service: &Service,
) -> Result<BalanceMutation, AppError> {
    let amount = service.service_tariff;

    let mut tx = pool.begin().await?;

    // FOR UPDATE holds concurrent payments on this wallet until we commit
    let current_balance: i64 =
        sqlx::query_scalar("SELECT balance FROM wallets WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::WalletNotFound)?;

    if current_balance < amount {
        tx.rollback().await?;
        return Err(AppError::InsufficientBalance);
    }

    let invoice_number = invoice::next_invoice_number(&mut *tx, Utc::now()).await?;

    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (
            invoice_number,
            user_id,
            transaction_type,
            service_code,
            amount,
            description
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, invoice_number, user_id, transaction_type, service_code,
                  amount, description, created_at
        "#,
    )
    .bind(&invoice_number)
    .bind(user_id)
    .bind(TransactionType::Payment.as_str())
    .bind(&service.service_code)
    .bind(amount)
    .bind(&service.service_name)
    .fetch_one(&mut *tx)
    .await?;

    let balance: i64 = sqlx::query_scalar(
        r#"
        UPDATE wallets
        SET balance = balance - $1,
            updated_at = NOW()
        WHERE user_id = $2
        RETURNING balance
        "#,
    )
    .bind(amount)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id = %user_id,
        invoice_number = %transaction.invoice_number,
        service_code = %service.service_code,
        amount,
        balance,
        "payment committed"
    );

    Ok(BalanceMutation {
        transaction,
        balance,
    })
}

/// A page of the user's ledger, newest first.
pub async fn get_history(
    pool: &DbPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<TransactionRecord>, AppError> {
    let records = sqlx::query_as::<_, TransactionRecord>(
        r#"
        SELECT t.id, t.invoice_number, t.user_id, t.transaction_type, t.service_code,
               s.service_name, t.amount, t.description, t.created_at
        FROM transactions t
        LEFT JOIN services s ON t.service_code = s.service_code
        WHERE t.user_id = $1
        ORDER BY t.created_at DESC, t.invoice_number DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Look up one of the user's transactions by invoice number.
///
/// Rows owned by other users are invisible.
pub async fn find_by_invoice(
    pool: &DbPool,
    user_id: Uuid,
    invoice_number: &str,
) -> Result<Option<TransactionRecord>, AppError> {
    let record = sqlx::query_as::<_, TransactionRecord>(
        r#"
        SELECT t.id, t.invoice_number, t.user_id, t.transaction_type, t.service_code,
               s.service_name, t.amount, t.description, t.created_at
        FROM transactions t
        LEFT JOIN services s ON t.service_code = s.service_code
        WHERE t.invoice_number = $1 AND t.user_id = $2
        "#,
    )
    .bind(invoice_number)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}
