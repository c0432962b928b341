//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing one ledger entry
//! - `TransactionRecord`: a ledger entry joined with its service name
//! - Request types for payments and history paging
//! - Response payloads for payments and history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppError, validation::RequestSchema};

/// Kind of balance mutation a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Balance credit
    TopUp,
    /// Balance debit for a service purchase
    Payment,
}

impl TransactionType {
    /// Value stored in `transactions.transaction_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::TopUp => "TOPUP",
            TransactionType::Payment => "PAYMENT",
        }
    }
}

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each row:
/// - Has a unique invoice number (`INV{DDMMYYYY}-{NNN}`)
/// - Was written in the same database transaction as the wallet update it records
/// - Is never updated or deleted
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transaction {
    pub id: Uuid,

    pub invoice_number: String,

    pub user_id: Uuid,

    /// "TOPUP" or "PAYMENT"
    pub transaction_type: String,

    /// Set for payments only
    pub service_code: Option<String>,

    /// Always positive; the direction comes from `transaction_type`
    pub amount: i64,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// A ledger entry with the name of the service it paid for, if any.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub invoice_number: String,
    pub user_id: Uuid,
    pub transaction_type: String,
    pub service_code: Option<String>,
    pub service_name: Option<String>,
    pub amount: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /transaction`.
///
/// ```json
/// { "service_code": "PULSA" }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct PaymentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Service code is required"))]
    pub service_code: String,
}

/// Query string for `GET /transaction/history`.
#[derive(Debug, Deserialize, Validate)]
pub struct HistoryQuery {
    #[serde(default)]
    #[validate(range(min = 0, message = "Offset must be 0 or greater"))]
    pub offset: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

impl RequestSchema for PaymentRequest {
    fn invalid(message: String) -> AppError {
        AppError::BadRequest(message)
    }

    fn type_mismatch(_field: &str) -> String {
        "Service code must be a string".to_string()
    }
}

impl RequestSchema for HistoryQuery {
    fn invalid(message: String) -> AppError {
        AppError::BadRequest(message)
    }

    fn type_mismatch(field: &str) -> String {
        match field {
            "offset" => "Offset must be a number".to_string(),
            "limit" => "Limit must be a number".to_string(),
            other => format!("{other} has an invalid type"),
        }
    }
}

/// Payload returned after a successful payment.
///
/// # JSON Example
///
/// ```json
/// {
///   "invoice_number": "INV17082023-001",
///   "service_code": "PLN",
///   "service_name": "Listrik",
///   "transaction_type": "PAYMENT",
///   "total_amount": 10000,
///   "created_on": "2023-08-17T10:10:10.000Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub invoice_number: String,
    pub service_code: String,
    pub service_name: String,
    pub transaction_type: TransactionType,
    pub total_amount: i64,
    pub created_on: DateTime<Utc>,
}

/// One entry of the history listing.
#[derive(Debug, Serialize)]
pub struct HistoryRecord {
    pub invoice_number: String,
    pub transaction_type: String,
    pub description: Option<String>,
    pub total_amount: i64,
    pub created_on: DateTime<Utc>,
}

impl From<TransactionRecord> for HistoryRecord {
    fn from(record: TransactionRecord) -> Self {
        Self {
            invoice_number: record.invoice_number,
            transaction_type: record.transaction_type,
            description: record.description,
            total_amount: record.amount,
            created_on: record.created_at,
        }
    }
}

/// Payload of `GET /transaction/history`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub offset: i64,
    pub limit: i64,
    pub records: Vec<HistoryRecord>,
}

/// Payload of `GET /transaction/{invoice_number}`.
#[derive(Debug, Serialize)]
pub struct TransactionDetailResponse {
    pub invoice_number: String,
    pub transaction_type: String,
    pub service_code: Option<String>,
    pub service_name: Option<String>,
    pub description: Option<String>,
    pub total_amount: i64,
    pub created_on: DateTime<Utc>,
}

impl From<TransactionRecord> for TransactionDetailResponse {
    fn from(record: TransactionRecord) -> Self {
        Self {
            invoice_number: record.invoice_number,
            transaction_type: record.transaction_type,
            service_code: record.service_code,
            service_name: record.service_name,
            description: record.description,
            total_amount: record.amount,
            created_on: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_serializes_as_stored_value() {
        for kind in [TransactionType::TopUp, TransactionType::Payment] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }

    #[test]
    fn history_query_defaults() {
        let query: HistoryQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, 10);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn history_query_bounds() {
        let query = HistoryQuery {
            offset: -1,
            limit: 10,
        };
        assert!(query.validate().is_err());

        let query = HistoryQuery {
            offset: 0,
            limit: 101,
        };
        assert!(query.validate().is_err());

        let query = HistoryQuery {
            offset: 0,
            limit: 0,
        };
        assert!(query.validate().is_err());
    }
}
