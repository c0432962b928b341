//! Wallet balance models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    validation::{RequestSchema, optional_integer},
};

/// Smallest accepted top-up.
pub const MIN_TOP_UP_AMOUNT: i64 = 10_000;
/// Largest accepted top-up.
pub const MAX_TOP_UP_AMOUNT: i64 = 10_000_000;

/// Request body for `POST /topup`.
///
/// # JSON Example
///
/// ```json
/// { "top_up_amount": 1000000 }
/// ```
///
/// A string of digits such as `"1000000"` is accepted as well.
#[derive(Debug, Deserialize, Validate)]
pub struct TopUpRequest {
    #[serde(default, deserialize_with = "optional_integer")]
    #[validate(
        required(message = "Top-up amount is required"),
        range(
            min = MIN_TOP_UP_AMOUNT,
            max = MAX_TOP_UP_AMOUNT,
            message = "Top-up amount must be between 10,000 and 10,000,000"
        )
    )]
    pub top_up_amount: Option<i64>,
}

impl TopUpRequest {
    /// The validated amount. Only meaningful after `validate()` succeeded.
    pub fn amount(&self) -> i64 {
        self.top_up_amount.unwrap_or_default()
    }
}

impl RequestSchema for TopUpRequest {
    fn invalid(message: String) -> AppError {
        AppError::BadRequest(message)
    }

    fn type_mismatch(_field: &str) -> String {
        "Top-up amount must be a whole number".to_string()
    }
}

/// Payload of `GET /balance` and `POST /topup`.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_up(amount: Option<i64>) -> TopUpRequest {
        TopUpRequest {
            top_up_amount: amount,
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(top_up(Some(MIN_TOP_UP_AMOUNT)).validate().is_ok());
        assert!(top_up(Some(MAX_TOP_UP_AMOUNT)).validate().is_ok());
        assert!(top_up(Some(MIN_TOP_UP_AMOUNT - 1)).validate().is_err());
        assert!(top_up(Some(MAX_TOP_UP_AMOUNT + 1)).validate().is_err());
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let request: TopUpRequest = serde_json::from_str(r#"{"top_up_amount": "50000"}"#).unwrap();
        assert_eq!(request.top_up_amount, Some(50000));
        assert!(request.validate().is_ok());

        let request: TopUpRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn negative_and_missing_amounts_are_rejected() {
        assert!(top_up(Some(-50_000)).validate().is_err());
        assert!(top_up(None).validate().is_err());
    }
}
