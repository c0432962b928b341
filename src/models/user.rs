//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Database entity representing a registered user
//! - Registration, login and profile request bodies (with validation rules)
//! - `ProfileResponse` and `LoginResponse`: payloads returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::RequestSchema;

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. Each user:
/// - Has a unique email (enforced by `users_email_key`)
/// - Owns exactly one wallet, created in the same database transaction
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    pub email: String,

    /// bcrypt hash, never serialized
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    /// Image URL or `data:image/...` URI, if the user set one
    pub profile_image: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /registration`.
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "abcdef1234",
///   "first_name": "User",
///   "last_name": "Example"
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email format is invalid")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 100,
        message = "First name is required and must not exceed 100 characters"
    ))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Last name is required and must not exceed 100 characters"
    ))]
    pub last_name: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email format is invalid")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response payload for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Request body for `PUT /profile`.
///
/// Both fields are optional; an absent field keeps its stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUpdateRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "First name must be between 1 and 100 characters"
    ))]
    pub first_name: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Last name must be between 1 and 100 characters"
    ))]
    pub last_name: Option<String>,
}

/// Request body for `PUT /profile/image`.
///
/// The value must be an `http(s)` URL or a `data:image/jpeg` / `data:image/png`
/// URI; that check lives in [`crate::validation::validate_image_reference`].
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileImageRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Profile image is required"))]
    pub profile_image: String,
}

impl RequestSchema for RegistrationRequest {}
impl RequestSchema for LoginRequest {}
impl RequestSchema for ProfileUpdateRequest {}
impl RequestSchema for ProfileImageRequest {}

/// Profile payload returned by the profile endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "user@example.com",
///   "first_name": "User",
///   "last_name": "Example",
///   "profile_image": null
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<String>,
}

/// Drops the id, password hash and timestamps.
impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_image: user.profile_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, password: &str) -> RegistrationRequest {
        RegistrationRequest {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "User".to_string(),
            last_name: "Example".to_string(),
        }
    }

    #[test]
    fn registration_accepts_well_formed_input() {
        assert!(registration("user@example.com", "abcdef1234").validate().is_ok());
    }

    #[test]
    fn registration_rejects_bad_email_and_short_password() {
        let errors = registration("not-an-email", "abcdef1234")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let errors = registration("user@example.com", "short")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn registration_rejects_overlong_names() {
        let mut request = registration("user@example.com", "abcdef1234");
        request.last_name = "x".repeat(101);
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("last_name"));
    }

    #[test]
    fn profile_update_skips_absent_fields() {
        let request = ProfileUpdateRequest {
            first_name: None,
            last_name: Some("Renamed".to_string()),
        };
        assert!(request.validate().is_ok());

        let request = ProfileUpdateRequest {
            first_name: Some(String::new()),
            last_name: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn profile_response_hides_credentials() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            first_name: "User".to_string(),
            last_name: "Example".to_string(),
            profile_image: None,
            created_at: now,
            updated_at: now,
        };

        let body = serde_json::to_value(ProfileResponse::from(user)).unwrap();
        assert!(body.get("password_hash").is_none());
        assert!(body["profile_image"].is_null());
        assert_eq!(body["email"], "user@example.com");
    }
}
