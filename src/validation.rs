//! Request validation extractors.
//!
//! `ValidatedJson<T>` and `ValidatedQuery<T>` deserialize the request and run
//! the `validator` rules declared on `T`. Any failure, including a body that
//! is not JSON at all, becomes a single field-level message before the
//! handler touches the database. [`RequestSchema`] decides which `AppError`
//! carries it.

use std::{error::Error as StdError, fmt};

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::{
    Deserializer,
    de::{self, DeserializeOwned, Unexpected, Visitor},
};
use url::Url;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// A request body or query string with validation rules.
///
/// Account and profile requests keep the defaults. Wallet and ledger
/// requests report their failures as `AppError::BadRequest`.
pub trait RequestSchema: Validate {
    /// Wrap a client-facing message in the error this request reports.
    fn invalid(message: String) -> AppError {
        AppError::Validation(message)
    }

    /// Message for a field whose value has the wrong type.
    fn type_mismatch(field: &str) -> String {
        format!("{field} has an invalid type")
    }
}

/// JSON body extractor that also runs `Validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + RequestSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection::<T>)?;
        value.validate().map_err(validation_failure::<T>)?;
        Ok(Self(value))
    }
}

/// Query string extractor that also runs `Validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + RequestSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection::<T>)?;
        value.validate().map_err(validation_failure::<T>)?;
        Ok(Self(value))
    }
}

fn json_rejection<T: RequestSchema>(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => "Request body must be JSON".to_string(),
        JsonRejection::JsonDataError(err) => rejected_field(err)
            .map(|field| T::type_mismatch(&field))
            .unwrap_or_else(|| "Invalid request body".to_string()),
        JsonRejection::JsonSyntaxError(_) => "Invalid request body: malformed JSON".to_string(),
        other => format!("Invalid request body: {}", other.body_text()),
    };
    T::invalid(message)
}

fn query_rejection<T: RequestSchema>(rejection: QueryRejection) -> AppError {
    let message = match &rejection {
        QueryRejection::FailedToDeserializeQueryString(err) => rejected_field(err)
            .map(|field| T::type_mismatch(&field))
            .unwrap_or_else(|| "Invalid query parameters".to_string()),
        other => format!("Invalid query parameters: {}", other.body_text()),
    };
    T::invalid(message)
}

fn validation_failure<T: RequestSchema>(errors: ValidationErrors) -> AppError {
    T::invalid(first_message(&errors))
}

/// Name of the field a deserialization error points at.
///
/// Rejections wrap a path-tracking error that renders as `field: reason`.
/// Errors with no known path render the reason alone and yield `None`.
fn rejected_field(rejection: &dyn StdError) -> Option<String> {
    let text = rejection.source()?.to_string();
    let (path, _) = text.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| path.to_string())
}

/// Deserialize an optional integer that may also arrive as a numeric string.
///
/// Use with `#[serde(default, deserialize_with = "optional_integer")]`.
pub fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntegerVisitor;

    impl<'de> Visitor<'de> for IntegerVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a string of digits")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            i64::try_from(value)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(IntegerVisitor)
}

/// Pick one message to report.
///
/// Fields are visited in name order so the result does not depend on hash
/// map iteration.
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, field_errors)| {
            field_errors.first().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .unwrap_or_else(|| "Invalid request".to_string())
}

/// Accept an `http(s)` URL with a host, or a `data:image/jpeg` / `data:image/png` URI.
pub fn validate_image_reference(value: &str) -> Result<(), AppError> {
    let invalid = || AppError::Validation("Profile image format is not valid".to_string());

    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(()),
        "data" => {
            let path = url.path();
            let media_type = path.split([';', ',']).next().unwrap_or_default();
            let has_payload = path
                .split_once(',')
                .is_some_and(|(_, payload)| !payload.is_empty());
            if matches!(media_type, "image/jpeg" | "image/png") && has_payload {
                Ok(())
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}
