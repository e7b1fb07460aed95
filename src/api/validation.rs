//! Request body validation.
//!
//! Violations are reported as `"<field> <description>"` strings so the error
//! classifier can group them by field.

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::ApiError;

pub trait Validate {
    /// Every rule the value breaks, empty when valid
    fn validate(&self) -> Vec<String>;
}

/// Collects violation messages for one value
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `"<field> <description>"` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &str, description: &str) -> &mut Self {
        if !ok {
            self.0.push(format!("{field} {description}"));
        }
        self
    }

    pub fn not_empty(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, "should not be empty")
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(is_email(value), field, "must be an email")
    }

    pub fn min_length(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        let description = format!("must be longer than or equal to {min} characters");
        self.check(value.chars().count() >= min, field, &description)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Loose address check: one `@`, something before it, a dotted domain after it.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Deserialize a string field that accepts any JSON value.
///
/// Anything other than a string (numbers, `null`, objects) becomes an empty
/// string, so the field's validation rules report it instead of the JSON
/// extractor rejecting the whole body.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

/// Reported when the body is valid JSON but not of the expected shape
pub const BODY_SHAPE_VIOLATION: &str = "body must be a JSON object";

/// JSON body extractor that runs [`Validate`] after deserializing.
///
/// Syntax errors and a missing JSON content type are rejected as plain HTTP
/// errors. A body of the wrong shape and rule violations are rejected as
/// [`ApiError::Validation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = match Json::<T>::from_request(req, state).await {
            Ok(json) => json,
            Err(JsonRejection::JsonDataError(_)) => {
                return Err(ApiError::Validation(vec![BODY_SHAPE_VIOLATION.to_string()]));
            }
            Err(rejection) => return Err(rejection.into()),
        };

        let violations = value.validate();
        if violations.is_empty() {
            Ok(Self(value))
        } else {
            Err(ApiError::Validation(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email() {
        assert!(is_email("jane@example.com"));
        assert!(is_email("j.doe+tag@mail.example.co"));
        assert!(!is_email("jane"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("jane@localhost"));
        assert!(!is_email("jane@example..com"));
        assert!(!is_email("jane@@example.com"));
        assert!(!is_email("jane doe@example.com"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_violations_format() {
        let mut violations = Violations::new();
        violations
            .not_empty("firstName", " ")
            .email("email", "nope")
            .min_length("password", "short", 8)
            .not_empty("lastName", "Doe");

        assert_eq!(
            violations.into_vec(),
            vec![
                "firstName should not be empty",
                "email must be an email",
                "password must be longer than or equal to 8 characters",
            ]
        );
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(default, deserialize_with = "lenient_string")]
        name: String,
    }

    #[test]
    fn test_lenient_string_accepts_any_value() {
        let named: Named = serde_json::from_str(r#"{"name": "Jane"}"#).unwrap();
        assert_eq!(named.name, "Jane");

        for body in [r#"{"name": 5}"#, r#"{"name": null}"#, r#"{"name": {"a": 1}}"#, "{}"] {
            let named: Named = serde_json::from_str(body).unwrap();
            assert_eq!(named.name, "", "{body}");
        }
    }

    #[test]
    fn test_min_length_counts_chars() {
        let mut violations = Violations::new();
        violations.min_length("password", "ääääää", 6);
        assert!(violations.into_vec().is_empty());
    }
}
