use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::validation::{lenient_string, Validate, Violations};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Registration request body
///
/// Missing and non-string fields read as empty and fail validation.
#[derive(Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(format = Password, min_length = 8)]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Vec<String> {
        let mut violations = Violations::new();
        violations
            .not_empty("firstName", &self.first_name)
            .not_empty("lastName", &self.last_name)
            .email("email", &self.email)
            .min_length("password", &self.password, MIN_PASSWORD_LENGTH);
        violations.into_vec()
    }
}

/// Registered user as returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegisteredUser {
    /// First and last name joined by a space
    pub username: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let req = request(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "password": "correct horse",
        }));
        assert!(req.validate().is_empty());
    }

    #[test]
    fn test_missing_fields_are_violations() {
        let req = request(json!({ "email": "jane" }));
        assert_eq!(
            req.validate(),
            vec![
                "firstName should not be empty",
                "lastName should not be empty",
                "email must be an email",
                "password must be longer than or equal to 8 characters",
            ]
        );
    }

    #[test]
    fn test_wrongly_typed_fields_are_violations() {
        let req = request(json!({
            "firstName": null,
            "lastName": "Doe",
            "email": 5,
            "password": ["correct", "horse"],
        }));
        assert_eq!(
            req.validate(),
            vec![
                "firstName should not be empty",
                "email must be an email",
                "password must be longer than or equal to 8 characters",
            ]
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let req = request(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "password": "long enough",
            "isAdmin": true,
        }));
        assert!(req.validate().is_empty());
    }
}
