use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

pub const EMAIL_MAX: usize = 50;
pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 40;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::not_blank("email", &self.email)?;
        validation::not_blank("password", &self.password)
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::not_blank("email", &self.email)?;
        validation::length("email", &self.email, 1, EMAIL_MAX)?;
        validation::email("email", &self.email)?;
        validation::not_blank("firstName", &self.first_name)?;
        validation::length("firstName", &self.first_name, NAME_MIN, NAME_MAX)?;
        validation::not_blank("lastName", &self.last_name)?;
        validation::length("lastName", &self.last_name, NAME_MIN, NAME_MAX)?;
        validation::not_blank("password", &self.password)?;
        validation::length("password", &self.password, PASSWORD_MIN, PASSWORD_MAX)
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"***")
            .finish()
    }
}

/// Login answer, kept by the client as its logged-in context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInformation {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupRequest {
        SignupRequest {
            email: "test@example.com".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            password: "password123".into(),
        }
    }

    #[test]
    fn valid_signup_passes() {
        assert!(signup().validate().is_ok());
    }

    #[test]
    fn signup_field_bounds() {
        let cases: [(&str, fn(&mut SignupRequest)); 9] = [
            ("email", |r: &mut SignupRequest| r.email = "invalid-email".into()),
            ("email", |r: &mut SignupRequest| r.email = String::new()),
            ("email", |r: &mut SignupRequest| r.email = format!("{}@x.io", "a".repeat(50))),
            ("firstName", |r: &mut SignupRequest| r.first_name = "Jo".into()),
            ("firstName", |r: &mut SignupRequest| r.first_name = "J".repeat(21)),
            ("lastName", |r: &mut SignupRequest| r.last_name = "Do".into()),
            ("lastName", |r: &mut SignupRequest| r.last_name = "D".repeat(21)),
            ("password", |r: &mut SignupRequest| r.password = "12345".into()),
            ("password", |r: &mut SignupRequest| r.password = "1".repeat(41)),
        ];
        for (field, mutate) in cases {
            let mut r = signup();
            mutate(&mut r);
            assert_eq!(r.validate().unwrap_err().field, field);
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let ok = LoginRequest {
            email: "test@example.com".into(),
            password: "password".into(),
        };
        assert!(ok.validate().is_ok());
        let blank = LoginRequest {
            email: "".into(),
            password: "password".into(),
        };
        assert_eq!(blank.validate().unwrap_err().field, "email");
    }

    #[test]
    fn debug_output_hides_passwords() {
        let rendered = format!("{:?}", signup());
        assert!(rendered.contains("test@example.com"));
        assert!(rendered.contains("John"));
        assert!(!rendered.contains("password123"));
    }

    #[test]
    fn session_information_uses_type_key() {
        let info: SessionInformation = serde_json::from_value(serde_json::json!({
            "token": "fake-jwt-token",
            "type": "Bearer",
            "id": 1,
            "username": "test@test.com",
            "firstName": "Test",
            "lastName": "User",
            "admin": false
        }))
        .unwrap();
        assert_eq!(info.token_type, "Bearer");
        assert_eq!(info.first_name, "Test");
    }
}
