//! Login and registration drafts.

use chrono::NaiveDate;

use crate::Validate;
use crate::errors::{FieldErrorSet, FormError};
use crate::rules::required;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Validate for LoginDraft {
    fn validate_on(&self, _today: NaiveDate) -> FieldErrorSet {
        let mut errors = FieldErrorSet::new();
        required(&mut errors, "email", "Email", &self.email);
        required(&mut errors, "password", "Password", &self.password);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterDraft {
    /// Form-level check, made before any field rule runs.
    pub fn check_passwords(&self) -> Result<(), FormError> {
        if self.password == self.confirm_password {
            Ok(())
        } else {
            Err(FormError::PasswordMismatch)
        }
    }
}

impl Validate for RegisterDraft {
    fn validate_on(&self, _today: NaiveDate) -> FieldErrorSet {
        let mut errors = FieldErrorSet::new();
        required(&mut errors, "email", "Email", &self.email);
        required(&mut errors, "username", "Username", &self.username);
        required(&mut errors, "password", "Password", &self.password);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginDraft::default().validate_on(today());
        assert_eq!(errors.get("email"), Some("Email is required."));
        assert_eq!(errors.get("password"), Some("Password is required."));
        assert!(LoginDraft::new("a@b.c", "pw").validate_on(today()).is_empty());
    }

    #[test]
    fn password_mismatch_is_independent_of_field_rules() {
        let draft = RegisterDraft {
            email: "a@b.c".to_string(),
            username: "ann".to_string(),
            password: "one".to_string(),
            confirm_password: "two".to_string(),
            ..RegisterDraft::default()
        };
        assert!(draft.validate_on(today()).is_empty());
        assert_eq!(draft.check_passwords(), Err(FormError::PasswordMismatch));
        assert_eq!(FormError::PasswordMismatch.to_string(), "Passwords do not match");
    }

    #[test]
    fn display_name_is_optional() {
        let draft = RegisterDraft {
            email: "a@b.c".to_string(),
            username: "ann".to_string(),
            password: "pw".to_string(),
            confirm_password: "pw".to_string(),
            display_name: String::new(),
        };
        assert!(draft.check_passwords().is_ok());
        assert!(draft.check().is_ok());
    }
}
