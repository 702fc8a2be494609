//! Core types used throughout the validation system

use derive_more::Display;
use serde::Serialize;
use std::fmt;

/// The form fields that have a rule pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[display("email")]
    Email,
    #[display("password")]
    Password,
    #[display("username")]
    Username,
}

/// Outcome of one validation run.
///
/// The error list keeps the order in which the stages ran. A result can only
/// be built from that list, so `is_valid` is true exactly when it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    /// Renders the diagnostics of a run into a result
    pub fn from_issues<I, T>(issues: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        let errors: Vec<String> = issues.into_iter().map(|issue| issue.to_string()).collect();

        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validity_follows_errors() {
        let valid = ValidationResult::from_issues(Vec::<String>::new());
        assert!(valid.is_valid());
        assert!(valid.errors().is_empty());

        let invalid = ValidationResult::from_issues(["first", "second"]);
        assert!(!invalid.is_valid());
        assert_eq!(invalid.errors(), ["first", "second"]);
    }

    #[test]
    fn test_serialized_shape() {
        let result = ValidationResult::from_issues(["Email cannot be empty"]);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "isValid": false, "errors": ["Email cannot be empty"] })
        );
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Field::Email.to_string(), "email");
        assert_eq!(serde_json::to_value(Field::Username).unwrap(), json!("username"));
    }
}
