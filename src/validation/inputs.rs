//! Wrapper types for values that passed their field's rules.
//!
//! These are what the form layer hands over to the user service: an instance
//! can only be obtained through validation.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::email::EmailRules;
use super::password::PasswordRules;
use super::text::trim_input;
use super::types::Field;
use super::username::UsernameRules;
use super::validator::Rules;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {}", .errors.join("; "))]
pub struct InvalidInput {
    pub field: Field,
    pub errors: Vec<String>,
}

fn check<R: Rules>(candidate: &str) -> Result<(), InvalidInput> {
    let result = R::run(candidate);
    if result.is_valid() {
        Ok(())
    } else {
        Err(InvalidInput {
            field: R::FIELD,
            errors: result.into_errors(),
        })
    }
}

/// A validated email address, trimmed of surrounding whitespace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl TryFrom<&str> for EmailAddress {
    type Error = InvalidInput;

    fn try_from(email: &str) -> Result<Self, Self::Error> {
        check::<EmailRules>(email)?;
        Ok(Self(trim_input(email).to_owned()))
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = InvalidInput;

    fn try_from(email: String) -> Result<Self, Self::Error> {
        Self::try_from(email.as_str())
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated username, trimmed of surrounding whitespace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl TryFrom<&str> for Username {
    type Error = InvalidInput;

    fn try_from(username: &str) -> Result<Self, Self::Error> {
        check::<UsernameRules>(username)?;
        Ok(Self(trim_input(username).to_owned()))
    }
}

impl TryFrom<String> for Username {
    type Error = InvalidInput;

    fn try_from(username: String) -> Result<Self, Self::Error> {
        Self::try_from(username.as_str())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A password that meets the strength rules. Kept verbatim, never printed.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Password {
    type Error = InvalidInput;

    fn try_from(password: &str) -> Result<Self, Self::Error> {
        check::<PasswordRules>(password)?;
        Ok(Self(password.to_owned()))
    }
}

impl TryFrom<String> for Password {
    type Error = InvalidInput;

    fn try_from(password: String) -> Result<Self, Self::Error> {
        check::<PasswordRules>(&password)?;
        Ok(Self(password))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_trimmed() {
        let email = EmailAddress::try_from("  user@example.com ").unwrap();
        assert_eq!(email.as_ref(), "user@example.com");
        assert_eq!(email.to_string(), "user@example.com");
    }

    #[test]
    fn test_invalid_email_reports_errors() {
        let err = EmailAddress::try_from("bad").unwrap_err();
        assert_eq!(err.field, Field::Email);
        assert_eq!(err.errors, vec!["Email does not match the basic format"]);
        assert_eq!(err.to_string(), "invalid email: Email does not match the basic format");
    }

    #[test]
    fn test_username_wrapper() {
        let valid_cases = vec!["john_doe", "alice123", " bob.smith "];
        for username in valid_cases {
            assert!(
                Username::try_from(username).is_ok(),
                "Valid username {} was rejected !",
                username
            );
        }

        let invalid_cases = vec!["a", "_starts_with_underscore", "has space", "special@character"];
        for username in invalid_cases {
            assert!(
                Username::try_from(username).is_err(),
                "Invalid username {} was approved !",
                username
            );
        }

        assert_eq!(Username::try_from(" bob.smith ".to_string()).unwrap().as_ref(), "bob.smith");
    }

    #[test]
    fn test_password_is_kept_verbatim_and_hidden() {
        let password = Password::try_from(String::from("Str0ng! Pass")).unwrap();
        assert_eq!(password.expose(), "Str0ng! Pass");
        assert_eq!(format!("{:?}", password), "Password(***)");

        let err = Password::try_from("short1!").unwrap_err();
        assert_eq!(err.field, Field::Password);
        assert_eq!(err.errors.len(), 2);
    }
}
