//! Root module for the validation system.
//! Exposes the public API and re-exports commonly used types.

pub mod constants;
pub mod email;
mod inputs;
pub mod password;
mod text;
mod types;
pub mod username;
mod validator;

pub use email::{is_valid_email, validate_email, EmailIssue, EmailRules};
pub use inputs::{EmailAddress, InvalidInput, Password, Username};
pub use password::{is_valid_password, validate_password, PasswordIssue, PasswordRules};
pub use types::{Field, ValidationResult};
pub use username::{is_valid_username, validate_username, UsernameIssue, UsernameRules};
pub use validator::{Rules, Validator};

pub type EmailValidator = Validator<EmailRules>;
pub type PasswordValidator = Validator<PasswordRules>;
pub type UsernameValidator = Validator<UsernameRules>;
