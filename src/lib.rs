//! Client-side checks for the account forms of the watchlist application.
//!
//! Each field kind (email, password, username) has its own rule pipeline
//! that produces an ordered list of human-readable diagnostics. The
//! [`forms`] module applies them to the JSON bodies sent to the auth
//! endpoints.

pub mod forms;
pub mod validation;

pub use validation::{
    EmailAddress, EmailValidator, Field, InvalidInput, Password, PasswordValidator, Username,
    UsernameValidator, ValidationResult,
};
