//! Validation of the account form bodies.
//!
//! Payloads arrive as untyped JSON, the way the sign-up and sign-in screens
//! collect them before posting to `/auth/register` and `/auth/login`.

use derive_more::Display;
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::validation::{
    EmailAddress, EmailRules, Field, Password, PasswordRules, Rules, Username, UsernameRules,
    ValidationResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FormKind {
    #[display("Sign up")]
    Registration,
    #[display("Log in")]
    Login,
}

/// Per-field verdicts of one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    valid: bool,
    fields: BTreeMap<Field, ValidationResult>,
}

impl FormReport {
    fn new(fields: BTreeMap<Field, ValidationResult>) -> Self {
        let valid = fields.values().all(ValidationResult::is_valid);
        Self { valid, fields }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn field(&self, field: Field) -> Option<&ValidationResult> {
        self.fields.get(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &ValidationResult)> {
        self.fields.iter().map(|(field, result)| (*field, result))
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Form payload must be a JSON object")]
    NotAnObject,
    #[error("Form validation failed")]
    Invalid(FormReport),
}

/// Judges an untyped payload value with the rules of `R`.
///
/// Missing and falsy values count as empty; other non-string values are
/// rejected without running the pipeline.
pub fn check_value<R: Rules>(value: Option<&Value>) -> ValidationResult {
    match value {
        Some(Value::String(candidate)) => R::run(candidate),
        None | Some(Value::Null) | Some(Value::Bool(false)) => {
            ValidationResult::from_issues([R::EMPTY])
        }
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
            ValidationResult::from_issues([R::EMPTY])
        }
        Some(_) => ValidationResult::from_issues([R::NOT_A_STRING]),
    }
}

/// Only requires a value to be present, without judging its content
fn check_presence<R: Rules>(value: Option<&Value>) -> ValidationResult {
    match value {
        Some(Value::String(candidate)) if candidate.is_empty() => {
            ValidationResult::from_issues([R::EMPTY])
        }
        Some(Value::String(_)) => ValidationResult::from_issues(Vec::<R::Issue>::new()),
        other => check_value::<R>(other),
    }
}

/// Validates every field of `kind` found in `payload`
pub fn validate_form(kind: FormKind, payload: &Value) -> Result<FormReport, FormError> {
    let object = payload.as_object().ok_or(FormError::NotAnObject)?;
    let get = |field: Field| object.get(&field.to_string());

    let mut fields = BTreeMap::new();
    fields.insert(Field::Email, check_value::<EmailRules>(get(Field::Email)));

    match kind {
        FormKind::Registration => {
            fields.insert(
                Field::Password,
                check_value::<PasswordRules>(get(Field::Password)),
            );
            fields.insert(
                Field::Username,
                check_value::<UsernameRules>(get(Field::Username)),
            );
        }
        FormKind::Login => {
            fields.insert(
                Field::Password,
                check_presence::<PasswordRules>(get(Field::Password)),
            );
        }
    }

    let report = FormReport::new(fields);
    debug!("{} form checked, valid: {}", kind, report.is_valid());
    Ok(report)
}

fn string_field<'a>(payload: &'a Value, field: Field) -> &'a str {
    payload
        .get(field.to_string())
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationForm {
    pub email: EmailAddress,
    pub password: Password,
    pub username: Username,
}

impl RegistrationForm {
    pub fn try_from_payload(payload: &Value) -> Result<Self, FormError> {
        let report = validate_form(FormKind::Registration, payload)?;
        if !report.is_valid() {
            return Err(FormError::Invalid(report));
        }

        let form = Self {
            email: EmailAddress::try_from(string_field(payload, Field::Email))
                .map_err(|_| FormError::Invalid(report.clone()))?,
            password: Password::try_from(string_field(payload, Field::Password))
                .map_err(|_| FormError::Invalid(report.clone()))?,
            username: Username::try_from(string_field(payload, Field::Username))
                .map_err(|_| FormError::Invalid(report.clone()))?,
        };

        info!("Registration form accepted for {}", form.username);
        Ok(form)
    }
}

/// Body of `POST /auth/login`
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub email: EmailAddress,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl LoginForm {
    pub fn try_from_payload(payload: &Value) -> Result<Self, FormError> {
        let report = validate_form(FormKind::Login, payload)?;
        if !report.is_valid() {
            return Err(FormError::Invalid(report));
        }

        let email = EmailAddress::try_from(string_field(payload, Field::Email))
            .map_err(|_| FormError::Invalid(report))?;

        Ok(Self {
            email,
            password: string_field(payload, Field::Password).to_owned(),
        })
    }
}
