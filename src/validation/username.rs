//! Username validation.
//!
//! A quick pattern decides the overall shape. The granular stages always run
//! afterwards so the caller gets precise diagnostics; when the quick pattern
//! fails and none of them fires, a generic format issue is reported instead.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::constants::{USERNAME_MAX_LENGTH, USERNAME_MIN_LENGTH, USERNAME_SEPARATORS};
use super::text::{is_form_whitespace, text_length, trim_input};
use super::types::{Field, ValidationResult};
use super::validator::Rules;

static QUICK_FORMAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._-]{1,28}[a-zA-Z0-9]$")
        .expect("Failed to compile username format regex")
});

static ALLOWED_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+$").expect("Failed to compile username charset regex")
});

static ADJACENT_SEPARATORS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[._-][._-]").expect("Failed to compile username separator regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsernameIssue {
    #[error("Username cannot be empty")]
    Empty,
    #[error("Username must be a string")]
    NotAString,
    #[error("Username cannot contain spaces")]
    ContainsWhitespace,
    #[error("Username may only contain letters, digits and the characters ._-")]
    InvalidCharacters,
    #[error("Username must be at least {min} characters long")]
    TooShort { min: usize },
    #[error("Username cannot be longer than {max} characters")]
    TooLong { max: usize },
    #[error("Username cannot start with ., _ or -")]
    LeadingSeparator,
    #[error("Username cannot end with ., _ or -")]
    TrailingSeparator,
    #[error("Username cannot contain two dots in a row")]
    ConsecutiveDots,
    #[error("Username cannot contain two underscores in a row")]
    ConsecutiveUnderscores,
    #[error("Username cannot contain two hyphens in a row")]
    ConsecutiveHyphens,
    #[error("Special characters (._-) cannot follow each other in a username")]
    ConsecutiveSeparators,
    #[error("Username does not match the required format")]
    Format,
}

/// Rule set for username fields
#[derive(Debug, Clone, Copy, Default)]
pub struct UsernameRules;

impl Rules for UsernameRules {
    type Issue = UsernameIssue;

    const FIELD: Field = Field::Username;
    const EMPTY: UsernameIssue = UsernameIssue::Empty;
    const NOT_A_STRING: UsernameIssue = UsernameIssue::NotAString;

    fn issues(candidate: &str) -> Vec<UsernameIssue> {
        username_issues(candidate)
    }
}

/// Runs the username pipeline and returns its diagnostics in stage order
pub fn username_issues(candidate: &str) -> Vec<UsernameIssue> {
    let username = trim_input(candidate);
    if username.is_empty() {
        return vec![UsernameIssue::Empty];
    }

    let quick_match = QUICK_FORMAT_REGEX.is_match(username);

    let mut issues = validate_characters(username);
    issues.extend(validate_length(username));
    issues.extend(validate_edges(username));
    issues.extend(validate_separators(username));

    if !quick_match && issues.is_empty() {
        trace!("username failed the quick format check without a granular cause");
        issues.push(UsernameIssue::Format);
    }

    issues
}

/// Validates a username in one shot.
///
/// # Arguments
/// * `candidate` - The raw value typed into the username field
///
/// # Returns
/// The verdict with every diagnostic in stage order
pub fn validate_username(candidate: &str) -> ValidationResult {
    UsernameRules::run(candidate)
}

/// Returns true if `candidate` passes every username rule
pub fn is_valid_username(candidate: &str) -> bool {
    validate_username(candidate).is_valid()
}

fn validate_characters(username: &str) -> Vec<UsernameIssue> {
    let mut issues = Vec::new();

    if username.chars().any(is_form_whitespace) {
        issues.push(UsernameIssue::ContainsWhitespace);
    }

    if !ALLOWED_CHARS_REGEX.is_match(username) {
        issues.push(UsernameIssue::InvalidCharacters);
    }

    issues
}

fn validate_length(username: &str) -> Vec<UsernameIssue> {
    let length = text_length(username);

    if length < USERNAME_MIN_LENGTH {
        vec![UsernameIssue::TooShort {
            min: USERNAME_MIN_LENGTH,
        }]
    } else if length > USERNAME_MAX_LENGTH {
        vec![UsernameIssue::TooLong {
            max: USERNAME_MAX_LENGTH,
        }]
    } else {
        Vec::new()
    }
}

fn validate_edges(username: &str) -> Vec<UsernameIssue> {
    let mut issues = Vec::new();

    if username.starts_with(&USERNAME_SEPARATORS[..]) {
        issues.push(UsernameIssue::LeadingSeparator);
    }

    if username.ends_with(&USERNAME_SEPARATORS[..]) {
        issues.push(UsernameIssue::TrailingSeparator);
    }

    issues
}

fn validate_separators(username: &str) -> Vec<UsernameIssue> {
    let mut issues = Vec::new();

    if username.contains("..") {
        issues.push(UsernameIssue::ConsecutiveDots);
    }

    if username.contains("__") {
        issues.push(UsernameIssue::ConsecutiveUnderscores);
    }

    if username.contains("--") {
        issues.push(UsernameIssue::ConsecutiveHyphens);
    }

    if ADJACENT_SEPARATORS_REGEX.is_match(username) {
        issues.push(UsernameIssue::ConsecutiveSeparators);
    }

    issues
}
