//! Email address validation.
//!
//! The pipeline trims the candidate, runs a quick holistic pattern and stops
//! there on failure. Structural problems around `@` also stop the run. Past
//! that point every length, local part and domain rule is reported.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::constants::{
    EMAIL_DOMAIN_MAX_LENGTH, EMAIL_LOCAL_MAX_LENGTH, EMAIL_MAX_LENGTH, EMAIL_TLD_MIN_LENGTH,
};
use super::text::{text_length, trim_input};
use super::types::{Field, ValidationResult};
use super::validator::Rules;

static BASIC_FORMAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("Failed to compile email format regex")
});

static LOCAL_PART_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9!#$%&'*+\-/=?^_`{|}~.]+$")
        .expect("Failed to compile email local part regex")
});

static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.-]+$").expect("Failed to compile email domain regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailIssue {
    #[error("Email cannot be empty")]
    Empty,
    #[error("Email must be a string")]
    NotAString,
    #[error("Email does not match the basic format")]
    BasicFormat,
    #[error("Email must contain an @ symbol")]
    MissingAt,
    #[error("Email cannot start with an @ symbol")]
    StartsWithAt,
    #[error("Email cannot contain more than one @ symbol")]
    MultipleAt,
    #[error("Email is missing the local part (before @)")]
    MissingLocalPart,
    #[error("Email is missing the domain part (after @)")]
    MissingDomain,
    #[error("Email cannot be longer than {max} characters")]
    TooLong { max: usize },
    #[error("The local part of the email cannot be longer than {max} characters")]
    LocalPartTooLong { max: usize },
    #[error("The domain part of the email cannot be longer than {max} characters")]
    DomainTooLong { max: usize },
    #[error("The local part of the email contains invalid characters")]
    LocalPartInvalidCharacters,
    #[error("A dot cannot be the first or last character of the local part")]
    LocalPartDotAtEdge,
    #[error("The local part cannot contain two consecutive dots")]
    LocalPartConsecutiveDots,
    #[error("The domain part of the email contains invalid characters")]
    DomainInvalidCharacters,
    #[error("The domain must contain at least one dot")]
    DomainMissingDot,
    #[error("A hyphen cannot be the first or last character of the domain")]
    DomainHyphenAtEdge,
    #[error("The top-level domain must be at least {min} characters long")]
    TopLevelDomainTooShort { min: usize },
    #[error("The top-level domain cannot consist of digits only")]
    TopLevelDomainNumeric,
}

/// Rule set for email fields
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailRules;

impl Rules for EmailRules {
    type Issue = EmailIssue;

    const FIELD: Field = Field::Email;
    const EMPTY: EmailIssue = EmailIssue::Empty;
    const NOT_A_STRING: EmailIssue = EmailIssue::NotAString;

    fn issues(candidate: &str) -> Vec<EmailIssue> {
        email_issues(candidate)
    }
}

/// Runs the email pipeline and returns its diagnostics in stage order
pub fn email_issues(candidate: &str) -> Vec<EmailIssue> {
    let email = trim_input(candidate);
    if email.is_empty() {
        return vec![EmailIssue::Empty];
    }

    if !BASIC_FORMAT_REGEX.is_match(email) {
        trace!("email rejected by the basic format check");
        return vec![EmailIssue::BasicFormat];
    }

    let structure = validate_structure(email);
    if !structure.is_empty() {
        trace!("email rejected by the structure check");
        return structure;
    }

    let mut issues = validate_lengths(email);

    if let Some((local_part, domain)) = email.split_once('@') {
        if !local_part.is_empty() {
            issues.extend(validate_local_part(local_part));
        }
        if !domain.is_empty() {
            issues.extend(validate_domain(domain));
        }
    }

    issues
}

/// Validates an email address in one shot.
///
/// # Arguments
/// * `candidate` - The raw value typed into the email field
///
/// # Returns
/// The verdict with every diagnostic in stage order
pub fn validate_email(candidate: &str) -> ValidationResult {
    EmailRules::run(candidate)
}

/// Returns true if `candidate` passes every email rule
pub fn is_valid_email(candidate: &str) -> bool {
    validate_email(candidate).is_valid()
}

fn validate_structure(email: &str) -> Vec<EmailIssue> {
    let Some(at_index) = email.find('@') else {
        return vec![EmailIssue::MissingAt];
    };

    let mut issues = Vec::new();

    if at_index == 0 {
        issues.push(EmailIssue::StartsWithAt);
    }

    if email[at_index + 1..].contains('@') {
        issues.push(EmailIssue::MultipleAt);
    }

    // Parts are the text before the first `@` and between the first and second
    let mut parts = email.split('@');
    let local_part = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local_part.is_empty() {
        issues.push(EmailIssue::MissingLocalPart);
    }

    if domain.is_empty() {
        issues.push(EmailIssue::MissingDomain);
    }

    issues
}

fn validate_lengths(email: &str) -> Vec<EmailIssue> {
    let mut issues = Vec::new();

    if text_length(email) > EMAIL_MAX_LENGTH {
        issues.push(EmailIssue::TooLong {
            max: EMAIL_MAX_LENGTH,
        });
    }

    let Some((local_part, domain)) = email.split_once('@') else {
        return issues;
    };

    if text_length(local_part) > EMAIL_LOCAL_MAX_LENGTH {
        issues.push(EmailIssue::LocalPartTooLong {
            max: EMAIL_LOCAL_MAX_LENGTH,
        });
    }

    if text_length(domain) > EMAIL_DOMAIN_MAX_LENGTH {
        issues.push(EmailIssue::DomainTooLong {
            max: EMAIL_DOMAIN_MAX_LENGTH,
        });
    }

    issues
}

fn validate_local_part(local_part: &str) -> Vec<EmailIssue> {
    let mut issues = Vec::new();

    if !LOCAL_PART_REGEX.is_match(local_part) {
        issues.push(EmailIssue::LocalPartInvalidCharacters);
    }

    if local_part.starts_with('.') || local_part.ends_with('.') {
        issues.push(EmailIssue::LocalPartDotAtEdge);
    }

    if local_part.contains("..") {
        issues.push(EmailIssue::LocalPartConsecutiveDots);
    }

    issues
}

fn validate_domain(domain: &str) -> Vec<EmailIssue> {
    let mut issues = Vec::new();

    if !DOMAIN_REGEX.is_match(domain) {
        issues.push(EmailIssue::DomainInvalidCharacters);
    }

    if !domain.contains('.') {
        issues.push(EmailIssue::DomainMissingDot);
    }

    if domain.starts_with('-') || domain.ends_with('-') {
        issues.push(EmailIssue::DomainHyphenAtEdge);
    }

    // A trailing dot leaves an empty label, which is not judged
    let tld = domain.rsplit('.').next().unwrap_or_default();
    if !tld.is_empty() {
        if text_length(tld) < EMAIL_TLD_MIN_LENGTH {
            issues.push(EmailIssue::TopLevelDomainTooShort {
                min: EMAIL_TLD_MIN_LENGTH,
            });
        }

        if tld.chars().all(|c| c.is_ascii_digit()) {
            issues.push(EmailIssue::TopLevelDomainNumeric);
        }
    }

    issues
}
