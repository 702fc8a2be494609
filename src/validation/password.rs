//! Password strength validation.
//!
//! Apart from the empty guard no stage stops the run: length, character
//! classes, weak patterns and edge spaces are all reported together.

use log::trace;
use thiserror::Error;

use super::constants::{
    PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, PASSWORD_REPEAT_RUN, PASSWORD_SYMBOLS,
    WEAK_SEQUENCES,
};
use super::text::text_length;
use super::types::{Field, ValidationResult};
use super::validator::Rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordIssue {
    #[error("Password cannot be empty")]
    Empty,
    #[error("Password must be a string")]
    NotAString,
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize },
    #[error("Password cannot be longer than {max} characters")]
    TooLong { max: usize },
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("Password must contain at least one digit")]
    MissingDigit,
    #[error("Password must contain at least one special character")]
    MissingSymbol,
    #[error("Password cannot contain more than two identical characters in a row")]
    RepeatedCharacters,
    #[error("Password contains a common character sequence (\"{sequence}\")")]
    CommonSequence { sequence: &'static str },
    #[error("Password cannot start or end with a space")]
    EdgeWhitespace,
}

/// Rule set for password fields
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordRules;

impl Rules for PasswordRules {
    type Issue = PasswordIssue;

    const FIELD: Field = Field::Password;
    const EMPTY: PasswordIssue = PasswordIssue::Empty;
    const NOT_A_STRING: PasswordIssue = PasswordIssue::NotAString;

    fn issues(candidate: &str) -> Vec<PasswordIssue> {
        password_issues(candidate)
    }
}

/// Runs the password pipeline and returns its diagnostics in stage order
pub fn password_issues(password: &str) -> Vec<PasswordIssue> {
    if password.is_empty() {
        return vec![PasswordIssue::Empty];
    }

    let mut issues = validate_length(password);
    issues.extend(validate_complexity(password));
    issues.extend(validate_common_patterns(password));
    issues.extend(validate_spaces(password));

    issues
}

/// Validates a password in one shot.
///
/// # Arguments
/// * `candidate` - The password exactly as typed, it is never trimmed
///
/// # Returns
/// The verdict with every diagnostic in stage order
pub fn validate_password(candidate: &str) -> ValidationResult {
    PasswordRules::run(candidate)
}

/// Returns true if `candidate` passes every password rule
pub fn is_valid_password(candidate: &str) -> bool {
    validate_password(candidate).is_valid()
}

fn validate_length(password: &str) -> Vec<PasswordIssue> {
    let mut issues = Vec::new();
    let length = text_length(password);

    if length < PASSWORD_MIN_LENGTH {
        issues.push(PasswordIssue::TooShort {
            min: PASSWORD_MIN_LENGTH,
        });
    }

    if length > PASSWORD_MAX_LENGTH {
        issues.push(PasswordIssue::TooLong {
            max: PASSWORD_MAX_LENGTH,
        });
    }

    issues
}

fn validate_complexity(password: &str) -> Vec<PasswordIssue> {
    let mut issues = Vec::new();

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push(PasswordIssue::MissingUppercase);
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        issues.push(PasswordIssue::MissingLowercase);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push(PasswordIssue::MissingDigit);
    }

    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        issues.push(PasswordIssue::MissingSymbol);
    }

    issues
}

fn validate_common_patterns(password: &str) -> Vec<PasswordIssue> {
    let mut issues = Vec::new();

    if has_repeated_run(password) {
        issues.push(PasswordIssue::RepeatedCharacters);
    }

    let lowered = password.to_lowercase();
    if let Some(sequence) = WEAK_SEQUENCES.into_iter().find(|seq| lowered.contains(seq)) {
        trace!("password matched a weak sequence");
        issues.push(PasswordIssue::CommonSequence { sequence });
    }

    issues
}

fn validate_spaces(password: &str) -> Vec<PasswordIssue> {
    if password.starts_with(' ') || password.ends_with(' ') {
        vec![PasswordIssue::EdgeWhitespace]
    } else {
        Vec::new()
    }
}

/// Whether the password holds a run of identical UTF-16 code units long
/// enough to be rejected. Line terminators never count as part of a run, and
/// repeated astral characters do not either since their surrogates alternate.
fn has_repeated_run(password: &str) -> bool {
    let units: Vec<u16> = password.encode_utf16().collect();

    units.windows(PASSWORD_REPEAT_RUN).any(|window| {
        !is_line_terminator(window[0]) && window.iter().all(|&unit| unit == window[0])
    })
}

fn is_line_terminator(unit: u16) -> bool {
    matches!(unit, 0x000A | 0x000D | 0x2028 | 0x2029)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_passwords() {
        let valid_cases = vec!["Str0ng!Pass", "Tr0ub4dour&3", "c0rrect-Horse-battery"];

        for password in valid_cases {
            assert!(
                is_valid_password(password),
                "Valid password {} was rejected: {:?}",
                password,
                password_issues(password)
            );
        }
    }

    #[test]
    fn test_empty_short_circuits() {
        assert_eq!(password_issues(""), vec![PasswordIssue::Empty]);
    }

    #[test]
    fn test_deny_listed_sequence_is_case_insensitive() {
        assert_eq!(
            password_issues("Password1!"),
            vec![PasswordIssue::CommonSequence {
                sequence: "password"
            }]
        );
    }

    #[test]
    fn test_deny_list_reports_first_hit_only() {
        assert_eq!(
            password_issues("QWERTY123456!a"),
            vec![PasswordIssue::CommonSequence { sequence: "123456" }]
        );
    }

    #[test]
    fn test_short_password() {
        assert_eq!(
            password_issues("short1!"),
            vec![
                PasswordIssue::TooShort { min: 8 },
                PasswordIssue::MissingUppercase
            ]
        );
    }

    #[test]
    fn test_rule_families_accumulate() {
        assert_eq!(
            password_issues(&"a".repeat(129)),
            vec![
                PasswordIssue::TooLong { max: 128 },
                PasswordIssue::MissingUppercase,
                PasswordIssue::MissingDigit,
                PasswordIssue::MissingSymbol,
                PasswordIssue::RepeatedCharacters,
            ]
        );

        assert_eq!(
            password_issues(" "),
            vec![
                PasswordIssue::TooShort { min: 8 },
                PasswordIssue::MissingUppercase,
                PasswordIssue::MissingLowercase,
                PasswordIssue::MissingDigit,
                PasswordIssue::MissingSymbol,
                PasswordIssue::EdgeWhitespace,
            ]
        );
    }

    #[test]
    fn test_repeated_characters() {
        assert_eq!(
            password_issues("aaaBBB111!!!"),
            vec![PasswordIssue::RepeatedCharacters]
        );
        assert!(!has_repeated_run("aabbaa"));
        assert!(!has_repeated_run("Ab\n\n\nc"));
    }

    #[test]
    fn test_astral_characters_count_as_two() {
        // Two emoji take four UTF-16 units, eight in total
        assert!(password_issues("Aa1!\u{1F600}\u{1F600}").is_empty());
        assert_eq!(
            password_issues("Aa1!\u{1F600}"),
            vec![PasswordIssue::TooShort { min: 8 }]
        );
    }

    #[test]
    fn test_repeated_astral_characters_are_not_a_run() {
        assert!(!has_repeated_run("\u{1F600}\u{1F600}\u{1F600}"));
        assert!(is_valid_password("Aa1!bcdE\u{1F600}\u{1F600}\u{1F600}"));
    }

    #[test]
    fn test_edge_whitespace() {
        assert_eq!(password_issues(" Str0ng!Pass"), vec![PasswordIssue::EdgeWhitespace]);
        assert_eq!(password_issues("Str0ng!Pass "), vec![PasswordIssue::EdgeWhitespace]);
        assert!(is_valid_password("Str0ng! Pass"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            validate_password("Password1!").errors(),
            ["Password contains a common character sequence (\"password\")"]
        );
    }
}
