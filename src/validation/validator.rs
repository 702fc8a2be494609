//! Stateful wrapper shared by the three field validators

use log::debug;
use once_cell::unsync::OnceCell;
use std::fmt;
use std::marker::PhantomData;

use super::types::{Field, ValidationResult};

/// A rule pipeline for one field kind.
pub trait Rules {
    /// Typed diagnostic; its `Display` is the message shown under the field
    type Issue: fmt::Display;

    const FIELD: Field;
    /// Reported when the value is missing or empty
    const EMPTY: Self::Issue;
    /// Reported when an untyped value is present but not a string
    const NOT_A_STRING: Self::Issue;

    /// Runs every stage on `candidate` and returns the diagnostics in stage order
    fn issues(candidate: &str) -> Vec<Self::Issue>;

    fn run(candidate: &str) -> ValidationResult {
        let result = ValidationResult::from_issues(Self::issues(candidate));
        debug!(
            "{} validation finished with {} error(s)",
            Self::FIELD,
            result.errors().len()
        );
        result
    }
}

/// Holds the value of one form field and memoizes its last verdict.
///
/// The cache is filled on the first read and dropped whenever the candidate
/// is replaced.
pub struct Validator<R: Rules> {
    candidate: String,
    cached: OnceCell<ValidationResult>,
    rules: PhantomData<R>,
}

impl<R: Rules> Validator<R> {
    /// Creates a validator for `candidate`. Nothing runs until the verdict
    /// is first read or [`validate`](Self::validate) is called.
    ///
    /// # Example
    /// ```
    /// use watchlist_forms::EmailValidator;
    ///
    /// let mut validator = EmailValidator::new("bad");
    /// assert!(!validator.is_valid());
    /// assert!(validator.set_candidate("user@example.com").is_valid());
    /// ```
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            cached: OnceCell::new(),
            rules: PhantomData,
        }
    }

    /// The value currently under validation, as given
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    /// Replaces the candidate and forgets the previous verdict
    pub fn set_candidate(&mut self, candidate: impl Into<String>) -> &mut Self {
        self.candidate = candidate.into();
        self.cached.take();
        self
    }

    /// Runs the pipeline now, replacing whatever was cached
    pub fn validate(&mut self) -> &ValidationResult {
        self.cached.take();
        self.result()
    }

    /// Returns the cached verdict, running the pipeline first if there is none
    pub fn result(&self) -> &ValidationResult {
        self.cached.get_or_init(|| R::run(&self.candidate))
    }

    /// Verdict of the cached run; runs the pipeline if nothing is cached
    pub fn is_valid(&self) -> bool {
        self.result().is_valid()
    }

    /// Diagnostics of the cached run in stage order; empty when valid
    pub fn errors(&self) -> &[String] {
        self.result().errors()
    }

    /// Peeks at the cache without triggering a run
    pub fn cached(&self) -> Option<&ValidationResult> {
        self.cached.get()
    }
}

impl<R: Rules> Clone for Validator<R> {
    fn clone(&self) -> Self {
        Self {
            candidate: self.candidate.clone(),
            cached: self.cached.clone(),
            rules: PhantomData,
        }
    }
}

// The candidate may be a password
impl<R: Rules> fmt::Debug for Validator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("field", &R::FIELD)
            .field("cached", &self.cached.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::{EmailValidator, PasswordValidator, UsernameValidator};

    #[test]
    fn test_cache_is_lazy() {
        let validator = EmailValidator::new("user@example.com");
        assert!(validator.cached().is_none());

        assert!(validator.is_valid());
        assert!(validator.cached().is_some());
        assert!(validator.errors().is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut validator = UsernameValidator::new("_john");
        let first = validator.validate().clone();
        let second = validator.validate().clone();

        assert_eq!(first, second);
        assert!(!first.is_valid());
    }

    #[test]
    fn test_set_candidate_invalidates_cache() {
        let mut validator = UsernameValidator::new("ab");
        assert!(!validator.is_valid());
        assert_eq!(validator.errors().len(), 1);

        validator.set_candidate("john_doe");
        assert!(validator.cached().is_none());
        assert!(validator.is_valid());
        assert!(validator.errors().is_empty());
        assert_eq!(validator.candidate(), "john_doe");
    }

    #[test]
    fn test_set_candidate_is_fluent() {
        let mut validator = PasswordValidator::new("");
        let errors = validator.set_candidate("short1!").errors().to_vec();

        assert!(errors.contains(&"Password must be at least 8 characters long".to_string()));
    }

    #[test]
    fn test_debug_hides_candidate() {
        let validator = PasswordValidator::new("Str0ng!Pass");
        let debug = format!("{:?}", validator);

        assert!(!debug.contains("Str0ng!Pass"));
        assert!(debug.contains("Password"));
    }
}
