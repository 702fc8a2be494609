//! Constants used throughout the validation system

/// Maximum length of a whole email address
pub const EMAIL_MAX_LENGTH: usize = 254;
/// Maximum length of the part before `@`
pub const EMAIL_LOCAL_MAX_LENGTH: usize = 64;
/// Maximum length of the part after `@`
pub const EMAIL_DOMAIN_MAX_LENGTH: usize = 255;
/// Minimum length of the top-level domain label
pub const EMAIL_TLD_MIN_LENGTH: usize = 2;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;
/// Runs of this many identical characters are rejected
pub const PASSWORD_REPEAT_RUN: usize = 3;
/// Symbols that satisfy the "special character" requirement
pub const PASSWORD_SYMBOLS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;
/// Weak sequences, scanned in this order; only the first hit is reported
pub const WEAK_SEQUENCES: [&str; 5] = ["123456", "abcdef", "qwerty", "password", "admin"];

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 30;
/// Non-alphanumeric characters a username may contain
pub const USERNAME_SEPARATORS: [char; 3] = ['.', '_', '-'];
