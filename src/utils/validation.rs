//! Field validation utilities.
//!
//! Pure predicates used by the authentication forms: email shape, password
//! policy, confirmation matching and the password strength meter.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// local-part "@" domain "." tld, tld at least two letters
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();

    /// Alphabet a strict password may be built from
    static ref STRICT_PASSWORD_REGEX: Regex = Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").unwrap();
    /// At least eight characters, none of them a line terminator
    static ref RELAXED_PASSWORD_REGEX: Regex =
        Regex::new(r"^[^\n\r\x{85}\x{2028}\x{2029}]{8,}$").unwrap();
}

/// Symbols accepted by the strict policy.
///
pub const PASSWORD_SYMBOLS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Minimum password length shared by both policies.
///
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Specifying which password strength rule applies.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordPolicy {
    /// Upper, lower, digit and one of `@$!%*?&`, nothing outside that alphabet.
    #[default]
    Strict,
    /// Upper, lower and digit on a single line.
    Relaxed,
}

impl PasswordPolicy {
    /// Human readable requirement shown when a password is rejected.
    ///
    pub fn requirement(&self) -> &'static str {
        match self {
            PasswordPolicy::Strict => {
                "Password must be at least 8 characters and include uppercase, lowercase, number, and special character"
            }
            PasswordPolicy::Relaxed => {
                "Password must be at least 8 characters with 1 uppercase, 1 lowercase, and 1 number"
            }
        }
    }
}

/// Return true if the email has the shape `local@domain.tld`.
///
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Return true if the password satisfies the given policy.
///
pub fn is_valid_password(password: &str, policy: PasswordPolicy) -> bool {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return false;
    }
    match policy {
        PasswordPolicy::Strict => {
            password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c))
                && STRICT_PASSWORD_REGEX.is_match(password)
        }
        PasswordPolicy::Relaxed => RELAXED_PASSWORD_REGEX.is_match(password),
    }
}

/// Return true if both entries are exactly equal.
///
pub fn do_passwords_match(password: &str, confirm_password: &str) -> bool {
    password == confirm_password
}

/// Coarse password strength buckets for the sign-up meter.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StrengthLevel {
    Weak,
    Moderate,
    Strong,
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Moderate => "Moderate",
            StrengthLevel::Strong => "Strong",
        };
        write!(f, "{}", label)
    }
}

/// Score a password between 0.0 and 1.0.
///
/// Length contributes up to 0.3, character classes up to 0.7. Scoring is done
/// in tenths so the bucket boundaries are exact.
pub fn password_strength(password: &str) -> f64 {
    if password.is_empty() {
        return 0.0;
    }
    let length = password.chars().count();
    let mut tenths = 0u8;
    if length >= MIN_PASSWORD_LENGTH {
        tenths += 2;
    }
    if length >= 12 {
        tenths += 1;
    }
    if password.chars().any(char::is_uppercase) {
        tenths += 2;
    }
    if password.chars().any(char::is_lowercase) {
        tenths += 1;
    }
    if password.chars().any(char::is_numeric) {
        tenths += 2;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        tenths += 2;
    }
    f64::from(tenths) / 10.0
}

/// Bucket a strength score.
///
pub fn strength_level(score: f64) -> StrengthLevel {
    if score < 0.3 {
        StrengthLevel::Weak
    } else if score < 0.7 {
        StrengthLevel::Moderate
    } else {
        StrengthLevel::Strong
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(is_valid_email("a_b-c@sub-domain.io"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("user@example.com "));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_email_without_at_sign_is_rejected() {
        for candidate in ["plainaddress", "example.com", "user.example.com", "a.bc", "x"] {
            assert!(!is_valid_email(candidate), "{} should be rejected", candidate);
        }
    }

    #[test]
    fn test_strict_password_policy() {
        assert!(is_valid_password("Abcdefg1!", PasswordPolicy::Strict));
        assert!(is_valid_password("P@ssw0rd", PasswordPolicy::Strict));
        assert!(!is_valid_password("Abcdefg1", PasswordPolicy::Strict));
        assert!(!is_valid_password("Ab1!", PasswordPolicy::Strict));
        assert!(!is_valid_password("abcdefg1!", PasswordPolicy::Strict));
        assert!(!is_valid_password("ABCDEFG1!", PasswordPolicy::Strict));
        assert!(!is_valid_password("Abcdefgh!", PasswordPolicy::Strict));
        // Characters outside the allowed alphabet
        assert!(!is_valid_password("Abcdef g1!", PasswordPolicy::Strict));
        assert!(!is_valid_password("Abcdefg1#!", PasswordPolicy::Strict));
    }

    #[test]
    fn test_relaxed_password_policy() {
        assert!(is_valid_password("Abcdefg1", PasswordPolicy::Relaxed));
        assert!(is_valid_password("Abc def 1", PasswordPolicy::Relaxed));
        assert!(!is_valid_password("Abcdef1", PasswordPolicy::Relaxed));
        assert!(!is_valid_password("abcdefg1", PasswordPolicy::Relaxed));
        assert!(!is_valid_password("Abcdefgh", PasswordPolicy::Relaxed));
        assert!(!is_valid_password("Abcd\nefg1", PasswordPolicy::Relaxed));
        assert!(!is_valid_password("Abcd\refg1", PasswordPolicy::Relaxed));
        assert!(!is_valid_password("Abcd\u{85}efg1", PasswordPolicy::Relaxed));
        assert!(!is_valid_password("Abcd\u{2028}efg1", PasswordPolicy::Relaxed));
        assert!(!is_valid_password("Abcd\u{2029}efg1", PasswordPolicy::Relaxed));
    }

    #[test]
    fn test_passwords_match() {
        assert!(do_passwords_match("Secret1!", "Secret1!"));
        assert!(!do_passwords_match("Secret1!", "secret1!"));
        assert!(do_passwords_match("", ""));
        for (a, b) in [("one", "two"), ("same", "same"), ("Case", "case")] {
            assert_eq!(do_passwords_match(a, b), do_passwords_match(b, a));
            assert!(do_passwords_match(a, a));
        }
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength(""), 0.0);
        assert_eq!(password_strength("abc"), 0.1);
        assert_eq!(password_strength("abcdefgh"), 0.3);
        assert_eq!(password_strength("Abcdefg1"), 0.7);
        assert_eq!(password_strength("Abcdefghijk1!"), 1.0);
        assert_eq!(password_strength("Abcdefg\u{661}"), 0.7);
    }

    #[test]
    fn test_strength_level() {
        assert_eq!(strength_level(password_strength("abc")), StrengthLevel::Weak);
        assert_eq!(strength_level(password_strength("abcdefgh")), StrengthLevel::Moderate);
        assert_eq!(strength_level(password_strength("Abcdefg1")), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::Moderate.to_string(), "Moderate");
    }

    #[test]
    fn test_policy_requirement_text() {
        assert!(PasswordPolicy::Strict.requirement().contains("special character"));
        assert!(!PasswordPolicy::Relaxed.requirement().contains("special character"));
        for class in ["uppercase", "lowercase", "number"] {
            assert!(PasswordPolicy::Relaxed.requirement().contains(class));
        }
    }
}
