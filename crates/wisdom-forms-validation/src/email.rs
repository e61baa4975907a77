//! Email format validation

use once_cell::sync::Lazy;
use regex::Regex;

// local-part@domain.tld, no whitespace, exactly one '@'
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Validates basic email format
///
/// Checks for:
/// - A non-empty run before '@' with no whitespace or '@'
/// - A domain part with at least one '.' followed by more characters
/// - No whitespace anywhere
///
/// Callers trim the value first; leading or trailing whitespace is rejected here.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("foo@bar"));
        assert!(!is_valid_email("foo.bar"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@exa mple.com"));
        assert!(!is_valid_email(" user@example.com"));
    }
}
