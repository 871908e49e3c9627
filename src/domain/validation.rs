//! Shared input format checks.
//!
//! Patterns are compiled once and reused.

use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    email: Regex,
    aadhar: Regex,
    pan: Regex,
    contact_number: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        email: Regex::new(r"\S+@\S+\.\S+").expect("Valid regex"),
        aadhar: Regex::new(r"^[0-9]{12}$").expect("Valid regex"),
        pan: Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("Valid regex"),
        contact_number: Regex::new(r"^\([0-9]{3}\) [0-9]{3}-[0-9]{4}$").expect("Valid regex"),
    })
}

/// Minimum password length accepted by the login and registration forms.
pub const MIN_PASSWORD_LEN: usize = 6;

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    patterns().email.is_match(email)
}

/// Aadhar numbers are 12 digits; embedded spaces are ignored.
#[must_use]
pub fn is_valid_aadhar(number: &str) -> bool {
    patterns().aadhar.is_match(&strip_whitespace(number))
}

/// PAN format: five letters, four digits, one letter (e.g. `ABCDE1234F`).
#[must_use]
pub fn is_valid_pan(number: &str) -> bool {
    patterns().pan.is_match(&strip_whitespace(number))
}

/// Contact numbers use the `(555) 555-5555` mask.
#[must_use]
pub fn is_valid_contact_number(number: &str) -> bool {
    patterns().contact_number.is_match(number)
}

/// Apply the `(555) 555-5555` mask to whatever digits were typed so far.
///
/// Non-digits are dropped and input beyond ten digits is ignored.
#[must_use]
pub fn format_contact_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(10).collect();
    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({digits}"),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_valid_email("test@example.com"));
        assert!(!is_valid_email("test@example"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn test_aadhar_ignores_spaces() {
        assert!(is_valid_aadhar("1234 5678 9012"));
        assert!(!is_valid_aadhar("1234 5678 901"));
        assert!(!is_valid_aadhar("1234a5678901"));
    }

    #[test]
    fn test_pan() {
        assert!(is_valid_pan("ABCDE1234F"));
        assert!(!is_valid_pan("abcde1234f"));
        assert!(!is_valid_pan("ABCD12345F"));
    }

    #[test]
    fn test_contact_number_mask() {
        assert_eq!(format_contact_number(""), "");
        assert_eq!(format_contact_number("55"), "(55");
        assert_eq!(format_contact_number("55512"), "(555) 12");
        assert_eq!(format_contact_number("555-123-4567 ext"), "(555) 123-4567");
        assert_eq!(format_contact_number("555123456789"), "(555) 123-4567");
        assert!(is_valid_contact_number("(555) 123-4567"));
        assert!(!is_valid_contact_number("555-123-4567"));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert!(!is_valid_aadhar("१२३४५६७८९०१२"));
        assert!(!is_valid_aadhar("１２３４５６７８９０１２"));
        assert!(!is_valid_contact_number("(५५५) १२३-४५६७"));
        assert!(!is_valid_pan("ABCDE१२३४F"));
    }
}
