use lazy_static::lazy_static;
use regex::Regex;

pub const PASSWORD_RULE: &str = "Password must be between 8 and 20 characters";

/// Purely syntactic `local@domain.tld` check, no DNS/MX lookup.
pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn is_valid_password(password: &str) -> bool {
    (8..=20).contains(&password.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
        assert!(is_valid_email("user+tag@example.io"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("no-domain@"));
        assert!(!is_valid_email("@no-local.com"));
        assert!(!is_valid_email("no-tld@example"));
        assert!(!is_valid_email("spaces in@local.com"));
        assert!(!is_valid_email("two@@ats.com"));
    }

    #[test]
    fn password_bounds_are_inclusive() {
        assert!(!is_valid_password("seven77"));
        assert!(is_valid_password("eight888"));
        assert!(is_valid_password("exactly-twenty-chars"));
        assert!(!is_valid_password("twenty-one-characters"));
        assert!(!is_valid_password(""));
    }
}
