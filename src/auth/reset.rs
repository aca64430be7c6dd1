use rand::{rngs::OsRng, RngCore};
use time::{Duration, OffsetDateTime};

/// Codes outlive their request by this much; the expiry is persisted next to
/// the code and checked on use.
pub const RESET_CODE_TTL: Duration = Duration::minutes(15);

/// 8 lowercase hex chars from 4 CSPRNG bytes. No collision retry; the
/// (email, code) pair lookup makes an accidental collision harmless.
pub fn generate_code() -> String {
    let mut bytes = [0u8; 4];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn expiry_from(now: OffsetDateTime) -> OffsetDateTime {
    now + RESET_CODE_TTL
}

/// Strict comparison: a code expiring exactly "now" is still usable.
pub fn is_expired(expires_at: OffsetDateTime, now: OffsetDateTime) -> bool {
    now > expires_at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_eight_lowercase_hex_chars() {
        let code = generate_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn codes_differ_across_calls() {
        assert_ne!(generate_code(), generate_code());
    }

    #[test]
    fn expiry_is_fifteen_minutes_out() {
        let now = OffsetDateTime::UNIX_EPOCH;
        assert_eq!(expiry_from(now) - now, Duration::minutes(15));
    }

    #[test]
    fn expiry_boundary_is_strict() {
        let expires = OffsetDateTime::UNIX_EPOCH + Duration::minutes(15);
        assert!(!is_expired(expires, expires));
        assert!(!is_expired(expires, expires - Duration::seconds(1)));
        assert!(is_expired(expires, expires + Duration::seconds(1)));
    }
}
