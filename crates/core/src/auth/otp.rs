//! One-time passwords delivered over SMS.

use rand::Rng;

/// Number of digits in an OTP.
pub const OTP_LENGTH: usize = 5;

/// Generates a numeric OTP of [`OTP_LENGTH`] digits with no leading zero.
#[must_use]
pub fn generate_otp() -> String {
    rand::rng().random_range(10_000..100_000u32).to_string()
}

/// Compares a submitted OTP with the one on record.
///
/// A user with no outstanding OTP never matches.
#[must_use]
pub fn otp_matches(stored: Option<&str>, submitted: &str) -> bool {
    stored.is_some_and(|stored| !stored.is_empty() && stored == submitted.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_otp_shape() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), OTP_LENGTH);
            assert!(otp.bytes().all(|b| b.is_ascii_digit()));
            assert!(!otp.starts_with('0'));
        }
    }

    #[test]
    fn test_otp_matches() {
        assert!(otp_matches(Some("12345"), "12345"));
        assert!(otp_matches(Some("12345"), " 12345 "));
        assert!(!otp_matches(Some("12345"), "54321"));
        assert!(!otp_matches(None, "12345"));
        assert!(!otp_matches(Some(""), ""));
    }
}
