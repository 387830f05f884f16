//! Authentication primitives.
//!
//! This module provides:
//! - MPIN hashing with Argon2id
//! - One-time password generation
//! - Shape checks for mobile numbers and MPINs
//! - User type definitions

mod mpin;
mod otp;

pub use mpin::{MpinError, hash_mpin, verify_mpin};
pub use otp::{OTP_LENGTH, generate_otp, otp_matches};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of digits in an MPIN.
pub const MPIN_MIN_LEN: usize = 4;
/// Maximum number of digits in an MPIN.
pub const MPIN_MAX_LEN: usize = 6;

/// Authentication errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Mobile number is not 10-15 digits.
    #[error("Invalid mobile number")]
    InvalidMobile,

    /// MPIN is not 4-6 digits.
    #[error("MPIN must be 4 to 6 digits")]
    InvalidMpinFormat,

    /// No user is provisioned for the mobile number.
    #[error("User not found")]
    UserNotFound,

    /// OTP does not match the one issued.
    #[error("Invalid OTP")]
    InvalidOtp,

    /// MPIN does not match the stored hash.
    #[error("Invalid MPIN")]
    InvalidMpin,

    /// The SMS gateway failed to deliver the OTP.
    #[error("OTP send failed")]
    OtpSendFailed,
}

/// Kind of account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Files expenses and reports.
    #[default]
    Staff,
    /// Administers tiers and users.
    Admin,
}

impl UserType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown user type: {other}")),
        }
    }
}

/// Checks a mobile number: 10 to 15 digits with an optional leading `+`.
///
/// Returns the trimmed number.
pub fn validate_mobile(mobile: &str) -> Result<&str, AuthError> {
    let mobile = mobile.trim();
    let digits = mobile.strip_prefix('+').unwrap_or(mobile);

    if (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(mobile)
    } else {
        Err(AuthError::InvalidMobile)
    }
}

/// Checks an MPIN: 4 to 6 ASCII digits.
pub fn validate_mpin(mpin: &str) -> Result<(), AuthError> {
    if (MPIN_MIN_LEN..=MPIN_MAX_LEN).contains(&mpin.len()) && mpin.bytes().all(|b| b.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(AuthError::InvalidMpinFormat)
    }
}
