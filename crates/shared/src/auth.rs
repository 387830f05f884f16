//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Kind of account (`staff`, `admin`).
    pub user_type: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, user_type: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            user_type: user_type.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Request to send an OTP to a registered mobile number.
#[derive(Debug, Clone, Deserialize)]
pub struct SendOtpRequest {
    /// Mobile number.
    pub mobile: String,
}

/// Request to verify a mobile number with the OTP it received.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    /// Mobile number.
    pub mobile: String,
    /// One-time password.
    pub otp: String,
}

/// Request to set an MPIN (first time) or log in with it.
#[derive(Debug, Clone, Deserialize)]
pub struct MpinRequest {
    /// Mobile number.
    pub mobile: String,
    /// MPIN digits.
    pub mpin: String,
}

/// Request to replace an MPIN, authorised by a fresh OTP.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeMpinRequest {
    /// Mobile number.
    pub mobile: String,
    /// New MPIN digits.
    pub mpin: String,
    /// One-time password.
    pub otp: String,
}

/// Token returned after a successful MPIN login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
    /// Authenticated user ID.
    pub user_id: Uuid,
    /// Kind of account.
    pub user_type: String,
}
