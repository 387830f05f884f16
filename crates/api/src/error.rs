//! Conversion of domain errors into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use expensa_core::auth::{AuthError, MpinError};
use expensa_core::eligibility::{EligibilityError, ErrorKind};
use expensa_core::expense::ExpenseError;
use expensa_core::listing::ListingError;
use expensa_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// Error returned by handlers.
///
/// Wraps [`AppError`] so domain errors can be converted with `?` and rendered
/// as `{"error", "message"}` bodies.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<EligibilityError> for ApiError {
    fn from(err: EligibilityError) -> Self {
        let message = err.to_string();
        Self(match err.kind() {
            ErrorKind::Validation => AppError::Validation(message),
            ErrorKind::NotFound => AppError::NotFound(message),
            ErrorKind::Conflict => AppError::Conflict(message),
            ErrorKind::LimitExceeded | ErrorKind::DisabledCategory => {
                AppError::BusinessRule(message)
            }
            ErrorKind::Internal => AppError::Database(message),
        })
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        Self(match err {
            AuthError::UserNotFound => AppError::NotFound(message),
            AuthError::InvalidMpin => AppError::Unauthorized(message),
            AuthError::InvalidMobile
            | AuthError::InvalidMpinFormat
            | AuthError::InvalidOtp
            | AuthError::OtpSendFailed => AppError::Validation(message),
        })
    }
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        let message = err.to_string();
        Self(match err {
            ExpenseError::NotFound(_) => AppError::NotFound(message),
            ExpenseError::EmptyTitle
            | ExpenseError::TitleTooLong(_)
            | ExpenseError::NonPositiveAmount
            | ExpenseError::EmptyCategory => AppError::Validation(message),
        })
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        Self(AppError::NotFound(err.to_string()))
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<MpinError> for ApiError {
    fn from(err: MpinError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}
