//! Authentication routes: OTP verification and MPIN login.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{post, put},
};
use tracing::{info, warn};

use super::{message_only, success};
use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthUser;
use expensa_core::auth::{
    AuthError, UserType, generate_otp, hash_mpin, otp_matches, validate_mobile, validate_mpin,
    verify_mpin,
};
use expensa_db::{UserRepository, entities::users};
use expensa_shared::AppError;
use expensa_shared::auth::{
    ChangeMpinRequest, LoginResponse, MpinRequest, SendOtpRequest, VerifyRequest,
};
use expensa_shared::sms::mask_mobile;

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/send-otp", post(send_otp))
        .route("/auth/verify", post(verify))
        .route("/auth/mpin", post(mpin))
}

/// Auth routes that require a bearer token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/change-mpin", put(change_mpin))
}

async fn find_user(repo: &UserRepository, mobile: &str) -> ApiResult<users::Model> {
    let mobile = validate_mobile(mobile)?;
    repo.find_by_mobile(mobile)
        .await?
        .ok_or_else(|| AuthError::UserNotFound.into())
}

/// POST /auth/send-otp - Issue an OTP to a provisioned mobile number.
async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> ApiResult<Response> {
    let repo = UserRepository::new((*state.db).clone());
    let user = find_user(&repo, &payload.mobile).await?;

    let otp = generate_otp();
    if let Err(e) = state.sms_gateway.send_otp(&user.mobile, &otp).await {
        warn!(mobile = %mask_mobile(&user.mobile), error = %e, "OTP delivery failed");
        return Err(AuthError::OtpSendFailed.into());
    }

    repo.store_otp(user, otp).await?;
    Ok(message_only("OTP sent"))
}

/// POST /auth/verify - Confirm the mobile number with the OTP it received.
async fn verify(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> ApiResult<Response> {
    let repo = UserRepository::new((*state.db).clone());
    let user = find_user(&repo, &payload.mobile).await?;

    if !otp_matches(user.otp.as_deref(), &payload.otp) {
        return Err(AuthError::InvalidOtp.into());
    }

    let user = repo.mark_verified(user).await?;
    info!(user_id = %user.id, "Mobile verified");
    Ok(message_only("Mobile verified"))
}

/// POST /auth/mpin - Set the MPIN on first use, otherwise log in with it.
async fn mpin(
    State(state): State<AppState>,
    Json(payload): Json<MpinRequest>,
) -> ApiResult<Response> {
    validate_mpin(&payload.mpin)?;
    let repo = UserRepository::new((*state.db).clone());
    let user = find_user(&repo, &payload.mobile).await?;

    let Some(stored) = user.mpin_hash.clone() else {
        let hash = hash_mpin(&payload.mpin)?;
        let user = repo.set_mpin_hash(user, hash).await?;
        info!(user_id = %user.id, "MPIN set");
        return Ok(message_only("MPIN set"));
    };

    if !verify_mpin(&payload.mpin, &stored)? {
        info!(user_id = %user.id, "Failed login attempt - invalid MPIN");
        return Err(AuthError::InvalidMpin.into());
    }

    let user_type = UserType::from(user.user_type);
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, user_type.as_str())?;

    info!(user_id = %user.id, "User logged in successfully");
    Ok(success(
        StatusCode::OK,
        "Login successful",
        LoginResponse {
            access_token,
            expires_in: state.jwt_service.access_token_expires_in(),
            user_id: user.id,
            user_type: user_type.to_string(),
        },
    ))
}

/// PUT /auth/change-mpin - Replace the MPIN, authorised by a fresh OTP.
async fn change_mpin(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ChangeMpinRequest>,
) -> ApiResult<Response> {
    validate_mpin(&payload.mpin)?;
    let repo = UserRepository::new((*state.db).clone());
    let user = find_user(&repo, &payload.mobile).await?;

    if user.id != auth.user_id().into_inner() {
        return Err(ApiError(AppError::Forbidden(
            "Mobile number does not belong to the signed-in user".to_string(),
        )));
    }
    if !otp_matches(user.otp.as_deref(), &payload.otp) {
        return Err(AuthError::InvalidOtp.into());
    }

    let hash = hash_mpin(&payload.mpin)?;
    let user = repo.set_mpin_hash(user, hash).await?;
    info!(user_id = %user.id, "MPIN changed");
    Ok(message_only("MPIN changed"))
}
